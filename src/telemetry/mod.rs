// src/telemetry/mod.rs
pub mod clock;
pub mod error;
pub mod generator;
pub mod refresher;
pub mod sink;
pub mod source;
pub mod stream;
// Re-export the pieces the engine and GUI use directly
pub use clock::{Clock, Stopwatch};
pub use error::StationError;
pub use generator::Generator;
pub use refresher::{refresh, ChartSet};
pub use sink::{ChartBoard, ChartSink, LogPanel, LogSink};
pub use source::{NoiseSource, RandomNoise};
pub use stream::SimulationState;
// Deterministic doubles for tests
#[cfg(test)]
pub use clock::ManualClock;
#[cfg(test)]
pub use source::{ManualNoise, NoiseDraw};
