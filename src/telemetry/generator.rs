use std::f64::consts::PI;
use crate::config::SimulationConfig;
use crate::telemetry::source::{NoiseDraw, NoiseSource};
use crate::telemetry::SimulationState;
use crate::types::TickOutcome;
/// Produces one sample per channel from elapsed time. Holds no GUI state.
pub struct Generator {
    total_duration_secs: f64,
    frequency_hz: f64,
    noise_amplitude: f64,
    report_tolerance_secs: f64,
    noise: Box<dyn NoiseSource>,
}
impl Generator {
    pub fn new(config: &SimulationConfig, noise: Box<dyn NoiseSource>) -> Self {
        Self {
            total_duration_secs: config.total_duration_secs,
            frequency_hz: config.frequency_hz,
            noise_amplitude: config.noise_amplitude,
            report_tolerance_secs: config.report_tolerance_secs,
            noise,
        }
    }
    /// Channel values at `t` for a given noise draw.
    pub fn sample_at(&self, t: f64, draw: NoiseDraw) -> [f64; 3] {
        let phase = 2.0 * PI * self.frequency_hz * t;
        let shared = self.noise_amplitude * draw.shared;
        [phase.sin() + shared, phase.cos() + shared, draw.channel]
    }
    /// Appends one frame at `elapsed` seconds, or nothing once the run duration has passed.
    pub fn tick(&mut self, state: &mut SimulationState, elapsed: f64) -> TickOutcome {
        if elapsed >= self.total_duration_secs {
            return TickOutcome::Expired;
        }
        let draw = self.noise.next_draw();
        state.push_frame(elapsed, self.sample_at(elapsed, draw));
        TickOutcome::Appended {
            time: elapsed,
            count: state.sample_count(),
        }
    }
    /// Count report for samples landing close to a whole second.
    pub fn report_line(&self, outcome: TickOutcome) -> Option<String> {
        match outcome {
            TickOutcome::Appended { time, count }
                if (time - time.round()).abs() < self.report_tolerance_secs =>
            {
                Some(format!("> Time: {time:.1}s | Samples: {count}"))
            }
            _ => None,
        }
    }
}
