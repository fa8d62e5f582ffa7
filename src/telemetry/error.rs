use thiserror::Error;
#[derive(Debug, Error)]
pub enum StationError {
    #[error("total duration must be a positive, representable number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("{name} tick period must be greater than zero")]
    InvalidTickPeriod { name: &'static str },
    #[error("signal frequency must be positive and finite, got {0}")]
    InvalidFrequency(f64),
    #[error("noise amplitude must be finite and non-negative, got {0}")]
    InvalidNoiseAmplitude(f64),
    #[error("report tolerance must be finite and non-negative, got {0}")]
    InvalidReportTolerance(f64),
    #[error("axis margin must be finite and non-negative")]
    InvalidMargin,
    #[error("unknown indicator lamp {id}; only {count} lamps exist")]
    UnknownLamp { id: usize, count: usize },
}
