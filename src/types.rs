// src/types.rs
// Telemetry channels, in display order
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Channel {
    Sine,
    Cosine,
    Noise,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Sine, Channel::Cosine, Channel::Noise];

    pub fn index(self) -> usize {
        match self {
            Channel::Sine => 0,
            Channel::Cosine => 1,
            Channel::Noise => 2,
        }
    }

    // Chart caption shown above each plot
    pub fn title(self) -> &'static str {
        match self {
            Channel::Sine => "Altitude",
            Channel::Cosine => "Velocity",
            Channel::Noise => "Acceleration",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::Sine => "Altitude [m]",
            Channel::Cosine => "Velocity [m/s]",
            Channel::Noise => "Acceleration [m/s^2]",
        }
    }
}

// Simulation lifecycle
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Phase {
    Idle,
    Running,
    Stopped,
}

// Indicator lamp colour
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum LampState {
    #[default]
    Off,
    Green,
    Red,
}

impl LampState {
    // Click order: off -> green -> red -> off
    pub fn next(self) -> Self {
        match self {
            LampState::Off => LampState::Green,
            LampState::Green => LampState::Red,
            LampState::Red => LampState::Off,
        }
    }
}

// Outcome of one generator tick
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum TickOutcome {
    Appended { time: f64, count: usize },
    Expired,
}
