// src/indicators.rs
use crate::telemetry::StationError;
use crate::types::LampState;

#[derive(Clone, Debug)]
pub struct Lamp {
    pub label: String,
    pub state: LampState,
}

/// Row of status lamps. Purely cosmetic; nothing in the simulation drives them.
#[derive(Clone, Debug)]
pub struct IndicatorPanel {
    lamps: Vec<Lamp>,
}

impl Default for IndicatorPanel {
    fn default() -> Self {
        Self::new([
            ("START", LampState::Off),
            ("APOGEE", LampState::Green),
            ("SIGNAL LOSS", LampState::Red),
        ])
    }
}

impl IndicatorPanel {
    pub fn new<'a>(lamps: impl IntoIterator<Item = (&'a str, LampState)>) -> Self {
        Self {
            lamps: lamps
                .into_iter()
                .map(|(label, state)| Lamp {
                    label: label.to_owned(),
                    state,
                })
                .collect(),
        }
    }

    pub fn lamps(&self) -> &[Lamp] {
        &self.lamps
    }

    pub fn set_state(&mut self, id: usize, state: LampState) -> Result<(), StationError> {
        let count = self.lamps.len();
        let lamp = self
            .lamps
            .get_mut(id)
            .ok_or(StationError::UnknownLamp { id, count })?;
        lamp.state = state;
        Ok(())
    }
}
