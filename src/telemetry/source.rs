use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
/// Random draws consumed by one generator tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseDraw {
    /// Uniform in `[0, 1)`, shared by the sine and cosine channels.
    pub shared: f64,
    /// Uniform in `[-1, 1)`, the whole value of the noise channel.
    pub channel: f64,
}
/// Trait representing something that can yield noise on demand.
pub trait NoiseSource {
    fn next_draw(&mut self) -> NoiseDraw;
}
/// Uniform noise backed by a seedable RNG.
pub struct RandomNoise {
    rng: StdRng,
}
impl RandomNoise {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
impl NoiseSource for RandomNoise {
    fn next_draw(&mut self) -> NoiseDraw {
        NoiseDraw {
            shared: self.rng.gen::<f64>(),
            channel: self.rng.gen_range(-1.0..1.0),
        }
    }
}
/// Replays queued draws, then repeats the fallback.
#[cfg(test)]
pub struct ManualNoise {
    queue: std::collections::VecDeque<NoiseDraw>,
    fallback: NoiseDraw,
}
#[cfg(test)]
impl ManualNoise {
    pub fn new(draws: impl IntoIterator<Item = NoiseDraw>) -> Self {
        Self {
            queue: draws.into_iter().collect(),
            fallback: NoiseDraw {
                shared: 0.0,
                channel: 0.0,
            },
        }
    }
    pub fn constant(draw: NoiseDraw) -> Self {
        Self {
            queue: Default::default(),
            fallback: draw,
        }
    }
}
#[cfg(test)]
impl NoiseSource for ManualNoise {
    fn next_draw(&mut self) -> NoiseDraw {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
