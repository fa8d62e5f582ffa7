use crate::types::Channel;
/// Upper bound on samples reserved up front per channel; longer runs grow the `Vec` as needed.
pub const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;
/// One `(time, value)` telemetry sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}
/// Append-only, time-ordered sample sequence for a single channel.
#[derive(Clone, Debug, Default)]
pub struct SampleStream {
    samples: Vec<Sample>,
}
impl SampleStream {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_SAMPLES)),
        }
    }
    pub fn push(&mut self, time: f64, value: f64) {
        debug_assert!(
            self.samples.last().map_or(true, |s| s.time <= time),
            "samples must be appended in time order"
        );
        self.samples.push(Sample { time, value });
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    #[cfg(test)]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }
    /// Smallest and largest value seen so far.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let first = self.samples.first()?;
        Some(
            self.samples
                .iter()
                .fold((first.value, first.value), |(lo, hi), s| {
                    (lo.min(s.value), hi.max(s.value))
                }),
        )
    }
    /// Points in the `[x, y]` layout the plot widgets take.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(|s| [s.time, s.value]).collect()
    }
    fn clear(&mut self) {
        self.samples.clear();
    }
}
/// Everything one simulation run accumulates: one stream per channel.
#[derive(Clone, Debug, Default)]
pub struct SimulationState {
    streams: [SampleStream; 3],
}
impl SimulationState {
    pub fn with_capacity(per_channel: usize) -> Self {
        Self {
            streams: [
                SampleStream::with_capacity(per_channel),
                SampleStream::with_capacity(per_channel),
                SampleStream::with_capacity(per_channel),
            ],
        }
    }
    #[cfg(test)]
    pub fn stream(&self, channel: Channel) -> &SampleStream {
        &self.streams[channel.index()]
    }
    pub fn streams(&self) -> impl Iterator<Item = (Channel, &SampleStream)> {
        Channel::ALL.into_iter().zip(self.streams.iter())
    }
    /// Appends one sample to every channel at the same timestamp, keeping lengths equal.
    pub fn push_frame(&mut self, time: f64, values: [f64; 3]) {
        for (stream, value) in self.streams.iter_mut().zip(values) {
            stream.push(time, value);
        }
    }
    /// Samples per channel.
    pub fn sample_count(&self) -> usize {
        self.streams[0].len()
    }
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.streams.iter().all(SampleStream::is_empty)
    }
    pub fn latest_time(&self) -> Option<f64> {
        self.streams[0].last().map(|s| s.time)
    }
    pub fn reset(&mut self) {
        for stream in &mut self.streams {
            stream.clear();
        }
    }
}
