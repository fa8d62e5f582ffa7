use crate::config::AxisMargin;
use crate::telemetry::SimulationState;
use crate::types::Channel;
/// Padding applied when the data would give a zero-width or zero-height axis.
const FLAT_PADDING: f64 = 0.2;
/// Ready-to-draw chart for one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub channel: Channel,
    pub points: Vec<[f64; 2]>, // full history, oldest first
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}
/// One refresh worth of charts, in channel order.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSet {
    pub latest_time: f64,
    pub frames: Vec<ChartFrame>,
}
pub fn x_range(latest_time: f64, margin: AxisMargin) -> (f64, f64) {
    let x_max = match margin {
        AxisMargin::Additive { x, .. } => latest_time + x,
        AxisMargin::Proportional { x, .. } => latest_time * (1.0 + x),
    };
    if x_max > f64::EPSILON {
        (0.0, x_max)
    } else {
        (0.0, latest_time.max(0.0) + FLAT_PADDING)
    }
}
pub fn y_range(min: f64, max: f64, margin: AxisMargin) -> (f64, f64) {
    let (lo, hi) = match margin {
        AxisMargin::Additive { y, .. } => (min - y, max + y),
        AxisMargin::Proportional { y, .. } => (min - y * min.abs(), max + y * max.abs()),
    };
    if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - FLAT_PADDING, hi + FLAT_PADDING)
    }
}
/// Rebuilds every chart from the complete history. `None` while nothing has been sampled.
pub fn refresh(state: &SimulationState, margin: AxisMargin) -> Option<ChartSet> {
    let latest_time = state.latest_time()?;
    let x = x_range(latest_time, margin);
    let frames = state
        .streams()
        .filter_map(|(channel, stream)| {
            let (min, max) = stream.value_range()?;
            Some(ChartFrame {
                channel,
                points: stream.points(),
                x_range: x,
                y_range: y_range(min, max, margin),
            })
        })
        .collect();
    Some(ChartSet {
        latest_time,
        frames,
    })
}
