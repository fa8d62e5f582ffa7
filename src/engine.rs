// src/engine.rs
use std::time::Duration;

use crate::config::SimulationConfig;
use crate::telemetry::{
    refresh, ChartSink, Clock, Generator, LogSink, NoiseSource, SimulationState, StationError,
};
use crate::types::*;

// Periodic timer that coalesces missed periods into a single firing
#[derive(Debug)]
struct Timer {
    period: Duration,
    next_due: Option<Duration>,
}

impl Timer {
    fn new(period: Duration) -> Self {
        Self { period, next_due: None }
    }

    fn start(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn due(&self, now: Duration) -> Option<Duration> {
        self.next_due.filter(|due| *due <= now)
    }

    // Returns how many periods were skipped
    fn reschedule(&mut self, now: Duration) -> u32 {
        let Some(mut next) = self.next_due else { return 0 };
        let mut missed = 0;
        next += self.period;
        while next <= now {
            next += self.period;
            missed += 1;
        }
        self.next_due = Some(next);
        missed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Generate,
    Refresh,
    Deadline,
}

/// Drives one telemetry run: `Idle` until the start delay passes, `Running` while the
/// generator and refresher ticks fire, `Stopped` once the deadline is reached.
pub struct Simulation<L: LogSink, C: ChartSink> {
    config: SimulationConfig,
    phase: Phase,
    state: SimulationState,
    generator: Generator,
    clock: Box<dyn Clock>,

    // 调度
    start_at: Option<Duration>,
    run_started: Option<Duration>,
    deadline: Option<Duration>,
    generator_timer: Timer,
    refresher_timer: Timer,

    // 输出
    log: L,
    charts: C,
}

impl<L: LogSink, C: ChartSink> Simulation<L, C> {
    /// Program start is the moment of construction; the run begins `start_delay` later.
    pub fn new(
        config: SimulationConfig,
        clock: Box<dyn Clock>,
        noise: Box<dyn NoiseSource>,
        mut log: L,
        charts: C,
    ) -> Result<Self, StationError> {
        config.validate()?;
        let start_at = clock.now().checked_add(config.start_delay());
        log.append("> SYSTEM: Ground station online".to_owned());
        Ok(Self {
            generator: Generator::new(&config, noise),
            state: SimulationState::with_capacity(config.expected_samples()),
            generator_timer: Timer::new(config.generator_period()),
            refresher_timer: Timer::new(config.refresher_period()),
            phase: Phase::Idle,
            start_at,
            run_started: None,
            deadline: None,
            config,
            clock,
            log,
            charts,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn charts(&self) -> &C {
        &self.charts
    }

    /// Seconds on the elapsed clock, or `None` before the first run starts.
    pub fn elapsed(&self) -> Option<f64> {
        self.run_started
            .map(|started| self.clock.now().saturating_sub(started).as_secs_f64())
    }

    /// Fires everything that has come due, in due-time order.
    pub fn advance(&mut self) {
        let now = self.clock.now();

        if self.phase == Phase::Idle && self.start_at.is_some_and(|at| at <= now) {
            self.start_run(now);
        }
        if self.phase != Phase::Running {
            return;
        }

        let mut events = Vec::with_capacity(3);
        if let Some(due) = self.generator_timer.due(now) {
            events.push((due, Event::Generate));
        }
        if let Some(due) = self.refresher_timer.due(now) {
            events.push((due, Event::Refresh));
        }
        if let Some(due) = self.deadline.filter(|d| *d <= now) {
            events.push((due, Event::Deadline));
        }
        events.sort_by_key(|(due, _)| *due);

        for (_, event) in events {
            if self.phase != Phase::Running {
                break;
            }
            match event {
                Event::Generate => {
                    let missed = self.generator_timer.reschedule(now);
                    if missed > 0 {
                        log::debug!("generator skipped {missed} tick(s)");
                    }
                    self.generate(now);
                }
                Event::Refresh => {
                    self.refresher_timer.reschedule(now);
                    self.refresh_charts();
                }
                Event::Deadline => self.stop(now),
            }
        }
    }

    /// Time until the next pending event, so a UI knows when to wake up.
    pub fn next_wakeup(&self) -> Option<Duration> {
        let now = self.clock.now();
        let pending = match self.phase {
            Phase::Idle => self.start_at,
            Phase::Running => [
                self.generator_timer.next_due,
                self.refresher_timer.next_due,
                self.deadline,
            ]
            .into_iter()
            .flatten()
            .min(),
            Phase::Stopped => None,
        };
        pending.map(|due| due.saturating_sub(now))
    }

    /// Puts a stopped simulation back to `Idle`; the next run begins after another start delay.
    pub fn reset(&mut self) -> bool {
        if self.phase != Phase::Stopped {
            return false;
        }
        let now = self.clock.now();
        self.phase = Phase::Idle;
        self.start_at = now.checked_add(self.config.start_delay());
        log::debug!("simulation reset to idle");
        true
    }

    /// Chat echo: appends non-empty text verbatim. Returns whether anything was logged.
    pub fn submit_message(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.log.append(format!("YOU: {text}"));
        true
    }

    fn start_run(&mut self, now: Duration) {
        self.state.reset();
        self.start_at = None;
        self.run_started = Some(now);
        self.generator_timer.start(now);
        self.refresher_timer.start(now);
        self.deadline = now.checked_add(self.config.total_duration());
        self.phase = Phase::Running;
        log::debug!("simulation running");
        self.log.append(format!(
            "\n> Started {:.1}s simulation",
            self.config.total_duration_secs
        ));
    }

    fn generate(&mut self, now: Duration) {
        let Some(started) = self.run_started else { return };
        let elapsed = now.saturating_sub(started).as_secs_f64();
        let outcome = self.generator.tick(&mut self.state, elapsed);
        if let Some(line) = self.generator.report_line(outcome) {
            self.log.append(line);
        }
    }

    fn refresh_charts(&mut self) {
        if let Some(charts) = refresh(&self.state, self.config.axis_margin) {
            self.charts.present(&charts);
        }
    }

    fn stop(&mut self, now: Duration) {
        if self.phase != Phase::Running {
            return;
        }
        self.generator_timer.stop();
        self.refresher_timer.stop();
        self.deadline = None;
        self.phase = Phase::Stopped;
        let elapsed = self
            .run_started
            .map(|started| now.saturating_sub(started).as_secs_f64())
            .unwrap_or_default();
        log::debug!("simulation stopped");
        self.log.append(format!("\n> Simulation finished (time: {elapsed:.2}s)"));
        self.log.append(format!("> Collected {} samples", self.state.sample_count()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{
        ChartBoard, ChartSet, LogPanel, ManualClock, ManualNoise, NoiseDraw, RandomNoise,
    };
    use crate::types::Channel;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn simulation(config: SimulationConfig) -> (Simulation<LogPanel, ChartBoard>, ManualClock) {
        let clock = ManualClock::new();
        let sim = Simulation::new(
            config,
            Box::new(clock.clone()),
            Box::new(RandomNoise::seeded(3)),
            LogPanel::with_capacity(10_000),
            ChartBoard::default(),
        )
        .unwrap();
        (sim, clock)
    }

    // Steps the clock in `step` increments up to `until`, advancing after each
    fn run_until(sim: &mut Simulation<LogPanel, ChartBoard>, clock: &ManualClock, step: Duration, until: Duration) {
        while clock.now() < until {
            clock.advance(step);
            sim.advance();
        }
    }

    #[test]
    fn stays_idle_until_start_delay() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        run_until(&mut sim, &clock, ms(10), ms(990));
        assert_eq!(sim.phase(), Phase::Idle);
        assert_eq!(sim.next_wakeup(), Some(ms(10)));
        clock.advance(ms(10));
        sim.advance();
        assert_eq!(sim.phase(), Phase::Running);
        assert!(sim.state().is_empty());
        assert!(sim.log().contains("Started 15.0s simulation"));
        assert_eq!(sim.elapsed(), Some(0.0));
    }

    #[test]
    fn full_run_collects_about_750_samples() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        run_until(&mut sim, &clock, ms(20), ms(17_000));
        assert_eq!(sim.phase(), Phase::Stopped);
        let count = sim.state().sample_count();
        assert!((745..=750).contains(&count), "got {count} samples");
        for (_, stream) in sim.state().streams() {
            assert_eq!(stream.len(), count);
        }
        assert!(sim.log().contains(&format!("Collected {count} samples")));
    }

    #[test]
    fn deadline_stops_ticks_and_summarises_once() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        run_until(&mut sim, &clock, ms(20), ms(1000 + 15_000));
        assert_eq!(sim.phase(), Phase::Stopped);
        let frozen = sim.state().sample_count();
        run_until(&mut sim, &clock, ms(20), ms(20_000));
        assert_eq!(sim.state().sample_count(), frozen);
        assert_eq!(sim.log().count_matching("Simulation finished"), 1);
        assert!(sim.log().contains("Simulation finished (time: 15.00s)"));
        assert_eq!(sim.next_wakeup(), None);
    }

    #[test]
    fn reports_sample_count_near_one_second() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        run_until(&mut sim, &clock, ms(20), ms(1000 + 1000));
        assert_eq!(sim.state().sample_count(), 50);
        assert!(sim.log().contains("> Time: 1.0s | Samples: 50"));
    }

    #[test]
    fn refresher_publishes_full_history() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        run_until(&mut sim, &clock, ms(10), ms(1000 + 600));
        let charts = sim.charts().latest().unwrap();
        let latest = sim.state().latest_time().unwrap();
        assert_eq!(charts.frames.len(), 3);
        assert!(charts.latest_time <= latest);
        let sine = &charts.frames[Channel::Sine.index()];
        assert_eq!(sine.points[0][0], sim.state().stream(Channel::Sine).samples()[0].time);
        assert_eq!(sine.x_range.0, 0.0);
        assert!(sine.x_range.1 >= charts.latest_time);
    }

    #[test]
    fn missed_periods_coalesce_into_one_tick() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        clock.set(ms(1000));
        sim.advance();
        clock.set(ms(1000 + 200));
        sim.advance();
        assert_eq!(sim.state().sample_count(), 1);
        // generator 1020 -> 1220, refresher 1030 -> 1210
        assert_eq!(sim.generator_timer.next_due, Some(ms(1220)));
        assert_eq!(sim.refresher_timer.next_due, Some(ms(1210)));
        assert_eq!(sim.next_wakeup(), Some(ms(10)));
        clock.set(ms(1220));
        sim.advance();
        assert_eq!(sim.state().sample_count(), 2);
    }

    #[test]
    fn big_jump_past_deadline_stops_without_sampling() {
        let (mut sim, clock) = simulation(SimulationConfig::default());
        clock.set(ms(1000));
        sim.advance();
        clock.set(ms(30_000));
        sim.advance();
        assert_eq!(sim.phase(), Phase::Stopped);
        assert_eq!(sim.state().sample_count(), 0);
        assert!(sim.log().contains("Collected 0 samples"));
    }

    #[test]
    fn reset_allows_a_second_run() {
        let config = SimulationConfig {
            total_duration_secs: 0.5,
            ..SimulationConfig::default()
        };
        let (mut sim, clock) = simulation(config);
        assert!(!sim.reset());
        run_until(&mut sim, &clock, ms(20), ms(2000));
        assert_eq!(sim.phase(), Phase::Stopped);
        let first = sim.state().sample_count();
        assert!(first > 0);

        assert!(sim.reset());
        assert_eq!(sim.phase(), Phase::Idle);
        run_until(&mut sim, &clock, ms(20), ms(4000));
        assert_eq!(sim.phase(), Phase::Stopped);
        assert_eq!(sim.log().count_matching("Simulation finished"), 2);
        assert!(sim.state().sample_count() <= first + 1);
    }

    #[test]
    fn chat_echo_is_verbatim() {
        let (mut sim, _clock) = simulation(SimulationConfig::default());
        assert!(!sim.submit_message(""));
        assert!(sim.submit_message("  hello  ground  "));
        assert!(sim.log().contains("YOU:   hello  ground  "));
    }

    #[test]
    fn deterministic_noise_feeds_channels() {
        let clock = ManualClock::new();
        let draw = NoiseDraw { shared: 0.5, channel: 0.25 };
        let mut sim = Simulation::new(
            SimulationConfig::default(),
            Box::new(clock.clone()),
            Box::new(ManualNoise::constant(draw)),
            LogPanel::with_capacity(100),
            RecordingCharts::default(),
        )
        .unwrap();
        clock.set(ms(1000));
        sim.advance();
        clock.set(ms(1030));
        sim.advance();
        let noise = sim.state().stream(Channel::Noise).samples()[0];
        assert_eq!(noise.value, 0.25);
        assert_eq!(sim.charts().presented.len(), 1);
        assert_eq!(sim.charts().presented[0].frames[Channel::Noise.index()].points, vec![[0.03, 0.25]]);
    }

    #[derive(Default)]
    struct RecordingCharts {
        presented: Vec<ChartSet>,
    }

    impl ChartSink for RecordingCharts {
        fn present(&mut self, charts: &ChartSet) {
            self.presented.push(charts.clone());
        }
    }

    #[test]
    fn refresher_skips_until_first_sample() {
        let clock = ManualClock::new();
        let mut sim = Simulation::new(
            SimulationConfig { generator_period_ms: 50, ..SimulationConfig::default() },
            Box::new(clock.clone()),
            Box::new(RandomNoise::seeded(9)),
            LogPanel::with_capacity(100),
            RecordingCharts::default(),
        )
        .unwrap();
        clock.set(ms(1000));
        sim.advance();
        clock.set(ms(1030));
        sim.advance();
        assert!(sim.charts().presented.is_empty());
        clock.set(ms(1060));
        sim.advance();
        assert_eq!(sim.charts().presented.len(), 1);
    }

    #[test]
    fn long_run_config_does_not_preallocate_everything() {
        let config = SimulationConfig {
            total_duration_secs: 1e9,
            generator_period_ms: 1,
            ..SimulationConfig::default()
        };
        let (mut sim, clock) = simulation(config);
        clock.set(ms(1000));
        sim.advance();
        clock.set(ms(1001));
        sim.advance();
        assert_eq!(sim.phase(), Phase::Running);
        assert_eq!(sim.state().sample_count(), 1);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = SimulationConfig {
            total_duration_secs: 1e20,
            ..SimulationConfig::default()
        };
        let result = Simulation::new(
            config,
            Box::new(ManualClock::new()),
            Box::new(RandomNoise::seeded(1)),
            LogPanel::with_capacity(10),
            ChartBoard::default(),
        );
        assert!(matches!(result, Err(StationError::InvalidDuration(_))));
    }
}
