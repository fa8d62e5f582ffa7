use std::collections::VecDeque;
use crate::telemetry::ChartSet;
/// Destination for human-readable status lines.
pub trait LogSink {
    fn append(&mut self, line: String);
}
/// Destination for refreshed charts.
pub trait ChartSink {
    fn present(&mut self, charts: &ChartSet);
}
/// Scrollback shown in the side panel. Every line is mirrored to the `log` facade.
pub struct LogPanel {
    lines: VecDeque<String>,
    capacity: usize,
}
impl LogPanel {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
        }
    }
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
    #[cfg(test)]
    pub fn count_matching(&self, needle: &str) -> usize {
        self.lines.iter().filter(|l| l.contains(needle)).count()
    }
}
impl LogSink for LogPanel {
    fn append(&mut self, line: String) {
        log::info!("{}", line.trim_start());
        self.lines.push_back(line);
        if self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}
/// Holds the latest refresh for an immediate-mode UI to draw every frame.
#[derive(Default)]
pub struct ChartBoard {
    latest: Option<ChartSet>,
}
impl ChartBoard {
    pub fn latest(&self) -> Option<&ChartSet> {
        self.latest.as_ref()
    }
}
impl ChartSink for ChartBoard {
    fn present(&mut self, charts: &ChartSet) {
        self.latest = Some(charts.clone());
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn log_panel_drops_oldest_lines() {
        let mut panel = LogPanel::with_capacity(3);
        for i in 0..5 {
            panel.append(format!("> line {i}"));
        }
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines, vec!["> line 2", "> line 3", "> line 4"]);
        assert!(panel.contains("line 4"));
        assert!(!panel.contains("line 0"));
    }
    #[test]
    fn chart_board_keeps_latest() {
        let mut board = ChartBoard::default();
        assert!(board.latest().is_none());
        let charts = ChartSet {
            latest_time: 1.5,
            frames: Vec::new(),
        };
        board.present(&charts);
        assert_eq!(board.latest().map(|c| c.latest_time), Some(1.5));
    }
}
