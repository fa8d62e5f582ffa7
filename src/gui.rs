// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use crate::config::SimulationConfig;
use crate::engine::Simulation;
use crate::indicators::IndicatorPanel;
use crate::telemetry::{ChartBoard, LogPanel, RandomNoise, StationError, Stopwatch};
use crate::types::*;
use crate::visualizer;

const CHART_COLORS: [Color32; 3] = [Color32::BLUE, Color32::RED, Color32::GREEN];

pub struct GroundStationApp {
    simulation: Simulation<LogPanel, ChartBoard>,

    // 可选组件
    lamps: Option<IndicatorPanel>,
    chat_echo: bool,
    message: String,
}

impl GroundStationApp {
    pub fn new(config: SimulationConfig) -> Result<Self, StationError> {
        let lamps = config.profile.indicator_lamps.then(IndicatorPanel::default);
        let chat_echo = config.profile.chat_echo;
        let log = LogPanel::with_capacity(config.profile.log_capacity);
        let simulation = Simulation::new(
            config,
            Box::new(Stopwatch::start()),
            Box::new(RandomNoise::from_entropy()),
            log,
            ChartBoard::default(),
        )?;
        Ok(Self {
            simulation,
            lamps,
            chat_echo,
            message: String::new(),
        })
    }

    fn status_text(&self) -> String {
        match (self.simulation.phase(), self.simulation.elapsed()) {
            (Phase::Idle, _) => "Waiting for start...".to_owned(),
            (Phase::Running, Some(t)) => format!(
                "Running | t = {:.1}s | {} samples",
                t,
                self.simulation.state().sample_count()
            ),
            (Phase::Running, None) => "Running".to_owned(),
            (Phase::Stopped, _) => format!(
                "Stopped | {} samples",
                self.simulation.state().sample_count()
            ),
        }
    }

    fn draw_charts(&self, ui: &mut egui::Ui) {
        let latest = self.simulation.charts().latest();
        let height = (ui.available_height() / 3.0 - 30.0).max(80.0);
        for channel in Channel::ALL {
            let frame = latest.and_then(|set| set.frames.iter().find(|f| f.channel == channel));
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(channel.title()).strong());
                if let Some(set) = latest {
                    ui.label(egui::RichText::new(format!("t = {:.2}s", set.latest_time)).small());
                }
            });
            Plot::new(format!("chart-{}", channel.index()))
                .height(height)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .x_axis_label("Time [s]")
                .y_axis_label(channel.unit())
                .show(ui, |plot_ui| {
                    let Some(frame) = frame else { return };
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [frame.x_range.0, frame.y_range.0],
                        [frame.x_range.1, frame.y_range.1],
                    ));
                    plot_ui.line(
                        Line::new(PlotPoints::new(frame.points.clone()))
                            .name(channel.title())
                            .color(CHART_COLORS[channel.index()])
                            .width(1.8),
                    );
                });
        }
    }

    fn draw_side_panel(&mut self, ui: &mut egui::Ui) {
        if let Some(lamps) = &mut self.lamps {
            if let Some(id) = visualizer::draw_lamps(ui, lamps) {
                let next = lamps.lamps()[id].state.next();
                if let Err(err) = lamps.set_state(id, next) {
                    log::warn!("{err}");
                }
            }
            ui.separator();
        }
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(self.status_text()).small());
            if self.simulation.phase() == Phase::Stopped && ui.small_button("RESTART").clicked() {
                self.simulation.reset();
            }
        });

        let input_height = if self.chat_echo { 40.0 } else { 0.0 };
        egui::ScrollArea::vertical()
            .max_height(ui.available_height() - input_height)
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in self.simulation.log().lines() {
                    ui.monospace(line);
                }
            });

        if self.chat_echo {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.message)
                        .hint_text("Type a message..."),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("SEND").clicked() || submitted {
                    let text = std::mem::take(&mut self.message);
                    self.simulation.submit_message(&text);
                }
            });
        }
    }
}

impl eframe::App for GroundStationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 推进定时器
        self.simulation.advance();
        if let Some(wait) = self.simulation.next_wakeup() {
            ctx.request_repaint_after(wait);
        }

        // 2. UI 绘制
        egui::SidePanel::right("log_panel")
            .resizable(true)
            .default_width(ctx.screen_rect().width() * 0.2)
            .show(ctx, |ui| self.draw_side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_charts(ui));
    }
}
