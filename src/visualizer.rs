// src/visualizer.rs
use crate::indicators::IndicatorPanel;
use crate::types::LampState;
use eframe::egui;
use egui::{Color32, Stroke, Vec2};

pub fn lamp_color(state: LampState) -> Color32 {
    match state {
        LampState::Off => Color32::GRAY,
        LampState::Green => Color32::from_rgb(40, 200, 80),
        LampState::Red => Color32::from_rgb(220, 50, 50),
    }
}

/// Returns the index of a lamp clicked this frame.
pub fn draw_lamps(ui: &mut egui::Ui, panel: &IndicatorPanel) -> Option<usize> {
    let text_color = Color32::from_rgb(180, 180, 180);
    let outline = Color32::BLACK;
    let radius = 15.0;
    let slot = Vec2::new(90.0, 60.0);
    let count = panel.lamps().len().max(1) as f32;
    let (response, painter) =
        ui.allocate_painter(Vec2::new(slot.x * count, slot.y), egui::Sense::click());
    let top_left = response.rect.min;
    let clicked = response
        .interact_pointer_pos()
        .filter(|_| response.clicked())
        .map(|pos| ((pos.x - top_left.x) / slot.x).floor().max(0.0) as usize)
        .filter(|idx| *idx < panel.lamps().len());
    for (i, lamp) in panel.lamps().iter().enumerate() {
        let center = top_left + Vec2::new(slot.x * (i as f32 + 0.5), radius + 2.0);
        painter.circle_filled(center, radius, lamp_color(lamp.state));
        painter.circle_stroke(center, radius, Stroke::new(1.0, outline));
        painter.text(
            center + Vec2::new(0.0, radius + 6.0),
            egui::Align2::CENTER_TOP,
            &lamp.label,
            egui::FontId::proportional(11.0),
            text_color,
        );
    }
    clicked
}
