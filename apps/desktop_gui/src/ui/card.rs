//! Prescription card, advisory message panel, and loading skeleton.

use client_core::presenter::{CardPanel, PrescriptionCard, ADVISOR_NAME};
use egui::{Color32, CornerRadius, Margin, RichText, Sense, Stroke};

pub const CARD_FILL: Color32 = Color32::from_rgb(0xE8, 0xD5, 0xC4);
const INK: Color32 = Color32::from_rgb(0x1A, 0x1A, 0x1A);

pub fn show_prescription_card(ui: &mut egui::Ui, card: &PrescriptionCard) {
    egui::Frame::new()
        .fill(CARD_FILL)
        .corner_radius(24.0)
        .inner_margin(Margin::same(28))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.visuals_mut().override_text_color = Some(INK);

            ui.horizontal(|ui| {
                ui.label(RichText::new(card.eyebrow.to_uppercase()).small().strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("✨");
                });
            });
            ui.add_space(12.0);

            ui.label(RichText::new(card.title.as_str()).size(32.0));
            if let Some(technology) = &card.technology {
                ui.label(RichText::new(format!("⚡ {technology}")).small());
            }
            ui.add_space(16.0);

            ui.columns(2, |columns| {
                show_panel(&mut columns[0], "⚠", &card.targeting);
                show_panel(&mut columns[1], "✨", &card.benefit);
            });
            ui.add_space(16.0);
            ui.separator();

            ui.horizontal(|ui| {
                let button = egui::Button::new(
                    RichText::new(format!("📅 {}", card.call_to_action)).color(CARD_FILL),
                )
                .fill(INK)
                .corner_radius(CornerRadius::same(20));
                if ui.add(button).clicked() {
                    tracing::info!(treatment = %card.title, "appointment requested");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(card.footnote).small().weak());
                });
            });
        });
}

fn show_panel(ui: &mut egui::Ui, icon: &str, panel: &CardPanel) {
    egui::Frame::new()
        .fill(Color32::from_white_alpha(110))
        .corner_radius(12.0)
        .inner_margin(Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("{icon} {}", panel.label)).strong());
            ui.add(egui::Label::new(panel.body.as_str()).wrap());
        });
}

pub fn show_advisory_message(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(Color32::WHITE)
        .stroke(Stroke::new(1.0, Color32::from_gray(235)))
        .corner_radius(16.0)
        .inner_margin(Margin::same(20))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.visuals_mut().override_text_color = Some(INK);
            ui.horizontal_top(|ui| {
                let (avatar, _) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), Sense::hover());
                ui.painter()
                    .circle_filled(avatar.center(), 14.0, Color32::BLACK);
                ui.vertical(|ui| {
                    ui.label(RichText::new(ADVISOR_NAME).small().strong());
                    ui.add(egui::Label::new(message).wrap());
                });
            });
        });
}

/// Pulsing placeholder shown while a search is in flight.
pub fn show_loading_skeleton(ui: &mut egui::Ui) {
    let time = ui.input(|i| i.time);
    let pulse = ((time * 2.5).sin() * 0.5 + 0.5) as f32;
    let fill = CARD_FILL.gamma_multiply(0.25 + 0.35 * pulse);
    let bar = Color32::from_gray(220).gamma_multiply(0.5 + 0.5 * pulse);

    let width = ui.available_width();
    let (card, _) = ui.allocate_exact_size(egui::vec2(width, 240.0), Sense::hover());
    ui.painter().rect_filled(card, 24.0, fill);
    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        let (line, _) = ui.allocate_exact_size(egui::vec2(width * 0.66, 14.0), Sense::hover());
        ui.painter().rect_filled(line, 4.0, bar);
    });
    ui.ctx().request_repaint();
}
