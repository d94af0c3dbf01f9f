use std::time::Duration;

use client_core::SearchView;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{dispatch_backend_command, submit_search};
use crate::controller::reducer::{apply_ui_event, AppState};
use crate::ui::card::{show_advisory_message, show_loading_skeleton, show_prescription_card};

const CONTENT_WIDTH: f32 = 720.0;
const QUERY_HINT: &str = "Tell us about your skin/hair concern...";

pub struct UncoverApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    focus_query: bool,
}

impl UncoverApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: AppState::default(),
            focus_query: true,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.state, event);
        }
    }

    fn submit(&mut self) {
        submit_search(&mut self.state.shell, &self.cmd_tx, &mut self.state.status);
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.add_space(32.0);
        ui.label(egui::RichText::new("Uncover.").size(52.0).weak());
        ui.label(egui::RichText::new("Advanced Skincare & Hair Restoration").weak());
        ui.add_space(40.0);
    }

    fn show_fatal_banner(&self, ui: &mut egui::Ui) {
        let Some(message) = &self.state.fatal_error else {
            return;
        };
        egui::Frame::new()
            .fill(ui.visuals().error_fg_color.gamma_multiply(0.15))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.colored_label(ui.visuals().error_fg_color, message.as_str());
            });
        ui.add_space(12.0);
    }

    fn show_search_form(&mut self, ui: &mut egui::Ui) {
        let loading = self.state.shell.is_loading();
        let mut submitted = false;

        ui.horizontal(|ui| {
            let button_width = 44.0;
            let edit = egui::TextEdit::singleline(self.state.shell.query_mut())
                .id_salt("search_query")
                .hint_text(QUERY_HINT)
                .horizontal_align(egui::Align::Center)
                .font(egui::TextStyle::Heading)
                .desired_width(ui.available_width() - button_width);
            let response = ui.add(edit);
            if self.focus_query {
                response.request_focus();
                self.focus_query = false;
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }

            if loading {
                ui.add(egui::Spinner::new());
            } else if ui
                .add(egui::Button::new("🔍").frame(false))
                .on_hover_text("Search")
                .clicked()
            {
                submitted = true;
            }
        });

        if submitted {
            self.submit();
        }
        ui.add_space(40.0);
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        match self.state.shell.view() {
            SearchView::Loading => show_loading_skeleton(ui),
            SearchView::Results { card, message } => {
                if let Some(card) = &card {
                    show_prescription_card(ui, card);
                    ui.add_space(24.0);
                }
                if let Some(message) = message {
                    show_advisory_message(ui, message);
                }
            }
            SearchView::Empty => {}
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(egui::RichText::new(&self.state.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Check connection").clicked() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::CheckHealth,
                            &mut self.state.status,
                        );
                    }
                });
            });
        });
    }
}

impl eframe::App for UncoverApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_WIDTH);
                    self.show_header(ui);
                    self.show_fatal_banner(ui);
                    self.show_search_form(ui);
                    self.show_results(ui);
                });
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
