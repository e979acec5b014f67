use client_core::{BackendCommand, Controller, UiAction};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Page;

use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_commands;
use crate::ui::{panels, theme};

const DELETE_PROMPT: &str = "Are you sure you want to delete this visitor record?";

pub struct VisitorApp {
    controller: Controller,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_base_url: String,
    status: String,
    status_banner: Option<String>,
}

impl VisitorApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        Self {
            controller: Controller::new(),
            cmd_tx,
            ui_rx,
            api_base_url,
            status: "Starting backend worker".to_string(),
            status_banner: None,
        }
    }

    fn act(&mut self, action: UiAction) {
        let commands = self.controller.handle(action);
        self.run_commands(commands);
    }

    /// Sends commands to the worker. Anything the worker could not take is
    /// folded back into the controller as a failure right away.
    fn run_commands(&mut self, mut commands: Vec<BackendCommand>) {
        while !commands.is_empty() {
            let undelivered = dispatch_backend_commands(&self.cmd_tx, commands, &mut self.status);
            commands = undelivered
                .into_iter()
                .flat_map(|event| self.controller.apply(event))
                .collect();
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady { api_base_url } => {
                    self.status = format!("Connected to {api_base_url}");
                    self.api_base_url = api_base_url;
                    self.status_banner = None;
                }
                UiEvent::BackendFailed(reason) => {
                    self.status = "Backend worker failed to start".to_string();
                    self.status_banner = Some(reason);
                }
                UiEvent::Backend(event) => {
                    let commands = self.controller.apply(event);
                    self.run_commands(commands);
                }
            }
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let (page, blocked) = (state.page, state.modal_open());
        let mut actions = Vec::new();
        egui::TopBottomPanel::top("visitor_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.add_enabled_ui(!blocked, |ui| panels::header(ui, page, &mut actions));
            ui.add_space(6.0);
        });
        for action in actions {
            self.act(action);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("visitor_status").show(ctx, |ui| {
            if let Some(message) = self.status_banner.clone() {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(theme::ERROR, message);
                    if ui.button("Dismiss").clicked() {
                        self.status_banner = None;
                    }
                });
            }
            ui.horizontal(|ui| {
                ui.weak(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.api_base_url.as_str());
                });
            });
        });
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let blocked = state.modal_open();
        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| match state.page {
                Page::Form => panels::form_page(ui, state, &mut actions),
                Page::Records => panels::records_page(ui, state, &mut actions),
            });
        });
        for action in actions {
            self.act(action);
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        if self.controller.state().pending_confirmation.is_none() {
            return;
        }
        let mut action = None;
        egui::Window::new("Delete visitor")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(DELETE_PROMPT);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(egui::RichText::new("Delete").color(theme::ERROR))
                        .clicked()
                    {
                        action = Some(UiAction::ConfirmDelete);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(UiAction::CancelDelete);
                    }
                });
            });
        if let Some(action) = action {
            self.act(action);
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.controller.state().alert.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert.message.as_str());
                if let Some(detail) = &alert.detail {
                    ui.weak(detail.as_str());
                }
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.act(UiAction::DismissAlert);
        }
    }
}

impl eframe::App for VisitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_page(ctx);
        self.show_delete_confirmation(ctx);
        self.show_alert(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
