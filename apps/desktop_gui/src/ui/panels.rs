use client_core::{UiAction, ViewState};
use eframe::egui;
use shared::domain::{FormField, InputKind, Page};

use crate::ui::{theme, widgets};

pub const APP_TITLE: &str = "Visitor Sign-In";

pub fn header(ui: &mut egui::Ui, page: Page, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading(APP_TITLE);
            ui.label("Visitors Entry Form");
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .selectable_label(page == Page::Records, "View Visitor Details")
                .clicked()
            {
                actions.push(UiAction::SelectPage(Page::Records));
            }
            if ui
                .selectable_label(page == Page::Form, "Visitor Registration")
                .clicked()
            {
                actions.push(UiAction::SelectPage(Page::Form));
            }
        });
    });
}

pub fn form_page(ui: &mut egui::Ui, state: &ViewState, actions: &mut Vec<UiAction>) {
    ui.heading("Visitor Registration");
    ui.separator();

    egui::Grid::new("visitor_form")
        .num_columns(2)
        .spacing([16.0, 10.0])
        .show(ui, |ui| {
            for field in FormField::ALL {
                let label = if field.is_required() {
                    format!("{} *", field.label())
                } else {
                    field.label().to_string()
                };
                if state.missing_fields.contains(&field) {
                    ui.colored_label(theme::ERROR, label);
                } else {
                    ui.label(label);
                }

                let mut value = state.draft.get(field).to_string();
                let edit = match field.input_kind() {
                    InputKind::Multiline => egui::TextEdit::multiline(&mut value).desired_rows(3),
                    InputKind::Text | InputKind::Tel | InputKind::Email | InputKind::Date => {
                        egui::TextEdit::singleline(&mut value)
                    }
                };
                let response = ui.add(edit.hint_text(field.placeholder()).desired_width(360.0));
                if response.changed() {
                    actions.push(UiAction::UpdateField { field, value });
                }
                ui.end_row();
            }
        });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let label = if state.submitting {
            "Processing..."
        } else {
            "Submit"
        };
        if ui
            .add_enabled(!state.submitting, egui::Button::new(label))
            .clicked()
        {
            actions.push(UiAction::Submit);
        }
        if state.submitting {
            ui.add(egui::Spinner::new());
        }
    });

    if !state.missing_fields.is_empty() {
        let names: Vec<_> = state
            .missing_fields
            .iter()
            .map(|field| field.label())
            .collect();
        ui.colored_label(
            theme::ERROR,
            format!("Please fill in: {}", names.join(", ")),
        );
    }

    if state.success_visible() {
        ui.add_space(8.0);
        widgets::success_banner(ui);
    }
}

pub fn records_page(ui: &mut egui::Ui, state: &ViewState, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.heading("Visitor Records");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Refresh").clicked() {
                actions.push(UiAction::Refresh);
            }
            ui.label(format!("{} Total Records", state.record_count()));
        });
    });
    ui.separator();

    if state.records.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.strong("No visitor records yet");
            ui.weak("Register your first visitor to get started");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for record in &state.records {
                widgets::record_card(ui, record, state.is_deleting(record.id), actions);
                ui.add_space(6.0);
            }
        });
}
