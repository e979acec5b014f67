use client_core::UiAction;
use eframe::egui;
use shared::domain::VisitorRecord;

use crate::ui::theme;

const CREATED_AT_DISPLAY: &str = "%d %b %Y, %H:%M";

pub fn success_banner(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .fill(theme::SUCCESS_FILL)
        .show(ui, |ui| {
            ui.colored_label(theme::SUCCESS, "✔ User details submitted successfully!");
        });
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.weak(label);
    ui.label(value);
    ui.end_row();
}

pub fn record_card(
    ui: &mut egui::Ui,
    record: &VisitorRecord,
    deleting: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.strong(record.name.as_str());
            ui.weak(format!("ID: #{}", record.id));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if deleting { "Deleting..." } else { "Delete" };
                let response = ui
                    .add_enabled(!deleting, egui::Button::new(label))
                    .on_hover_text("Delete record");
                if response.clicked() {
                    actions.push(UiAction::RequestDelete(record.id));
                }
            });
        });

        egui::Grid::new(("visitor_record", record.id.0))
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                detail_row(ui, "Phone", &record.phone);
                detail_row(ui, "Email", &record.email);
                detail_row(ui, "Date", &record.date);
                ui.weak("Purpose");
                ui.colored_label(theme::ACCENT, record.purpose.as_str());
                ui.end_row();
                detail_row(ui, "Meets Whom", &record.meets_whom);
                if let Some(comments) = record.comments() {
                    detail_row(ui, "Comments", comments);
                }
                if let Some(created_at) = record.created_at() {
                    detail_row(
                        ui,
                        "Registered",
                        &created_at.format(CREATED_AT_DISPLAY).to_string(),
                    );
                }
            });
    });
}
