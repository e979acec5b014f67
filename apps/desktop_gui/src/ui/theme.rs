use eframe::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(68, 114, 196);
pub const ERROR: Color32 = Color32::from_rgb(214, 69, 65);
pub const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
pub const SUCCESS_FILL: Color32 = Color32::from_rgb(224, 245, 228);
