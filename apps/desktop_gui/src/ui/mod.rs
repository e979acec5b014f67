//! UI layer for the desktop GUI: app shell, pages, widgets and colours.

pub mod app;
pub mod panels;
pub mod theme;
pub mod widgets;

pub use app::VisitorApp;
