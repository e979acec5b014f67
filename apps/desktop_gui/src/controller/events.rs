//! Events delivered from the backend worker thread to the UI thread.

use client_core::BackendEvent;

#[derive(Debug)]
pub enum UiEvent {
    BackendReady { api_base_url: String },
    BackendFailed(String),
    Backend(BackendEvent),
}
