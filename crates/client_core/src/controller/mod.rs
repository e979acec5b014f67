//! Controller layer: UI actions, backend events, and reducer-like state transitions.

pub mod events;
pub mod reducer;

pub use events::{BackendCommand, BackendEvent, UiAction};
pub use reducer::{Alert, Controller, SuccessNotice, ViewState, SUCCESS_NOTICE_DURATION};
