//! Controller glue for the desktop GUI: bridge events and command orchestration.
//! State transitions themselves live in `client_core::controller`.

pub mod events;
pub mod orchestration;
