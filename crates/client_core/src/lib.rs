//! Client side of the visitor sign-in application: the HTTP gateway to the
//! visitor backend, the view/state controller, and the plumbing that connects
//! the two.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod session;
pub mod worker;

pub use config::{load_settings, prepare_api_base_url, Settings};
pub use controller::{
    Alert, BackendCommand, BackendEvent, Controller, SuccessNotice, UiAction, ViewState,
    SUCCESS_NOTICE_DURATION,
};
pub use error::GatewayError;
pub use gateway::{HttpVisitorGateway, VisitorGateway};
pub use session::VisitorSession;
pub use worker::{perform, EventSink, NoticeTimer, Worker};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
