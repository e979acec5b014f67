//! Backend worker thread: owns the tokio runtime and the HTTP gateway.

pub mod runtime;
