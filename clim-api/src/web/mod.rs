//! HTTP routing pieces: handlers and request middleware

pub mod handlers;
pub mod request_log;
