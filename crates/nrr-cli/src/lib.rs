// Library root: exposes the configuration, session and report modules so
// integration tests can drive a session without a terminal.

pub mod config;
pub mod report;
pub mod session;
