// Library surface for the binary and headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod passages;
pub mod runtime;
pub mod session;
pub mod theme;
pub mod timer;
pub mod ui;
