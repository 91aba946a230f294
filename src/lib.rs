// Library surface for headless/integration tests; main.rs only wires the terminal.
pub mod analysis;
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod setup;
pub mod stopwatch;
pub mod timer;
pub mod ui;
pub mod util;
