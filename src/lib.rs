// public modules
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod settings;

// conditional public modules
#[cfg_attr(unix, path = "signal_unix.rs")]
#[cfg_attr(windows, path = "signal_windows.rs")]
pub mod signal;

// public uses
pub use app::{App, InputReference, Options};
pub use settings::Settings;
