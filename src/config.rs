// std imports
use std::path::PathBuf;

// local imports
use crate::{cli::Opt, error::Result, settings::Settings};

// ---

pub const APP_NAME: &str = "pagesink";

/// Returns the path of the default user configuration file.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

/// Loads settings using configuration files given in the command line options.
pub fn load(opt: &Opt) -> Result<Settings> {
    let (configs, no_default) = opt.configs();
    let default = if no_default { None } else { default_path() };
    Settings::load(default.as_deref(), configs)
}
