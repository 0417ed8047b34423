// std imports
use std::include_str;
use std::path::Path;

// third-party imports
use config::{Config, File, FileFormat};
use serde::Deserialize;

// local imports
use crate::cli::PagingOption;
use crate::error::Result;

// ---

static DEFAULT_SETTINGS: &str = include_str!("../etc/defaults/config.toml");

// ---

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub pager: PagerSettings,
    pub interrupt_ignore_count: usize,
}

impl Settings {
    /// Loads settings from the embedded defaults, then the optional `default` file, then each of `files`.
    ///
    /// Files given explicitly must exist, the default one may be missing.
    pub fn load<P: AsRef<Path>>(default: Option<&Path>, files: &[P]) -> Result<Self> {
        let mut builder = Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));

        if let Some(path) = default {
            log::debug!("loading optional configuration from {}", path.display());
            builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false));
        }

        for path in files {
            let path = path.as_ref();
            log::debug!("loading configuration from {}", path.display());
            builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

// ---

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PagerSettings {
    /// Fallback pager command.
    #[serde(default)]
    pub command: Option<String>,

    /// Paging mode.
    #[serde(default)]
    pub paging: PagingOption,

    /// Environment variables passed to the pager unless already set, in `NAME=VALUE` form.
    #[serde(default)]
    pub env: Vec<String>,
}

impl PagerSettings {
    /// Returns environment variables for the pager, skipping malformed entries.
    pub fn env_vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().filter_map(|var| match var.split_once('=') {
            Some((name, value)) if !name.is_empty() => Some((name, value)),
            _ => {
                log::warn!("ignoring malformed pager environment variable {var:?}");
                None
            }
        })
    }
}

#[cfg(test)]
mod tests;
