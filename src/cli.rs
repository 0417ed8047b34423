// std imports
use std::num::NonZeroUsize;
use std::path::PathBuf;

// third-party imports
use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;

// local imports
use crate::error::*;

// ---

/// Copies files or standard input to the terminal through a pager.
#[derive(Parser)]
#[clap(version)]
pub struct Opt {
    /// Configuration file path, can be specified multiple times, an empty value or `-` drops the ones before it.
    #[arg(long, value_name = "FILE", env = "PAGESINK_CONFIG", action = ArgAction::Append)]
    pub config: Vec<String>,

    /// Pager command, overrides `PAGESINK_PAGER` and `PAGER` environment variables.
    #[arg(long, value_name = "COMMAND")]
    pub pager: Option<String>,

    /// Output paging options.
    #[arg(long, env = "PAGESINK_PAGING", overrides_with = "paging")]
    #[arg(value_enum)]
    pub paging: Option<PagingOption>,

    /// Handful alias for --paging=never, overrides --paging option.
    #[arg(short = 'P')]
    pub paging_never: bool,

    /// Number of interrupts to ignore, i.e. Ctrl-C (SIGINT).
    #[arg(long, env = "PAGESINK_INTERRUPT_IGNORE_COUNT", overrides_with = "interrupt_ignore_count")]
    pub interrupt_ignore_count: Option<usize>,

    /// Buffer size.
    #[arg(long, default_value = "64 KiB", env = "PAGESINK_BUFFER_SIZE", value_parser = parse_non_zero_size, overrides_with = "buffer_size")]
    pub buffer_size: NonZeroUsize,

    /// Files to process, `-` means standard input.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Opt {
    /// Returns configuration files to load and whether the default one should be skipped.
    pub fn configs(&self) -> (&[String], bool) {
        let (offset, no_default) = self
            .config
            .iter()
            .rposition(|x| x.is_empty() || x == "-")
            .map(|x| (x + 1, true))
            .unwrap_or_default();
        (&self.config[offset..], no_default)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PagingOption {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<PagingOption> for pager::Paging {
    fn from(value: PagingOption) -> Self {
        match value {
            PagingOption::Auto => Self::Auto,
            PagingOption::Always => Self::Always,
            PagingOption::Never => Self::Never,
        }
    }
}

fn parse_size(s: &str) -> std::result::Result<usize, SizeParseError> {
    match bytefmt::parse(s) {
        Ok(value) => Ok(usize::try_from(value)?),
        Err(_) => {
            if let Ok(value) = bytefmt::parse(s.to_owned() + "ib") {
                return Ok(usize::try_from(value)?);
            }
            Err(SizeParseError::InvalidSize(s.into()))
        }
    }
}

fn parse_non_zero_size(s: &str) -> std::result::Result<NonZeroUsize, NonZeroSizeParseError> {
    NonZeroUsize::new(parse_size(s)?).ok_or(NonZeroSizeParseError::ZeroSize)
}
