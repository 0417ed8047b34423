// std imports
use std::io::{self, IsTerminal, Write};
use std::num::{ParseIntError, TryFromIntError};
use std::path::PathBuf;

// third-party imports
use config::ConfigError;
use owo_colors::OwoColorize;
use thiserror::Error;

// ---

/// Error is an error which may occur in the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to open {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pager(#[from] pager::Error),
    #[error(transparent)]
    SizeParse(#[from] SizeParseError),
    #[error(transparent)]
    NonZeroSizeParse(#[from] NonZeroSizeParseError),
}

impl Error {
    /// Returns the process exit code matching the error.
    ///
    /// A pager that failed or was killed by a signal maps to 128 + signal number,
    /// or 141 (SIGPIPE) for a plain non-zero exit code, which matches git's behavior.
    pub fn exit_code(&self) -> i32 {
        match self {
            #[cfg(unix)]
            Self::Pager(pager::Error::PagerFailed { status }) => {
                use std::os::unix::process::ExitStatusExt;
                status.signal().map_or(141, |signal| 128 + signal)
            }
            #[cfg(not(unix))]
            Self::Pager(pager::Error::PagerFailed { .. }) => 141,
            _ => 1,
        }
    }

    /// Prints the error to the standard error stream.
    pub fn log(&self) {
        let stderr = io::stderr();
        let colored = stderr.is_terminal();
        self.log_to(&mut stderr.lock(), colored).ok();
    }

    /// Writes the error message to `target`, optionally with ANSI colors.
    pub fn log_to<W: Write>(&self, target: &mut W, colored: bool) -> io::Result<()> {
        let prefix = "error:";
        if colored {
            writeln!(target, "{} {}", prefix.bright_red().bold(), self)
        } else {
            writeln!(target, "{} {}", prefix, self)
        }
    }
}

/// SizeParseError is an error which may occur when parsing size.
#[derive(Error, Debug)]
pub enum SizeParseError {
    #[error(transparent)]
    ParseIntError(#[from] ParseIntError),
    #[error(transparent)]
    TryFromIntError(#[from] TryFromIntError),
    #[error(
        "invalid size {0:?}, use {k:?} or {kib:?} format for IEC units or {kb:?} format for SI units",
        k = "64K",
        kib = "64KiB",
        kb = "64KB"
    )]
    InvalidSize(String),
}

/// NonZeroSizeParseError is an error which may occur when parsing non-zero size.
#[derive(Error, Debug)]
pub enum NonZeroSizeParseError {
    #[error(transparent)]
    SizeParseError(#[from] SizeParseError),
    #[error("zero size")]
    ZeroSize,
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;
