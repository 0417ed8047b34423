// std imports
use std::io;
use std::process::ExitStatus;
use std::sync::Arc;

// third-party imports
use thiserror::Error;

// ---

/// Error is an error which may occur while opening, writing to or closing a paged sink.
///
/// The value is cheap to clone so that a sink can keep returning the same sticky error.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// No pager command was given explicitly or found in the environment.
    #[error("no pager command to execute")]
    NoCommand,

    /// The pager went away, most likely because the user quit it.
    #[error("pager was closed by the user")]
    ClosedByConsumer,

    /// The sink has already been closed.
    #[error("pager is closed")]
    Closed,

    /// The pager process terminated abnormally.
    #[error("pager {}", describe(.status))]
    PagerFailed { status: ExitStatus },

    #[error(transparent)]
    Io(Arc<io::Error>),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        translate(err)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::ClosedByConsumer => io::ErrorKind::BrokenPipe,
            Error::Closed => io::ErrorKind::NotConnected,
            Error::Io(inner) => inner.kind(),
            Error::NoCommand => io::ErrorKind::NotFound,
            Error::PagerFailed { .. } => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;

// ---

/// Translates a raw I/O error into the error vocabulary of the sink.
///
/// A broken pipe means the reading end was closed by the pager and becomes
/// [`Error::ClosedByConsumer`], any other error is passed through as is.
/// The standard library already maps `EPIPE` on Unix and
/// `ERROR_BROKEN_PIPE`/`ERROR_NO_DATA` on Windows to [`io::ErrorKind::BrokenPipe`].
pub fn translate(err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::BrokenPipe => Error::ClosedByConsumer,
        _ => Error::Io(Arc::new(err)),
    }
}

#[cfg(unix)]
fn describe(status: &ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => format!("exited with code {code}"),
        (None, Some(signal)) => format!("was terminated by signal {signal}"),
        (None, None) => status.to_string(),
    }
}

#[cfg(not(unix))]
fn describe(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {code}"),
        None => status.to_string(),
    }
}
