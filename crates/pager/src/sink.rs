// std imports
use std::fmt;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, ExitStatus};

// local imports
use crate::destination::Destination;
use crate::error::{Error, Result, translate};

// ---

/// An output sink that feeds a pager process or writes straight to its destination.
///
/// Created by [`Pager::open`](crate::Pager::open) or [`Pager::open_to`](crate::Pager::open_to).
///
/// The first failure is sticky: once a write fails, every following write returns
/// the same error without touching the pipe again, and so does [`close`](Self::close).
/// When the pager goes away, the process is reaped and the pipe released right away,
/// so the caller does not have to remember to close the sink after a failed write.
///
/// Dropping an open sink closes it and waits for the pager to exit.
pub struct PagedSink<D: Destination> {
    command: String,
    destination: D,
    channel: Option<Channel>,
    error: Option<Error>,
}

impl<D: Destination> PagedSink<D> {
    /// Creates a sink that writes directly to `destination`.
    pub(crate) fn direct(command: String, destination: D) -> Self {
        Self {
            command,
            destination,
            channel: Some(Channel::Direct),
            error: None,
        }
    }

    /// Creates a sink that feeds the pager `process` through `stdin`.
    pub(crate) fn piped(command: String, destination: D, process: Child, stdin: ChildStdin) -> Self {
        Self {
            command,
            destination,
            channel: Some(Channel::Piped { process, stdin }),
            error: None,
        }
    }

    /// Returns the resolved pager command.
    ///
    /// The command is empty if the sink was opened with [`Paging::Never`](crate::Paging::Never).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns a reference to the destination.
    pub fn destination(&self) -> &D {
        &self.destination
    }

    /// Returns a mutable reference to the destination.
    ///
    /// Writing to it directly while a pager is running interleaves with the pager's output.
    pub fn destination_mut(&mut self) -> &mut D {
        &mut self.destination
    }

    /// Returns `true` if data is being fed to a pager process.
    pub fn is_paging(&self) -> bool {
        matches!(self.channel, Some(Channel::Piped { .. }))
    }

    /// Returns the sticky error, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns `true` if the sink was closed or the pager went away.
    pub fn is_closed(&self) -> bool {
        self.channel.is_none() || matches!(self.error, Some(Error::ClosedByConsumer))
    }

    /// Writes `buf` to the pager or the destination, returning the number of bytes accepted.
    pub fn try_write(&mut self, buf: &[u8]) -> Result<usize> {
        self.transmit(|out| out.write(buf))
    }

    /// Flushes the pipe or the destination.
    ///
    /// Flushing a closed sink is a no-op.
    pub fn try_flush(&mut self) -> Result<()> {
        if self.channel.is_none() {
            return Ok(());
        }
        self.transmit(|out| out.flush())
    }

    /// Closes the pipe, waits for the pager to exit and flushes the destination.
    ///
    /// Calling `close` again does nothing and returns the same result.
    pub fn close(&mut self) -> Result<()> {
        if let Some(err) = self.teardown()
            && self.error.is_none()
        {
            self.error = Some(err);
        }

        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn transmit<T>(&mut self, op: impl FnOnce(&mut dyn Write) -> io::Result<T>) -> Result<T> {
        if self.channel.is_none() {
            return Err(Error::Closed);
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let out: &mut dyn Write = match &mut self.channel {
            Some(Channel::Piped { stdin, .. }) => stdin,
            _ => &mut self.destination,
        };

        match op(out) {
            Ok(value) => Ok(value),
            // Interrupted writes are retried by the caller and never become sticky.
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(translate(err)),
            Err(err) => {
                let err = translate(err);
                if let Error::ClosedByConsumer = err {
                    log::debug!("pager {:?} has gone away", self.command);
                    if let Some(err) = self.teardown() {
                        log::debug!("pager teardown after early exit: {err}");
                    }
                }
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Releases all resources held by the sink exactly once.
    ///
    /// Returns the error the teardown itself produced, if any.
    fn teardown(&mut self) -> Option<Error> {
        let channel = self.channel.take()?;

        let err = match channel {
            Channel::Direct => None,
            Channel::Piped { mut process, mut stdin } => {
                // Close stdin first to signal EOF to the pager.
                let closed = stdin.flush().err().map(translate);
                drop(stdin);

                log::debug!("waiting for pager {:?} to exit", self.command);
                let exited = match process.wait() {
                    Ok(status) => {
                        log::debug!("pager {:?} exited: {status}", self.command);
                        recover(status)
                    }
                    Err(err) => Some(translate(err)),
                };

                exited.or(closed)
            }
        };

        if let Err(err) = self.destination.flush() {
            log::debug!("failed to flush pager destination: {err}");
        }

        err
    }
}

impl<D: Destination> fmt::Debug for PagedSink<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedSink")
            .field("command", &self.command)
            .field("paging", &self.is_paging())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<D: Destination> Write for PagedSink<D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.try_write(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.try_flush()?)
    }
}

impl<D: Destination> Drop for PagedSink<D> {
    fn drop(&mut self) {
        if self.channel.is_some()
            && let Err(err) = self.close()
        {
            log::debug!("pager closed with error: {err}");
        }
    }
}

// ---

/// The way data travels from the sink to its destination.
enum Channel {
    /// Bypass mode, data is written straight to the destination.
    Direct,
    /// Data is fed to the pager process, which writes to the destination itself.
    Piped { process: Child, stdin: ChildStdin },
}

// ---

#[cfg(unix)]
fn recover(status: ExitStatus) -> Option<Error> {
    use std::io::{IsTerminal, stdin};
    use std::os::unix::process::ExitStatusExt;
    use std::process::Command;

    if status.signal() == Some(9) {
        eprintln!("\x1bm\npager killed");
        if stdin().is_terminal() {
            Command::new("stty").arg("echo").status().ok();
        }
    }

    (!status.success()).then_some(Error::PagerFailed { status })
}

#[cfg(not(unix))]
fn recover(status: ExitStatus) -> Option<Error> {
    (!status.success()).then_some(Error::PagerFailed { status })
}
