//! Paged output sink.
//!
//! A [`PagedSink`] transparently routes output either straight to its destination,
//! or through an external pager process (`less`, `more`, ...) whose standard output
//! is connected to that destination.

use std::collections::HashMap;
use std::env;
use std::io::{self, Stdout, stdout};
use std::process::{Command, Stdio};

mod destination;
mod error;
mod sink;


pub use destination::Destination;
pub use error::{Error, Result, translate};
pub use sink::PagedSink;

// ---

/// Pager configuration and builder.
///
/// The pager command is resolved in the following order:
/// 1. the explicit command given with [`Pager::command`] or [`Pager::custom`];
/// 2. the application-specific variable set with [`Pager::lookup_var`];
/// 3. the `PAGER` environment variable.
///
/// Blank values are skipped. If nothing is left, [`Pager::open_to`] fails with [`Error::NoCommand`].
/// The command is run by the system shell, so it may contain arguments and quoting.
pub struct Pager<E = SystemEnv> {
    command: String,
    app_env_var: Option<String>,
    env: HashMap<String, String>,
    paging: Paging,
    env_provider: E,
}

impl Pager<SystemEnv> {
    /// Creates a new pager configuration that resolves the command from environment variables.
    pub fn from_env() -> Self {
        Self::command("")
    }

    /// Creates a pager configuration with an explicit shell command.
    ///
    /// An empty command falls back to environment variables.
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            app_env_var: None,
            env: HashMap::new(),
            paging: Paging::default(),
            env_provider: SystemEnv,
        }
    }

    /// Creates a pager configuration with an explicit command given as separate arguments.
    ///
    /// Arguments are quoted so the shell passes them to the pager unchanged.
    pub fn custom(command: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let command: Vec<String> = command.into_iter().map(Into::into).collect();
        Self::command(shellwords::join(&command.iter().map(String::as_str).collect::<Vec<_>>()))
    }
}

impl<E: EnvProvider> Pager<E> {
    /// Sets an application-specific environment variable to check
    /// for the pager command (e.g. `"MYAPP_PAGER"`).
    /// Takes priority over `PAGER`.
    pub fn lookup_var(mut self, name: impl Into<String>) -> Self {
        self.app_env_var = Some(name.into());
        self
    }

    /// Sets an environment variable to pass to the pager process.
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets multiple environment variables to pass to the pager process.
    pub fn with_env(mut self, vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        self.env.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replaces the source of environment variables used to resolve the pager command.
    pub fn with_env_provider<P: EnvProvider>(self, env_provider: P) -> Pager<P> {
        Pager {
            command: self.command,
            app_env_var: self.app_env_var,
            env: self.env,
            paging: self.paging,
            env_provider,
        }
    }

    /// Sets the paging policy, see [`Paging`].
    pub fn paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    /// Resolves the pager command without starting anything.
    pub fn resolve(&self) -> Result<String> {
        resolve(&self.command, self.app_env_var.as_deref(), &self.env_provider)
    }

    /// Opens a paged sink writing to standard output.
    pub fn open(self) -> Result<PagedSink<Stdout>> {
        self.open_to(stdout())
    }

    /// Opens a paged sink writing to `destination`.
    ///
    /// Depending on the [`Paging`] policy, the sink either writes to `destination` directly
    /// or starts the pager with its standard output connected to `destination`.
    /// Anything buffered in `destination` is flushed before the pager starts.
    pub fn open_to<D: Destination>(self, mut destination: D) -> Result<PagedSink<D>> {
        if self.paging == Paging::Never {
            log::debug!("paging is disabled");
            return Ok(PagedSink::direct(String::new(), destination));
        }

        let command = self.resolve()?;

        if self.paging == Paging::Auto && !destination.is_terminal() {
            log::debug!("destination is not a terminal, bypassing pager {command:?}");
            return Ok(PagedSink::direct(command, destination));
        }

        destination.flush()?;

        let output = destination.pager_output().ok_or_else(|| {
            Error::from(io::Error::new(
                io::ErrorKind::Unsupported,
                "destination cannot be used as pager output",
            ))
        })??;

        log::debug!("starting pager {command:?}");
        let mut process = shell(&command)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(output)
            .stderr(Stdio::inherit())
            .spawn()?;

        let Some(stdin) = process.stdin.take() else {
            process.kill().ok();
            process.wait().ok();
            return Err(io::Error::other("pager stdin is not available").into());
        };

        Ok(PagedSink::piped(command, destination, process, stdin))
    }
}

// ---

/// Decides whether a pager process is started at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Paging {
    /// Start the pager only if the destination is an interactive terminal.
    #[default]
    Auto,
    /// Always start the pager, the destination must be backed by an OS handle.
    Always,
    /// Never start the pager, write directly to the destination.
    Never,
}

// ---

/// Trait for providing environment variable access.
/// Allows dependency injection for testing.
pub trait EnvProvider {
    /// Gets an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

/// Default environment provider that reads from the actual environment.
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl<F> EnvProvider for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

// ---

/// Resolves the pager command.
///
/// Returns the `explicit` command if it is not blank, otherwise the value of the
/// `app_env_var` variable, otherwise the value of `PAGER`.
pub fn resolve(explicit: &str, app_env_var: Option<&str>, env: &impl EnvProvider) -> Result<String> {
    let command = Some(explicit.to_owned())
        .filter(|v| !v.trim().is_empty())
        .or_else(|| app_env_var.and_then(|v| env.get(v)).filter(|v| !v.trim().is_empty()))
        .or_else(|| env.get(PAGER).filter(|v| !v.trim().is_empty()))
        .ok_or(Error::NoCommand)?;

    log::debug!("resolved pager command: {command:?}");
    Ok(command)
}

const PAGER: &str = "PAGER";

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}
