// std imports
use std::fs::File;
use std::io::{self, Read, Write, stdin};
use std::num::NonZeroUsize;
use std::path::PathBuf;

// third-party imports
use pager::{EnvProvider, Pager, Paging};

// local imports
use crate::error::*;

// ---

/// Environment variable with the application-specific pager command.
pub const PAGER_VAR: &str = "PAGESINK_PAGER";

pub type InputStream = Box<dyn Read + Send>;

// ---

pub struct Options {
    /// Explicit pager command, e.g. from the command line.
    pub pager: Option<String>,
    /// Pager command used when no other is configured.
    pub fallback_pager: Option<String>,
    /// Environment variables for the pager process, applied unless already set.
    pub pager_env: Vec<(String, String)>,
    pub paging: Paging,
    pub buffer_size: NonZeroUsize,
}

pub struct App {
    options: Options,
}

impl App {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Builds the pager configuration.
    ///
    /// The command comes from the explicit option, then [`PAGER_VAR`], then `PAGER`,
    /// then the fallback option. If none is set, paging is disabled.
    pub fn pager<E: EnvProvider>(&self, env: E) -> Pager {
        let explicit = self.options.pager.as_deref().unwrap_or_default();
        let command = match pager::resolve(explicit, Some(PAGER_VAR), &env) {
            Ok(command) => command,
            Err(_) => self.options.fallback_pager.clone().unwrap_or_default(),
        };

        let paging = if command.trim().is_empty() {
            log::debug!("no pager configured, using stdout");
            Paging::Never
        } else {
            self.options.paging
        };

        let vars = self
            .options
            .pager_env
            .iter()
            .filter(|(name, _)| env.get(name).is_none())
            .cloned()
            .collect::<Vec<_>>();

        Pager::command(command).with_env(vars).paging(paging)
    }

    /// Copies all inputs to the output in order.
    pub fn run(&self, inputs: Vec<InputStream>, output: &mut dyn Write) -> Result<()> {
        let mut buf = vec![0; self.options.buffer_size.get()];

        for mut input in inputs {
            loop {
                let n = match input.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err.into()),
                };
                output.write_all(&buf[..n])?;
            }
        }

        output.flush()?;
        Ok(())
    }
}

// ---

/// A reference to an input, opened with [`InputReference::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputReference {
    Stdin,
    File(PathBuf),
}

impl InputReference {
    pub fn open(&self) -> Result<InputStream> {
        match self {
            Self::Stdin => Ok(Box::new(stdin())),
            Self::File(path) => {
                log::debug!("open {}", path.display());
                let file = File::open(path).map_err(|source| Error::Input {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

impl From<PathBuf> for InputReference {
    fn from(path: PathBuf) -> Self {
        if path.to_str() == Some("-") {
            Self::Stdin
        } else {
            Self::File(path)
        }
    }
}
