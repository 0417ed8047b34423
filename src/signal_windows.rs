// std imports
use std::time::Duration;

// local imports
use crate::error::*;

// ---

pub struct SignalHandler {}

impl SignalHandler {
    pub fn run<T, F>(_: usize, _: Duration, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        f()
    }
}
