// std imports
use std::process::exit;
use std::thread::{JoinHandle, spawn};
use std::time::{Duration, Instant};

// third-party imports
use signal_hook::{
    consts::SIGINT,
    iterator::{Handle, Signals},
};

// local imports
use crate::error::*;

// ---

/// Keeps the process alive on interrupts while the pager owns the terminal.
///
/// The process exits once `max_count` interrupts arrive with less than `timeout` between them.
pub struct SignalHandler {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl SignalHandler {
    pub fn run<T, F>(max_count: usize, timeout: Duration, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _guard = Self::new(max_count, timeout)?;
        f()
    }

    fn new(max_count: usize, timeout: Duration) -> Result<Self> {
        let mut signals = Signals::new([SIGINT])?;
        let handle = signals.handle();

        let thread = spawn(move || {
            let mut count = 0;
            let mut ts = Instant::now();
            for signal in signals.forever() {
                if count < max_count {
                    count += 1;
                }
                let now = Instant::now();
                if now.duration_since(ts) > timeout {
                    count = 0;
                }
                log::debug!("interrupted, count {count} of {max_count}");
                if count == max_count {
                    exit(0x80 + signal);
                }
                ts = now;
            }
        });

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}
