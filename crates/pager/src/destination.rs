// std imports
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, LineWriter, Stderr, Stdout, Write};
use std::process::Stdio;

// ---

/// An output stream a [`PagedSink`](crate::PagedSink) can write to or hand over to a pager.
///
/// Besides plain writing, a destination may offer two optional capabilities,
/// both of which default to "not available":
/// - terminal detection, used by [`Paging::Auto`](crate::Paging::Auto) to decide
///   whether a pager is needed at all;
/// - an inheritable output handle, which becomes the pager's standard output.
///
/// Buffered destinations get flushed before the pager is started and after it exits,
/// so that their contents and the pager's output do not interleave.
pub trait Destination: Write {
    /// Returns `true` if the destination is an interactive terminal.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Returns a handle the pager process can use as its standard output.
    ///
    /// `None` means the destination is not backed by an operating system handle.
    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        None
    }
}

impl Destination for Stdout {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        Some(Ok(Stdio::from(io::stdout())))
    }
}

impl Destination for Stderr {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        Some(Ok(Stdio::from(io::stderr())))
    }
}

impl Destination for File {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        Some(self.try_clone().map(Stdio::from))
    }
}

impl Destination for Vec<u8> {}

impl Destination for io::Sink {}

impl<D: Destination> Destination for BufWriter<D> {
    fn is_terminal(&self) -> bool {
        self.get_ref().is_terminal()
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        self.get_ref().pager_output()
    }
}

impl<D: Destination> Destination for LineWriter<D> {
    fn is_terminal(&self) -> bool {
        self.get_ref().is_terminal()
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        self.get_ref().pager_output()
    }
}

impl<D: Destination + ?Sized> Destination for &mut D {
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        (**self).pager_output()
    }
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }

    fn pager_output(&self) -> Option<io::Result<Stdio>> {
        (**self).pager_output()
    }
}
