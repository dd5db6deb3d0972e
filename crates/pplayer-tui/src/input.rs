//! Scoped pointer input subscription.
//!
//! Mouse capture covers the whole terminal, so a drag keeps reporting
//! positions after the pointer leaves the track. Capture is held for the
//! lifetime of an [`InputSubscription`] and released when it drops.

use std::io::{self, Write};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::debug;

/// Terminal-wide mouse capture, released on drop.
pub struct InputSubscription<W: Write> {
    out: W,
}

impl<W: Write> InputSubscription<W> {
    /// Enable mouse capture on `out`.
    pub fn acquire(mut out: W) -> io::Result<Self> {
        execute!(out, EnableMouseCapture)?;
        debug!("Mouse capture enabled");
        Ok(Self { out })
    }
}

impl<W: Write> Drop for InputSubscription<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, DisableMouseCapture);
        debug!("Mouse capture released");
    }
}
