use ratatui::layout::{Flex, Layout, Rect, Size};
use signal_hook::consts::TERM_SIGNALS;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Return a `Rect` of (at most) the given size centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// A flag shared between the game loop and whatever asks it to stop.  Once
/// set, it stays set.
#[derive(Clone, Debug, Default)]
pub(crate) struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub(crate) fn new() -> StopToken {
        StopToken::default()
    }

    pub(crate) fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Set the token when the process receives an interrupt or termination
    /// signal, in place of the signal's default action.
    pub(crate) fn stop_on_signals(&self) -> io::Result<()> {
        for &sig in TERM_SIGNALS {
            signal_hook::flag::register(sig, Arc::clone(&self.0))?;
        }
        Ok(())
    }
}
