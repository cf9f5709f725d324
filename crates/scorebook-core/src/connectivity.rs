//! Connectivity gate
//!
//! A single process-wide flag recording whether the durable backend was
//! reachable at startup. The sync layer is the only writer; everything
//! else reads it to pick the remote or local-only write path. There is no
//! automatic re-probe: once marked unreachable, the session stays offline.

/// Tracks whether the durable backend is reachable.
#[derive(Debug)]
pub struct ConnectivityGate {
    reachable: bool,
}

impl ConnectivityGate {
    /// Start optimistic; the startup probe corrects this before any write.
    pub fn new() -> Self {
        Self { reachable: true }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Flip to offline for the remainder of the session.
    pub(crate) fn mark_unreachable(&mut self) {
        self.reachable = false;
    }
}

impl Default for ConnectivityGate {
    fn default() -> Self {
        Self::new()
    }
}
