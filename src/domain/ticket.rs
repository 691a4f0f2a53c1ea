//! Request tickets used to recognize superseded responses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, strictly increasing identifier attached to every issued fetch.
///
/// A response is applied only when its ticket equals the issuing controller's
/// current ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-controller source of tickets. Never shared between surfaces.
#[derive(Debug, Clone)]
pub struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Mints a ticket greater than every ticket minted before it.
    pub fn mint(&mut self) -> RequestTicket {
        let ticket = RequestTicket(self.next);
        self.next = self.next.saturating_add(1);
        ticket
    }
}

impl Default for TicketCounter {
    fn default() -> Self {
        Self::new()
    }
}
