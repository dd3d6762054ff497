//! Request sequencing
//!
//! Rapid filter changes can leave several fetches for the same view in
//! flight at once; responses may land out of order. Every fetch takes a
//! ticket with a per-view monotonically increasing id, and only the
//! response holding the latest ticket for its view is allowed through.
//! Everything else fails with `SUPERSEDED`, which the frontend drops.

use crate::error::{AppError, Result};
use dashmap::DashMap;

/// Per-view monotonic request ids
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: DashMap<String, u64>,
}

/// Proof of a request issued for a view at a point in time
#[derive(Debug, Clone)]
pub struct RequestTicket {
    view: String,
    id: u64,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `view`, superseding all earlier ones
    pub fn begin(&self, view: &str) -> RequestTicket {
        let mut entry = self.latest.entry(view.to_string()).or_insert(0);
        *entry += 1;
        RequestTicket {
            view: view.to_string(),
            id: *entry,
        }
    }

    /// Fail with `SUPERSEDED` if a newer ticket for the view exists
    pub fn ensure_current(&self, ticket: &RequestTicket) -> Result<()> {
        let current = self.latest.get(&ticket.view).map(|e| *e).unwrap_or(0);
        if current == ticket.id {
            Ok(())
        } else {
            tracing::debug!(
                "Dropping stale {} response (ticket {}, latest {})",
                ticket.view,
                ticket.id,
                current
            );
            Err(AppError::Superseded(ticket.view.clone()))
        }
    }
}
