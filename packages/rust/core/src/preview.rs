//! Last-write-wins coordination for live previews.
//!
//! Each option change takes a [`PreviewTicket`] before generating. A
//! finished share kit is only shown if no newer ticket has been issued
//! since, so a slow regeneration can never overwrite a faster, later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use repocard_shared::{CommitRecord, RepositoryMetadata, StyleOptions};

use crate::pipeline::{ShareKit, generate_share_kit};

/// Generation number handed out by [`PreviewCoordinator::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreviewTicket(u64);

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Holds the currently displayed share kit.
#[derive(Debug, Default)]
pub struct PreviewCoordinator {
    latest: AtomicU64,
    shown: Mutex<Option<(u64, ShareKit)>>,
}

impl PreviewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before.
    pub fn begin(&self) -> PreviewTicket {
        PreviewTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest one issued.
    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        ticket.0 >= self.latest.load(Ordering::SeqCst)
    }

    /// Show `kit` unless a newer ticket was issued. Returns `false` when the
    /// result was stale and dropped.
    pub fn publish(&self, ticket: PreviewTicket, kit: ShareKit) -> bool {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            debug!(generation = ticket.0, "dropping stale preview");
            return false;
        }
        if shown.as_ref().is_some_and(|(generation, _)| *generation > ticket.0) {
            return false;
        }
        *shown = Some((ticket.0, kit));
        true
    }

    /// The share kit currently shown, if any.
    pub fn current(&self) -> Option<ShareKit> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, kit)| kit.clone())
    }

    /// Take a ticket, regenerate, and publish in one step.
    pub fn preview(
        &self,
        meta: &RepositoryMetadata,
        commits: &[CommitRecord],
        style: &StyleOptions,
    ) -> bool {
        let ticket = self.begin();
        let kit = generate_share_kit(meta, commits, style, None);
        self.publish(ticket, kit)
    }
}
