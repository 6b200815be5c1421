//! Shared catalog store.
//!
//! The store is the single owner of the fetched catalog. Every fetch is tagged
//! with a [`FetchTicket`] carrying a monotonically increasing token; a result
//! whose token is not the latest issued one is dropped, so a slow response for
//! a platform the user already left can never overwrite a newer catalog.
//! Consumers read [`CatalogSnapshot`]s from a `watch` channel instead of
//! fetching their own copy.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::client::{CatalogClient, CatalogError};
use super::record::{GameRecord, Platform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed(String),
}

/// What subscribers see.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub platform: Platform,
    pub records: Arc<[GameRecord]>,
    pub status: CatalogStatus,
    /// Bumped whenever `records` is replaced.
    pub revision: u64,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    fn empty(platform: Platform) -> Self {
        Self {
            platform,
            records: Arc::from(Vec::new()),
            status: CatalogStatus::Loading,
            revision: 0,
            fetched_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub platform: Platform,
}

/// Result of handing a finished fetch back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

pub type FetchOutcome = (FetchTicket, Result<Vec<GameRecord>, CatalogError>);

pub struct CatalogStore {
    latest_token: u64,
    tx: watch::Sender<CatalogSnapshot>,
}

impl CatalogStore {
    pub fn new(platform: Platform) -> Self {
        let (tx, _rx) = watch::channel(CatalogSnapshot::empty(platform));
        Self {
            latest_token: 0,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.tx.borrow().clone()
    }

    pub fn platform(&self) -> Platform {
        self.tx.borrow().platform
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Switch to `platform` and issue a fetch. The published records stay
    /// in place, marked loading, until the fetch completes.
    pub fn select_platform(&mut self, platform: Platform) -> FetchTicket {
        self.latest_token += 1;
        let ticket = FetchTicket {
            token: self.latest_token,
            platform,
        };
        self.tx.send_modify(|snap| {
            snap.platform = platform;
            snap.status = CatalogStatus::Loading;
        });
        tracing::debug!(%platform, token = ticket.token, "catalog fetch issued");
        ticket
    }

    /// Re-fetch the active platform (the retry affordance).
    pub fn refresh(&mut self) -> FetchTicket {
        let platform = self.platform();
        self.select_platform(platform)
    }

    /// Apply a finished fetch, unless a newer one has been issued since.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<GameRecord>, CatalogError>,
    ) -> Completion {
        if ticket.token != self.latest_token {
            tracing::debug!(
                platform = %ticket.platform,
                token = ticket.token,
                latest = self.latest_token,
                "discarding stale catalog response"
            );
            return Completion::Stale;
        }

        match result {
            Ok(records) => {
                let records: Arc<[GameRecord]> = Arc::from(records);
                let fetched_at = Utc::now();
                self.tx.send_modify(|snap| {
                    snap.platform = ticket.platform;
                    snap.records = records;
                    snap.status = CatalogStatus::Ready;
                    snap.revision += 1;
                    snap.fetched_at = Some(fetched_at);
                });
                Completion::Applied
            }
            Err(err) => {
                // Previous records stay in place; only the status changes.
                tracing::warn!(platform = %ticket.platform, error = %err, "catalog fetch failed");
                self.tx.send_modify(|snap| {
                    snap.status = CatalogStatus::Failed(err.to_string());
                });
                Completion::Failed
            }
        }
    }
}

/// Run `ticket`'s fetch on the runtime and report back to the event loop.
pub fn spawn_fetch(
    handle: &tokio::runtime::Handle,
    client: CatalogClient,
    ticket: FetchTicket,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    handle.spawn(async move {
        let result = client.fetch(Some(ticket.platform)).await;
        // The receiver is gone only when the UI is shutting down.
        let _ = tx.send((ticket, result));
    })
}
