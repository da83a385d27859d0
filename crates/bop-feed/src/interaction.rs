//! Recording what the user decided.
//!
//! The deck never waits on the network: [`InteractionSink::record`] is
//! synchronous and must not block. [`Recorder`] queues interactions on an
//! unbounded channel and delivers them from a spawned task.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::deck::Decision;
use crate::error::FeedError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Dislike,
    /// Undoes an earlier like (rewind).
    Unlike,
}

impl From<Decision> for InteractionKind {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Like => InteractionKind::Like,
            Decision::Dislike => InteractionKind::Dislike,
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::Like => f.write_str("like"),
            InteractionKind::Dislike => f.write_str("dislike"),
            InteractionKind::Unlike => f.write_str("unlike"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub user_id: u64,
    pub item_id: String,
    pub kind: InteractionKind,
}

impl Interaction {
    pub fn new(user_id: u64, item_id: impl Into<String>, kind: InteractionKind) -> Self {
        Self { user_id, item_id: item_id.into(), kind }
    }
}

// ── sinks ─────────────────────────────────────────────────────────────────

/// Where the screen reports interactions. Never blocks, never fails.
pub trait InteractionSink {
    fn record(&self, interaction: Interaction);
}

impl<T: InteractionSink + ?Sized> InteractionSink for Rc<T> {
    fn record(&self, interaction: Interaction) {
        (**self).record(interaction);
    }
}

impl<T: InteractionSink + ?Sized> InteractionSink for Box<T> {
    fn record(&self, interaction: Interaction) {
        (**self).record(interaction);
    }
}

/// Logs interactions and drops them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl InteractionSink for LogSink {
    fn record(&self, interaction: Interaction) {
        info!("{} user={} item={}", interaction.kind, interaction.user_id, interaction.item_id);
    }
}

/// Keeps interactions in memory, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    items: RefCell<Vec<Interaction>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Interaction> {
        self.items.take()
    }

    pub fn snapshot(&self) -> Vec<Interaction> {
        self.items.borrow().clone()
    }
}

impl InteractionSink for MemorySink {
    fn record(&self, interaction: Interaction) {
        self.items.borrow_mut().push(interaction);
    }
}

// ── remote delivery ───────────────────────────────────────────────────────

/// Remote end that accepts interactions (the API client, or a fake in tests).
pub trait InteractionTarget {
    fn deliver(
        &self,
        interaction: &Interaction,
    ) -> impl Future<Output = Result<(), FeedError>> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderStats {
    pub delivered: usize,
    pub failed: usize,
}

///
/// Recorder
///
/// Fire-and-forget sink backed by a tokio task. Delivery failures are
/// logged at `warn` and counted; they never reach the deck.
///

#[derive(Debug)]
pub struct Recorder {
    tx: mpsc::UnboundedSender<Interaction>,
    task: JoinHandle<RecorderStats>,
}

impl Recorder {
    /// Spawns the delivery task on the current tokio runtime.
    pub fn spawn<T>(target: T) -> Self
    where
        T: InteractionTarget + Send + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Interaction>();

        let task = tokio::spawn(async move {
            let mut stats = RecorderStats::default();
            while let Some(interaction) = rx.recv().await {
                match target.deliver(&interaction).await {
                    Ok(()) => stats.delivered += 1,
                    Err(e) => {
                        stats.failed += 1;
                        warn!(
                            "failed to record {} of '{}': {e}",
                            interaction.kind, interaction.item_id
                        );
                    }
                }
            }
            stats
        });

        Self { tx, task }
    }

    /// Closes the queue, waits for everything queued to be delivered.
    pub async fn shutdown(self) -> RecorderStats {
        let Recorder { tx, task } = self;
        drop(tx);

        match task.await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("interaction recorder task ended abnormally: {e}");
                RecorderStats::default()
            }
        }
    }
}

impl InteractionSink for Recorder {
    fn record(&self, interaction: Interaction) {
        if let Err(mpsc::error::SendError(lost)) = self.tx.send(interaction) {
            warn!("interaction recorder is gone; dropped {} of '{}'", lost.kind, lost.item_id);
        }
    }
}
