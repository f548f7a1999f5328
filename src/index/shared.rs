use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::index::GlyphIndex;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Readiness of a [`SearchIndex`] as seen by callers
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Readiness {
    NotLoaded,
    /// First load in progress, nothing to search yet
    Loading,
    /// A reload is in progress, the previous index is still served
    Reloading,
    Ready { generation: u64 },
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Arc<GlyphIndex>>,
    /// Loads started and not finished
    in_flight: usize,
    /// Ticket handed to the most recently started load
    last_ticket: u64,
    /// Ticket of the load that built `current`
    installed_ticket: u64,
    generation: u64,
}

/// Owner of the current [`GlyphIndex`].
///
/// Readers clone the `Arc` out of a short read lock and search without holding
/// it. Loads build the new index outside the lock and swap it in; a failed load
/// leaves the current index in place. Loads may overlap: the index of a load
/// is only installed if no load started after it has installed its own.
#[derive(Debug, Default)]
pub struct SearchIndex {
    slot: RwLock<Slot>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The index queries should run against, if any
    pub fn snapshot(&self) -> Option<Arc<GlyphIndex>> {
        self.read().current.clone()
    }

    pub fn readiness(&self) -> Readiness {
        let slot = self.read();
        match (&slot.current, slot.in_flight) {
            (None, 0) => Readiness::NotLoaded,
            (None, _) => Readiness::Loading,
            (Some(_), 0) => Readiness::Ready {
                generation: slot.generation,
            },
            (Some(_), _) => Readiness::Reloading,
        }
    }

    /// Whether an index is served, reloads in progress included
    pub fn is_ready(&self) -> bool {
        self.read().current.is_some()
    }

    /// Number of installed loads so far
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Build a new index with `build` and make it current.
    ///
    /// Returns the generation served afterwards. On error the current index
    /// stays; an index built by a load that was overtaken by a newer one is
    /// dropped.
    pub fn load_with<F>(&self, build: F) -> Result<u64>
    where
        F: FnOnce() -> Result<GlyphIndex>,
    {
        let ticket = {
            let mut slot = self.write();
            slot.in_flight += 1;
            slot.last_ticket += 1;
            slot.last_ticket
        };

        let built = build();

        let mut slot = self.write();
        slot.in_flight -= 1;
        match built {
            Ok(_) if ticket < slot.installed_ticket => {
                debug!("dropping index of load {ticket}, load {} finished first", slot.installed_ticket);
                Ok(slot.generation)
            }
            Ok(index) => {
                slot.generation += 1;
                slot.installed_ticket = ticket;
                debug!("index generation {} ready with {} glyphs", slot.generation, index.len());
                slot.current = Some(Arc::new(index));
                Ok(slot.generation)
            }
            Err(err) => {
                warn!("index load {ticket} failed, keeping current state: {err}");
                Err(err)
            }
        }
    }

    /// Poll until an index is served or `timeout` has passed
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_ready() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(READY_POLL_INTERVAL);
        }
    }
}
