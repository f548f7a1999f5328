//! Debounced query pipeline for interactive front ends.
//!
//! Every keystroke is submitted as a query. The session waits until typing
//! pauses for the debounce interval, searches only the last query of the burst,
//! and publishes the page tagged with the generation of that query. Readers
//! going through [`SessionUpdates::recv_latest`] never see a page older than
//! the newest query submitted.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::SearchPage;
use crate::picker::Picker;

#[derive(Debug, Clone)]
struct SessionQuery {
    generation: u64,
    query: String,
    category: Option<String>,
}

/// The result of one debounced query
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    /// Generation of the query that produced this page, starting at 1
    pub generation: u64,
    pub query: String,
    pub page: SearchPage,
}

/// Sending side of a session
pub struct QuerySession {
    queries: UnboundedSender<SessionQuery>,
    generation: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

/// Receiving side of a session
pub struct SessionUpdates {
    updates: UnboundedReceiver<SessionUpdate>,
    generation: Arc<AtomicU64>,
}

impl QuerySession {
    /// Start a session on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Outside of a tokio runtime.
    pub fn spawn(picker: Arc<Picker>, debounce: Duration) -> (Self, SessionUpdates) {
        let (query_tx, query_rx) = unbounded_channel();
        let (update_tx, update_rx) = unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));
        let task = tokio::spawn(run(picker, debounce, query_rx, update_tx));
        let session = Self {
            queries: query_tx,
            generation: generation.clone(),
            task,
        };
        let updates = SessionUpdates {
            updates: update_rx,
            generation,
        };
        (session, updates)
    }

    /// Submit a query over all glyphs; returns its generation
    pub fn submit(&self, query: impl Into<String>) -> u64 {
        self.submit_in(query, None)
    }

    /// Submit a query restricted to `category`; returns its generation
    pub fn submit_in(&self, query: impl Into<String>, category: Option<String>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let query = SessionQuery {
            generation,
            query: query.into(),
            category,
        };
        if self.queries.send(query).is_err() {
            warn!("query session has stopped, dropping generation {generation}");
        }
        generation
    }

    /// Generation of the newest submitted query
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Stop accepting queries and wait for the last pending one to be published
    pub async fn close(self) {
        drop(self.queries);
        if let Err(err) = self.task.await {
            warn!("query session task failed: {err}");
        }
    }
}

impl SessionUpdates {
    /// Next update, whatever its generation
    pub async fn recv(&mut self) -> Option<SessionUpdate> {
        self.updates.recv().await
    }

    /// Next update that answers the newest submitted query; older ones are
    /// dropped. `None` once the session is closed and drained.
    pub async fn recv_latest(&mut self) -> Option<SessionUpdate> {
        loop {
            let update = self.updates.recv().await?;
            let newest = self.generation.load(Ordering::Acquire);
            if update.generation >= newest {
                return Some(update);
            }
            trace!("dropping stale page of generation {} (newest {newest})", update.generation);
        }
    }
}

async fn run(
    picker: Arc<Picker>,
    debounce: Duration,
    mut queries: UnboundedReceiver<SessionQuery>,
    updates: UnboundedSender<SessionUpdate>,
) {
    while let Some(mut pending) = queries.recv().await {
        // restart the wait on every newer query
        let mut closed = false;
        while !closed {
            select! {
                newer = queries.recv() => match newer {
                    Some(query) => pending = query,
                    None => closed = true,
                },
                _ = tokio::time::sleep(debounce) => break,
            }
        }

        let SessionQuery {
            generation,
            query,
            category,
        } = pending;
        trace!("searching generation {generation}: {query:?}");
        let searcher = picker.clone();
        let search_query = query.clone();
        let page = match tokio::task::spawn_blocking(move || {
            searcher.get_glyphs(&search_query, category.as_deref(), 0, 0)
        })
        .await
        {
            Ok(page) => page,
            Err(err) => {
                warn!("search for {query:?} failed: {err}");
                continue;
            }
        };

        if updates
            .send(SessionUpdate {
                generation,
                query,
                page,
            })
            .is_err()
        {
            debug!("session updates dropped, stopping");
            break;
        }
        if closed {
            break;
        }
    }
}
