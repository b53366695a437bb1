//! Fetches bound to a page's visible lifetime.
//!
//! A page that starts background work holds a `PageTask`. Dropping or
//! cancelling it aborts the work, and any result that still arrives carries
//! the navigator generation it was started for so the receiver can discard it.

use std::future::Future;

use futures::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;
use tracing::debug;

/// A result tagged with the page generation that requested it
#[derive(Debug)]
pub struct Tagged<T> {
    pub generation: u64,
    pub payload: T,
}

impl<T> Tagged<T> {
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Handle to one page's in-flight work. Aborts on drop.
#[derive(Debug)]
pub struct PageTask {
    handle: AbortHandle,
    generation: u64,
}

impl PageTask {
    /// Spawn `work` on the tokio runtime and forward its output, tagged with
    /// `generation`, to `tx`
    pub fn spawn<F, T>(generation: u64, tx: mpsc::Sender<Tagged<T>>, work: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let forward = async move {
            let payload = work.await;
            if tx.send(Tagged { generation, payload }).await.is_err() {
                debug!(generation, "Page result dropped, receiver closed");
            }
        };
        tokio::spawn(Abortable::new(forward, registration));
        Self { handle, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for PageTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
