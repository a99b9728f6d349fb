//! Shared one-shot fetch.
//!
//! The first caller starts the fetch on the runtime; callers arriving while
//! it runs are queued; once it finishes the value is kept for good and the
//! queue is drained in arrival order. Nothing is ever refetched.

use std::future::Future;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::AppError;

pub type Callback<T> = Box<dyn FnOnce(Arc<T>) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    NotFetched,
    Fetching,
    Fetched,
}

enum State<T> {
    NotFetched,
    Fetching(Vec<Callback<T>>),
    Fetched(Arc<T>),
}

pub struct FetchOnce<T> {
    state: Mutex<State<T>>,
}

impl<T> Default for FetchOnce<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State::NotFetched),
        }
    }
}

impl<T> FetchOnce<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Callbacks never run under the lock, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn status(&self) -> FetchStatus {
        match &*self.lock() {
            State::NotFetched => FetchStatus::NotFetched,
            State::Fetching(_) => FetchStatus::Fetching,
            State::Fetched(_) => FetchStatus::Fetched,
        }
    }

    fn complete(&self, value: Arc<T>) {
        let previous = mem::replace(&mut *self.lock(), State::Fetched(Arc::clone(&value)));
        if let State::Fetching(queue) = previous {
            debug!("Fetch finished, running {} queued callback(s)", queue.len());
            for callback in queue {
                callback(Arc::clone(&value));
            }
        }
    }
}

impl<T: Send + Sync + 'static> FetchOnce<T> {
    /// Runs `callback` with the fetched value, starting `fetch` if nobody has
    /// yet. `fetch` is only invoked on the first call.
    ///
    /// Must be called from within a Tokio runtime: the fetch is spawned onto it.
    pub fn run<F, Fut>(self: &Arc<Self>, fetch: F, callback: Callback<T>)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut state = self.lock();
        match &mut *state {
            State::Fetched(value) => {
                let value = Arc::clone(value);
                drop(state);
                callback(value);
                return;
            }
            State::Fetching(queue) => {
                queue.push(callback);
                return;
            }
            State::NotFetched => {}
        }
        *state = State::Fetching(vec![callback]);
        drop(state);

        let completion = Completion {
            owner: Arc::clone(self),
            finished: false,
        };
        let fut = fetch();
        tokio::spawn(async move {
            let value = fut.await;
            completion.finish(value);
        });
    }

    /// Async form of [`FetchOnce::run`]. Dropping the returned future only
    /// cancels this caller; the shared fetch keeps going.
    pub async fn get<F, Fut>(self: &Arc<Self>, fetch: F) -> Result<Arc<T>, AppError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.run(
            fetch,
            Box::new(move |value: Arc<T>| {
                let _ = tx.send(value);
            }),
        );
        rx.await
            .map_err(|_| AppError::Internal("fetch ended without producing a value".to_string()))
    }
}

/// Resets the owner to `NotFetched` if the fetch task dies before finishing,
/// dropping queued callbacks so async waiters see an error instead of hanging.
struct Completion<T> {
    owner: Arc<FetchOnce<T>>,
    finished: bool,
}

impl<T> Completion<T> {
    fn finish(mut self, value: T) {
        self.finished = true;
        self.owner.complete(Arc::new(value));
    }
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let abandoned = mem::replace(&mut *self.owner.lock(), State::NotFetched);
        if let State::Fetching(queue) = abandoned {
            warn!("Fetch aborted, dropping {} queued callback(s)", queue.len());
        }
    }
}
