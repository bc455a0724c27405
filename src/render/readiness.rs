use std::time::Duration;

use tokio::sync::watch;

use crate::foundation::error::{FigError, FigResult};

/// What a [`Readiness`] is waiting for; decides the failure reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Awaited {
    /// The external charting library.
    Library,
    /// A render target, by id.
    Target(String),
}

impl Awaited {
    fn failure(&self, waited_ms: u64) -> FigError {
        match self {
            Self::Library => FigError::LibraryUnavailable { waited_ms },
            Self::Target(target) => FigError::TargetNotFound {
                target: target.clone(),
                waited_ms,
            },
        }
    }
}

/// Producer side: resolves every waiter once.
#[derive(Debug)]
pub struct ReadySignal<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> ReadySignal<T> {
    /// Publish the value; current and future waiters resolve with it.
    pub fn ready(&self, value: T) {
        self.tx.send_replace(Some(value));
    }
}

/// Awaitable readiness of the library or a render target.
#[derive(Clone, Debug)]
pub struct Readiness<T> {
    awaited: Awaited,
    rx: watch::Receiver<Option<T>>,
}

/// Create a linked signal and readiness pair.
pub fn readiness<T>(awaited: Awaited) -> (ReadySignal<T>, Readiness<T>) {
    let (tx, rx) = watch::channel(None);
    (ReadySignal { tx }, Readiness { awaited, rx })
}

impl<T: Clone> Readiness<T> {
    /// Already-resolved readiness.
    pub fn ready_now(awaited: Awaited, value: T) -> Self {
        let (_, rx) = watch::channel(Some(value));
        Self { awaited, rx }
    }

    /// What this readiness waits for.
    pub fn awaited(&self) -> &Awaited {
        &self.awaited
    }

    /// Wait at most `timeout` for the value.
    ///
    /// Fails with [`FigError::LibraryUnavailable`] or
    /// [`FigError::TargetNotFound`] on timeout, or as soon as the signal is
    /// dropped unresolved.
    pub async fn wait(&self, timeout: Duration) -> FigResult<T> {
        let started = tokio::time::Instant::now();
        let mut rx = self.rx.clone();
        let got = match tokio::time::timeout(timeout, rx.wait_for(Option::is_some)).await {
            Ok(Ok(v)) => (*v).clone(),
            Ok(Err(_)) | Err(_) => None,
        };
        got.ok_or_else(|| {
            let waited_ms = started.elapsed().as_millis() as u64;
            tracing::warn!(awaited = ?self.awaited, waited_ms, "readiness wait failed");
            self.awaited.failure(waited_ms)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/readiness.rs"]
mod tests;
