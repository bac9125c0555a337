/* src/client/router/rust/src/ready.rs */

use futures_channel::oneshot;
use futures_util::FutureExt;
use futures_util::future::Shared;

use crate::errors::RouterError;

/// Resolves every `Readiness` created alongside it.
pub struct ReadySignal<T> {
  tx: oneshot::Sender<T>,
}

impl<T> ReadySignal<T> {
  pub fn resolve(self, value: T) {
    // Nobody waiting anymore is fine.
    let _ = self.tx.send(value);
  }
}

/// A value that becomes available once, awaited by any number of page initializers.
#[derive(Clone)]
pub struct Readiness<T: Clone> {
  inner: Shared<oneshot::Receiver<T>>,
}

pub fn readiness<T: Clone>() -> (ReadySignal<T>, Readiness<T>) {
  let (tx, rx) = oneshot::channel();
  (ReadySignal { tx }, Readiness { inner: rx.shared() })
}

impl<T: Clone> Readiness<T> {
  /// Already-resolved readiness.
  pub fn ready(value: T) -> Self {
    let (signal, readiness) = readiness();
    signal.resolve(value);
    readiness
  }

  pub async fn wait(&self) -> Result<T, RouterError> {
    self.inner.clone().await.map_err(|_| RouterError::NotReady)
  }

  /// The value, if it has already been produced and observed by a waiter.
  pub fn peek(&self) -> Option<T> {
    self.inner.peek().and_then(|result| result.as_ref().ok().cloned())
  }
}
