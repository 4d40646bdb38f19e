// Shared wizard store handle (in-memory)
//
// One wizard instance's state, shareable between UI callbacks and the async
// approval task. Unit tests construct plain `WizardStore` values directly;
// this wrapper exists for the embedding application.

use crate::wizard::WizardStore;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct SharedWizardStore {
    inner: Mutex<WizardStore>,
}

impl SharedWizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the store under the lock. Guard updates made inside
    /// one closure are applied atomically with respect to other callers, so a
    /// Next-press evaluation always sees a consistent snapshot.
    pub async fn with<R>(&self, f: impl FnOnce(&mut WizardStore) -> R) -> R {
        let mut inner = self.inner.lock().await;
        f(&mut inner)
    }

    /// Hold the lock across an await point (the approval submission).
    pub async fn lock(&self) -> MutexGuard<'_, WizardStore> {
        self.inner.lock().await
    }
}
