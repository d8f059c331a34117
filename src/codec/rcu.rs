use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// A Read-Copy-Update cell for read-mostly shared data.
///
/// Readers take a cheap `Arc` snapshot and never wait on each other. Writers
/// are serialised, build a new version from the current snapshot, and
/// publish it with a single pointer swap. Old versions are freed when the
/// last reader drops its snapshot.
pub struct Rcu<T> {
    // The published version. The lock is only held long enough to clone or swap the Arc.
    current: RwLock<Arc<T>>,
    // Serialises copy-update cycles so no update is lost.
    writer: Mutex<()>,
}

impl<T> Rcu<T> {
    /// Creates a new RCU instance with initial data.
    pub fn new(data: T) -> Self {
        Rcu {
            current: RwLock::new(Arc::new(data)),
            writer: Mutex::new(()),
        }
    }

    /// Reads the current data.
    ///
    /// The returned snapshot stays valid even if a writer publishes a newer
    /// version afterwards.
    pub fn read(&self) -> Arc<T> {
        Arc::clone(&*self.current.read())
    }

    /// Runs one copy-update cycle under the writer lock.
    ///
    /// `f` sees the latest published version. If it returns `Some(next)`,
    /// `next` is published. The second element is handed back to the caller
    /// either way.
    pub fn copy_update<R>(&self, f: impl FnOnce(&T) -> (Option<T>, R)) -> R {
        let _writer = self.writer.lock();
        let snapshot = self.read();
        let (next, result) = f(&snapshot);
        if let Some(next) = next {
            *self.current.write() = Arc::new(next);
        }
        result
    }
}
