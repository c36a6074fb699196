//! Per-output-path serialization
//!
//! Runs writing to the same output path must not interleave. A process-wide
//! registry hands out one mutex per output path through an [`OutputLease`];
//! a run holds the guard for its whole duration. The registry entry is
//! removed when the last lease on a path is dropped.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type PathLock = Arc<Mutex<()>>;

static OUTPUT_LOCKS: Lazy<Mutex<HashMap<PathBuf, PathLock>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn registry() -> MutexGuard<'static, HashMap<PathBuf, PathLock>> {
    OUTPUT_LOCKS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared claim on the lock for one output path
#[derive(Debug)]
pub struct OutputLease {
    path: PathBuf,
    lock: PathLock,
}

/// Take a lease on the lock for `path`, registering it if needed
pub fn lease(path: &Path) -> OutputLease {
    let lock = Arc::clone(registry().entry(path.to_path_buf()).or_default());
    OutputLease {
        path: path.to_path_buf(),
        lock,
    }
}

impl OutputLease {
    /// Block until no other run in this process is writing this path.
    ///
    /// A poisoned lock only means an earlier run panicked mid-write; the next
    /// run truncates the file anyway, so the guard is recovered.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for OutputLease {
    fn drop(&mut self) {
        // New leases clone under the registry lock, so the count is stable here.
        let mut locks = registry();
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.path);
        }
    }
}

#[cfg(test)]
fn is_registered(path: &Path) -> bool {
    registry().contains_key(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_shares_lock() {
        let a = lease(Path::new("/tmp/concat-lock-test/out.txt"));
        let b = lease(Path::new("/tmp/concat-lock-test/out.txt"));
        assert!(Arc::ptr_eq(&a.lock, &b.lock));
    }

    #[test]
    fn test_different_paths_do_not_share() {
        let a = lease(Path::new("/tmp/concat-lock-test/one.txt"));
        let b = lease(Path::new("/tmp/concat-lock-test/two.txt"));
        assert!(!Arc::ptr_eq(&a.lock, &b.lock));

        let _ga = a.acquire();
        assert!(b.lock.try_lock().is_ok());
    }

    #[test]
    fn test_entry_removed_after_last_lease() {
        let path = Path::new("/tmp/concat-lock-test/released.txt");

        let first = lease(path);
        let second = lease(path);
        drop(first);
        assert!(is_registered(path));

        drop(second);
        assert!(!is_registered(path));
    }

    #[test]
    fn test_lease_after_release_gets_fresh_lock() {
        let path = Path::new("/tmp/concat-lock-test/again.txt");

        {
            let held = lease(path);
            let _guard = held.acquire();
        }
        let again = lease(path);
        assert!(again.lock.try_lock().is_ok());
        assert_eq!(Arc::strong_count(&again.lock), 2);
    }
}
