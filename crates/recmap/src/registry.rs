//! Process-wide handle registry.
//!
//! Maps opaque handle ids to connection references. All mutation paths
//! go through one mutex; ids are monotonically increasing and never
//! reused within a process lifetime.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use crate::{Error, Result};

/// A parsed connection reference.
///
/// URL/DSN parsing lives outside the engine; this only carries the
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub driver: String,
    pub url: String,
}

/// Opaque registry handle id.
pub type HandleId = u64;

/// A guarded id-to-reference registry.
#[derive(Debug, Default)]
pub struct Registry {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: HandleId,
    entries: HashMap<HandleId, Reference>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection reference, returning its new handle id.
    pub fn register(&self, driver: &str, url: &str) -> Result<HandleId> {
        if driver.is_empty() {
            return Err(Error::InvalidReference("empty driver name".into()));
        }
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.insert(
            id,
            Reference {
                driver: driver.to_string(),
                url: url.to_string(),
            },
        );
        Ok(id)
    }

    /// Look up a registered reference.
    pub fn lookup(&self, id: HandleId) -> Option<Reference> {
        let inner = self.inner.lock().expect("registry lock poisoned");
        inner.entries.get(&id).cloned()
    }

    /// Remove a registration. Unknown ids are an error.
    pub fn unregister(&self, id: HandleId) -> Result<()> {
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        inner
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::UnknownHandle(id))
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register against the process-wide registry.
pub fn register(driver: &str, url: &str) -> Result<HandleId> {
    GLOBAL.register(driver, url)
}

/// Look up in the process-wide registry.
pub fn lookup(id: HandleId) -> Option<Reference> {
    GLOBAL.lookup(id)
}

/// Unregister from the process-wide registry.
pub fn unregister(id: HandleId) -> Result<()> {
    GLOBAL.unregister(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let registry = Registry::new();
        let a = registry.register("postgres", "postgres://one").unwrap();
        let b = registry.register("postgres", "postgres://two").unwrap();
        assert!(b > a);
        registry.unregister(a).unwrap();
        let c = registry.register("postgres", "postgres://three").unwrap();
        assert!(c > b);
    }

    #[test]
    fn test_unregister_unknown_fails() {
        let registry = Registry::new();
        assert!(matches!(
            registry.unregister(42),
            Err(Error::UnknownHandle(42))
        ));
    }

    #[test]
    fn test_lookup() {
        let registry = Registry::new();
        let id = registry.register("sqlite", "file:test.db").unwrap();
        let re = registry.lookup(id).unwrap();
        assert_eq!(re.driver, "sqlite");
        assert_eq!(re.url, "file:test.db");
        assert_eq!(registry.lookup(id + 1), None);
    }

    #[test]
    fn test_empty_driver_rejected() {
        let registry = Registry::new();
        assert!(matches!(
            registry.register("", "url"),
            Err(Error::InvalidReference(_))
        ));
    }
}
