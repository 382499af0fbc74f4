//! Cart persistence adapters.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use atelier_cache::{cache_key, Cache, KeyValueStore};

use crate::cart::CartSnapshot;
use crate::error::CommerceError;

/// Prefix of the storage key a cart snapshot lives under.
pub const CART_KEY_PREFIX: &str = "cart";

/// Where the cart store loads its initial state from and saves to.
///
/// The store calls `load` once when it is initialized and `save` after
/// every mutation.
pub trait CartPersistence {
    /// Read the saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError>;
}

impl<T: CartPersistence + ?Sized> CartPersistence for &T {
    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        (**self).save(snapshot)
    }
}

impl<T: CartPersistence + ?Sized> CartPersistence for Box<T> {
    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        (**self).save(snapshot)
    }
}

/// Persists the cart as JSON in a key-value [`Cache`].
///
/// The snapshot is stored under `cart:<namespace>`.
#[derive(Debug)]
pub struct CachePersistence<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CachePersistence<S> {
    /// Store carts for `namespace` in `store`.
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            cache: Cache::new(store),
            key: cache_key!(CART_KEY_PREFIX, namespace),
        }
    }

    /// Storage key of the snapshot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying cache.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }
}

impl<S: KeyValueStore> CartPersistence for CachePersistence<S> {
    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        Ok(self.cache.get(&self.key)?)
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        Ok(self.cache.set(&self.key, snapshot)?)
    }
}

/// Keeps the last saved snapshot in memory.
///
/// Useful for ephemeral sessions and as a test double: it can be seeded
/// with a snapshot and told to fail writes.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    saved: Mutex<Option<CartSnapshot>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryPersistence {
    /// Nothing saved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `snapshot` already saved.
    pub fn seeded(snapshot: CartSnapshot) -> Self {
        Self {
            saved: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Last successfully saved snapshot.
    pub fn saved(&self) -> Option<CartSnapshot> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }

    /// Number of successful writes.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CartPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<CartSnapshot>, CommerceError> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| CommerceError::CacheError("memory persistence lock poisoned".into()))?;
        Ok(saved.clone())
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CommerceError::CacheError("writes disabled".into()));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| CommerceError::CacheError("memory persistence lock poisoned".into()))?;
        *saved = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::catalog::ProductSnapshot;
    use crate::money::{Currency, Money};
    use atelier_cache::{FileStore, MemoryStore};

    fn snapshot() -> CartSnapshot {
        let framed = ProductSnapshot::new(1u64, "Framed Print", "/a.jpg", Money::new(1000, Currency::USD));
        let commission = ProductSnapshot::new(2u64, "Commission", "/b.jpg", Money::zero(Currency::USD));
        CartSnapshot::new(
            Currency::USD,
            vec![
                CartItem::new(&framed, 2),
                CartItem::preorder(&commission, Some("please rush")),
            ],
        )
    }

    #[test]
    fn test_cache_persistence_key() {
        let persistence = CachePersistence::new(MemoryStore::new(), "gallery");
        assert_eq!(persistence.key(), "cart:gallery");
    }

    #[test]
    fn test_cache_persistence_empty_loads_none() {
        let persistence = CachePersistence::new(MemoryStore::new(), "default");
        assert_eq!(persistence.load().unwrap(), None);
    }

    #[test]
    fn test_cache_persistence_roundtrip() {
        let persistence = CachePersistence::new(MemoryStore::new(), "default");
        persistence.save(&snapshot()).unwrap();

        assert_eq!(persistence.load().unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_file_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        CachePersistence::new(FileStore::open(dir.path()).unwrap(), "default")
            .save(&snapshot())
            .unwrap();

        let reopened = CachePersistence::new(FileStore::open(dir.path()).unwrap(), "default");
        assert_eq!(reopened.load().unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_corrupt_entry_is_error() {
        let store = MemoryStore::new();
        store.set("cart:default", b"not json").unwrap();
        let persistence = CachePersistence::new(store, "default");

        assert!(matches!(persistence.load(), Err(CommerceError::CacheError(_))));
    }

    #[test]
    fn test_memory_persistence_counts_saves() {
        let persistence = MemoryPersistence::new();
        persistence.save(&snapshot()).unwrap();
        persistence.save(&snapshot()).unwrap();

        assert_eq!(persistence.save_count(), 2);
        assert_eq!(persistence.saved(), Some(snapshot()));
    }

    #[test]
    fn test_memory_persistence_failing_writes() {
        let persistence = MemoryPersistence::seeded(CartSnapshot::empty(Currency::USD));
        persistence.set_fail_writes(true);

        assert!(persistence.save(&snapshot()).is_err());
        assert_eq!(persistence.save_count(), 0);
        assert_eq!(persistence.saved(), Some(CartSnapshot::empty(Currency::USD)));
    }
}
