//! # Compatibility Accessor
//!
//! Process-wide cache of resolved bindings, keyed by `(owner, attribute)`.
//!
//! ## Resolution
//!
//! The first caller for a key builds the strategy chain and tries it under
//! the cache's write lock, so every key is tried exactly once no matter how
//! many threads race for it. Everyone after that takes the read lock and
//! clones an `Arc`.
//!
//! A key whose chain produces nothing is cached as *unavailable*: it is
//! logged once, here, and every later lookup returns the same inert binding
//! without trying or logging again.
//!
//! Attempts run while the write lock is held and must not resolve other keys.

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::{CompatError, CompatResult};
use crate::strategy::{AttributeKey, StrategyChain, StrategyKind};

/// A resolved (or permanently unavailable) way of reaching one attribute.
#[derive(Debug)]
pub struct Binding<A> {
    key: AttributeKey,
    resolved: Option<Resolved<A>>,
}

#[derive(Debug)]
struct Resolved<A> {
    strategy: StrategyKind,
    member: String,
    accessor: A,
}

impl<A> Binding<A> {
    fn unavailable(key: AttributeKey) -> Self {
        Self { key, resolved: None }
    }

    /// Key this binding was resolved for.
    #[must_use]
    pub fn key(&self) -> AttributeKey {
        self.key
    }

    /// Returns true if a strategy resolved.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }

    /// Strategy that resolved.
    #[must_use]
    pub fn strategy(&self) -> Option<StrategyKind> {
        self.resolved.as_ref().map(|r| r.strategy)
    }

    /// Host member name that resolved.
    #[must_use]
    pub fn member(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.member.as_str())
    }

    /// The cached accessor handle, or `None` when unavailable.
    #[must_use]
    pub fn accessor(&self) -> Option<&A> {
        self.resolved.as_ref().map(|r| &r.accessor)
    }
}

type ErasedBinding = Arc<dyn Any + Send + Sync>;

/// Memoizing resolver for host-runtime attributes.
pub struct CompatibilityAccessor {
    bindings: RwLock<HashMap<AttributeKey, ErasedBinding>>,
    attempts: AtomicU64,
}

impl CompatibilityAccessor {
    /// Creates an empty accessor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
            attempts: AtomicU64::new(0),
        }
    }

    /// The process-wide accessor.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<CompatibilityAccessor> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Resolves `key`, trying `chain` only if the key has never been seen.
    ///
    /// # Errors
    ///
    /// [`CompatError::UnsupportedHostVersion`] if no strategy reached the
    /// attribute (now or on the first call), and
    /// [`CompatError::BindingTypeMismatch`] if the key was cached with a
    /// different accessor type.
    pub fn resolve<'c, A, F>(&self, key: AttributeKey, chain: F) -> CompatResult<Arc<Binding<A>>>
    where
        A: Send + Sync + 'static,
        F: FnOnce() -> StrategyChain<'c, A>,
    {
        let binding = self.lookup(key, chain)?;
        if binding.is_available() {
            Ok(binding)
        } else {
            Err(CompatError::UnsupportedHostVersion {
                owner: key.owner,
                attribute: key.attribute,
            })
        }
    }

    /// Like [`resolve`](Self::resolve), but folds every failure into an
    /// inert binding so callers can degrade to a no-op.
    pub fn binding<'c, A, F>(&self, key: AttributeKey, chain: F) -> Arc<Binding<A>>
    where
        A: Send + Sync + 'static,
        F: FnOnce() -> StrategyChain<'c, A>,
    {
        self.lookup(key, chain)
            .unwrap_or_else(|_| Arc::new(Binding::unavailable(key)))
    }

    /// Number of individual strategy attempts run so far.
    #[must_use]
    pub fn attempt_count(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Number of cached keys, available or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// Returns true if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }

    fn lookup<'c, A, F>(&self, key: AttributeKey, chain: F) -> CompatResult<Arc<Binding<A>>>
    where
        A: Send + Sync + 'static,
        F: FnOnce() -> StrategyChain<'c, A>,
    {
        if let Some(cached) = self.bindings.read().get(&key) {
            return downcast(key, Arc::clone(cached));
        }

        let mut bindings = self.bindings.write();
        // Another thread may have won the race between the two locks.
        if let Some(cached) = bindings.get(&key) {
            return downcast(key, Arc::clone(cached));
        }

        let binding = Arc::new(self.resolve_chain(key, chain()));
        bindings.insert(key, Arc::clone(&binding) as ErasedBinding);
        Ok(binding)
    }

    fn resolve_chain<A>(&self, key: AttributeKey, chain: StrategyChain<'_, A>) -> Binding<A> {
        for strategy in chain.into_ordered() {
            let (kind, member, attempt) = strategy.into_parts();
            self.attempts.fetch_add(1, Ordering::Relaxed);
            if let Some(accessor) = attempt() {
                tracing::debug!(
                    owner = key.owner,
                    attribute = key.attribute,
                    strategy = ?kind,
                    member = member.as_str(),
                    "compat binding resolved"
                );
                return Binding {
                    key,
                    resolved: Some(Resolved { strategy: kind, member, accessor }),
                };
            }
        }

        tracing::warn!(
            owner = key.owner,
            attribute = key.attribute,
            "no compat strategy resolved, feature disabled for this host version"
        );
        Binding::unavailable(key)
    }
}

impl Default for CompatibilityAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompatibilityAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibilityAccessor")
            .field("bindings", &self.len())
            .field("attempts", &self.attempt_count())
            .finish()
    }
}

fn downcast<A: Send + Sync + 'static>(
    key: AttributeKey,
    erased: ErasedBinding,
) -> CompatResult<Arc<Binding<A>>> {
    erased
        .downcast::<Binding<A>>()
        .map_err(|_| CompatError::BindingTypeMismatch {
            owner: key.owner,
            attribute: key.attribute,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    const KEY: AttributeKey = AttributeKey::new("ItemStack", "tag");

    #[test]
    fn test_first_success_wins() {
        let accessor = CompatibilityAccessor::new();
        let binding = accessor
            .resolve(KEY, || {
                StrategyChain::new()
                    .direct_field("tag", || None)
                    .primary_accessor("getTag", || Some(2_u32))
                    .legacy_accessor("getOrCreateTag", || Some(3_u32))
            })
            .unwrap();

        assert_eq!(binding.strategy(), Some(StrategyKind::PrimaryAccessor));
        assert_eq!(binding.member(), Some("getTag"));
        assert_eq!(binding.accessor(), Some(&2));
        // direct field + primary accessor, legacy never touched
        assert_eq!(accessor.attempt_count(), 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let accessor = CompatibilityAccessor::new();
        let chains_built = AtomicUsize::new(0);
        let chain = || {
            chains_built.fetch_add(1, Ordering::Relaxed);
            StrategyChain::new().direct_field("tag", || Some(7_u32))
        };

        let first = accessor.resolve(KEY, chain).unwrap();
        let second = accessor.resolve(KEY, chain).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.accessor(), Some(&7));
        assert_eq!(chains_built.load(Ordering::Relaxed), 1);
        assert_eq!(accessor.attempt_count(), 1);
        assert_eq!(accessor.len(), 1);
    }

    #[test]
    fn test_unresolved_is_cached_and_inert() {
        let accessor = CompatibilityAccessor::new();
        let chain = || {
            StrategyChain::<u32>::new()
                .direct_field("tag", || None)
                .primary_accessor("getTag", || None)
                .legacy_accessor("getOrCreateTag", || None)
        };

        let err = accessor.resolve(KEY, chain).unwrap_err();
        assert_eq!(
            err,
            CompatError::UnsupportedHostVersion { owner: "ItemStack", attribute: "tag" }
        );
        assert_eq!(accessor.attempt_count(), 3);

        // No re-trying, same outcome.
        assert!(accessor.resolve(KEY, chain).is_err());
        let inert = accessor.binding(KEY, chain);
        assert!(!inert.is_available());
        assert_eq!(inert.accessor(), None);
        assert_eq!(accessor.attempt_count(), 3);
    }

    #[test]
    fn test_type_mismatch() {
        let accessor = CompatibilityAccessor::new();
        accessor
            .resolve(KEY, || StrategyChain::new().direct_field("tag", || Some(1_u32)))
            .unwrap();

        let err = accessor
            .resolve(KEY, || StrategyChain::new().direct_field("tag", || Some("x")))
            .unwrap_err();
        assert!(matches!(err, CompatError::BindingTypeMismatch { .. }));

        let inert = accessor.binding(KEY, || StrategyChain::new().direct_field("tag", || Some("x")));
        assert!(!inert.is_available());
    }

    #[test]
    fn test_concurrent_first_resolution_attempts_once() {
        let accessor = Arc::new(CompatibilityAccessor::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let accessor = Arc::clone(&accessor);
                std::thread::spawn(move || {
                    accessor
                        .resolve(KEY, || StrategyChain::new().legacy_accessor("getOrCreateTag", || Some(9_u64)))
                        .map(|b| *b.accessor().unwrap())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(9));
        }
        assert_eq!(accessor.attempt_count(), 1);
    }
}
