//! # Resolution Strategies
//!
//! A host release exposes each internal attribute in one of a few ways: as a
//! field that can be opened directly, through its current accessor name, or
//! through the name an older release used. A [`StrategyChain`] lists those
//! ways for one attribute; the accessor attempts them in [`StrategyKind`]
//! order and keeps the first that answers.
//!
//! ```text
//! DirectField("tag") ──miss──▶ PrimaryAccessor("getTag") ──miss──▶ LegacyAccessor("getOrCreateTag")
//!        │hit                          │hit                                │hit
//!        ▼                             ▼                                   ▼
//!                         Binding<A> (cached for the process)
//! ```

/// How a binding reaches its attribute. Trying order follows declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrategyKind {
    /// Internal field opened directly.
    DirectField,
    /// Accessor under its current name.
    PrimaryAccessor,
    /// Accessor under a name from an older release.
    LegacyAccessor,
}

/// Cache key: owning host type plus attribute name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeKey {
    /// Owning host type.
    pub owner: &'static str,
    /// Attribute name.
    pub attribute: &'static str,
}

impl AttributeKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(owner: &'static str, attribute: &'static str) -> Self {
        Self { owner, attribute }
    }
}

type Attempt<'a, A> = Box<dyn FnOnce() -> Option<A> + 'a>;

/// One way of reaching an attribute.
pub struct Strategy<'a, A> {
    kind: StrategyKind,
    member: String,
    attempt: Attempt<'a, A>,
}

impl<'a, A> Strategy<'a, A> {
    /// Strategy kind.
    #[must_use]
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Host member this strategy looks for.
    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }

    pub(crate) fn into_parts(self) -> (StrategyKind, String, Attempt<'a, A>) {
        (self.kind, self.member, self.attempt)
    }
}

impl<A> std::fmt::Debug for Strategy<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("kind", &self.kind)
            .field("member", &self.member)
            .finish_non_exhaustive()
    }
}

/// Ordered list of strategies for one attribute.
#[derive(Debug)]
pub struct StrategyChain<'a, A> {
    strategies: Vec<Strategy<'a, A>>,
}

impl<'a, A> StrategyChain<'a, A> {
    /// Creates an empty chain. An empty chain never resolves.
    #[must_use]
    pub fn new() -> Self {
        Self { strategies: Vec::with_capacity(3) }
    }

    /// Adds a strategy of any kind.
    #[must_use]
    pub fn with(
        mut self,
        kind: StrategyKind,
        member: impl Into<String>,
        attempt: impl FnOnce() -> Option<A> + 'a,
    ) -> Self {
        self.strategies.push(Strategy {
            kind,
            member: member.into(),
            attempt: Box::new(attempt),
        });
        self
    }

    /// Adds a direct field strategy.
    #[must_use]
    pub fn direct_field(
        self,
        member: impl Into<String>,
        attempt: impl FnOnce() -> Option<A> + 'a,
    ) -> Self {
        self.with(StrategyKind::DirectField, member, attempt)
    }

    /// Adds a current-name accessor strategy.
    #[must_use]
    pub fn primary_accessor(
        self,
        member: impl Into<String>,
        attempt: impl FnOnce() -> Option<A> + 'a,
    ) -> Self {
        self.with(StrategyKind::PrimaryAccessor, member, attempt)
    }

    /// Adds an old-name accessor strategy.
    #[must_use]
    pub fn legacy_accessor(
        self,
        member: impl Into<String>,
        attempt: impl FnOnce() -> Option<A> + 'a,
    ) -> Self {
        self.with(StrategyKind::LegacyAccessor, member, attempt)
    }

    /// Number of strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the chain has no strategies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategies in trying order. Ties keep insertion order.
    pub(crate) fn into_ordered(mut self) -> Vec<Strategy<'a, A>> {
        self.strategies.sort_by_key(Strategy::kind);
        self.strategies
    }
}

impl<A> Default for StrategyChain<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_orders_by_kind() {
        let chain: StrategyChain<'_, u8> = StrategyChain::new()
            .legacy_accessor("getOrCreateTag", || None)
            .direct_field("tag", || None)
            .primary_accessor("getTag", || Some(1));

        assert_eq!(chain.len(), 3);
        let members: Vec<_> = chain
            .into_ordered()
            .iter()
            .map(|s| (s.kind(), s.member().to_owned()))
            .collect();
        assert_eq!(
            members,
            vec![
                (StrategyKind::DirectField, "tag".to_owned()),
                (StrategyKind::PrimaryAccessor, "getTag".to_owned()),
                (StrategyKind::LegacyAccessor, "getOrCreateTag".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_chain() {
        let chain: StrategyChain<'_, u8> = StrategyChain::default();
        assert!(chain.is_empty());
    }
}
