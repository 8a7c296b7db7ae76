//! # Item Tag Access
//!
//! Reads and writes item metadata without knowing which host release is
//! running. Callers see one contract:
//!
//! - `get_tag(item)` returns the compound, or `None`
//! - `has_tag(item)` is `get_tag(item).is_some()`
//! - `set_tag(item, tag)` replaces the compound
//!
//! Behind it, reading goes through `tag` (field) → `getTag` → `getOrCreateTag`
//! and writing through `tag` (field) → `setTag`. Whichever resolves first is
//! cached by the [`CompatibilityAccessor`]; if none does, reads return `None`
//! and writes do nothing.

use std::sync::Arc;

use volley_shared::CompoundTag;

use crate::accessor::{Binding, CompatibilityAccessor};
use crate::strategy::{AttributeKey, StrategyChain};

/// Reads the compound tag of an item.
pub type TagReader<I> = Arc<dyn Fn(&I) -> Option<CompoundTag> + Send + Sync>;

/// Replaces the compound tag of an item.
pub type TagWriter<I> = Arc<dyn Fn(&mut I, CompoundTag) + Send + Sync>;

/// Direct handle to the item's internal tag field.
pub struct TagField<I> {
    /// Field read
    pub read: TagReader<I>,
    /// Field write
    pub write: TagWriter<I>,
}

impl<I> Clone for TagField<I> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

/// What the host runtime exposes about its item type.
///
/// Each lookup returns `None` when the running release has no such member.
pub trait ItemRuntime: Send + Sync {
    /// Host item stack type.
    type Item: 'static;

    /// Opens the internal tag field, if the release has one and it is reachable.
    fn tag_field(&self) -> Option<TagField<Self::Item>>;

    /// Finds a tag-reading method by name.
    fn tag_reader(&self, name: &str) -> Option<TagReader<Self::Item>>;

    /// Finds a tag-writing method by name.
    fn tag_writer(&self, name: &str) -> Option<TagWriter<Self::Item>>;
}

const READ_ATTRIBUTE: &str = "tag";
const WRITE_ATTRIBUTE: &str = "setTag";

/// Version-agnostic item metadata access.
pub struct ItemTags<'a, R: ItemRuntime> {
    runtime: &'a R,
    accessor: &'a CompatibilityAccessor,
}

impl<'a, R: ItemRuntime> ItemTags<'a, R> {
    /// Uses the process-wide accessor.
    #[must_use]
    pub fn new(runtime: &'a R) -> Self {
        Self::with_accessor(runtime, CompatibilityAccessor::global())
    }

    /// Uses a specific accessor.
    #[must_use]
    pub fn with_accessor(runtime: &'a R, accessor: &'a CompatibilityAccessor) -> Self {
        Self { runtime, accessor }
    }

    /// Returns the item's compound tag, or `None` if it has none or no
    /// strategy can read it on this release.
    #[must_use]
    pub fn get_tag(&self, item: &R::Item) -> Option<CompoundTag> {
        let binding = self.reader();
        let read = binding.accessor()?;
        read(item)
    }

    /// Returns true if the item carries a compound tag.
    #[must_use]
    pub fn has_tag(&self, item: &R::Item) -> bool {
        self.get_tag(item).is_some()
    }

    /// Replaces the item's compound tag. Returns false if the write was
    /// skipped because no strategy can write tags on this release.
    pub fn set_tag(&self, item: &mut R::Item, tag: CompoundTag) -> bool {
        let binding = self.writer();
        match binding.accessor() {
            Some(write) => {
                write(item, tag);
                true
            }
            None => false,
        }
    }

    fn reader(&self) -> Arc<Binding<TagReader<R::Item>>> {
        let runtime = self.runtime;
        self.accessor.binding(key::<R>(READ_ATTRIBUTE), move || {
            StrategyChain::new()
                .direct_field("tag", move || runtime.tag_field().map(|field| field.read))
                .primary_accessor("getTag", move || runtime.tag_reader("getTag"))
                .legacy_accessor("getOrCreateTag", move || runtime.tag_reader("getOrCreateTag"))
        })
    }

    fn writer(&self) -> Arc<Binding<TagWriter<R::Item>>> {
        let runtime = self.runtime;
        self.accessor.binding(key::<R>(WRITE_ATTRIBUTE), move || {
            StrategyChain::new()
                .direct_field("tag", move || runtime.tag_field().map(|field| field.write))
                .primary_accessor("setTag", move || runtime.tag_writer("setTag"))
        })
    }
}

fn key<R: ItemRuntime>(attribute: &'static str) -> AttributeKey {
    AttributeKey::new(std::any::type_name::<R::Item>(), attribute)
}
