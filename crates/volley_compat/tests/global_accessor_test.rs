//! Integration test for the process-wide binding cache.
//!
//! Only one test in this binary touches the global accessor, so attempt
//! counts are not disturbed by parallel tests.

use std::sync::Arc;
use std::thread;

use volley_compat::{CompatibilityAccessor, ItemTags, MockItem, MockItemRuntime};
use volley_shared::{CompoundTag, Tag};

#[test]
fn test_global_bindings_resolve_once_across_threads() {
    // Sealed field and no getTag: reads must land on the legacy accessor.
    let runtime = Arc::new(MockItemRuntime::with_methods(&["getOrCreateTag", "setTag"]));
    let global = CompatibilityAccessor::global();
    let before = global.attempt_count();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let runtime = Arc::clone(&runtime);
            thread::spawn(move || {
                let tags = ItemTags::new(runtime.as_ref());
                let mut item = MockItem::default();
                let mut tag = CompoundTag::new();
                tag.put("shot", Tag::int(i));
                assert!(tags.set_tag(&mut item, tag.clone()));
                assert_eq!(tags.get_tag(&item), Some(tag));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Reader: field, getTag, getOrCreateTag. Writer: field, setTag.
    assert_eq!(global.attempt_count() - before, 5);
    assert_eq!(global.len(), 2);
    assert!(std::ptr::eq(global, CompatibilityAccessor::global()));

    let tags = ItemTags::new(runtime.as_ref());
    assert!(!tags.has_tag(&MockItem::default()));
    assert_eq!(global.attempt_count() - before, 5);
}
