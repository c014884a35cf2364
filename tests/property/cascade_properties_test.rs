//! Property-based tests for registry cascades.
//!
//! Removing a category never removes a bookmark and sends every affected
//! bookmark to "Default". Renaming a tag onto one a bookmark already carries
//! leaves exactly one occurrence.

use extbookmarks::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use extbookmarks::managers::category_registry::{CategoryRegistry, CategoryRegistryTrait};
use extbookmarks::managers::tag_registry::{TagRegistry, TagRegistryTrait};
use extbookmarks::types::bookmark::ResolvedMetadata;
use extbookmarks::types::collection::Collection;
use extbookmarks::types::identifier::ExtensionId;
use proptest::prelude::*;

const CATEGORIES: [&str; 3] = ["Linters", "Themes", "Languages"];
const TAGS: [&str; 3] = ["py", "dark", "lsp"];

fn metadata(name: &str) -> ResolvedMetadata {
    ResolvedMetadata {
        display_name: name.to_string(),
        icon: None,
        download_count: "0".to_string(),
        rating: "0.0".to_string(),
        last_update: 0,
    }
}

/// Each bookmark gets a category index (3 = "Default") and a tag bitmask.
fn arb_layout() -> impl Strategy<Value = Vec<(usize, u8)>> {
    proptest::collection::vec((0usize..4, 0u8..8), 0..12)
}

fn build(layout: &[(usize, u8)]) -> Collection {
    let mut collection = Collection::default();
    let mut categories = CategoryRegistry::new(&mut collection);
    for name in CATEGORIES {
        categories.add_category(name).unwrap();
    }
    let mut tags = TagRegistry::new(&mut collection);
    for name in TAGS {
        tags.add_tag(name).unwrap();
    }

    let mut store = BookmarkStore::new(&mut collection);
    for (i, (category, mask)) in layout.iter().enumerate() {
        let id = ExtensionId::parse(&format!("pub{}.ext{}", i, i)).unwrap();
        let category = CATEGORIES.get(*category).copied().unwrap_or("Default");
        store.add_bookmark(id.clone(), category, metadata(&format!("Ext {}", i))).unwrap();
        for (bit, tag) in TAGS.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                store.attach_tag(&id, tag).unwrap();
            }
        }
    }
    collection
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn removing_a_category_only_reassigns(layout in arb_layout(), victim in 0usize..3) {
        let mut collection = build(&layout);
        let name = CATEGORIES[victim];
        let before = collection.bookmarks.clone();

        let reassigned = CategoryRegistry::new(&mut collection).remove_category(name).unwrap();

        prop_assert_eq!(collection.bookmarks.len(), before.len());
        prop_assert_eq!(reassigned, before.iter().filter(|b| b.category == name).count());
        for (old, new) in before.iter().zip(collection.bookmarks.iter()) {
            prop_assert_eq!(&old.id, &new.id);
            if old.category == name {
                prop_assert_eq!(new.category.as_str(), "Default");
            } else {
                prop_assert_eq!(&old.category, &new.category);
            }
        }
        prop_assert!(collection.bookmarks.iter().all(|b| collection.has_category(&b.category)));
    }

    #[test]
    fn renaming_a_tag_never_duplicates(layout in arb_layout(), from in 0usize..3, stale in any::<bool>()) {
        let mut collection = build(&layout);
        let old = TAGS[from];
        let new = "merged";
        if stale {
            // Some bookmarks already carry the target name without it being registered.
            for bookmark in collection.bookmarks.iter_mut().step_by(2) {
                bookmark.tags.insert(new.to_string());
            }
        }
        let before = collection.bookmarks.clone();

        TagRegistry::new(&mut collection).rename_tag(old, new).unwrap();

        for (prev, now) in before.iter().zip(collection.bookmarks.iter()) {
            prop_assert!(!now.tags.contains(old));
            let had_either = prev.tags.contains(old) || prev.tags.contains(new);
            prop_assert_eq!(now.tags.contains(new), had_either);
            let expected_len = prev.tags.len() - usize::from(prev.tags.contains(old) && prev.tags.contains(new));
            prop_assert_eq!(now.tags.len(), expected_len);
        }
        prop_assert_eq!(collection.tags.iter().filter(|t| t.as_str() == new).count(), 1);
    }
}
