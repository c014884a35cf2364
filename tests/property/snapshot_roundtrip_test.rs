//! Property-based tests for snapshot export/import.
//!
//! Exporting then importing into an empty store reproduces categories,
//! bookmarks and tags, and importing the same snapshot twice is idempotent.

use std::collections::BTreeSet;

use extbookmarks::database::MemoryCollectionStore;
use extbookmarks::managers::collection_manager::CollectionManager;
use extbookmarks::services::collection_serializer::CollectionSerializer;
use extbookmarks::types::bookmark::{Bookmark, ResolvedMetadata};
use extbookmarks::types::collection::{Collection, SortOrder, DEFAULT_CATEGORY};
use extbookmarks::types::identifier::ExtensionId;
use proptest::prelude::*;

fn arb_collection() -> impl Strategy<Value = Collection> {
    (
        proptest::collection::btree_set("[A-Z][a-z]{2,8}", 0..4),
        proptest::collection::btree_set("[a-z]{2,6}", 0..4),
        proptest::collection::vec(("[a-z]{1,6}", "[A-Za-z ]{1,12}", any::<u32>(), proptest::option::of("[a-z ]{0,20}")), 0..6),
    )
        .prop_map(|(categories, tags, records)| {
            let mut collection = Collection::default();
            collection.categories.extend(categories.into_iter().filter(|c| c != DEFAULT_CATEGORY));
            collection.tags.extend(tags);

            for (i, (name, display, added, note)) in records.into_iter().enumerate() {
                let id = ExtensionId::parse(&format!("p{}.{}", i, name)).unwrap();
                let metadata = ResolvedMetadata {
                    display_name: display,
                    icon: None,
                    download_count: format!("{}", added % 1000),
                    rating: "3.5".to_string(),
                    last_update: i64::from(added),
                };
                let category = collection.categories[i % collection.categories.len()].clone();
                let mut bookmark = Bookmark::new(id, &category, metadata, i64::from(added));
                let tag_pool: Vec<String> = collection.tags.clone();
                bookmark.tags = tag_pool.into_iter().take(i % 3).collect::<BTreeSet<_>>();
                bookmark.note = note;
                collection.bookmarks.push(bookmark);
            }
            collection.sort_order = SortOrder::OldestFirst;
            collection
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn export_then_import_reproduces_collection(original in arb_collection()) {
        prop_assume!(!original.is_pristine());
        let snapshot = CollectionSerializer::export(&original).unwrap();
        let bytes = CollectionSerializer::to_json_bytes(&snapshot).unwrap();

        let mut target = CollectionManager::open(Box::new(MemoryCollectionStore::new())).unwrap();
        target.import_snapshot(CollectionSerializer::from_json_bytes(&bytes).unwrap()).unwrap();

        let restored = target.collection();
        prop_assert_eq!(&restored.categories, &original.categories);
        prop_assert_eq!(&restored.bookmarks, &original.bookmarks);
        prop_assert_eq!(&restored.tags, &original.tags);
    }

    #[test]
    fn importing_twice_is_idempotent(original in arb_collection(), existing in arb_collection()) {
        prop_assume!(!original.is_pristine());
        let snapshot = CollectionSerializer::export(&original).unwrap();

        let mut target = CollectionManager::open(Box::new(MemoryCollectionStore::with_collection(existing))).unwrap();
        target.import_snapshot(snapshot.clone()).unwrap();
        let after_first = target.collection().clone();

        let report = target.import_snapshot(snapshot).unwrap();
        prop_assert!(report.is_empty());
        prop_assert_eq!(target.collection(), &after_first);
    }
}
