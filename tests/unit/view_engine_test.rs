//! Unit tests for the ViewEngine projections.

use std::collections::BTreeSet;

use extbookmarks::services::view_engine::{CategorySummary, ViewEngine, ViewEngineTrait};
use extbookmarks::types::bookmark::{Bookmark, ResolvedMetadata};
use extbookmarks::types::collection::{Collection, SortOrder};
use extbookmarks::types::errors::ViewError;
use extbookmarks::types::identifier::ExtensionId;
use rstest::rstest;

fn bookmark(id: &str, name: &str, category: &str, date_added: i64) -> Bookmark {
    let metadata = ResolvedMetadata {
        display_name: name.to_string(),
        icon: None,
        download_count: "1,000,000".to_string(),
        rating: "4.5".to_string(),
        last_update: 1_700_000_000,
    };
    Bookmark::new(ExtensionId::parse(id).unwrap(), category, metadata, date_added)
}

fn collection(order: SortOrder) -> Collection {
    let mut python = bookmark("ms-python.python", "Python", "Languages", 300);
    python.tags = BTreeSet::from(["py".to_string()]);
    let mut pylance = bookmark("ms-python.vscode-pylance", "Pylance", "Languages", 100);
    pylance.tags = BTreeSet::from(["py".to_string(), "lsp".to_string()]);
    Collection {
        categories: vec!["Default".to_string(), "Languages".to_string(), "apps".to_string()],
        bookmarks: vec![
            python,
            bookmark("golang.go", "Go", "Languages", 200),
            pylance,
            bookmark("esbenp.prettier-vscode", "Prettier", "Default", 200),
        ],
        tags: vec!["py".to_string(), "lsp".to_string()],
        sort_order: order,
    }
}

fn names(bookmarks: &[&Bookmark]) -> Vec<String> {
    bookmarks.iter().map(|b| b.display_name.clone()).collect()
}

#[rstest]
#[case(SortOrder::AToZ, vec!["Go", "Pylance", "Python"])]
#[case(SortOrder::ZToA, vec!["Python", "Pylance", "Go"])]
#[case(SortOrder::NewestFirst, vec!["Python", "Go", "Pylance"])]
#[case(SortOrder::OldestFirst, vec!["Pylance", "Go", "Python"])]
fn test_list_bookmarks_follows_sort_order(#[case] order: SortOrder, #[case] expected: Vec<&str>) {
    let collection = collection(order);
    let view = ViewEngine::new(&collection);
    assert_eq!(names(&view.list_bookmarks("Languages")), expected);
}

#[test]
fn test_date_ties_keep_insertion_order() {
    let collection = collection(SortOrder::OldestFirst);
    let view = ViewEngine::new(&collection);
    // Go and Prettier share a timestamp; Go was inserted first.
    assert_eq!(names(&view.list_all()), vec!["Pylance", "Go", "Prettier", "Python"]);
}

#[test]
fn test_list_bookmarks_of_unknown_or_empty_category() {
    let collection = collection(SortOrder::AToZ);
    let view = ViewEngine::new(&collection);
    assert!(view.list_bookmarks("apps").is_empty());
    assert!(view.list_bookmarks("Nope").is_empty());
}

#[test]
fn test_list_categories_and_summary() {
    let collection = collection(SortOrder::AToZ);
    let view = ViewEngine::new(&collection);
    assert_eq!(view.list_categories(), vec!["Default", "apps", "Languages"]);
    assert_eq!(
        view.category_summary(),
        vec![
            CategorySummary { name: "Default".to_string(), count: 1 },
            CategorySummary { name: "apps".to_string(), count: 0 },
            CategorySummary { name: "Languages".to_string(), count: 3 },
        ]
    );
    assert_eq!(view.list_tags(), vec!["lsp", "py"]);
}

#[test]
fn test_search_is_case_insensitive_and_a_to_z() {
    let collection = collection(SortOrder::ZToA);
    let view = ViewEngine::new(&collection);
    assert_eq!(names(&view.search("PY")), vec!["Pylance", "Python"]);
    assert_eq!(names(&view.search("e")), vec!["Prettier", "Pylance"]);
    assert!(view.search("rust").is_empty());
}

#[test]
fn test_filter_by_tag() {
    let collection = collection(SortOrder::ZToA);
    let view = ViewEngine::new(&collection);
    assert_eq!(names(&view.filter_by_tag("Py").unwrap()), vec!["Pylance", "Python"]);
    assert_eq!(names(&view.filter_by_tag("lsp").unwrap()), vec!["Pylance"]);
    assert!(view.filter_by_tag("web").unwrap().is_empty());
}

#[test]
fn test_filter_by_tag_matches_imported_case() {
    let mut collection = collection(SortOrder::AToZ);
    collection.tags.push("Web".to_string());
    collection.bookmarks[0].tags.insert("Web".to_string());
    let view = ViewEngine::new(&collection);
    assert_eq!(names(&view.filter_by_tag("web").unwrap()), vec!["Python"]);
    assert_eq!(names(&view.filter_by_tag("WEB").unwrap()), vec!["Python"]);
}

#[test]
fn test_filter_by_tag_without_tags_fails() {
    let mut collection = collection(SortOrder::AToZ);
    collection.tags.clear();
    let before = collection.clone();
    let view = ViewEngine::new(&collection);
    assert_eq!(view.filter_by_tag("py"), Err(ViewError::NoTagsAvailable));
    assert_eq!(collection, before);
}

#[test]
fn test_render_details_full() {
    let mut b = bookmark("ms-python.python", "Python", "Languages", 1_710_263_121);
    b.tags = BTreeSet::from(["py".to_string(), "lsp".to_string()]);
    b.note = Some("daily driver".to_string());
    assert_eq!(
        ViewEngine::render_details(&b),
        "ID: ms-python.python\n\
         Name: Python\n\
         Category: Languages\n\
         Tags: lsp, py\n\
         Date Added: 2024-03-12 17:05:21 UTC\n\
         Downloads: 1,000,000\n\
         Rating: 4.5\n\
         Last Update: 2023-11-14 22:13:20 UTC\n\
         Note: daily driver"
    );
}

#[test]
fn test_render_details_omits_absent_fields() {
    let b = bookmark("golang.go", "Go", "Default", 0);
    let text = ViewEngine::render_details(&b);
    assert!(!text.contains("Tags:"));
    assert!(!text.contains("Note:"));
    assert!(text.starts_with("ID: golang.go\nName: Go\nCategory: Default\nDate Added: 1970-01-01 00:00:00 UTC"));
}
