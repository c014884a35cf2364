//! Unit tests for the BookmarkStore public API.
//!
//! These tests drive `BookmarkStoreTrait` and the cascade helpers directly
//! against an in-memory `Collection`.

use extbookmarks::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use extbookmarks::types::bookmark::ResolvedMetadata;
use extbookmarks::types::collection::Collection;
use extbookmarks::types::errors::BookmarkError;
use extbookmarks::types::identifier::ExtensionId;

fn id(raw: &str) -> ExtensionId {
    ExtensionId::parse(raw).unwrap()
}

fn metadata(name: &str) -> ResolvedMetadata {
    ResolvedMetadata {
        display_name: name.to_string(),
        icon: None,
        download_count: "1,000,000".to_string(),
        rating: "4.5".to_string(),
        last_update: 1_700_000_000,
    }
}

/// A collection with "Default", "Linters", tag "py" and one Python bookmark.
fn seeded() -> Collection {
    let mut collection = Collection::default();
    collection.categories.push("Linters".to_string());
    collection.tags.push("py".to_string());
    BookmarkStore::new(&mut collection)
        .add_bookmark(id("ms-python.python"), "Default", metadata("Python"))
        .unwrap();
    collection
}

#[test]
fn test_add_bookmark_starts_untagged_without_note() {
    let collection = seeded();
    let bookmark = &collection.bookmarks[0];
    assert_eq!(bookmark.id, "ms-python.python");
    assert_eq!(bookmark.category, "Default");
    assert_eq!(bookmark.display_name, "Python");
    assert!(bookmark.tags.is_empty());
    assert!(bookmark.note.is_none());
    assert!(bookmark.date_added > 0);
}

#[test]
fn test_add_duplicate_is_rejected() {
    let mut collection = seeded();
    let before = collection.clone();
    let result = BookmarkStore::new(&mut collection).add_bookmark(
        id("ms-python.python"),
        "Linters",
        metadata("Python again"),
    );
    assert_eq!(result, Err(BookmarkError::Duplicate("ms-python.python".to_string())));
    assert_eq!(collection, before);
}

#[test]
fn test_add_into_unknown_category_is_rejected() {
    let mut collection = seeded();
    let result = BookmarkStore::new(&mut collection).add_bookmark(
        id("esbenp.prettier-vscode"),
        "Formatters",
        metadata("Prettier"),
    );
    assert_eq!(result, Err(BookmarkError::UnknownCategory("Formatters".to_string())));
    assert_eq!(collection.bookmarks.len(), 1);
}

#[test]
fn test_remove_bookmark() {
    let mut collection = seeded();
    let mut store = BookmarkStore::new(&mut collection);
    let removed = store.remove_bookmark(&id("ms-python.python")).unwrap();
    assert_eq!(removed.display_name, "Python");
    assert_eq!(
        store.remove_bookmark(&id("ms-python.python")),
        Err(BookmarkError::NotFound("ms-python.python".to_string()))
    );
    assert!(collection.bookmarks.is_empty());
    assert_eq!(collection.categories.len(), 2);
}

#[test]
fn test_set_category_reports_no_op() {
    let mut collection = seeded();
    let mut store = BookmarkStore::new(&mut collection);
    let python = id("ms-python.python");

    assert_eq!(store.set_category(&python, "Default"), Ok(false));
    assert_eq!(store.set_category(&python, "Linters"), Ok(true));
    assert_eq!(
        store.set_category(&python, "linters"),
        Err(BookmarkError::UnknownCategory("linters".to_string()))
    );
    assert_eq!(store.find_bookmark(&python).unwrap().category, "Linters");
}

#[test]
fn test_attach_and_detach_tag() {
    let mut collection = seeded();
    let mut store = BookmarkStore::new(&mut collection);
    let python = id("ms-python.python");

    store.attach_tag(&python, " PY ").unwrap();
    assert_eq!(
        store.attach_tag(&python, "py"),
        Err(BookmarkError::DuplicateTag("py".to_string()))
    );
    assert_eq!(
        store.attach_tag(&python, "lint"),
        Err(BookmarkError::UnknownTag("lint".to_string()))
    );
    assert!(store.find_bookmark(&python).unwrap().tags.contains("py"));

    store.detach_tag(&python, "py").unwrap();
    assert_eq!(
        store.detach_tag(&python, "py"),
        Err(BookmarkError::TagNotAttached("py".to_string()))
    );
}

#[test]
fn test_tag_matching_ignores_imported_case() {
    let mut collection = seeded();
    collection.tags.push("Lint".to_string());
    let mut store = BookmarkStore::new(&mut collection);
    let python = id("ms-python.python");

    store.attach_tag(&python, "lint").unwrap();
    assert!(store.find_bookmark(&python).unwrap().tags.contains("Lint"));
    assert_eq!(
        store.attach_tag(&python, "LINT"),
        Err(BookmarkError::DuplicateTag("Lint".to_string()))
    );
    store.detach_tag(&python, "lint").unwrap();
    assert!(store.find_bookmark(&python).unwrap().tags.is_empty());
}

#[test]
fn test_tag_operations_on_missing_bookmark() {
    let mut collection = seeded();
    let mut store = BookmarkStore::new(&mut collection);
    let ghost = id("nobody.nothing");
    assert_eq!(
        store.attach_tag(&ghost, "py"),
        Err(BookmarkError::NotFound("nobody.nothing".to_string()))
    );
    assert_eq!(
        store.detach_tag(&ghost, "py"),
        Err(BookmarkError::NotFound("nobody.nothing".to_string()))
    );
}

#[test]
fn test_set_and_clear_note() {
    let mut collection = seeded();
    let mut store = BookmarkStore::new(&mut collection);
    let python = id("ms-python.python");

    store.set_note(&python, "first").unwrap();
    store.set_note(&python, "second").unwrap();
    assert_eq!(store.find_bookmark(&python).unwrap().note.as_deref(), Some("second"));

    store.clear_note(&python).unwrap();
    store.clear_note(&python).unwrap();
    assert!(store.find_bookmark(&python).unwrap().note.is_none());

    assert!(matches!(store.set_note(&id("a.b"), "x"), Err(BookmarkError::NotFound(_))));
    assert!(matches!(store.clear_note(&id("a.b")), Err(BookmarkError::NotFound(_))));
}

#[test]
fn test_find_is_exact_match() {
    let mut collection = seeded();
    let store = BookmarkStore::new(&mut collection);
    assert!(store.find_bookmark(&id("ms-python.python")).is_ok());
    assert!(matches!(
        store.find_bookmark(&id("MS-Python.python")),
        Err(BookmarkError::NotFound(_))
    ));
}

#[test]
fn test_cascade_helpers() {
    let mut collection = seeded();
    collection.tags.push("lint".to_string());
    let mut store = BookmarkStore::new(&mut collection);
    let python = id("ms-python.python");
    store.set_category(&python, "Linters").unwrap();
    store.attach_tag(&python, "py").unwrap();
    store.attach_tag(&python, "lint").unwrap();

    assert_eq!(store.reassign_category("Linters", "Tools"), 1);
    assert_eq!(store.drop_category("Tools"), 1);
    assert_eq!(store.drop_category("Tools"), 0);

    // Renaming onto an attached tag collapses the two into one.
    assert_eq!(store.rename_tag("py", "lint"), 1);
    assert_eq!(store.drop_tag("lint"), 1);

    let bookmark = store.find_bookmark(&python).unwrap();
    assert_eq!(bookmark.category, "Default");
    assert!(bookmark.tags.is_empty());
}
