use extbookmarks::types::errors::*;

// === IdentifierError Tests ===

#[test]
fn identifier_error_display_variants() {
    assert_eq!(IdentifierError::Blank.to_string(), "Invalid identifier: input is blank");
    assert_eq!(
        IdentifierError::Malformed("python".to_string()).to_string(),
        "Invalid identifier: 'python' is not of the form publisher.name"
    );
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::Duplicate("ms-python.python".to_string()).to_string(),
        "Bookmark already exists: ms-python.python"
    );
    assert_eq!(
        BookmarkError::NotFound("a.b".to_string()).to_string(),
        "Bookmark not found: a.b"
    );
    assert_eq!(
        BookmarkError::UnknownCategory("Linters".to_string()).to_string(),
        "Unknown category: Linters"
    );
    assert_eq!(BookmarkError::UnknownTag("py".to_string()).to_string(), "Unknown tag: py");
    assert_eq!(
        BookmarkError::DuplicateTag("py".to_string()).to_string(),
        "Tag already attached to bookmark: py"
    );
    assert_eq!(
        BookmarkError::TagNotAttached("py".to_string()).to_string(),
        "Tag not attached to bookmark: py"
    );
    assert_eq!(
        BookmarkError::ExtensionNotFound("a.b".to_string()).to_string(),
        "Extension not found: a.b"
    );
    assert_eq!(
        BookmarkError::LookupFailed("timeout".to_string()).to_string(),
        "Extension lookup failed: timeout"
    );
    assert_eq!(
        BookmarkError::PersistFailed("disk full".to_string()).to_string(),
        "Bookmark persistence failed: disk full"
    );
}

#[test]
fn bookmark_error_wraps_identifier_error() {
    let err: BookmarkError = IdentifierError::Blank.into();
    assert_eq!(err, BookmarkError::InvalidIdentifier(IdentifierError::Blank));
    assert_eq!(err.to_string(), "Invalid identifier: input is blank");
}

#[test]
fn resolve_errors_keep_not_found_distinct_from_lookup_failure() {
    let not_found: BookmarkError = ResolveError::NotFound("a.b".to_string()).into();
    let failed: BookmarkError = ResolveError::LookupFailed("HTTP 503".to_string()).into();
    assert_eq!(not_found, BookmarkError::ExtensionNotFound("a.b".to_string()));
    assert_eq!(failed, BookmarkError::LookupFailed("HTTP 503".to_string()));
}

#[test]
fn persist_error_maps_to_each_component() {
    let cause = PersistError::DatabaseError("locked".to_string());
    let detail = cause.to_string();
    assert_eq!(detail, "Persistence database error: locked");

    assert_eq!(BookmarkError::from(cause.clone()), BookmarkError::PersistFailed(detail.clone()));
    assert_eq!(CategoryError::from(cause.clone()), CategoryError::PersistFailed(detail.clone()));
    assert_eq!(TagError::from(cause.clone()), TagError::PersistFailed(detail.clone()));
    assert_eq!(SnapshotError::from(cause), SnapshotError::PersistFailed(detail));
}

// === CategoryError / TagError Tests ===

#[test]
fn category_error_display_variants() {
    assert_eq!(CategoryError::InvalidName.to_string(), "Invalid category name: name is blank");
    assert_eq!(
        CategoryError::Duplicate("Linters".to_string()).to_string(),
        "Category already exists: Linters"
    );
    assert_eq!(
        CategoryError::NotFound("Themes".to_string()).to_string(),
        "Category not found: Themes"
    );
    assert_eq!(
        CategoryError::Protected("Default".to_string()).to_string(),
        "Category is protected: Default"
    );
    assert_eq!(
        CategoryError::NoOpRename("Linters".to_string()).to_string(),
        "Category rename has no effect: Linters"
    );
}

#[test]
fn tag_error_display_variants() {
    assert_eq!(TagError::InvalidName.to_string(), "Invalid tag name: name is blank");
    assert_eq!(TagError::Duplicate("py".to_string()).to_string(), "Tag already exists: py");
    assert_eq!(TagError::NotFound("py".to_string()).to_string(), "Tag not found: py");
    assert_eq!(
        TagError::NoOpRename("py".to_string()).to_string(),
        "Tag rename has no effect: py"
    );
}

// === ViewError / SnapshotError Tests ===

#[test]
fn view_and_snapshot_error_display_variants() {
    assert_eq!(ViewError::NoTagsAvailable.to_string(), "No tags available to filter by");
    assert_eq!(SnapshotError::NothingToExport.to_string(), "Nothing to export");
    assert_eq!(
        SnapshotError::Malformed("missing 'tags'".to_string()).to_string(),
        "Malformed snapshot: missing 'tags'"
    );
    assert_eq!(
        SnapshotError::IoError("permission denied".to_string()).to_string(),
        "Snapshot I/O error: permission denied"
    );
}

#[test]
fn rusqlite_error_converts_to_persist_error() {
    let err: PersistError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, PersistError::DatabaseError(_)));
}

#[test]
fn errors_implement_error_trait() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(IdentifierError::Blank),
        Box::new(BookmarkError::NotFound("a.b".to_string())),
        Box::new(CategoryError::InvalidName),
        Box::new(TagError::InvalidName),
        Box::new(ViewError::NoTagsAvailable),
        Box::new(SnapshotError::NothingToExport),
        Box::new(ResolveError::NotFound("a.b".to_string())),
        Box::new(PersistError::SerializationError("x".to_string())),
        Box::new(SettingsError::InvalidKey("x".to_string())),
    ];
    for err in errors {
        assert!(err.source().is_none());
        assert!(!err.to_string().is_empty());
    }
}
