use std::fmt;

// === IdentifierError ===

/// Errors raised while normalizing a raw extension identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierError {
    /// The input was empty or whitespace-only.
    Blank,
    /// The input is not of the form `<publisher>.<name>`.
    Malformed(String),
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::Blank => write!(f, "Invalid identifier: input is blank"),
            IdentifierError::Malformed(raw) => write!(
                f,
                "Invalid identifier: '{}' is not of the form publisher.name",
                raw
            ),
        }
    }
}

impl std::error::Error for IdentifierError {}

// === PersistError ===

/// Errors raised by the persistence collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistError {
    /// Database operation failed.
    DatabaseError(String),
    /// Stored data could not be encoded or decoded.
    SerializationError(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::DatabaseError(msg) => write!(f, "Persistence database error: {}", msg),
            PersistError::SerializationError(msg) => {
                write!(f, "Persistence serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PersistError {}

impl From<rusqlite::Error> for PersistError {
    fn from(e: rusqlite::Error) -> Self {
        PersistError::DatabaseError(e.to_string())
    }
}

// === ResolveError ===

/// Errors raised by the metadata resolver collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The marketplace has no extension with this identifier.
    NotFound(String),
    /// The lookup itself failed (transport, HTTP status or decoding).
    LookupFailed(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotFound(id) => write!(f, "Extension not found: {}", id),
            ResolveError::LookupFailed(msg) => write!(f, "Extension lookup failed: {}", msg),
        }
    }
}

impl std::error::Error for ResolveError {}

// === BookmarkError ===

/// Errors related to bookmark store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkError {
    /// The identifier could not be normalized.
    InvalidIdentifier(IdentifierError),
    /// A bookmark with the given ID already exists.
    Duplicate(String),
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// The target category does not exist.
    UnknownCategory(String),
    /// The tag is not registered.
    UnknownTag(String),
    /// The tag is already attached to the bookmark.
    DuplicateTag(String),
    /// The tag is not attached to the bookmark.
    TagNotAttached(String),
    /// The marketplace reported no such extension.
    ExtensionNotFound(String),
    /// Metadata lookup failed.
    LookupFailed(String),
    /// Persisting the change failed; nothing was applied.
    PersistFailed(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::InvalidIdentifier(e) => write!(f, "{}", e),
            BookmarkError::Duplicate(id) => write!(f, "Bookmark already exists: {}", id),
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::UnknownCategory(name) => write!(f, "Unknown category: {}", name),
            BookmarkError::UnknownTag(name) => write!(f, "Unknown tag: {}", name),
            BookmarkError::DuplicateTag(name) => {
                write!(f, "Tag already attached to bookmark: {}", name)
            }
            BookmarkError::TagNotAttached(name) => {
                write!(f, "Tag not attached to bookmark: {}", name)
            }
            BookmarkError::ExtensionNotFound(id) => write!(f, "Extension not found: {}", id),
            BookmarkError::LookupFailed(msg) => write!(f, "Extension lookup failed: {}", msg),
            BookmarkError::PersistFailed(msg) => {
                write!(f, "Bookmark persistence failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

impl From<IdentifierError> for BookmarkError {
    fn from(e: IdentifierError) -> Self {
        BookmarkError::InvalidIdentifier(e)
    }
}

impl From<ResolveError> for BookmarkError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound(id) => BookmarkError::ExtensionNotFound(id),
            ResolveError::LookupFailed(msg) => BookmarkError::LookupFailed(msg),
        }
    }
}

impl From<PersistError> for BookmarkError {
    fn from(e: PersistError) -> Self {
        BookmarkError::PersistFailed(e.to_string())
    }
}

// === CategoryError ===

/// Errors related to category registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryError {
    /// The name is blank.
    InvalidName,
    /// A category with this name already exists.
    Duplicate(String),
    /// Category with the given name was not found.
    NotFound(String),
    /// The pinned `Default` category cannot be renamed or removed.
    Protected(String),
    /// The new name equals the old name.
    NoOpRename(String),
    /// Persisting the change failed; nothing was applied.
    PersistFailed(String),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryError::InvalidName => write!(f, "Invalid category name: name is blank"),
            CategoryError::Duplicate(name) => write!(f, "Category already exists: {}", name),
            CategoryError::NotFound(name) => write!(f, "Category not found: {}", name),
            CategoryError::Protected(name) => write!(f, "Category is protected: {}", name),
            CategoryError::NoOpRename(name) => {
                write!(f, "Category rename has no effect: {}", name)
            }
            CategoryError::PersistFailed(msg) => {
                write!(f, "Category persistence failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for CategoryError {}

impl From<PersistError> for CategoryError {
    fn from(e: PersistError) -> Self {
        CategoryError::PersistFailed(e.to_string())
    }
}

// === TagError ===

/// Errors related to tag registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TagError {
    /// The name is blank.
    InvalidName,
    /// A tag with this name already exists.
    Duplicate(String),
    /// Tag with the given name was not found.
    NotFound(String),
    /// The new name equals the old name.
    NoOpRename(String),
    /// Persisting the change failed; nothing was applied.
    PersistFailed(String),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::InvalidName => write!(f, "Invalid tag name: name is blank"),
            TagError::Duplicate(name) => write!(f, "Tag already exists: {}", name),
            TagError::NotFound(name) => write!(f, "Tag not found: {}", name),
            TagError::NoOpRename(name) => write!(f, "Tag rename has no effect: {}", name),
            TagError::PersistFailed(msg) => write!(f, "Tag persistence failed: {}", msg),
        }
    }
}

impl std::error::Error for TagError {}

impl From<PersistError> for TagError {
    fn from(e: PersistError) -> Self {
        TagError::PersistFailed(e.to_string())
    }
}

// === ViewError ===

/// Errors raised by read-only view derivations.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    /// Filtering by tag was requested while the tag registry is empty.
    NoTagsAvailable,
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::NoTagsAvailable => write!(f, "No tags available to filter by"),
        }
    }
}

impl std::error::Error for ViewError {}

// === SnapshotError ===

/// Errors related to collection export and import.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// The collection holds nothing beyond its initial state.
    NothingToExport,
    /// The snapshot does not have the expected shape.
    Malformed(String),
    /// Reading or writing the snapshot file failed.
    IoError(String),
    /// Persisting the merged collection failed; nothing was applied.
    PersistFailed(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NothingToExport => write!(f, "Nothing to export"),
            SnapshotError::Malformed(msg) => write!(f, "Malformed snapshot: {}", msg),
            SnapshotError::IoError(msg) => write!(f, "Snapshot I/O error: {}", msg),
            SnapshotError::PersistFailed(msg) => {
                write!(f, "Snapshot persistence failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<PersistError> for SnapshotError {
    fn from(e: PersistError) -> Self {
        SnapshotError::PersistFailed(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
