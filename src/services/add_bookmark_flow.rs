//! Add-bookmark flow.
//!
//! The multi-prompt "add bookmark" gesture as a state machine:
//! `AwaitIdentifier → AwaitCategory → Resolving → Committing → Done`.
//! A dismissed or emptied prompt moves to `Cancelled` with no side effect, and
//! every non-terminal state can be cancelled. Each step consumes the flow;
//! calling a step outside its state returns the flow unchanged.

use log::debug;

use crate::managers::collection_manager::CollectionManager;
use crate::services::metadata_resolver::MetadataResolver;
use crate::types::bookmark::{Bookmark, ResolvedMetadata};
use crate::types::collection::Collection;
use crate::types::errors::BookmarkError;
use crate::types::identifier::ExtensionId;

#[derive(Debug, Clone, PartialEq)]
pub enum AddBookmarkFlow {
    AwaitIdentifier,
    AwaitCategory {
        id: ExtensionId,
    },
    Resolving {
        id: ExtensionId,
        category: String,
    },
    Committing {
        id: ExtensionId,
        category: String,
        metadata: ResolvedMetadata,
    },
    Done(Bookmark),
    Cancelled,
}

impl Default for AddBookmarkFlow {
    fn default() -> Self {
        Self::start()
    }
}

/// A prompt answer, or `None` when the prompt was dismissed or left blank.
fn answered(input: Option<&str>) -> Option<&str> {
    input.filter(|s| !s.trim().is_empty())
}

impl AddBookmarkFlow {
    pub fn start() -> Self {
        AddBookmarkFlow::AwaitIdentifier
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AddBookmarkFlow::Done(_) | AddBookmarkFlow::Cancelled)
    }

    pub fn cancel(self) -> Self {
        if self.is_terminal() {
            self
        } else {
            debug!("add-bookmark flow cancelled");
            AddBookmarkFlow::Cancelled
        }
    }

    /// Takes the identifier prompt's answer.
    ///
    /// A dismissed or emptied prompt cancels. Otherwise the identifier is
    /// normalized and checked against `collection` before any lookup happens.
    pub fn submit_identifier(self, input: Option<&str>, collection: &Collection) -> Result<Self, BookmarkError> {
        match self {
            AddBookmarkFlow::AwaitIdentifier => {
                let Some(raw) = answered(input) else {
                    return Ok(self.cancel());
                };
                let id = ExtensionId::parse(raw)?;
                if collection.contains_bookmark(&id) {
                    return Err(BookmarkError::Duplicate(id.to_string()));
                }
                Ok(AddBookmarkFlow::AwaitCategory { id })
            }
            other => Ok(other),
        }
    }

    /// Takes the category prompt's answer; it must name an existing category.
    /// A dismissed or emptied prompt cancels.
    pub fn submit_category(self, input: Option<&str>, collection: &Collection) -> Result<Self, BookmarkError> {
        match self {
            AddBookmarkFlow::AwaitCategory { id } => {
                let Some(category) = answered(input) else {
                    debug!("add-bookmark flow cancelled");
                    return Ok(AddBookmarkFlow::Cancelled);
                };
                if !collection.has_category(category) {
                    return Err(BookmarkError::UnknownCategory(category.to_string()));
                }
                Ok(AddBookmarkFlow::Resolving {
                    id,
                    category: category.to_string(),
                })
            }
            other => Ok(other),
        }
    }

    /// Looks the extension up. Suspends at the resolver boundary.
    pub async fn resolve(self, resolver: &dyn MetadataResolver) -> Result<Self, BookmarkError> {
        match self {
            AddBookmarkFlow::Resolving { id, category } => {
                let metadata = resolver.resolve(&id).await?;
                Ok(AddBookmarkFlow::Committing {
                    id,
                    category,
                    metadata,
                })
            }
            other => Ok(other),
        }
    }

    /// Inserts the bookmark.
    ///
    /// The manager re-reads the stored collection, so a duplicate or a
    /// category removal that happened while resolving is still caught.
    pub fn commit(self, manager: &mut CollectionManager) -> Result<Self, BookmarkError> {
        match self {
            AddBookmarkFlow::Committing {
                id,
                category,
                metadata,
            } => {
                let bookmark = manager.add_bookmark(id, &category, metadata)?;
                Ok(AddBookmarkFlow::Done(bookmark))
            }
            other => Ok(other),
        }
    }
}
