//! Content repository trait.

use crate::content::model::ContentBoard;
use crate::error::Result;

/// A mutation applied to the content board.
pub type ContentMutation<'a> = &'a mut dyn FnMut(&mut ContentBoard) -> Result<()>;

/// Repository for admin-published content and the help line.
pub trait ContentRepository: Send + Sync {
    /// Returns the stored board, or an empty board when none is readable.
    fn load(&self) -> ContentBoard;

    fn save(&self, board: &ContentBoard) -> Result<()>;

    /// Read-modify-write under the store's write lock.
    fn update(&self, mutation: ContentMutation<'_>) -> Result<ContentBoard>;
}
