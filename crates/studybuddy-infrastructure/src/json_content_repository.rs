//! JSON-backed content board (`content.json`).

use std::path::{Path, PathBuf};
use studybuddy_core::content::{ContentBoard, ContentMutation, ContentRepository};
use studybuddy_core::error::{Result, StudyBuddyError};

use crate::paths::{ServiceType, StudyBuddyPaths};
use crate::storage::AtomicJsonFile;

#[derive(Debug, Clone)]
pub struct JsonContentRepository {
    storage: AtomicJsonFile<ContentBoard>,
}

impl JsonContentRepository {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = StudyBuddyPaths::new(base_path).get_path(ServiceType::Content)?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: AtomicJsonFile::new(path),
        }
    }
}

impl ContentRepository for JsonContentRepository {
    fn load(&self) -> ContentBoard {
        match self.storage.load() {
            Ok(board) => board.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "content board unreadable, using an empty board");
                ContentBoard::default()
            }
        }
    }

    fn save(&self, board: &ContentBoard) -> Result<()> {
        Ok(self.storage.save(board)?)
    }

    fn update(&self, mutation: ContentMutation<'_>) -> Result<ContentBoard> {
        self.storage
            .update(ContentBoard::default(), |board| {
                mutation(board)?;
                Ok::<(), StudyBuddyError>(())
            })
    }
}
