//! JSON file post feed

use async_trait::async_trait;
use contentflow_domain::{FeedError, PostDraft, PostFeed};
use std::path::{Path, PathBuf};

/// Feed reading a JSON array of post drafts from disk
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PostFeed for JsonFileFeed {
    async fn load(&self) -> Result<Vec<PostDraft>, FeedError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            FeedError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", self.path.display(), e),
            ))
        })?;

        let drafts: Vec<PostDraft> =
            serde_json::from_str(&raw).map_err(|e| FeedError::Parse {
                source_name: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %self.path.display(),
            count = drafts.len(),
            "Loaded posts from file"
        );

        Ok(drafts)
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
