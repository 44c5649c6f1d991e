//! Publishing the merged guide
//!
//! A publish failure is reported as a [`PublishOutcome`], never as an error:
//! the written file stays valid whatever happens here.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

pub mod git;

pub use git::GitPublisher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    /// Content identical to the last published version, nothing committed
    Unchanged,
    Disabled,
    Failed(String),
}

impl PublishOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Unchanged => write!(f, "unchanged, nothing to publish"),
            Self::Disabled => write!(f, "disabled"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish the file at `path`. Must be a no-op when the content has not
    /// changed since the last publish.
    async fn publish(&self, path: &Path) -> PublishOutcome;
}

/// Publisher used when publishing is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl Publisher for NoopPublisher {
    async fn publish(&self, _path: &Path) -> PublishOutcome {
        PublishOutcome::Disabled
    }
}
