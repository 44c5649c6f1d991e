use serde::{Deserialize, Serialize};

use crate::utils::url::UrlUtils;
use crate::xmltv::Element;

pub mod report;

pub use report::{RunReport, SourceOutcome, SourceReport};

/// One configured EPG feed
///
/// `channels` is the allowlist; an empty list keeps every channel and
/// programme of the feed. Order of sources in the configuration decides
/// which source wins when the same channel id appears more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub url: String,
    /// Offset token written into every programme timestamp, e.g. `-0600`
    pub target_offset: String,
    #[serde(default, alias = "allowlist")]
    pub channels: Vec<String>,
    /// Label used in log output only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SourceSpec {
    pub fn new<U: Into<String>, O: Into<String>>(url: U, target_offset: O, channels: Vec<String>) -> Self {
        Self {
            url: url.into(),
            target_offset: target_offset.into(),
            channels,
            name: None,
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for logs: the configured label, or the URL with credentials masked
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => UrlUtils::obfuscate_credentials(&self.url),
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.channels.is_empty()
    }

    pub fn filter_summary(&self) -> String {
        if self.is_filtered() {
            format!("filtered to {} channels", self.channels.len())
        } else {
            "all channels".to_string()
        }
    }
}

/// Channels and programmes one source contributes to the merged guide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceContribution {
    pub channels: Vec<Element>,
    pub programmes: Vec<Element>,
}

impl SourceContribution {
    pub fn new(channels: Vec<Element>, programmes: Vec<Element>) -> Self {
        Self {
            channels,
            programmes,
        }
    }
}

/// Result of merging every successful source, ready for serialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedDocument {
    pub channels: Vec<Element>,
    pub programmes: Vec<Element>,
}

impl AggregatedDocument {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn programme_count(&self) -> usize {
        self.programmes.len()
    }
}
