//! Per-run outcome reporting

use std::path::PathBuf;

use tracing::{info, warn};

use crate::errors::SourceError;
use crate::publish::PublishOutcome;
use crate::utils::human_format::format_bytes;

/// What happened to a single source during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Merged {
        channels_added: usize,
        duplicate_channels: usize,
        programmes_added: usize,
    },
    Skipped(SourceError),
}

impl SourceOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub target_offset: String,
    pub filter_summary: String,
    pub outcome: SourceOutcome,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
    pub unique_channels: usize,
    pub programmes: usize,
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub publish: PublishOutcome,
}

impl RunReport {
    pub fn merged_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.outcome.is_merged()).count()
    }

    pub fn skipped_sources(&self) -> usize {
        self.sources.len() - self.merged_sources()
    }

    pub fn log_summary(&self) {
        info!(
            "EPG merge completed: {}/{} sources processed, {} unique channels, {} programmes",
            self.merged_sources(),
            self.sources.len(),
            self.unique_channels,
            self.programmes
        );
        info!(
            "Wrote {} ({})",
            self.output_path.display(),
            format_bytes(self.bytes_written)
        );

        for source in &self.sources {
            match &source.outcome {
                SourceOutcome::Merged { .. } => info!(
                    "  {}: offset {} ({})",
                    source.name, source.target_offset, source.filter_summary
                ),
                SourceOutcome::Skipped(reason) => warn!(
                    "  {}: skipped [{}] {}",
                    source.name,
                    reason.kind(),
                    reason
                ),
            }
        }

        match &self.publish {
            PublishOutcome::Failed(reason) => warn!("Publish failed: {}", reason),
            outcome => info!("Publish: {}", outcome),
        }
    }
}
