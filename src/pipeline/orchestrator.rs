//! Run driver: every source in order, then write and publish

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::{AppError, AppResult, SourceResult};
use crate::models::{RunReport, SourceContribution, SourceOutcome, SourceReport, SourceSpec};
use crate::pipeline::aggregator::MergeAggregator;
use crate::pipeline::serializer::DocumentSerializer;
use crate::pipeline::source_processor::SourceProcessor;
use crate::publish::{GitPublisher, NoopPublisher, Publisher};
use crate::sources::{Decompressor, Fetcher, HttpFetcher};
use crate::utils::{format_bytes, format_duration, DecompressionService};

/// Merges every configured source into one XMLTV file
///
/// Sources are handled strictly one after another in configuration order.
/// A source that fails to download, decode or parse is skipped; the run only
/// fails when no source at all could be merged, in which case nothing is
/// written and nothing is published.
pub struct EpgMergePipeline {
    config: Config,
    fetcher: Box<dyn Fetcher>,
    decompressor: Box<dyn Decompressor>,
    publisher: Box<dyn Publisher>,
    serializer: DocumentSerializer,
}

impl EpgMergePipeline {
    pub fn new(
        config: Config,
        fetcher: Box<dyn Fetcher>,
        decompressor: Box<dyn Decompressor>,
        publisher: Box<dyn Publisher>,
    ) -> Self {
        let serializer = DocumentSerializer::new(config.generator_name.clone());
        Self {
            config,
            fetcher,
            decompressor,
            publisher,
            serializer,
        }
    }

    /// Build the pipeline with the HTTP fetcher, magic-byte decompressor and,
    /// when enabled, the git publisher
    pub fn from_config(config: Config) -> AppResult<Self> {
        let fetcher = HttpFetcher::from_config(&config.http)?;
        let publisher: Box<dyn Publisher> = if config.publish.enabled {
            Box::new(GitPublisher::new(config.publish.clone()))
        } else {
            Box::new(NoopPublisher)
        };

        Ok(Self::new(
            config,
            Box::new(fetcher),
            Box::new(DecompressionService),
            publisher,
        ))
    }

    async fn process_source(&self, spec: &SourceSpec) -> SourceResult<SourceContribution> {
        let raw = self.fetcher.fetch(&spec.url).await?;
        let xml = self.decompressor.decompress(raw)?;
        debug!("Decoded {} of XML", format_bytes(xml.len() as u64));
        SourceProcessor::process(&xml, &spec.target_offset, &spec.channels)
    }

    pub async fn run(&self) -> AppResult<RunReport> {
        let started = Instant::now();
        let total = self.config.sources.len();

        info!(
            "Starting EPG merge: {} sources -> {}",
            total,
            self.config.output_path.display()
        );

        let mut aggregator = MergeAggregator::new();
        let mut reports = Vec::with_capacity(total);

        for (index, spec) in self.config.sources.iter().enumerate() {
            let name = spec.display_name();
            info!(
                "Processing source {}/{}: {} (offset {}, {})",
                index + 1,
                total,
                name,
                spec.target_offset,
                spec.filter_summary()
            );

            let source_started = Instant::now();
            let outcome = match self.process_source(spec).await {
                Ok(contribution) => {
                    let stats = aggregator.add_source(contribution);
                    info!(
                        "Merged {}: {} channels added, {} duplicates dropped, {} programmes in {}",
                        name,
                        stats.channels_added,
                        stats.duplicate_channels,
                        stats.programmes_added,
                        format_duration(source_started.elapsed())
                    );
                    SourceOutcome::Merged {
                        channels_added: stats.channels_added,
                        duplicate_channels: stats.duplicate_channels,
                        programmes_added: stats.programmes_added,
                    }
                }
                Err(e) => {
                    warn!("Skipping {} [{}]: {}", name, e.kind(), e);
                    SourceOutcome::Skipped(e)
                }
            };

            reports.push(SourceReport {
                name,
                target_offset: spec.target_offset.clone(),
                filter_summary: spec.filter_summary(),
                outcome,
            });
        }

        if !reports.iter().any(|r| r.outcome.is_merged()) {
            error!("No EPG source could be processed; leaving output untouched");
            return Err(AppError::NoSourcesSucceeded { attempted: total });
        }

        let document = aggregator.finalize();
        let xml = self.serializer.serialize_document(&document);
        let output_path = self.config.output_path.clone();
        let bytes_written = write_atomically(&output_path, xml).await?;

        info!(
            "Saved {} ({}) in {}",
            output_path.display(),
            format_bytes(bytes_written),
            format_duration(started.elapsed())
        );

        let publish = self.publisher.publish(&output_path).await;

        Ok(RunReport {
            sources: reports,
            unique_channels: document.channel_count(),
            programmes: document.programme_count(),
            output_path,
            bytes_written,
            publish,
        })
    }
}

/// Replace `path` with `contents` via a sibling temp file and rename
///
/// Readers see either the previous file or the complete new one.
pub async fn write_atomically(path: &Path, contents: String) -> AppResult<u64> {
    let path: PathBuf = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> AppResult<u64> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut temp = tempfile::NamedTempFile::new_in(&parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| e.error)?;

        Ok(contents.len() as u64)
    })
    .await
    .map_err(|e| AppError::internal(format!("Output writer task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_atomically_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("epg.xml");

        let old = "<tv>old</tv>";
        let written = write_atomically(&path, old.to_string()).await.unwrap();
        assert_eq!(written, old.len() as u64);
        assert_eq!(written, 12);

        write_atomically(&path, "<tv/>".to_string()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<tv/>");

        // Only the target remains, no stray temp files
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
