//! The merge pipeline
//!
//! Per source: parse, filter to the allowlist, rewrite programme offsets.
//! Across sources: deduplicate channels (first wins), concatenate
//! programmes, then serialize one element per line.

pub mod aggregator;
pub mod filter;
pub mod offset;
pub mod orchestrator;
pub mod serializer;
pub mod source_processor;

pub use aggregator::{MergeAggregator, MergeStats};
pub use filter::ChannelFilter;
pub use orchestrator::EpgMergePipeline;
pub use serializer::DocumentSerializer;
pub use source_processor::SourceProcessor;
