//! Collaborator abstractions for getting feed text into the pipeline
//!
//! Retrieval and decoding sit behind traits so the pipeline can be driven
//! by in-memory stubs in tests.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::SourceResult;

/// Retrieves the raw (usually compressed) bytes of a feed
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> SourceResult<Bytes>;
}

/// Turns retrieved bytes into XML text
pub trait Decompressor: Send + Sync {
    fn decompress(&self, data: Bytes) -> SourceResult<String>;
}
