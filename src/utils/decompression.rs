use std::io::Read;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};
use crate::sources::traits::Decompressor;

/// Supported compression formats detected by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Bzip2,
    Xz,
    Uncompressed,
}

/// Magic byte detection and decompression of downloaded feeds
///
/// Formats whose cargo feature is disabled are still detected, and fail with
/// an explicit error instead of being handed to the XML parser as garbage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecompressionService;

impl DecompressionService {
    /// Detect compression format using magic bytes
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        match infer::get(data).map(|kind| kind.mime_type()) {
            Some("application/gzip") => CompressionFormat::Gzip,
            Some("application/x-bzip2") => CompressionFormat::Bzip2,
            Some("application/x-xz") => CompressionFormat::Xz,
            _ => CompressionFormat::Uncompressed,
        }
    }

    /// Decompress data based on detected format
    pub fn decompress_bytes(data: Bytes) -> Result<Vec<u8>> {
        match Self::detect_compression_format(&data) {
            CompressionFormat::Gzip => Self::decompress_gzip(data),
            CompressionFormat::Bzip2 => Self::decompress_bzip2(data),
            CompressionFormat::Xz => Self::decompress_xz(data),
            CompressionFormat::Uncompressed => Ok(data.to_vec()),
        }
    }

    #[cfg(feature = "compression-gzip")]
    fn decompress_gzip(data: Bytes) -> Result<Vec<u8>> {
        let mut decoder = flate2::read::GzDecoder::new(data.as_ref());
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Failed to decompress gzip data")?;
        Ok(decompressed)
    }

    #[cfg(not(feature = "compression-gzip"))]
    fn decompress_gzip(_data: Bytes) -> Result<Vec<u8>> {
        anyhow::bail!("gzip support not compiled in (enable feature `compression-gzip`)")
    }

    #[cfg(feature = "compression-bzip2")]
    fn decompress_bzip2(data: Bytes) -> Result<Vec<u8>> {
        let mut decoder = bzip2::read::BzDecoder::new(data.as_ref());
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Failed to decompress bzip2 data")?;
        Ok(decompressed)
    }

    #[cfg(not(feature = "compression-bzip2"))]
    fn decompress_bzip2(_data: Bytes) -> Result<Vec<u8>> {
        anyhow::bail!("bzip2 support not compiled in (enable feature `compression-bzip2`)")
    }

    #[cfg(feature = "compression-xz")]
    fn decompress_xz(data: Bytes) -> Result<Vec<u8>> {
        let mut decoder = xz2::read::XzDecoder::new(data.as_ref());
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Failed to decompress xz data")?;
        Ok(decompressed)
    }

    #[cfg(not(feature = "compression-xz"))]
    fn decompress_xz(_data: Bytes) -> Result<Vec<u8>> {
        anyhow::bail!("xz support not compiled in (enable feature `compression-xz`)")
    }
}

impl Decompressor for DecompressionService {
    fn decompress(&self, data: Bytes) -> SourceResult<String> {
        let raw_len = data.len();
        let format = Self::detect_compression_format(&data);
        debug!("Detected compression format: {:?}", format);

        let decompressed = Self::decompress_bytes(data)
            .map_err(|e| SourceError::decompression(format!("{e:#}")))?;

        debug!(
            "Decompressed {} bytes into {} bytes ({:?})",
            raw_len,
            decompressed.len(),
            format
        );

        String::from_utf8(decompressed).map_err(|e| {
            SourceError::decompression(format!("Failed to decode content as UTF-8: {e}"))
        })
    }
}
