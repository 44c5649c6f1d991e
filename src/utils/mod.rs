pub mod decompression;
pub mod human_format;
pub mod url;

pub use decompression::{CompressionFormat, DecompressionService};
pub use human_format::{format_bytes, format_duration};
pub use url::UrlUtils;
