//! Default configuration values

pub const DEFAULT_OUTPUT_PATH: &str = "./epg_all.xml";
pub const DEFAULT_GENERATOR_NAME: &str = "EPG Processor";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("epg-merger/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_PUBLISH_REPOSITORY: &str = ".";
pub const DEFAULT_PUBLISH_REMOTE: &str = "origin";
pub const DEFAULT_PUBLISH_BRANCH: &str = "main";
pub const DEFAULT_COMMIT_MESSAGE_PREFIX: &str = "Update EPG";
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 60;

// Seed source written into a freshly created config file
pub const EXAMPLE_SOURCE_URL: &str = "https://epgshare01.online/epgshare01/epg_ripper_AR1.xml.gz";
pub const EXAMPLE_SOURCE_OFFSET: &str = "-0600";
