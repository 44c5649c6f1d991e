pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod sources;
pub mod utils;
pub mod xmltv;
