// src/models/mod.rs

//! Domain models for the crawler.

pub mod config;
mod post;
mod state;

pub use config::{
    Config, CrawlerConfig, ForumConfig, ListingConfig, ListingMode, Messages, OutputConfig,
};
pub use post::{PostRecord, PostedAt, UNKNOWN_AUTHOR};
pub use state::{CrawlState, StopSignal};
