//! Pipeline entry points.
//!
//! - `run_crawler`: locate a class board and count marked titles on it
//! - `crawl_board`: the page loop for an already located board

pub mod crawl;
mod report;
mod request;

pub use crawl::{RunOutcome, crawl_board, run_crawler};
pub use report::{CrawlSummary, Reporter, ResultLog};
pub use request::CrawlRequest;
