//! Service layer for the crawler.
//!
//! - Board lookup (`BoardLocator`)
//! - Listing page retrieval (`PageFetcher`, `PageSource`)
//! - Row parsing (`RowExtractor`)
//! - Stop decisions (`StopPolicy`)
//! - Title marking (`GlyphPattern`)

mod extractor;
mod fetcher;
mod glyphs;
mod locator;
mod stop;

pub use extractor::{ExtractedPage, RowExtractor, parse_posted_at, parse_selector};
pub use fetcher::{HttpSource, PageFetcher, PageSource};
pub use glyphs::{BAR_GLYPHS, BLOCK_GLYPHS, GlyphPattern};
pub use locator::{BoardLocator, find_board_link};
pub use stop::StopPolicy;
