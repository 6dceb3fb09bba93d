// src/lib.rs

//! class-pulse: counts glyph-marked titles on Inven class boards

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod testing;
