//! EduVision scholarship scraper
//!
//! Discovers scholarship detail pages, extracts structured fields with
//! text and heading heuristics, normalizes deadlines and exports JSON/CSV
//! with a bachelor's-level subset.

pub mod config;
pub mod dates;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod patterns;
pub mod pipeline;
pub mod sections;
pub mod storage;
pub mod text;
pub mod types;

pub use types::*;
