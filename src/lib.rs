//! Incremental comment scraping for a list of videos, and merging of the
//! per-video CSV files into a single dataset.

pub mod combine;
pub mod config;
pub mod error;
pub mod local;
pub mod remote;
pub mod scrape;
pub mod util;
pub mod youtube;

pub use crate::error::{Error, Result};
