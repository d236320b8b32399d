//! ChemViz equipment analysis reports.
//!
//! Composes a fixed-structure analytical document from an upload summary and
//! its history window, lays it out onto US Letter pages and writes a PDF.
//! [`report::render`] is the single entry point for both report variants.

pub mod cli;
pub mod config;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod report;
pub mod style;
pub mod types;
pub mod ui;

pub use error::{ReportError, Result};
