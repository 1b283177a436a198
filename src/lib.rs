//! ngx-extract - translation key extraction for Angular templates
//!
//! Finds the keys an Angular application passes to ngx-translate (marker
//! attributes and `translate` pipes) and merges them into JSON catalogs.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine, catalog compilers and the extraction task
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
