//! Shared helpers: downloads, archive extraction and file copies.

pub mod archive;
pub mod fs;
pub mod http;
