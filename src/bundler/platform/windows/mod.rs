//! Windows installer formats.

pub mod msi;
