//! Metaview Library
//!
//! A desktop metadata viewer: browse the filesystem, select a file, and
//! inspect its embedded metadata as reported by exiftool.

pub mod config;
pub mod explorer;
pub mod file_picker;
pub mod gui;
pub mod metadata;
pub mod toast;
