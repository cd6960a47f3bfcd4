//! Core library for the mp3meta command line application.
//!
//! The library exposes the export and import passes that power the
//! command-line interface as well as the integration tests. Filesystem and
//! format adapters live under [`io`], the tag record and report types inside
//! [`model`], and the two batch passes under [`sync`].

pub mod error;
pub mod io;
pub mod model;
pub mod sync;

pub use error::{Result, ToolError};
