//! # REQSMITH
//!
//! Builds a `requirements.txt` from the imports a Python codebase actually
//! declares.
//!
//! Every source file under a root is parsed with tree-sitter, each import
//! is reduced to its top-level package name, and names that belong to the
//! project itself or to the standard library are dropped. What remains is
//! optionally reconciled against an existing manifest so pinned versions
//! survive regeneration.
//!
//! ## Pipeline
//!
//! - **Scanner**: source files and local module names, recursive or shallow
//! - **Parser**: declared imports from the syntax tree
//! - **Classifier**: local / standard library / external
//! - **Reference**: version constraints carried over from a prior manifest
//! - **Emitter**: sorted manifest, written once or previewed

pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use error::{Result, ScanError};
