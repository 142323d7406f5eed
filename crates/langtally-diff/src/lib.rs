// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! langtally-diff: Patch parsing and language classification for langtally
//!
//! This library crate turns the per-file patch fragments of a commit into
//! hunks and maps file paths to language names, for consumption by the
//! langtally aggregation pipeline.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use langtally_diff::{added_chars, detect_language, parse_patch};
//!
//! let hunks = parse_patch("@@ -0,0 +1,2 @@\n+fn main() {}\n+// done").expect("parse patch");
//! assert_eq!(added_chars(&hunks), 19);
//! assert_eq!(detect_language("src/main.rs"), Some("Rust"));
//! ```

pub mod error;
pub mod language;
pub mod patch;

pub use error::DiffError;
pub use language::detect_language;
pub use patch::{Hunk, added_chars, parse_patch};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::DiffError;
    pub use crate::language::detect_language;
    pub use crate::patch::{Hunk, added_chars, parse_patch};
}
