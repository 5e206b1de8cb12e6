//! Output formatters for duplicate scan results.
//!
//! - [`TextOutput`] for people, timestamped like the log
//! - [`JsonOutput`] for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use dupfind::output::TextOutput;
//! use std::path::Path;
//!
//! let result = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//!
//! TextOutput::new(&result).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextOutput;
