//! GraphBLAS dialect for xrcf.
//!
//! This crate holds the pieces that a GraphBLAS compiler needs around the
//! xrcf infrastructure: the `graphblas` dialect, the declarations of its
//! operations, and a translation driver that reads a file, runs one of the
//! registered translations on it, and writes the result.
//!
//! The dialect does not declare any operations yet. Inputs that use
//! operations from the `graphblas` namespace are therefore rejected before
//! they reach the xrcf parser, while inputs in the default xrcf dialects can
//! be translated with the translations from [register_all_translations].
//!
//! A translation tool built on this crate looks like this:
//!
//! ```no_run
//! use graphblas::register_all_translations;
//! use graphblas::translate_main;
//! use graphblas::TranslationRegistry;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = TranslationRegistry::new();
//!     register_all_translations(&mut registry)?;
//!     translate_main(&registry, std::env::args_os(), "My Translation Tool")
//! }
//! ```

pub mod dialect;
mod driver;
pub mod ops;
mod translation;

pub use dialect::GraphBLAS;
pub use driver::cli;
pub use driver::init_subscriber;
pub use driver::split_input;
pub use driver::translate;
pub use driver::translate_main;
pub use driver::TranslateOptions;
pub use driver::SPLIT_MARKER;
pub use translation::register_all_translations;
pub use translation::TranslateFn;
pub use translation::Translation;
pub use translation::TranslationRegistry;
