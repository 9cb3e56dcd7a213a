//! AsciiDoc generation
//!
//!     Three layers, innermost first:
//!
//!     - [`visitor`]: rich-text fragments (node titles and notes) → inline AsciiDoc.
//!     - [`outline`]: the mind-map tree → sections, list items and image blocks.
//!     - [`document`]: header attributes + body → a complete document.
//!
//!     Rendering is pure: the same tree, options and period always yield the same bytes.

pub mod document;
pub mod outline;
pub mod visitor;

pub use document::{output_file_name, periodic_stem, Document};
pub use outline::{OutlineOptions, OutlineRenderer, PeriodFilter};
pub use visitor::{cleanup_whitespace, InlineVisitor, RenderContext};
