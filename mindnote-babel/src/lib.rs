//! Mind-map to AsciiDoc conversion
//!
//!     This crate turns a MindNode package (a `.mindnode` directory holding an XML property
//!     list and a `resources/` folder) into AsciiDoc documents: weekly digests filtered by
//!     week and quarter tags, or whole-tree exports.
//!
//!     This is a pure lib, that is, it powers the mindnote cli but is shell agnostic: no code
//!     here prints to stdout or reads env vars. Progress and skipped nodes are reported through
//!     the `log` facade; the binary decides where that goes.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── calendar.rs             # ISO week / quarter of a date
//!     ├── resources.rs            # resources/ → images/ copy
//!     ├── publish.rs              # One-call generation pipeline
//!     ├── mindmap
//!     │   ├── plist.rs            # XML property list reader
//!     │   └── mod.rs              # Node tree, canvas, package
//!     ├── fragment
//!     │   ├── parser.rs           # html5ever → Fragment
//!     │   └── mod.rs              # Element kinds
//!     └── asciidoc
//!         ├── visitor.rs          # Fragment → inline AsciiDoc
//!         ├── outline.rs          # Node tree → sections / lists / images
//!         └── document.rs         # Header + body
//!
//! Core Algorithms
//!
//!     Two recursive walks cooperate. The outline walk visits the mind-map tree, decides per
//!     node whether it is included (`[S]`, `W<n>`, `Q<n>` title prefixes) and how it is shown
//!     (heading up to the max heading depth, list item or image block below it). For every
//!     title and note it hands the rich-text fragment to the inline walk, which dispatches on
//!     the element kind and threads list nesting, preformatted mode and figure captions down
//!     through an immutable context.
//!
//! Testing
//!     tests
//!     ├── asciidoc
//!     ├── mindmap
//!     └── fixtures
//!         └── Sample.mindnode
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.

pub mod asciidoc;
pub mod calendar;
pub mod error;
pub mod fragment;
pub mod mindmap;
pub mod publish;
pub mod resources;

pub use asciidoc::{Document, InlineVisitor, OutlineOptions, OutlineRenderer, PeriodFilter};
pub use calendar::Period;
pub use error::NoteError;
pub use mindmap::{MindMapNode, MindNodePackage, TaskState};
pub use publish::{dump, generate, GenerationResult, GenerationSpec, Mode};
