//! Highlight lifecycle for markdown documents
//!
//!     This crate keeps three representations of one annotated document in step: the markdown
//!     content string, the rendered live view the user selects text in, and the ordered list of
//!     annotation records. It is the engine behind the mdmark viewer and CLI.
//!
//!     This is a pure lib: no code here assumes a shell environment (no printing, env vars or
//!     process exits). Recoverable problems are returned or reported through the `log` facade.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs          # AnnotateError
//!     ├── palette.rs        # Fixed highlight swatches
//!     ├── annotation.rs     # Annotation, AnnotationId, HighlightColor
//!     ├── ids.rs            # IdGenerator seam (uuid, sequential)
//!     ├── selection.rs      # Text selections and the selection toolbar
//!     ├── render.rs         # Renderer seam (comrak)
//!     ├── view.rs           # LiveView: html5ever/rcdom tree of the rendered document
//!     ├── regions.rs        # Raw HTML and code in the content string (comrak)
//!     ├── markup.rs         # Locating and rewriting <mark> markup in the content string
//!     ├── store.rs          # AnnotationStore
//!     ├── extract.rs        # Load: markup → annotations
//!     ├── highlight.rs      # Selection → new highlight
//!     ├── remove.rs         # Highlight removal
//!     ├── export.rs         # View → markdown export
//!     └── session.rs        # Wiring for a viewer page
//!
//! Inline Markup
//!
//!     Highlights round-trip through plain markdown as inline HTML:
//!
//!         <mark style="background-color: COLOR" data-comment="COMMENT">TEXT</mark>
//!
//!     `data-comment` is only present for non-empty comments. While a document is loaded every
//!     element also carries `data-highlight-id`, the join key between a record, its element in
//!     the view and its markup in the content string. Ids are reassigned on every load.
//!
//! Synchronization
//!
//!     The view and the store are keyed by id and always exact. The content string is only
//!     rewritten by id when the markup carries one; otherwise removal and export fall back to
//!     matching text, which cannot distinguish repeated passages. The fallbacks never touch
//!     markup that belongs to another live annotation.
//!
//! Library Choices
//!
//!     - Rendering: comrak, with raw HTML passthrough so highlights reach the view.
//!     - View: html5ever + markup5ever_rcdom, a browser-grade parser and a mutable tree.
//!     - Content string: comrak to tell raw HTML from code and prose, then regex over the HTML
//!       only, since markdown must never be reparsed as HTML wholesale.
//!
pub mod annotation;
pub mod error;
pub mod export;
pub mod extract;
pub mod highlight;
pub mod ids;
pub mod markup;
pub mod palette;
pub mod regions;
pub mod remove;
pub mod render;
pub mod selection;
pub mod session;
pub mod store;
pub mod view;

pub use annotation::{Annotation, AnnotationId, HighlightColor};
pub use error::AnnotateError;
pub use export::{ExportArtifact, EXPORT_FILENAME, EXPORT_MIME};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use render::{ComrakRenderer, RenderOptions, Renderer};
pub use selection::{Rect, TextSelection, ToolbarState};
pub use session::Session;
pub use store::AnnotationStore;
pub use view::LiveView;
