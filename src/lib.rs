//! cst-lens: concrete syntax tree inspection library.
//!
//! Parses source code with tree-sitter and turns the resulting tree into a
//! depth-limited Graphviz diagram, exact tree statistics, and optionally
//! language-model commentary.

pub mod analysis;
pub mod commentary;
pub mod config;
pub mod error;
pub mod observability;
pub mod registry;
pub mod render;
pub mod summary;
pub mod tree;
pub mod types;

pub use analysis::{AnalysisReport, AnalysisRequest, Analyzer};
pub use error::{AnalyzerError, Result};
pub use registry::ParserRegistry;
pub use render::{render_graph, RenderGraph};
pub use summary::{summarize, TreeSummary};
pub use tree::{OwnedNode, SyntaxNode};
pub use types::Language;
