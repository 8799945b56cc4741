//! Parser registry: one lazily loaded grammar per language.
//!
//! Each language moves through `Unloaded → Loading → Ready` or
//! `Unloaded → Loading → Failed` exactly once per registry. A failed load is
//! remembered and every later request gets the same error without touching
//! the loader again. Loading is serialized per language; reads of a ready
//! grammar only take a shared lock.
//!
//! What is cached is the validated `tree_sitter::Language`. A
//! `tree_sitter::Parser` carries per-parse state and is cheap to build, so
//! [`ParserRegistry::parse`] makes a fresh one on every call.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError, RwLock};

use crate::error::{AnalyzerError, Result};
use crate::types::Language;

// ---------------------------------------------------------------------------
// Grammar loading
// ---------------------------------------------------------------------------

/// Source of tree-sitter grammars.
pub trait GrammarLoader: Send + Sync {
    /// Produce the grammar for `language`, or a human-readable reason why
    /// it is unavailable.
    fn load(&self, language: Language) -> std::result::Result<tree_sitter::Language, String>;
}

/// Grammars compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticGrammars;

impl StaticGrammars {
    /// Native grammar for a [`Language`]. Each grammar crate exposes a
    /// `LanguageFn`; `.into()` goes through tree-sitter's conversion.
    #[must_use]
    pub fn ts_language(language: Language) -> tree_sitter::Language {
        match language {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl GrammarLoader for StaticGrammars {
    fn load(&self, language: Language) -> std::result::Result<tree_sitter::Language, String> {
        let grammar = Self::ts_language(language);
        // Rejects grammars built against an incompatible ABI.
        let mut probe = tree_sitter::Parser::new();
        probe
            .set_language(&grammar)
            .map_err(|e| format!("grammar version mismatch: {e}"))?;
        Ok(grammar)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle of one registry entry.
#[derive(Debug, Clone)]
pub enum GrammarState {
    Unloaded,
    Loading,
    Ready(tree_sitter::Language),
    Failed(String),
}

impl GrammarState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

struct Slot {
    state: RwLock<GrammarState>,
    /// Held for the duration of a load.
    init: Mutex<()>,
}

impl Slot {
    fn new() -> Self {
        Self {
            state: RwLock::new(GrammarState::Unloaded),
            init: Mutex::new(()),
        }
    }

    fn read(&self) -> GrammarState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, next: GrammarState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

// ---------------------------------------------------------------------------
// Parsed output
// ---------------------------------------------------------------------------

/// A successful parse: the tree plus the language it was parsed as.
#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub language: Language,
    pub tree: tree_sitter::Tree,
}

impl ParsedTree {
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Whether the source contained syntax errors. The tree is complete
    /// either way; errors appear as `ERROR` or missing nodes.
    pub fn has_syntax_errors(&self) -> bool {
        self.root().has_error()
    }

    /// S-expression form of the tree, as printed by tree-sitter.
    pub fn to_sexp(&self) -> String {
        self.root().to_sexp()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Process-wide cache of grammars keyed by [`Language`].
///
/// Construct once and share behind an `Arc`; every method takes `&self`.
pub struct ParserRegistry {
    loader: Box<dyn GrammarLoader>,
    slots: BTreeMap<Language, Slot>,
    max_source_bytes: usize,
}

impl ParserRegistry {
    /// Registry over the statically linked grammars, without a size limit.
    pub fn new() -> Self {
        Self::with_loader(Box::new(StaticGrammars))
    }

    pub fn with_loader(loader: Box<dyn GrammarLoader>) -> Self {
        Self {
            loader,
            slots: Language::ALL.iter().map(|&l| (l, Slot::new())).collect(),
            max_source_bytes: 0,
        }
    }

    /// Reject sources larger than `limit` bytes before parsing. `0` disables
    /// the check.
    #[must_use]
    pub fn with_max_source_bytes(mut self, limit: usize) -> Self {
        self.max_source_bytes = limit;
        self
    }

    /// Languages this registry can serve.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.slots.keys().copied()
    }

    /// Current lifecycle state for `language`.
    pub fn state(&self, language: Language) -> GrammarState {
        self.slots
            .get(&language)
            .map_or(GrammarState::Unloaded, Slot::read)
    }

    /// Resolve a language identifier or display name.
    pub fn resolve(&self, language_id: &str) -> Result<Language> {
        Language::from_str_loose(language_id)
            .filter(|l| self.slots.contains_key(l))
            .ok_or_else(|| AnalyzerError::UnsupportedLanguage {
                language: language_id.to_string(),
            })
    }

    /// Load the grammar for `language` if needed and return it.
    pub fn grammar(&self, language: Language) -> Result<tree_sitter::Language> {
        let slot = self
            .slots
            .get(&language)
            .ok_or_else(|| AnalyzerError::UnsupportedLanguage {
                language: language.to_string(),
            })?;

        if let Some(done) = Self::settled(language, slot.read()) {
            return done;
        }

        let _guard = slot.init.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished while we waited.
        if let Some(done) = Self::settled(language, slot.read()) {
            return done;
        }

        slot.set(GrammarState::Loading);
        tracing::debug!(%language, "loading grammar");
        match self.loader.load(language) {
            Ok(grammar) => {
                slot.set(GrammarState::Ready(grammar.clone()));
                tracing::debug!(%language, "grammar ready");
                Ok(grammar)
            }
            Err(message) => {
                tracing::warn!(%language, error = %message, "grammar failed to load");
                slot.set(GrammarState::Failed(message.clone()));
                Err(AnalyzerError::ParserUnavailable {
                    language: language.to_string(),
                    message,
                })
            }
        }
    }

    fn settled(language: Language, state: GrammarState) -> Option<Result<tree_sitter::Language>> {
        match state {
            GrammarState::Ready(grammar) => Some(Ok(grammar)),
            GrammarState::Failed(message) => Some(Err(AnalyzerError::ParserUnavailable {
                language: language.to_string(),
                message,
            })),
            GrammarState::Unloaded | GrammarState::Loading => None,
        }
    }

    /// Parse `source` using the grammar named by `language_id`.
    pub fn parse(&self, source: &str, language_id: &str) -> Result<ParsedTree> {
        let language = self.resolve(language_id)?;
        self.parse_language(source, language)
    }

    /// Parse `source` as `language`.
    ///
    /// Syntax errors in `source` are not failures; see
    /// [`ParsedTree::has_syntax_errors`].
    pub fn parse_language(&self, source: &str, language: Language) -> Result<ParsedTree> {
        if self.max_source_bytes > 0 && source.len() > self.max_source_bytes {
            return Err(AnalyzerError::SourceTooLarge {
                size: source.len(),
                limit: self.max_source_bytes,
            });
        }

        let grammar = self.grammar(language)?;
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| AnalyzerError::Parse(format!("language version mismatch: {e}")))?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            AnalyzerError::Parse("tree-sitter returned no tree (timeout or cancellation)".into())
        })?;
        tracing::debug!(%language, bytes = source.len(), "parsed source");

        Ok(ParsedTree { language, tree })
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
