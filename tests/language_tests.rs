//! Integration tests for language support across the full parsing pipeline.
//!
//! These tests verify that each supported language can:
//! 1. Be resolved from identifiers, display names and file extensions
//! 2. Have its grammar loaded by the registry
//! 3. Parse representative source code into the expected top-level shape
//!
//! Uses `test-case` for parameterized coverage across all 8 languages.

use cst_lens::registry::ParserRegistry;
use cst_lens::summary::summarize;
use cst_lens::types::Language;
use test_case::test_case;

// =========================================================================
// Identifiers
// =========================================================================

#[test]
fn all_languages_roundtrip_through_as_str() {
    for lang in Language::ALL {
        assert_eq!(Language::from_str_loose(lang.as_str()), Some(lang));
    }
}

#[test]
fn all_languages_resolve_from_display_name() {
    for lang in Language::ALL {
        assert_eq!(
            Language::from_str_loose(lang.display_name()),
            Some(lang),
            "display name {} should resolve",
            lang.display_name()
        );
    }
}

#[test]
fn all_languages_serialize_to_as_str() {
    for lang in Language::ALL {
        let json = serde_json::to_string(&lang).unwrap();
        assert_eq!(json, format!("\"{}\"", lang.as_str()));
        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lang);
    }
}

#[test_case("py", Some(Language::Python) ; "alias_py")]
#[test_case("  JavaScript ", Some(Language::JavaScript) ; "padded_mixed_case")]
#[test_case("ts", Some(Language::TypeScript) ; "alias_ts")]
#[test_case("C++", Some(Language::Cpp) ; "cpp_display")]
#[test_case("cxx", Some(Language::Cpp) ; "alias_cxx")]
#[test_case("rs", Some(Language::Rust) ; "alias_rs")]
#[test_case("golang", Some(Language::Go) ; "alias_golang")]
#[test_case("cobol", None ; "unknown")]
#[test_case("", None ; "empty")]
fn loose_language_names(input: &str, expected: Option<Language>) {
    assert_eq!(Language::from_str_loose(input), expected);
}

// =========================================================================
// Extension detection
// =========================================================================

#[test_case("src/app.py", Some(Language::Python) ; "ext_py")]
#[test_case("index.mjs", Some(Language::JavaScript) ; "ext_mjs")]
#[test_case("lib/types.ts", Some(Language::TypeScript) ; "ext_ts")]
#[test_case("Main.java", Some(Language::Java) ; "ext_java")]
#[test_case("include/list.h", Some(Language::C) ; "ext_h")]
#[test_case("engine.cc", Some(Language::Cpp) ; "ext_cc")]
#[test_case("vec.hpp", Some(Language::Cpp) ; "ext_hpp")]
#[test_case("main.rs", Some(Language::Rust) ; "ext_rs")]
#[test_case("cmd/server.go", Some(Language::Go) ; "ext_go")]
#[test_case("README.md", None ; "ext_md")]
#[test_case("Makefile", None ; "no_extension")]
fn detect_from_path(path: &str, expected: Option<Language>) {
    assert_eq!(Language::detect(path), expected);
}

// =========================================================================
// Parsing
// =========================================================================

#[test_case(Language::Python, "def add(a, b):\n    return a + b\n", "module", "function_definition" ; "python")]
#[test_case(Language::JavaScript, "function add(a, b) { return a + b; }\n", "program", "function_declaration" ; "javascript")]
#[test_case(Language::TypeScript, "function add(a: number, b: number): number { return a + b; }\n", "program", "function_declaration" ; "typescript")]
#[test_case(Language::Java, "class Main { int add(int a, int b) { return a + b; } }\n", "program", "class_declaration" ; "java")]
#[test_case(Language::C, "int add(int a, int b) { return a + b; }\n", "translation_unit", "function_definition" ; "c")]
#[test_case(Language::Cpp, "int add(int a, int b) { return a + b; }\n", "translation_unit", "function_definition" ; "cpp")]
#[test_case(Language::Rust, "fn add(a: i32, b: i32) -> i32 { a + b }\n", "source_file", "function_item" ; "rust")]
#[test_case(Language::Go, "package main\n\nfunc add(a, b int) int { return a + b }\n", "source_file", "function_declaration" ; "go")]
fn parses_representative_source(language: Language, source: &str, root_kind: &str, top_kind: &str) {
    let registry = ParserRegistry::new();
    let parsed = registry.parse(source, language.as_str()).unwrap();

    assert_eq!(parsed.language, language);
    assert_eq!(parsed.root().kind(), root_kind);
    assert!(!parsed.has_syntax_errors(), "{}", parsed.to_sexp());

    let summary = summarize(parsed.root());
    assert!(summary.total_nodes > 3);
    assert!(
        summary.top_level_nodes.iter().any(|n| n.kind == top_kind),
        "expected {top_kind} among {:?}",
        summary.top_level_nodes
    );
    assert_eq!(registry.state(language).name(), "ready");
}

#[test]
fn every_grammar_loads() {
    let registry = ParserRegistry::new();
    for lang in Language::ALL {
        registry
            .grammar(lang)
            .unwrap_or_else(|e| panic!("{lang} grammar failed: {e}"));
    }
    assert!(registry.languages().all(|l| registry.state(l).name() == "ready"));
}

#[test]
fn syntax_errors_still_produce_a_tree() {
    let registry = ParserRegistry::new();
    let parsed = registry.parse("def broken(:\n", "python").unwrap();
    assert!(parsed.has_syntax_errors());
    let summary = summarize(parsed.root());
    assert!(summary.error_nodes() >= 1 || parsed.to_sexp().contains("MISSING"));
}
