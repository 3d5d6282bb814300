//! CST Query Layer
//!
//! Compiles each language's capture patterns into a tree-sitter `Query`
//! once per process (shared across invocations and threads) and runs them
//! over a parsed tree, yielding typed `CaptureNode` records in document
//! order.
//!
//! @module index/query

mod javascript;
mod python;
mod rust;
mod typescript;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor, Tree};

use crate::core::error::{Error, Result};
use crate::index::capture::{parse_capture_name, CaptureCategory, CaptureEntity, CaptureNode};
use crate::index::types::{Language, Location};

// =============================================================================
// COMPILED QUERIES
// =============================================================================

struct CompiledQuery {
    query: Query,
    /// Parsed `(category, entity)` per capture index; `None` for helper
    /// captures that never reach the pipeline.
    meta: Vec<Option<(CaptureCategory, CaptureEntity)>>,
}

fn query_source(language: Language) -> String {
    match language {
        Language::JavaScript => [
            javascript::SCOPES,
            javascript::DEFINITIONS,
            javascript::IMPORTS,
            javascript::REFERENCES,
            javascript::DOCUMENTATION,
        ]
        .concat(),
        Language::TypeScript => [
            typescript::SCOPES,
            typescript::DEFINITIONS,
            typescript::IMPORTS,
            typescript::REFERENCES,
            typescript::DECORATORS,
            typescript::DOCUMENTATION,
        ]
        .concat(),
        Language::Python => [
            python::SCOPES,
            python::DEFINITIONS,
            python::IMPORTS,
            python::REFERENCES,
            python::DECORATORS,
        ]
        .concat(),
        Language::Rust => [
            rust::SCOPES,
            rust::DEFINITIONS,
            rust::IMPORTS,
            rust::REFERENCES,
            rust::DOCUMENTATION,
        ]
        .concat(),
    }
}

fn compile(language: Language) -> std::result::Result<CompiledQuery, String> {
    let source = query_source(language);
    let query = Query::new(&language.grammar(), &source).map_err(|e| e.to_string())?;
    let meta = query
        .capture_names()
        .iter()
        .map(|name| parse_capture_name(name))
        .collect();
    Ok(CompiledQuery { query, meta })
}

static QUERIES: Lazy<HashMap<Language, std::result::Result<CompiledQuery, String>>> =
    Lazy::new(|| {
        [
            Language::JavaScript,
            Language::TypeScript,
            Language::Python,
            Language::Rust,
        ]
        .into_iter()
        .map(|language| (language, compile(language)))
        .collect()
    });

fn compiled(language: Language) -> Result<&'static CompiledQuery> {
    match QUERIES.get(&language) {
        Some(Ok(compiled)) => Ok(compiled),
        Some(Err(message)) => Err(Error::InvalidQuery {
            language: language.as_str().to_string(),
            message: message.clone(),
        }),
        None => Err(Error::UnsupportedLanguage {
            language: language.as_str().to_string(),
        }),
    }
}

// =============================================================================
// QUERY EXECUTION
// =============================================================================

/// Run the language's capture patterns over a parsed tree.
///
/// Captures come back sorted in document order; duplicate `(name, node)`
/// pairs from overlapping patterns are collapsed.
pub fn query_tree<'t>(
    language: Language,
    tree: &'t Tree,
    source: &str,
    file_path: &str,
) -> Result<Vec<CaptureNode<'t>>> {
    let compiled = compiled(language)?;
    let names = compiled.query.capture_names();
    let bytes = source.as_bytes();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&compiled.query, tree.root_node(), bytes);

    let mut out: Vec<CaptureNode<'t>> = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let idx = capture.index as usize;
            let Some((category, entity)) = compiled.meta[idx] else {
                continue;
            };
            let node = capture.node;
            let text = node.utf8_text(bytes).unwrap_or_default();
            out.push(CaptureNode {
                name: names[idx],
                category,
                entity,
                node,
                text: text.into(),
                location: Location::from_node(node, file_path),
            });
        }
    }

    out.sort_by_key(|cap| {
        (
            cap.location.start_line,
            cap.location.start_column,
            cap.location.end_line,
            cap.location.end_column,
        )
    });
    out.dedup_by(|a, b| a.name == b.name && a.node.id() == b.node.id());

    Ok(out)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_queries_compile() {
        for language in [
            Language::JavaScript,
            Language::TypeScript,
            Language::Python,
            Language::Rust,
        ] {
            compiled(language)
                .unwrap_or_else(|e| panic!("{} query failed to compile: {e}", language));
        }
    }

    fn parse(language: Language, source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&language.grammar()).unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_query_tree_document_order() {
        let source = "function a() { b(); }\nfunction c() {}\n";
        let tree = parse(Language::JavaScript, source);
        let captures = query_tree(Language::JavaScript, &tree, source, "t.js").unwrap();
        assert!(!captures.is_empty());
        for pair in captures.windows(2) {
            assert!(pair[0].location.start() <= pair[1].location.start());
        }
    }

    #[test]
    fn test_query_tree_finds_definitions_and_references() {
        let source = "def helper():\n    pass\n\nhelper()\n";
        let tree = parse(Language::Python, source);
        let captures = query_tree(Language::Python, &tree, source, "t.py").unwrap();

        let def = captures
            .iter()
            .find(|c| c.name == "definition.function")
            .expect("function definition capture");
        assert_eq!(def.text, "helper");
        assert_eq!(def.category, CaptureCategory::Definition);

        let call = captures
            .iter()
            .find(|c| c.name == "reference.call")
            .expect("call capture");
        assert_eq!(call.text, "helper");
        assert_eq!(call.category, CaptureCategory::Reference);
    }
}
