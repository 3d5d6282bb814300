//! Single-File Semantic Indexing Pipeline
//!
//! The fixed three-phase transformation from a parsed CST to a
//! `SemanticIndex`: captures stream out of the query layer, SCOPE captures
//! build the lexical scope tree, then the definition phase (per-language
//! handler registries) and the reference phase run against the shared
//! scope oracle. The returned index is immutable.
//!
//! @module index

pub mod builder;
pub mod capture;
pub mod handlers;
pub mod query;
pub mod refs;
pub mod scopes;
pub mod symbol_id;
pub mod types;

use compact_str::CompactString;
use tracing::{debug, trace};
use tree_sitter::Tree;

use crate::core::error::{Error, Result};
use builder::DefinitionBuilder;
use capture::CaptureCategory;
use scopes::{FileGeometry, ScopeTreeBuilder};
use types::{Language, SemanticIndex};

// =============================================================================
// SOURCE FILE
// =============================================================================

/// A file handed to the indexer: path for symbol ids, text for geometry
/// and auxiliary extraction
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: CompactString,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<CompactString>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Build the semantic index for one parsed file.
///
/// Pure from `(CST, language)` to the index; the only fatal outcomes are an
/// unusable query set and malformed declarations (`missing_cst_field`).
/// Partial or error-laden trees still produce an index of whatever was
/// recognizable.
pub fn build_index_single_file(
    file: &SourceFile,
    tree: &Tree,
    language: Language,
) -> Result<SemanticIndex> {
    let captures = query::query_tree(language, tree, &file.text, &file.path)?;

    // Phase 1: scope tree, module scope first
    let mut scope_builder = ScopeTreeBuilder::new(&file.path, FileGeometry::of(&file.text));
    for cap in &captures {
        if cap.category == CaptureCategory::Scope {
            scope_builder.add_scope_capture(cap, &file.text, language);
        }
    }
    let ctx = scope_builder.finish();

    // Phase 2: definitions. Decorators run as a second sweep so their
    // targets exist no matter where the decorator sat in document order.
    let registry = handlers::registry_for(language);
    let hctx = handlers::HandlerContext {
        scopes: &ctx,
        source: &file.text,
        language,
    };
    let mut builder = DefinitionBuilder::new();
    for cap in &captures {
        let relevant = matches!(
            cap.category,
            CaptureCategory::Definition | CaptureCategory::Import | CaptureCategory::Documentation
        );
        if !relevant {
            continue;
        }
        match registry.get(cap.name) {
            Some(handler) => handler(cap, &mut builder, &hctx)?,
            None => trace!(capture = cap.name, "unknown capture name ignored"),
        }
    }
    for cap in &captures {
        if cap.category == CaptureCategory::Decorator {
            if let Some(handler) = registry.get(cap.name) {
                handler(cap, &mut builder, &hctx)?;
            }
        }
    }

    // Phase 3: references
    let references = refs::extract_references(&captures, &ctx, &file.text, language);

    let root_scope_id = ctx.root_scope_id().clone();
    let definitions = builder.build();
    let index = SemanticIndex {
        file_path: file.path.clone(),
        language,
        root_scope_id,
        scopes: ctx.into_scopes(),
        definitions,
        references,
    };
    debug!(file = %index.file_path, %language, "{}", index.stats());
    Ok(index)
}

/// Convenience entry owning the parser: parse `source` and index it
pub fn index_source(path: &str, source: &str, language: Language) -> Result<SemanticIndex> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|e| Error::ParseFailed {
            language: language.as_str().to_string(),
            message: e.to_string(),
        })?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::ParseFailed {
            language: language.as_str().to_string(),
            message: "parser returned no tree".to_string(),
        })?;
    let file = SourceFile::new(path, source);
    build_index_single_file(&file, &tree, language)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::types::*;
    use super::*;

    fn index(path: &str, source: &str, language: Language) -> SemanticIndex {
        index_source(path, source, language).expect("indexing failed")
    }

    fn function_by_name<'i>(index: &'i SemanticIndex, name: &str) -> &'i FunctionDef {
        index
            .definitions
            .functions
            .values()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("function {name} not found"))
    }

    fn class_by_name<'i>(index: &'i SemanticIndex, name: &str) -> &'i ClassDef {
        index
            .definitions
            .classes
            .values()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("class {name} not found"))
    }

    // -------------------------------------------------------------------------
    // Boundary behaviors
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_file() {
        let idx = index("empty.py", "", Language::Python);
        assert_eq!(idx.scopes.len(), 1);
        assert!(idx.references.is_empty());
        assert!(idx.is_empty());
        let root = &idx.scopes[&idx.root_scope_id];
        assert!(root.parent_id.is_none());
        assert_eq!(root.scope_type, ScopeType::Module);
    }

    #[test]
    fn test_comments_only_file() {
        let idx = index("c.js", "// a comment\n// another\n", Language::JavaScript);
        assert_eq!(idx.scopes.len(), 1);
        assert!(idx.references.is_empty());
        assert!(idx.definitions.functions.is_empty());
    }

    #[test]
    fn test_parse_error_region_still_indexes() {
        let source = "def ok():\n    pass\n\ndef broken(:\n";
        let idx = index("broken.py", source, Language::Python);
        assert!(idx
            .definitions
            .functions
            .values()
            .any(|f| f.name == "ok"));
    }

    #[test]
    fn test_unsupported_language_is_fatal() {
        assert!(matches!(
            Language::from_name("cobol"),
            Err(Error::UnsupportedLanguage { .. })
        ));
    }

    // -------------------------------------------------------------------------
    // Scenario: Python named function export
    // -------------------------------------------------------------------------

    #[test]
    fn test_python_function_export_conventions() {
        let source = "def public_fn(): pass\ndef _private_fn(): pass\ndef __dunder__(): pass\n";
        let idx = index("test.py", source, Language::Python);

        assert_eq!(idx.definitions.functions.len(), 3);
        for (name, exported) in [
            ("public_fn", true),
            ("_private_fn", false),
            ("__dunder__", true),
        ] {
            let f = function_by_name(&idx, name);
            assert_eq!(f.is_exported, exported, "export flag for {name}");
            assert_eq!(f.defining_scope_id, idx.root_scope_id, "scope for {name}");
        }
    }

    // -------------------------------------------------------------------------
    // Scenario: TypeScript named-function self-reference
    // -------------------------------------------------------------------------

    #[test]
    fn test_typescript_named_function_expression_self_reference() {
        let source = "const factorial = function fact(n: number): number {\n  if (n <= 1) return 1;\n  return n * fact(n - 1);\n};\n";
        let idx = index("fact.ts", source, Language::TypeScript);

        let variable = idx
            .definitions
            .variables
            .values()
            .find(|v| v.name == "factorial")
            .expect("variable factorial");
        assert_eq!(variable.defining_scope_id, idx.root_scope_id);

        let fact = function_by_name(&idx, "fact");
        let body_scope = fact.body_scope_id.clone().expect("fact body scope");
        assert_eq!(
            fact.defining_scope_id, body_scope,
            "named function expression binds inside its own body"
        );

        let call = idx
            .references
            .iter()
            .find(|r| matches!(r, Reference::FunctionCall { name, .. } if *name == "fact"))
            .expect("recursive call reference");
        assert_eq!(call.enclosing_scope_id(), &body_scope);
    }

    // -------------------------------------------------------------------------
    // Scenario: Rust impl block methods
    // -------------------------------------------------------------------------

    #[test]
    fn test_rust_impl_methods_attach_to_struct() {
        let source = "pub struct S { x: i32 }\nimpl S {\n    pub fn new() -> Self { S { x: 0 } }\n    pub fn get(&self) -> i32 { self.x }\n}\n";
        let idx = index("s.rs", source, Language::Rust);

        let class = class_by_name(&idx, "S");
        assert!(class.is_exported);
        assert_eq!(class.constructors.len(), 1);
        assert_eq!(class.constructors[0].name, "new");
        assert_eq!(class.methods.len(), 1);

        let get = &class.methods[0];
        assert_eq!(get.name, "get");
        let first = get
            .signature
            .parameters
            .first()
            .expect("self parameter on get");
        assert_eq!(first.name, "self");
        assert_eq!(first.type_annotation.as_deref(), Some("S"));
    }

    // -------------------------------------------------------------------------
    // Scenario: Python property chain
    // -------------------------------------------------------------------------

    #[test]
    fn test_python_property_chain_write() {
        let source = "class C:\n    def set(self):\n        self.cfg.deep.value = 1\n";
        let idx = index("chain.py", source, Language::Python);

        let accesses: Vec<_> = idx
            .references
            .iter()
            .filter_map(|r| match r {
                Reference::PropertyAccess { property_chain, .. } => Some(property_chain),
                _ => None,
            })
            .collect();
        assert_eq!(accesses.len(), 1, "one outermost access only");
        let chain: Vec<&str> = accesses[0].iter().map(|s| s.as_str()).collect();
        assert_eq!(chain, ["self", "cfg", "deep", "value"]);

        // Writes are tracked for identifier LHS only, not member LHS
        assert!(!idx.references.iter().any(|r| matches!(
            r,
            Reference::VariableReference {
                access_type: AccessType::Write,
                ..
            }
        )));
    }

    // -------------------------------------------------------------------------
    // Scenario: JS callback detection
    // -------------------------------------------------------------------------

    #[test]
    fn test_javascript_callback_context() {
        let source = "[1,2,3].map(x => x*2).filter(function(y){ return y>0 });\n";
        let idx = index("cb.js", source, Language::JavaScript);

        let callbacks: Vec<_> = idx
            .definitions
            .functions
            .values()
            .filter(|f| f.callback_context.is_some())
            .collect();
        assert_eq!(callbacks.len(), 2, "arrow and function expression");
        for function in callbacks {
            let context = function.callback_context.as_ref().unwrap();
            assert!(context.is_callback, "{} is a callback", function.symbol_id);
            let receiver = context
                .receiver_location
                .as_ref()
                .expect("receiver spans the enclosing call");
            assert!(receiver.contains(&function.location));
        }
    }

    #[test]
    fn test_assignment_rhs_function_is_not_callback() {
        let source = "const handler = (e) => e.preventDefault();\n";
        let idx = index("h.js", source, Language::JavaScript);
        let anon = idx
            .definitions
            .functions
            .values()
            .find(|f| f.callback_context.is_some())
            .expect("anonymous function recorded");
        assert!(!anon.callback_context.as_ref().unwrap().is_callback);
    }

    // -------------------------------------------------------------------------
    // Scenario: Python relative import
    // -------------------------------------------------------------------------

    #[test]
    fn test_python_relative_import_alias() {
        let source = "from ..utils import helper as h\n";
        let idx = index("m.py", source, Language::Python);

        assert_eq!(idx.definitions.imported_symbols.len(), 1);
        let import = idx.definitions.imported_symbols.values().next().unwrap();
        assert_eq!(import.name, "h");
        assert_eq!(import.original_name.as_deref(), Some("helper"));
        assert_eq!(import.import_path, "..utils");
        assert_eq!(import.import_kind, ImportKind::Named);
        assert!(import.is_exported);
    }

    #[test]
    fn test_python_import_forms() {
        let source = "import os\nimport numpy as np\nfrom typing import List\nfrom . import base\nfrom pkg import *\n";
        let idx = index("imports.py", source, Language::Python);
        let by_name = |name: &str| {
            idx.definitions
                .imported_symbols
                .values()
                .find(|i| i.name == name)
                .unwrap_or_else(|| panic!("import {name}"))
        };

        assert_eq!(by_name("os").import_kind, ImportKind::Namespace);
        let np = by_name("np");
        assert_eq!(np.original_name.as_deref(), Some("numpy"));
        assert_eq!(np.import_path, "numpy");
        assert_eq!(by_name("List").import_path, "typing");
        assert_eq!(by_name("base").import_path, ".");
        let star = by_name("*");
        assert_eq!(star.import_kind, ImportKind::Namespace);
        assert_eq!(star.import_path, "pkg");
    }

    // -------------------------------------------------------------------------
    // Scope-tree invariants
    // -------------------------------------------------------------------------

    #[test]
    fn test_scope_invariants_hold() {
        let source = "class A:\n    def m(self):\n        if True:\n            x = 1\n\ndef f():\n    return 2\n";
        let idx = index("inv.py", source, Language::Python);

        // Exactly one root, and it is the module scope
        let roots: Vec<_> = idx.scopes.values().filter(|s| s.is_root()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, idx.root_scope_id);

        // Every non-root parent exists and lists the child
        for scope in idx.scopes.values() {
            if let Some(parent_id) = &scope.parent_id {
                let parent = &idx.scopes[parent_id];
                assert!(parent.child_ids.contains(&scope.id));
                assert!(parent.location.contains(&scope.location));
            }
        }

        // Declarations never sit inside their own body scope
        for class in idx.definitions.classes.values() {
            let body = &idx.scopes[class.body_scope_id.as_ref().unwrap()];
            assert!(body.location.start() > class.location.start());
        }
        for function in idx.definitions.functions.values() {
            if let Some(body_id) = &function.body_scope_id {
                assert!(idx.scopes.contains_key(body_id));
            }
        }

        // Every declaration's defining scope exists
        for variable in idx.definitions.variables.values() {
            assert!(idx.scopes.contains_key(&variable.defining_scope_id));
        }
        // Every reference's enclosing scope exists
        for reference in &idx.references {
            assert!(idx.scopes.contains_key(reference.enclosing_scope_id()));
        }
    }

    #[test]
    fn test_method_scope_types() {
        let source = "class A:\n    def __init__(self):\n        self.x = 1\n    def m(self):\n        pass\n";
        let idx = index("mt.py", source, Language::Python);
        let types: Vec<ScopeType> = idx.scopes.values().map(|s| s.scope_type).collect();
        assert!(types.contains(&ScopeType::Constructor));
        assert!(types.contains(&ScopeType::Method));
        assert!(types.contains(&ScopeType::Class));
    }

    // -------------------------------------------------------------------------
    // References & metadata
    // -------------------------------------------------------------------------

    #[test]
    fn test_method_call_receiver_and_chain() {
        let source = "const n = list.items.push(4);\n";
        let idx = index("mc.js", source, Language::JavaScript);
        let call = idx
            .references
            .iter()
            .find_map(|r| match r {
                Reference::MethodCall {
                    name,
                    receiver_location,
                    property_chain,
                    optional_chaining,
                    ..
                } if *name == "push" => Some((receiver_location, property_chain, optional_chaining)),
                _ => None,
            })
            .expect("push call");
        let receiver = call.0.as_ref().expect("receiver location");
        assert_eq!((receiver.start_line, receiver.start_column), (1, 11));
        let chain: Vec<&str> = call
            .1
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(chain, ["list", "items", "push"]);
        assert!(!call.2);
    }

    #[test]
    fn test_optional_chaining_flag() {
        let source = "user?.profile?.load();\n";
        let idx = index("oc.ts", source, Language::TypeScript);
        let optional = idx.references.iter().any(|r| {
            matches!(
                r,
                Reference::MethodCall {
                    optional_chaining: true,
                    ..
                }
            )
        });
        assert!(optional);
    }

    #[test]
    fn test_self_reference_calls() {
        let py = index(
            "sc.py",
            "class A:\n    def run(self):\n        self.step()\n",
            Language::Python,
        );
        assert!(py.references.iter().any(|r| matches!(
            r,
            Reference::SelfReferenceCall {
                keyword: SelfKeyword::SelfValue,
                ..
            }
        )));

        let js = index(
            "sc.js",
            "class A { run() { this.step(); } }\n",
            Language::JavaScript,
        );
        assert!(js.references.iter().any(|r| matches!(
            r,
            Reference::SelfReferenceCall {
                keyword: SelfKeyword::This,
                ..
            }
        )));
    }

    #[test]
    fn test_constructor_target() {
        let source = "let parser = new Parser(input);\nnew Parser(other);\n";
        let idx = index("ct.js", source, Language::JavaScript);
        let targets: Vec<_> = idx
            .references
            .iter()
            .filter_map(|r| match r {
                Reference::ConstructorCall {
                    construct_target, ..
                } => Some(construct_target.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().any(|t| t.is_some()));
        assert!(targets.iter().any(|t| t.is_none()));
    }

    #[test]
    fn test_python_uppercase_call_is_constructor() {
        let source = "w = Widget()\nn = helper()\n";
        let idx = index("uc.py", source, Language::Python);
        assert!(idx.references.iter().any(
            |r| matches!(r, Reference::ConstructorCall { name, construct_target: Some(_), .. } if *name == "Widget")
        ));
        assert!(idx
            .references
            .iter()
            .any(|r| matches!(r, Reference::FunctionCall { name, .. } if *name == "helper")));
    }

    #[test]
    fn test_type_references_recurse_generics() {
        let source = "def load(data: Dict[str, int]) -> Result:\n    pass\n";
        let idx = index("tr.py", source, Language::Python);
        let mut names: Vec<&str> = idx
            .references
            .iter()
            .filter_map(|r| match r {
                Reference::TypeReference { type_info, .. } => Some(type_info.type_name.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["Dict", "Result", "int", "str"]);
        assert!(idx.references.iter().all(|r| match r {
            Reference::TypeReference { type_info, .. } =>
                type_info.certainty == TypeCertainty::Declared,
            _ => true,
        }));
    }

    #[test]
    fn test_assignment_emits_joint_write() {
        let source = "count = 0\ncount = count + 1\n";
        let idx = index("aw.py", source, Language::Python);
        let assignments = idx
            .references
            .iter()
            .filter(|r| matches!(r, Reference::Assignment { .. }))
            .count();
        let writes = idx
            .references
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Reference::VariableReference {
                        access_type: AccessType::Write,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(assignments, 2);
        assert_eq!(writes, 2);
    }

    #[test]
    fn test_python_keyword_argument_lambda_is_callback() {
        let source = "items.sort(key=lambda x: x.rank)\n";
        let idx = index("kw.py", source, Language::Python);
        let lambda = idx
            .definitions
            .functions
            .values()
            .find(|f| f.name == "<lambda>")
            .expect("lambda recorded");
        let context = lambda.callback_context.as_ref().unwrap();
        assert!(context.is_callback);
        assert!(context.receiver_location.is_some());
    }

    // -------------------------------------------------------------------------
    // Definitions across languages
    // -------------------------------------------------------------------------

    #[test]
    fn test_typescript_class_members() {
        let source = "export class Repo<T> extends Base implements Store {\n  private readonly items: T[] = [];\n  constructor(public name: string) { super(); }\n  static of<T>(name: string): Repo<T> { return new Repo(name); }\n  async load(id?: number): Promise<T> { return this.items[id]; }\n}\n";
        let idx = index("repo.ts", source, Language::TypeScript);
        let class = class_by_name(&idx, "Repo");

        assert!(class.is_exported);
        assert_eq!(class.generics.as_deref(), Some("<T>"));
        assert!(class.extends.iter().any(|e| *e == "Base"));
        assert!(class.extends.iter().any(|e| *e == "Store"));
        assert_eq!(class.constructors.len(), 1);

        let items = class.properties.iter().find(|p| p.name == "items").unwrap();
        assert!(items.flags.contains(MemberFlags::READONLY));
        assert_eq!(items.access_modifier, Some(AccessModifier::Private));
        assert_eq!(items.type_annotation.as_deref(), Some("T[]"));

        // Parameter property from the constructor
        let name_prop = class.properties.iter().find(|p| p.name == "name").unwrap();
        assert_eq!(name_prop.access_modifier, Some(AccessModifier::Public));

        let of = class.methods.iter().find(|m| m.name == "of").unwrap();
        assert!(of.flags.contains(MemberFlags::STATIC));
        let load = class.methods.iter().find(|m| m.name == "load").unwrap();
        assert!(load.flags.contains(MemberFlags::ASYNC));
        assert_eq!(load.signature.return_type.as_deref(), Some("Promise<T>"));
        let id = &load.signature.parameters[0];
        assert!(id.optional);
    }

    #[test]
    fn test_typescript_interface_enum_namespace_alias() {
        let source = "export interface Shape {\n  area(): number;\n  name?: string;\n}\nexport const enum Status { Active = 1, Idle }\nnamespace Util { export const x = 1; }\nexport type Pair<A, B> = [A, B];\n";
        let idx = index("decls.ts", source, Language::TypeScript);

        let shape = idx
            .definitions
            .interfaces
            .values()
            .find(|i| i.name == "Shape")
            .expect("interface Shape");
        assert!(shape.is_exported);
        assert_eq!(shape.methods.len(), 1);
        assert_eq!(shape.properties.len(), 1);
        assert!(shape.properties[0].optional);

        let status = idx
            .definitions
            .enums
            .values()
            .find(|e| e.name == "Status")
            .expect("enum Status");
        assert!(status.is_const);
        assert_eq!(status.members.len(), 2);
        let active = status.members.iter().find(|m| m.name == "Active").unwrap();
        assert_eq!(active.value.as_deref(), Some("1"));

        assert!(idx
            .definitions
            .namespaces
            .values()
            .any(|n| n.name == "Util"));
        let pair = idx
            .definitions
            .types
            .values()
            .find(|t| t.name == "Pair")
            .expect("type alias Pair");
        assert!(pair.is_exported);
        assert_eq!(pair.generics.as_deref(), Some("<A, B>"));
    }

    #[test]
    fn test_javascript_imports_and_reexports() {
        let source = "import def from \"./a\";\nimport { one, two as deux } from \"./b\";\nimport * as ns from \"./c\";\nconst lib = require(\"lib\");\nconst { readFile } = require(\"fs\");\nexport { one } from \"./b\";\nexport * from \"./d\";\nexport * as all from \"./e\";\n";
        let idx = index("im.js", source, Language::JavaScript);
        let by_name = |name: &str| {
            idx.definitions
                .imported_symbols
                .values()
                .find(|i| i.name == name)
                .unwrap_or_else(|| panic!("import {name}"))
        };

        assert_eq!(by_name("def").import_kind, ImportKind::Default);
        assert_eq!(by_name("one").import_path, "./b");
        let deux = by_name("deux");
        assert_eq!(deux.original_name.as_deref(), Some("two"));
        assert_eq!(by_name("ns").import_kind, ImportKind::Namespace);
        assert_eq!(by_name("lib").import_kind, ImportKind::Namespace);
        assert_eq!(by_name("readFile").import_kind, ImportKind::Named);

        let all = by_name("all");
        assert!(all.export.as_ref().unwrap().is_reexport);
        let star = idx
            .definitions
            .imported_symbols
            .values()
            .find(|i| i.name == "*" && i.import_path == "./d")
            .expect("wildcard re-export");
        assert!(star.export.as_ref().unwrap().is_reexport);
    }

    #[test]
    fn test_python_class_protocol_enum() {
        let source = "from typing import Protocol\nfrom enum import Enum\n\nclass Reader(Protocol):\n    def read(self) -> bytes: ...\n\nclass Color(Enum):\n    RED = 1\n    BLUE = 2\n\nclass Service:\n    \"\"\"Runs things.\"\"\"\n    limit = 10\n    def __init__(self, cfg):\n        self.cfg = cfg\n    @staticmethod\n    def version():\n        return 1\n";
        let idx = index("svc.py", source, Language::Python);

        let reader = idx
            .definitions
            .interfaces
            .values()
            .find(|i| i.name == "Reader")
            .expect("Protocol class becomes an interface");
        assert_eq!(reader.methods.len(), 1);

        let color = idx
            .definitions
            .enums
            .values()
            .find(|e| e.name == "Color")
            .expect("Enum subclass becomes an enum");
        assert_eq!(color.members.len(), 2);
        assert_eq!(
            color
                .members
                .iter()
                .find(|m| m.name == "RED")
                .unwrap()
                .value
                .as_deref(),
            Some("1")
        );

        let service = class_by_name(&idx, "Service");
        assert_eq!(service.docstring.as_deref(), Some("Runs things."));
        assert_eq!(service.constructors.len(), 1);
        assert!(service.properties.iter().any(|p| p.name == "limit"));
        assert!(service.properties.iter().any(|p| p.name == "cfg"));
        let version = service
            .methods
            .iter()
            .find(|m| m.name == "version")
            .unwrap();
        assert_eq!(version.kind, MethodKind::Staticmethod);
    }

    #[test]
    fn test_python_decorators_attach() {
        let source = "@register\nclass Handler:\n    @retry(3)\n    def run(self):\n        pass\n";
        let idx = index("dec.py", source, Language::Python);
        let handler = class_by_name(&idx, "Handler");
        assert!(handler.decorators.iter().any(|d| d.name == "register"));
        let run = handler.methods.iter().find(|m| m.name == "run").unwrap();
        assert!(run.decorators.iter().any(|d| d.name == "retry"));
    }

    #[test]
    fn test_rust_trait_enum_use() {
        let source = "use std::collections::{HashMap, HashSet};\nuse serde::Serialize as Ser;\nuse crate::util::*;\n\npub trait Store {\n    fn get(&self, key: &str) -> Option<String>;\n}\n\npub enum Mode {\n    Fast,\n    Slow = 2,\n}\n";
        let idx = index("lib.rs", source, Language::Rust);

        let store = idx
            .definitions
            .interfaces
            .values()
            .find(|i| i.name == "Store")
            .expect("trait Store");
        assert!(store.is_exported);
        assert_eq!(store.methods.len(), 1);
        assert_eq!(store.methods[0].name, "get");

        let mode = idx
            .definitions
            .enums
            .values()
            .find(|e| e.name == "Mode")
            .expect("enum Mode");
        assert_eq!(mode.members.len(), 2);
        assert_eq!(
            mode.members
                .iter()
                .find(|m| m.name == "Slow")
                .unwrap()
                .value
                .as_deref(),
            Some("2")
        );

        let by_name = |name: &str| {
            idx.definitions
                .imported_symbols
                .values()
                .find(|i| i.name == name)
                .unwrap_or_else(|| panic!("import {name}"))
        };
        assert_eq!(by_name("HashMap").import_path, "std::collections::HashMap");
        assert_eq!(by_name("HashSet").import_path, "std::collections::HashSet");
        let ser = by_name("Ser");
        assert_eq!(ser.original_name.as_deref(), Some("Serialize"));
        let star = by_name("*");
        assert_eq!(star.import_kind, ImportKind::Namespace);
        assert_eq!(star.import_path, "crate::util");
    }

    #[test]
    fn test_rust_docstring_attaches() {
        let source = "/// Parses a thing.\n/// Returns None on failure.\npub fn parse(input: &str) -> Option<u32> {\n    input.parse().ok()\n}\n";
        let idx = index("doc.rs", source, Language::Rust);
        let parse = function_by_name(&idx, "parse");
        let doc = parse.docstring.as_deref().expect("doc comment consumed");
        assert!(doc.contains("Parses a thing."));
        assert!(doc.contains("Returns None on failure."));
    }

    #[test]
    fn test_function_collection_tracking() {
        let source = "def alpha(): pass\ndef beta(): pass\n\nhandlers = [alpha, beta]\nbackup = handlers\nchosen = handlers[0]\nmade = alpha()\n";
        let idx = index("fc.py", source, Language::Python);
        let var = |name: &str| {
            idx.definitions
                .variables
                .values()
                .find(|v| v.name == name)
                .unwrap_or_else(|| panic!("variable {name}"))
        };

        let handlers = var("handlers");
        let collection = handlers.function_collection.as_ref().unwrap();
        assert_eq!(collection.collection_type, CollectionType::Array);
        assert_eq!(collection.stored_references.len(), 2);
        assert_eq!(collection.collection_id, handlers.symbol_id);

        assert!(var("backup").collection_source.is_some());
        assert_eq!(var("chosen").derived_from.as_deref(), Some("handlers"));
        assert_eq!(var("made").initialized_from_call.as_deref(), Some("alpha"));
    }

    #[test]
    fn test_lambda_not_exported() {
        let source = "double = lambda x: x * 2\n";
        let idx = index("lam.py", source, Language::Python);
        let lambda = idx
            .definitions
            .functions
            .values()
            .find(|f| f.name == "<lambda>")
            .expect("lambda");
        assert!(!lambda.is_exported);
    }

    // -------------------------------------------------------------------------
    // Serialization round-trip
    // -------------------------------------------------------------------------

    #[test]
    fn test_json_round_trip_is_idempotent() {
        let source = "export class Point {\n  constructor(public x: number, public y: number) {}\n  norm(): number { return Math.sqrt(this.x * this.x + this.y * this.y); }\n}\nconst origin = new Point(0, 0);\norigin.norm();\n";
        let idx = index("pt.ts", source, Language::TypeScript);
        assert!(!idx.references.is_empty());

        let json = idx.to_json().expect("serialize");
        let back = SemanticIndex::from_json(&json).expect("deserialize");
        assert_eq!(back, idx);

        // A second hop changes nothing
        let json2 = back.to_json().expect("serialize again");
        assert_eq!(
            SemanticIndex::from_json(&json2).expect("deserialize again"),
            back
        );
    }
}
