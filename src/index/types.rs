//! Core Data Structures for the Semantic Index
//!
//! Everything the single-file pipeline produces lives here: source
//! coordinates, the lexical scope tree, structured declarations, tagged
//! references, and the `SemanticIndex` container with its canonical JSON
//! encoding.
//!
//! @module index/types

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use bitflags::bitflags;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::error::{Error, Result};

pub use crate::index::symbol_id::SymbolId;

/// Scope identifiers share the symbol-id scheme.
pub type ScopeId = SymbolId;

/// Ordered identifier segments of a dotted expression, root-first.
pub type PropertyChain = SmallVec<[CompactString; 4]>;

// =============================================================================
// LANGUAGE
// =============================================================================

/// The enumerated set of supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
}

impl Language {
    /// Resolve a language by name. Unknown names are a hard error.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "javascript" => Ok(Self::JavaScript),
            "typescript" => Ok(Self::TypeScript),
            "python" => Ok(Self::Python),
            "rust" => Ok(Self::Rust),
            other => Err(Error::UnsupportedLanguage {
                language: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Rust => "rust",
        }
    }

    /// The tree-sitter grammar for this language
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect language from file path extension
pub fn detect_language(path: &Path) -> Option<Language> {
    match path.extension().and_then(|ext| ext.to_str())? {
        "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
        "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
        "py" | "pyi" => Some(Language::Python),
        "rs" => Some(Language::Rust),
        _ => None,
    }
}

// =============================================================================
// LOCATION
// =============================================================================

/// A source range, 1-indexed and inclusive on both ends.
///
/// Tree-sitter's 0-indexed start positions normalize by adding 1 to row and
/// column; its exclusive end positions normalize to inclusive by adding 1 to
/// the row only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file_path: CompactString,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Location {
    pub fn new(
        file_path: impl Into<CompactString>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Build a location from a tree-sitter node
    pub fn from_node(node: tree_sitter::Node<'_>, file_path: &str) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            file_path: CompactString::new(file_path),
            start_line: start.row as u32 + 1,
            start_column: start.column as u32 + 1,
            end_line: end.row as u32 + 1,
            end_column: end.column as u32,
        }
    }

    #[inline]
    pub fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_column)
    }

    #[inline]
    pub fn end(&self) -> (u32, u32) {
        (self.end_line, self.end_column)
    }

    /// Whether `self` contains `other`, boundaries inclusive.
    ///
    /// Lexicographic `(line, column)` ordering; equal boundaries count as
    /// contained.
    pub fn contains(&self, other: &Location) -> bool {
        other.start() >= self.start() && other.end() <= self.end()
    }

    /// Disambiguation metric among equally-containing locations.
    pub fn area(&self) -> i64 {
        let end = self.end_line as i64 * 10_000 + self.end_column as i64;
        let start = self.start_line as i64 * 10_000 + self.start_column as i64;
        end - start
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.file_path, self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

// =============================================================================
// LEXICAL SCOPES
// =============================================================================

/// Kind of lexical scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Module,
    Class,
    Function,
    Method,
    Constructor,
    Block,
}

impl ScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Class => "class",
            Self::Function => "function",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Block => "block",
        }
    }
}

/// A node in the lexical scope tree.
///
/// Exactly one scope per index has `parent_id == None`: the module scope
/// spanning the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalScope {
    pub id: ScopeId,
    pub parent_id: Option<ScopeId>,
    pub name: Option<CompactString>,
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
    pub location: Location,
    pub child_ids: Vec<ScopeId>,
}

impl LexicalScope {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// =============================================================================
// MEMBER MODIFIERS
// =============================================================================

/// Visibility of a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
}

bitflags! {
    /// Boolean modifiers shared by methods and properties
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[repr(transparent)]
    pub struct MemberFlags: u8 {
        const STATIC = 0b0000_0001;
        const ABSTRACT = 0b0000_0010;
        const ASYNC = 0b0000_0100;
        const READONLY = 0b0000_1000;
    }
}

/// How a method participates in its class.
///
/// Python `@classmethod` / `@staticmethod` / `@property` land here;
/// `abstract` stays an orthogonal flag in [`MemberFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    #[default]
    Regular,
    Classmethod,
    Staticmethod,
    Getter,
    Setter,
}

// =============================================================================
// DECLARATIONS
// =============================================================================

/// A decorator/attribute applied to a class, method, or property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decorator {
    pub name: CompactString,
    pub location: Location,
}

/// Export metadata beyond the `is_exported` flag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportInfo {
    pub is_default: bool,
    pub is_reexport: bool,
    /// Name the symbol is exported under, when it differs from `name`
    pub export_name: Option<CompactString>,
    /// Module specifier of a re-export (`export { X } from "mod"`)
    pub source: Option<CompactString>,
}

/// A single formal parameter of a callable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    #[serde(rename = "type")]
    pub type_annotation: Option<CompactString>,
    pub default_value: Option<CompactString>,
    pub optional: bool,
    pub is_rest: bool,
}

/// Parameters plus declared return type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub parameters: Vec<ParameterDef>,
    pub return_type: Option<CompactString>,
}

/// Where an anonymous function sits relative to a call expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackContext {
    pub is_callback: bool,
    /// Location of the enclosing call expression when `is_callback`
    pub receiver_location: Option<Location>,
    /// Whether the called name resolves outside this file
    pub receiver_is_external: Option<bool>,
}

/// A free function, named function expression, or anonymous function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub signature: FunctionSignature,
    pub generics: Option<CompactString>,
    pub is_exported: bool,
    pub export: Option<ExportInfo>,
    pub is_async: bool,
    pub body_scope_id: Option<ScopeId>,
    pub docstring: Option<String>,
    /// Present only for anonymous functions
    pub callback_context: Option<CallbackContext>,
}

/// A method or constructor attached to a class, or a signature inside an
/// interface (signatures carry no body scope).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub signature: FunctionSignature,
    pub generics: Option<CompactString>,
    pub kind: MethodKind,
    pub access_modifier: Option<AccessModifier>,
    pub flags: MemberFlags,
    pub decorators: Vec<Decorator>,
    pub body_scope_id: Option<ScopeId>,
    pub docstring: Option<String>,
}

/// A class field / instance attribute, or a property signature inside an
/// interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    #[serde(rename = "type")]
    pub type_annotation: Option<CompactString>,
    pub initial_value: Option<CompactString>,
    pub optional: bool,
    pub access_modifier: Option<AccessModifier>,
    pub flags: MemberFlags,
    pub decorators: Vec<Decorator>,
}

/// A class declaration (JS/TS `class`, Python class, Rust `struct`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub extends: Vec<CompactString>,
    pub generics: Option<CompactString>,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
    pub constructors: Vec<MethodDef>,
    pub decorators: Vec<Decorator>,
    pub is_exported: bool,
    pub export: Option<ExportInfo>,
    pub body_scope_id: Option<ScopeId>,
    pub docstring: Option<String>,
}

/// An interface (TS `interface`, Python `Protocol` subclass, Rust `trait`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub extends: Vec<CompactString>,
    pub generics: Option<CompactString>,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
    pub is_exported: bool,
    pub body_scope_id: Option<ScopeId>,
}

/// One member of an enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub value: Option<CompactString>,
}

/// An enum declaration (TS `enum`, Python `Enum` subclass, Rust `enum`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub members: Vec<EnumMember>,
    pub is_const: bool,
    pub is_exported: bool,
    pub body_scope_id: Option<ScopeId>,
}

/// A namespace / module declaration (TS `namespace`, Rust `mod`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub is_exported: bool,
    pub body_scope_id: Option<ScopeId>,
}

/// Classification of a variable binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Variable,
    Constant,
    TypeAlias,
}

/// Kind of literal collection a variable was initialized with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionType {
    Array,
    Tuple,
    Dict,
    Set,
}

/// A variable initialized with a collection of function references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCollection {
    pub collection_type: CollectionType,
    pub stored_references: Vec<CompactString>,
    pub collection_id: SymbolId,
}

/// A variable or constant binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub kind: VariableKind,
    #[serde(rename = "type")]
    pub type_annotation: Option<CompactString>,
    pub initial_value: Option<CompactString>,
    pub is_exported: bool,
    pub export: Option<ExportInfo>,
    pub function_collection: Option<FunctionCollection>,
    /// Root object name for `x = y[k]` initializers
    pub derived_from: Option<CompactString>,
    /// Callee name when the initializer is a call expression
    pub initialized_from_call: Option<CompactString>,
    /// Collection summary copied from an aliased variable (`x = y`)
    pub collection_source: Option<FunctionCollection>,
}

/// How a name was imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Named,
    Default,
    Namespace,
}

/// One imported binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub import_path: CompactString,
    pub import_kind: ImportKind,
    /// Source-module name when the binding is aliased
    pub original_name: Option<CompactString>,
    pub is_exported: bool,
    pub export: Option<ExportInfo>,
}

/// A type alias (`type X = …`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDef {
    pub symbol_id: SymbolId,
    pub name: CompactString,
    pub location: Location,
    pub defining_scope_id: ScopeId,
    pub type_expression: Option<CompactString>,
    pub generics: Option<CompactString>,
    pub is_exported: bool,
}

// =============================================================================
// REFERENCES
// =============================================================================

/// Language-specific self keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelfKeyword {
    #[serde(rename = "this")]
    This,
    #[serde(rename = "self")]
    SelfValue,
    #[serde(rename = "cls")]
    Cls,
}

/// Read or write access to a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Read,
    Write,
}

/// Confidence of a recorded type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCertainty {
    Declared,
    Inferred,
}

/// A named type occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub type_name: CompactString,
    pub certainty: TypeCertainty,
}

/// A use of a name, tagged by how it is used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    FunctionCall {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
    },
    MethodCall {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
        receiver_location: Option<Location>,
        optional_chaining: bool,
        property_chain: Option<PropertyChain>,
    },
    ConstructorCall {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
        /// Location of the LHS binding receiving the instance, if any
        construct_target: Option<Location>,
    },
    SelfReferenceCall {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
        keyword: SelfKeyword,
        receiver_location: Option<Location>,
    },
    PropertyAccess {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
        property_chain: PropertyChain,
    },
    TypeReference {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
        type_info: TypeInfo,
    },
    VariableReference {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
        access_type: AccessType,
    },
    Assignment {
        name: CompactString,
        location: Location,
        enclosing_scope_id: ScopeId,
    },
}

impl Reference {
    pub fn name(&self) -> &str {
        match self {
            Self::FunctionCall { name, .. }
            | Self::MethodCall { name, .. }
            | Self::ConstructorCall { name, .. }
            | Self::SelfReferenceCall { name, .. }
            | Self::PropertyAccess { name, .. }
            | Self::TypeReference { name, .. }
            | Self::VariableReference { name, .. }
            | Self::Assignment { name, .. } => name,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::FunctionCall { location, .. }
            | Self::MethodCall { location, .. }
            | Self::ConstructorCall { location, .. }
            | Self::SelfReferenceCall { location, .. }
            | Self::PropertyAccess { location, .. }
            | Self::TypeReference { location, .. }
            | Self::VariableReference { location, .. }
            | Self::Assignment { location, .. } => location,
        }
    }

    pub fn enclosing_scope_id(&self) -> &ScopeId {
        match self {
            Self::FunctionCall {
                enclosing_scope_id, ..
            }
            | Self::MethodCall {
                enclosing_scope_id, ..
            }
            | Self::ConstructorCall {
                enclosing_scope_id, ..
            }
            | Self::SelfReferenceCall {
                enclosing_scope_id, ..
            }
            | Self::PropertyAccess {
                enclosing_scope_id, ..
            }
            | Self::TypeReference {
                enclosing_scope_id, ..
            }
            | Self::VariableReference {
                enclosing_scope_id, ..
            }
            | Self::Assignment {
                enclosing_scope_id, ..
            } => enclosing_scope_id,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::FunctionCall { .. } => "function_call",
            Self::MethodCall { .. } => "method_call",
            Self::ConstructorCall { .. } => "constructor_call",
            Self::SelfReferenceCall { .. } => "self_reference_call",
            Self::PropertyAccess { .. } => "property_access",
            Self::TypeReference { .. } => "type_reference",
            Self::VariableReference { .. } => "variable_reference",
            Self::Assignment { .. } => "assignment",
        }
    }
}

// =============================================================================
// DEFINITION SET & SEMANTIC INDEX
// =============================================================================

/// All structured declarations accumulated for one file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DefinitionSet {
    pub functions: HashMap<SymbolId, FunctionDef>,
    pub classes: HashMap<SymbolId, ClassDef>,
    pub interfaces: HashMap<SymbolId, InterfaceDef>,
    pub enums: HashMap<SymbolId, EnumDef>,
    pub namespaces: HashMap<SymbolId, NamespaceDef>,
    pub types: HashMap<SymbolId, TypeAliasDef>,
    pub variables: HashMap<SymbolId, VariableDef>,
    pub imported_symbols: HashMap<SymbolId, ImportDef>,
}

/// The complete per-file index. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticIndex {
    pub file_path: CompactString,
    pub language: Language,
    pub root_scope_id: ScopeId,
    pub scopes: HashMap<ScopeId, LexicalScope>,
    #[serde(flatten)]
    pub definitions: DefinitionSet,
    /// Emission order
    pub references: Vec<Reference>,
}

impl SemanticIndex {
    /// Canonical JSON encoding
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode the canonical JSON encoding
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the index holds nothing beyond the module scope
    pub fn is_empty(&self) -> bool {
        self.scopes.len() <= 1
            && self.references.is_empty()
            && self.definitions.functions.is_empty()
            && self.definitions.classes.is_empty()
            && self.definitions.interfaces.is_empty()
            && self.definitions.enums.is_empty()
            && self.definitions.namespaces.is_empty()
            && self.definitions.types.is_empty()
            && self.definitions.variables.is_empty()
            && self.definitions.imported_symbols.is_empty()
    }

    /// Per-index entity counts
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            scopes: self.scopes.len(),
            functions: self.definitions.functions.len(),
            classes: self.definitions.classes.len(),
            interfaces: self.definitions.interfaces.len(),
            enums: self.definitions.enums.len(),
            namespaces: self.definitions.namespaces.len(),
            type_aliases: self.definitions.types.len(),
            variables: self.definitions.variables.len(),
            imports: self.definitions.imported_symbols.len(),
            references: self.references.len(),
        }
    }
}

/// Entity counts for one index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub scopes: usize,
    pub functions: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub enums: usize,
    pub namespaces: usize,
    pub type_aliases: usize,
    pub variables: usize,
    pub imports: usize,
    pub references: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scopes, {} functions, {} classes, {} interfaces, {} enums, \
             {} namespaces, {} type aliases, {} variables, {} imports, {} references",
            self.scopes,
            self.functions,
            self.classes,
            self.interfaces,
            self.enums,
            self.namespaces,
            self.type_aliases,
            self.variables,
            self.imports,
            self.references
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::symbol_id;

    fn loc(sl: u32, sc: u32, el: u32, ec: u32) -> Location {
        Location::new("test.ts", sl, sc, el, ec)
    }

    #[test]
    fn test_containment_inclusive_boundaries() {
        let outer = loc(1, 1, 10, 5);
        let inner = loc(2, 3, 9, 20);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        // Equal boundaries count as contained, both ways
        assert!(outer.contains(&outer.clone()));
    }

    #[test]
    fn test_containment_column_ordering() {
        let outer = loc(3, 5, 3, 40);
        let inside = loc(3, 10, 3, 12);
        let before = loc(3, 1, 3, 4);
        assert!(outer.contains(&inside));
        assert!(!outer.contains(&before));
    }

    #[test]
    fn test_area_prefers_smaller_span() {
        let wide = loc(1, 1, 20, 1);
        let narrow = loc(5, 1, 6, 1);
        assert!(narrow.area() < wide.area());
    }

    #[test]
    fn test_language_from_name() {
        assert_eq!(Language::from_name("python").unwrap(), Language::Python);
        assert_eq!(Language::from_name("rust").unwrap(), Language::Rust);
        assert!(matches!(
            Language::from_name("ruby"),
            Err(Error::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_detect_language_extensions() {
        assert_eq!(
            detect_language(Path::new("a.tsx")),
            Some(Language::TypeScript)
        );
        assert_eq!(
            detect_language(Path::new("a.mjs")),
            Some(Language::JavaScript)
        );
        assert_eq!(detect_language(Path::new("a.pyi")), Some(Language::Python));
        assert_eq!(detect_language(Path::new("a.rs")), Some(Language::Rust));
        assert_eq!(detect_language(Path::new("a.rb")), None);
    }

    #[test]
    fn test_reference_serde_tag() {
        let reference = Reference::MethodCall {
            name: "push".into(),
            location: loc(4, 3, 4, 12),
            enclosing_scope_id: symbol_id::module_id(&loc(1, 1, 10, 0)),
            receiver_location: Some(loc(4, 3, 4, 7)),
            optional_chaining: false,
            property_chain: Some(PropertyChain::from_iter([
                CompactString::new("list"),
                CompactString::new("push"),
            ])),
        };
        let json = serde_json::to_string(&reference).unwrap();
        assert!(json.contains("\"kind\":\"method_call\""));
        let back: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reference);
    }

    #[test]
    fn test_member_flags_roundtrip() {
        let flags = MemberFlags::STATIC | MemberFlags::ASYNC;
        let json = serde_json::to_string(&flags).unwrap();
        let back: MemberFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
        assert!(back.contains(MemberFlags::STATIC));
        assert!(!back.contains(MemberFlags::READONLY));
    }
}
