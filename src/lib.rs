//! Semdex - Per-file semantic code indexing
//!
//! Turns a parsed concrete syntax tree into a query-able model of one
//! source file: every declaration, the lexical scope tree it lives in, and
//! every reference (calls, constructions, type uses, property accesses,
//! reads and writes) annotated with receivers, property chains, callback
//! context, and export status. JavaScript, TypeScript, Python, and Rust.

pub mod batch;
pub mod core;
pub mod index;

// =============================================================================
// RE-EXPORTS: Errors
// =============================================================================

pub use crate::core::error::{Error, Result};

// =============================================================================
// RE-EXPORTS: Pipeline (index/)
// =============================================================================

pub use crate::index::{build_index_single_file, index_source, SourceFile};

// =============================================================================
// RE-EXPORTS: Data Model (index/types.rs)
// =============================================================================

pub use crate::index::types::{
    detect_language, AccessModifier, AccessType, CallbackContext, ClassDef, CollectionType,
    Decorator, DefinitionSet, EnumDef, EnumMember, ExportInfo, FunctionCollection, FunctionDef,
    FunctionSignature, ImportDef, ImportKind, IndexStats, InterfaceDef, Language, LexicalScope,
    Location, MemberFlags, MethodDef, MethodKind, NamespaceDef, ParameterDef, PropertyChain,
    PropertyDef, Reference, ScopeId, ScopeType, SelfKeyword, SemanticIndex, SymbolId, TypeAliasDef,
    TypeCertainty, TypeInfo, VariableDef, VariableKind,
};

// =============================================================================
// RE-EXPORTS: Batch driver (batch.rs)
// =============================================================================

pub use crate::batch::{index_files, index_path};
