//! Definition Builder
//!
//! Accumulation surface the per-language handlers write through. Methods
//! are idempotent; attachment methods silently drop orphans (a method whose
//! class never materialized) so partial trees still index. The builder also
//! owns the documentation buffer and the deferred resolutions (function
//! collections, collection aliases, callback receivers) that need the whole
//! file before they can settle.
//!
//! @module index/builder

use std::collections::{HashMap, HashSet};

use compact_str::CompactString;
use tracing::debug;

use crate::index::types::{
    ClassDef, DefinitionSet, Decorator, EnumDef, EnumMember, FunctionDef, ImportDef, InterfaceDef,
    Location, MethodDef, NamespaceDef, ParameterDef, PropertyDef, SymbolId, TypeAliasDef,
    VariableDef,
};

/// Lines of separation a stored doc comment may have from the declaration
/// that consumes it.
const DOC_ADJACENCY_LINES: u32 = 2;

// =============================================================================
// DOCUMENTATION BUFFER
// =============================================================================

#[derive(Debug, Clone)]
struct PendingDoc {
    text: String,
    location: Location,
}

// =============================================================================
// DEFINITION BUILDER
// =============================================================================

/// Builds one file's `DefinitionSet`. Create fresh per invocation.
#[derive(Default)]
pub struct DefinitionBuilder {
    functions: HashMap<SymbolId, FunctionDef>,
    classes: HashMap<SymbolId, ClassDef>,
    interfaces: HashMap<SymbolId, InterfaceDef>,
    enums: HashMap<SymbolId, EnumDef>,
    namespaces: HashMap<SymbolId, NamespaceDef>,
    type_aliases: HashMap<SymbolId, TypeAliasDef>,
    variables: HashMap<SymbolId, VariableDef>,
    imports: HashMap<SymbolId, ImportDef>,

    classes_by_name: HashMap<CompactString, SymbolId>,
    interfaces_by_name: HashMap<CompactString, SymbolId>,
    enums_by_name: HashMap<CompactString, SymbolId>,

    pending_doc: Option<PendingDoc>,
    /// `(anonymous fn id, callee root name)` waiting for external/local
    /// resolution at build time
    pending_callback_callees: Vec<(SymbolId, CompactString)>,
    /// Variables whose collection references still need filtering against
    /// the file's callables
    pending_collections: Vec<SymbolId>,
    /// `(variable id, aliased variable name)` for `x = y` initializers
    pending_aliases: Vec<(SymbolId, CompactString)>,
}

impl DefinitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Top-level declarations
    // -------------------------------------------------------------------------

    pub fn add_class(&mut self, class: ClassDef) {
        self.classes_by_name
            .entry(class.name.clone())
            .or_insert_with(|| class.symbol_id.clone());
        self.classes.entry(class.symbol_id.clone()).or_insert(class);
    }

    pub fn add_interface(&mut self, interface: InterfaceDef) {
        self.interfaces_by_name
            .entry(interface.name.clone())
            .or_insert_with(|| interface.symbol_id.clone());
        self.interfaces
            .entry(interface.symbol_id.clone())
            .or_insert(interface);
    }

    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.enums_by_name
            .entry(enum_def.name.clone())
            .or_insert_with(|| enum_def.symbol_id.clone());
        self.enums
            .entry(enum_def.symbol_id.clone())
            .or_insert(enum_def);
    }

    pub fn add_namespace(&mut self, namespace: NamespaceDef) {
        self.namespaces
            .entry(namespace.symbol_id.clone())
            .or_insert(namespace);
    }

    pub fn add_type_alias(&mut self, alias: TypeAliasDef) {
        self.type_aliases
            .entry(alias.symbol_id.clone())
            .or_insert(alias);
    }

    pub fn add_function(&mut self, function: FunctionDef) {
        self.functions
            .entry(function.symbol_id.clone())
            .or_insert(function);
    }

    /// Anonymous functions land in the functions map alongside named ones;
    /// their callback receiver resolves at `build()`.
    pub fn add_anonymous_function(
        &mut self,
        function: FunctionDef,
        callee_root: Option<CompactString>,
    ) {
        if let Some(callee) = callee_root {
            self.pending_callback_callees
                .push((function.symbol_id.clone(), callee));
        }
        self.add_function(function);
    }

    pub fn add_variable(&mut self, variable: VariableDef) {
        let id = variable.symbol_id.clone();
        if variable.function_collection.is_some() {
            self.pending_collections.push(id.clone());
        }
        self.variables.entry(id).or_insert(variable);
    }

    /// Record that `variable` was initialized from a bare identifier so a
    /// collection summary can be copied over at `build()`.
    pub fn note_variable_alias(&mut self, variable_id: SymbolId, source_name: CompactString) {
        self.pending_aliases.push((variable_id, source_name));
    }

    pub fn add_import(&mut self, import: ImportDef) {
        self.imports.entry(import.symbol_id.clone()).or_insert(import);
    }

    // -------------------------------------------------------------------------
    // Member attachment (orphans silently dropped)
    // -------------------------------------------------------------------------

    pub fn add_method_to_class(&mut self, class_id: &SymbolId, method: MethodDef) {
        match self.classes.get_mut(class_id) {
            Some(class) => {
                if !class.methods.iter().any(|m| m.symbol_id == method.symbol_id) {
                    class.methods.push(method);
                }
            }
            None => debug!(class = %class_id, method = %method.name, "orphan method dropped"),
        }
    }

    pub fn add_constructor_to_class(&mut self, class_id: &SymbolId, constructor: MethodDef) {
        match self.classes.get_mut(class_id) {
            Some(class) => {
                if !class
                    .constructors
                    .iter()
                    .any(|c| c.symbol_id == constructor.symbol_id)
                {
                    class.constructors.push(constructor);
                }
            }
            None => debug!(class = %class_id, "orphan constructor dropped"),
        }
    }

    pub fn add_property_to_class(&mut self, class_id: &SymbolId, property: PropertyDef) {
        match self.classes.get_mut(class_id) {
            Some(class) => {
                // Instance attributes are often assigned in several
                // methods; the first sighting wins.
                if !class.properties.iter().any(|p| p.name == property.name) {
                    class.properties.push(property);
                }
            }
            None => debug!(class = %class_id, property = %property.name, "orphan property dropped"),
        }
    }

    pub fn add_method_signature_to_interface(
        &mut self,
        interface_id: &SymbolId,
        signature: MethodDef,
    ) {
        match self.interfaces.get_mut(interface_id) {
            Some(interface) => {
                if !interface
                    .methods
                    .iter()
                    .any(|m| m.symbol_id == signature.symbol_id)
                {
                    interface.methods.push(signature);
                }
            }
            None => debug!(interface = %interface_id, "orphan method signature dropped"),
        }
    }

    pub fn add_property_signature_to_interface(
        &mut self,
        interface_id: &SymbolId,
        property: PropertyDef,
    ) {
        match self.interfaces.get_mut(interface_id) {
            Some(interface) => {
                if !interface.properties.iter().any(|p| p.name == property.name) {
                    interface.properties.push(property);
                }
            }
            None => debug!(interface = %interface_id, "orphan property signature dropped"),
        }
    }

    pub fn add_enum_member(&mut self, enum_id: &SymbolId, member: EnumMember) {
        match self.enums.get_mut(enum_id) {
            Some(enum_def) => {
                if !enum_def
                    .members
                    .iter()
                    .any(|m| m.symbol_id == member.symbol_id)
                {
                    enum_def.members.push(member);
                }
            }
            None => debug!(enum_id = %enum_id, member = %member.name, "orphan enum member dropped"),
        }
    }

    /// Attach a parameter to whichever callable owns `parent_id`:
    /// a function, a class method or constructor, or an interface signature.
    pub fn add_parameter_to_callable(&mut self, parent_id: &SymbolId, parameter: ParameterDef) {
        if let Some(function) = self.functions.get_mut(parent_id) {
            push_parameter(&mut function.signature.parameters, parameter);
            return;
        }
        for class in self.classes.values_mut() {
            for method in class
                .methods
                .iter_mut()
                .chain(class.constructors.iter_mut())
            {
                if method.symbol_id == *parent_id {
                    push_parameter(&mut method.signature.parameters, parameter);
                    return;
                }
            }
        }
        for interface in self.interfaces.values_mut() {
            for method in interface.methods.iter_mut() {
                if method.symbol_id == *parent_id {
                    push_parameter(&mut method.signature.parameters, parameter);
                    return;
                }
            }
        }
        debug!(parent = %parent_id, parameter = %parameter.name, "orphan parameter dropped");
    }

    pub fn add_decorator_to_target(&mut self, target_id: &SymbolId, decorator: Decorator) {
        if let Some(class) = self.classes.get_mut(target_id) {
            class.decorators.push(decorator);
            return;
        }
        for class in self.classes.values_mut() {
            for method in class
                .methods
                .iter_mut()
                .chain(class.constructors.iter_mut())
            {
                if method.symbol_id == *target_id {
                    method.decorators.push(decorator);
                    return;
                }
            }
            for property in class.properties.iter_mut() {
                if property.symbol_id == *target_id {
                    property.decorators.push(decorator);
                    return;
                }
            }
        }
        debug!(target = %target_id, decorator = %decorator.name, "orphan decorator dropped");
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Whether a variable of this name is already bound in `scope`.
    /// Reassignments in the same scope are uses, not fresh declarations.
    pub fn variable_exists(&self, name: &str, scope: &SymbolId) -> bool {
        self.variables
            .values()
            .any(|v| v.name == name && v.defining_scope_id == *scope)
    }

    pub fn find_class_by_name(&self, name: &str) -> Option<SymbolId> {
        self.classes_by_name.get(name).cloned()
    }

    pub fn find_interface_by_name(&self, name: &str) -> Option<SymbolId> {
        self.interfaces_by_name.get(name).cloned()
    }

    pub fn find_enum_by_name(&self, name: &str) -> Option<SymbolId> {
        self.enums_by_name.get(name).cloned()
    }

    /// Mark an already-registered definition as exported by name, for
    /// `export { X }` clauses that refer back to a local declaration.
    pub fn mark_exported_by_name(&mut self, name: &str, export_name: Option<CompactString>) {
        let info = crate::index::types::ExportInfo {
            is_default: export_name.as_deref() == Some("default"),
            is_reexport: false,
            export_name,
            source: None,
        };
        for function in self.functions.values_mut() {
            if function.name == name {
                function.is_exported = true;
                function.export = Some(info.clone());
                return;
            }
        }
        for class in self.classes.values_mut() {
            if class.name == name {
                class.is_exported = true;
                class.export = Some(info.clone());
                return;
            }
        }
        for variable in self.variables.values_mut() {
            if variable.name == name {
                variable.is_exported = true;
                variable.export = Some(info);
                return;
            }
        }
        debug!(name, "export clause names no local declaration");
    }

    // -------------------------------------------------------------------------
    // Documentation buffer
    // -------------------------------------------------------------------------

    /// Stash a doc comment for the next declaration. A comment on the line
    /// directly below the pending one extends it (`///` blocks arrive one
    /// line per capture); anything else overwrites. Whatever is left
    /// unconsumed dies with `build()`.
    pub fn store_documentation(&mut self, text: String, location: Location) {
        if let Some(pending) = self.pending_doc.as_mut() {
            if location.start_line == pending.location.end_line + 1 {
                pending.text.push('\n');
                pending.text.push_str(&text);
                pending.location.end_line = location.end_line;
                pending.location.end_column = location.end_column;
                return;
            }
        }
        self.pending_doc = Some(PendingDoc { text, location });
    }

    /// Hand the stored comment to a declaration starting at `location` if
    /// the comment ends just above it.
    pub fn consume_documentation(&mut self, location: &Location) -> Option<String> {
        let doc = self.pending_doc.as_ref()?;
        let adjacent = doc.location.end_line < location.start_line
            && location.start_line - doc.location.end_line <= DOC_ADJACENCY_LINES;
        if adjacent {
            self.pending_doc.take().map(|d| d.text)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Finalization
    // -------------------------------------------------------------------------

    /// Settle deferred resolutions and freeze the definition set.
    pub fn build(mut self) -> DefinitionSet {
        let callables = self.callable_names();
        for id in std::mem::take(&mut self.pending_collections) {
            if let Some(variable) = self.variables.get_mut(&id) {
                if let Some(collection) = variable.function_collection.as_mut() {
                    collection
                        .stored_references
                        .retain(|name| callables.contains(name.as_str()));
                    if collection.stored_references.is_empty() {
                        variable.function_collection = None;
                    }
                }
            }
        }

        for (variable_id, source_name) in std::mem::take(&mut self.pending_aliases) {
            let source_collection = self
                .variables
                .values()
                .find(|v| v.name == source_name)
                .and_then(|v| v.function_collection.clone());
            if let Some(collection) = source_collection {
                if let Some(variable) = self.variables.get_mut(&variable_id) {
                    variable.collection_source = Some(collection);
                }
            }
        }

        let local_names = self.local_names();
        for (function_id, callee_root) in std::mem::take(&mut self.pending_callback_callees) {
            if let Some(function) = self.functions.get_mut(&function_id) {
                if let Some(context) = function.callback_context.as_mut() {
                    context.receiver_is_external =
                        Some(!local_names.contains(callee_root.as_str()));
                }
            }
        }

        DefinitionSet {
            functions: self.functions,
            classes: self.classes,
            interfaces: self.interfaces,
            enums: self.enums,
            namespaces: self.namespaces,
            types: self.type_aliases,
            variables: self.variables,
            imported_symbols: self.imports,
        }
    }

    /// Names a function collection may legitimately store
    fn callable_names(&self) -> HashSet<CompactString> {
        let mut names: HashSet<CompactString> = HashSet::new();
        for function in self.functions.values() {
            if function.callback_context.is_none() {
                names.insert(function.name.clone());
            }
        }
        for class in self.classes.values() {
            for method in class.methods.iter().chain(class.constructors.iter()) {
                names.insert(method.name.clone());
            }
        }
        for interface in self.interfaces.values() {
            for method in &interface.methods {
                names.insert(method.name.clone());
            }
        }
        names
    }

    /// Every top-level name defined (or bound by import) in this file.
    /// Import bindings still count as external receivers.
    fn local_names(&self) -> HashSet<CompactString> {
        let mut names: HashSet<CompactString> = HashSet::new();
        for function in self.functions.values() {
            names.insert(function.name.clone());
        }
        for class in self.classes.values() {
            names.insert(class.name.clone());
        }
        for variable in self.variables.values() {
            names.insert(variable.name.clone());
        }
        names
    }
}

fn push_parameter(parameters: &mut Vec<ParameterDef>, parameter: ParameterDef) {
    if !parameters.iter().any(|p| p.symbol_id == parameter.symbol_id) {
        parameters.push(parameter);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::symbol_id;
    use crate::index::types::{
        CallbackContext, CollectionType, FunctionCollection, FunctionSignature, MemberFlags,
        MethodKind, VariableKind,
    };

    fn loc(sl: u32, sc: u32, el: u32, ec: u32) -> Location {
        Location::new("t.ts", sl, sc, el, ec)
    }

    fn scope() -> SymbolId {
        symbol_id::module_id(&loc(1, 1, 50, 0))
    }

    fn class_def(name: &str, sl: u32) -> ClassDef {
        let location = loc(sl, 1, sl + 10, 1);
        ClassDef {
            symbol_id: symbol_id::definition_id("class", &location),
            name: name.into(),
            location,
            defining_scope_id: scope(),
            extends: vec![],
            generics: None,
            methods: vec![],
            properties: vec![],
            constructors: vec![],
            decorators: vec![],
            is_exported: false,
            export: None,
            body_scope_id: None,
            docstring: None,
        }
    }

    fn method_def(name: &str, sl: u32) -> MethodDef {
        let location = loc(sl, 3, sl + 2, 3);
        MethodDef {
            symbol_id: symbol_id::definition_id("method", &location),
            name: name.into(),
            location,
            defining_scope_id: scope(),
            signature: FunctionSignature::default(),
            generics: None,
            kind: MethodKind::Regular,
            access_modifier: None,
            flags: MemberFlags::empty(),
            decorators: vec![],
            body_scope_id: None,
            docstring: None,
        }
    }

    fn function_def(name: &str, sl: u32) -> FunctionDef {
        let location = loc(sl, 1, sl + 2, 1);
        FunctionDef {
            symbol_id: symbol_id::definition_id("function", &location),
            name: name.into(),
            location,
            defining_scope_id: scope(),
            signature: FunctionSignature::default(),
            generics: None,
            is_exported: false,
            export: None,
            is_async: false,
            body_scope_id: None,
            docstring: None,
            callback_context: None,
        }
    }

    fn variable_def(name: &str, sl: u32) -> VariableDef {
        let location = loc(sl, 1, sl, 20);
        VariableDef {
            symbol_id: symbol_id::definition_id("variable", &location),
            name: name.into(),
            location,
            defining_scope_id: scope(),
            kind: VariableKind::Variable,
            type_annotation: None,
            initial_value: None,
            is_exported: false,
            export: None,
            function_collection: None,
            derived_from: None,
            initialized_from_call: None,
            collection_source: None,
        }
    }

    #[test]
    fn test_method_attachment_and_orphan_drop() {
        let mut builder = DefinitionBuilder::new();
        let class = class_def("Widget", 1);
        let class_id = class.symbol_id.clone();
        builder.add_class(class);
        builder.add_method_to_class(&class_id, method_def("render", 2));

        let missing = symbol_id::definition_id("class", &loc(90, 1, 95, 1));
        builder.add_method_to_class(&missing, method_def("ghost", 91));

        let set = builder.build();
        assert_eq!(set.classes[&class_id].methods.len(), 1);
        assert_eq!(set.classes.len(), 1);
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let mut builder = DefinitionBuilder::new();
        builder.add_class(class_def("Widget", 1));
        builder.add_class(class_def("Widget", 1));
        assert_eq!(builder.build().classes.len(), 1);
    }

    #[test]
    fn test_property_dedupe_by_name() {
        let mut builder = DefinitionBuilder::new();
        let class = class_def("Config", 1);
        let class_id = class.symbol_id.clone();
        builder.add_class(class);
        for sl in [3, 7] {
            let location = loc(sl, 9, sl, 15);
            builder.add_property_to_class(
                &class_id,
                PropertyDef {
                    symbol_id: symbol_id::definition_id("property", &location),
                    name: "value".into(),
                    location,
                    defining_scope_id: scope(),
                    type_annotation: None,
                    initial_value: None,
                    optional: false,
                    access_modifier: None,
                    flags: MemberFlags::empty(),
                    decorators: vec![],
                },
            );
        }
        let set = builder.build();
        assert_eq!(set.classes[&class_id].properties.len(), 1);
        assert_eq!(set.classes[&class_id].properties[0].location.start_line, 3);
    }

    #[test]
    fn test_parameter_routing_to_class_method() {
        let mut builder = DefinitionBuilder::new();
        let class = class_def("Svc", 1);
        let class_id = class.symbol_id.clone();
        builder.add_class(class);
        let method = method_def("run", 2);
        let method_id = method.symbol_id.clone();
        builder.add_method_to_class(&class_id, method);

        let location = loc(2, 10, 2, 14);
        builder.add_parameter_to_callable(
            &method_id,
            ParameterDef {
                symbol_id: symbol_id::definition_id("parameter", &location),
                name: "opts".into(),
                location,
                defining_scope_id: scope(),
                type_annotation: Some("Options".into()),
                default_value: None,
                optional: false,
                is_rest: false,
            },
        );

        let set = builder.build();
        let run = &set.classes[&class_id].methods[0];
        assert_eq!(run.signature.parameters.len(), 1);
        assert_eq!(run.signature.parameters[0].name, "opts");
    }

    #[test]
    fn test_documentation_adjacency() {
        let mut builder = DefinitionBuilder::new();
        builder.store_documentation("/** Adds. */".into(), loc(1, 1, 1, 12));
        // Too far below the comment
        assert_eq!(builder.consume_documentation(&loc(10, 1, 12, 1)), None);
        // Adjacent declaration takes it, exactly once
        assert_eq!(
            builder.consume_documentation(&loc(2, 1, 4, 1)).as_deref(),
            Some("/** Adds. */")
        );
        assert_eq!(builder.consume_documentation(&loc(2, 1, 4, 1)), None);
    }

    #[test]
    fn test_collection_filtering_and_alias_propagation() {
        let mut builder = DefinitionBuilder::new();
        builder.add_function(function_def("alpha", 1));
        builder.add_function(function_def("beta", 4));

        let mut table = variable_def("table", 10);
        let table_id = table.symbol_id.clone();
        table.function_collection = Some(FunctionCollection {
            collection_type: CollectionType::Array,
            stored_references: vec!["alpha".into(), "beta".into(), "gamma".into()],
            collection_id: table_id.clone(),
        });
        builder.add_variable(table);

        let alias = variable_def("backup", 11);
        let alias_id = alias.symbol_id.clone();
        builder.add_variable(alias);
        builder.note_variable_alias(alias_id.clone(), "table".into());

        let set = builder.build();
        let stored = &set.variables[&table_id]
            .function_collection
            .as_ref()
            .unwrap()
            .stored_references;
        assert_eq!(stored.as_slice(), ["alpha", "beta"]);
        assert!(set.variables[&alias_id].collection_source.is_some());
    }

    #[test]
    fn test_callback_receiver_resolution() {
        let mut builder = DefinitionBuilder::new();
        builder.add_variable(variable_def("items", 1));

        let mut local_cb = function_def("<anonymous>", 3);
        local_cb.symbol_id = symbol_id::anonymous_id(&loc(3, 10, 3, 20));
        local_cb.callback_context = Some(CallbackContext {
            is_callback: true,
            receiver_location: Some(loc(3, 1, 3, 30)),
            receiver_is_external: None,
        });
        let local_id = local_cb.symbol_id.clone();
        builder.add_anonymous_function(local_cb, Some("items".into()));

        let mut ext_cb = function_def("<anonymous>", 5);
        ext_cb.symbol_id = symbol_id::anonymous_id(&loc(5, 10, 5, 20));
        ext_cb.callback_context = Some(CallbackContext {
            is_callback: true,
            receiver_location: Some(loc(5, 1, 5, 30)),
            receiver_is_external: None,
        });
        let ext_id = ext_cb.symbol_id.clone();
        builder.add_anonymous_function(ext_cb, Some("fetch".into()));

        let set = builder.build();
        assert_eq!(
            set.functions[&local_id]
                .callback_context
                .as_ref()
                .unwrap()
                .receiver_is_external,
            Some(false)
        );
        assert_eq!(
            set.functions[&ext_id]
                .callback_context
                .as_ref()
                .unwrap()
                .receiver_is_external,
            Some(true)
        );
    }
}
