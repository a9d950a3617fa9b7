// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use super::ids::HandleId;
use super::naming::human_title;
use super::paths::PathItem;

/// Well-known namespace holding the primitive schemas (`String`, `Int32`, ...).
pub const SYSTEM_NAMESPACE: &str = "System";

/// Builds the canonical ref for a primitive system schema.
pub fn system_schema_ref(type_name: &str) -> String {
    format!("{SYSTEM_NAMESPACE}#/components/schemas/{type_name}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaKind {
    #[default]
    Class,
    Struct,
    Record,
    Enum,
    Interface,
    Primitive,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Record => "record",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Primitive => "primitive",
        }
    }

    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "struct" => Self::Struct,
            "record" => Self::Record,
            "enum" => Self::Enum,
            "interface" => Self::Interface,
            "primitive" => Self::Primitive,
            _ => Self::Class,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerType {
    #[default]
    None,
    Array,
    List,
    Dictionary,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Array => "Array",
            Self::List => "List",
            Self::Dictionary => "Dictionary",
        }
    }

    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "Array" => Self::Array,
            "List" => Self::List,
            "Dictionary" => Self::Dictionary,
            _ => Self::None,
        }
    }

    pub fn is_collection(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MethodKind {
    #[default]
    Instance,
    Static,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Static => "static",
        }
    }
}

/// A single typed member of a schema definition.
///
/// Exactly one of `type_ref`/`type_name` meaningfully determines the resolved
/// type; a property with a collection container type is a collection of the
/// referenced type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    type_ref: Option<String>,
    type_name: Option<String>,
    kind: SchemaKind,
    container_type: ContainerType,
    title: String,
    description: String,
    nullable: bool,
    read_only: bool,
    default: Option<serde_json::Value>,
}

impl PropertyDefinition {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            type_ref: None,
            type_name: None,
            kind: SchemaKind::default(),
            container_type: ContainerType::default(),
            title: title.into(),
            description: String::new(),
            nullable: false,
            read_only: false,
            default: None,
        }
    }

    /// The default property inserted by the schema editor: a plain
    /// `System.String`, titled after the given name.
    pub fn string_default(name: &str) -> Self {
        Self::of_system_type("String", name)
    }

    /// A primitive property referencing `System#/components/schemas/<type>`.
    pub fn of_system_type(type_name: &str, title: &str) -> Self {
        Self {
            type_ref: Some(system_schema_ref(type_name)),
            type_name: Some(type_name.to_owned()),
            kind: SchemaKind::Primitive,
            container_type: ContainerType::None,
            title: human_title(title),
            description: String::new(),
            nullable: false,
            read_only: false,
            default: None,
        }
    }

    pub fn type_ref(&self) -> Option<&str> {
        self.type_ref.as_deref()
    }

    pub fn set_type_ref<T: Into<String>>(&mut self, type_ref: Option<T>) {
        self.type_ref = type_ref.map(Into::into);
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn set_type_name<T: Into<String>>(&mut self, type_name: Option<T>) {
        self.type_name = type_name.map(Into::into);
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: SchemaKind) {
        self.kind = kind;
    }

    pub fn container_type(&self) -> ContainerType {
        self.container_type
    }

    pub fn set_container_type(&mut self, container_type: ContainerType) {
        self.container_type = container_type;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn set_nullable(&mut self, nullable: bool) {
        self.nullable = nullable;
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn default_value(&self) -> Option<&serde_json::Value> {
        self.default.as_ref()
    }

    pub fn set_default_value(&mut self, default: Option<serde_json::Value>) {
        self.default = default;
    }

    /// The display name of the property's resolved type: the last segment of
    /// `type_ref`, falling back to `type_name`.
    pub fn resolved_type_name(&self) -> Option<&str> {
        if let Some(type_ref) = self.type_ref.as_deref() {
            return type_ref.rsplit('/').next();
        }
        self.type_name.as_deref()
    }
}

/// One parameter (or return slot) of a method overload.
///
/// The instance id is assigned once at creation and never regenerated by
/// rename or retype; it joins the parameter to the boundary handle that
/// represents it on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDef {
    instance_id: HandleId,
    name: String,
    description: Option<String>,
    required: bool,
    type_ref: String,
}

impl ParameterDef {
    pub fn new(instance_id: HandleId, name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            instance_id,
            name: name.into(),
            description: None,
            required: false,
            type_ref: type_ref.into(),
        }
    }

    pub fn instance_id(&self) -> &HandleId {
        &self.instance_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn type_ref(&self) -> &str {
        &self.type_ref
    }

    pub fn set_type_ref(&mut self, type_ref: impl Into<String>) {
        self.type_ref = type_ref.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    parameters: Vec<ParameterDef>,
    returns: Vec<ParameterDef>,
}

impl Signature {
    pub fn new(parameters: Vec<ParameterDef>, returns: Vec<ParameterDef>) -> Self {
        Self {
            parameters,
            returns,
        }
    }

    pub fn parameters(&self) -> &[ParameterDef] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Vec<ParameterDef> {
        &mut self.parameters
    }

    pub fn returns(&self) -> &[ParameterDef] {
        &self.returns
    }

    pub fn returns_mut(&mut self) -> &mut Vec<ParameterDef> {
        &mut self.returns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOverload {
    overload_id: String,
    name: String,
    method_kind: MethodKind,
    description: String,
    signature: Signature,
}

impl MethodOverload {
    pub fn new(overload_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            overload_id: overload_id.into(),
            name: name.into(),
            method_kind: MethodKind::default(),
            description: String::new(),
            signature: Signature::default(),
        }
    }

    pub fn overload_id(&self) -> &str {
        &self.overload_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn method_kind(&self) -> MethodKind {
        self.method_kind
    }

    pub fn set_method_kind(&mut self, method_kind: MethodKind) {
        self.method_kind = method_kind;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn signature_mut(&mut self) -> &mut Signature {
        &mut self.signature
    }

    pub fn set_signature(&mut self, signature: Signature) {
        self.signature = signature;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDefinition {
    owner_ref: String,
    overloads: BTreeMap<String, MethodOverload>,
}

impl MethodDefinition {
    pub fn new(owner_ref: impl Into<String>) -> Self {
        Self {
            owner_ref: owner_ref.into(),
            overloads: BTreeMap::new(),
        }
    }

    pub fn owner_ref(&self) -> &str {
        &self.owner_ref
    }

    pub fn overloads(&self) -> &BTreeMap<String, MethodOverload> {
        &self.overloads
    }

    pub fn overloads_mut(&mut self) -> &mut BTreeMap<String, MethodOverload> {
        &mut self.overloads
    }

    /// True when every overload is static.
    pub fn is_static_only(&self) -> bool {
        !self.overloads.is_empty()
            && self
                .overloads
                .values()
                .all(|o| o.method_kind() == MethodKind::Static)
    }
}

/// One named schema inside a namespace document.
///
/// The map key under which the definition is stored doubles as its display
/// name; renaming a schema moves the map entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    title: String,
    namespace: String,
    assembly: String,
    description: String,
    kind: SchemaKind,
    type_name: String,
    properties: BTreeMap<String, PropertyDefinition>,
    methods: BTreeMap<String, MethodDefinition>,
}

impl SchemaDefinition {
    /// An empty class definition named after `type_name`, as inserted by the
    /// schema editor.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            title: human_title(&type_name),
            namespace: String::new(),
            assembly: String::new(),
            description: String::new(),
            kind: SchemaKind::Class,
            type_name,
            properties: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    pub fn set_assembly(&mut self, assembly: impl Into<String>) {
        self.assembly = assembly.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: SchemaKind) {
        self.kind = kind;
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyDefinition> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut BTreeMap<String, PropertyDefinition> {
        &mut self.properties
    }

    pub fn methods(&self) -> &BTreeMap<String, MethodDefinition> {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut BTreeMap<String, MethodDefinition> {
        &mut self.methods
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentInfo {
    title: String,
    version: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// The parsed document a namespace owns: schema definitions plus any imported
/// path items.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    openapi: String,
    info: DocumentInfo,
    paths: BTreeMap<String, PathItem>,
    schemas: BTreeMap<String, SchemaDefinition>,
}

impl SchemaDocument {
    pub fn new(
        openapi: impl Into<String>,
        info: DocumentInfo,
        paths: BTreeMap<String, PathItem>,
        schemas: BTreeMap<String, SchemaDefinition>,
    ) -> Self {
        Self {
            openapi: openapi.into(),
            info,
            paths,
            schemas,
        }
    }

    /// The empty document backing a freshly created namespace.
    pub fn empty_for(namespace: &str) -> Self {
        Self {
            openapi: "3.0.0".to_owned(),
            info: DocumentInfo::new(format!("{namespace} API"), "1.0.0"),
            paths: BTreeMap::new(),
            schemas: BTreeMap::new(),
        }
    }

    pub fn openapi(&self) -> &str {
        &self.openapi
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn paths(&self) -> &BTreeMap<String, PathItem> {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut BTreeMap<String, PathItem> {
        &mut self.paths
    }

    pub fn schemas(&self) -> &BTreeMap<String, SchemaDefinition> {
        &self.schemas
    }

    pub fn schemas_mut(&mut self) -> &mut BTreeMap<String, SchemaDefinition> {
        &mut self.schemas
    }
}

/// A named schema source: one imported or user-created document plus its
/// capability flags. Non-editable namespaces reject every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    name: String,
    editable: bool,
    flow_capable: bool,
    document: SchemaDocument,
}

impl Namespace {
    pub fn new(
        name: impl Into<String>,
        editable: bool,
        flow_capable: bool,
        document: SchemaDocument,
    ) -> Self {
        Self {
            name: name.into(),
            editable,
            flow_capable,
            document,
        }
    }

    /// The empty, editable, non-flow-capable namespace created by the user.
    pub fn user_created(name: impl Into<String>) -> Self {
        let name = name.into();
        let document = SchemaDocument::empty_for(&name);
        Self {
            name,
            editable: true,
            flow_capable: false,
            document,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn flow_capable(&self) -> bool {
        self.flow_capable
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SchemaDocument {
        &mut self.document
    }
}

#[cfg(test)]
mod tests {
    use super::{ContainerType, PropertyDefinition, SchemaDefinition, SchemaKind};

    #[test]
    fn string_default_property_references_system_string() {
        let prop = PropertyDefinition::string_default("customerId");

        assert_eq!(prop.type_ref(), Some("System#/components/schemas/String"));
        assert_eq!(prop.type_name(), Some("String"));
        assert_eq!(prop.kind(), SchemaKind::Primitive);
        assert_eq!(prop.container_type(), ContainerType::None);
        assert_eq!(prop.title(), "Customer Id");
        assert!(!prop.nullable());
        assert!(!prop.read_only());
    }

    #[test]
    fn resolved_type_name_prefers_the_ref() {
        let mut prop = PropertyDefinition::new("Total");
        assert_eq!(prop.resolved_type_name(), None);

        prop.set_type_name(Some("Decimal"));
        assert_eq!(prop.resolved_type_name(), Some("Decimal"));

        prop.set_type_ref(Some("System#/components/schemas/Int32"));
        assert_eq!(prop.resolved_type_name(), Some("Int32"));
    }

    #[test]
    fn new_schema_uses_its_name_as_title_and_type() {
        let schema = SchemaDefinition::new("OrderLine");

        assert_eq!(schema.type_name(), "OrderLine");
        assert_eq!(schema.title(), "Order Line");
        assert_eq!(schema.kind(), SchemaKind::Class);
        assert!(schema.properties().is_empty());
        assert!(schema.methods().is_empty());
    }
}
