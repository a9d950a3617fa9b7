// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! OpenAPI-3-like document import.
//!
//! The wire shapes live here as serde DTOs and are converted into model
//! values in one pass; the model itself stays serde-free. Import either
//! yields a complete document or a single error string — a half-imported
//! namespace is never produced.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::model::{
    ContainerType, DocumentInfo, HandleId, MediaTypeObject, MethodDefinition, MethodKind,
    MethodOverload, Namespace, OperationParameter, OperationResponse, ParamLocation, ParameterDef,
    PathItem, PathOperation, PropertyDefinition, SchemaDefinition, SchemaDocument, SchemaKind,
    Signature,
};

/// Name given to a document whose `info.title` is missing or blank.
pub const UNNAMED_SCHEMA: &str = "unnamed-schema";

/// A single opaque reason why an import failed. Parse errors are surfaced
/// whole; nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    message: String,
}

impl ImportError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub editable: bool,
    pub flow_capable: bool,
    /// Rewrite inline primitive property schemas into `System#...` refs.
    pub normalize: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            editable: false,
            flow_capable: false,
            normalize: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentDto {
    openapi: Option<String>,
    info: Option<InfoDto>,
    #[serde(default)]
    paths: BTreeMap<String, BTreeMap<String, OperationDto>>,
    components: Option<ComponentsDto>,
}

#[derive(Debug, Deserialize)]
struct InfoDto {
    title: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ComponentsDto {
    #[serde(default)]
    schemas: BTreeMap<String, SchemaDto>,
}

#[derive(Debug, Deserialize)]
struct SchemaDto {
    title: Option<String>,
    namespace: Option<String>,
    assembly: Option<String>,
    description: Option<String>,
    kind: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, PropertyDto>,
    #[serde(default, alias = "x-methods")]
    methods: BTreeMap<String, MethodDto>,
}

#[derive(Debug, Deserialize)]
struct PropertyDto {
    #[serde(rename = "$ref")]
    type_ref: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    format: Option<String>,
    kind: Option<String>,
    #[serde(rename = "containerType")]
    container_type: Option<String>,
    title: Option<String>,
    description: Option<String>,
    nullable: Option<bool>,
    #[serde(rename = "readOnly")]
    read_only: Option<bool>,
    default: Option<serde_json::Value>,
    // Presence alone matters: inline object/array shapes are never rewritten
    // into primitive refs.
    properties: Option<serde_json::Value>,
    items: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MethodDto {
    owner: Option<RefDto>,
    #[serde(default)]
    overloads: BTreeMap<String, OverloadDto>,
}

#[derive(Debug, Deserialize)]
struct RefDto {
    #[serde(rename = "$ref")]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverloadDto {
    #[serde(rename = "overloadId")]
    overload_id: Option<String>,
    name: Option<String>,
    #[serde(rename = "methodKind")]
    method_kind: Option<String>,
    description: Option<String>,
    signature: Option<SignatureDto>,
}

#[derive(Debug, Default, Deserialize)]
struct SignatureDto {
    #[serde(default)]
    parameters: Vec<ParameterDto>,
    #[serde(default, rename = "return")]
    returns: Vec<ParameterDto>,
}

#[derive(Debug, Deserialize)]
struct ParameterDto {
    #[serde(rename = "instanceId", alias = "instanceGuid")]
    instance_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    required: Option<bool>,
    #[serde(rename = "$ref")]
    type_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationDto {
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    #[serde(default)]
    parameters: Vec<OperationParameterDto>,
    #[serde(default)]
    responses: BTreeMap<String, ResponseDto>,
}

#[derive(Debug, Deserialize)]
struct OperationParameterDto {
    name: Option<String>,
    #[serde(rename = "in")]
    location: Option<String>,
    required: Option<bool>,
    description: Option<String>,
    example: Option<serde_json::Value>,
    schema: Option<RefDto>,
}

#[derive(Debug, Deserialize)]
struct ResponseDto {
    description: Option<String>,
    #[serde(default)]
    content: BTreeMap<String, MediaTypeDto>,
}

#[derive(Debug, Deserialize)]
struct MediaTypeDto {
    schema: Option<RefDto>,
    example: Option<serde_json::Value>,
}

/// Parses a JSON document into a model document.
pub fn parse_document(json: &str, normalize: bool) -> Result<SchemaDocument, ImportError> {
    let dto: DocumentDto = serde_json::from_str(json)
        .map_err(|err| ImportError::new(format!("failed to parse schema document: {err}")))?;
    Ok(convert_document(dto, normalize))
}

/// Parses a JSON document and wraps it in a namespace named after the
/// document's trimmed `info.title` (or [`UNNAMED_SCHEMA`]).
pub fn import_from_str(json: &str, options: ImportOptions) -> Result<Namespace, ImportError> {
    let document = parse_document(json, options.normalize)?;
    let name = document_name(&document);
    Ok(Namespace::new(
        name,
        options.editable,
        options.flow_capable,
        document,
    ))
}

fn document_name(document: &SchemaDocument) -> String {
    let title = document.info().title().trim();
    if title.is_empty() {
        UNNAMED_SCHEMA.to_owned()
    } else {
        title.to_owned()
    }
}

fn convert_document(dto: DocumentDto, normalize: bool) -> SchemaDocument {
    let info = match dto.info {
        Some(info) => DocumentInfo::new(
            info.title.unwrap_or_default(),
            info.version.unwrap_or_default(),
        ),
        None => DocumentInfo::default(),
    };

    let mut paths = BTreeMap::new();
    for (path, item) in dto.paths {
        paths.insert(path, convert_path_item(item));
    }

    let mut schemas = BTreeMap::new();
    if let Some(components) = dto.components {
        for (name, schema) in components.schemas {
            schemas.insert(name.clone(), convert_schema(&name, schema, normalize));
        }
    }

    SchemaDocument::new(
        dto.openapi.unwrap_or_else(|| "3.0.0".to_owned()),
        info,
        paths,
        schemas,
    )
}

fn convert_schema(name: &str, dto: SchemaDto, normalize: bool) -> SchemaDefinition {
    let mut definition = SchemaDefinition::new(dto.type_name.unwrap_or_else(|| name.to_owned()));
    if let Some(title) = dto.title {
        definition.set_title(title);
    }
    definition.set_namespace(dto.namespace.unwrap_or_default());
    definition.set_assembly(dto.assembly.unwrap_or_default());
    definition.set_description(dto.description.unwrap_or_default());
    definition.set_kind(SchemaKind::from_str_lossy(dto.kind.as_deref().unwrap_or("")));

    for (prop_name, prop) in dto.properties {
        definition
            .properties_mut()
            .insert(prop_name.clone(), convert_property(&prop_name, prop, normalize));
    }

    for (method_name, method) in dto.methods {
        definition
            .methods_mut()
            .insert(method_name.clone(), convert_method(name, &method_name, method));
    }

    definition
}

fn convert_property(key: &str, dto: PropertyDto, normalize: bool) -> PropertyDefinition {
    let mut property = PropertyDefinition::new(dto.title.unwrap_or_default());
    property.set_description(dto.description.unwrap_or_default());
    property.set_nullable(dto.nullable.unwrap_or(false));
    property.set_read_only(dto.read_only.unwrap_or(false));
    property.set_default_value(dto.default);
    property.set_kind(SchemaKind::from_str_lossy(dto.kind.as_deref().unwrap_or("")));
    property.set_container_type(ContainerType::from_str_lossy(
        dto.container_type.as_deref().unwrap_or(""),
    ));

    if let Some(type_ref) = dto.type_ref {
        property.set_type_ref(Some(type_ref));
        property.set_type_name(dto.type_name);
        return property;
    }

    let type_name = dto.type_name;
    if normalize {
        if let Some(declared) = type_name.as_deref() {
            let resolved = primitive_type_name(declared, dto.format.as_deref(), key);
            let inline_shape = dto.properties.is_some() || dto.items.is_some();
            if !inline_shape && is_primitive_ref_type(&resolved) {
                property.set_type_ref(Some(crate::model::system_schema_ref(&resolved)));
                property.set_type_name(Some(resolved));
                property.set_kind(SchemaKind::Primitive);
                return property;
            }
        }
    }

    property.set_type_name(type_name);
    property
}

fn convert_method(schema_name: &str, method_name: &str, dto: MethodDto) -> MethodDefinition {
    let owner_ref = dto
        .owner
        .and_then(|o| o.reference)
        .unwrap_or_default();
    let mut definition = MethodDefinition::new(owner_ref);

    for (overload_key, overload) in dto.overloads {
        let converted = convert_overload(schema_name, method_name, &overload_key, overload);
        definition.overloads_mut().insert(overload_key, converted);
    }

    definition
}

fn convert_overload(
    schema_name: &str,
    method_name: &str,
    overload_key: &str,
    dto: OverloadDto,
) -> MethodOverload {
    let overload_id = dto.overload_id.unwrap_or_else(|| overload_key.to_owned());
    let name = dto.name.unwrap_or_else(|| method_name.to_owned());

    let mut overload = MethodOverload::new(overload_id, name);
    if dto.method_kind.as_deref() == Some("static") {
        overload.set_method_kind(MethodKind::Static);
    }
    overload.set_description(dto.description.unwrap_or_default());

    let signature = dto.signature.unwrap_or_default();
    let id_stem = format!("{schema_name}.{method_name}.{overload_key}");
    overload.set_signature(Signature::new(
        convert_parameters(signature.parameters, &id_stem, "arg"),
        convert_parameters(signature.returns, &id_stem, "ret"),
    ));

    overload
}

fn convert_parameters(dtos: Vec<ParameterDto>, id_stem: &str, side: &str) -> Vec<ParameterDef> {
    dtos.into_iter()
        .enumerate()
        .map(|(index, dto)| {
            // A document that carries no instance id gets a deterministic one
            // derived from the parameter's position, so re-imports agree.
            let instance_id = dto
                .instance_id
                .and_then(|raw| HandleId::new(raw).ok())
                .unwrap_or_else(|| {
                    HandleId::new(format!("p:{id_stem}.{side}{index}"))
                        .expect("synthesized parameter id")
                });

            let mut parameter = ParameterDef::new(
                instance_id,
                dto.name.unwrap_or_default(),
                dto.type_ref.unwrap_or_default(),
            );
            parameter.set_description(dto.description);
            parameter.set_required(dto.required.unwrap_or(false));
            parameter
        })
        .collect()
}

fn convert_path_item(dto: BTreeMap<String, OperationDto>) -> PathItem {
    let mut item = PathItem::default();
    for (verb, operation) in dto {
        item.operations_mut()
            .insert(verb.to_ascii_lowercase(), convert_operation(operation));
    }
    item
}

fn convert_operation(dto: OperationDto) -> PathOperation {
    let mut operation = PathOperation::default();
    operation.set_operation_id(dto.operation_id);
    operation.set_summary(dto.summary);
    operation.set_description(dto.description);

    for parameter in dto.parameters {
        let mut converted = OperationParameter::new(
            parameter.name.unwrap_or_default(),
            ParamLocation::from_str_lossy(parameter.location.as_deref().unwrap_or("")),
        );
        converted.set_required(parameter.required.unwrap_or(false));
        converted.set_description(parameter.description);
        converted.set_example(parameter.example.as_ref().and_then(json_as_text));
        converted.set_schema_ref(parameter.schema.and_then(|s| s.reference));
        operation.parameters_mut().push(converted);
    }

    for (status, response) in dto.responses {
        let mut converted = OperationResponse::new(response.description);
        for (media_type, media) in response.content {
            converted.content_mut().insert(
                media_type,
                MediaTypeObject::new(
                    media.schema.and_then(|s| s.reference),
                    media.example.as_ref().and_then(json_as_text),
                ),
            );
        }
        operation.responses_mut().insert(status, converted);
    }

    operation
}

fn json_as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// The primitive type a loose OpenAPI `{type, format}` pair resolves to,
/// falling back to the property key for object-shaped entries.
fn primitive_type_name(declared: &str, format: Option<&str>, key: &str) -> String {
    let format = format.map(str::to_ascii_lowercase);
    match declared.to_ascii_lowercase().as_str() {
        "integer" => match format.as_deref() {
            Some("int8") => "Int8",
            Some("int16") => "Int16",
            Some("int32") => "Int32",
            Some("int64") => "Int64",
            Some("int128") => "Int128",
            Some("uint8") => "UInt8",
            Some("uint16") => "UInt16",
            Some("uint32") => "UInt32",
            Some("uint64") => "UInt64",
            Some("uint128") => "UInt128",
            _ => "Int32",
        }
        .to_owned(),
        "number" => match format.as_deref() {
            Some("float") => "Float",
            Some("double") => "Double",
            Some("decimal") => "Decimal",
            _ => "Double",
        }
        .to_owned(),
        "boolean" => "Boolean".to_owned(),
        "string" => "String".to_owned(),
        "array" => "Array".to_owned(),
        _ => key.to_owned(),
    }
}

fn is_primitive_ref_type(name: &str) -> bool {
    matches!(
        name,
        "String"
            | "Boolean"
            | "Int8"
            | "Int16"
            | "Int32"
            | "Int64"
            | "Int128"
            | "UInt8"
            | "UInt16"
            | "UInt32"
            | "UInt64"
            | "UInt128"
            | "Float"
            | "Double"
            | "Decimal"
    )
}
