// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Imported HTTP path items: one operation per verb, with just enough of the
//! OpenAPI surface to spawn REST operation nodes (parameters + responses).

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Where an operation parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamLocation {
    #[default]
    Query,
    Path,
    Header,
    Cookie,
}

impl ParamLocation {
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "path" => Self::Path,
            "header" => Self::Header,
            "cookie" => Self::Cookie,
            _ => Self::Query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationParameter {
    name: String,
    location: ParamLocation,
    required: bool,
    description: Option<String>,
    example: Option<String>,
    schema_ref: Option<String>,
}

impl OperationParameter {
    pub fn new(name: impl Into<String>, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            location,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> ParamLocation {
        self.location
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn set_example<T: Into<String>>(&mut self, example: Option<T>) {
        self.example = example.map(Into::into);
    }

    /// The `$ref` of the parameter's schema, when the import carried one.
    pub fn schema_ref(&self) -> Option<&str> {
        self.schema_ref.as_deref()
    }

    pub fn set_schema_ref<T: Into<String>>(&mut self, schema_ref: Option<T>) {
        self.schema_ref = schema_ref.map(Into::into);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaTypeObject {
    schema_ref: Option<String>,
    example: Option<String>,
}

impl MediaTypeObject {
    pub fn new(schema_ref: Option<String>, example: Option<String>) -> Self {
        Self {
            schema_ref,
            example,
        }
    }

    pub fn schema_ref(&self) -> Option<&str> {
        self.schema_ref.as_deref()
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationResponse {
    description: Option<String>,
    content: BTreeMap<String, MediaTypeObject>,
}

impl OperationResponse {
    pub fn new(description: Option<String>) -> Self {
        Self {
            description,
            content: BTreeMap::new(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn content(&self) -> &BTreeMap<String, MediaTypeObject> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut BTreeMap<String, MediaTypeObject> {
        &mut self.content
    }

    /// The `$ref` of the `application/json` body schema, if declared.
    pub fn json_schema_ref(&self) -> Option<&str> {
        self.content
            .get("application/json")
            .and_then(MediaTypeObject::schema_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathOperation {
    operation_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    parameters: Vec<OperationParameter>,
    responses: BTreeMap<String, OperationResponse>,
}

impl PathOperation {
    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref()
    }

    pub fn set_operation_id<T: Into<String>>(&mut self, operation_id: Option<T>) {
        self.operation_id = operation_id.map(Into::into);
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn set_summary<T: Into<String>>(&mut self, summary: Option<T>) {
        self.summary = summary.map(Into::into);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    pub fn parameters(&self) -> &[OperationParameter] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Vec<OperationParameter> {
        &mut self.parameters
    }

    pub fn responses(&self) -> &BTreeMap<String, OperationResponse> {
        &self.responses
    }

    pub fn responses_mut(&mut self) -> &mut BTreeMap<String, OperationResponse> {
        &mut self.responses
    }
}

/// One imported path, keyed by lowercase HTTP verb.
///
/// Verbs stay string-keyed because imported documents may carry verbs the ref
/// grammar does not recognize (e.g. `trace`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathItem {
    operations: BTreeMap<String, PathOperation>,
}

impl PathItem {
    pub fn operations(&self) -> &BTreeMap<String, PathOperation> {
        &self.operations
    }

    pub fn operations_mut(&mut self) -> &mut BTreeMap<String, PathOperation> {
        &mut self.operations
    }

    pub fn operation(&self, verb: &str) -> Option<&PathOperation> {
        self.operations.get(&verb.to_ascii_lowercase())
    }
}

fn colon_param_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(":([a-zA-Z0-9_]+)").expect("colon param pattern compiles"))
}

/// Rewrites `:param` segments into the `{param}` template form.
pub fn normalize_path_template(path: &str) -> String {
    colon_param_pattern().replace_all(path, "{$1}").into_owned()
}

fn is_template_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Template-aware path equality: segment counts must match, and a `{param}`
/// segment on either side matches any segment on the other.
pub fn paths_match(schema_path: &str, lookup_path: &str) -> bool {
    let normalize = |p: &str| -> Vec<String> {
        normalize_path_template(p)
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    };

    let schema_segments = normalize(schema_path);
    let lookup_segments = normalize(lookup_path);

    if schema_segments.len() != lookup_segments.len() {
        return false;
    }

    schema_segments
        .iter()
        .zip(lookup_segments.iter())
        .all(|(s, l)| is_template_segment(s) || is_template_segment(l) || s == l)
}
