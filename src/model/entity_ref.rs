// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// HTTP verbs recognized at the tail of a path ref.
///
/// `trace` can occur inside imported path items but is intentionally not
/// recognized here, so a trailing `/trace` stays part of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Options => "options",
            Self::Head => "head",
        }
    }

    /// Case-insensitive recognition of a single path segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        const ALL: [HttpMethod; 7] = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
            HttpMethod::Options,
            HttpMethod::Head,
        ];
        ALL.into_iter()
            .find(|m| segment.eq_ignore_ascii_case(m.as_str()))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical decoded form of a reference string.
///
/// This is the single source of truth for ref decoding: no other part of the
/// crate derives entity coordinates from raw ref substrings. The canonical
/// grammar:
///
/// - `Ns#/components/schemas/S`
/// - `Ns#/components/schemas/S/properties/P`
/// - `Ns#/components/schemas/S/methods/M`
/// - `Ns#/components/schemas/S/methods/M/overloads/O`
/// - `Ns#/paths/<segments...>[/<http verb>]`
/// - `Ns` (bare namespace, no `#`)
///
/// Anything else decodes to [`EntityRef::Unknown`]; decoding never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    Namespace {
        namespace: String,
    },
    Schema {
        namespace: String,
        schema: String,
    },
    SchemaProperty {
        namespace: String,
        schema: String,
        property: String,
    },
    Method {
        namespace: String,
        schema: String,
        method: String,
    },
    MethodOverload {
        namespace: String,
        schema: String,
        method: String,
        overload_id: String,
    },
    Path {
        namespace: String,
        path: String,
        http_method: Option<HttpMethod>,
    },
    Unknown,
}

const SCHEMAS_PREFIX: &str = "/components/schemas/";
const PATHS_PREFIX: &str = "/paths/";

impl EntityRef {
    /// Decodes a reference string. Total: malformed or empty input yields
    /// [`EntityRef::Unknown`] instead of an error.
    pub fn parse(reference: &str) -> Self {
        if reference.is_empty() {
            return Self::Unknown;
        }

        let Some((namespace, fragment)) = reference.split_once('#') else {
            // A bare string with no `#` names a namespace.
            return Self::Namespace {
                namespace: reference.to_owned(),
            };
        };

        if namespace.is_empty() {
            return Self::Unknown;
        }

        if let Some(rest) = fragment.strip_prefix(SCHEMAS_PREFIX) {
            return Self::parse_schemas_fragment(namespace, rest);
        }

        if let Some(rest) = fragment.strip_prefix(PATHS_PREFIX) {
            return Self::parse_paths_fragment(namespace, rest);
        }

        Self::Unknown
    }

    fn parse_schemas_fragment(namespace: &str, rest: &str) -> Self {
        let segments = rest.split('/').collect::<Vec<_>>();
        if segments.iter().any(|s| s.is_empty()) {
            return Self::Unknown;
        }

        match segments.as_slice() {
            [schema] => Self::Schema {
                namespace: namespace.to_owned(),
                schema: (*schema).to_owned(),
            },
            [schema, "properties", property] => Self::SchemaProperty {
                namespace: namespace.to_owned(),
                schema: (*schema).to_owned(),
                property: (*property).to_owned(),
            },
            [schema, "methods", method] => Self::Method {
                namespace: namespace.to_owned(),
                schema: (*schema).to_owned(),
                method: (*method).to_owned(),
            },
            [schema, "methods", method, "overloads", overload_id] => Self::MethodOverload {
                namespace: namespace.to_owned(),
                schema: (*schema).to_owned(),
                method: (*method).to_owned(),
                overload_id: (*overload_id).to_owned(),
            },
            _ => Self::Unknown,
        }
    }

    fn parse_paths_fragment(namespace: &str, rest: &str) -> Self {
        if rest.is_empty() {
            return Self::Unknown;
        }

        // If the final segment is a known verb it is split off the path.
        if let Some((path, last)) = rest.rsplit_once('/') {
            if let Some(http_method) = HttpMethod::from_segment(last) {
                return Self::Path {
                    namespace: namespace.to_owned(),
                    path: path.to_owned(),
                    http_method: Some(http_method),
                };
            }
        } else if let Some(http_method) = HttpMethod::from_segment(rest) {
            return Self::Path {
                namespace: namespace.to_owned(),
                path: String::new(),
                http_method: Some(http_method),
            };
        }

        Self::Path {
            namespace: namespace.to_owned(),
            path: rest.to_owned(),
            http_method: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The namespace component, for every kind that has one.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Namespace { namespace }
            | Self::Schema { namespace, .. }
            | Self::SchemaProperty { namespace, .. }
            | Self::Method { namespace, .. }
            | Self::MethodOverload { namespace, .. }
            | Self::Path { namespace, .. } => Some(namespace),
            Self::Unknown => None,
        }
    }

    /// `(namespace, schema)` for every kind rooted at a schema definition.
    pub fn schema_coordinates(&self) -> Option<(&str, &str)> {
        match self {
            Self::Schema {
                namespace, schema, ..
            }
            | Self::SchemaProperty {
                namespace, schema, ..
            }
            | Self::Method {
                namespace, schema, ..
            }
            | Self::MethodOverload {
                namespace, schema, ..
            } => Some((namespace, schema)),
            _ => None,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace { namespace } => f.write_str(namespace),
            Self::Schema { namespace, schema } => {
                write!(f, "{namespace}#{SCHEMAS_PREFIX}{schema}")
            }
            Self::SchemaProperty {
                namespace,
                schema,
                property,
            } => write!(f, "{namespace}#{SCHEMAS_PREFIX}{schema}/properties/{property}"),
            Self::Method {
                namespace,
                schema,
                method,
            } => write!(f, "{namespace}#{SCHEMAS_PREFIX}{schema}/methods/{method}"),
            Self::MethodOverload {
                namespace,
                schema,
                method,
                overload_id,
            } => write!(
                f,
                "{namespace}#{SCHEMAS_PREFIX}{schema}/methods/{method}/overloads/{overload_id}"
            ),
            Self::Path {
                namespace,
                path,
                http_method,
            } => match http_method {
                Some(method) => write!(f, "{namespace}#{PATHS_PREFIX}{path}/{method}"),
                None => write!(f, "{namespace}#{PATHS_PREFIX}{path}"),
            },
            Self::Unknown => Ok(()),
        }
    }
}

/// Rewrites the method-name segment of a `Method`-shaped ref.
///
/// Every other kind (including overload refs) is returned unchanged.
pub fn rename_method_in_ref(reference: &str, new_name: &str) -> String {
    match EntityRef::parse(reference) {
        EntityRef::Method {
            namespace, schema, ..
        } => EntityRef::Method {
            namespace,
            schema,
            method: new_name.to_owned(),
        }
        .to_string(),
        _ => reference.to_owned(),
    }
}
