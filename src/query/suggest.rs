// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The operation catalogue for a schema: a two-tier forest of folders and
//! selectable operations, used to spawn graph nodes.

use std::collections::BTreeMap;

use crate::model::{HandleId, MethodKind, OperationKind, ParameterDef, SchemaDefinition};

/// Resolved return type of an operation with an empty return signature.
pub const VOID_TYPE: &str = "void";

/// Everything a leaf needs to spawn its node when selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnMetadata {
    pub return_type: String,
    pub method_kind: MethodKind,
    pub operation: OperationKind,
    pub input_parameters: Vec<ParameterDef>,
    pub output_parameters: Vec<ParameterDef>,
    pub owner_namespace: Option<String>,
    pub owner_schema: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionNode {
    Folder {
        id: String,
        label: String,
        children: Vec<SuggestionNode>,
    },
    Item {
        id: String,
        label: String,
        tooltip: Option<String>,
        metadata: SpawnMetadata,
    },
}

impl SuggestionNode {
    pub fn label(&self) -> &str {
        match self {
            Self::Folder { label, .. } | Self::Item { label, .. } => label,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Folder { id, .. } | Self::Item { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuggestOptions {
    /// Offer static-only methods and static overloads as well.
    pub allow_static: bool,
}

/// The full catalogue for one schema: a "Properties" folder of get/set pairs
/// and a "Functions" folder of overloads grouped by resolved return type.
/// Folders with zero children are omitted entirely.
pub fn build_schema_suggestions(
    namespace: &str,
    schema_name: &str,
    definition: &SchemaDefinition,
    options: SuggestOptions,
) -> Vec<SuggestionNode> {
    let mut forest = property_suggestions(namespace, schema_name, definition);
    forest.extend(function_suggestions(
        namespace,
        schema_name,
        definition,
        options,
    ));
    forest
}

/// One get/set leaf pair per property. The get leaf carries the property's
/// resolved type as its return type; the set leaf is the mutator.
pub fn property_suggestions(
    namespace: &str,
    schema_name: &str,
    definition: &SchemaDefinition,
) -> Vec<SuggestionNode> {
    let mut children = Vec::new();

    for (name, property) in definition.properties() {
        let resolved = property
            .resolved_type_name()
            .unwrap_or("unknown")
            .to_owned();

        // The value slot spawners wire up: typed like the property itself.
        let value_param = property.type_ref().map(|type_ref| {
            ParameterDef::new(
                HandleId::new(format!("p:{schema_name}.{name}.value"))
                    .expect("synthesized value id"),
                "value",
                type_ref,
            )
        });

        children.push(SuggestionNode::Item {
            id: format!("get-{name}"),
            label: format!("Get {name}"),
            tooltip: Some(format!("Reads the value of {name}")),
            metadata: SpawnMetadata {
                return_type: resolved,
                method_kind: MethodKind::Instance,
                operation: OperationKind::GetProperty,
                input_parameters: Vec::new(),
                output_parameters: value_param.clone().into_iter().collect(),
                owner_namespace: Some(namespace.to_owned()),
                owner_schema: Some(schema_name.to_owned()),
            },
        });
        children.push(SuggestionNode::Item {
            id: format!("set-{name}"),
            label: format!("Set {name}"),
            tooltip: Some(format!("Writes a new value to {name}")),
            metadata: SpawnMetadata {
                return_type: VOID_TYPE.to_owned(),
                method_kind: MethodKind::Instance,
                operation: OperationKind::SetProperty,
                input_parameters: value_param.into_iter().collect(),
                output_parameters: Vec::new(),
                owner_namespace: Some(namespace.to_owned()),
                owner_schema: Some(schema_name.to_owned()),
            },
        });
    }

    if children.is_empty() {
        return Vec::new();
    }

    vec![SuggestionNode::Folder {
        id: "properties-root".to_owned(),
        label: "Properties".to_owned(),
        children,
    }]
}

/// One sub-folder per resolved return type, one leaf per overload. Methods
/// whose every overload is static are excluded unless opted in; individual
/// static overloads are likewise skipped.
pub fn function_suggestions(
    namespace: &str,
    schema_name: &str,
    definition: &SchemaDefinition,
    options: SuggestOptions,
) -> Vec<SuggestionNode> {
    let mut groups: BTreeMap<String, Vec<SuggestionNode>> = BTreeMap::new();

    for (method_name, method) in definition.methods() {
        if !options.allow_static && method.is_static_only() {
            continue;
        }

        for (overload_id, overload) in method.overloads() {
            if !options.allow_static && overload.method_kind() == MethodKind::Static {
                continue;
            }

            let return_type = overload
                .signature()
                .returns()
                .first()
                .and_then(|p| p.type_ref().rsplit('/').next())
                .unwrap_or(VOID_TYPE)
                .to_owned();

            let tooltip = if overload.description().is_empty() {
                None
            } else {
                Some(overload.description().to_owned())
            };

            groups.entry(return_type.clone()).or_default().push(
                SuggestionNode::Item {
                    id: format!("{method_name}:{overload_id}"),
                    label: overload.name().to_owned(),
                    tooltip,
                    metadata: SpawnMetadata {
                        return_type,
                        method_kind: overload.method_kind(),
                        operation: OperationKind::PropertyFunction,
                        input_parameters: overload.signature().parameters().to_vec(),
                        output_parameters: overload.signature().returns().to_vec(),
                        owner_namespace: Some(namespace.to_owned()),
                        owner_schema: Some(schema_name.to_owned()),
                    },
                },
            );
        }
    }

    if groups.is_empty() {
        return Vec::new();
    }

    let children = groups
        .into_iter()
        .map(|(return_type, items)| SuggestionNode::Folder {
            id: format!("return:{return_type}"),
            label: return_type,
            children: items,
        })
        .collect();

    vec![SuggestionNode::Folder {
        id: "functions-root".to_owned(),
        label: "Functions".to_owned(),
        children,
    }]
}

/// Get/set actions for a dropped project variable.
pub fn variable_suggestions(name: &str, type_name: Option<&str>) -> Vec<SuggestionNode> {
    if name.is_empty() {
        return Vec::new();
    }

    vec![SuggestionNode::Folder {
        id: format!("variable-actions-{name}"),
        label: "Variable Actions".to_owned(),
        children: vec![
            SuggestionNode::Item {
                id: format!("get-{name}"),
                label: format!("Get {name}"),
                tooltip: Some(format!("Reads the value of {name}")),
                metadata: SpawnMetadata {
                    return_type: type_name.unwrap_or("unknown").to_owned(),
                    method_kind: MethodKind::Instance,
                    operation: OperationKind::GetVariable,
                    input_parameters: Vec::new(),
                    output_parameters: Vec::new(),
                    owner_namespace: None,
                    owner_schema: None,
                },
            },
            SuggestionNode::Item {
                id: format!("set-{name}"),
                label: format!("Set {name}"),
                tooltip: Some(format!("Writes a new value to {name}")),
                metadata: SpawnMetadata {
                    return_type: VOID_TYPE.to_owned(),
                    method_kind: MethodKind::Instance,
                    operation: OperationKind::SetVariable,
                    input_parameters: Vec::new(),
                    output_parameters: Vec::new(),
                    owner_namespace: None,
                    owner_schema: None,
                },
            },
        ],
    }]
}

const FUZZY_KEEP_THRESHOLD: f64 = 60.0;

/// Prunes the forest down to leaves whose label matches the needle, either
/// by substring or by fuzzy ratio. Folders that end up empty are dropped.
/// An empty needle returns the forest unchanged.
pub fn filter(nodes: &[SuggestionNode], needle: &str) -> Vec<SuggestionNode> {
    if needle.trim().is_empty() {
        return nodes.to_vec();
    }
    let needle = needle.to_lowercase();

    nodes
        .iter()
        .filter_map(|node| filter_node(node, &needle))
        .collect()
}

fn filter_node(node: &SuggestionNode, needle: &str) -> Option<SuggestionNode> {
    match node {
        SuggestionNode::Item { label, .. } => {
            if label_matches(label, needle) {
                Some(node.clone())
            } else {
                None
            }
        }
        SuggestionNode::Folder {
            id,
            label,
            children,
        } => {
            let kept = children
                .iter()
                .filter_map(|child| filter_node(child, needle))
                .collect::<Vec<_>>();
            if kept.is_empty() {
                return None;
            }
            Some(SuggestionNode::Folder {
                id: id.clone(),
                label: label.clone(),
                children: kept,
            })
        }
    }
}

fn label_matches(label: &str, needle: &str) -> bool {
    let haystack = label.to_lowercase();
    if haystack.contains(needle) {
        return true;
    }
    rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars()) >= FUZZY_KEEP_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::{
        build_schema_suggestions, filter, variable_suggestions, SuggestOptions, SuggestionNode,
    };
    use crate::model::fixtures;
    use crate::model::{MethodKind, OperationKind, SchemaDefinition};

    fn demo_order() -> SchemaDefinition {
        fixtures::demo_document()
            .schemas()
            .get("Order")
            .cloned()
            .expect("fixture schema")
    }

    fn folder(nodes: &[SuggestionNode], label: &str) -> SuggestionNode {
        nodes
            .iter()
            .find(|n| n.label() == label)
            .cloned()
            .unwrap_or_else(|| panic!("folder {label:?} missing"))
    }

    #[test]
    fn properties_folder_holds_a_get_set_pair_per_property() {
        let forest =
            build_schema_suggestions("Demo", "Order", &demo_order(), SuggestOptions::default());

        let SuggestionNode::Folder { children, .. } = folder(&forest, "Properties") else {
            panic!("expected folder");
        };
        assert_eq!(children.len(), 2);

        let SuggestionNode::Item { metadata, .. } = &children[0] else {
            panic!("expected item");
        };
        assert_eq!(metadata.operation, OperationKind::GetProperty);
        assert_eq!(metadata.return_type, "String");

        let SuggestionNode::Item { metadata, .. } = &children[1] else {
            panic!("expected item");
        };
        assert_eq!(metadata.operation, OperationKind::SetProperty);
        assert_eq!(metadata.return_type, "void");
    }

    #[test]
    fn functions_group_by_resolved_return_type() {
        let forest =
            build_schema_suggestions("Demo", "Order", &demo_order(), SuggestOptions::default());

        let SuggestionNode::Folder { children, .. } = folder(&forest, "Functions") else {
            panic!("expected folder");
        };
        assert_eq!(children.len(), 1);

        let SuggestionNode::Folder {
            label,
            children: leaves,
            ..
        } = &children[0]
        else {
            panic!("expected return-type folder");
        };
        assert_eq!(label, "Decimal");
        assert_eq!(leaves.len(), 1);

        let SuggestionNode::Item { id, metadata, .. } = &leaves[0] else {
            panic!("expected item");
        };
        assert_eq!(id, "GetTotal:ov1");
        assert_eq!(metadata.return_type, "Decimal");
        assert_eq!(metadata.output_parameters.len(), 1);
        assert_eq!(metadata.owner_schema.as_deref(), Some("Order"));
    }

    #[test]
    fn empty_inputs_yield_no_folders_at_all() {
        let empty = SchemaDefinition::new("Empty");
        let forest =
            build_schema_suggestions("Demo", "Empty", &empty, SuggestOptions::default());
        assert!(forest.is_empty());
    }

    #[test]
    fn static_only_methods_need_an_opt_in() {
        let mut definition = demo_order();
        for method in definition.methods_mut().values_mut() {
            for overload in method.overloads_mut().values_mut() {
                overload.set_method_kind(MethodKind::Static);
            }
        }

        let hidden =
            build_schema_suggestions("Demo", "Order", &definition, SuggestOptions::default());
        assert!(hidden.iter().all(|n| n.label() != "Functions"));

        let shown = build_schema_suggestions(
            "Demo",
            "Order",
            &definition,
            SuggestOptions { allow_static: true },
        );
        assert!(shown.iter().any(|n| n.label() == "Functions"));
    }

    #[test]
    fn variable_actions_carry_both_accessors() {
        let forest = variable_suggestions("retries", Some("Int32"));
        let SuggestionNode::Folder { children, .. } = &forest[0] else {
            panic!("expected folder");
        };
        assert_eq!(children.len(), 2);

        let SuggestionNode::Item { metadata, .. } = &children[0] else {
            panic!("expected item");
        };
        assert_eq!(metadata.operation, OperationKind::GetVariable);
        assert_eq!(metadata.return_type, "Int32");

        assert!(variable_suggestions("", None).is_empty());
    }

    #[test]
    fn filter_prunes_empty_folders_and_keeps_matches() {
        let forest =
            build_schema_suggestions("Demo", "Order", &demo_order(), SuggestOptions::default());

        let filtered = filter(&forest, "get");
        let labels = filtered.iter().map(SuggestionNode::label).collect::<Vec<_>>();
        assert!(labels.contains(&"Properties"));

        let none = filter(&forest, "zzzzzz");
        assert!(none.is_empty());

        let all = filter(&forest, "  ");
        assert_eq!(all.len(), forest.len());
    }
}
