// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::graph::{GraphNode, GraphSnapshot, NodeKind, OperationKind, Viewport};
use super::grid::Grid;
use super::handle::{boundary_group_id, grid_input_flow_handle_id, grid_output_flow_handle_id};
use super::handle::{Handle, HandleGroup};
use super::ids::{GridId, HandleId, NodeId};
use super::schema::{
    DocumentInfo, MethodDefinition, MethodOverload, ParameterDef, PropertyDefinition,
    SchemaDefinition, SchemaDocument, Signature,
};

pub(crate) fn hid(value: &str) -> HandleId {
    HandleId::new(value).expect("handle id")
}

/// A grid with just the two boundary nodes and their flow handles.
pub(crate) fn empty_grid(grid_id: &str, method_ref: &str) -> Grid {
    let input_node_id = NodeId::new(format!("{grid_id}-in")).expect("node id");
    let output_node_id = NodeId::new(format!("{grid_id}-out")).expect("node id");

    let mut input_node = GraphNode::new(
        input_node_id.clone(),
        NodeKind::Executable,
        OperationKind::GridInput,
    );
    input_node.set_deletable(false);
    input_node.set_outputs(vec![HandleGroup::new(
        boundary_group_id(),
        "",
        vec![Handle::flow_output(grid_input_flow_handle_id())],
    )]);

    let mut output_node = GraphNode::new(
        output_node_id.clone(),
        NodeKind::Executable,
        OperationKind::GridOutput,
    );
    output_node.set_deletable(false);
    output_node.set_title("Return");
    output_node.set_inputs(vec![HandleGroup::new(
        boundary_group_id(),
        "",
        vec![Handle::flow_input(grid_output_flow_handle_id())],
    )]);

    Grid::new(
        GridId::new(grid_id).expect("grid id"),
        input_node_id,
        output_node_id,
        method_ref,
        GraphSnapshot::new(vec![input_node, output_node], Vec::new(), Viewport::default()),
    )
}

/// The `Demo` document used across tests: an `Order` schema with an `Id`
/// string property and a `GetTotal` overload returning `Decimal`.
pub(crate) fn demo_document() -> SchemaDocument {
    let mut order = SchemaDefinition::new("Order");
    order
        .properties_mut()
        .insert("Id".to_owned(), PropertyDefinition::string_default("Id"));

    let mut overload = MethodOverload::new("ov1", "GetTotal");
    overload.set_signature(Signature::new(
        Vec::new(),
        vec![ParameterDef::new(
            hid("p:total"),
            "total",
            "System#/components/schemas/Decimal",
        )],
    ));

    let mut method = MethodDefinition::new("Demo#/components/schemas/Order");
    method
        .overloads_mut()
        .insert("ov1".to_owned(), overload);
    order.methods_mut().insert("GetTotal".to_owned(), method);

    let mut schemas = BTreeMap::new();
    schemas.insert("Order".to_owned(), order);

    SchemaDocument::new(
        "3.0.0",
        DocumentInfo::new("Demo", "1.0.0"),
        BTreeMap::new(),
        schemas,
    )
}

/// The canonical ref of the fixture overload.
pub(crate) fn demo_overload_ref() -> String {
    "Demo#/components/schemas/Order/methods/GetTotal/overloads/ov1".to_owned()
}
