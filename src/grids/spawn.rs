// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Builders for the nodes a suggestion or drag-drop can spawn.
//!
//! Each builder is pure over the store: it returns the node(s) and wire(s)
//! to add, or `None` (logged) when the referenced entity does not resolve.

use tracing::warn;

use crate::model::{
    EntityRef, GraphEdge, GraphNode, Handle, HandleGroup, HandleId, IdMinter, NodeKind,
    OperationKind, ParameterDef, PathOperation, Position,
};
use crate::query::lookup;
use crate::query::suggest::SpawnMetadata;
use crate::store::SchemaStore;

fn group(minter: &mut IdMinter, name: &str, handles: Vec<Handle>) -> HandleGroup {
    HandleGroup::new(minter.mint("grp"), name, handles)
}

/// A data handle for a `$ref`, or `None` (logged) when it does not resolve
/// to schema coordinates.
fn resolved_handle(
    minter: &mut IdMinter,
    name: &str,
    type_ref: &str,
    required: bool,
) -> Option<Handle> {
    let parsed = EntityRef::parse(type_ref);
    let Some((namespace, schema)) = parsed.schema_coordinates() else {
        warn!(type_ref, "handle skipped: ref has no schema coordinates");
        return None;
    };

    let mut handle = Handle::new(minter.mint("hnd"), name, namespace, schema);
    handle.set_required(required);
    Some(handle)
}

fn base_node(
    minter: &mut IdMinter,
    kind: NodeKind,
    operation: OperationKind,
    title: &str,
    position: Position,
) -> GraphNode {
    let mut node = GraphNode::new(minter.mint("n"), kind, operation);
    node.set_title(title);
    node.set_position(position);
    node.set_selected(true);
    node
}

/// A call node for another grid's overload: flow-in plus the overload's
/// parameters on the left, flow-out plus its returns on the right. Parameter
/// handles reuse the parameter instance ids.
pub fn grid_call_node(
    store: &SchemaStore,
    minter: &mut IdMinter,
    method_ref: &str,
    position: Position,
) -> Option<GraphNode> {
    let Some(overload) = lookup::overload_by_ref(store, method_ref) else {
        warn!(method_ref, "grid call spawn skipped: overload not found");
        return None;
    };

    let mut inputs = vec![Handle::flow_input(minter.mint("hnd"))];
    inputs.extend(overload.signature().parameters().iter().map(Handle::for_parameter));

    let mut outputs = vec![Handle::flow_output(minter.mint("hnd"))];
    outputs.extend(overload.signature().returns().iter().map(Handle::for_parameter));

    let mut node = base_node(
        minter,
        NodeKind::Executable,
        OperationKind::GridCall,
        overload.name(),
        position,
    );
    node.set_comment(overload.description());
    node.set_schema_ref(method_ref);
    node.set_inputs(vec![group(minter, "", inputs)]);
    node.set_outputs(vec![group(minter, "", outputs)]);
    Some(node)
}

/// A referenceable read node for a project variable (a schema property):
/// a single output handle typed like the property.
pub fn variable_get_node(
    store: &SchemaStore,
    minter: &mut IdMinter,
    property_ref: &str,
    position: Position,
) -> Option<GraphNode> {
    let Some(property) = lookup::property_by_ref(store, property_ref) else {
        warn!(property_ref, "variable get spawn skipped: property not found");
        return None;
    };
    let Some(type_ref) = property.type_ref() else {
        warn!(property_ref, "variable get spawn skipped: property has no type ref");
        return None;
    };
    let title = property.title().to_owned();
    let value = resolved_handle(minter, &title, type_ref, false)?;

    let mut node = base_node(
        minter,
        NodeKind::Referenceable,
        OperationKind::GetVariable,
        &title,
        position,
    );
    node.set_schema_ref(property_ref);
    node.set_outputs(vec![group(minter, "", vec![value])]);
    Some(node)
}

/// An executable write node for a project variable: flow in/out plus a
/// required value input typed like the property.
pub fn variable_set_node(
    store: &SchemaStore,
    minter: &mut IdMinter,
    property_ref: &str,
    position: Position,
) -> Option<GraphNode> {
    let Some(property) = lookup::property_by_ref(store, property_ref) else {
        warn!(property_ref, "variable set spawn skipped: property not found");
        return None;
    };
    let Some(type_ref) = property.type_ref() else {
        warn!(property_ref, "variable set spawn skipped: property has no type ref");
        return None;
    };
    let title = property.title().to_owned();
    let value = resolved_handle(minter, &title, type_ref, true)?;

    let mut node = base_node(
        minter,
        NodeKind::Executable,
        OperationKind::SetVariable,
        &format!("Set {title}"),
        position,
    );
    node.set_comment(format!("Set '{title}' variable value."));
    node.set_schema_ref(property_ref);
    let inputs = vec![Handle::flow_input(minter.mint("hnd")), value];
    node.set_inputs(vec![group(minter, "", inputs)]);
    let outputs = vec![Handle::flow_output(minter.mint("hnd"))];
    node.set_outputs(vec![group(minter, "", outputs)]);
    Some(node)
}

fn owner_handle(minter: &mut IdMinter, metadata: &SpawnMetadata) -> Option<Handle> {
    let (namespace, schema) = match (&metadata.owner_namespace, &metadata.owner_schema) {
        (Some(namespace), Some(schema)) => (namespace.clone(), schema.clone()),
        _ => {
            warn!("member spawn skipped: metadata has no owner coordinates");
            return None;
        }
    };

    let mut handle = Handle::new(minter.mint("hnd"), "Owner", namespace.clone(), schema.clone());
    handle.set_required(true);
    handle.set_description(Some(format!("Owner must be {namespace}.{schema}")));
    Some(handle)
}

fn parameter_handles(
    minter: &mut IdMinter,
    parameters: &[ParameterDef],
    name_by_schema: bool,
) -> Vec<Handle> {
    parameters
        .iter()
        .filter_map(|parameter| {
            let name = if name_by_schema {
                EntityRef::parse(parameter.type_ref())
                    .schema_coordinates()
                    .map(|(_, schema)| schema.to_owned())
                    .unwrap_or_else(|| parameter.name().to_owned())
            } else {
                parameter.name().to_owned()
            };
            resolved_handle(minter, &name, parameter.type_ref(), parameter.required())
        })
        .collect()
}

/// A property read access: owner on the left, the value on the right. No
/// flow handles; reads are pure.
pub fn property_access_node(
    minter: &mut IdMinter,
    label: &str,
    metadata: &SpawnMetadata,
    position: Position,
) -> Option<GraphNode> {
    let owner = owner_handle(minter, metadata)?;
    let inputs = vec![owner]
        .into_iter()
        .chain(parameter_handles(minter, &metadata.input_parameters, false))
        .collect();
    let outputs = parameter_handles(minter, &metadata.output_parameters, false);

    let mut node = base_node(
        minter,
        NodeKind::Executable,
        OperationKind::GetProperty,
        label,
        position,
    );
    node.set_inputs(vec![group(minter, "", inputs)]);
    node.set_outputs(vec![group(minter, "", outputs)]);
    Some(node)
}

/// A member call (function or property mutator): flow in, a required owner,
/// the declared parameters; flow out plus the declared outputs.
pub fn member_function_node(
    minter: &mut IdMinter,
    label: &str,
    tooltip: Option<&str>,
    metadata: &SpawnMetadata,
    position: Position,
) -> Option<GraphNode> {
    let owner = owner_handle(minter, metadata)?;
    let params = parameter_handles(minter, &metadata.input_parameters, false);

    let mut outputs = vec![Handle::flow_output(minter.mint("hnd"))];
    outputs.extend(parameter_handles(minter, &metadata.output_parameters, true));

    let mut node = base_node(
        minter,
        NodeKind::Executable,
        metadata.operation,
        label,
        position,
    );
    node.set_comment(tooltip.unwrap_or_default());
    let flow = vec![Handle::flow_input(minter.mint("hnd"))];
    let flow_group = group(minter, "", flow);
    let owner_group = group(minter, "", vec![owner]);
    let param_group = group(minter, "", params);
    node.set_inputs(vec![flow_group, owner_group, param_group]);
    node.set_outputs(vec![group(minter, "", outputs)]);
    Some(node)
}

/// One handle group per declared response status: a flow branch plus the
/// response body handle when the response declares a JSON schema.
fn response_groups(minter: &mut IdMinter, operation: &PathOperation) -> Vec<HandleGroup> {
    let mut groups = Vec::new();

    for (status_raw, response) in operation.responses() {
        if status_raw.parse::<u16>().is_err() {
            continue;
        }
        let label = format!("On {status_raw}");

        let mut flow = Handle::flow_output(minter.mint("hnd"));
        flow.set_name(label.clone());
        flow.set_description(Some(format!("Switch for HTTP status {status_raw}")));
        let mut handles = vec![flow];

        if let Some(schema_ref) = response.json_schema_ref() {
            if let Some(data) = resolved_handle(
                minter,
                EntityRef::parse(schema_ref)
                    .schema_coordinates()
                    .map(|(_, s)| s)
                    .unwrap_or("Body"),
                schema_ref,
                false,
            ) {
                let mut data = data;
                data.set_description(Some(format!("Response object schema for HTTP {status_raw}")));
                handles.push(data);
            }
        }

        groups.push(HandleGroup::new(minter.mint("grp"), label, handles));
    }

    groups
}

/// The REST operation pair: the request node and its status-switch companion,
/// pre-wired body/status/flow.
pub fn rest_operation_nodes(
    store: &SchemaStore,
    minter: &mut IdMinter,
    path_ref: &str,
    position: Position,
) -> Option<(Vec<GraphNode>, Vec<GraphEdge>)> {
    let EntityRef::Path {
        path, http_method, ..
    } = EntityRef::parse(path_ref)
    else {
        warn!(path_ref, "rest spawn skipped: not a path ref");
        return None;
    };
    let Some(verb) = http_method else {
        warn!(path_ref, "rest spawn skipped: path ref names no verb");
        return None;
    };
    let Some(operation_kind) = OperationKind::from_http_verb(verb.as_str()) else {
        warn!(path_ref, "rest spawn skipped: unsupported verb");
        return None;
    };
    let Some(operation) = lookup::operation_by_path_ref(store, path_ref) else {
        warn!(path_ref, "rest spawn skipped: operation not found");
        return None;
    };
    let operation = operation.clone();

    let flow_out_id: HandleId = minter.mint("hnd");
    let status_out_id: HandleId = minter.mint("hnd");
    let body_out_id: HandleId = minter.mint("hnd");

    let mut request_inputs = vec![Handle::flow_input(minter.mint("hnd"))];
    for parameter in operation.parameters() {
        let Some(schema_ref) = parameter.schema_ref() else {
            continue;
        };
        if let Some(mut handle) =
            resolved_handle(minter, parameter.name(), schema_ref, parameter.required())
        {
            handle.set_description(parameter.description().map(str::to_owned));
            handle.set_example(parameter.example().map(str::to_owned));
            request_inputs.push(handle);
        }
    }
    request_inputs.push(Handle::new(
        minter.mint("hnd"),
        "Request Headers",
        "System.Net.Http",
        "HttpRequestHeaders",
    ));
    request_inputs.push(Handle::new(minter.mint("hnd"), "Body", "System", "Object"));

    let mut default_flow = Handle::flow_output(flow_out_id.clone());
    default_flow.set_name("Default");
    let request_outputs = vec![
        default_flow,
        Handle::new(
            minter.mint("hnd"),
            "Response Headers",
            "System.Net.Http",
            "HttpResponseHeaders",
        ),
        Handle::new(status_out_id.clone(), "Status Code", "System.Net", "HttpStatusCode"),
        Handle::new(body_out_id.clone(), "Body", "System", "Object"),
    ];

    let mut request_node = base_node(minter, NodeKind::Executable, operation_kind, &path, position);
    request_node.set_comment(operation.summary().unwrap_or_default());
    request_node.set_inputs(vec![group(minter, "", request_inputs)]);
    request_node.set_outputs(vec![group(minter, "", request_outputs)]);

    let flow_in_id: HandleId = minter.mint("hnd");
    let status_in_id: HandleId = minter.mint("hnd");
    let body_in_id: HandleId = minter.mint("hnd");

    let switch_inputs = vec![
        Handle::flow_input(flow_in_id.clone()),
        Handle::new(status_in_id.clone(), "HttpStatusCode", "System.Net", "HttpStatusCode"),
        Handle::new(body_in_id.clone(), "Body", "System", "Object"),
    ];

    let mut default_branch_flow = Handle::flow_output(minter.mint("hnd"));
    default_branch_flow.set_name("Default");
    let default_branch = vec![
        default_branch_flow,
        Handle::new(minter.mint("hnd"), "Body", "System", "Object"),
    ];

    let mut switch_outputs = response_groups(minter, &operation);
    switch_outputs.push(HandleGroup::new(minter.mint("grp"), "Default", default_branch));

    let mut switch_node = base_node(
        minter,
        NodeKind::Executable,
        OperationKind::ResponseStatusSwitch,
        "Response Status Switch",
        Position::new(position.x + 340.0, position.y),
    );
    switch_node.set_comment(
        "Route execution flow by HTTP response status.\nEach branch has a strongly-typed output contract.",
    );
    switch_node.set_inputs(vec![group(minter, "", switch_inputs)]);
    switch_node.set_outputs(switch_outputs);

    let request_id = request_node.node_id().clone();
    let switch_id = switch_node.node_id().clone();
    let edges = vec![
        GraphEdge::new(
            minter.mint("e"),
            request_id.clone(),
            body_out_id,
            switch_id.clone(),
            body_in_id,
        ),
        GraphEdge::new(
            minter.mint("e"),
            request_id.clone(),
            status_out_id,
            switch_id.clone(),
            status_in_id,
        ),
        GraphEdge::new(minter.mint("e"), request_id, flow_out_id, switch_id, flow_in_id),
    ];

    Some((vec![request_node, switch_node], edges))
}
