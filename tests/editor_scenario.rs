// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end editor scenario: import a namespace, build a grid for one of
//! its overloads, edit the signature, and watch the boundary handles (and
//! the wires attached to them) stay consistent.

use proteus::format::{import_from_str, ImportOptions};
use proteus::grids::canvas::{CanvasAdapter, InMemoryCanvas};
use proteus::grids::GridEditor;
use proteus::model::{HandleId, ParameterDef, Position, Project, FLOW_INPUT, FLOW_OUTPUT};
use proteus::query::lookup;
use proteus::store::SchemaStore;
use proteus::sync::BoundaryDirection;

const DEMO_DOCUMENT: &str = r##"{
    "openapi": "3.0.0",
    "info": { "title": "Demo", "version": "1.0.0" },
    "components": {
        "schemas": {
            "Order": {
                "type": "Order",
                "kind": "class",
                "properties": {
                    "Id": {
                        "$ref": "System#/components/schemas/String",
                        "type": "String",
                        "kind": "primitive",
                        "containerType": "None",
                        "title": "Id"
                    }
                },
                "x-methods": {
                    "GetTotal": {
                        "owner": { "$ref": "Demo#/components/schemas/Order" },
                        "overloads": {
                            "ov1": {
                                "overloadId": "ov1",
                                "name": "GetTotal",
                                "methodKind": "instance",
                                "signature": {
                                    "parameters": [],
                                    "return": [
                                        {
                                            "instanceId": "p:total",
                                            "name": "total",
                                            "$ref": "System#/components/schemas/Decimal"
                                        }
                                    ]
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}"##;

fn imported_store() -> SchemaStore {
    let namespace = import_from_str(
        DEMO_DOCUMENT,
        ImportOptions {
            editable: true,
            flow_capable: true,
            normalize: false,
        },
    )
    .expect("demo document imports");

    let mut store = SchemaStore::new();
    store.insert_namespace(namespace);
    store
}

#[test]
fn signature_edits_flow_into_the_grid_without_breaking_wires() {
    let mut store = imported_store();
    let mut editor = GridEditor::new(Project::new("Demo"), InMemoryCanvas::new());

    // The imported overload is offered as grid material.
    let overload_refs = lookup::schema_method_overload_refs(&store, "Demo", "Order");
    assert_eq!(
        overload_refs,
        vec!["Demo#/components/schemas/Order/methods/GetTotal/overloads/ov1".to_owned()]
    );
    let overload_ref = &overload_refs[0];

    let grid_id = editor.create_grid(&store, overload_ref).expect("grid");
    assert_eq!(editor.project().active_grid_id(), Some(&grid_id));

    let (input_node_id, output_node_id) = {
        let grid = editor.project().grid(&grid_id).expect("grid");
        (grid.input_node_id().clone(), grid.output_node_id().clone())
    };

    // Output boundary: control flow + the Decimal return. Input boundary:
    // control flow only.
    {
        let output_node = editor.canvas().node(&output_node_id).expect("output node");
        let handles = output_node.inputs()[0].handles();
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].schema(), FLOW_INPUT);
        assert_eq!(handles[1].schema(), "Decimal");
        assert_eq!(handles[1].instance_id().as_str(), "p:total");

        let input_node = editor.canvas().node(&input_node_id).expect("input node");
        let handles = input_node.outputs()[0].handles();
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].schema(), FLOW_OUTPUT);
    }

    // Add a `customerId: String` parameter to the overload and resync.
    let param_id = HandleId::new("p:cust").expect("handle id");
    {
        let mut overload = lookup::overload_by_ref(&store, overload_ref)
            .expect("overload")
            .clone();
        let mut parameter = ParameterDef::new(
            param_id.clone(),
            "customerId",
            "System#/components/schemas/String",
        );
        parameter.set_required(true);
        overload.signature_mut().parameters_mut().push(parameter);
        store
            .update_method_overload(overload_ref, overload)
            .expect("update overload");
    }
    assert!(editor.refresh_boundary_handles(&store, overload_ref, BoundaryDirection::Input));

    // The input boundary now exposes the new parameter, keyed by its id.
    {
        let input_node = editor.canvas().node(&input_node_id).expect("input node");
        let handles = input_node.outputs()[0].handles();
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[1].instance_id(), &param_id);
        assert_eq!(handles[1].schema(), "String");
        assert!(handles[1].required());
    }

    // Wire the new parameter into a variable-set node (String into String).
    assert!(editor.spawn_variable_set(
        &store,
        "Demo#/components/schemas/Order/properties/Id",
        Position::new(400.0, 0.0),
    ));
    let (set_node_id, value_handle_id) = {
        let snapshot = editor.canvas().snapshot();
        let set_node = snapshot
            .nodes()
            .iter()
            .find(|n| n.title() == "Set Id")
            .expect("set node");
        let value = set_node.inputs()[0]
            .handles()
            .iter()
            .find(|h| h.schema() == "String")
            .expect("value handle");
        (set_node.node_id().clone(), value.instance_id().clone())
    };
    assert!(editor.connect(&input_node_id, &param_id, &set_node_id, &value_handle_id));

    // Rename the parameter; the handle keeps its id, so the wire stays
    // attached to a live handle.
    {
        let mut overload = lookup::overload_by_ref(&store, overload_ref)
            .expect("overload")
            .clone();
        overload.signature_mut().parameters_mut()[0].set_name("buyerId");
        store
            .update_method_overload(overload_ref, overload)
            .expect("update overload");
    }
    assert!(editor.refresh_boundary_handles(&store, overload_ref, BoundaryDirection::Input));

    let snapshot = editor.canvas().snapshot();
    let edge = snapshot
        .edges()
        .iter()
        .find(|e| e.target() == &set_node_id)
        .expect("wire survives");
    let input_node = snapshot
        .nodes()
        .iter()
        .find(|n| n.node_id() == &input_node_id)
        .expect("input node");
    let live = input_node
        .output_handle(edge.source_handle())
        .expect("edge still points at a live handle");
    assert_eq!(live.name(), "buyerId");

    // Removing the parameter removes its handle; the edge is orphaned, which
    // is accepted and observable.
    {
        let mut overload = lookup::overload_by_ref(&store, overload_ref)
            .expect("overload")
            .clone();
        overload.signature_mut().parameters_mut().clear();
        store
            .update_method_overload(overload_ref, overload)
            .expect("update overload");
    }
    assert!(editor.refresh_boundary_handles(&store, overload_ref, BoundaryDirection::Input));

    let snapshot = editor.canvas().snapshot();
    let input_node = snapshot
        .nodes()
        .iter()
        .find(|n| n.node_id() == &input_node_id)
        .expect("input node");
    assert!(input_node.output_handle(&param_id).is_none());
    assert!(snapshot.edges().iter().any(|e| e.source_handle() == &param_id));
}

#[test]
fn grid_deletion_falls_back_and_never_leaves_two_active()
{
    let mut store = imported_store();
    let mut editor = GridEditor::new(Project::new("Demo"), InMemoryCanvas::new());

    let first_ref = "Demo#/components/schemas/Order/methods/GetTotal/overloads/ov1";
    editor.create_grid(&store, first_ref).expect("first grid");

    let second_ref = store
        .create_method("Demo", "Order", "Cancel")
        .expect("second method");
    let second_id = editor.create_grid(&store, &second_ref).expect("second grid");
    assert_eq!(editor.project().active_grid_id(), Some(&second_id));

    // Deleting the active grid with two grids present: exactly one active.
    assert!(editor.delete_grid(&second_id));
    let remaining_active = editor.project().active_grid().expect("active grid");
    assert_eq!(remaining_active.method_ref(), first_ref);
    assert_eq!(editor.project().grids().len(), 1);

    // Deleting the last grid: nothing active.
    let last_id = remaining_active.instance_id().clone();
    assert!(editor.delete_grid(&last_id));
    assert!(editor.project().active_grid_id().is_none());
    assert!(editor.project().grids().is_empty());
}
