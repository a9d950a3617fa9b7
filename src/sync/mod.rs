// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Boundary-handle synchronization.
//!
//! Keeps a grid's two boundary nodes consistent with the overload signature
//! they mirror. The new handle list fully replaces the old one; parameters
//! that survived an edit keep their handle identity, so wires attached to
//! them stay valid. Removing a parameter removes its handle, which orphans
//! any wire attached to it — accepted and observable, not an error.

pub mod connection;

use tracing::warn;

use crate::grids::canvas::CanvasAdapter;
use crate::model::{
    boundary_group_id, grid_input_flow_handle_id, grid_output_flow_handle_id, GraphNode, Handle,
    HandleGroup, MethodOverload, Project,
};
use crate::query::lookup;
use crate::store::SchemaStore;

/// Which boundary node a synchronization pass targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryDirection {
    /// The grid's input node; mirrors `signature.parameters`.
    Input,
    /// The grid's output node; mirrors `signature.return`.
    Output,
}

/// The handle list a boundary node must expose for the given signature side:
/// the fixed control-flow handle first, then one handle per parameter, each
/// reusing the parameter's instance id.
pub fn boundary_handles(overload: &MethodOverload, direction: BoundaryDirection) -> Vec<Handle> {
    let (flow, parameters) = match direction {
        BoundaryDirection::Input => (
            Handle::flow_output(grid_input_flow_handle_id()),
            overload.signature().parameters(),
        ),
        BoundaryDirection::Output => (
            Handle::flow_input(grid_output_flow_handle_id()),
            overload.signature().returns(),
        ),
    };

    let mut handles = Vec::with_capacity(parameters.len() + 1);
    handles.push(flow);
    handles.extend(parameters.iter().map(Handle::for_parameter));
    handles
}

/// Recomputes the boundary handles of the grid owning `overload_ref`.
///
/// The active grid is edited through the canvas; an inactive grid is edited
/// inside its stored snapshot. Returns whether a node was updated; a missing
/// overload, grid, or node is a logged no-op.
pub fn refresh_boundary_handles<C: CanvasAdapter>(
    store: &SchemaStore,
    project: &mut Project,
    canvas: &mut C,
    overload_ref: &str,
    direction: BoundaryDirection,
) -> bool {
    let Some(overload) = lookup::overload_by_ref(store, overload_ref) else {
        warn!(overload_ref, "handle sync skipped: overload not found");
        return false;
    };
    let handles = boundary_handles(overload, direction);
    let groups = vec![HandleGroup::new(boundary_group_id(), "", handles)];

    let Some(grid) = project.grid_by_method_ref(overload_ref) else {
        warn!(overload_ref, "handle sync skipped: no grid owns this overload");
        return false;
    };
    let node_id = match direction {
        BoundaryDirection::Input => grid.input_node_id().clone(),
        BoundaryDirection::Output => grid.output_node_id().clone(),
    };

    let is_active = project.active_grid_id() == Some(grid.instance_id());
    if is_active {
        let mut applied = false;
        canvas.update_nodes(&mut |node| {
            if node.node_id() == &node_id {
                apply_groups(node, &groups, direction);
                applied = true;
            }
        });
        if !applied {
            warn!(overload_ref, node = %node_id, "handle sync skipped: boundary node not on canvas");
        }
        applied
    } else {
        let Some(node) = project
            .grid_by_method_ref_mut(overload_ref)
            .and_then(|g| g.graph_mut().node_mut(&node_id))
        else {
            warn!(overload_ref, node = %node_id, "handle sync skipped: boundary node not in snapshot");
            return false;
        };
        apply_groups(node, &groups, direction);
        true
    }
}

fn apply_groups(node: &mut GraphNode, groups: &[HandleGroup], direction: BoundaryDirection) {
    match direction {
        // The input node *originates* data, so its parameter handles sit on
        // the output side; symmetrically for the output node.
        BoundaryDirection::Input => node.set_outputs(groups.to_vec()),
        BoundaryDirection::Output => node.set_inputs(groups.to_vec()),
    }
}
