// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid lifecycle: create, activate, snapshot, rename, delete, wire, spawn.
//!
//! At most one grid is active at a time; the canvas reflects its graph. The
//! one ordering contract is save-before-switch: the outgoing grid's canvas
//! state must be snapshotted before another grid becomes active, or unsaved
//! edits are silently lost. `save_and_activate` does both.
//!
//! Every public operation is a logged no-op on failure; canvas and project
//! state are left untouched when a target does not resolve.

pub mod canvas;
pub mod spawn;

use tracing::warn;

use crate::model::{
    boundary_group_id, is_valid_name, rename_method_in_ref, EntityRef, GraphEdge, GraphNode,
    GraphSnapshot, Grid, GridId, HandleGroup, HandleId, NodeId, NodeKind, OperationKind, Position,
    Project, Viewport,
};
use crate::query::lookup;
use crate::query::suggest::SpawnMetadata;
use crate::store::SchemaStore;
use crate::sync::connection::can_connect;
use crate::sync::{self, BoundaryDirection};

use canvas::CanvasAdapter;

const INPUT_NODE_COMMENT: &str =
    "Represents the grid input node.\nInput parameters can be modified\nin the properties panel.";
const OUTPUT_NODE_COMMENT: &str =
    "Represents the grid output node.\nOutput parameters can be modified\nin the properties panel.";

/// The editor service: owns the project and the canvas adapter; the schema
/// store is passed into the operations that read it.
#[derive(Debug)]
pub struct GridEditor<C: CanvasAdapter> {
    project: Project,
    canvas: C,
}

impl<C: CanvasAdapter> GridEditor<C> {
    pub fn new(project: Project, canvas: C) -> Self {
        Self { project, canvas }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_parts(self) -> (Project, C) {
        (self.project, self.canvas)
    }

    /// Restores the canvas from the project's active grid, e.g. on startup.
    pub fn initialize(&mut self) -> bool {
        let Some(method_ref) = self.project.active_grid().map(|g| g.method_ref().to_owned())
        else {
            return false;
        };
        self.activate(&method_ref)
    }

    /// Builds a grid for the overload, inserts it, and makes it active. The
    /// previously active grid is snapshotted first. Returns the new grid id,
    /// or `None` (logged) when the overload does not resolve.
    pub fn create_grid(&mut self, store: &SchemaStore, overload_ref: &str) -> Option<GridId> {
        let Some(overload) = lookup::overload_by_ref(store, overload_ref) else {
            warn!(overload_ref, "grid create skipped: overload not found");
            return None;
        };

        let EntityRef::MethodOverload { method, .. } = EntityRef::parse(overload_ref) else {
            warn!(overload_ref, "grid create skipped: not an overload ref");
            return None;
        };

        let input_handles = sync::boundary_handles(overload, BoundaryDirection::Input);
        let output_handles = sync::boundary_handles(overload, BoundaryDirection::Output);

        if self.project.active_grid_id().is_some() {
            self.save_active();
        }

        let minter = self.project.minter_mut();
        let grid_id: GridId = minter.mint("g");
        let input_node_id: NodeId = minter.mint("n");
        let output_node_id: NodeId = minter.mint("n");

        let mut input_node = GraphNode::new(
            input_node_id.clone(),
            NodeKind::Executable,
            OperationKind::GridInput,
        );
        input_node.set_title(method);
        input_node.set_comment(INPUT_NODE_COMMENT);
        input_node.set_deletable(false);
        input_node.set_outputs(vec![HandleGroup::new(boundary_group_id(), "", input_handles)]);

        let mut output_node = GraphNode::new(
            output_node_id.clone(),
            NodeKind::Executable,
            OperationKind::GridOutput,
        );
        output_node.set_title("Return");
        output_node.set_comment(OUTPUT_NODE_COMMENT);
        output_node.set_deletable(false);
        output_node.set_position(Position::new(840.0, 0.0));
        output_node.set_inputs(vec![HandleGroup::new(boundary_group_id(), "", output_handles)]);

        let grid = Grid::new(
            grid_id.clone(),
            input_node_id,
            output_node_id,
            overload_ref,
            GraphSnapshot::new(
                vec![input_node, output_node],
                Vec::new(),
                Viewport::default(),
            ),
        );
        self.project.add_grid(grid);
        self.activate(overload_ref);
        Some(grid_id)
    }

    /// Replaces the canvas with the stored graph of the grid owning
    /// `method_ref` (selection cleared) and marks it active. On a miss the
    /// canvas is left untouched.
    pub fn activate(&mut self, method_ref: &str) -> bool {
        let Some(grid) = self.project.grid_by_method_ref(method_ref) else {
            warn!(method_ref, "activation failed: no grid owns this ref");
            return false;
        };

        let mut nodes = grid.graph().nodes().to_vec();
        for node in &mut nodes {
            node.set_selected(false);
        }
        let edges = grid.graph().edges().to_vec();
        let viewport = grid.graph().viewport();
        let grid_id = grid.instance_id().clone();

        self.canvas.set_nodes(nodes);
        self.canvas.set_edges(edges);
        self.canvas.set_viewport(viewport);
        self.project.set_active_grid_id(Some(grid_id));
        true
    }

    /// Snapshots the canvas into the active grid without switching.
    pub fn save_active(&mut self) -> bool {
        let snapshot = self.canvas.snapshot();
        let Some(grid) = self.project.active_grid_mut() else {
            warn!("save skipped: no active grid");
            return false;
        };
        grid.set_graph(snapshot);
        true
    }

    /// The composite the host should use when switching grids: snapshot the
    /// outgoing grid, then activate the target.
    pub fn save_and_activate(&mut self, method_ref: &str) -> bool {
        if self.project.active_grid_id().is_some() {
            self.save_active();
        }
        self.activate(method_ref)
    }

    /// Renames the method behind the *active* grid's ref and retitles its
    /// input boundary node. Inactive grids are not renamed.
    pub fn rename_method(&mut self, method_ref: &str, new_name: &str) -> bool {
        if !is_valid_name(new_name) {
            warn!(method_ref, new_name, "grid rename rejected: invalid name");
            return false;
        }
        let Some(grid) = self.project.grid_by_method_ref(method_ref) else {
            warn!(method_ref, "grid rename skipped: no grid owns this ref");
            return false;
        };
        if self.project.active_grid_id() != Some(grid.instance_id()) {
            warn!(method_ref, "grid rename skipped: grid is not active");
            return false;
        }
        let input_node_id = grid.input_node_id().clone();

        let new_ref = match EntityRef::parse(method_ref) {
            EntityRef::MethodOverload {
                namespace,
                schema,
                overload_id,
                ..
            } => EntityRef::MethodOverload {
                namespace,
                schema,
                method: new_name.to_owned(),
                overload_id,
            }
            .to_string(),
            EntityRef::Method { .. } => rename_method_in_ref(method_ref, new_name),
            _ => {
                warn!(method_ref, "grid rename skipped: ref has no method segment");
                return false;
            }
        };

        if let Some(grid) = self.project.grid_by_method_ref_mut(method_ref) {
            grid.set_method_ref(new_ref);
        }
        self.canvas.update_nodes(&mut |node| {
            if node.node_id() == &input_node_id {
                node.set_title(new_name);
            }
        });
        true
    }

    /// Removes a grid. Deleting the active grid activates the first
    /// remaining grid, or clears the active pointer when none remain. A
    /// panel selection pointing at the deleted grid is cleared too.
    pub fn delete_grid(&mut self, grid_id: &GridId) -> bool {
        let was_active = self.project.active_grid_id() == Some(grid_id);
        let selection_hit = self
            .project
            .selection()
            .is_some_and(|s| s.instance_id() == grid_id.as_str());

        if self.project.remove_grid(grid_id).is_none() {
            warn!(grid = %grid_id, "grid delete skipped: not found");
            return false;
        }

        if selection_hit {
            self.project.set_selection(None);
        }

        if was_active {
            match self.project.grids().first().map(|g| g.method_ref().to_owned()) {
                Some(fallback_ref) => {
                    self.activate(&fallback_ref);
                }
                None => self.project.set_active_grid_id(None),
            }
        }
        true
    }

    /// Recomputes the boundary handles of the grid owning `overload_ref`
    /// after a signature edit.
    pub fn refresh_boundary_handles(
        &mut self,
        store: &SchemaStore,
        overload_ref: &str,
        direction: BoundaryDirection,
    ) -> bool {
        sync::refresh_boundary_handles(
            store,
            &mut self.project,
            &mut self.canvas,
            overload_ref,
            direction,
        )
    }

    /// Adds a wire if the two handles are type-compatible; otherwise the
    /// edge is simply not added.
    pub fn connect(
        &mut self,
        source_node: &NodeId,
        source_handle: &HandleId,
        target_node: &NodeId,
        target_handle: &HandleId,
    ) -> bool {
        let Some(source) = self.canvas.node(source_node) else {
            warn!(node = %source_node, "connect skipped: source node not found");
            return false;
        };
        let Some(source_info) = source.output_handle(source_handle) else {
            warn!(handle = %source_handle, "connect skipped: source handle not found");
            return false;
        };
        let Some(target) = self.canvas.node(target_node) else {
            warn!(node = %target_node, "connect skipped: target node not found");
            return false;
        };
        let Some(target_info) = target.input_handle(target_handle) else {
            warn!(handle = %target_handle, "connect skipped: target handle not found");
            return false;
        };

        if !can_connect(source_info, target_info) {
            warn!(
                source = source_info.schema(),
                target = target_info.schema(),
                "connect rejected: incompatible handle types"
            );
            return false;
        }

        let edge = GraphEdge::new(
            self.project.minter_mut().mint("e"),
            source_node.clone(),
            source_handle.clone(),
            target_node.clone(),
            target_handle.clone(),
        );
        self.canvas.add_edges(vec![edge]);
        true
    }

    /// Spawns a call node for another grid's overload.
    pub fn spawn_grid_call(
        &mut self,
        store: &SchemaStore,
        method_ref: &str,
        position: Position,
    ) -> bool {
        let Some(node) =
            spawn::grid_call_node(store, self.project.minter_mut(), method_ref, position)
        else {
            return false;
        };
        self.add_spawned(vec![node], Vec::new())
    }

    /// Spawns a variable read node for a schema property ref.
    pub fn spawn_variable_get(
        &mut self,
        store: &SchemaStore,
        property_ref: &str,
        position: Position,
    ) -> bool {
        let Some(node) =
            spawn::variable_get_node(store, self.project.minter_mut(), property_ref, position)
        else {
            return false;
        };
        self.add_spawned(vec![node], Vec::new())
    }

    /// Spawns a variable write node for a schema property ref.
    pub fn spawn_variable_set(
        &mut self,
        store: &SchemaStore,
        property_ref: &str,
        position: Position,
    ) -> bool {
        let Some(node) =
            spawn::variable_set_node(store, self.project.minter_mut(), property_ref, position)
        else {
            return false;
        };
        self.add_spawned(vec![node], Vec::new())
    }

    /// Spawns the node for a selected suggestion leaf (member call, property
    /// accessor or mutator).
    pub fn spawn_member(
        &mut self,
        label: &str,
        tooltip: Option<&str>,
        metadata: &SpawnMetadata,
        position: Position,
    ) -> bool {
        let minter = self.project.minter_mut();
        let node = match metadata.operation {
            OperationKind::GetProperty => {
                spawn::property_access_node(minter, label, metadata, position)
            }
            _ => spawn::member_function_node(minter, label, tooltip, metadata, position),
        };
        let Some(node) = node else {
            return false;
        };
        self.add_spawned(vec![node], Vec::new())
    }

    /// Spawns the REST request/status-switch pair for a path ref.
    pub fn spawn_rest_operation(
        &mut self,
        store: &SchemaStore,
        path_ref: &str,
        position: Position,
    ) -> bool {
        let Some((nodes, edges)) =
            spawn::rest_operation_nodes(store, self.project.minter_mut(), path_ref, position)
        else {
            return false;
        };
        self.add_spawned(nodes, edges)
    }

    fn add_spawned(&mut self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> bool {
        self.canvas.update_nodes(&mut |node| node.set_selected(false));
        self.canvas.add_nodes(nodes);
        if !edges.is_empty() {
            self.canvas.add_edges(edges);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::canvas::{CanvasAdapter, InMemoryCanvas};
    use super::GridEditor;
    use crate::model::fixtures;
    use crate::model::{
        GraphNode, Namespace, PanelSelection, Position, Project, Viewport, FLOW_INPUT,
    };
    use crate::store::SchemaStore;

    fn demo_store() -> SchemaStore {
        let mut store = SchemaStore::new();
        store.insert_namespace(Namespace::new("Demo", true, true, fixtures::demo_document()));
        store
    }

    fn editor() -> GridEditor<InMemoryCanvas> {
        GridEditor::new(Project::new("Demo"), InMemoryCanvas::new())
    }

    fn second_overload(store: &mut SchemaStore) -> String {
        store
            .create_method("Demo", "Order", "Cancel")
            .expect("create method")
    }

    #[test]
    fn create_grid_builds_boundary_nodes_and_activates() {
        let store = demo_store();
        let mut editor = editor();

        let grid_id = editor
            .create_grid(&store, &fixtures::demo_overload_ref())
            .expect("grid id");

        assert_eq!(editor.project().active_grid_id(), Some(&grid_id));
        let grid = editor.project().grid(&grid_id).expect("grid");

        // Output boundary node: flow handle + the Decimal return.
        let output_node = editor
            .canvas()
            .node(grid.output_node_id())
            .expect("output node");
        let output_handles = output_node.inputs()[0].handles();
        assert_eq!(output_handles.len(), 2);
        assert_eq!(output_handles[0].schema(), FLOW_INPUT);
        assert_eq!(output_handles[1].schema(), "Decimal");

        // Input boundary node: the flow handle only.
        let input_node = editor
            .canvas()
            .node(grid.input_node_id())
            .expect("input node");
        assert_eq!(input_node.outputs()[0].handles().len(), 1);
        assert_eq!(input_node.title(), "GetTotal");

        assert!(editor.create_grid(&store, "bogus").is_none());
    }

    #[test]
    fn activation_misses_leave_the_canvas_untouched() {
        let store = demo_store();
        let mut editor = editor();
        editor.create_grid(&store, &fixtures::demo_overload_ref());
        let before = editor.canvas().snapshot();

        assert!(!editor.activate("Demo#/components/schemas/Order/methods/Nope/overloads/ov1"));
        assert_eq!(editor.canvas().snapshot(), before);
    }

    #[test]
    fn save_and_activate_preserves_unsaved_edits() {
        let mut store = demo_store();
        let mut editor = editor();
        let first_ref = fixtures::demo_overload_ref();
        editor.create_grid(&store, &first_ref).expect("first grid");

        let second_ref = second_overload(&mut store);
        editor.create_grid(&store, &second_ref).expect("second grid");

        // Edit the second grid's canvas, then switch back to the first.
        editor.canvas.set_viewport(Viewport {
            x: 123.0,
            y: 0.0,
            zoom: 2.0,
        });
        assert!(editor.save_and_activate(&first_ref));

        // The edit survived inside the second grid's snapshot.
        let second = editor
            .project()
            .grid_by_method_ref(&second_ref)
            .expect("second grid");
        assert_eq!(second.graph().viewport().x, 123.0);

        // And the canvas now shows the first grid.
        let first = editor
            .project()
            .grid_by_method_ref(&first_ref)
            .expect("first grid");
        assert!(editor.canvas().node(first.input_node_id()).is_some());
    }

    #[test]
    fn activation_clears_node_selection() {
        let store = demo_store();
        let mut editor = editor();
        let overload_ref = fixtures::demo_overload_ref();
        editor.create_grid(&store, &overload_ref).expect("grid");

        editor
            .canvas
            .update_nodes(&mut |node| node.set_selected(true));
        editor.save_active();
        editor.activate(&overload_ref);

        assert!(editor
            .canvas()
            .snapshot()
            .nodes()
            .iter()
            .all(|n| !n.selected()));
    }

    #[test]
    fn rename_only_affects_the_active_grid() {
        let mut store = demo_store();
        let mut editor = editor();
        let first_ref = fixtures::demo_overload_ref();
        editor.create_grid(&store, &first_ref).expect("first grid");
        let second_ref = second_overload(&mut store);
        editor.create_grid(&store, &second_ref).expect("second grid");

        // First grid is inactive now; renaming it is a no-op.
        assert!(!editor.rename_method(&first_ref, "Sum"));
        assert!(editor.project().grid_by_method_ref(&first_ref).is_some());

        // The active grid renames and retitles its input node.
        assert!(editor.rename_method(&second_ref, "Abort"));
        let renamed_ref = "Demo#/components/schemas/Order/methods/Abort/overloads/ov1";
        let grid = editor
            .project()
            .grid_by_method_ref(renamed_ref)
            .expect("renamed grid");
        let input_node = editor
            .canvas()
            .node(grid.input_node_id())
            .expect("input node");
        assert_eq!(input_node.title(), "Abort");

        assert!(!editor.rename_method(renamed_ref, "bad name"));
    }

    #[test]
    fn deleting_the_active_grid_falls_back_to_the_first_remaining() {
        let mut store = demo_store();
        let mut editor = editor();
        let first_ref = fixtures::demo_overload_ref();
        editor.create_grid(&store, &first_ref).expect("first grid");
        let second_ref = second_overload(&mut store);
        let second_id = editor.create_grid(&store, &second_ref).expect("second grid");

        assert!(editor.delete_grid(&second_id));

        let active = editor.project().active_grid().expect("active grid");
        assert_eq!(active.method_ref(), first_ref);
        assert_eq!(editor.project().grids().len(), 1);
    }

    #[test]
    fn deleting_the_last_grid_clears_the_active_pointer_and_selection() {
        let store = demo_store();
        let mut editor = editor();
        let grid_id = editor
            .create_grid(&store, &fixtures::demo_overload_ref())
            .expect("grid");
        editor
            .project
            .set_selection(Some(PanelSelection::new(grid_id.as_str(), "gridButton")));

        assert!(editor.delete_grid(&grid_id));

        assert!(editor.project().active_grid_id().is_none());
        assert!(editor.project().selection().is_none());
        assert!(editor.project().grids().is_empty());

        assert!(!editor.delete_grid(&grid_id));
    }

    #[test]
    fn connect_applies_the_type_rule() {
        let store = demo_store();
        let mut editor = editor();
        editor
            .create_grid(&store, &fixtures::demo_overload_ref())
            .expect("grid");

        let grid = editor.project().grids().first().expect("grid").clone();
        let input_node = grid.input_node_id().clone();
        let output_node = grid.output_node_id().clone();
        let flow_out = crate::model::grid_input_flow_handle_id();
        let flow_in = crate::model::grid_output_flow_handle_id();

        // Flow wire: legal.
        assert!(editor.connect(&input_node, &flow_out, &output_node, &flow_in));
        assert_eq!(editor.canvas().snapshot().edges().len(), 1);

        // Flow output into the Decimal return: rejected, nothing added.
        let decimal_handle = editor
            .canvas()
            .node(&output_node)
            .and_then(|n: &GraphNode| {
                n.inputs()[0]
                    .handles()
                    .iter()
                    .find(|h| h.schema() == "Decimal")
                    .map(|h| h.instance_id().clone())
            })
            .expect("decimal handle");
        assert!(!editor.connect(&input_node, &flow_out, &output_node, &decimal_handle));
        assert_eq!(editor.canvas().snapshot().edges().len(), 1);
    }

    #[test]
    fn spawned_nodes_deselect_everything_else() {
        let store = demo_store();
        let mut editor = editor();
        editor
            .create_grid(&store, &fixtures::demo_overload_ref())
            .expect("grid");

        assert!(editor.spawn_grid_call(
            &store,
            &fixtures::demo_overload_ref(),
            Position::new(200.0, 100.0)
        ));

        let snapshot = editor.canvas().snapshot();
        assert_eq!(snapshot.nodes().len(), 3);
        let selected = snapshot
            .nodes()
            .iter()
            .filter(|n| n.selected())
            .collect::<Vec<_>>();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title(), "GetTotal");
    }
}
