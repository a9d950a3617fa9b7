// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::handle::{Handle, HandleGroup};
use super::ids::{EdgeId, HandleId, NodeId};

/// What a node does when the grid runs; decides which spawner builds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    RestGet,
    RestPost,
    RestPut,
    RestDelete,
    RestPatch,
    RestOptions,
    RestHead,
    /// Routes execution flow by HTTP response status.
    ResponseStatusSwitch,
    /// Calls another grid (method overload).
    GridCall,
    GridInput,
    GridOutput,
    Variable,
    PropertyFunction,
    GetProperty,
    SetProperty,
    GetVariable,
    SetVariable,
    /// Panel rows that never spawn a node.
    Passive,
}

impl OperationKind {
    pub fn is_rest(&self) -> bool {
        matches!(
            self,
            Self::RestGet
                | Self::RestPost
                | Self::RestPut
                | Self::RestDelete
                | Self::RestPatch
                | Self::RestOptions
                | Self::RestHead
        )
    }

    /// The REST operation kind for a lowercase verb, if there is one.
    pub fn from_http_verb(verb: &str) -> Option<Self> {
        match verb {
            "get" => Some(Self::RestGet),
            "post" => Some(Self::RestPost),
            "put" => Some(Self::RestPut),
            "delete" => Some(Self::RestDelete),
            "patch" => Some(Self::RestPatch),
            "options" => Some(Self::RestOptions),
            "head" => Some(Self::RestHead),
            _ => None,
        }
    }
}

/// The two node shells the canvas renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Participates in control flow; carries a comment and a toolbox.
    Executable,
    /// A pure value reference without flow handles.
    Referenceable,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// One node on the canvas: shell kind, operation, title, and the handle
/// groups on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    node_id: NodeId,
    kind: NodeKind,
    operation: OperationKind,
    title: String,
    comment: String,
    schema_ref: String,
    position: Position,
    deletable: bool,
    selected: bool,
    inputs: Vec<HandleGroup>,
    outputs: Vec<HandleGroup>,
}

impl GraphNode {
    pub fn new(node_id: NodeId, kind: NodeKind, operation: OperationKind) -> Self {
        Self {
            node_id,
            kind,
            operation,
            title: String::new(),
            comment: String::new(),
            schema_ref: String::new(),
            position: Position::default(),
            deletable: true,
            selected: false,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn schema_ref(&self) -> &str {
        &self.schema_ref
    }

    pub fn set_schema_ref(&mut self, schema_ref: impl Into<String>) {
        self.schema_ref = schema_ref.into();
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn deletable(&self) -> bool {
        self.deletable
    }

    pub fn set_deletable(&mut self, deletable: bool) {
        self.deletable = deletable;
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn inputs(&self) -> &[HandleGroup] {
        &self.inputs
    }

    /// Replaces the whole input side. Synchronization always swaps the full
    /// group list; there is no partial merge.
    pub fn set_inputs(&mut self, inputs: Vec<HandleGroup>) {
        self.inputs = inputs;
    }

    pub fn outputs(&self) -> &[HandleGroup] {
        &self.outputs
    }

    pub fn set_outputs(&mut self, outputs: Vec<HandleGroup>) {
        self.outputs = outputs;
    }

    pub fn input_handle(&self, handle_id: &HandleId) -> Option<&Handle> {
        Self::find_handle(&self.inputs, handle_id)
    }

    pub fn output_handle(&self, handle_id: &HandleId) -> Option<&Handle> {
        Self::find_handle(&self.outputs, handle_id)
    }

    fn find_handle<'a>(groups: &'a [HandleGroup], handle_id: &HandleId) -> Option<&'a Handle> {
        groups
            .iter()
            .flat_map(HandleGroup::handles)
            .find(|h| h.instance_id() == handle_id)
    }
}

/// A wire between an output handle and an input handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    edge_id: EdgeId,
    source: NodeId,
    source_handle: HandleId,
    target: NodeId,
    target_handle: HandleId,
}

impl GraphEdge {
    pub fn new(
        edge_id: EdgeId,
        source: NodeId,
        source_handle: HandleId,
        target: NodeId,
        target_handle: HandleId,
    ) -> Self {
        Self {
            edge_id,
            source,
            source_handle,
            target,
            target_handle,
        }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn source_handle(&self) -> &HandleId {
        &self.source_handle
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn target_handle(&self) -> &HandleId {
        &self.target_handle
    }
}

/// The persisted form of a grid's canvas: nodes, edges, viewport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphSnapshot {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    viewport: Viewport,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, viewport: Viewport) -> Self {
        Self {
            nodes,
            edges,
            viewport,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<GraphNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<GraphEdge> {
        &mut self.edges
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.node_id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.node_id() == node_id)
    }
}
