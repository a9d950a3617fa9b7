// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{GraphEdge, GraphNode, GraphSnapshot, NodeId, Viewport};

/// The rendering surface the editor drives.
///
/// The core never touches drawing; it only reads and replaces the adapter's
/// node/edge/viewport collections. A host UI wraps its canvas widget in this
/// trait; [`InMemoryCanvas`] is the headless implementation used by the CLI
/// and tests.
pub trait CanvasAdapter {
    fn node(&self, node_id: &NodeId) -> Option<&GraphNode>;

    /// Applies a transform to every node in place.
    fn update_nodes(&mut self, transform: &mut dyn FnMut(&mut GraphNode));

    /// Replaces the whole node list.
    fn set_nodes(&mut self, nodes: Vec<GraphNode>);

    /// Replaces the whole edge list.
    fn set_edges(&mut self, edges: Vec<GraphEdge>);

    fn set_viewport(&mut self, viewport: Viewport);

    fn add_nodes(&mut self, nodes: Vec<GraphNode>);

    fn add_edges(&mut self, edges: Vec<GraphEdge>);

    /// The current graph as a value, for grid snapshots.
    fn snapshot(&self) -> GraphSnapshot;
}

/// A canvas that is just the graph value, with no rendering attached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InMemoryCanvas {
    graph: GraphSnapshot,
}

impl InMemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &GraphSnapshot {
        &self.graph
    }
}

impl CanvasAdapter for InMemoryCanvas {
    fn node(&self, node_id: &NodeId) -> Option<&GraphNode> {
        self.graph.node(node_id)
    }

    fn update_nodes(&mut self, transform: &mut dyn FnMut(&mut GraphNode)) {
        for node in self.graph.nodes_mut() {
            transform(node);
        }
    }

    fn set_nodes(&mut self, nodes: Vec<GraphNode>) {
        *self.graph.nodes_mut() = nodes;
    }

    fn set_edges(&mut self, edges: Vec<GraphEdge>) {
        *self.graph.edges_mut() = edges;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.graph.set_viewport(viewport);
    }

    fn add_nodes(&mut self, nodes: Vec<GraphNode>) {
        self.graph.nodes_mut().extend(nodes);
    }

    fn add_edges(&mut self, edges: Vec<GraphEdge>) {
        self.graph.edges_mut().extend(edges);
    }

    fn snapshot(&self) -> GraphSnapshot {
        self.graph.clone()
    }
}
