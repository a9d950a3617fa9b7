// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::GraphSnapshot;
use super::ids::{GridId, NodeId};

/// The visual realization of one method overload's body.
///
/// A grid owns two fixed boundary nodes: the input node exposes one output
/// handle per input parameter, the output node one input handle per return
/// parameter (each plus a control-flow handle).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    instance_id: GridId,
    input_node_id: NodeId,
    output_node_id: NodeId,
    method_ref: String,
    graph: GraphSnapshot,
}

impl Grid {
    pub fn new(
        instance_id: GridId,
        input_node_id: NodeId,
        output_node_id: NodeId,
        method_ref: impl Into<String>,
        graph: GraphSnapshot,
    ) -> Self {
        Self {
            instance_id,
            input_node_id,
            output_node_id,
            method_ref: method_ref.into(),
            graph,
        }
    }

    pub fn instance_id(&self) -> &GridId {
        &self.instance_id
    }

    pub fn input_node_id(&self) -> &NodeId {
        &self.input_node_id
    }

    pub fn output_node_id(&self) -> &NodeId {
        &self.output_node_id
    }

    /// The overload this grid visualizes, as a canonical ref string.
    pub fn method_ref(&self) -> &str {
        &self.method_ref
    }

    pub fn set_method_ref(&mut self, method_ref: impl Into<String>) {
        self.method_ref = method_ref.into();
    }

    pub fn graph(&self) -> &GraphSnapshot {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphSnapshot {
        &mut self.graph
    }

    pub fn set_graph(&mut self, graph: GraphSnapshot) {
        self.graph = graph;
    }
}
