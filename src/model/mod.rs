// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the schema tree, entity refs, and the grid graph.
//!
//! Projects contain grids (one per method overload) whose boundary handles
//! mirror the overload's signature.

pub mod entity_ref;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod grid;
pub mod handle;
pub mod ids;
pub mod naming;
pub mod paths;
pub mod project;
pub mod schema;

pub use entity_ref::{rename_method_in_ref, EntityRef, HttpMethod};
pub use graph::{
    GraphEdge, GraphNode, GraphSnapshot, NodeKind, OperationKind, Position, Viewport,
};
pub use grid::Grid;
pub use handle::{
    boundary_group_id, grid_input_flow_handle_id, grid_output_flow_handle_id, Handle, HandleGroup,
    FLOW_INPUT, FLOW_NAMESPACE, FLOW_OUTPUT, UNRESOLVED_TYPE,
};
pub use ids::{EdgeId, GridId, HandleGroupId, HandleId, Id, IdError, IdMinter, NodeId};
pub use naming::{human_title, is_valid_name, unique_name};
pub use paths::{
    normalize_path_template, paths_match, MediaTypeObject, OperationParameter, OperationResponse,
    ParamLocation, PathItem, PathOperation,
};
pub use project::{PanelSelection, Project};
pub use schema::{
    system_schema_ref, ContainerType, DocumentInfo, MethodDefinition, MethodKind, MethodOverload,
    Namespace, ParameterDef, PropertyDefinition, SchemaDefinition, SchemaDocument, SchemaKind,
    Signature, SYSTEM_NAMESPACE,
};
