// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entity_ref::EntityRef;
use super::ids::{HandleGroupId, HandleId};
use super::schema::ParameterDef;

/// Reserved type name of a handle that *originates* control flow.
pub const FLOW_OUTPUT: &str = "flowOutput";
/// Reserved type name of a handle that *accepts* control flow.
pub const FLOW_INPUT: &str = "flowInput";
/// Namespace the two reserved flow types live in.
pub const FLOW_NAMESPACE: &str = "Flow";

/// Placeholder coordinates for a parameter whose type ref does not resolve.
pub const UNRESOLVED_TYPE: &str = "Unknown";

const GRID_INPUT_FLOW_HANDLE: &str = "hnd:flow-grid-input";
const GRID_OUTPUT_FLOW_HANDLE: &str = "hnd:flow-grid-output";
const BOUNDARY_GROUP: &str = "grp:boundary";

/// Fixed id of the flow handle on a grid's input boundary node.
///
/// Well known and stable so flow-only wires survive signature edits.
pub fn grid_input_flow_handle_id() -> HandleId {
    HandleId::new(GRID_INPUT_FLOW_HANDLE).expect("well-known handle id")
}

/// Fixed id of the flow handle on a grid's output boundary node.
pub fn grid_output_flow_handle_id() -> HandleId {
    HandleId::new(GRID_OUTPUT_FLOW_HANDLE).expect("well-known handle id")
}

/// Fixed id of the single handle group on a boundary node.
pub fn boundary_group_id() -> HandleGroupId {
    HandleGroupId::new(BOUNDARY_GROUP).expect("well-known group id")
}

/// A typed connection point on a graph node.
///
/// Owned by exactly one node. `schema`/`namespace` name the handle's resolved
/// type; `instance_id` is the stable identity edges attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    instance_id: HandleId,
    name: String,
    namespace: String,
    schema: String,
    required: bool,
    is_array: bool,
    description: Option<String>,
    example: Option<String>,
}

impl Handle {
    pub fn new(
        instance_id: HandleId,
        name: impl Into<String>,
        namespace: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            instance_id,
            name: name.into(),
            namespace: namespace.into(),
            schema: schema.into(),
            required: false,
            is_array: false,
            description: None,
            example: None,
        }
    }

    /// An unnamed control-flow output port.
    pub fn flow_output(instance_id: HandleId) -> Self {
        Self::new(instance_id, "", FLOW_NAMESPACE, FLOW_OUTPUT)
    }

    /// An unnamed control-flow input port.
    pub fn flow_input(instance_id: HandleId) -> Self {
        Self::new(instance_id, "", FLOW_NAMESPACE, FLOW_INPUT)
    }

    /// The handle mirroring a method parameter: same instance id, type
    /// coordinates resolved from the parameter's `$ref`. An unresolvable ref
    /// degrades to placeholder coordinates instead of failing.
    pub fn for_parameter(parameter: &ParameterDef) -> Self {
        let (namespace, schema) = match EntityRef::parse(parameter.type_ref()).schema_coordinates()
        {
            Some((namespace, schema)) => (namespace.to_owned(), schema.to_owned()),
            None => (UNRESOLVED_TYPE.to_owned(), UNRESOLVED_TYPE.to_owned()),
        };

        Self {
            instance_id: parameter.instance_id().clone(),
            name: parameter.name().to_owned(),
            namespace,
            schema,
            required: parameter.required(),
            is_array: false,
            description: parameter.description().map(str::to_owned),
            example: None,
        }
    }

    pub fn instance_id(&self) -> &HandleId {
        &self.instance_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn set_is_array(&mut self, is_array: bool) {
        self.is_array = is_array;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn set_example<T: Into<String>>(&mut self, example: Option<T>) {
        self.example = example.map(Into::into);
    }

    pub fn is_flow(&self) -> bool {
        self.schema == FLOW_OUTPUT || self.schema == FLOW_INPUT
    }
}

/// A named bundle of handles displayed together on one side of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleGroup {
    instance_id: HandleGroupId,
    name: String,
    handles: Vec<Handle>,
}

impl HandleGroup {
    pub fn new(instance_id: HandleGroupId, name: impl Into<String>, handles: Vec<Handle>) -> Self {
        Self {
            instance_id,
            name: name.into(),
            handles,
        }
    }

    pub fn instance_id(&self) -> &HandleGroupId {
        &self.instance_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut Vec<Handle> {
        &mut self.handles
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, FLOW_INPUT, FLOW_NAMESPACE, FLOW_OUTPUT, UNRESOLVED_TYPE};
    use crate::model::ids::HandleId;
    use crate::model::schema::ParameterDef;

    fn hid(value: &str) -> HandleId {
        HandleId::new(value).expect("handle id")
    }

    #[test]
    fn parameter_handle_keeps_the_parameter_identity() {
        let mut param = ParameterDef::new(
            hid("p:7"),
            "customerId",
            "System#/components/schemas/String",
        );
        param.set_required(true);

        let handle = Handle::for_parameter(&param);

        assert_eq!(handle.instance_id().as_str(), "p:7");
        assert_eq!(handle.name(), "customerId");
        assert_eq!(handle.namespace(), "System");
        assert_eq!(handle.schema(), "String");
        assert!(handle.required());
        assert!(!handle.is_flow());
    }

    #[test]
    fn unresolvable_parameter_ref_degrades_to_placeholders() {
        let param = ParameterDef::new(hid("p:8"), "mystery", "not a ref");
        let handle = Handle::for_parameter(&param);

        assert_eq!(handle.namespace(), UNRESOLVED_TYPE);
        assert_eq!(handle.schema(), UNRESOLVED_TYPE);
    }

    #[test]
    fn flow_handles_use_the_reserved_types() {
        let output = Handle::flow_output(hid("h:1"));
        assert_eq!(output.schema(), FLOW_OUTPUT);
        assert_eq!(output.namespace(), FLOW_NAMESPACE);
        assert!(output.is_flow());

        let input = Handle::flow_input(hid("h:2"));
        assert_eq!(input.schema(), FLOW_INPUT);
        assert!(input.is_flow());
    }
}
