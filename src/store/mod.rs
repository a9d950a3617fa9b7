// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The in-memory schema store and its mutation surface.
//!
//! Every operation is total and atomic: it either fully applies or leaves the
//! store untouched and reports why via [`StoreError`]. Re-invoking a no-op
//! with the same arguments stays a no-op. Readers running synchronously after
//! a mutation always observe a consistent tree.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::model::{
    is_valid_name, EntityRef, MethodDefinition, MethodOverload, Namespace, PropertyDefinition,
    SchemaDefinition,
};

/// Why a store operation did not apply. Expected conditions, never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NamespaceNotFound { namespace: String },
    SchemaNotFound { namespace: String, schema: String },
    PropertyNotFound { schema: String, property: String },
    MethodNotFound { schema: String, method: String },
    OverloadNotFound { method: String, overload_id: String },
    NameCollision { name: String },
    InvalidName { name: String },
    NotEditable { namespace: String },
    MalformedRef { reference: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamespaceNotFound { namespace } => {
                write!(f, "namespace not found (name={namespace})")
            }
            Self::SchemaNotFound { namespace, schema } => {
                write!(f, "schema not found (namespace={namespace}, name={schema})")
            }
            Self::PropertyNotFound { schema, property } => {
                write!(f, "property not found (schema={schema}, name={property})")
            }
            Self::MethodNotFound { schema, method } => {
                write!(f, "method not found (schema={schema}, name={method})")
            }
            Self::OverloadNotFound {
                method,
                overload_id,
            } => write!(f, "overload not found (method={method}, id={overload_id})"),
            Self::NameCollision { name } => write!(f, "name already in use (name={name})"),
            Self::InvalidName { name } => write!(f, "invalid name (name={name:?})"),
            Self::NotEditable { namespace } => {
                write!(f, "namespace is not editable (name={namespace})")
            }
            Self::MalformedRef { reference } => {
                write!(f, "ref does not address a method overload (ref={reference})")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Namespace -> schema definitions, the single source the whole editor reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaStore {
    namespaces: BTreeMap<String, Namespace>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespaces(&self) -> &BTreeMap<String, Namespace> {
        &self.namespaces
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Installs an imported namespace wholesale, replacing any namespace of
    /// the same name. This is the import path; it does not validate the name.
    pub fn insert_namespace(&mut self, namespace: Namespace) {
        debug!(name = namespace.name(), "namespace installed");
        self.namespaces
            .insert(namespace.name().to_owned(), namespace);
    }

    pub fn create_namespace(&mut self, name: &str) -> Result<(), StoreError> {
        if !is_valid_name(name) {
            warn!(name, "namespace create rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: name.to_owned(),
            });
        }
        if self.namespaces.contains_key(name) {
            warn!(name, "namespace create skipped: already exists");
            return Err(StoreError::NameCollision {
                name: name.to_owned(),
            });
        }

        self.namespaces
            .insert(name.to_owned(), Namespace::user_created(name));
        Ok(())
    }

    pub fn delete_namespace(&mut self, name: &str) -> Result<(), StoreError> {
        let Some(namespace) = self.namespaces.get(name) else {
            warn!(name, "namespace delete skipped: not found");
            return Err(StoreError::NamespaceNotFound {
                namespace: name.to_owned(),
            });
        };
        if !namespace.editable() {
            warn!(name, "namespace delete rejected: not editable");
            return Err(StoreError::NotEditable {
                namespace: name.to_owned(),
            });
        }

        self.namespaces.remove(name);
        Ok(())
    }

    /// Moves the map entry and rewrites the namespace's own name field.
    /// External ref strings pointing into the namespace are left unchanged;
    /// refs are stable identifiers and do not follow display renames.
    pub fn rename_namespace(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if !is_valid_name(new) {
            warn!(old, new, "namespace rename rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: new.to_owned(),
            });
        }
        let Some(namespace) = self.namespaces.get(old) else {
            warn!(old, "namespace rename skipped: not found");
            return Err(StoreError::NamespaceNotFound {
                namespace: old.to_owned(),
            });
        };
        if !namespace.editable() {
            warn!(old, "namespace rename rejected: not editable");
            return Err(StoreError::NotEditable {
                namespace: old.to_owned(),
            });
        }
        if self.namespaces.contains_key(new) {
            warn!(old, new, "namespace rename skipped: name already in use");
            return Err(StoreError::NameCollision {
                name: new.to_owned(),
            });
        }

        let mut namespace = self
            .namespaces
            .remove(old)
            .expect("presence checked above");
        namespace.set_name(new);
        self.namespaces.insert(new.to_owned(), namespace);
        Ok(())
    }

    pub fn create_schema(&mut self, namespace: &str, name: &str) -> Result<(), StoreError> {
        if !is_valid_name(name) {
            warn!(namespace, name, "schema create rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: name.to_owned(),
            });
        }

        let ns = self.editable_namespace_mut(namespace)?;
        if ns.document().schemas().contains_key(name) {
            warn!(namespace, name, "schema create skipped: already exists");
            return Err(StoreError::NameCollision {
                name: name.to_owned(),
            });
        }

        ns.document_mut()
            .schemas_mut()
            .insert(name.to_owned(), SchemaDefinition::new(name));
        Ok(())
    }

    pub fn rename_schema(&mut self, namespace: &str, old: &str, new: &str) -> Result<(), StoreError> {
        if !is_valid_name(new) {
            warn!(namespace, old, new, "schema rename rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: new.to_owned(),
            });
        }

        let ns = self.editable_namespace_mut(namespace)?;
        let schemas = ns.document().schemas();
        if !schemas.contains_key(old) {
            warn!(namespace, old, "schema rename skipped: not found");
            return Err(StoreError::SchemaNotFound {
                namespace: namespace.to_owned(),
                schema: old.to_owned(),
            });
        }
        if schemas.contains_key(new) {
            warn!(namespace, old, new, "schema rename skipped: name already in use");
            return Err(StoreError::NameCollision {
                name: new.to_owned(),
            });
        }

        let schemas = ns.document_mut().schemas_mut();
        let definition = schemas.remove(old).expect("presence checked above");
        schemas.insert(new.to_owned(), definition);
        Ok(())
    }

    /// Removes the definition. `$ref` strings in other schemas that point at
    /// it are intentionally not rewritten.
    pub fn delete_schema(&mut self, namespace: &str, name: &str) -> Result<(), StoreError> {
        let ns = self.editable_namespace_mut(namespace)?;
        if ns.document_mut().schemas_mut().remove(name).is_none() {
            warn!(namespace, name, "schema delete skipped: not found");
            return Err(StoreError::SchemaNotFound {
                namespace: namespace.to_owned(),
                schema: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Whole-value replace of a schema definition, used by editors that build
    /// a modified copy.
    pub fn update_schema(
        &mut self,
        namespace: &str,
        name: &str,
        definition: SchemaDefinition,
    ) -> Result<(), StoreError> {
        let ns = self.editable_namespace_mut(namespace)?;
        let Some(slot) = ns.document_mut().schemas_mut().get_mut(name) else {
            warn!(namespace, name, "schema update skipped: not found");
            return Err(StoreError::SchemaNotFound {
                namespace: namespace.to_owned(),
                schema: name.to_owned(),
            });
        };

        *slot = definition;
        Ok(())
    }

    /// Inserts the editor's default property: a string typed after `System`.
    pub fn add_property(
        &mut self,
        namespace: &str,
        schema: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        if !is_valid_name(name) {
            warn!(namespace, schema, name, "property add rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: name.to_owned(),
            });
        }

        let definition = self.editable_schema_mut(namespace, schema)?;
        if definition.properties().contains_key(name) {
            warn!(namespace, schema, name, "property add skipped: already exists");
            return Err(StoreError::NameCollision {
                name: name.to_owned(),
            });
        }

        definition
            .properties_mut()
            .insert(name.to_owned(), PropertyDefinition::string_default(name));
        Ok(())
    }

    /// Moves the map entry and retitles the property after its new name.
    pub fn rename_property(
        &mut self,
        namespace: &str,
        schema: &str,
        old: &str,
        new: &str,
    ) -> Result<(), StoreError> {
        if !is_valid_name(new) {
            warn!(namespace, schema, old, new, "property rename rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: new.to_owned(),
            });
        }

        let definition = self.editable_schema_mut(namespace, schema)?;
        if !definition.properties().contains_key(old) {
            warn!(namespace, schema, old, "property rename skipped: not found");
            return Err(StoreError::PropertyNotFound {
                schema: schema.to_owned(),
                property: old.to_owned(),
            });
        }
        if definition.properties().contains_key(new) {
            warn!(namespace, schema, old, new, "property rename skipped: name already in use");
            return Err(StoreError::NameCollision {
                name: new.to_owned(),
            });
        }

        let mut property = definition
            .properties_mut()
            .remove(old)
            .expect("presence checked above");
        property.set_title(new);
        definition.properties_mut().insert(new.to_owned(), property);
        Ok(())
    }

    pub fn update_property(
        &mut self,
        namespace: &str,
        schema: &str,
        name: &str,
        property: PropertyDefinition,
    ) -> Result<(), StoreError> {
        let definition = self.editable_schema_mut(namespace, schema)?;
        let Some(slot) = definition.properties_mut().get_mut(name) else {
            warn!(namespace, schema, name, "property update skipped: not found");
            return Err(StoreError::PropertyNotFound {
                schema: schema.to_owned(),
                property: name.to_owned(),
            });
        };

        *slot = property;
        Ok(())
    }

    pub fn delete_property(
        &mut self,
        namespace: &str,
        schema: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let definition = self.editable_schema_mut(namespace, schema)?;
        if definition.properties_mut().remove(name).is_none() {
            warn!(namespace, schema, name, "property delete skipped: not found");
            return Err(StoreError::PropertyNotFound {
                schema: schema.to_owned(),
                property: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Creates a method with one empty instance overload and returns the
    /// canonical ref of that overload (grids are built from it).
    pub fn create_method(
        &mut self,
        namespace: &str,
        schema: &str,
        name: &str,
    ) -> Result<String, StoreError> {
        if !is_valid_name(name) {
            warn!(namespace, schema, name, "method create rejected: invalid name");
            return Err(StoreError::InvalidName {
                name: name.to_owned(),
            });
        }

        let owner_ref = EntityRef::Schema {
            namespace: namespace.to_owned(),
            schema: schema.to_owned(),
        }
        .to_string();

        let definition = self.editable_schema_mut(namespace, schema)?;
        if definition.methods().contains_key(name) {
            warn!(namespace, schema, name, "method create skipped: already exists");
            return Err(StoreError::NameCollision {
                name: name.to_owned(),
            });
        }

        const FIRST_OVERLOAD: &str = "ov1";
        let mut method = MethodDefinition::new(owner_ref);
        method
            .overloads_mut()
            .insert(FIRST_OVERLOAD.to_owned(), MethodOverload::new(FIRST_OVERLOAD, name));
        definition.methods_mut().insert(name.to_owned(), method);

        Ok(EntityRef::MethodOverload {
            namespace: namespace.to_owned(),
            schema: schema.to_owned(),
            method: name.to_owned(),
            overload_id: FIRST_OVERLOAD.to_owned(),
        }
        .to_string())
    }

    /// Whole-value replace of an overload, addressed by its canonical ref.
    pub fn update_method_overload(
        &mut self,
        reference: &str,
        overload: MethodOverload,
    ) -> Result<(), StoreError> {
        let EntityRef::MethodOverload {
            namespace,
            schema,
            method,
            overload_id,
        } = EntityRef::parse(reference)
        else {
            warn!(reference, "overload update rejected: malformed ref");
            return Err(StoreError::MalformedRef {
                reference: reference.to_owned(),
            });
        };

        let definition = self.editable_schema_mut(&namespace, &schema)?;
        let Some(method_def) = definition.methods_mut().get_mut(&method) else {
            warn!(reference, "overload update skipped: method not found");
            return Err(StoreError::MethodNotFound {
                schema,
                method,
            });
        };
        let Some(slot) = method_def.overloads_mut().get_mut(&overload_id) else {
            warn!(reference, "overload update skipped: overload not found");
            return Err(StoreError::OverloadNotFound {
                method,
                overload_id,
            });
        };

        *slot = overload;
        Ok(())
    }

    fn editable_namespace_mut(&mut self, name: &str) -> Result<&mut Namespace, StoreError> {
        let Some(namespace) = self.namespaces.get_mut(name) else {
            warn!(name, "mutation skipped: namespace not found");
            return Err(StoreError::NamespaceNotFound {
                namespace: name.to_owned(),
            });
        };
        if !namespace.editable() {
            warn!(name, "mutation rejected: namespace not editable");
            return Err(StoreError::NotEditable {
                namespace: name.to_owned(),
            });
        }
        Ok(namespace)
    }

    fn editable_schema_mut(
        &mut self,
        namespace: &str,
        schema: &str,
    ) -> Result<&mut SchemaDefinition, StoreError> {
        let ns = self.editable_namespace_mut(namespace)?;
        let Some(definition) = ns.document_mut().schemas_mut().get_mut(schema) else {
            warn!(namespace, schema, "mutation skipped: schema not found");
            return Err(StoreError::SchemaNotFound {
                namespace: namespace.to_owned(),
                schema: schema.to_owned(),
            });
        };
        Ok(definition)
    }
}
