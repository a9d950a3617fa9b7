// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ref resolution against the store. Every lookup is total: a ref that does
//! not resolve yields `None`, never an error.

use crate::model::{
    paths_match, EntityRef, MethodOverload, PathOperation, PropertyDefinition, SchemaDefinition,
};
use crate::store::SchemaStore;

pub fn schema<'a>(
    store: &'a SchemaStore,
    namespace: &str,
    name: &str,
) -> Option<&'a SchemaDefinition> {
    store.namespace(namespace)?.document().schemas().get(name)
}

/// Resolves any schema-rooted ref to its schema definition.
pub fn schema_by_ref<'a>(store: &'a SchemaStore, reference: &str) -> Option<&'a SchemaDefinition> {
    let (namespace, name) = EntityRef::parse(reference)
        .schema_coordinates()
        .map(|(ns, s)| (ns.to_owned(), s.to_owned()))?;
    schema(store, &namespace, &name)
}

pub fn property_by_ref<'a>(
    store: &'a SchemaStore,
    reference: &str,
) -> Option<&'a PropertyDefinition> {
    let EntityRef::SchemaProperty {
        namespace,
        schema: schema_name,
        property,
    } = EntityRef::parse(reference)
    else {
        return None;
    };
    schema(store, &namespace, &schema_name)?
        .properties()
        .get(&property)
}

/// Resolves a `MethodOverload`-shaped ref to the live overload.
pub fn overload_by_ref<'a>(store: &'a SchemaStore, reference: &str) -> Option<&'a MethodOverload> {
    let EntityRef::MethodOverload {
        namespace,
        schema: schema_name,
        method,
        overload_id,
    } = EntityRef::parse(reference)
    else {
        return None;
    };

    schema(store, &namespace, &schema_name)?
        .methods()
        .get(&method)?
        .overloads()
        .get(&overload_id)
}

/// The canonical overload refs of a schema's methods, in map order. Only
/// flow-capable namespaces offer their methods as grid material.
pub fn schema_method_overload_refs(
    store: &SchemaStore,
    namespace: &str,
    schema_name: &str,
) -> Vec<String> {
    let Some(ns) = store.namespace(namespace) else {
        return Vec::new();
    };
    if !ns.flow_capable() {
        return Vec::new();
    }
    let Some(definition) = ns.document().schemas().get(schema_name) else {
        return Vec::new();
    };

    let mut refs = Vec::new();
    for (method_name, method) in definition.methods() {
        for overload_id in method.overloads().keys() {
            refs.push(
                EntityRef::MethodOverload {
                    namespace: namespace.to_owned(),
                    schema: schema_name.to_owned(),
                    method: method_name.clone(),
                    overload_id: overload_id.clone(),
                }
                .to_string(),
            );
        }
    }
    refs
}

/// Resolves a path ref to its operation, matching path templates segment by
/// segment (`{param}` on either side matches anything).
pub fn operation_by_path_ref<'a>(
    store: &'a SchemaStore,
    reference: &str,
) -> Option<&'a PathOperation> {
    let EntityRef::Path {
        namespace,
        path,
        http_method,
    } = EntityRef::parse(reference)
    else {
        return None;
    };
    let verb = http_method?;

    let document = store.namespace(&namespace)?.document();
    let (_, item) = document
        .paths()
        .iter()
        .find(|(declared, _)| paths_match(declared, &path))?;
    item.operation(verb.as_str())
}

#[cfg(test)]
mod tests {
    use super::{operation_by_path_ref, overload_by_ref, property_by_ref, schema_by_ref};
    use crate::model::fixtures;
    use crate::model::{Namespace, PathItem, PathOperation};
    use crate::store::SchemaStore;

    fn demo_store() -> SchemaStore {
        let mut store = SchemaStore::new();
        store.insert_namespace(Namespace::new("Demo", true, true, fixtures::demo_document()));
        store
    }

    #[test]
    fn schema_and_property_refs_resolve() {
        let store = demo_store();

        let schema = schema_by_ref(&store, "Demo#/components/schemas/Order").expect("schema");
        assert_eq!(schema.type_name(), "Order");

        let property = property_by_ref(&store, "Demo#/components/schemas/Order/properties/Id")
            .expect("property");
        assert_eq!(property.type_ref(), Some("System#/components/schemas/String"));

        assert!(property_by_ref(&store, "Demo#/components/schemas/Order/properties/Nope").is_none());
        assert!(schema_by_ref(&store, "garbage").is_none());
    }

    #[test]
    fn overload_refs_resolve_to_the_live_overload() {
        let store = demo_store();

        let overload = overload_by_ref(&store, &fixtures::demo_overload_ref()).expect("overload");
        assert_eq!(overload.name(), "GetTotal");
        assert_eq!(overload.signature().returns().len(), 1);

        // Method-shaped refs do not address an overload.
        assert!(overload_by_ref(&store, "Demo#/components/schemas/Order/methods/GetTotal").is_none());
    }

    #[test]
    fn path_refs_resolve_through_templates() {
        let mut store = demo_store();
        {
            let mut item = PathItem::default();
            let mut operation = PathOperation::default();
            operation.set_summary(Some("fetch one pet"));
            item.operations_mut().insert("get".to_owned(), operation);

            let mut namespace =
                Namespace::new("Petstore", false, false, fixtures::demo_document());
            namespace
                .document_mut()
                .paths_mut()
                .insert("/pets/{petId}".to_owned(), item);
            store.insert_namespace(namespace);
        }

        let operation =
            operation_by_path_ref(&store, "Petstore#/paths/pets/42/get").expect("operation");
        assert_eq!(operation.summary(), Some("fetch one pet"));

        assert!(operation_by_path_ref(&store, "Petstore#/paths/pets/42").is_none());
        assert!(operation_by_path_ref(&store, "Petstore#/paths/pets/42/post").is_none());
    }
}
