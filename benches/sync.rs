// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proteus::format::{import_from_str, ImportOptions};
use proteus::grids::canvas::InMemoryCanvas;
use proteus::grids::GridEditor;
use proteus::model::{HandleId, ParameterDef, Project};
use proteus::query::lookup;
use proteus::store::SchemaStore;
use proteus::sync::BoundaryDirection;

const OVERLOAD_REF: &str = "Bench#/components/schemas/Engine/methods/Run/overloads/ov1";

fn bench_store() -> SchemaStore {
    let document = r##"{
        "openapi": "3.0.0",
        "info": { "title": "Bench", "version": "1.0.0" },
        "components": {
            "schemas": {
                "Engine": {
                    "type": "Engine",
                    "x-methods": {
                        "Run": {
                            "owner": { "$ref": "Bench#/components/schemas/Engine" },
                            "overloads": {
                                "ov1": {
                                    "overloadId": "ov1",
                                    "name": "Run",
                                    "methodKind": "instance",
                                    "signature": { "parameters": [], "return": [] }
                                }
                            }
                        }
                    }
                }
            }
        }
    }"##;

    let namespace = import_from_str(
        document,
        ImportOptions {
            editable: true,
            flow_capable: true,
            normalize: false,
        },
    )
    .expect("bench document imports");

    let mut store = SchemaStore::new();
    store.insert_namespace(namespace);

    // Widen the signature so a sync pass has something to chew on.
    let mut overload = lookup::overload_by_ref(&store, OVERLOAD_REF)
        .expect("overload")
        .clone();
    for index in 0..32 {
        overload.signature_mut().parameters_mut().push(ParameterDef::new(
            HandleId::new(format!("p:arg{index}")).expect("handle id"),
            format!("arg{index}"),
            "System#/components/schemas/String",
        ));
    }
    store
        .update_method_overload(OVERLOAD_REF, overload)
        .expect("update overload");

    store
}

fn bench_sync(c: &mut Criterion) {
    let store = bench_store();

    c.bench_function("boundary_handle_refresh", |b| {
        let mut editor = GridEditor::new(Project::new("Bench"), InMemoryCanvas::new());
        editor.create_grid(&store, OVERLOAD_REF).expect("grid");
        b.iter(|| {
            black_box(editor.refresh_boundary_handles(
                &store,
                OVERLOAD_REF,
                BoundaryDirection::Input,
            ))
        })
    });

    c.bench_function("grid_create_and_delete", |b| {
        b.iter(|| {
            let mut editor = GridEditor::new(Project::new("Bench"), InMemoryCanvas::new());
            let grid_id = editor.create_grid(&store, OVERLOAD_REF).expect("grid");
            black_box(editor.delete_grid(&grid_id));
        })
    });
}

criterion_group!(benches, bench_sync);
criterion_main!(benches);
