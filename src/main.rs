// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Imports OpenAPI-style schema documents and prints the entity catalogue,
//! optionally the suggestion forest for one schema. Mostly a smoke surface
//! for the library; the real consumer is a host editor shell.

use std::error::Error;
use std::fs;

use proteus::format::{import_from_str, ImportOptions};
use proteus::model::Namespace;
use proteus::query::suggest::{
    build_schema_suggestions, filter, SuggestOptions, SuggestionNode,
};
use proteus::store::SchemaStore;

const DEMO_DOCUMENT: &str = r##"{
    "openapi": "3.0.0",
    "info": { "title": "Demo", "version": "1.0.0" },
    "components": {
        "schemas": {
            "Order": {
                "type": "Order",
                "kind": "class",
                "properties": {
                    "Id": {
                        "$ref": "System#/components/schemas/String",
                        "type": "String",
                        "kind": "primitive",
                        "containerType": "None",
                        "title": "Id"
                    }
                },
                "x-methods": {
                    "GetTotal": {
                        "owner": { "$ref": "Demo#/components/schemas/Order" },
                        "overloads": {
                            "ov1": {
                                "overloadId": "ov1",
                                "name": "GetTotal",
                                "methodKind": "instance",
                                "signature": {
                                    "parameters": [],
                                    "return": [
                                        {
                                            "instanceId": "p:total",
                                            "name": "total",
                                            "$ref": "System#/components/schemas/Decimal"
                                        }
                                    ]
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}"##;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <schema.json>... [--editable] [--flow-capable] [--normalize] [--suggest <Schema>] [--allow-static] [--filter <needle>]\n  {program} --demo [--suggest <Schema>]\n\nImports the given documents into a schema store and prints the catalogue.\n--suggest prints the operation forest for the named schema.\n--normalize rewrites inline primitive property types into System refs.\n--demo uses a built-in demo document and takes no files."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    editable: bool,
    flow_capable: bool,
    normalize: bool,
    allow_static: bool,
    suggest: Option<String>,
    filter: Option<String>,
    files: Vec<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--editable" => options.editable = true,
            "--flow-capable" => options.flow_capable = true,
            "--normalize" => options.normalize = true,
            "--allow-static" => options.allow_static = true,
            "--suggest" => {
                if options.suggest.is_some() {
                    return Err(());
                }
                options.suggest = Some(args.next().ok_or(())?);
            }
            "--filter" => {
                if options.filter.is_some() {
                    return Err(());
                }
                options.filter = Some(args.next().ok_or(())?);
            }
            other => {
                if other.starts_with("--") {
                    return Err(());
                }
                options.files.push(other.to_owned());
            }
        }
    }

    if options.demo && !options.files.is_empty() {
        return Err(());
    }
    if !options.demo && options.files.is_empty() {
        return Err(());
    }
    Ok(options)
}

fn print_catalogue(store: &SchemaStore) {
    for namespace in store.namespaces().values() {
        let mut flags = Vec::new();
        if namespace.editable() {
            flags.push("editable");
        }
        if namespace.flow_capable() {
            flags.push("flow-capable");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        println!("{}{flags}", namespace.name());

        for (name, schema) in namespace.document().schemas() {
            println!(
                "  {name} [{}] — {} properties, {} methods",
                schema.kind(),
                schema.properties().len(),
                schema.methods().len()
            );
        }
        for (path, item) in namespace.document().paths() {
            let verbs = item
                .operations()
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {path} [{verbs}]");
        }
    }
}

fn print_suggestions(nodes: &[SuggestionNode], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        match node {
            SuggestionNode::Folder { label, children, .. } => {
                println!("{indent}{label}/");
                print_suggestions(children, depth + 1);
            }
            SuggestionNode::Item { label, metadata, .. } => {
                println!("{indent}{label} -> {}", metadata.return_type);
            }
        }
    }
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let mut store = SchemaStore::new();

    if options.demo {
        let namespace: Namespace = import_from_str(
            DEMO_DOCUMENT,
            ImportOptions {
                editable: true,
                flow_capable: true,
                normalize: false,
            },
        )?;
        store.insert_namespace(namespace);
    } else {
        for path in &options.files {
            let json = fs::read_to_string(path)?;
            let namespace = import_from_str(
                &json,
                ImportOptions {
                    editable: options.editable,
                    flow_capable: options.flow_capable,
                    normalize: options.normalize,
                },
            )?;
            println!("imported '{}' from {path}", namespace.name());
            store.insert_namespace(namespace);
        }
    }

    print_catalogue(&store);

    if let Some(schema_name) = &options.suggest {
        let found = store.namespaces().values().find_map(|ns| {
            ns.document()
                .schemas()
                .get(schema_name)
                .map(|schema| (ns.name().to_owned(), schema.clone()))
        });
        let Some((namespace, schema)) = found else {
            return Err(format!("schema '{schema_name}' not found in any namespace").into());
        };

        println!("\nsuggestions for {namespace}.{schema_name}:");
        let mut forest = build_schema_suggestions(
            &namespace,
            schema_name,
            &schema,
            SuggestOptions {
                allow_static: options.allow_static,
            },
        );
        if let Some(needle) = &options.filter {
            forest = filter(&forest, needle);
        }
        print_suggestions(&forest, 1);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "proteus".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(error) = run(options) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn opts(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn parses_files_and_flags() {
        let options = opts(&["api.json", "--flow-capable", "--suggest", "Order"]).expect("options");
        assert_eq!(options.files, vec!["api.json".to_owned()]);
        assert!(options.flow_capable);
        assert_eq!(options.suggest.as_deref(), Some("Order"));
    }

    #[test]
    fn demo_and_files_are_mutually_exclusive() {
        assert!(opts(&["--demo", "api.json"]).is_err());
        assert!(opts(&["--demo"]).is_ok());
        assert!(opts(&[]).is_err());
        assert!(opts(&["--suggest"]).is_err());
        assert!(opts(&["--unknown"]).is_err());
    }
}
