//! End-to-end discovery over fixture `node_modules` trees.

use std::fs;
use std::path::Path;

use schematics_core::{CompletionType, validate_collections};
use schematics_discovery::config::DiscoverConfig;
use schematics_discovery::diagnostics::CollectingSink;
use schematics_discovery::{
    DiscoveryError, discover_with_config, read_all_schematic_collections,
    read_all_schematic_collections_with,
};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(base: &Path, rel: &str, content: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    dir
}

const COMPONENT_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/schema",
    "properties": {
        "name": {
            "type": "string",
            "description": "The component name",
            "$default": {"$source": "argv", "index": 0}
        },
        "project": {
            "type": "string",
            "x-completion-type": "project"
        },
        "path": {
            "type": "string",
            "x-completion-type": "directory",
            "x-completion-glob": "src/**"
        },
        "skipTests": {"type": "boolean", "default": false}
    },
    "required": ["name"]
}"#;

/// Installs an Angular-style collection with a typical mix of entries.
fn install_angular(base: &Path) {
    write(
        base,
        "node_modules/@schematics/angular/package.json",
        r#"{"name": "@schematics/angular", "schematics": "./collection.json"}"#,
    );
    write(
        base,
        "node_modules/@schematics/angular/collection.json",
        r#"{"schematics": {
            "ng-add": {"schema": "./ng-add/schema.json"},
            "component": {"schema": "./component/schema.json", "description": "Create a component"},
            "workspace": {"schema": "./component/schema.json", "hidden": true},
            "service": {"schema": "./service/schema.json", "description": "Create a service"},
            "app-shell": {"extends": "@schematics/other:app-shell"}
        }}"#,
    );
    write(
        base,
        "node_modules/@schematics/angular/ng-add/schema.json",
        r#"{"properties": {}}"#,
    );
    write(
        base,
        "node_modules/@schematics/angular/component/schema.json",
        COMPONENT_SCHEMA,
    );
    write(
        base,
        "node_modules/@schematics/angular/service/schema.json",
        r#"{"properties": {"name": {"type": "string"}, "flat": {"type": "boolean", "default": true}}}"#,
    );
}

// ---------------------------------------------------------------------------
// Empty and negative cases
// ---------------------------------------------------------------------------

#[test]
fn test_no_node_modules_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let collections = read_all_schematic_collections(dir.path()).unwrap();
    assert!(collections.is_empty());
}

#[test]
fn test_empty_node_modules_returns_empty() {
    let dir = project();
    assert!(read_all_schematic_collections(dir.path()).unwrap().is_empty());
}

#[test]
fn test_packages_without_schematics_are_absent() {
    let dir = project();
    install_angular(dir.path());
    write(dir.path(), "node_modules/lodash/package.json", r#"{"name": "lodash"}"#);
    write(dir.path(), "node_modules/rxjs/package.json", r#"{"schematics": null}"#);
    fs::create_dir_all(dir.path().join("node_modules/no-manifest")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules/.bin")).unwrap();

    let collections = read_all_schematic_collections(dir.path()).unwrap();
    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["@schematics/angular"]);
}

#[test]
fn test_nested_dependencies_are_not_discovered() {
    let dir = project();
    install_angular(dir.path());
    write(
        dir.path(),
        "node_modules/host/node_modules/nested/package.json",
        r#"{"schematics": "./collection.json"}"#,
    );
    write(dir.path(), "node_modules/host/package.json", r#"{"name": "host"}"#);

    let collections = read_all_schematic_collections(dir.path()).unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "@schematics/angular");
}

// ---------------------------------------------------------------------------
// Fatal vs. filtered boundary
// ---------------------------------------------------------------------------

#[test]
fn test_schematics_pointing_at_missing_file_is_fatal() {
    let dir = project();
    write(
        dir.path(),
        "node_modules/broken/package.json",
        r#"{"schematics": "./does-not-exist.json"}"#,
    );

    let err = read_all_schematic_collections(dir.path()).unwrap_err();
    match err {
        DiscoveryError::CollectionFile { package, .. } => assert_eq!(package, "broken"),
        other => panic!("expected CollectionFile error, got {other:?}"),
    }
}

#[test]
fn test_missing_package_manifest_is_filtered_not_fatal() {
    let dir = project();
    install_angular(dir.path());
    fs::create_dir_all(dir.path().join("node_modules/@scope/empty")).unwrap();

    let collections = read_all_schematic_collections(dir.path()).unwrap();
    assert_eq!(collections.len(), 1);
}

#[test]
fn test_corrupt_package_manifest_is_fatal() {
    let dir = project();
    install_angular(dir.path());
    write(dir.path(), "node_modules/corrupt/package.json", "{\"name\": ");

    let err = read_all_schematic_collections(dir.path()).unwrap_err();
    assert!(matches!(err, DiscoveryError::Manifest { ref package, .. } if package == "corrupt"));
    assert!(err.to_string().contains("corrupt"));
}

// ---------------------------------------------------------------------------
// Inclusion policy and failure isolation
// ---------------------------------------------------------------------------

#[test]
fn test_collection_with_only_excluded_entries_is_dropped() {
    let dir = project();
    write(dir.path(), "node_modules/setup-only/package.json", r#"{"schematics": "c.json"}"#);
    write(
        dir.path(),
        "node_modules/setup-only/c.json",
        r#"{"schematics": {
            "secret": {"schema": "s.json", "hidden": true},
            "internal": {"schema": "s.json", "private": true},
            "ng-add": {"schema": "s.json"}
        }}"#,
    );
    write(dir.path(), "node_modules/setup-only/s.json", "{}");

    let outcome = discover_with_config(dir.path(), &DiscoverConfig::default()).unwrap();
    assert!(outcome.collections.is_empty());
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_malformed_schema_is_skipped_with_warning() {
    let dir = project();
    install_angular(dir.path());
    write(
        dir.path(),
        "node_modules/@schematics/angular/service/schema.json",
        "{ \"properties\": ",
    );

    let sink = CollectingSink::new();
    let collections =
        read_all_schematic_collections_with(dir.path(), &DiscoverConfig::default(), &sink)
            .unwrap();

    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].schematic_names(), vec!["component"]);

    let warnings = sink.into_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].collection, "@schematics/angular");
    assert_eq!(warnings[0].schematic, "service");
}

#[test]
fn test_failure_in_one_collection_does_not_affect_another() {
    let dir = project();
    install_angular(dir.path());
    write(dir.path(), "node_modules/flaky/package.json", r#"{"schematics": "c.json"}"#);
    write(
        dir.path(),
        "node_modules/flaky/c.json",
        r#"{"schematics": {"only": {"schema": "missing.json"}}}"#,
    );

    let outcome = discover_with_config(dir.path(), &DiscoverConfig::default()).unwrap();
    let names: Vec<&str> = outcome.collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["@schematics/angular"]);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].collection, "flaky");
    assert_eq!(outcome.warnings[0].schematic, "only");
}

// ---------------------------------------------------------------------------
// Output shape
// ---------------------------------------------------------------------------

#[test]
fn test_declaration_order_is_preserved() {
    let dir = project();
    write(dir.path(), "node_modules/ordered/package.json", r#"{"schematics": "c.json"}"#);
    write(
        dir.path(),
        "node_modules/ordered/c.json",
        r#"{"schematics": {
            "zebra": {"schema": "s.json"},
            "apple": {"schema": "s.json"},
            "mango": {"schema": "s.json"}
        }}"#,
    );
    write(dir.path(), "node_modules/ordered/s.json", "{}");

    let collections = read_all_schematic_collections(dir.path()).unwrap();
    assert_eq!(
        collections[0].schematic_names(),
        vec!["zebra", "apple", "mango"]
    );
}

#[test]
fn test_duplicate_manifest_keys_resolve_last_wins() {
    let dir = project();
    write(dir.path(), "node_modules/dupes/package.json", r#"{"schematics": "c.json"}"#);
    write(
        dir.path(),
        "node_modules/dupes/c.json",
        r#"{"schematics": {
            "gen": {"schema": "s.json", "description": "first"},
            "other": {"schema": "s.json"},
            "gen": {"schema": "s.json", "description": "second"}
        }}"#,
    );
    write(dir.path(), "node_modules/dupes/s.json", "{}");

    let collections = read_all_schematic_collections(dir.path()).unwrap();
    assert_eq!(collections[0].schematic_names(), vec!["gen", "other"]);
    assert_eq!(collections[0].schematics[0].description, "second");
    assert!(validate_collections(&collections).is_empty());
}

#[test]
fn test_parameters_are_normalized() {
    let dir = project();
    install_angular(dir.path());

    let collections = read_all_schematic_collections(dir.path()).unwrap();
    let angular = &collections[0];
    assert_eq!(angular.schematic_names(), vec!["component", "service"]);

    let component = angular.find("component").unwrap();
    assert_eq!(component.collection, "@schematics/angular");
    assert_eq!(component.description, "Create a component");

    let names: Vec<&str> = component.schema.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["name", "project", "path", "skipTests"]);

    let name = component.parameter("name").unwrap();
    assert!(name.required);
    assert!(name.positional);
    assert_eq!(name.description, "The component name");

    assert_eq!(
        component.parameter("project").unwrap().completion,
        Some(CompletionType::Project)
    );
    assert_eq!(component.parameter("skipTests").unwrap().completion, None);
    assert_eq!(
        component.parameter("skipTests").unwrap().default_value.as_deref(),
        Some("false")
    );
    assert_eq!(
        component.parameter("path").unwrap().completion,
        Some(CompletionType::Directory)
    );
    assert_eq!(component.completion_glob("path"), Some("src/**"));

    let service = angular.find("service").unwrap();
    assert_eq!(
        service.parameter("flat").unwrap().default_value.as_deref(),
        Some("true")
    );
}

#[test]
fn test_reserved_names_follow_config() {
    let dir = project();
    install_angular(dir.path());

    let config = DiscoverConfig {
        reserved_names: vec!["service".to_string()],
        ..Default::default()
    };
    let outcome = discover_with_config(dir.path(), &config).unwrap();
    assert_eq!(
        outcome.collections[0].schematic_names(),
        vec!["ng-add", "component"]
    );
}
