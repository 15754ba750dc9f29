// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the full pipeline: discovery, index, collector,
//! resolver and navigation.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use fractal::{
    Collector, EntryModule, LoaderContext, ManifestDiscovery, MemoryDiscovery, Metadata,
    ModuleIndex, PayloadResponse, Registry, RouteDefinition, RouteTree, RoutingConfig,
    RoutingError,
};

#[derive(Debug, Clone, PartialEq)]
enum Page {
    Home,
    Stats,
    Customers,
    Customer(String),
}

fn dashboard_discovery(entries: Arc<AtomicUsize>) -> MemoryDiscovery<Page> {
    let home_entries = Arc::clone(&entries);
    let home = RouteDefinition::new(
        "/",
        move || {
            home_entries.fetch_add(1, Ordering::SeqCst);
            async { Ok(EntryModule::new(Page::Home)) }
        },
        |_| "Home".to_string(),
    );

    let stats = RouteDefinition::new(
        "stats",
        move || {
            entries.fetch_add(1, Ordering::SeqCst);
            async { Ok(EntryModule::new(Page::Stats)) }
        },
        |_| "Stats".to_string(),
    );

    MemoryDiscovery::new()
        .with_module("src/pages/dashboard/app.routes.rs", vec![home])
        .with_module("src/pages/dashboard/stats/app.routes.rs", vec![stats])
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let entries = Arc::new(AtomicUsize::new(0));
    let discovery = dashboard_discovery(Arc::clone(&entries));
    let index = ModuleIndex::scan(&discovery, &RoutingConfig::default()).unwrap();
    let collector = Collector::new(Arc::new(index));

    let definitions = collector.collapse("dashboard");
    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].path, "/");
    assert_eq!(definitions[1].path, "stats");

    let nodes = collector.build("dashboard");
    let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(paths, vec!["", "stats"]);
    assert!(nodes.iter().all(|n| n.loader.is_none() && n.children.is_none()));

    // Entries are only called once a lazy is invoked
    assert_eq!(entries.load(Ordering::SeqCst), 0);
    assert_eq!((nodes[0].lazy)().await.unwrap().component, Page::Home);
    assert_eq!((nodes[1].lazy)().await.unwrap().component, Page::Stats);
    assert_eq!(entries.load(Ordering::SeqCst), 2);

    assert!(collector.collapse("settings").is_empty());
}

#[tokio::test]
async fn test_navigation_with_payloads() {
    let customers = RouteDefinition::new(
        "customers",
        || async { Ok(EntryModule::new(Page::Customers)) },
        |_| "Customers".to_string(),
    )
    .with_children(vec![RouteDefinition::new(
        ":id",
        || async { Ok(EntryModule::new(Page::Customer("detail".to_string()))) },
        |meta: &Metadata| {
            meta.get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("Customer")
                .to_string()
        },
    )
    .with_payload(|ctx: LoaderContext| async move {
        let id = ctx.param("id").unwrap_or_default().to_string();
        if id == "0" {
            return Err(RoutingError::LoadError("no such customer".to_string()));
        }
        let mut metadata = Metadata::new();
        metadata.insert("name".to_string(), json!(format!("Customer #{}", id)));
        Ok(PayloadResponse::with_metadata(metadata))
    })]);

    let discovery = MemoryDiscovery::new()
        .with_module("src/pages/crm/app.routes.rs", vec![customers]);
    let index = ModuleIndex::scan(&discovery, &RoutingConfig::default()).unwrap();
    let collector = Collector::new(Arc::new(index));
    let tree = RouteTree::new().with_mount("/crm", collector.build("crm"));

    let nav = tree.navigate("/crm/customers/12").await.unwrap();
    let trail: Vec<(String, String)> = nav
        .breadcrumbs()
        .into_iter()
        .map(|c| (c.label, c.pathname))
        .collect();
    assert_eq!(
        trail,
        vec![
            ("Customers".to_string(), "/crm/customers".to_string()),
            ("Customer #12".to_string(), "/crm/customers/12".to_string()),
        ]
    );

    let err = tree.navigate("/crm/customers/0").await.unwrap_err();
    assert!(matches!(err, RoutingError::LoadError(msg) if msg == "no such customer"));
}

fn write_manifest(root: &Path, relative: &str, source: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, source).unwrap();
}

#[tokio::test]
async fn test_manifests_on_disk() {
    let dir = tempdir().unwrap();
    let pages = dir.path().join("src/pages");

    write_manifest(
        &pages,
        "dashboard/app.routes.toml",
        "[[routes]]\npath = \"/\"\nentry = \"Home\"\ncrumb = \"Home\"\n",
    );
    write_manifest(
        &pages,
        "dashboard/reports/app.routes.toml",
        r#"[[routes]]
path = "reports"
entry = "Reports"
crumb = "Reports for {owner}"
payload = "reports.owner"
"#,
    );

    let registry = Registry::new()
        .component_value("Home", "home".to_string())
        .component_value("Reports", "reports".to_string())
        .loader("reports.owner", |_ctx: LoaderContext| async {
            let mut metadata = Metadata::new();
            metadata.insert("owner".to_string(), json!("finance"));
            Ok(PayloadResponse::with_metadata(metadata))
        });

    let config = RoutingConfig {
        order: fractal::BucketOrder::Path,
        ..RoutingConfig::default()
    };
    let discovery = ManifestDiscovery::new(&pages, registry).with_pattern(config.pattern.clone());
    let index = ModuleIndex::scan(&discovery, &config).unwrap();
    let collector = Collector::new(Arc::new(index));

    let paths: Vec<&str> = collector.collapse("dashboard").iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["/", "reports"]);

    let tree = RouteTree::new().with_mount("/dashboard", collector.build("dashboard"));
    let nav = tree.navigate("/dashboard/reports").await.unwrap();

    assert_eq!(nav.leaf().unwrap().component, "reports");
    assert_eq!(nav.breadcrumbs()[0].label, "Reports for finance");

    let nav = tree.navigate("/dashboard/").await.unwrap();
    assert_eq!(nav.leaf().unwrap().component, "home");
}

#[test]
fn test_recursive_children() {
    let leaf = |path: &str| {
        RouteDefinition::new(path, || async { Ok(EntryModule::new(Page::Home)) }, |_| String::new())
    };
    let parent = leaf("settings").with_children(vec![leaf("profile"), leaf("billing")]);

    let node = fractal::resolve(&parent);
    let children = node.children.as_ref().unwrap();

    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.children.is_none()));
}
