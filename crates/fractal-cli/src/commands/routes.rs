// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Prints the resolved route tree of one or all mounted modules.

use std::collections::BTreeMap;
use std::path::Path;

use console::style;
use fractal::NodeShape;

use crate::project::Project;

/// Resolves the routes of `module` (or of every mount) and prints them as
/// an indented tree or as JSON.
pub async fn run(config_path: &Path, module: Option<String>, json: bool) -> anyhow::Result<()> {
    let project = Project::open(config_path)?;

    let mounts: Vec<(String, String)> = match module {
        Some(module) => {
            let prefix = project
                .mounts()
                .into_iter()
                .find(|m| m.module == module)
                .map(|m| m.prefix())
                .unwrap_or_else(|| format!("/{}", module));
            vec![(module, prefix)]
        }
        None => project
            .mounts()
            .into_iter()
            .map(|m| {
                let prefix = m.prefix();
                (m.module, prefix)
            })
            .collect(),
    };

    let mut trees: BTreeMap<String, Vec<NodeShape>> = BTreeMap::new();
    for (module, _) in &mounts {
        let shapes: Vec<NodeShape> = project
            .collector()
            .build(module)
            .iter()
            .map(|node| node.shape())
            .collect();
        trees.insert(module.clone(), shapes);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&trees)?);
        return Ok(());
    }

    for (module, prefix) in &mounts {
        println!("{} {}", style(module).cyan().bold(), style(prefix).dim());
        let shapes = trees.get(module).map(Vec::as_slice).unwrap_or(&[]);
        if shapes.is_empty() {
            println!("  {}", style("(no routes)").dim());
        }
        for shape in shapes {
            print_shape(shape, 1);
        }
    }

    Ok(())
}

fn print_shape(shape: &NodeShape, depth: usize) {
    let indent = "  ".repeat(depth);
    let path = if shape.path.is_empty() {
        "(index)".to_string()
    } else {
        shape.path.clone()
    };
    let loader = if shape.has_loader { " [loader]" } else { "" };

    println!(
        "{}{}  {}{}",
        indent,
        style(path).green(),
        style(format!("\"{}\"", shape.crumb)).dim(),
        style(loader).yellow()
    );

    for child in shape.children.iter().flatten() {
        print_shape(child, depth + 1);
    }
}
