// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Lists the module buckets of a project.

use std::path::Path;

use console::style;

use crate::project::Project;

/// Prints every bucket with the route files registered under it.
pub async fn run(config_path: &Path) -> anyhow::Result<()> {
    let project = Project::open(config_path)?;
    let index = project.collector().index();

    if index.is_empty() {
        println!(
            "No route files found under {}",
            project.root.join(&project.config.routing.pages_dir).display()
        );
        return Ok(());
    }

    for key in index.keys() {
        let files = index.files(key);
        println!(
            "{} {}",
            style(key).cyan().bold(),
            style(format!("({} file(s))", files.len())).dim()
        );
        for file in files {
            println!("  {}", file.id);
        }
    }

    Ok(())
}
