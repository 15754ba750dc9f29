// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Navigates the project's route tree and prints the breadcrumb trail.

use std::path::Path;

use console::style;

use crate::project::Project;

/// Matches `url`, runs the matched loaders and prints one crumb per line.
pub async fn run(config_path: &Path, url: &str, json: bool) -> anyhow::Result<()> {
    let project = Project::open(config_path)?;
    let tree = project.tree();
    let navigation = tree.navigate(url).await?;
    let trail = navigation.breadcrumbs();

    if json {
        println!("{}", serde_json::to_string_pretty(&trail)?);
        return Ok(());
    }

    for (i, crumb) in trail.iter().enumerate() {
        let marker = if i + 1 == trail.len() { ">" } else { "-" };
        println!(
            "{} {}  {}",
            style(marker).dim(),
            style(&crumb.label).bold(),
            style(&crumb.pathname).dim()
        );
    }

    if let Some(leaf) = navigation.leaf() {
        println!();
        println!(
            "Matched {} -> {}",
            style(&leaf.pattern).green(),
            style(&leaf.component).cyan()
        );
    }

    Ok(())
}
