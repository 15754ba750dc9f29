// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project initialization command for creating new fractal projects.

use include_dir::{include_dir, Dir, DirEntry, File};
use std::fs;
use std::path::{Path, PathBuf};

static DEFAULT_TEMPLATE: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates/default");

const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Initializes a new fractal project with a sample dashboard module.
pub async fn run(name: Option<String>) -> anyhow::Result<()> {
    let in_place = matches!(name.as_deref(), None | Some("."));
    let project_dir = match name.as_deref() {
        None | Some(".") => std::env::current_dir()?,
        Some(name) => PathBuf::from(name),
    };
    let project_name = project_name(&project_dir);

    if project_dir.join("fractal.toml").exists() {
        anyhow::bail!("{} already contains a fractal.toml", project_dir.display());
    }

    fs::create_dir_all(&project_dir)?;
    tracing::info!("Scaffolding '{}' in {}", project_name, project_dir.display());

    let mut files = Vec::new();
    template_files(&DEFAULT_TEMPLATE, &mut files);
    for file in files {
        write_file(file, &project_dir, &project_name)?;
    }

    print_success(&project_name, in_place);
    Ok(())
}

/// The project name is the last directory component.
fn project_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "my-fractal-app".to_string())
}

/// Collects every file of an embedded directory, depth first.
fn template_files<'a>(dir: &'a Dir<'a>, out: &mut Vec<&'a File<'a>>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(child) => template_files(child, out),
            DirEntry::File(file) => out.push(file),
        }
    }
}

/// Where a template file lands: `.tmpl` files lose their suffix.
fn output_path(template_path: &Path) -> (PathBuf, bool) {
    let rendered = template_path
        .to_str()
        .and_then(|p| p.strip_suffix(TEMPLATE_SUFFIX));

    match rendered {
        Some(stripped) => (PathBuf::from(stripped), true),
        None => (template_path.to_path_buf(), false),
    }
}

fn write_file(file: &File, target: &Path, project_name: &str) -> anyhow::Result<()> {
    let (relative, is_template) = output_path(file.path());
    let destination = target.join(relative);

    let contents = file
        .contents_utf8()
        .ok_or_else(|| anyhow::anyhow!("Template file is not UTF-8: {}", file.path().display()))?;
    let contents = if is_template {
        contents.replace("{{project_name}}", project_name)
    } else {
        contents.to_string()
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&destination, contents)?;
    tracing::debug!("Wrote {}", destination.display());
    Ok(())
}

fn print_success(project_name: &str, in_place: bool) {
    println!("Created fractal project: {}", project_name);
    println!();
    println!("Next steps:");
    if !in_place {
        println!("  cd {}", project_name);
    }
    println!("  fractal modules");
    println!("  fractal routes dashboard");
    println!("  fractal crumbs /dashboard/invoices/42");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_strips_template_suffix() {
        assert_eq!(
            output_path(Path::new("fractal.toml.tmpl")),
            (PathBuf::from("fractal.toml"), true)
        );
        assert_eq!(
            output_path(Path::new("src/pages/dashboard/app.routes.toml")),
            (PathBuf::from("src/pages/dashboard/app.routes.toml"), false)
        );
    }

    #[test]
    fn test_template_contains_sample_module() {
        let mut files = Vec::new();
        template_files(&DEFAULT_TEMPLATE, &mut files);
        let paths: Vec<&Path> = files.iter().map(|f| f.path()).collect();

        assert!(paths.contains(&Path::new("fractal.toml.tmpl")));
        assert!(paths.contains(&Path::new("src/pages/dashboard/app.routes.toml")));
        assert!(paths.contains(&Path::new("src/pages/dashboard/invoices/app.routes.toml")));
    }

    #[test]
    fn test_project_name_from_directory() {
        assert_eq!(project_name(Path::new("/work/shop")), "shop");
        assert_eq!(project_name(Path::new("/")), "my-fractal-app");
    }
}
