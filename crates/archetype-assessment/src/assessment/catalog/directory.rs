use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::super::domain::{CategoryDefinition, CategoryId};
use super::{CatalogError, StaticCatalogBuilder};

pub(super) fn register(
    mut builder: StaticCatalogBuilder,
    dir: PathBuf,
) -> Result<StaticCatalogBuilder, CatalogError> {
    let read_dir = fs::read_dir(&dir).map_err(|source| CatalogError::Io {
        path: dir.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| CatalogError::Io {
            path: dir.clone(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();

    for path in files {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let id = CategoryId::new(stem);
        let name = display_name(stem);
        let loader_id = id.clone();
        builder = builder.register(id, name, move || read_definition(&path, &loader_id));
    }

    info!(path = %dir.display(), "registered category definitions from directory");
    Ok(builder)
}

fn read_definition(path: &Path, id: &CategoryId) -> Result<CategoryDefinition, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        category: id.clone(),
        source,
    })
}

/// `middle_management` -> `Middle Management`.
fn display_name(stem: &str) -> String {
    stem.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
