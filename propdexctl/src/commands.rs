use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use propdex_config::{ConfigLoader, IndexConfig, validate};
use propdex_core::model::Catalog;
use propdex_core::{FilenameParser, PropellerIndexer, PropellerLoader, Table, canonical_id};

fn load_config(path: Option<&Path>) -> Result<IndexConfig> {
    let (config, source) = match path {
        Some(path) => ConfigLoader::from_env().load_file(path)?,
        None => IndexConfig::load_from_env()?,
    };
    validate(&config).with_context(|| format!("configuration from {source}"))?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn index(config: &IndexConfig, root: Option<PathBuf>) -> Result<(PathBuf, Catalog)> {
    let root = config.resolve_root(root.as_deref())?;
    let indexer = PropellerIndexer::new(config.scan.clone(), &config.parser)?
        .with_duplicate_policy(config.duplicate_policy);
    let catalog = indexer
        .index(&root)
        .with_context(|| format!("failed to index {}", root.display()))?;
    Ok((root, catalog))
}

pub fn scan(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    pretty: bool,
    include_dropped: bool,
) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let (_, mut catalog) = index(&config, root)?;
    if !include_dropped && !catalog.dropped.is_empty() {
        info!(
            dropped = catalog.dropped.len(),
            "omitting dropped files; pass --include-dropped to list them"
        );
        catalog.dropped.clear();
    }
    print_json(&catalog, pretty)
}

pub fn parse(names: &[String], image: bool, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let parser = FilenameParser::with_settings(&config.parser)
        .with_image_extensions(&config.scan.image_extensions);

    let results: Vec<Value> = names
        .iter()
        .map(|name| {
            let parsed = if image {
                parser
                    .parse_image_name(name)
                    .map(|(traits, view)| (traits, json!({ "view": view })))
            } else {
                parser
                    .parse_data_name(name)
                    .map(|(traits, role)| (traits, json!(role)))
            };
            match parsed {
                Ok((traits, kind)) => json!({
                    "name": name,
                    "id": canonical_id(&traits),
                    "traits": traits,
                    "kind": kind,
                }),
                Err(reason) => json!({
                    "name": name,
                    "dropped": reason,
                    "message": reason.to_string(),
                }),
            }
        })
        .collect();

    print_json(&results, true)
}

fn table_summary(table: &Table) -> Value {
    json!({ "columns": table.columns(), "rows": table.len() })
}

pub fn load(id: &str, root: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let (root, catalog) = index(&config, root)?;
    let loader = PropellerLoader::new(root, &config.scan);
    let loaded = loader.load_by_id(&catalog, id)?;

    let performance: Vec<Value> = loaded
        .performance
        .iter()
        .map(|(rpm, table)| json!({ "rpm": rpm, "table": table_summary(table) }))
        .collect();
    let summary = json!({
        "id": loaded.record.id,
        "traits": loaded.record.traits,
        "performance": performance,
        "static": loaded.static_table.as_ref().map(table_summary),
        "geometry": loaded.geometry.as_ref().map(table_summary),
        "thickness": loaded.thickness.as_ref().map(table_summary),
        "front_image": loaded.front_image.as_ref().map(|img| [img.width(), img.height()]),
        "side_image": loaded.side_image.as_ref().map(|img| [img.width(), img.height()]),
    });
    print_json(&summary, true)
}
