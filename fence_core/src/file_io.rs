//! # File I/O Module
//!
//! Catalog and calculation files on disk:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Reject catalogs written for another schema
//! - **Consistency checks**: Every default selection must be a catalog member
//!
//! ## File Format
//!
//! Catalogs are plain JSON carrying a `schema_version` field. Calculation
//! items are the tagged JSON form of [`CalculationItem`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use fence_core::catalog::Catalog;
//! use fence_core::file_io::{load_catalog, save_catalog};
//! use std::path::Path;
//!
//! let path = Path::new("catalog.json");
//! save_catalog(&Catalog::standard(), path)?;
//! let catalog = load_catalog(path)?;
//! assert_eq!(catalog.schema_version, "1.0");
//! # Ok::<(), fence_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calculations::CalculationItem;
use crate::catalog::{Catalog, CATALOG_SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};

/// Save a catalog with atomic write semantics.
///
/// The save process:
/// 1. Serialize the catalog to pretty JSON
/// 2. Write to a temporary file next to the target (`<name>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target
pub fn save_catalog(catalog: &Catalog, path: &Path) -> CalcResult<()> {
    write_json_atomic(catalog, path)
}

/// Load a catalog file and check it before use.
///
/// # Returns
///
/// * `Ok(Catalog)` - Loaded and internally consistent
/// * `Err(CalcError::VersionMismatch)` - Written for an incompatible schema
/// * `Err(CalcError::CatalogEntryNotFound)` - A default is missing from its table
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_catalog(path: &Path) -> CalcResult<Catalog> {
    let catalog: Catalog = read_json(path)?;
    validate_version(&catalog.schema_version)?;
    catalog.validate()?;

    tracing::info!(
        path = %path.display(),
        version = %catalog.schema_version,
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load a single calculation item, e.g. `{ "type": "Vinyl", ... }`.
///
/// The item is parsed only; call [`CalculationItem::validate`] against a
/// catalog before calculating.
pub fn load_item(path: &Path) -> CalcResult<CalculationItem> {
    let item: CalculationItem = read_json(path)?;
    tracing::debug!(path = %path.display(), calc_type = item.calc_type(), "item loaded");
    Ok(item)
}

/// Save a calculation item with the same atomic semantics as catalogs
pub fn save_item(item: &CalculationItem, path: &Path) -> CalcResult<()> {
    write_json_atomic(item, path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_file_name(format!(
        "{}.tmp",
        path.file_name().map_or_else(|| "catalog".into(), |n| n.to_string_lossy())
    ));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "file saved");
    Ok(())
}

/// Validate that a catalog version is compatible with the current schema.
///
/// Major versions must match. A newer minor version loads with a warning.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: CATALOG_SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = CATALOG_SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    match (file_parts.first(), current_parts.first()) {
        (Some(file_major), Some(current_major)) if file_major == current_major => {}
        _ => return Err(mismatch()),
    }

    if file_parts.get(1) > current_parts.get(1) {
        tracing::warn!(
            file_version,
            expected = CATALOG_SCHEMA_VERSION,
            "catalog written by a newer minor version"
        );
    }

    Ok(())
}
