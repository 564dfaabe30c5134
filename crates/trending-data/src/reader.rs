//! Loading of the trending videos CSV and the category mapping JSON.
//!
//! Both loaders are all-or-nothing: any unreadable file, missing column,
//! malformed record or bad category id fails the whole load with a
//! [`DataLoadError`]. Cell-level repairs happen later in the cleaner.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};
use trending_core::error::DataLoadError;
use trending_core::models::{CategoryMap, RawVideoRecord, REQUIRED_COLUMNS};

// ── Category file schema ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CategoryFile {
    items: Vec<CategoryItem>,
}

#[derive(Debug, Deserialize)]
struct CategoryItem {
    id: CategoryId,
    snippet: CategorySnippet,
}

/// The export stores ids as strings; hand-written files often use numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct CategorySnippet {
    title: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read every row of the trending videos CSV at `path`.
///
/// The header must contain all of [`REQUIRED_COLUMNS`]; extra columns are
/// ignored and the optional descriptive columns default to empty.
pub fn load_videos(path: &Path) -> Result<Vec<RawVideoRecord>, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(std::io::BufReader::new(file));

    let csv_err = |source: csv::Error| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DataLoadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        });
    }

    let records = reader
        .deserialize::<RawVideoRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Read the category mapping at `path`.
///
/// Expects the `videoCategories` export shape
/// `{"items": [{"id": "1", "snippet": {"title": "Film & Animation"}}]}`.
/// A single id that is not a non-negative integer fails the whole load.
pub fn load_categories(path: &Path) -> Result<CategoryMap, DataLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: CategoryFile =
        serde_json::from_str(&content).map_err(|source| DataLoadError::CategoryJson {
            path: path.to_path_buf(),
            source,
        })?;

    let mut map = CategoryMap::new();
    for item in parsed.items {
        let id = parse_category_id(&item.id).ok_or_else(|| DataLoadError::InvalidCategoryId {
            path: path.to_path_buf(),
            id: match &item.id {
                CategoryId::Number(n) => n.to_string(),
                CategoryId::Text(s) => s.clone(),
            },
        })?;
        map.insert(id, item.snippet.title);
    }

    debug!("Read {} categories from {}", map.len(), path.display());
    Ok(map)
}

/// Load the videos CSV and the category mapping together.
pub fn load_dataset(
    videos_path: &Path,
    categories_path: &Path,
) -> Result<(Vec<RawVideoRecord>, CategoryMap), DataLoadError> {
    let videos = load_videos(videos_path)?;
    let categories = load_categories(categories_path)?;
    info!(
        "Loaded {} video rows and {} categories",
        videos.len(),
        categories.len()
    );
    Ok((videos, categories))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_category_id(id: &CategoryId) -> Option<u32> {
    match id {
        CategoryId::Number(n) => u32::try_from(*n).ok(),
        CategoryId::Text(s) => s.trim().parse::<u32>().ok(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
