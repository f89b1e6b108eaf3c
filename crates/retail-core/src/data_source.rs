//! Locates the sales data a companion model server loads, from the on-disk
//! deployment layout.
//!
//! Priority: numbered SQL dump parts in the data folder, then a CSV fallback.
//! The data folder itself is `01.data` if present, else `data`.

use std::path::{Path, PathBuf};

use serde::Serialize;

const DATA_DIR_CANDIDATES: [&str; 2] = ["01.data", "data"];
const SQL_PART_COUNT: u32 = 10;
const SQL_PART_PREFIX: &str = "Apple_Retail_Sales_Dataset_Modified";
const MODEL_SERVER_DIR: &str = "model-server";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Sql,
    Csv,
    None,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Sql => write!(f, "sql"),
            DataSource::Csv => write!(f, "csv"),
            DataSource::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceInfo {
    pub source: DataSource,
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub sql_file_count: usize,
    pub csv_path: Option<PathBuf>,
}

/// Picks the model-server root: an explicit override, else `<cwd>/model-server`
/// when it exists, else `cwd` itself.
#[must_use]
pub fn resolve_root(override_dir: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    let sibling = cwd.join(MODEL_SERVER_DIR);
    if sibling.is_dir() {
        sibling
    } else {
        cwd.to_path_buf()
    }
}

/// First existing candidate data folder under `root`, else `<root>/data`.
#[must_use]
pub fn data_dir(root: &Path) -> PathBuf {
    DATA_DIR_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| root.join("data"))
}

#[must_use]
pub fn sql_part_paths(data_dir: &Path) -> Vec<PathBuf> {
    (1..=SQL_PART_COUNT)
        .map(|i| data_dir.join(format!("{SQL_PART_PREFIX}_{i:02}.sql")))
        .collect()
}

#[must_use]
pub fn csv_candidates(root: &Path, data_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![
        data_dir.join(format!("{SQL_PART_PREFIX}.csv")),
        data_dir.join("data_02_inventory_final.csv"),
    ];
    if let Some(parent) = root.parent() {
        candidates.push(
            parent
                .join("web-development")
                .join("data_02_inventory_final.csv"),
        );
    }
    candidates
}

/// Inspects `root` and reports which source a loader would read.
#[must_use]
pub fn resolve_data_source(root: &Path) -> DataSourceInfo {
    let data_dir = data_dir(root);
    let sql_file_count = sql_part_paths(&data_dir)
        .iter()
        .filter(|p| p.is_file())
        .count();
    let csv_path = csv_candidates(root, &data_dir)
        .into_iter()
        .find(|p| p.is_file());

    let source = if sql_file_count > 0 {
        DataSource::Sql
    } else if csv_path.is_some() {
        DataSource::Csv
    } else {
        DataSource::None
    };

    tracing::debug!(
        root = %root.display(),
        data_dir = %data_dir.display(),
        ?source,
        sql_file_count,
        "resolved sales data source"
    );

    DataSourceInfo {
        source,
        root: root.to_path_buf(),
        data_dir,
        sql_file_count,
        csv_path,
    }
}
