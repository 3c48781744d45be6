//! Static festival catalog loading.
//!
//! # Invariants
//! - The catalog is read-only; the store never reads or writes it.
//! - Catalog order is preserved as loaded.

use crate::model::festival::Festival;
use log::{error, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CatalogError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid festival catalog: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// `{ "festivals": [...] }` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FestivalCatalog {
    festivals: Vec<Festival>,
}

impl FestivalCatalog {
    pub fn new(festivals: Vec<Festival>) -> Self {
        Self { festivals }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| Self::from_json_str(&json));

        match &loaded {
            Ok(catalog) => info!(
                "event=catalog_load module=catalog status=ok festivals={}",
                catalog.festivals.len()
            ),
            Err(err) => error!("event=catalog_load module=catalog status=error error={err}"),
        }
        loaded
    }

    pub fn festivals(&self) -> &[Festival] {
        &self.festivals
    }

    pub fn find(&self, id: &str) -> Option<&Festival> {
        self.festivals.iter().find(|festival| festival.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, FestivalCatalog};
    use chrono::NaiveDate;

    const CATALOG: &str = r#"{
        "festivals": [
            {
                "id": "pongal-2025",
                "name": "Pongal",
                "date": "2025-01-14",
                "region_tags": ["Tamil Nadu"],
                "description": "Harvest festival",
                "foods": [{ "name": "Sakkarai Pongal", "short_note": "Sweet rice with jaggery" }]
            },
            { "id": "holi-2025", "name": "Holi", "date": "2025-03-14" }
        ]
    }"#;

    #[test]
    fn parses_catalog_and_finds_by_id() {
        let catalog = FestivalCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.festivals().len(), 2);

        let pongal = catalog.find("pongal-2025").unwrap();
        assert_eq!(pongal.date, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
        assert_eq!(pongal.foods[0].short_note, "Sweet rice with jaggery");

        let holi = catalog.find("holi-2025").unwrap();
        assert!(holi.region_tags.is_empty());
        assert!(catalog.find("diwali-2025").is_none());
    }

    #[test]
    fn invalid_date_is_a_parse_error() {
        let err = FestivalCatalog::from_json_str(
            r#"{"festivals":[{"id":"x","name":"X","date":"14/01/2025"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FestivalCatalog::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
