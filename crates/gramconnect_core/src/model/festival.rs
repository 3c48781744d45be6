//! Festival catalog records.
//!
//! Festivals are reference data loaded from a static catalog and are never
//! written by the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Traditional dish listed on a festival page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalFood {
    pub name: String,
    pub short_note: String,
}

/// One festival entry from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Festival {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    /// Regions where the festival is celebrated, in catalog order.
    #[serde(default)]
    pub region_tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub foods: Vec<FestivalFood>,
}
