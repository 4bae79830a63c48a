use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ───── Category ──────────────────────────────────────────────────────

/// The closed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotifCategory {
    #[serde(rename = "çini")]
    Cini,
    #[serde(rename = "halı-kilim")]
    HaliKilim,
    #[serde(rename = "motif")]
    Motif,
}

impl MotifCategory {
    pub const ALL: [MotifCategory; 3] = [
        MotifCategory::Cini,
        MotifCategory::HaliKilim,
        MotifCategory::Motif,
    ];

    /// Wire value, as stored in records.
    pub fn as_str(&self) -> &'static str {
        match self {
            MotifCategory::Cini => "çini",
            MotifCategory::HaliKilim => "halı-kilim",
            MotifCategory::Motif => "motif",
        }
    }

    /// Display label shown on badges and filter buttons.
    pub fn label(&self) -> &'static str {
        match self {
            MotifCategory::Cini => "Çini",
            MotifCategory::HaliKilim => "Halı & Kilim",
            MotifCategory::Motif => "Motif",
        }
    }
}

impl fmt::Display for MotifCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MotifCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MotifCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown motif category: {s}"))
    }
}

/// Public catalog filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MotifCategory),
}

impl CategoryFilter {
    pub fn matches(&self, motif: &Motif) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => motif.category == *category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Tümü",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

// ───── Records ───────────────────────────────────────────────────────

/// A catalog entry as persisted under `motif:<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motif {
    pub id: String,
    pub title: String,
    pub category: MotifCategory,
    pub description: String,
    pub history: String,
    pub image_url: String,
    /// Set only when the image went through the upload endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Records written without a timestamp read back as the Unix epoch.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

// ───── Input & Validation ───────────────────────────────────────────

/// What the authoring form submits; id and creation time are assigned on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MotifDraft {
    #[validate(custom(function = "validate_not_blank", message = "Title is required"))]
    pub title: String,

    pub category: MotifCategory,

    #[validate(custom(function = "validate_not_blank", message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "validate_not_blank", message = "History is required"))]
    pub history: String,

    #[validate(custom(function = "validate_not_blank", message = "Image URL is required"))]
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl MotifDraft {
    pub fn into_motif(self, id: String, created_at: DateTime<Utc>) -> Motif {
        Motif {
            id,
            title: self.title,
            category: self.category,
            description: self.description,
            history: self.history,
            image_url: self.image_url,
            file_name: self.file_name.filter(|name| !name.is_empty()),
            created_at,
        }
    }
}

impl From<&Motif> for MotifDraft {
    fn from(motif: &Motif) -> Self {
        MotifDraft {
            title: motif.title.clone(),
            category: motif.category,
            description: motif.description.clone(),
            history: motif.history.clone(),
            image_url: motif.image_url.clone(),
            file_name: motif.file_name.clone(),
        }
    }
}
