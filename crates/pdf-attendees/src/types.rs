use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttendeeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unsupported template format: {0}")]
    UnsupportedTemplate(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No records to render")]
    NoRecords,
}

pub type Result<T> = std::result::Result<T, AttendeeError>;

/// One attendee, normalized from whatever upstream source produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub title: String,
    /// Resolved headshot, if any
    pub image_path: Option<PathBuf>,
    /// Passthrough columns not covered by the core fields
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Build a record from the core fields. Whitespace around each field is trimmed.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        organization: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            organization: organization.into().trim().to_string(),
            title: title.into().trim().to_string(),
            image_path: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// First and last name joined by a space, skipping empty parts
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A record needs at least one name part to enter the pipeline.
    pub fn has_name(&self) -> bool {
        !self.first_name.is_empty() || !self.last_name.is_empty()
    }

    pub fn image(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// Value for a template field source
    pub fn field(&self, source: &FieldSource) -> String {
        match source {
            FieldSource::FullName => self.full_name(),
            FieldSource::FirstName => self.first_name.clone(),
            FieldSource::LastName => self.last_name.clone(),
            FieldSource::Organization => self.organization.clone(),
            FieldSource::Title => self.title.clone(),
            FieldSource::Extra(key) => self.extra.get(key).cloned().unwrap_or_default(),
        }
    }
}

/// Where a template field takes its text from
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldSource {
    FullName,
    FirstName,
    LastName,
    Organization,
    Title,
    Extra(String),
}

/// How the printer turns the sheet over between the front and back pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplexMode {
    /// Flip on the short edge; back keeps the top-to-bottom position order
    ShortEdge,
    /// Flip on the long edge with the printer rotating the back side 180°
    #[default]
    LongEdge,
}

impl DuplexMode {
    pub fn name(&self) -> &'static str {
        match self {
            DuplexMode::ShortEdge => "short-edge",
            DuplexMode::LongEdge => "long-edge",
        }
    }
}

impl fmt::Display for DuplexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Documents the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Card fronts: name, organization, title
    Fronts,
    /// Card backs: headshots arranged for duplex printing
    Backs,
    /// Front and back pages interleaved per sheet
    Combined,
    /// Cut and safe-area guides, front and back per sheet
    Guides,
    /// Roster proof, five attendees per page
    Facebook,
    /// Folded table tents, two per page
    TableTents,
    /// Background template with per-record field overlay
    Template,
}

impl DocumentKind {
    /// Kinds that only make sense for records with a headshot.
    ///
    /// The flashcard family shares this so separately printed fronts and
    /// backs stay in step.
    pub fn requires_headshots(self) -> bool {
        matches!(
            self,
            DocumentKind::Fronts
                | DocumentKind::Backs
                | DocumentKind::Combined
                | DocumentKind::Guides
                | DocumentKind::Facebook
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Fronts => "Card fronts",
            DocumentKind::Backs => "Card backs",
            DocumentKind::Combined => "Flashcards",
            DocumentKind::Guides => "Cut guides",
            DocumentKind::Facebook => "Facebook proof",
            DocumentKind::TableTents => "Table tents",
            DocumentKind::Template => "Template",
        }
    }
}

/// Advisory progress while a document is written
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub operation: String,
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// A finished document and what went into it
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub record_count: usize,
    /// Names left out because no headshot was attached
    pub missing_headshots: Vec<String>,
    /// Images that could not be decoded and were skipped
    pub skipped_images: Vec<PathBuf>,
}

/// Summary returned by the async file-writing entry points
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub page_count: usize,
    pub record_count: usize,
    pub missing_headshots: Vec<String>,
    pub skipped_images: Vec<PathBuf>,
}

/// Predicted shape of a document, computed without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStatistics {
    pub records: usize,
    pub items_per_page: usize,
    pub chunks: usize,
    pub output_pages: usize,
    pub items_on_last_page: usize,
}
