use crate::constants::*;
use crate::layout::PageGeometry;
use crate::text::{Font, FontSpec, TextAlign};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything that shapes a generated document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DocumentOptions {
    // Duplex printing
    pub duplex_mode: DuplexMode,

    // Record selection
    pub limit: Option<usize>,
    pub excluded_organizations: Vec<String>,

    // Table tents show headshots when available
    pub include_images: bool,

    /// Written to the PDF Info dictionary; defaults to the document kind name
    pub title: Option<String>,

    // Geometry per document family
    pub flashcard_geometry: PageGeometry,
    pub facebook_geometry: PageGeometry,
    pub tent_geometry: PageGeometry,

    // Custom template, required for DocumentKind::Template
    pub template: Option<TemplateOptions>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            duplex_mode: DuplexMode::LongEdge,
            limit: None,
            excluded_organizations: Vec::new(),
            include_images: true,
            title: None,
            flashcard_geometry: PageGeometry::flashcards(),
            facebook_geometry: PageGeometry::facebook(),
            tent_geometry: PageGeometry::table_tents(),
            template: None,
        }
    }
}

impl DocumentOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page geometry used by a document kind. Templates take their page size
    /// from the background instead.
    pub fn geometry_for(&self, kind: DocumentKind) -> Option<&PageGeometry> {
        match kind {
            DocumentKind::Fronts
            | DocumentKind::Backs
            | DocumentKind::Combined
            | DocumentKind::Guides => Some(&self.flashcard_geometry),
            DocumentKind::Facebook => Some(&self.facebook_geometry),
            DocumentKind::TableTents => Some(&self.tent_geometry),
            DocumentKind::Template => None,
        }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(AttendeeError::Config(
                "Limit must be at least 1 when given".to_string(),
            ));
        }

        self.flashcard_geometry.validate()?;
        self.facebook_geometry.validate()?;
        self.tent_geometry.validate()?;

        if let Some(template) = &self.template {
            template.validate()?;
        }

        Ok(())
    }
}

/// A background plus the fields drawn over it for each record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemplateOptions {
    /// Raster image or PDF; only the first page of a PDF is used
    pub background: PathBuf,
    #[cfg_attr(feature = "serde", serde(default = "TemplateOptions::default_fields"))]
    pub fields: Vec<TemplateField>,
}

impl TemplateOptions {
    /// Template with the default field map
    pub fn new(background: impl Into<PathBuf>) -> Self {
        Self {
            background: background.into(),
            fields: Self::default_fields(),
        }
    }

    /// Full name in bold, centered on the page
    pub fn default_fields() -> Vec<TemplateField> {
        vec![TemplateField::new(
            FieldSource::FullName,
            0.5,
            0.5,
            FontSpec::bold(TEMPLATE_NAME_SIZE),
        )]
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(AttendeeError::Config(
                "Template needs at least one field".to_string(),
            ));
        }
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }
}

/// One piece of record text placed on a template page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemplateField {
    pub source: FieldSource,
    /// Anchor as a fraction of the page width, from the left edge
    pub x_fraction: f32,
    /// Anchor as a fraction of the page height, from the bottom edge
    pub y_fraction: f32,
    pub font: Font,
    pub size: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub align: TextAlign,
    /// Wrap width in points; unwrapped when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_width_pt: Option<f32>,
}

impl TemplateField {
    pub fn new(source: FieldSource, x_fraction: f32, y_fraction: f32, font: FontSpec) -> Self {
        Self {
            source,
            x_fraction,
            y_fraction,
            font: font.font,
            size: font.size,
            align: TextAlign::Center,
            max_width_pt: None,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_max_width(mut self, max_width_pt: f32) -> Self {
        self.max_width_pt = Some(max_width_pt);
        self
    }

    pub fn font_spec(&self) -> FontSpec {
        FontSpec::new(self.font, self.size)
    }

    fn validate(&self) -> Result<()> {
        let in_unit = |value: f32| (0.0..=1.0).contains(&value);
        if !in_unit(self.x_fraction) || !in_unit(self.y_fraction) {
            return Err(AttendeeError::Config(format!(
                "Template field anchor ({}, {}) must lie within the page",
                self.x_fraction, self.y_fraction
            )));
        }
        if self.size <= 0.0 {
            return Err(AttendeeError::Config(
                "Template field size must be positive".to_string(),
            ));
        }
        if self.max_width_pt.is_some_and(|width| width <= 0.0) {
            return Err(AttendeeError::Config(
                "Template field width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
