//! Images and template backgrounds referenced by the pages

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba};
use log::{debug, warn};
use lopdf::{Document, ObjectId};

use crate::constants::{TEMPLATE_IMAGE_DPI, TEMPLATE_IMAGE_EXTENSIONS, POINTS_PER_INCH};
use crate::layout::Rect;
use crate::types::{AttendeeError, Result};

use super::xobject::page_box;

/// Decoded RGB pixels ready to embed as an image XObject
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// 8-bit RGB, row-major, no padding
    pub rgb: Vec<u8>,
}

impl RasterImage {
    /// Flatten onto a white background so transparent areas print white
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            for channel in [r, g, b] {
                rgb.push((channel as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8);
            }
        }
        Self { width, height, rgb }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)?;
        Ok(Self::from_dynamic(&image))
    }
}

/// An image registered for the document under a resource name
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub name: String,
    pub raster: RasterImage,
}

/// Headshots loaded for one document.
///
/// Each path is decoded once. Files that fail to decode are logged, recorded
/// and treated as absent from then on.
#[derive(Debug, Default)]
pub struct ImageCatalog {
    images: Vec<EmbeddedImage>,
    index: HashMap<PathBuf, Option<usize>>,
    skipped: Vec<PathBuf>,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The image at `path`, decoding it on first use
    pub fn load(&mut self, path: &Path) -> Option<&EmbeddedImage> {
        let cached = self.index.get(path).copied();
        let slot = match cached {
            Some(slot) => slot,
            None => {
                let slot = match RasterImage::open(path) {
                    Ok(raster) => {
                        let name = format!("Im{}", self.images.len() + 1);
                        debug!(
                            "Loaded {} ({}x{}) as /{}",
                            path.display(),
                            raster.width,
                            raster.height,
                            name
                        );
                        self.images.push(EmbeddedImage { name, raster });
                        Some(self.images.len() - 1)
                    }
                    Err(e) => {
                        warn!("Skipping unreadable image {}: {}", path.display(), e);
                        self.skipped.push(path.to_path_buf());
                        None
                    }
                };
                self.index.insert(path.to_path_buf(), slot);
                slot
            }
        };
        slot.and_then(|index| self.images.get(index))
    }

    pub fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    /// Paths that could not be decoded, in the order they were tried
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }
}

/// Resource name of the template background on every template page
pub const TEMPLATE_RESOURCE: &str = "Tpl";

/// Background repeated under each template page
#[derive(Debug, Clone)]
pub enum TemplateBackground {
    /// Raster image covering the whole page
    Image { raster: RasterImage, width: f32, height: f32 },
    /// First page of a PDF, imported as a form XObject
    Pdf {
        document: Document,
        page_id: ObjectId,
        bbox: Rect,
    },
}

impl TemplateBackground {
    /// Load a template background. The format is chosen by extension.
    pub fn open(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if TEMPLATE_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            let raster = RasterImage::open(path)?;
            let points_per_pixel = POINTS_PER_INCH / TEMPLATE_IMAGE_DPI;
            Ok(TemplateBackground::Image {
                width: raster.width as f32 * points_per_pixel,
                height: raster.height as f32 * points_per_pixel,
                raster,
            })
        } else if extension == "pdf" {
            let bytes = std::fs::read(path)?;
            let document = Document::load_mem(&bytes)?;
            let page_id = document
                .get_pages()
                .values()
                .next()
                .copied()
                .ok_or_else(|| {
                    AttendeeError::UnsupportedTemplate(format!("{} has no pages", path.display()))
                })?;
            let bbox = page_box(&document, page_id)?;
            Ok(TemplateBackground::Pdf {
                document,
                page_id,
                bbox,
            })
        } else {
            Err(AttendeeError::UnsupportedTemplate(path.display().to_string()))
        }
    }

    /// Page size in points
    pub fn page_size(&self) -> (f32, f32) {
        match self {
            TemplateBackground::Image { width, height, .. } => (*width, *height),
            TemplateBackground::Pdf { bbox, .. } => (bbox.width, bbox.height),
        }
    }
}
