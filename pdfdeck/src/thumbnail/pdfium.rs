//! Page rendering through the pdfium library.

use image::RgbaImage;
use pdfium_render::prelude::*;
use std::cell::OnceCell;
use std::path::Path;

use super::PageRenderer;
use crate::error::{PdfDeckError, Result};

/// Renders pages with pdfium.
///
/// The library is bound on first use, from the working directory first
/// and then from the system library path. When neither is available every
/// render fails with [`PdfDeckError::RenderFailed`].
#[derive(Default)]
pub struct PdfiumRenderer {
    pdfium: OnceCell<std::result::Result<Pdfium, String>>,
}

impl PdfiumRenderer {
    /// Create a renderer. Binding is deferred to the first render.
    pub fn new() -> Self {
        Self::default()
    }

    fn pdfium(&self) -> std::result::Result<&Pdfium, &str> {
        self.pdfium
            .get_or_init(|| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                    .or_else(|_| Pdfium::bind_to_system_library())
                    .map(Pdfium::new)
                    .map_err(|e| format!("Failed to bind pdfium library: {e}"))
            })
            .as_ref()
            .map_err(String::as_str)
    }
}

impl PageRenderer for PdfiumRenderer {
    fn render_first_page(&self, path: &Path, zoom: f32) -> Result<Option<RgbaImage>> {
        let failed = |reason: String| PdfDeckError::render_failed(path.to_path_buf(), reason);

        let pdfium = self.pdfium().map_err(|reason| failed(reason.to_string()))?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| failed(e.to_string()))?;

        let pages = document.pages();
        if pages.len() == 0 {
            return Ok(None);
        }
        let page = pages.get(0).map_err(|e| failed(e.to_string()))?;

        let width = ((page.width().value * zoom).round() as i32).max(1);
        let height = ((page.height().value * zoom).round() as i32).max(1);

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| failed(e.to_string()))?;

        let image = RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            bitmap.as_rgba_bytes(),
        )
        .ok_or_else(|| failed("Rendered bitmap has an unexpected size".to_string()))?;

        Ok(Some(image))
    }
}
