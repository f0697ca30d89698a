// Document export: one document tree, two surfaces.
//
// `Screen` keeps the composed structure for live preview; `Paginated` lays
// it out on fixed pages for PDF. Both read the same text runs.

pub mod color;
pub mod error;
pub mod filename;
pub mod paginate;
pub mod pdf;
pub mod runs;
pub mod screen;

pub use error::ExportError;
pub use filename::export_filename;
pub use paginate::{export_paginated, Page, PageLine, PaginatedDocument};
pub use pdf::{Metadata, PdfWriter};
pub use screen::{export_screen, ScreenView};

use serde::Serialize;

use crate::layout::{DocumentTree, PageBox};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetSurface {
    Screen,
    Paginated(PageBox),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "surface", rename_all = "camelCase")]
pub enum ExportOutput {
    Screen(ScreenView),
    Paginated(PaginatedDocument),
}

impl ExportOutput {
    /// Non-empty section ids in reading order, whichever the surface.
    pub fn section_ids(&self) -> Vec<&str> {
        match self {
            ExportOutput::Screen(view) => view.section_ids(),
            ExportOutput::Paginated(doc) => doc.section_order.iter().map(String::as_str).collect(),
        }
    }
}

pub fn export(tree: &DocumentTree, target: &TargetSurface) -> Result<ExportOutput, ExportError> {
    match target {
        TargetSurface::Screen => export_screen(tree).map(ExportOutput::Screen),
        TargetSurface::Paginated(page_box) => {
            export_paginated(tree, page_box).map(ExportOutput::Paginated)
        }
    }
}
