use serde::{Deserialize, Serialize};

use crate::export::ExportError;

/// Smallest usable text width a page or column may have, in points (1 inch).
pub const MIN_TEXT_WIDTH_PT: f32 = 72.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

/// The fixed page box a paginated export lays content into. All values in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBox {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageBox {
    pub fn new(size: PageSize, margin_pt: f32) -> Self {
        let (width_pt, height_pt) = size.dimensions();
        Self {
            width_pt,
            height_pt,
            margin_pt,
        }
    }

    pub fn a4() -> Self {
        Self::new(PageSize::A4, 36.0)
    }

    pub fn content_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    pub fn content_bottom(&self) -> f32 {
        self.height_pt - self.margin_pt
    }

    /// Rejects boxes that leave no room for text.
    pub fn validate(&self) -> Result<(), ExportError> {
        let finite = [self.width_pt, self.height_pt, self.margin_pt]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.margin_pt < 0.0 {
            return Err(ExportError::InvalidPageBox(format!("{self:?}")));
        }
        if self.content_width() < MIN_TEXT_WIDTH_PT
            || self.content_bottom() - self.margin_pt < MIN_TEXT_WIDTH_PT
        {
            return Err(ExportError::InvalidPageBox(format!(
                "{:.0}x{:.0}pt page with {:.0}pt margins leaves no room for content",
                self.width_pt, self.height_pt, self.margin_pt
            )));
        }
        Ok(())
    }
}

impl Default for PageBox {
    fn default() -> Self {
        Self::a4()
    }
}
