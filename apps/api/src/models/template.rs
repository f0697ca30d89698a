//! Presentation configuration supplied by the editor alongside resume content.

use serde::{Deserialize, Serialize};

use crate::models::lenient;

// ────────────────────────────────────────────────────────────────────────────
// Template settings
// ────────────────────────────────────────────────────────────────────────────

/// A complete colour palette. Palettes are swapped as a whole, never per colour;
/// colours missing from the wire fall back to the default palette's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#1f2937".to_string(),
            secondary: "#4b5563".to_string(),
            accent: "#2563eb".to_string(),
            text: "#111827".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Tight,
    #[default]
    Normal,
    Relaxed,
}

impl Spacing {
    /// Line height as a multiple of the font size.
    pub fn line_height(&self) -> f32 {
        match self {
            Spacing::Tight => 1.15,
            Spacing::Normal => 1.3,
            Spacing::Relaxed => 1.5,
        }
    }

    /// Vertical gap before each section, in points.
    pub fn section_gap_pt(&self) -> f32 {
        match self {
            Spacing::Tight => 6.0,
            Spacing::Normal => 10.0,
            Spacing::Relaxed => 14.0,
        }
    }

    /// Vertical gap before each entry within a section, in points.
    pub fn entry_gap_pt(&self) -> f32 {
        match self {
            Spacing::Tight => 2.0,
            Spacing::Normal => 4.0,
            Spacing::Relaxed => 6.0,
        }
    }
}

/// Colours, font and spacing for one render, plus an optional default section order.
///
/// Constructed from a layout's defaults and then replaced wholesale by the
/// user's customization. `sectionOrder` is only consulted when the request
/// carries no explicit section descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSettings {
    #[serde(default)]
    pub colors: ColorPalette,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_order: Option<Vec<String>>,
}

fn default_font() -> String {
    "Helvetica".to_string()
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            colors: ColorPalette::default(),
            font: default_font(),
            spacing: Spacing::default(),
            section_order: None,
        }
    }
}

impl TemplateSettings {
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.colors = palette;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_section_order(mut self, order: &[&str]) -> Self {
        self.section_order = Some(order.iter().map(|id| id.to_string()).collect());
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section descriptors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    #[default]
    Standard,
    Custom,
}

/// One entry of the section manager: which section, whether it shows, and its label.
/// List order is render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescriptor {
    pub id: String,
    /// Only an explicit `false` disables the section.
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub enabled: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::text"
    )]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: SectionType,
}

impl SectionDescriptor {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            enabled,
            label: None,
            kind: SectionType::Standard,
        }
    }

    pub fn custom(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            kind: SectionType::Custom,
            ..Self::new(id, enabled)
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
