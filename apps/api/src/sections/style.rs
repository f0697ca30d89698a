use serde::{Deserialize, Serialize};

use crate::models::TemplateSettings;

/// How section titles are cased by a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleCase {
    #[default]
    AsWritten,
    Upper,
}

/// Immutable render context passed down the whole pipeline.
///
/// Everything a renderer may consult about presentation lives here; there is
/// no other channel for configuration to reach a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleContext {
    pub settings: TemplateSettings,
    pub title_case: TitleCase,
}

impl StyleContext {
    pub fn new(settings: TemplateSettings, title_case: TitleCase) -> Self {
        Self {
            settings,
            title_case,
        }
    }

    pub fn section_title(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self.title_case {
            TitleCase::AsWritten => trimmed.to_string(),
            TitleCase::Upper => trimmed.to_uppercase(),
        }
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new(TemplateSettings::default(), TitleCase::AsWritten)
    }
}
