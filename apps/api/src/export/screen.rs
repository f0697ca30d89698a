//! Screen surface: an unpaginated, serializable view of the document.

use serde::{Deserialize, Serialize};

use crate::export::color::ResolvedPalette;
use crate::export::runs::{section_runs, TextRun};
use crate::export::ExportError;
use crate::layout::{DocumentTree, HeaderBlock, LayoutVariant};
use crate::models::{ColorPalette, Spacing};
use crate::sections::Region;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenTheme {
    pub colors: ColorPalette,
    pub font: String,
    pub spacing: Spacing,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSection {
    pub id: String,
    pub title: TextRun,
    pub groups: Vec<Vec<TextRun>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenColumn {
    pub region: Region,
    pub width_fraction: f32,
    pub sections: Vec<ScreenSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub variant: LayoutVariant,
    pub header: HeaderBlock,
    pub theme: ScreenTheme,
    pub columns: Vec<ScreenColumn>,
}

impl ScreenView {
    pub fn section_ids(&self) -> Vec<&str> {
        self.columns
            .iter()
            .flat_map(|column| column.sections.iter().map(|s| s.id.as_str()))
            .collect()
    }
}

/// Renders the tree for on-screen display.
///
/// The palette is validated here too, so a colour the paginated surface
/// would reject is never shown as a working preview.
pub fn export_screen(tree: &DocumentTree) -> Result<ScreenView, ExportError> {
    let settings = &tree.style.settings;
    ResolvedPalette::parse(&settings.colors)?;

    let columns = tree
        .regions
        .iter()
        .map(|region| ScreenColumn {
            region: region.region,
            width_fraction: region.width_fraction,
            sections: region
                .sections
                .iter()
                .map(|placed| {
                    let runs = section_runs(&placed.content);
                    ScreenSection {
                        id: placed.id.clone(),
                        title: runs.title,
                        groups: runs.groups,
                    }
                })
                .collect(),
        })
        .collect();

    Ok(ScreenView {
        variant: tree.variant,
        header: tree.header.clone(),
        theme: ScreenTheme {
            colors: settings.colors.clone(),
            font: settings.font.clone(),
            spacing: settings.spacing,
            line_height: settings.spacing.line_height(),
        },
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compose;
    use crate::models::{PersonalInfo, TemplateSettings};
    use crate::sections::{Block, RenderedSection, SectionContent, StyleContext};

    fn tree(settings: TemplateSettings) -> DocumentTree {
        let layout = LayoutVariant::TwoColumnA.descriptor();
        let sections = ["experience", "skills"]
            .into_iter()
            .map(|id| RenderedSection {
                id: id.to_string(),
                region_hint: layout.region_for(id),
                content: Some(SectionContent {
                    title: id.to_uppercase(),
                    blocks: vec![Block::Paragraph { text: "text".into() }],
                }),
            })
            .collect();
        compose(
            &layout,
            &PersonalInfo::default(),
            StyleContext::new(settings, layout.title_case),
            sections,
        )
    }

    #[test]
    fn test_screen_columns_follow_regions() {
        let view = export_screen(&tree(TemplateSettings::default())).unwrap();
        assert_eq!(view.columns.len(), 2);
        assert_eq!(view.columns[0].region, Region::Main);
        assert_eq!(view.section_ids(), vec!["experience", "skills"]);
        assert_eq!(view.theme.font, "Helvetica");
    }

    #[test]
    fn test_screen_rejects_bad_colour() {
        let mut settings = TemplateSettings::default();
        settings.colors.accent = "not-a-colour".into();
        assert!(matches!(
            export_screen(&tree(settings)),
            Err(ExportError::InvalidColor { field: "accent", .. })
        ));
    }
}
