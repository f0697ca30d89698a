//! Layout Composer: places rendered sections into a variant's regions.

use serde::{Deserialize, Serialize};

use crate::layout::variant::{HeaderStyle, LayoutDescriptor, LayoutVariant};
use crate::models::PersonalInfo;
use crate::sections::format::{non_blank, YOUR_NAME};
use crate::sections::{Region, RenderedSection, SectionContent, StyleContext};

/// Personal-info block rendered above every body section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub style: HeaderStyle,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    pub contacts: Vec<String>,
}

impl HeaderBlock {
    pub fn from_personal(personal: &PersonalInfo, style: HeaderStyle) -> Self {
        Self {
            style,
            name: non_blank(personal.name.as_deref())
                .unwrap_or(YOUR_NAME)
                .to_string(),
            headline: non_blank(personal.headline.as_deref()).map(String::from),
            contacts: personal.contact_items(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSection {
    pub id: String,
    pub content: SectionContent,
}

/// One column of the document with its share of the content width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTree {
    pub region: Region,
    pub width_fraction: f32,
    pub sections: Vec<PlacedSection>,
}

/// The single source of truth both export surfaces paint from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    pub variant: LayoutVariant,
    pub header: HeaderBlock,
    /// Regions in reading order.
    pub regions: Vec<RegionTree>,
    pub style: StyleContext,
}

impl DocumentTree {
    /// Non-empty section ids in reading order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.regions
            .iter()
            .flat_map(|region| region.sections.iter().map(|s| s.id.as_str()))
            .collect()
    }
}

/// Builds the document tree.
///
/// Sections without content are dropped here. Single-column layouts put
/// every section in `main`; split layouts follow each section's region hint.
/// Relative order within a region is the resolved order.
pub fn compose(
    layout: &LayoutDescriptor,
    personal: &PersonalInfo,
    style: StyleContext,
    sections: Vec<RenderedSection>,
) -> DocumentTree {
    let mut regions: Vec<RegionTree> = layout
        .regions()
        .into_iter()
        .map(|(region, width_fraction)| RegionTree {
            region,
            width_fraction,
            sections: Vec::new(),
        })
        .collect();
    let single = regions.len() == 1;

    for section in sections {
        let Some(content) = section.content else {
            continue;
        };
        let target = if single {
            Region::Main
        } else {
            section.region_hint
        };
        // Every descriptor lists a main region, so the fallback is always hit.
        let index = regions
            .iter()
            .position(|r| r.region == target)
            .or_else(|| regions.iter().position(|r| r.region == Region::Main))
            .unwrap_or(0);
        regions[index].sections.push(PlacedSection {
            id: section.id,
            content,
        });
    }

    DocumentTree {
        variant: layout.variant,
        header: HeaderBlock::from_personal(personal, layout.header),
        regions,
        style,
    }
}
