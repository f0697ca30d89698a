//! Layout variants as data.
//!
//! A template is a `LayoutDescriptor`: column mode, which sections go to the
//! sidebar, header style, title casing and default settings. One composer
//! interprets every descriptor; adding a template means adding a descriptor
//! here, never touching a renderer.

use serde::{Deserialize, Serialize};

use crate::models::{ColorPalette, Spacing, TemplateSettings};
use crate::sections::{Region, TitleCase};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    #[default]
    SingleColumn,
    TwoColumnA,
    TwoColumnB,
    Minimalist,
    AtsOptimized,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 5] = [
        LayoutVariant::SingleColumn,
        LayoutVariant::TwoColumnA,
        LayoutVariant::TwoColumnB,
        LayoutVariant::Minimalist,
        LayoutVariant::AtsOptimized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutVariant::SingleColumn => "single-column",
            LayoutVariant::TwoColumnA => "two-column-a",
            LayoutVariant::TwoColumnB => "two-column-b",
            LayoutVariant::Minimalist => "minimalist",
            LayoutVariant::AtsOptimized => "ats-optimized",
        }
    }

    pub fn descriptor(&self) -> LayoutDescriptor {
        match self {
            LayoutVariant::SingleColumn => LayoutDescriptor {
                variant: *self,
                name: "Classic",
                columns: ColumnMode::Single,
                sidebar_sections: &[],
                header: HeaderStyle::Centered,
                title_case: TitleCase::AsWritten,
                default_order: &[],
            },
            LayoutVariant::TwoColumnA => LayoutDescriptor {
                variant: *self,
                name: "Modern",
                columns: ColumnMode::Split {
                    sidebar_side: SidebarSide::Right,
                    sidebar_fraction: 0.34,
                },
                sidebar_sections: &["skills", "education", "certifications"],
                header: HeaderStyle::Left,
                title_case: TitleCase::AsWritten,
                default_order: &[],
            },
            LayoutVariant::TwoColumnB => LayoutDescriptor {
                variant: *self,
                name: "Creative",
                columns: ColumnMode::Split {
                    sidebar_side: SidebarSide::Left,
                    sidebar_fraction: 0.32,
                },
                sidebar_sections: &["skills", "languages", "certifications", "achievements"],
                header: HeaderStyle::Left,
                title_case: TitleCase::Upper,
                default_order: &[
                    "profile-summary",
                    "skills",
                    "languages",
                    "experience",
                    "projects",
                    "education",
                    "certifications",
                    "achievements",
                ],
            },
            LayoutVariant::Minimalist => LayoutDescriptor {
                variant: *self,
                name: "Minimalist",
                columns: ColumnMode::Single,
                sidebar_sections: &[],
                header: HeaderStyle::Compact,
                title_case: TitleCase::AsWritten,
                default_order: &[],
            },
            LayoutVariant::AtsOptimized => LayoutDescriptor {
                variant: *self,
                name: "ATS Optimized",
                columns: ColumnMode::Single,
                sidebar_sections: &[],
                header: HeaderStyle::Left,
                title_case: TitleCase::Upper,
                default_order: &[
                    "profile-summary",
                    "skills",
                    "experience",
                    "education",
                    "projects",
                    "certifications",
                    "achievements",
                    "languages",
                ],
            },
        }
    }
}

impl std::str::FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LayoutVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == wanted)
            .ok_or_else(|| format!("unknown layout '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ColumnMode {
    Single,
    #[serde(rename_all = "camelCase")]
    Split {
        sidebar_side: SidebarSide,
        /// Sidebar share of the content width, 0.0–1.0.
        sidebar_fraction: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    Centered,
    Left,
    /// Smaller name with headline and contacts on one line.
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    pub variant: LayoutVariant,
    pub name: &'static str,
    pub columns: ColumnMode,
    pub sidebar_sections: &'static [&'static str],
    pub header: HeaderStyle,
    pub title_case: TitleCase,
    /// Template default section order; empty means "use the global fallback".
    pub default_order: &'static [&'static str],
}

impl LayoutDescriptor {
    /// Region for a section id. Total: unknown and custom ids go to main.
    pub fn region_for(&self, id: &str) -> Region {
        match self.columns {
            ColumnMode::Single => Region::Main,
            ColumnMode::Split { .. } if self.sidebar_sections.iter().any(|s| *s == id) => {
                Region::Sidebar
            }
            ColumnMode::Split { .. } => Region::Main,
        }
    }

    /// Regions in reading order with their share of the content width.
    pub fn regions(&self) -> Vec<(Region, f32)> {
        match self.columns {
            ColumnMode::Single => vec![(Region::Main, 1.0)],
            ColumnMode::Split {
                sidebar_side,
                sidebar_fraction,
            } => {
                let sidebar = (Region::Sidebar, sidebar_fraction);
                let main = (Region::Main, 1.0 - sidebar_fraction);
                match sidebar_side {
                    SidebarSide::Left => vec![sidebar, main],
                    SidebarSide::Right => vec![main, sidebar],
                }
            }
        }
    }

    /// The settings a render starts from before the user customizes anything.
    pub fn default_settings(&self) -> TemplateSettings {
        let settings = match self.variant {
            LayoutVariant::SingleColumn => TemplateSettings::default(),
            LayoutVariant::TwoColumnA => TemplateSettings::default().with_palette(ColorPalette {
                primary: "#1e3a8a".to_string(),
                secondary: "#475569".to_string(),
                accent: "#2563eb".to_string(),
                text: "#0f172a".to_string(),
                background: "#ffffff".to_string(),
            }),
            LayoutVariant::TwoColumnB => TemplateSettings::default().with_palette(ColorPalette {
                primary: "#7c3aed".to_string(),
                secondary: "#6b7280".to_string(),
                accent: "#db2777".to_string(),
                text: "#1f2937".to_string(),
                background: "#ffffff".to_string(),
            }),
            LayoutVariant::Minimalist => TemplateSettings {
                spacing: Spacing::Relaxed,
                ..TemplateSettings::default()
            }
            .with_font("Georgia"),
            LayoutVariant::AtsOptimized => TemplateSettings {
                spacing: Spacing::Tight,
                ..TemplateSettings::default()
            }
            .with_palette(ColorPalette {
                primary: "#000000".to_string(),
                secondary: "#333333".to_string(),
                accent: "#000000".to_string(),
                text: "#000000".to_string(),
                background: "#ffffff".to_string(),
            }),
        };
        if self.default_order.is_empty() {
            settings
        } else {
            settings.with_section_order(self.default_order)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::BUILTIN_SECTION_IDS;

    #[test]
    fn test_every_variant_places_every_builtin() {
        for variant in LayoutVariant::ALL {
            let layout = variant.descriptor();
            let regions: Vec<Region> = layout.regions().into_iter().map(|(r, _)| r).collect();
            for id in BUILTIN_SECTION_IDS {
                assert!(regions.contains(&layout.region_for(id)), "{variant:?} cannot place {id}");
            }
        }
    }

    #[test]
    fn test_custom_ids_go_to_main() {
        for variant in LayoutVariant::ALL {
            assert_eq!(variant.descriptor().region_for("hobbies"), Region::Main);
        }
    }

    #[test]
    fn test_two_column_a_assignment() {
        let layout = LayoutVariant::TwoColumnA.descriptor();
        assert_eq!(layout.region_for("skills"), Region::Sidebar);
        assert_eq!(layout.region_for("education"), Region::Sidebar);
        assert_eq!(layout.region_for("certifications"), Region::Sidebar);
        assert_eq!(layout.region_for("experience"), Region::Main);
        assert_eq!(layout.regions()[0].0, Region::Main);
    }

    #[test]
    fn test_split_fractions_sum_to_one() {
        for variant in [LayoutVariant::TwoColumnA, LayoutVariant::TwoColumnB] {
            let total: f32 = variant.descriptor().regions().iter().map(|(_, f)| f).sum();
            assert!((total - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_variant_wire_names_round_trip() {
        for variant in LayoutVariant::ALL {
            let json = serde_json::to_value(variant).unwrap();
            assert_eq!(json, serde_json::json!(variant.as_str()));
            assert_eq!(variant.as_str().parse::<LayoutVariant>(), Ok(variant));
        }
        assert!("three-column".parse::<LayoutVariant>().is_err());
    }

    #[test]
    fn test_default_settings_carry_template_order() {
        let ats = LayoutVariant::AtsOptimized.descriptor().default_settings();
        assert_eq!(ats.spacing, Spacing::Tight);
        assert_eq!(ats.section_order.as_ref().map(|o| o[1].as_str()), Some("skills"));
        assert!(LayoutVariant::SingleColumn
            .descriptor()
            .default_settings()
            .section_order
            .is_none());
    }
}
