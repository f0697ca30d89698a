//! End-to-end render: raw resume + settings + section config → document tree.
//!
//! normalize → resolve → render each id (dropping empties) → compose.
//! Export to a surface is a separate step so one tree can feed both.

use serde::Deserialize;
use tracing::debug;

use crate::layout::{compose, DocumentTree, LayoutVariant};
use crate::models::{ResumeData, SectionDescriptor, TemplateSettings};
use crate::sections::{normalize, resolve, RenderedSection, SectionRegistry, StyleContext};

/// Everything one render needs, owned so it can move onto a blocking task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    pub resume: ResumeData,
    /// Replaces the layout's default settings wholesale when present.
    #[serde(default)]
    pub settings: Option<TemplateSettings>,
    #[serde(default)]
    pub sections: Option<Vec<SectionDescriptor>>,
    #[serde(default)]
    pub layout: LayoutVariant,
}

pub fn render_document(input: &RenderInput, registry: &SectionRegistry) -> DocumentTree {
    let layout = input.layout.descriptor();
    let settings = input
        .settings
        .clone()
        .unwrap_or_else(|| layout.default_settings());
    let template_order: Option<Vec<String>> = settings.section_order.clone().or_else(|| {
        (!layout.default_order.is_empty())
            .then(|| layout.default_order.iter().map(|id| id.to_string()).collect())
    });
    let style = StyleContext::new(settings, layout.title_case);

    let data = normalize(&input.resume);
    let resolved = resolve(input.sections.as_deref(), template_order.as_deref(), &data);

    let rendered: Vec<RenderedSection> = resolved
        .into_iter()
        .map(|section| {
            let content = registry.render(&section.id, &data, &style).map(|mut content| {
                if let Some(label) = section.label.as_deref().filter(|l| !l.trim().is_empty()) {
                    content.title = style.section_title(label);
                }
                content
            });
            RenderedSection {
                region_hint: layout.region_for(&section.id),
                id: section.id,
                content,
            }
        })
        .collect();

    debug!(
        "Rendered {} of {} resolved sections for {}",
        rendered.iter().filter(|s| s.content.is_some()).count(),
        rendered.len(),
        layout.variant.as_str()
    );

    compose(&layout, &data.personal, style, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export, TargetSurface};
    use crate::layout::PageBox;
    use crate::models::PROFILE_SUMMARY_ID;
    use serde_json::json;

    fn full_resume() -> ResumeData {
        ResumeData::from_value(&json!({
            "personal": { "name": "Ada Lovelace", "email": "ada@example.com" },
            "experience": [
                { "title": "Analyst", "company": "Engine Co", "startDate": "1842", "current": true,
                  "highlights": ["Wrote the first program"] },
                { "title": "Secret", "company": "Hidden", "isVisible": false }
            ],
            "education": [{ "degree": "Mathematics", "institution": "Home", "gpa": 3.8 }],
            "skills": [
                { "name": "Analysis", "skillType": "Math" },
                { "name": "Poetry" }
            ],
            "projects": [{ "name": "Notes", "description": "Annotations on the engine" }],
            "certifications": [{ "name": "Royal Society", "issuer": "RS" }],
            "achievements": [{ "title": "First programmer" }],
            "languages": [{ "name": "French", "proficiency": "Fluent" }],
            "customSections": [
                { "id": PROFILE_SUMMARY_ID, "title": "Summary", "content": "Mathematician." },
                { "id": "hobbies", "title": "Hobbies", "content": "Horses" }
            ]
        }))
    }

    fn input(layout: LayoutVariant, sections: Option<Vec<SectionDescriptor>>) -> RenderInput {
        RenderInput {
            resume: full_resume(),
            settings: None,
            sections,
            layout,
        }
    }

    // ── resolution through rendering ──

    #[test]
    fn test_enabled_skills_disabled_education() {
        let sections = vec![
            SectionDescriptor::new("skills", true),
            SectionDescriptor::new("education", false),
        ];
        let tree = render_document(
            &input(LayoutVariant::SingleColumn, Some(sections)),
            &SectionRegistry::default(),
        );
        let ids = tree.section_ids();
        assert!(ids.contains(&"skills"));
        assert!(!ids.contains(&"education"));
    }

    #[test]
    fn test_unconfigured_custom_section_appended_last() {
        let sections = vec![
            SectionDescriptor::new("experience", true),
            SectionDescriptor::new("skills", true),
        ];
        let tree = render_document(
            &input(LayoutVariant::SingleColumn, Some(sections)),
            &SectionRegistry::default(),
        );
        assert_eq!(tree.section_ids(), vec!["experience", "skills", "hobbies"]);
    }

    #[test]
    fn test_empty_experience_absent_from_tree() {
        let mut render = input(LayoutVariant::SingleColumn, None);
        render.resume.experience.clear();
        let tree = render_document(&render, &SectionRegistry::default());
        assert!(!tree.section_ids().contains(&"experience"));
        assert!(tree.section_ids().contains(&"education"));
    }

    #[test]
    fn test_descriptor_label_overrides_title_with_layout_casing() {
        let sections = vec![SectionDescriptor::new("experience", true).labeled("Work History")];
        let tree = render_document(
            &input(LayoutVariant::AtsOptimized, Some(sections)),
            &SectionRegistry::default(),
        );
        assert_eq!(tree.regions[0].sections[0].content.title, "WORK HISTORY");
    }

    #[test]
    fn test_template_order_used_without_descriptors() {
        let tree = render_document(
            &input(LayoutVariant::AtsOptimized, None),
            &SectionRegistry::default(),
        );
        assert_eq!(
            tree.section_ids(),
            vec![
                "profile-summary",
                "skills",
                "experience",
                "education",
                "projects",
                "certifications",
                "achievements",
                "languages",
                "hobbies"
            ]
        );
    }

    #[test]
    fn test_user_settings_replace_layout_defaults() {
        let mut render = input(LayoutVariant::Minimalist, None);
        render.settings = Some(TemplateSettings::default().with_section_order(&["languages"]));
        let tree = render_document(&render, &SectionRegistry::default());
        assert_eq!(tree.style.settings.font, "Helvetica");
        assert_eq!(tree.section_ids(), vec!["languages", "hobbies"]);
    }

    #[test]
    fn test_registered_section_renders_on_both_surfaces() {
        use crate::sections::{Block, NormalizedResume, SectionContent};

        let mut registry = SectionRegistry::default();
        registry.register("publications", |_data: &NormalizedResume, style: &StyleContext| {
            Some(SectionContent {
                title: style.section_title("Publications"),
                blocks: vec![Block::Paragraph {
                    text: "Sketch of the Analytical Engine".into(),
                }],
            })
        });
        let sections = vec![SectionDescriptor::new("publications", true)];
        let tree = render_document(&input(LayoutVariant::TwoColumnB, Some(sections)), &registry);
        for target in [TargetSurface::Screen, TargetSurface::Paginated(PageBox::a4())] {
            let output = export(&tree, &target).unwrap();
            assert_eq!(output.section_ids(), vec!["publications", "hobbies"]);
        }
    }

    // ── surface parity ──

    #[test]
    fn test_screen_and_paginated_agree_for_every_layout() {
        let registry = SectionRegistry::default();
        for variant in LayoutVariant::ALL {
            let tree = render_document(&input(variant, None), &registry);
            let screen = export(&tree, &TargetSurface::Screen).unwrap();
            let paginated = export(&tree, &TargetSurface::Paginated(PageBox::a4())).unwrap();
            assert_eq!(screen.section_ids(), paginated.section_ids(), "{variant:?}");
            assert_eq!(screen.section_ids(), tree.section_ids(), "{variant:?}");
        }
    }

    #[test]
    fn test_hidden_items_reach_neither_surface() {
        let tree = render_document(
            &input(LayoutVariant::SingleColumn, None),
            &SectionRegistry::default(),
        );
        let paginated = match export(&tree, &TargetSurface::Paginated(PageBox::a4())).unwrap() {
            crate::export::ExportOutput::Paginated(doc) => doc,
            other => panic!("unexpected surface {other:?}"),
        };
        let text: Vec<&str> = paginated
            .pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
            .collect();
        assert!(!text.iter().any(|line| line.contains("Secret") || line.contains("Hidden")));
        let screen = export(&tree, &TargetSurface::Screen).unwrap();
        let screen = serde_json::to_string(&screen).unwrap();
        assert!(!screen.contains("Secret"));
    }

    #[test]
    fn test_render_input_from_wire_json() {
        let render: RenderInput = serde_json::from_value(json!({
            "resume": { "skills": "not a list" },
            "layout": "two-column-a",
            "sections": [{ "id": "skills", "enabled": true }]
        }))
        .unwrap();
        assert_eq!(render.layout, LayoutVariant::TwoColumnA);
        assert!(render.resume.skills.is_empty());
        let tree = render_document(&render, &SectionRegistry::default());
        assert!(tree.section_ids().is_empty());
    }
}
