//! Section Render Registry: the single id → renderer table.
//!
//! Both export surfaces render through the same registry, so adding a section
//! type is one `register` call.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::models::PROFILE_SUMMARY_ID;
use crate::sections::builtins::{
    self, ACHIEVEMENTS_ID, CERTIFICATIONS_ID, EDUCATION_ID, EXPERIENCE_ID, LANGUAGES_ID,
    PROJECTS_ID, SKILLS_ID,
};
use crate::sections::node::SectionContent;
use crate::sections::normalize::NormalizedResume;
use crate::sections::style::StyleContext;

/// A pure section renderer. `None` means the section has nothing to show.
pub type RenderFn =
    Arc<dyn Fn(&NormalizedResume, &StyleContext) -> Option<SectionContent> + Send + Sync>;

/// Ids every layout must know how to place.
pub const BUILTIN_SECTION_IDS: [&str; 8] = [
    PROFILE_SUMMARY_ID,
    EXPERIENCE_ID,
    EDUCATION_ID,
    SKILLS_ID,
    PROJECTS_ID,
    CERTIFICATIONS_ID,
    ACHIEVEMENTS_ID,
    LANGUAGES_ID,
];

#[derive(Clone)]
pub struct SectionRegistry {
    renderers: HashMap<String, RenderFn>,
}

impl SectionRegistry {
    /// An empty registry. Unregistered ids still resolve to custom sections.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(PROFILE_SUMMARY_ID, builtins::profile_summary);
        registry.register(EXPERIENCE_ID, builtins::experience);
        registry.register(EDUCATION_ID, builtins::education);
        registry.register(SKILLS_ID, builtins::skills);
        registry.register(PROJECTS_ID, builtins::projects);
        registry.register(CERTIFICATIONS_ID, builtins::certifications);
        registry.register(ACHIEVEMENTS_ID, builtins::achievements);
        registry.register(LANGUAGES_ID, builtins::languages);
        registry
    }

    /// Registers (or replaces) the renderer for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, render: F)
    where
        F: Fn(&NormalizedResume, &StyleContext) -> Option<SectionContent> + Send + Sync + 'static,
    {
        self.renderers.insert(id.into(), Arc::new(render));
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.renderers.contains_key(id)
    }

    /// Renders one section.
    ///
    /// Registered ids use their renderer. Any other id is looked up among the
    /// visible custom sections; ids matching nothing (e.g. a section removed
    /// since the config was saved) are dropped without error.
    pub fn render(
        &self,
        id: &str,
        data: &NormalizedResume,
        style: &StyleContext,
    ) -> Option<SectionContent> {
        if let Some(render) = self.renderers.get(id) {
            return render(data, style);
        }
        match data.custom_section(id) {
            Some(custom) => builtins::custom_section(custom, style),
            None => {
                debug!("Section '{id}' matches no renderer or custom section; skipping");
                None
            }
        }
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("SectionRegistry").field("renderers", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeData;
    use crate::sections::node::Block;
    use crate::sections::normalize::normalize;
    use serde_json::json;

    fn data(value: serde_json::Value) -> NormalizedResume {
        normalize(&ResumeData::from_value(&value))
    }

    #[test]
    fn test_builtins_registered() {
        let registry = SectionRegistry::with_builtins();
        for id in BUILTIN_SECTION_IDS {
            assert!(registry.is_registered(id), "missing renderer for {id}");
        }
    }

    #[test]
    fn test_empty_experience_renders_none() {
        let registry = SectionRegistry::default();
        let normalized = data(json!({ "experience": [] }));
        assert!(registry
            .render("experience", &normalized, &StyleContext::default())
            .is_none());
    }

    #[test]
    fn test_unknown_id_is_silently_dropped() {
        let registry = SectionRegistry::default();
        let normalized = data(json!({ "experience": [{ "title": "Dev" }] }));
        assert!(registry
            .render("volunteering", &normalized, &StyleContext::default())
            .is_none());
    }

    #[test]
    fn test_custom_section_resolved_by_id() {
        let registry = SectionRegistry::default();
        let normalized = data(json!({
            "customSections": [{
                "id": "hobbies", "title": "Hobbies", "content": "Chess, climbing"
            }]
        }));
        let content = registry
            .render("hobbies", &normalized, &StyleContext::default())
            .unwrap();
        assert_eq!(content.title, "Hobbies");
        assert_eq!(
            content.blocks,
            vec![Block::Paragraph { text: "Chess, climbing".into() }]
        );
    }

    #[test]
    fn test_registered_renderer_overrides_custom_lookup() {
        let mut registry = SectionRegistry::empty();
        registry.register("hobbies", |_data: &NormalizedResume, _style: &StyleContext| {
            Some(SectionContent {
                title: "Pastimes".into(),
                blocks: vec![Block::Paragraph { text: "registered".into() }],
            })
        });
        let normalized = data(json!({
            "customSections": [{ "id": "hobbies", "title": "Hobbies", "content": "Chess" }]
        }));
        let content = registry
            .render("hobbies", &normalized, &StyleContext::default())
            .unwrap();
        assert_eq!(content.title, "Pastimes");
    }
}
