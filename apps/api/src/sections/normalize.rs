//! Data Normalizer: visibility-filtered view of a resume.
//!
//! Every collection is reduced to the items the user has not hidden, in their
//! original order. The profile summary, stored as a reserved custom section,
//! is additionally exposed on its own because several renderers treat it as a
//! standard section.

use serde::Serialize;

use crate::models::resume::{
    Achievement, Certification, CustomSection, Education, Experience, Language, PersonalInfo,
    Project, ResumeData, Skill, Visible,
};
use crate::models::PROFILE_SUMMARY_ID;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResume {
    pub personal: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub achievements: Vec<Achievement>,
    pub languages: Vec<Language>,
    /// Still contains the profile summary, if any.
    pub custom_sections: Vec<CustomSection>,
    pub profile_summary: Option<CustomSection>,
}

impl NormalizedResume {
    /// Looks up a visible custom section by id.
    pub fn custom_section(&self, id: &str) -> Option<&CustomSection> {
        self.custom_sections.iter().find(|section| section.has_id(id))
    }
}

/// Produces the visibility-filtered view of `data`. Never fails.
pub fn normalize(data: &ResumeData) -> NormalizedResume {
    let custom_sections = visible_only(&data.custom_sections);
    let profile_summary = custom_sections
        .iter()
        .find(|section| section.has_id(PROFILE_SUMMARY_ID))
        .cloned();

    NormalizedResume {
        personal: data.personal.clone(),
        education: visible_only(&data.education),
        experience: visible_only(&data.experience),
        skills: visible_only(&data.skills),
        projects: visible_only(&data.projects),
        certifications: visible_only(&data.certifications),
        achievements: visible_only(&data.achievements),
        languages: visible_only(&data.languages),
        custom_sections,
        profile_summary,
    }
}

fn visible_only<T: Visible + Clone>(items: &[T]) -> Vec<T> {
    items.iter().filter(|item| item.is_visible()).cloned().collect()
}
