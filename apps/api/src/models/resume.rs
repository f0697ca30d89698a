use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::lenient::{self, WireAliases};

/// Reserved custom-section id holding the professional summary.
pub const PROFILE_SUMMARY_ID: &str = "profile-summary";

/// Items that carry the editor's `isVisible` toggle.
pub trait Visible {
    fn is_visible(&self) -> bool;
}

macro_rules! impl_visible {
    ($($ty:ty),+ $(,)?) => {
        $(impl Visible for $ty {
            fn is_visible(&self) -> bool {
                self.is_visible
            }
        })+
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Resume record
// ────────────────────────────────────────────────────────────────────────────

/// The user's resume content as persisted by the editor.
///
/// Field names are the stable camelCase names of the saved record, so a value
/// survives a save → reload round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default, deserialize_with = "lenient::object")]
    pub personal: PersonalInfo,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub achievements: Vec<Achievement>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub languages: Vec<Language>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub custom_sections: Vec<CustomSection>,
}

impl ResumeData {
    /// Builds resume data from arbitrary JSON. Never fails: anything that is
    /// not an object yields an empty resume.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            debug!(
                "Resume payload is {}, not an object; using empty resume",
                lenient::kind_of(value)
            );
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            debug!("Resume payload could not be read ({err}); using empty resume");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub website: Option<String>,
}

impl PersonalInfo {
    /// Non-blank contact items in header order.
    pub fn contact_items(&self) -> Vec<String> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.linkedin,
            &self.github,
            &self.website,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_date: Option<String>,
    /// Precomputed display string, e.g. "2019 – 2022 (3 yrs)".
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub highlights: Vec<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    /// Raw grade as typed: "3.8", "85", "9.2/10", "88%".
    #[serde(default, deserialize_with = "lenient::text")]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub skill_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub level: Option<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub highlights: Vec<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub credential_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub proficiency: Option<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

/// A user-defined section. `profile-summary` is reserved for the summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub items: Vec<String>,
    #[serde(default = "lenient::default_visible", deserialize_with = "lenient::visible")]
    pub is_visible: bool,
}

impl CustomSection {
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

impl WireAliases for PersonalInfo {
    const ALIASES: &'static [(&'static str, &'static str)] = &[("headline", "title")];
}

impl WireAliases for Experience {
    const ALIASES: &'static [(&'static str, &'static str)] = &[("title", "position")];
}

impl WireAliases for Education {
    const ALIASES: &'static [(&'static str, &'static str)] =
        &[("field", "fieldOfStudy"), ("institution", "school")];
}

impl WireAliases for Skill {
    const ALIASES: &'static [(&'static str, &'static str)] = &[("skillType", "category")];
}

impl WireAliases for Project {
    const ALIASES: &'static [(&'static str, &'static str)] = &[("link", "url")];
}

impl WireAliases for Certification {
    const ALIASES: &'static [(&'static str, &'static str)] = &[("link", "url")];
}

impl WireAliases for Language {
    const ALIASES: &'static [(&'static str, &'static str)] = &[("name", "language")];
}

impl WireAliases for Achievement {}
impl WireAliases for CustomSection {}

impl_visible!(
    Experience,
    Education,
    Skill,
    Project,
    Certification,
    Achievement,
    Language,
    CustomSection,
);
