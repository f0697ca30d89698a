//! Section Resolver: decides which sections render, and in what order.
//!
//! # Precedence (highest first)
//! 1. A non-empty explicit descriptor list, filtered to enabled entries.
//! 2. The template's default order, every entry enabled.
//! 3. The built-in fallback order.
//!
//! Custom sections present in the data but not already in the list are then
//! appended in data order, so sections added after a config was saved still
//! show up. A custom section disabled in the descriptors is therefore appended
//! too: the merge only ever adds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{SectionDescriptor, PROFILE_SUMMARY_ID};
use crate::sections::normalize::NormalizedResume;

/// Used when neither descriptors nor a template order are supplied.
pub const FALLBACK_ORDER: [&str; 7] = [
    PROFILE_SUMMARY_ID,
    "experience",
    "education",
    "skills",
    "projects",
    "achievements",
    "certifications",
];

/// One section to render, with the user's label override if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ResolvedSection {
    fn plain(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
        }
    }
}

/// Merges the three order sources into one definitive list. Deterministic:
/// only ordered slices are consulted.
pub fn resolve(
    explicit: Option<&[SectionDescriptor]>,
    template_default_order: Option<&[String]>,
    data: &NormalizedResume,
) -> Vec<ResolvedSection> {
    let mut resolved: Vec<ResolvedSection> = Vec::new();
    // Ids already emitted.
    let mut included: HashSet<String> = HashSet::new();

    match (explicit, template_default_order) {
        (Some(descriptors), _) if !descriptors.is_empty() => {
            for descriptor in descriptors.iter().filter(|d| d.enabled) {
                if included.insert(descriptor.id.clone()) {
                    resolved.push(ResolvedSection {
                        id: descriptor.id.clone(),
                        label: descriptor.label.clone(),
                    });
                }
            }
        }
        (_, Some(order)) if !order.is_empty() => {
            for id in order {
                if included.insert(id.clone()) {
                    resolved.push(ResolvedSection::plain(id));
                }
            }
        }
        _ => {
            for id in FALLBACK_ORDER {
                included.insert(id.to_string());
                resolved.push(ResolvedSection::plain(id));
            }
        }
    }

    for custom in &data.custom_sections {
        let Some(id) = custom.id.as_deref() else {
            continue;
        };
        if id == PROFILE_SUMMARY_ID || id.trim().is_empty() {
            continue;
        }
        if included.insert(id.to_string()) {
            resolved.push(ResolvedSection::plain(id));
        }
    }

    resolved
}
