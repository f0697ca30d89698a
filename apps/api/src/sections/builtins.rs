//! Built-in section renderers.
//!
//! Each renderer decides emptiness on its own: a section with no visible items
//! renders to `None` and never reaches the layout.

use crate::models::resume::CustomSection;
use crate::sections::format::{
    self, date_range, format_gpa, group_skills, has_dates, non_blank, or_placeholder,
};
use crate::sections::node::{Block, EntryBlock, SectionContent};
use crate::sections::normalize::NormalizedResume;
use crate::sections::style::StyleContext;

pub const EXPERIENCE_ID: &str = "experience";
pub const EDUCATION_ID: &str = "education";
pub const SKILLS_ID: &str = "skills";
pub const PROJECTS_ID: &str = "projects";
pub const CERTIFICATIONS_ID: &str = "certifications";
pub const ACHIEVEMENTS_ID: &str = "achievements";
pub const LANGUAGES_ID: &str = "languages";

fn section(title: &str, blocks: Vec<Block>, style: &StyleContext) -> Option<SectionContent> {
    if blocks.is_empty() {
        return None;
    }
    Some(SectionContent {
        title: style.section_title(title),
        blocks,
    })
}

fn owned(value: Option<&str>) -> Option<String> {
    non_blank(value).map(String::from)
}

pub fn profile_summary(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let summary = data.profile_summary.as_ref()?;
    let mut blocks = Vec::new();
    if let Some(text) = non_blank(summary.content.as_deref()) {
        blocks.push(Block::Paragraph {
            text: text.to_string(),
        });
    }
    if !summary.items.is_empty() {
        blocks.push(Block::List {
            items: summary.items.clone(),
        });
    }
    let title = non_blank(summary.title.as_deref()).unwrap_or("Professional Summary");
    section(title, blocks, style)
}

pub fn experience(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = data
        .experience
        .iter()
        .map(|job| {
            let end = if job.current { None } else { job.end_date.as_deref() };
            Block::Entry(EntryBlock {
                title: or_placeholder(job.title.as_deref(), format::POSITION),
                subtitle: Some(or_placeholder(job.company.as_deref(), format::COMPANY)),
                location: owned(job.location.as_deref()),
                dates: Some(date_range(
                    job.duration.as_deref(),
                    job.start_date.as_deref(),
                    end,
                )),
                detail: None,
                body: owned(job.description.as_deref()),
                bullets: job.highlights.clone(),
            })
        })
        .collect();
    section("Experience", blocks, style)
}

pub fn education(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = data
        .education
        .iter()
        .map(|school| {
            let degree = or_placeholder(school.degree.as_deref(), format::DEGREE);
            let title = match non_blank(school.field.as_deref()) {
                Some(field) => format!("{degree} in {field}"),
                None => degree,
            };
            Block::Entry(EntryBlock {
                title,
                subtitle: Some(or_placeholder(
                    school.institution.as_deref(),
                    format::INSTITUTION,
                )),
                location: owned(school.location.as_deref()),
                dates: Some(date_range(
                    school.duration.as_deref(),
                    school.start_date.as_deref(),
                    school.end_date.as_deref(),
                )),
                detail: non_blank(school.gpa.as_deref())
                    .map(|gpa| format!("GPA: {}", format_gpa(gpa))),
                body: owned(school.description.as_deref()),
                bullets: Vec::new(),
            })
        })
        .collect();
    section("Education", blocks, style)
}

pub fn skills(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = group_skills(&data.skills)
        .into_iter()
        .map(|group| Block::Labeled {
            label: group.category,
            text: group.names.join(", "),
        })
        .collect();
    section("Skills", blocks, style)
}

pub fn projects(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = data
        .projects
        .iter()
        .map(|project| {
            let dates = has_dates(
                project.duration.as_deref(),
                project.start_date.as_deref(),
                project.end_date.as_deref(),
            )
            .then(|| {
                date_range(
                    project.duration.as_deref(),
                    project.start_date.as_deref(),
                    project.end_date.as_deref(),
                )
            });
            Block::Entry(EntryBlock {
                title: or_placeholder(project.name.as_deref(), format::PROJECT),
                subtitle: (!project.technologies.is_empty())
                    .then(|| project.technologies.join(", ")),
                location: None,
                dates,
                detail: owned(project.link.as_deref()),
                body: owned(project.description.as_deref()),
                bullets: project.highlights.clone(),
            })
        })
        .collect();
    section("Projects", blocks, style)
}

pub fn certifications(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = data
        .certifications
        .iter()
        .map(|cert| {
            let detail = match (
                non_blank(cert.credential_id.as_deref()),
                non_blank(cert.link.as_deref()),
            ) {
                (Some(id), Some(link)) => Some(format!("Credential ID: {id} · {link}")),
                (Some(id), None) => Some(format!("Credential ID: {id}")),
                (None, Some(link)) => Some(link.to_string()),
                (None, None) => None,
            };
            Block::Entry(EntryBlock {
                title: or_placeholder(cert.name.as_deref(), format::CERTIFICATION),
                subtitle: owned(cert.issuer.as_deref()),
                dates: owned(cert.date.as_deref()),
                detail,
                ..Default::default()
            })
        })
        .collect();
    section("Certifications", blocks, style)
}

pub fn achievements(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = data
        .achievements
        .iter()
        .map(|achievement| {
            Block::Entry(EntryBlock {
                title: or_placeholder(achievement.title.as_deref(), format::ACHIEVEMENT),
                dates: owned(achievement.date.as_deref()),
                body: owned(achievement.description.as_deref()),
                ..Default::default()
            })
        })
        .collect();
    section("Achievements", blocks, style)
}

pub fn languages(data: &NormalizedResume, style: &StyleContext) -> Option<SectionContent> {
    let blocks = data
        .languages
        .iter()
        .map(|language| {
            let name = or_placeholder(language.name.as_deref(), format::LANGUAGE);
            match non_blank(language.proficiency.as_deref()) {
                Some(level) => Block::Labeled {
                    label: name,
                    text: level.to_string(),
                },
                None => Block::Paragraph { text: name },
            }
        })
        .collect();
    section("Languages", blocks, style)
}

/// Generic title + freeform content block for user-defined sections.
pub fn custom_section(custom: &CustomSection, style: &StyleContext) -> Option<SectionContent> {
    let mut blocks = Vec::new();
    if let Some(text) = non_blank(custom.content.as_deref()) {
        blocks.push(Block::Paragraph {
            text: text.to_string(),
        });
    }
    if !custom.items.is_empty() {
        blocks.push(Block::List {
            items: custom.items.clone(),
        });
    }
    let title = or_placeholder(custom.title.as_deref(), format::UNTITLED_SECTION);
    section(&title, blocks, style)
}
