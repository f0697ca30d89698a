//! Field fallbacks and display formatting shared by all section renderers.
//!
//! Users rely on these exact strings: an empty job title shows "Position", a
//! date range without an end shows "–Present". Changing them is a visible
//! regression.

use serde::Serialize;

use crate::models::resume::Skill;

pub const POSITION: &str = "Position";
pub const COMPANY: &str = "Company";
pub const DEGREE: &str = "Degree";
pub const INSTITUTION: &str = "Institution";
pub const PROJECT: &str = "Project";
pub const CERTIFICATION: &str = "Certification";
pub const ACHIEVEMENT: &str = "Achievement";
pub const LANGUAGE: &str = "Language";
pub const SKILL: &str = "Skill";
pub const UNTITLED_SECTION: &str = "Untitled Section";
pub const YOUR_NAME: &str = "Your Name";
pub const DATE: &str = "Date";
pub const PRESENT: &str = "Present";
pub const OTHER_SKILLS: &str = "Other";

const RANGE_SEPARATOR: char = '–';

/// Returns the trimmed value when it has content.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    non_blank(value).unwrap_or(placeholder).to_string()
}

/// Date range display, in order of precedence: precomputed duration,
/// `start–end`, `start–Present`, then the `Date` placeholder.
pub fn date_range(duration: Option<&str>, start: Option<&str>, end: Option<&str>) -> String {
    if let Some(duration) = non_blank(duration) {
        return duration.to_string();
    }
    match (non_blank(start), non_blank(end)) {
        (Some(start), Some(end)) => format!("{start}{RANGE_SEPARATOR}{end}"),
        (Some(start), None) => format!("{start}{RANGE_SEPARATOR}{PRESENT}"),
        _ => DATE.to_string(),
    }
}

/// True when any of the date inputs has content.
pub fn has_dates(duration: Option<&str>, start: Option<&str>, end: Option<&str>) -> bool {
    non_blank(duration).is_some() || non_blank(start).is_some() || non_blank(end).is_some()
}

// ────────────────────────────────────────────────────────────────────────────
// GPA heuristic
// ────────────────────────────────────────────────────────────────────────────

/// Grading scale guessed for a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradeScale {
    FourPoint,
    TenPoint,
    Percentage,
}

/// Guesses the scale of a bare grade value.
///
/// Ambiguous by nature: a "9" may be 9/10 or a typo for 90%. The thresholds
/// are kept as users have seen them; do not tighten without product input.
pub fn grade_scale(value: f64) -> GradeScale {
    if value <= 4.0 {
        GradeScale::FourPoint
    } else if value <= 10.0 {
        GradeScale::TenPoint
    } else {
        // (10, 100] is a percentage; anything above falls back to one too.
        GradeScale::Percentage
    }
}

/// Formats a raw GPA: explicit `/` or `%` values pass through, bare numbers get
/// a scale suffix, anything else passes through unchanged.
pub fn format_gpa(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains('/') || raw.contains('%') {
        return raw.to_string();
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => match grade_scale(value) {
            GradeScale::FourPoint => format!("{raw}/4.0"),
            GradeScale::TenPoint => format!("{raw}/10"),
            GradeScale::Percentage => format!("{raw}%"),
        },
        _ => raw.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill grouping
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGroup {
    pub category: String,
    pub names: Vec<String>,
}

/// Groups skills by `skillType` in first-seen order; uncategorised skills go to "Other".
pub fn group_skills(skills: &[Skill]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for skill in skills {
        let category = or_placeholder(skill.skill_type.as_deref(), OTHER_SKILLS);
        let name = or_placeholder(skill.name.as_deref(), SKILL);
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.names.push(name),
            None => groups.push(SkillGroup {
                category,
                names: vec![name],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, kind: Option<&str>) -> Skill {
        Skill {
            name: Some(name.to_string()),
            skill_type: kind.map(String::from),
            level: None,
            is_visible: true,
        }
    }

    // ── placeholders ────────────────────────────────────────────────────────

    #[test]
    fn test_blank_values_get_placeholder() {
        assert_eq!(or_placeholder(None, POSITION), "Position");
        assert_eq!(or_placeholder(Some("   "), COMPANY), "Company");
        assert_eq!(or_placeholder(Some(" Acme "), COMPANY), "Acme");
    }

    // ── date ranges ─────────────────────────────────────────────────────────

    #[test]
    fn test_date_range_precedence() {
        assert_eq!(date_range(Some("3 yrs"), Some("2019"), Some("2022")), "3 yrs");
        assert_eq!(date_range(None, Some("2019"), Some("2022")), "2019–2022");
        assert_eq!(date_range(Some(""), Some("2019"), None), "2019–Present");
        assert_eq!(date_range(None, None, Some("2022")), "Date");
        assert_eq!(date_range(None, None, None), "Date");
    }

    // ── GPA ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_gpa_documented_fixtures() {
        assert_eq!(format_gpa("3.8"), "3.8/4.0");
        assert_eq!(format_gpa("85"), "85%");
        assert_eq!(format_gpa("9.2"), "9.2/10");
    }

    #[test]
    fn test_gpa_explicit_scale_passes_through() {
        assert_eq!(format_gpa("3.5/5"), "3.5/5");
        assert_eq!(format_gpa("91%"), "91%");
        assert_eq!(format_gpa("First Class"), "First Class");
    }

    #[test]
    fn test_gpa_boundaries() {
        assert_eq!(grade_scale(4.0), GradeScale::FourPoint);
        assert_eq!(grade_scale(4.01), GradeScale::TenPoint);
        assert_eq!(grade_scale(10.0), GradeScale::TenPoint);
        assert_eq!(grade_scale(100.0), GradeScale::Percentage);
        assert_eq!(format_gpa("250"), "250%");
    }

    // ── skill grouping ──────────────────────────────────────────────────────

    #[test]
    fn test_group_skills_first_seen_order() {
        let skills = vec![
            skill("Rust", Some("Languages")),
            skill("Docker", None),
            skill("Go", Some("Languages")),
            skill("Postgres", Some("Databases")),
            skill("Git", Some("  ")),
        ];
        let groups = group_skills(&skills);
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["Languages", "Other", "Databases"]);
        assert_eq!(groups[0].names, vec!["Rust", "Go"]);
        assert_eq!(groups[1].names, vec!["Docker", "Git"]);
    }
}
