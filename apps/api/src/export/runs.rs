//! Flattening of section content into styled text runs.
//!
//! Both export surfaces paint from these runs and nothing else, so the
//! screen and the page show the same text in the same order.

use serde::{Deserialize, Serialize};

use crate::sections::{Block, EntryBlock, SectionContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunKind {
    SectionTitle,
    EntryTitle,
    EntrySubtitle,
    /// Location and date range of an entry.
    Meta,
    Detail,
    Body,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub kind: RunKind,
    pub text: String,
}

impl TextRun {
    fn new(kind: RunKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A section as runs: the title plus keep-together groups (one per block).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRuns {
    pub title: TextRun,
    pub groups: Vec<Vec<TextRun>>,
}

pub fn section_runs(content: &SectionContent) -> SectionRuns {
    SectionRuns {
        title: TextRun::new(RunKind::SectionTitle, content.title.clone()),
        groups: content
            .blocks
            .iter()
            .map(block_runs)
            .filter(|group| !group.is_empty())
            .collect(),
    }
}

fn block_runs(block: &Block) -> Vec<TextRun> {
    match block {
        Block::Paragraph { text } => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| TextRun::new(RunKind::Body, line))
            .collect(),
        Block::Labeled { label, text } => {
            vec![TextRun::new(RunKind::Body, format!("{label}: {text}"))]
        }
        Block::List { items } => items
            .iter()
            .map(|item| TextRun::new(RunKind::Bullet, item.clone()))
            .collect(),
        Block::Entry(entry) => entry_runs(entry),
    }
}

fn entry_runs(entry: &EntryBlock) -> Vec<TextRun> {
    let mut runs = vec![TextRun::new(RunKind::EntryTitle, entry.title.clone())];
    if let Some(subtitle) = &entry.subtitle {
        runs.push(TextRun::new(RunKind::EntrySubtitle, subtitle.clone()));
    }
    let meta: Vec<&str> = [entry.location.as_deref(), entry.dates.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        runs.push(TextRun::new(RunKind::Meta, meta.join(" · ")));
    }
    if let Some(detail) = &entry.detail {
        runs.push(TextRun::new(RunKind::Detail, detail.clone()));
    }
    if let Some(body) = &entry.body {
        runs.extend(
            body.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| TextRun::new(RunKind::Body, line)),
        );
    }
    runs.extend(
        entry
            .bullets
            .iter()
            .map(|bullet| TextRun::new(RunKind::Bullet, bullet.clone())),
    );
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_runs_in_reading_order() {
        let content = SectionContent {
            title: "Experience".into(),
            blocks: vec![Block::Entry(EntryBlock {
                title: "Engineer".into(),
                subtitle: Some("Acme".into()),
                location: Some("Berlin".into()),
                dates: Some("2020–Present".into()),
                body: Some("Built things".into()),
                bullets: vec!["Shipped v2".into()],
                ..Default::default()
            })],
        };
        let runs = section_runs(&content);
        assert_eq!(runs.title.kind, RunKind::SectionTitle);
        let kinds: Vec<RunKind> = runs.groups[0].iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RunKind::EntryTitle,
                RunKind::EntrySubtitle,
                RunKind::Meta,
                RunKind::Body,
                RunKind::Bullet
            ]
        );
        assert_eq!(runs.groups[0][2].text, "Berlin · 2020–Present");
    }

    #[test]
    fn test_labeled_block_flattens() {
        let content = SectionContent {
            title: "Skills".into(),
            blocks: vec![Block::Labeled {
                label: "Languages".into(),
                text: "Rust, Go".into(),
            }],
        };
        assert_eq!(section_runs(&content).groups[0][0].text, "Languages: Rust, Go");
    }

    #[test]
    fn test_empty_blocks_produce_no_group() {
        let content = SectionContent {
            title: "Notes".into(),
            blocks: vec![
                Block::List { items: Vec::new() },
                Block::Paragraph { text: "one\n\ntwo".into() },
            ],
        };
        let runs = section_runs(&content);
        assert_eq!(runs.groups.len(), 1);
        assert_eq!(runs.groups[0].len(), 2);
    }
}
