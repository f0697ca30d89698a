//! Paginated surface: lays the document tree out on fixed-size pages.
//!
//! Text is measured with the static base-14 metric tables and wrapped
//! greedily. Every block is a keep-together group; a section title is glued
//! to its first group so it never ends a page alone. The header opens page 1
//! and flows onto further pages only if it is taller than one. Columns flow
//! independently, each starting below the header.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page; `y` on a `PageLine` is the text baseline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export::color::{ResolvedPalette, Rgb};
use crate::export::runs::{section_runs, RunKind, TextRun};
use crate::export::ExportError;
use crate::layout::font_metrics::FontMetricTable;
use crate::layout::page::MIN_TEXT_WIDTH_PT;
use crate::layout::page_break::{decide_break, BreakDecision, BreakRules};
use crate::layout::{get_metrics, DocumentTree, FontFamily, HeaderBlock, HeaderStyle, PageBox};
use crate::models::Spacing;
use crate::sections::Region;

/// Horizontal gap between columns of a split layout.
pub const COLUMN_GAP_PT: f32 = 18.0;
const BULLET_INDENT_PT: f32 = 10.0;
const BULLET: &str = "• ";
/// Baseline position within the font size (approximate ascent).
const ASCENT: f32 = 0.8;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLine {
    /// `None` for header lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RunKind>,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub number: usize,
    pub lines: Vec<PageLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocument {
    pub page_box: PageBox,
    pub font: FontFamily,
    pub background: Rgb,
    pub pages: Vec<Page>,
    /// Non-empty section ids in reading order (column by column).
    pub section_order: Vec<String>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line styling
// ────────────────────────────────────────────────────────────────────────────

/// Font size and weight for a run kind.
fn run_font(kind: RunKind) -> (f32, bool) {
    match kind {
        RunKind::SectionTitle => (12.5, true),
        RunKind::EntryTitle => (10.5, true),
        RunKind::EntrySubtitle => (10.0, false),
        RunKind::Meta | RunKind::Detail => (9.0, false),
        RunKind::Body | RunKind::Bullet => (10.0, false),
    }
}

fn run_color(kind: RunKind, palette: &ResolvedPalette) -> Rgb {
    match kind {
        RunKind::SectionTitle => palette.primary,
        RunKind::EntrySubtitle | RunKind::Meta | RunKind::Detail => palette.secondary,
        RunKind::EntryTitle | RunKind::Body | RunKind::Bullet => palette.text,
    }
}

/// A wrapped line waiting for a position.
#[derive(Debug, Clone)]
struct PendingLine {
    kind: Option<RunKind>,
    text: String,
    x_offset: f32,
    size: f32,
    bold: bool,
    color: Rgb,
    height: f32,
}

struct LineBuilder<'a> {
    metrics: &'a FontMetricTable,
    palette: &'a ResolvedPalette,
    line_height: f32,
}

impl LineBuilder<'_> {
    fn run(&self, run: &TextRun, width: f32) -> Vec<PendingLine> {
        let (size, bold) = run_font(run.kind);
        let color = run_color(run.kind, self.palette);
        let line = |text: String, x_offset: f32| PendingLine {
            kind: Some(run.kind),
            text,
            x_offset,
            size,
            bold,
            color,
            height: size * self.line_height,
        };

        if run.kind == RunKind::Bullet {
            let marker_w = self.metrics.measure_pt(BULLET, size, bold);
            let text_x = BULLET_INDENT_PT + marker_w;
            return self
                .metrics
                .wrap(&run.text, width - text_x, size, bold)
                .into_iter()
                .enumerate()
                .map(|(i, text)| {
                    if i == 0 {
                        line(format!("{BULLET}{text}"), BULLET_INDENT_PT)
                    } else {
                        line(text, text_x)
                    }
                })
                .collect();
        }

        self.metrics
            .wrap(&run.text, width, size, bold)
            .into_iter()
            .map(|text| line(text, 0.0))
            .collect()
    }

    fn runs(&self, runs: &[TextRun], width: f32) -> Vec<PendingLine> {
        runs.iter().flat_map(|run| self.run(run, width)).collect()
    }

    /// Header lines, centred when the style asks for it.
    fn header(&self, header: &HeaderBlock, width: f32) -> Vec<PendingLine> {
        let compact = header.style == HeaderStyle::Compact;
        let name_size = if compact { 16.0 } else { 20.0 };

        let mut specs: Vec<(String, f32, bool, Rgb)> =
            vec![(header.name.clone(), name_size, true, self.palette.primary)];
        if compact {
            let details: Vec<&str> = header
                .headline
                .iter()
                .map(String::as_str)
                .chain(header.contacts.iter().map(String::as_str))
                .collect();
            if !details.is_empty() {
                specs.push((details.join(" | "), 9.0, false, self.palette.secondary));
            }
        } else {
            if let Some(headline) = &header.headline {
                specs.push((headline.clone(), 11.0, false, self.palette.secondary));
            }
            if !header.contacts.is_empty() {
                specs.push((header.contacts.join(" | "), 9.0, false, self.palette.text));
            }
        }

        let mut lines = Vec::new();
        for (text, size, bold, color) in specs {
            for wrapped in self.metrics.wrap(&text, width, size, bold) {
                let x_offset = if header.style == HeaderStyle::Centered {
                    ((width - self.metrics.measure_pt(&wrapped, size, bold)) / 2.0).max(0.0)
                } else {
                    0.0
                };
                lines.push(PendingLine {
                    kind: None,
                    text: wrapped,
                    x_offset,
                    size,
                    bold,
                    color,
                    height: size * self.line_height,
                });
            }
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Column flow
// ────────────────────────────────────────────────────────────────────────────

/// One column's cursor across pages.
struct ColumnFlow {
    x: f32,
    margin: f32,
    bottom: f32,
    pages: Vec<Vec<PageLine>>,
    page: usize,
    y: f32,
    /// Nothing has been placed on the current page yet.
    fresh: bool,
}

impl ColumnFlow {
    /// A column whose first line goes at `top` on page index `page`.
    fn new(x: f32, page: usize, top: f32, page_box: &PageBox) -> Self {
        let mut flow = Self {
            x,
            margin: page_box.margin_pt,
            bottom: page_box.content_bottom(),
            pages: vec![Vec::new(); page + 1],
            page,
            y: top,
            fresh: true,
        };
        if flow.y >= flow.bottom {
            flow.next_page();
        }
        flow
    }

    /// At the top margin of a page, where moving on gains no space.
    fn at_page_top(&self) -> bool {
        self.fresh && self.y <= self.margin
    }

    fn next_page(&mut self) {
        self.page += 1;
        if self.pages.len() <= self.page {
            self.pages.push(Vec::new());
        }
        self.y = self.margin;
        self.fresh = true;
    }

    /// Vertical gap, dropped at the top of a page.
    fn gap(&mut self, points: f32) {
        if !self.fresh {
            self.y += points;
        }
    }

    fn place(&mut self, section_id: Option<&str>, line: &PendingLine) {
        let baseline = self.y + (line.height - line.size) / 2.0 + line.size * ASCENT;
        self.pages[self.page].push(PageLine {
            section_id: section_id.map(String::from),
            kind: line.kind,
            x: self.x + line.x_offset,
            y: baseline,
            size: line.size,
            bold: line.bold,
            color: line.color,
            text: line.text.clone(),
        });
        self.y += line.height;
        self.fresh = false;
    }

    /// Places a single line, starting a new page when it would cross the bottom.
    fn place_line(&mut self, section_id: Option<&str>, line: &PendingLine) {
        if !self.at_page_top() && self.y + line.height > self.bottom {
            self.next_page();
        }
        self.place(section_id, line);
    }

    fn place_group(&mut self, section_id: &str, mut lines: Vec<PendingLine>, rules: &BreakRules) {
        while !lines.is_empty() {
            let heights: Vec<f32> = lines.iter().map(|line| line.height).collect();
            let available = self.bottom - self.y;
            match decide_break(available, &heights, self.at_page_top(), rules) {
                BreakDecision::Place => {
                    for line in &lines {
                        self.place(Some(section_id), line);
                    }
                    lines.clear();
                }
                BreakDecision::MoveToNextPage => self.next_page(),
                BreakDecision::Split {
                    lines_on_current_page,
                } => {
                    let rest = lines.split_off(lines_on_current_page.min(lines.len()));
                    for line in &lines {
                        self.place(Some(section_id), line);
                    }
                    lines = rest;
                    if !lines.is_empty() {
                        self.next_page();
                    }
                }
            }
        }
    }
}

fn region_name(region: Region) -> &'static str {
    match region {
        Region::Main => "main",
        Region::Sidebar => "sidebar",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

pub fn export_paginated(
    tree: &DocumentTree,
    page_box: &PageBox,
) -> Result<PaginatedDocument, ExportError> {
    page_box.validate()?;
    let settings = &tree.style.settings;
    let palette = ResolvedPalette::parse(&settings.colors)?;
    let font = FontFamily::from_font_name(&settings.font);
    let spacing: Spacing = settings.spacing;
    let rules = BreakRules::default();

    let builder = LineBuilder {
        metrics: get_metrics(font),
        palette: &palette,
        line_height: spacing.line_height(),
    };

    // Column geometry first, so a bad layout fails before any text work.
    let content_width = page_box.content_width();
    let gutters = COLUMN_GAP_PT * tree.regions.len().saturating_sub(1) as f32;
    let mut columns: Vec<(f32, f32)> = Vec::with_capacity(tree.regions.len());
    let mut x = page_box.margin_pt;
    for region in &tree.regions {
        let width = (content_width - gutters) * region.width_fraction;
        if width.is_nan() || width < MIN_TEXT_WIDTH_PT {
            return Err(ExportError::ColumnTooNarrow {
                region: region_name(region.region),
                width_pt: width,
            });
        }
        columns.push((x, width));
        x += width + COLUMN_GAP_PT;
    }

    // Header: spans the full content width from the top of page 1.
    let mut header_flow = ColumnFlow::new(page_box.margin_pt, 0, page_box.margin_pt, page_box);
    for line in builder.header(&tree.header, content_width) {
        header_flow.place_line(None, &line);
    }
    let body_page = header_flow.page;
    let body_top = header_flow.y + spacing.section_gap_pt() * 1.5;

    let mut section_order = Vec::new();
    let mut flows: Vec<ColumnFlow> = Vec::with_capacity(columns.len() + 1);
    flows.push(header_flow);
    for (region, (x, width)) in tree.regions.iter().zip(columns) {
        let mut flow = ColumnFlow::new(x, body_page, body_top, page_box);
        for placed in &region.sections {
            let runs = section_runs(&placed.content);
            flow.gap(spacing.section_gap_pt());

            let title_lines = builder.run(&runs.title, width);
            let mut groups = runs.groups.iter();
            let mut first = title_lines;
            if let Some(group) = groups.next() {
                first.extend(builder.runs(group, width));
            }
            flow.place_group(&placed.id, first, &rules);
            for group in groups {
                flow.gap(spacing.entry_gap_pt());
                flow.place_group(&placed.id, builder.runs(group, width), &rules);
            }
            section_order.push(placed.id.clone());
        }
        flows.push(flow);
    }

    let page_count = flows.iter().map(|f| f.pages.len()).max().unwrap_or(1).max(1);
    let mut pages: Vec<Page> = (1..=page_count)
        .map(|number| Page {
            number,
            lines: Vec::new(),
        })
        .collect();
    // Header first, so each page reads header lines before column lines.
    for flow in flows {
        for (index, lines) in flow.pages.into_iter().enumerate() {
            pages[index].lines.extend(lines);
        }
    }

    debug!(
        "Paginated {} sections onto {} page(s) with {:?}",
        section_order.len(),
        page_count,
        font
    );

    Ok(PaginatedDocument {
        page_box: *page_box,
        font,
        background: palette.background,
        pages,
        section_order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compose, LayoutVariant, PageSize};
    use crate::models::{PersonalInfo, TemplateSettings};
    use crate::sections::{Block, EntryBlock, RenderedSection, SectionContent, StyleContext};

    fn entry(title: &str, bullets: usize) -> Block {
        Block::Entry(EntryBlock {
            title: title.to_string(),
            subtitle: Some("Company".into()),
            dates: Some("2020–Present".into()),
            bullets: (0..bullets)
                .map(|i| format!("Delivered outcome number {i} across several teams and quarters"))
                .collect(),
            ..Default::default()
        })
    }

    fn section(id: &str, blocks: Vec<Block>) -> (String, Vec<Block>) {
        (id.to_string(), blocks)
    }

    fn tree(variant: LayoutVariant, sections: Vec<(String, Vec<Block>)>) -> DocumentTree {
        let personal = PersonalInfo {
            name: Some("Ada Lovelace".into()),
            headline: Some("Analyst".into()),
            email: Some("ada@example.com".into()),
            ..Default::default()
        };
        tree_for(variant, &personal, sections)
    }

    fn tree_for(
        variant: LayoutVariant,
        personal: &PersonalInfo,
        sections: Vec<(String, Vec<Block>)>,
    ) -> DocumentTree {
        let layout = variant.descriptor();
        let rendered = sections
            .into_iter()
            .map(|(id, blocks)| RenderedSection {
                region_hint: layout.region_for(&id),
                content: Some(SectionContent {
                    title: id.clone(),
                    blocks,
                }),
                id,
            })
            .collect();
        compose(
            &layout,
            personal,
            StyleContext::new(layout.default_settings(), layout.title_case),
            rendered,
        )
    }

    // ── header ──

    #[test]
    fn test_header_on_first_page_only() {
        let doc = export_paginated(
            &tree(
                LayoutVariant::SingleColumn,
                vec![section(
                    "experience",
                    (0..30).map(|i| entry(&format!("Role {i}"), 3)).collect(),
                )],
            ),
            &PageBox::a4(),
        )
        .unwrap();
        assert!(doc.page_count() > 1);
        let header_pages: Vec<usize> = doc
            .pages
            .iter()
            .filter(|p| p.lines.iter().any(|l| l.section_id.is_none()))
            .map(|p| p.number)
            .collect();
        assert_eq!(header_pages, vec![1]);
        assert_eq!(doc.pages[0].lines[0].text, "Ada Lovelace");
        assert!(doc.pages[0].lines[0].bold);
    }

    #[test]
    fn test_centered_header_is_indented() {
        let doc = export_paginated(&tree(LayoutVariant::SingleColumn, Vec::new()), &PageBox::a4())
            .unwrap();
        assert!(doc.pages[0].lines[0].x > PageBox::a4().margin_pt);
        let doc = export_paginated(&tree(LayoutVariant::AtsOptimized, Vec::new()), &PageBox::a4())
            .unwrap();
        assert_eq!(doc.pages[0].lines[0].x, PageBox::a4().margin_pt);
    }

    #[test]
    fn test_oversized_header_flows_onto_next_page() {
        let page_box = PageBox::a4();
        let personal = PersonalInfo {
            name: Some("Ada Lovelace".into()),
            website: Some(vec!["example.com/portfolio"; 3000].join(" ")),
            ..Default::default()
        };
        let doc = export_paginated(
            &tree_for(
                LayoutVariant::SingleColumn,
                &personal,
                vec![section("experience", vec![entry("Engineer", 2)])],
            ),
            &page_box,
        )
        .unwrap();
        assert!(doc.page_count() > 1);
        for page in &doc.pages {
            for line in &page.lines {
                assert!(line.y <= page_box.content_bottom(), "{line:?} below bottom margin");
            }
        }
        // The body starts after the last header line.
        let last_header_page = doc
            .pages
            .iter()
            .filter(|p| p.lines.iter().any(|l| l.section_id.is_none()))
            .map(|p| p.number)
            .max()
            .unwrap();
        let first_body_page = doc
            .pages
            .iter()
            .find(|p| p.lines.iter().any(|l| l.section_id.is_some()))
            .map(|p| p.number)
            .unwrap();
        assert!(first_body_page >= last_header_page);
    }

    // ── flow ──

    #[test]
    fn test_lines_stay_inside_content_box() {
        let page_box = PageBox::new(PageSize::Letter, 48.0);
        let doc = export_paginated(
            &tree(
                LayoutVariant::TwoColumnA,
                vec![
                    section(
                        "experience",
                        (0..25).map(|i| entry(&format!("Role {i}"), 4)).collect(),
                    ),
                    section("skills", (0..40).map(|i| entry(&format!("Skill {i}"), 0)).collect()),
                ],
            ),
            &page_box,
        )
        .unwrap();
        for page in &doc.pages {
            for line in &page.lines {
                assert!(line.y <= page_box.content_bottom(), "{line:?} below bottom margin");
                assert!(line.y >= page_box.margin_pt);
                assert!(line.x >= page_box.margin_pt);
            }
        }
    }

    #[test]
    fn test_section_title_never_ends_a_page() {
        let sections: Vec<_> = (0..40)
            .map(|i| section(&format!("custom-{i}"), vec![entry("Entry", 2)]))
            .collect();
        let doc = export_paginated(&tree(LayoutVariant::SingleColumn, sections), &PageBox::a4())
            .unwrap();
        assert!(doc.page_count() > 1);
        for page in &doc.pages {
            let last = page.lines.last().unwrap();
            assert_ne!(
                last.kind,
                Some(RunKind::SectionTitle),
                "page {} ends on a title",
                page.number
            );
        }
    }

    #[test]
    fn test_entry_moves_whole_when_it_fits_next_page() {
        let sections = vec![section(
            "experience",
            (0..12).map(|i| entry(&format!("Role {i}"), 2)).collect(),
        )];
        let doc = export_paginated(&tree(LayoutVariant::SingleColumn, sections), &PageBox::a4())
            .unwrap();
        // An entry title is never separated from its subtitle.
        for page in &doc.pages {
            for (i, line) in page.lines.iter().enumerate() {
                if line.kind == Some(RunKind::EntryTitle) {
                    assert_eq!(
                        page.lines.get(i + 1).and_then(|l| l.kind),
                        Some(RunKind::EntrySubtitle)
                    );
                }
            }
        }
    }

    #[test]
    fn test_columns_start_level_below_header() {
        let doc = export_paginated(
            &tree(
                LayoutVariant::TwoColumnA,
                vec![
                    section("experience", vec![entry("Engineer", 1)]),
                    section("skills", vec![Block::Paragraph { text: "Rust".into() }]),
                ],
            ),
            &PageBox::a4(),
        )
        .unwrap();
        let title = |id: &str| {
            doc.pages[0]
                .lines
                .iter()
                .find(|l| l.section_id.as_deref() == Some(id))
                .unwrap()
                .clone()
        };
        let main = title("experience");
        let sidebar = title("skills");
        assert_eq!(main.y, sidebar.y);
        assert!(sidebar.x > main.x, "two-column-a keeps its sidebar on the right");
        assert_eq!(doc.section_order, vec!["experience", "skills"]);
    }

    #[test]
    fn test_bullets_are_marked_and_indented() {
        let doc = export_paginated(
            &tree(
                LayoutVariant::SingleColumn,
                vec![section("experience", vec![entry("Engineer", 1)])],
            ),
            &PageBox::a4(),
        )
        .unwrap();
        let bullet = doc.pages[0]
            .lines
            .iter()
            .find(|l| l.kind == Some(RunKind::Bullet))
            .unwrap();
        assert!(bullet.text.starts_with("• "));
        assert_eq!(bullet.x, PageBox::a4().margin_pt + BULLET_INDENT_PT);
    }

    #[test]
    fn test_flow_gap_dropped_at_page_top() {
        let mut flow = ColumnFlow::new(36.0, 0, 100.0, &PageBox::a4());
        flow.gap(20.0);
        assert_eq!(flow.y, 100.0);
    }

    #[test]
    fn test_flow_starting_past_bottom_moves_to_next_page() {
        let page_box = PageBox::a4();
        let flow = ColumnFlow::new(36.0, 0, page_box.content_bottom() + 5.0, &page_box);
        assert_eq!(flow.page, 1);
        assert_eq!(flow.y, page_box.margin_pt);
        assert!(flow.at_page_top());
    }

    #[test]
    fn test_group_below_header_respects_orphan_rules() {
        let page_box = PageBox::a4();
        let line = PendingLine {
            kind: Some(RunKind::Body),
            text: "line".into(),
            x_offset: 0.0,
            size: 10.0,
            bold: false,
            color: Rgb::BLACK,
            height: 13.0,
        };
        // Room for one line only: the group moves instead of leaving an orphan.
        let mut flow = ColumnFlow::new(36.0, 0, page_box.content_bottom() - 14.0, &page_box);
        flow.place_group("experience", vec![line; 4], &BreakRules::default());
        assert!(flow.pages[0].is_empty());
        assert_eq!(flow.pages[1].len(), 4);
    }

    // ── failures ──

    #[test]
    fn test_narrow_sidebar_is_rejected() {
        let page_box = PageBox {
            width_pt: 222.0,
            height_pt: 842.0,
            margin_pt: 36.0,
        };
        let result = export_paginated(&tree(LayoutVariant::TwoColumnA, Vec::new()), &page_box);
        assert!(matches!(
            result,
            Err(ExportError::ColumnTooNarrow { region: "sidebar", .. })
        ));
    }

    #[test]
    fn test_degenerate_page_box_is_rejected() {
        let page_box = PageBox {
            width_pt: 100.0,
            height_pt: 842.0,
            margin_pt: 40.0,
        };
        assert!(matches!(
            export_paginated(&tree(LayoutVariant::SingleColumn, Vec::new()), &page_box),
            Err(ExportError::InvalidPageBox(_))
        ));
    }

    #[test]
    fn test_bad_palette_is_rejected() {
        let mut doc_tree = tree(LayoutVariant::Minimalist, Vec::new());
        doc_tree.style.settings = TemplateSettings::default();
        doc_tree.style.settings.colors.background = "#12345".into();
        assert!(matches!(
            export_paginated(&doc_tree, &PageBox::a4()),
            Err(ExportError::InvalidColor { field: "background", .. })
        ));
    }
}
