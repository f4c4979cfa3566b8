//! Document layout composer and page-flow controller.
//!
//! Walks the classified content tree and emits positioned draw commands
//! into pages. All coordinates are points from the top-left corner.
//! Pagination happens here; the writer only serializes what it is
//! given.

use crate::cursor::{DocumentCursor, PageFlow};
use crate::fonts::FontSet;
use crate::labels::{Labels, Language};
use crate::output::{DrawCmd, Footer, Page, Rgb};
use dossier_content::{
    ContentNode, Fragment, ReportMeta, ReportSection, clean_text, classify, fragments,
    is_decision_key, is_summary_key, order_sections,
};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 40.0;
pub const LINE_HEIGHT: f32 = 14.0;

/// Values at or above this length always render as a block.
pub const INLINE_VALUE_MAX_CHARS: usize = 80;

const TITLE_SIZE: f32 = 18.0;
const HEADER_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 8.0;

/// Indent added per nested record level.
const FIELD_INDENT: f32 = 15.0;
/// Indent added per list-item level.
const LIST_INDENT: f32 = 10.0;

const SECTION_BAR_HEIGHT: f32 = 18.0;
const BOX_PADDING: f32 = 5.0;

const INK: Rgb = Rgb::new(33, 33, 33);
const MUTED: Rgb = Rgb::new(97, 97, 97);
const ACCENT: Rgb = Rgb::new(21, 101, 192);
const BAR_FILL: Rgb = Rgb::new(232, 234, 246);
const BOX_FILL: Rgb = Rgb::new(243, 246, 250);
const RULE_COLOR: Rgb = Rgb::new(189, 189, 189);

/// Composes one report into positioned pages. One composer per export;
/// it owns its cursor, so concurrent exports cannot interfere.
pub struct Composer {
    fonts: FontSet,
    labels: &'static Labels,
    cursor: DocumentCursor,
    flow: PageFlow,
    pages: Vec<Page>,
    current: Page,
}

impl Composer {
    pub fn new(fonts: FontSet, language: Language) -> Self {
        Self {
            fonts,
            labels: language.labels(),
            cursor: DocumentCursor::new(PAGE_WIDTH, PAGE_HEIGHT, MARGIN),
            flow: PageFlow::Drawing,
            pages: Vec::new(),
            current: Page::default(),
        }
    }

    /// Walks every section in canonical order and returns the composed
    /// pages. Every page carries exactly one footer stamp.
    pub fn compose(mut self, meta: &ReportMeta, sections: &[ReportSection]) -> Vec<Page> {
        self.draw_header(meta);
        if let Some(decision) = &meta.decision {
            self.draw_recommendation(decision);
        }

        for section in order_sections(sections) {
            self.draw_section_bar(&section.label);
            self.draw_node(&classify(&section.text), MARGIN);
            self.advance(LINE_HEIGHT / 2.0);
        }

        // The per-break stamp only covers pages being left; the final
        // page is stamped here.
        self.stamp_footer();
        self.pages.push(self.current);
        self.pages
    }

    fn draw_header(&mut self, meta: &ReportMeta) {
        let title = format!("{} {}", meta.product, self.labels.report_title);
        self.draw_line_sized(&title, MARGIN, TITLE_SIZE, true, INK, TITLE_SIZE + 6.0);

        let byline = format!(
            "{}: {}    {}: {}",
            self.labels.ticker, meta.ticker, self.labels.analysis_date, meta.analysis_date
        );
        self.draw_line(&byline, MARGIN, BODY_SIZE, false, MUTED);

        self.ensure_room(8.0);
        self.current.commands.push(DrawCmd::Rule {
            x: MARGIN,
            y: self.cursor.y,
            width: self.cursor.width_from(MARGIN),
            thickness: 1.0,
            color: RULE_COLOR,
        });
        self.advance(8.0);
    }

    fn draw_recommendation(&mut self, decision: &str) {
        let text = format!("{}: {}", self.labels.recommendation, decision);
        self.draw_line(&text, MARGIN, HEADER_SIZE, true, ACCENT);
        self.advance(4.0);
    }

    fn draw_section_bar(&mut self, label: &str) {
        self.ensure_room(SECTION_BAR_HEIGHT + LINE_HEIGHT);
        self.current.commands.push(DrawCmd::Rect {
            x: MARGIN,
            y: self.cursor.y,
            width: self.cursor.width_from(MARGIN),
            height: SECTION_BAR_HEIGHT,
            fill: Some(BAR_FILL),
            stroke: None,
        });
        let role = self.fonts.select(label, true);
        self.current.commands.push(DrawCmd::Text {
            x: MARGIN + 4.0,
            y: self.cursor.y + 4.0,
            size: HEADER_SIZE,
            role,
            color: INK,
            text: label.to_string(),
        });
        self.advance(SECTION_BAR_HEIGHT + 4.0);
    }

    fn draw_node(&mut self, node: &ContentNode, x: f32) {
        match node {
            ContentNode::Primitive(text) | ContentNode::Markdown(text) => {
                self.draw_text_block(text, x);
            }
            ContentNode::PrimitiveList(tags) => {
                if tags.is_empty() {
                    self.draw_line(self.labels.empty_list, x, BODY_SIZE, false, MUTED);
                } else {
                    for tag in tags {
                        self.draw_wrapped(&format!("• {tag}"), x + LIST_INDENT, BODY_SIZE, false, INK);
                    }
                }
            }
            ContentNode::RecordList(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        self.ensure_room(6.0);
                        self.current.commands.push(DrawCmd::Rule {
                            x,
                            y: self.cursor.y,
                            width: self.cursor.width_from(x),
                            thickness: 0.5,
                            color: RULE_COLOR,
                        });
                        self.advance(6.0);
                    }
                    if let Some(title) = &card.title {
                        self.draw_wrapped(title, x, BODY_SIZE, true, INK);
                    }
                    self.draw_node(&card.body, x + LIST_INDENT);
                }
            }
            ContentNode::Record(fields) => {
                for (key, value) in fields {
                    if is_decision_key(key) || is_summary_key(key) {
                        self.draw_emphasized_field(key, value, x);
                    } else {
                        self.draw_field(key, value, x);
                    }
                }
            }
        }
    }

    /// Cleans and fragments prose, drawing bullets and paragraphs with
    /// word wrap.
    fn draw_text_block(&mut self, text: &str, x: f32) {
        for fragment in fragments(&clean_text(text)) {
            match fragment {
                Fragment::Bullet(line) => {
                    self.draw_wrapped(&format!("• {line}"), x, BODY_SIZE, false, INK);
                }
                Fragment::Paragraph(line) => {
                    self.draw_wrapped(&line, x, BODY_SIZE, false, INK);
                }
                Fragment::Break => {
                    self.ensure_room(LINE_HEIGHT / 2.0);
                    self.advance(LINE_HEIGHT / 2.0);
                }
            }
        }
    }

    /// Renders one record field, inline when the value is short and
    /// fits the remaining width, otherwise as a labeled block. Fields
    /// whose value cleans to nothing are skipped entirely rather than
    /// leaving a dangling label.
    fn draw_field(&mut self, key: &str, value: &ContentNode, x: f32) {
        if let Some(text) = primitive_text(value)
            && text.trim().is_empty()
        {
            return;
        }
        let label = field_label(key);
        if let Some(text) = inline_candidate(value) {
            let prefix = format!("{label}: ");
            let label_width = self.fonts.measure_line(&prefix, BODY_SIZE, true);
            let value_width = self.fonts.measure_line(&text, BODY_SIZE, false);
            if text.chars().count() < INLINE_VALUE_MAX_CHARS
                && label_width + value_width <= self.cursor.width_from(x)
            {
                self.draw_inline_pair(&prefix, &text, x);
                return;
            }
        }

        self.draw_line(&format!("{label}:"), x, BODY_SIZE, true, INK);
        self.draw_node(value, x + FIELD_INDENT);
    }

    /// Label and value on one line, label in bold. Reserved as a unit
    /// so a page break cannot split the pair.
    fn draw_inline_pair(&mut self, prefix: &str, value: &str, x: f32) {
        self.ensure_room(LINE_HEIGHT);
        let label_width = self.fonts.measure_line(prefix, BODY_SIZE, true);
        let label_role = self.fonts.select(prefix, true);
        let value_role = self.fonts.select(value, false);
        self.current.commands.push(DrawCmd::Text {
            x,
            y: self.cursor.y,
            size: BODY_SIZE,
            role: label_role,
            color: INK,
            text: prefix.trim_end().to_string(),
        });
        self.current.commands.push(DrawCmd::Text {
            x: x + label_width,
            y: self.cursor.y,
            size: BODY_SIZE,
            role: value_role,
            color: INK,
            text: value.to_string(),
        });
        self.advance(LINE_HEIGHT);
    }

    /// Decision/summary fields get a bordered, shaded box. Values too
    /// deep to box (nested structures) or too tall for a whole page
    /// fall back to plain field rendering.
    fn draw_emphasized_field(&mut self, key: &str, value: &ContentNode, x: f32) {
        let Some(text) = emphasis_candidate(value) else {
            self.draw_field(key, value, x);
            return;
        };

        let label = field_label(key);
        let width = self.cursor.width_from(x);
        let inner_width = width - 2.0 * BOX_PADDING;
        let lines = self.wrap_text(&text, BODY_SIZE, false, inner_width);
        let height = (lines.len() as f32 + 1.0) * LINE_HEIGHT + 2.0 * BOX_PADDING;

        let page_capacity = self.cursor.limit() - self.cursor.margin;
        if height > page_capacity {
            self.draw_field(key, value, x);
            return;
        }
        self.ensure_room(height + 4.0);

        self.current.commands.push(DrawCmd::Rect {
            x,
            y: self.cursor.y,
            width,
            height,
            fill: Some(BOX_FILL),
            stroke: Some(ACCENT),
        });
        self.cursor.y += BOX_PADDING;
        self.push_text(&format!("{label}:"), x + BOX_PADDING, BODY_SIZE, true, ACCENT);
        self.cursor.y += LINE_HEIGHT;
        for line in lines {
            self.push_text(&line, x + BOX_PADDING, BODY_SIZE, false, INK);
            self.cursor.y += LINE_HEIGHT;
        }
        self.cursor.y += BOX_PADDING;
        self.advance(4.0);
    }

    /// Word-wraps and draws a run of text, breaking pages as needed.
    fn draw_wrapped(&mut self, text: &str, x: f32, size: f32, bold: bool, color: Rgb) {
        let max_width = self.cursor.width_from(x);
        for line in self.wrap_text(text, size, bold, max_width) {
            self.draw_line(&line, x, size, bold, color);
        }
    }

    fn draw_line(&mut self, text: &str, x: f32, size: f32, bold: bool, color: Rgb) {
        self.draw_line_sized(text, x, size, bold, color, LINE_HEIGHT);
    }

    fn draw_line_sized(&mut self, text: &str, x: f32, size: f32, bold: bool, color: Rgb, advance: f32) {
        self.ensure_room(advance);
        self.push_text(text, x, size, bold, color);
        self.advance(advance);
    }

    fn push_text(&mut self, text: &str, x: f32, size: f32, bold: bool, color: Rgb) {
        let role = self.fonts.select(text, bold);
        self.current.commands.push(DrawCmd::Text {
            x,
            y: self.cursor.y,
            size,
            role,
            color,
            text: text.to_string(),
        });
    }

    /// Splits `text` into lines no wider than `max_width`. Words that
    /// alone exceed the width (long Thai or CJK runs have no spaces)
    /// are split at character granularity.
    fn wrap_text(&self, text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
        if max_width <= 0.0 {
            return text.lines().map(str::to_string).collect();
        }
        let mut lines = Vec::new();
        for paragraph in text.lines() {
            if paragraph.trim().is_empty() {
                lines.push(String::new());
                continue;
            }
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };
                if self.fonts.measure_line(&candidate, size, bold) <= max_width {
                    current = candidate;
                    continue;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if self.fonts.measure_line(word, size, bold) <= max_width {
                    current = word.to_string();
                } else {
                    current = self.split_long_word(word, size, bold, max_width, &mut lines);
                }
            }
            lines.push(current);
        }
        lines
    }

    fn split_long_word(
        &self,
        word: &str,
        size: f32,
        bold: bool,
        max_width: f32,
        lines: &mut Vec<String>,
    ) -> String {
        let mut current = String::new();
        for c in word.chars() {
            let mut candidate = current.clone();
            candidate.push(c);
            if !current.is_empty() && self.fonts.measure_line(&candidate, size, bold) > max_width {
                lines.push(std::mem::take(&mut current));
                current.push(c);
            } else {
                current = candidate;
            }
        }
        current
    }

    /// Breaks the page first when `height` would cross the bottom
    /// margin. Style state does not persist across the boundary; every
    /// command carries its own font, size, and color.
    fn ensure_room(&mut self, height: f32) {
        if self.flow == PageFlow::NewPageStarted {
            self.flow = PageFlow::Drawing;
        }
        if self.cursor.would_overflow(height) {
            self.flow = PageFlow::PageBreakPending;
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        self.stamp_footer();
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor.start_new_page();
        self.flow = PageFlow::NewPageStarted;
    }

    fn stamp_footer(&mut self) {
        let text = format!("{} {}", self.labels.page, self.cursor.page_index + 1);
        self.current.footer = Some(Footer {
            text,
            x: self.cursor.page_width - MARGIN - 40.0,
            y: self.cursor.page_height - MARGIN / 2.0 - FOOTER_SIZE,
            size: FOOTER_SIZE,
        });
    }

    fn advance(&mut self, height: f32) {
        self.cursor.y += height;
    }
}

/// A value is an inline candidate when it cleans to a single line of
/// prose.
fn inline_candidate(value: &ContentNode) -> Option<String> {
    let text = primitive_text(value)?;
    if text.contains('\n') || text.is_empty() {
        return None;
    }
    Some(text)
}

/// Emphasized boxes only hold prose; structured values fall back to
/// plain field rendering.
fn emphasis_candidate(value: &ContentNode) -> Option<String> {
    primitive_text(value).filter(|t| !t.is_empty())
}

fn primitive_text(value: &ContentNode) -> Option<String> {
    match value {
        ContentNode::Primitive(t) => Some(t.trim().to_string()),
        ContentNode::Markdown(t) => Some(clean_text(t)),
        _ => None,
    }
}

/// Title-cases a key for display: `risk_level` becomes `Risk Level`.
fn field_label(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
