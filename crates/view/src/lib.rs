//! The view target: walks a classified [`ContentNode`] tree into nested
//! view nodes for the host UI.
//!
//! Rendering is a pure mapping with one rule per variant. The tree is
//! rebuilt fresh on every call and never cached; nothing here performs
//! I/O or mutates shared state.

use dossier_content::{
    ContentNode, Fragment, ReportSection, clean_text, fragments, is_decision_key, is_summary_key,
    order_sections,
};

/// Placeholder shown for an empty tag group.
pub const EMPTY_LIST_PLACEHOLDER: &str = "None";

/// One node of the rendered view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// Plain scalar text.
    Text(String),
    /// A prose line.
    Paragraph(String),
    /// A bulleted line (marker glyph supplied by the host).
    Bullet(String),
    /// An explicit blank line.
    LineBreak,
    /// A single flat container of tags.
    TagGroup(Vec<String>),
    /// Placeholder rendered instead of an empty container.
    Placeholder(String),
    /// Grid of independent cards.
    CardGrid(Vec<CardView>),
    /// Vertical stack of labeled fields in source insertion order.
    FieldStack(Vec<FieldView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: Option<String>,
    pub body: Vec<ViewNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub label: String,
    pub depth: usize,
    pub emphasis: Emphasis,
    pub body: Vec<ViewNode>,
}

/// Presentation weight of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    /// Bordered presentation for decision/recommendation and
    /// summary/overview fields.
    Highlight,
}

/// One rendered report section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    /// 1-based position in the rendered report.
    pub index: usize,
    pub label: String,
    pub body: Vec<ViewNode>,
}

/// Renders all sections in canonical order.
pub fn render_sections(sections: &[ReportSection]) -> Vec<SectionView> {
    order_sections(sections)
        .iter()
        .enumerate()
        .map(|(i, section)| SectionView {
            index: i + 1,
            label: section.label.clone(),
            body: render_node(&dossier_content::classify(&section.text), 0),
        })
        .collect()
}

/// Renders one classified node at the given nesting depth.
pub fn render_node(node: &ContentNode, depth: usize) -> Vec<ViewNode> {
    match node {
        ContentNode::Primitive(text) => {
            if text.is_empty() {
                vec![]
            } else {
                vec![ViewNode::Text(text.clone())]
            }
        }
        ContentNode::Markdown(text) => render_markdown(text),
        ContentNode::PrimitiveList(tags) => {
            if tags.is_empty() {
                vec![ViewNode::Placeholder(EMPTY_LIST_PLACEHOLDER.to_string())]
            } else {
                vec![ViewNode::TagGroup(tags.clone())]
            }
        }
        ContentNode::RecordList(cards) => {
            let cards = cards
                .iter()
                .map(|card| CardView {
                    title: card.title.clone(),
                    body: render_node(&card.body, depth + 1),
                })
                .collect();
            vec![ViewNode::CardGrid(cards)]
        }
        ContentNode::Record(fields) => {
            let fields = fields
                .iter()
                .map(|(key, value)| FieldView {
                    label: display_label(key),
                    depth,
                    emphasis: field_emphasis(key),
                    body: render_node(value, depth + 1),
                })
                .collect();
            vec![ViewNode::FieldStack(fields)]
        }
    }
}

fn render_markdown(text: &str) -> Vec<ViewNode> {
    fragments(&clean_text(text))
        .into_iter()
        .map(|fragment| match fragment {
            Fragment::Bullet(t) => ViewNode::Bullet(t),
            Fragment::Paragraph(t) => ViewNode::Paragraph(t),
            Fragment::Break => ViewNode::LineBreak,
        })
        .collect()
}

fn field_emphasis(key: &str) -> Emphasis {
    if is_decision_key(key) || is_summary_key(key) {
        Emphasis::Highlight
    } else {
        Emphasis::Plain
    }
}

fn display_label(key: &str) -> String {
    key.replace('_', " ")
}
