//! Positioned draw commands: the composer's output, the writer's input.

use crate::fonts::FontRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One positioned drawing instruction. Coordinates are in points from
/// the top-left corner; the writer flips to PDF's bottom-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Text {
        x: f32,
        y: f32,
        size: f32,
        role: FontRole,
        color: Rgb,
        text: String,
    },
    /// A horizontal rule.
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
}

impl DrawCmd {
    /// Top `y` coordinate of the command, for bounds assertions.
    pub fn y(&self) -> f32 {
        match self {
            DrawCmd::Text { y, .. } | DrawCmd::Rule { y, .. } | DrawCmd::Rect { y, .. } => *y,
        }
    }
}

/// The footer stamped on a page when it is left (or on the final page
/// when composition ends).
#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// One composed page. The footer is stamped exactly once per page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub commands: Vec<DrawCmd>,
    pub footer: Option<Footer>,
}
