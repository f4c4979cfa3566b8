//! Content model for the Dossier rendering engine.
//!
//! This crate turns the untyped, semi-structured output of the upstream
//! analysis pipeline into a typed tree that both emitters (the live view
//! renderer and the PDF composer) consume:
//!
//! - [`classify`] maps an arbitrary JSON value onto the [`ContentNode`]
//!   tagged-variant model.
//! - [`clean_text`] normalizes raw text before display.
//! - [`fragments`] splits cleaned text into inline markdown fragments.
//!
//! The shared constants ([`HIDDEN_KEYS`], [`TITLE_KEY_PRIORITY`],
//! [`REPORT_ORDER`]) live here so both emitters enforce identical
//! structural rules.

pub mod classify;
pub mod keys;
pub mod markdown;
pub mod sanitize;
pub mod section;

pub use classify::{ContentNode, RecordCard, classify};
pub use keys::{
    DECISION_KEYWORDS, HIDDEN_KEYS, SUMMARY_KEYWORDS, TITLE_KEY_PRIORITY, is_decision_key,
    is_hidden_key, is_summary_key,
};
pub use markdown::{Fragment, fragments};
pub use sanitize::clean_text;
pub use section::{REPORT_ORDER, ReportMeta, ReportSection, ReportView, order_sections};
