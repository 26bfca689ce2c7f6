//! The expandable label widget.
//!
//! - [`ExpandableLabel`]: collapsing label with tappable tokens
//! - [`LabelConfig`]: its configuration cells

mod config;
mod expandable_label;

pub use config::{DEFAULT_COLLAPSED_LINES, LabelConfig};
pub use expandable_label::ExpandableLabel;
