//! taglabel - an expandable text label with tappable hashtags and mentions.
//!
//! This is the main crate. It re-exports the core plumbing and exposes the
//! text model as [`text`].
//!
//! - [`tokens`]: hashtag and mention scanning
//! - [`decorate`]: font, paragraph and highlight attributes
//! - [`truncate`]: collapsing text to a line limit with a "more" link
//! - [`hit_test`]: mapping taps to text offsets and tokens
//! - [`widget`]: the [`ExpandableLabel`](widget::ExpandableLabel) state machine
//!
//! # Example
//!
//! ```
//! use taglabel::text::{FixedAdvanceLayout, Point, Rect};
//! use taglabel::widget::ExpandableLabel;
//!
//! let mut label = ExpandableLabel::new(FixedAdvanceLayout::new())
//!     .with_text("Shipping #taglabel today, thanks @ferris")
//!     .with_bounds(Rect::new(0.0, 0.0, 400.0, 40.0));
//!
//! label.mention_tapped.connect(|user| println!("tapped {}", user.text));
//! // "@ferris" starts 33 cells in; cells are 8px wide.
//! let target = label.tap(Point::new(33.0 * 8.0 + 4.0, 4.0));
//! assert!(target.token().is_some());
//! ```

pub use taglabel_core::*;

/// Styled text, fonts and line layout.
pub mod text {
    pub use taglabel_text::*;
}

pub mod decorate;
pub mod tokens;
pub mod truncate;
pub mod widget;
