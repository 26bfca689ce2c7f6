//! Styled text, fonts and line layout for taglabel.
//!
//! # Overview
//!
//! - [`StyledText`]: immutable text with contiguous attribute runs
//! - [`Font`], [`FontFamily`], [`FontWeight`]: font specifications and metrics
//! - [`LineLayout`]: the contract for wrapping styled text into [`VisualLine`]s
//! - [`ShapedLayout`]: cosmic-text backed shaping over a [`FontSystem`]
//! - [`FixedAdvanceLayout`]: deterministic layout independent of installed fonts
//! - [`Point`], [`Size`], [`Rect`], [`Color`]: geometry and color
//!
//! # Example
//!
//! ```
//! use taglabel_text::{FixedAdvanceLayout, LineLayout, StyledText};
//!
//! let mut layout = FixedAdvanceLayout::new();
//! let text = StyledText::plain("A line that wraps\nand a hard break");
//! for line in layout.layout(&text, 120.0) {
//!     println!("{:?} -> {:?}", line.range(), &text.as_str()[line.range()]);
//! }
//! ```

mod fixed_layout;
mod font;
mod font_system;
mod layout;
mod shaped_layout;
mod styled_text;
mod types;

pub use fixed_layout::{DEFAULT_ADVANCE_RATIO, FixedAdvanceLayout};
pub use font::{Font, FontFamily, FontStyle, FontWeight, LineMetrics};
pub use font_system::{FontSystem, FontSystemConfig};
pub use layout::{HorizontalAlign, LineGlyph, LineLayout, VisualLine};
pub use shaped_layout::ShapedLayout;
pub use styled_text::{ParagraphStyle, StyledRun, StyledText, TextAttributes};
pub use types::{Color, Point, Rect, Size};
