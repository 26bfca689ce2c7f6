//! The line layout contract.
//!
//! A [`LineLayout`] wraps a [`StyledText`] into an ordered sequence of
//! [`VisualLine`]s for a container width. Truncation and hit testing both go
//! through the same implementation, so measured geometry always matches the
//! lines that end up on screen.
//!
//! Two implementations ship with this crate:
//!
//! - [`ShapedLayout`](crate::ShapedLayout): real glyph shaping via cosmic-text
//! - [`FixedAdvanceLayout`](crate::FixedAdvanceLayout): deterministic cell-based
//!   advances, for headless hosts and tests

use std::ops::Range;

use crate::font::Font;
use crate::styled_text::StyledText;
use crate::types::Size;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    /// Left-aligned text.
    #[default]
    Left,
    /// Center-aligned text.
    Center,
    /// Right-aligned text.
    Right,
    /// Justified text (positioned like left-aligned text).
    Justified,
}

impl HorizontalAlign {
    /// Fraction of the free horizontal space placed before a line.
    pub fn flush_factor(self) -> f32 {
        match self {
            HorizontalAlign::Left | HorizontalAlign::Justified => 0.0,
            HorizontalAlign::Center => 0.5,
            HorizontalAlign::Right => 1.0,
        }
    }
}

/// The horizontal extent of one grapheme cluster within a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGlyph {
    /// Byte range of the cluster in the laid-out text.
    pub cluster: Range<usize>,
    /// X position relative to the unaligned line start.
    pub x: f32,
    /// Advance width.
    pub width: f32,
}

impl LineGlyph {
    /// Get the rightmost x position of this glyph.
    pub fn x_end(&self) -> f32 {
        self.x + self.width
    }

    /// Check if a point is within this glyph's horizontal bounds.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x_end()
    }
}

/// A single wrapped line.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLine {
    /// Byte range covered, including trailing whitespace and line break.
    pub range: Range<usize>,
    /// Y offset of the top of the line box.
    pub top: f32,
    /// Height of the line box.
    pub height: f32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
    /// Typographic width, excluding trailing whitespace.
    pub width: f32,
    /// Glyph clusters in logical order.
    pub glyphs: Vec<LineGlyph>,
    /// Alignment requested by the paragraph this line belongs to.
    pub alignment: Option<HorizontalAlign>,
}

impl VisualLine {
    /// The byte range of the source text this line covers.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Y offset of the baseline.
    pub fn baseline(&self) -> f32 {
        self.top + self.ascent
    }

    /// Y offset of the bottom of the line box.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Horizontal start of the line inside a container of `container_width`.
    ///
    /// The paragraph's own alignment wins over `fallback`.
    pub fn pen_offset(&self, container_width: f32, fallback: HorizontalAlign) -> f32 {
        let align = self.alignment.unwrap_or(fallback);
        (container_width - self.width).max(0.0) * align.flush_factor()
    }

    /// Text offset of the cluster under `x` (relative to the line start).
    ///
    /// Positions left of the line map to its first cluster, positions past
    /// the last visible cluster map to that cluster.
    pub fn index_at_x(&self, x: f32) -> usize {
        if x < 0.0 {
            return self.range.start;
        }
        if let Some(glyph) = self.glyphs.iter().find(|g| g.contains_x(x)) {
            return glyph.cluster.start;
        }
        self.glyphs
            .iter()
            .rev()
            .find(|g| g.width > 0.0)
            .or(self.glyphs.last())
            .map_or(self.range.start, |g| g.cluster.start)
    }

    /// X position (relative to the line start) of the cluster at `offset`.
    pub fn x_for_offset(&self, offset: usize) -> f32 {
        if offset <= self.range.start {
            return 0.0;
        }
        for glyph in &self.glyphs {
            if glyph.cluster.start >= offset || glyph.cluster.contains(&offset) {
                return glyph.x;
            }
        }
        self.glyphs.last().map_or(0.0, LineGlyph::x_end)
    }
}

/// Breaks styled text into visual lines.
pub trait LineLayout {
    /// Lay out `text` into lines no wider than `width`.
    ///
    /// The returned ranges are contiguous, start at 0 and end at
    /// `text.len()`. Empty text yields no lines.
    fn layout(&mut self, text: &StyledText, width: f32) -> Vec<VisualLine>;

    /// Bounding box of `text` laid out at `width`.
    fn measure(&mut self, text: &StyledText, width: f32) -> Size {
        let lines = self.layout(text, width);
        let widest = lines.iter().map(|line| line.width).fold(0.0, f32::max);
        let height = lines.last().map_or(0.0, VisualLine::bottom);
        Size::new(widest, height)
    }
}

impl<L: LineLayout + ?Sized> LineLayout for Box<L> {
    fn layout(&mut self, text: &StyledText, width: f32) -> Vec<VisualLine> {
        (**self).layout(text, width)
    }

    fn measure(&mut self, text: &StyledText, width: f32) -> Size {
        (**self).measure(text, width)
    }
}

/// Vertical extent of a line box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineBox {
    pub height: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Compute the line box for `range`, taking the tallest run it overlaps.
pub(crate) fn line_box(text: &StyledText, range: Range<usize>, fallback: &Font) -> LineBox {
    let mut best: Option<LineBox> = None;
    for run in text.runs() {
        let run_range = run.range();
        let overlaps = run_range.start < range.end && range.start < run_range.end;
        let at_start = range.is_empty() && run_range.contains(&range.start);
        if !overlaps && !at_start {
            continue;
        }
        let attrs = run.attributes();
        let font = attrs.font.as_ref().unwrap_or(fallback);
        let candidate = box_for(font, attrs.paragraph.as_ref());
        if best.is_none_or(|b| candidate.height > b.height) {
            best = Some(candidate);
        }
    }
    best.unwrap_or_else(|| box_for(fallback, None))
}

fn box_for(font: &Font, paragraph: Option<&crate::ParagraphStyle>) -> LineBox {
    let metrics = font.line_metrics();
    let natural = metrics.line_height();
    let height = paragraph.map_or(natural, |p| p.resolve_line_height(natural));
    let descent = metrics.descent.min(height);
    LineBox {
        height,
        ascent: height - descent,
        descent,
    }
}

/// Alignment requested by the paragraph style at `offset`.
pub(crate) fn paragraph_alignment(text: &StyledText, offset: usize) -> Option<HorizontalAlign> {
    text.attributes_at(offset)
        .and_then(|attrs| attrs.paragraph.as_ref())
        .map(|p| p.alignment)
}

/// Make line ranges tile `0..len` exactly.
pub(crate) fn close_range_gaps(lines: &mut [VisualLine], len: usize) {
    let count = lines.len();
    if count == 0 {
        return;
    }
    lines[0].range.start = 0;
    for i in 1..count {
        let next_start = lines[i].range.start.max(lines[i - 1].range.start);
        lines[i].range.start = next_start;
        lines[i - 1].range.end = next_start;
    }
    lines[count - 1].range.end = len;
}
