//! Deterministic line layout with cell-based advances.
//!
//! Every grapheme cluster advances by its display width in cells (as
//! reported by `unicode-width`) times a fraction of the font size. Lines
//! wrap greedily at whitespace, words wider than the container break between
//! graphemes, and `\n` always ends a line. Trailing whitespace hangs past
//! the line width.
//!
//! The result does not depend on installed fonts, which makes it the layout
//! of choice for headless hosts and tests.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::font::Font;
use crate::layout::{LineGlyph, LineLayout, VisualLine, line_box, paragraph_alignment};
use crate::styled_text::StyledText;

/// Default advance of one cell as a fraction of the font size.
pub const DEFAULT_ADVANCE_RATIO: f32 = 0.5;

/// Cells taken by a tab character.
const TAB_CELLS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClusterKind {
    Newline,
    Space,
    Word,
}

#[derive(Debug, Clone)]
struct Cluster {
    start: usize,
    end: usize,
    advance: f32,
    kind: ClusterKind,
}

/// A [`LineLayout`] with predictable, font-independent metrics.
///
/// ```
/// use taglabel_text::{FixedAdvanceLayout, LineLayout, StyledText};
///
/// let mut layout = FixedAdvanceLayout::new();
/// // 16px default font, 8px per cell: ten cells fit in 80px.
/// let lines = layout.layout(&StyledText::plain("hello big world"), 80.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].range(), 0..10);
/// ```
#[derive(Debug, Clone)]
pub struct FixedAdvanceLayout {
    advance_ratio: f32,
    default_font: Font,
}

impl Default for FixedAdvanceLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedAdvanceLayout {
    /// Create a layout using the default advance ratio and font.
    pub fn new() -> Self {
        Self {
            advance_ratio: DEFAULT_ADVANCE_RATIO,
            default_font: Font::default(),
        }
    }

    /// Set the cell advance as a fraction of the font size.
    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio;
        self
    }

    /// Set the font used for runs without a font attribute.
    pub fn with_default_font(mut self, font: Font) -> Self {
        self.default_font = font;
        self
    }

    /// Advance of a single grapheme cluster at `font_size`.
    pub fn advance(&self, grapheme: &str, font_size: f32) -> f32 {
        if is_line_break(grapheme) {
            return 0.0;
        }
        let cells = if grapheme == "\t" {
            TAB_CELLS
        } else {
            grapheme.width()
        };
        cells as f32 * font_size * self.advance_ratio
    }

    fn clusters(&self, text: &StyledText) -> Vec<Cluster> {
        let runs = text.runs();
        let mut run_index = 0;
        text.as_str()
            .grapheme_indices(true)
            .map(|(start, grapheme)| {
                while run_index + 1 < runs.len() && runs[run_index].range().end <= start {
                    run_index += 1;
                }
                let size = runs
                    .get(run_index)
                    .and_then(|run| run.attributes().font.as_ref())
                    .map_or(self.default_font.size(), Font::size);
                Cluster {
                    start,
                    end: start + grapheme.len(),
                    advance: self.advance(grapheme, size),
                    kind: classify(grapheme),
                }
            })
            .collect()
    }
}

fn is_line_break(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r" | "\u{2028}" | "\u{2029}")
}

fn classify(grapheme: &str) -> ClusterKind {
    if is_line_break(grapheme) {
        return ClusterKind::Newline;
    }
    match grapheme.chars().next() {
        // No-break spaces glue their neighbours together.
        Some('\u{a0}' | '\u{202f}' | '\u{2007}') => ClusterKind::Word,
        Some(c) if c.is_whitespace() => ClusterKind::Space,
        _ => ClusterKind::Word,
    }
}

/// Greedily split clusters into lines, returning cluster index ranges.
fn break_lines(clusters: &[Cluster], width: f32) -> Vec<std::ops::Range<usize>> {
    let count = clusters.len();
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut pen = 0.0f32;
    let mut i = 0;

    while i < count {
        match clusters[i].kind {
            ClusterKind::Newline => {
                lines.push(line_start..i + 1);
                line_start = i + 1;
                pen = 0.0;
                i += 1;
            }
            ClusterKind::Space => {
                pen += clusters[i].advance;
                i += 1;
            }
            ClusterKind::Word => {
                let mut end = i;
                let mut word_width = 0.0;
                while end < count && clusters[end].kind == ClusterKind::Word {
                    word_width += clusters[end].advance;
                    end += 1;
                }

                if pen + word_width <= width {
                    pen += word_width;
                    i = end;
                } else if line_start < i {
                    lines.push(line_start..i);
                    line_start = i;
                    pen = 0.0;
                } else {
                    // The word alone is wider than the line: break between graphemes.
                    for k in i..end {
                        if pen + clusters[k].advance > width && k > line_start {
                            lines.push(line_start..k);
                            line_start = k;
                            pen = 0.0;
                        }
                        pen += clusters[k].advance;
                    }
                    i = end;
                }
            }
        }
    }

    if line_start < count {
        lines.push(line_start..count);
    }
    lines
}

impl LineLayout for FixedAdvanceLayout {
    fn layout(&mut self, text: &StyledText, width: f32) -> Vec<VisualLine> {
        if text.is_empty() {
            return Vec::new();
        }

        let clusters = self.clusters(text);
        let mut top = 0.0;
        let lines: Vec<VisualLine> = break_lines(&clusters, width)
            .into_iter()
            .map(|span| {
                let members = &clusters[span];
                let start = members.first().map_or(0, |c| c.start);
                let end = members.last().map_or(start, |c| c.end);

                let mut x = 0.0;
                let mut ink = 0.0;
                let glyphs = members
                    .iter()
                    .map(|c| {
                        let glyph = LineGlyph {
                            cluster: c.start..c.end,
                            x,
                            width: c.advance,
                        };
                        x += c.advance;
                        if c.kind == ClusterKind::Word {
                            ink = x;
                        }
                        glyph
                    })
                    .collect();

                let line_box = line_box(text, start..end, &self.default_font);
                let line = VisualLine {
                    range: start..end,
                    top,
                    height: line_box.height,
                    ascent: line_box.ascent,
                    descent: line_box.descent,
                    width: ink,
                    glyphs,
                    alignment: paragraph_alignment(text, start),
                };
                top += line_box.height;
                line
            })
            .collect();

        tracing::trace!(
            target: "taglabel::layout",
            width,
            line_count = lines.len(),
            "fixed-advance layout"
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HorizontalAlign;
    use crate::styled_text::{ParagraphStyle, TextAttributes};

    fn ranges(lines: &[VisualLine]) -> Vec<std::ops::Range<usize>> {
        lines.iter().map(VisualLine::range).collect()
    }

    fn assert_tiles(lines: &[VisualLine], len: usize) {
        assert_eq!(lines.first().map(|l| l.range.start), Some(0));
        assert_eq!(lines.last().map(|l| l.range.end), Some(len));
        for pair in lines.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let mut layout = FixedAdvanceLayout::new();
        assert!(layout.layout(&StyledText::new(), 100.0).is_empty());
        assert_eq!(layout.measure(&StyledText::new(), 100.0).height, 0.0);
    }

    #[test]
    fn test_single_line() {
        let mut layout = FixedAdvanceLayout::new();
        let lines = layout.layout(&StyledText::plain("hello"), 100.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].range(), 0..5);
        assert_eq!(lines[0].width, 40.0);
        assert_eq!(lines[0].glyphs.len(), 5);
    }

    #[test]
    fn test_word_wrap_hangs_spaces() {
        let mut layout = FixedAdvanceLayout::new();
        // Cells are 8px; "aaaa bbbb" needs 72px.
        let text = StyledText::plain("aaaa bbbb cc");
        let lines = layout.layout(&text, 72.0);
        assert_eq!(ranges(&lines), vec![0..10, 10..12]);
        assert_eq!(lines[0].width, 72.0);
        assert_eq!(lines[1].top, lines[0].bottom());
        assert_tiles(&lines, text.len());
    }

    #[test]
    fn test_long_word_breaks_between_graphemes() {
        let mut layout = FixedAdvanceLayout::new();
        let text = StyledText::plain("abcdefghij");
        let lines = layout.layout(&text, 32.0);
        assert_eq!(ranges(&lines), vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_hard_breaks() {
        let mut layout = FixedAdvanceLayout::new();
        let text = StyledText::plain("one\n\ntwo\n");
        let lines = layout.layout(&text, 200.0);
        assert_eq!(ranges(&lines), vec![0..4, 4..5, 5..9]);
        assert_eq!(lines[1].width, 0.0);
        assert_tiles(&lines, text.len());
    }

    #[test]
    fn test_wide_and_combining_graphemes() {
        let mut layout = FixedAdvanceLayout::new();
        // "e\u{301}" is one cluster of one cell, each CJK ideograph takes two.
        let text = StyledText::plain("e\u{301}\u{4e16}\u{754c}");
        let lines = layout.layout(&text, 200.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].glyphs.len(), 3);
        assert_eq!(lines[0].width, 40.0);
    }

    #[test]
    fn test_no_break_space_keeps_words_together() {
        let mut layout = FixedAdvanceLayout::new();
        let text = StyledText::plain("aaaa b\u{a0}cc");
        let lines = layout.layout(&text, 56.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(&text.as_str()[lines[1].range()], "b\u{a0}cc");
    }

    #[test]
    fn test_font_size_per_run() {
        let mut layout = FixedAdvanceLayout::new();
        let big = Font::default().with_size(32.0);
        let text = StyledText::from_pieces([
            ("ab", TextAttributes::new()),
            ("cd", TextAttributes::new().with_font(big.clone())),
        ]);
        let lines = layout.layout(&text, 500.0);
        assert_eq!(lines[0].width, 8.0 * 2.0 + 16.0 * 2.0);
        assert_eq!(lines[0].height, big.line_height());
    }

    #[test]
    fn test_paragraph_alignment_and_height() {
        let mut layout = FixedAdvanceLayout::new();
        let style = ParagraphStyle {
            min_line_height: 30.0,
            ..ParagraphStyle::default()
        }
        .with_alignment(HorizontalAlign::Center);
        let text = StyledText::styled("centered", TextAttributes::new().with_paragraph(style));
        let lines = layout.layout(&text, 500.0);
        assert_eq!(lines[0].alignment, Some(HorizontalAlign::Center));
        assert_eq!(lines[0].height, 30.0);
    }

    #[test]
    fn test_ranges_tile_text() {
        let mut layout = FixedAdvanceLayout::new();
        let text = StyledText::plain(
            "The quick brown fox jumps over the lazy dog.\nPack my box with five dozen liquor jugs.  ",
        );
        for width in [30.0, 57.0, 100.0, 161.0, 400.0] {
            let lines = layout.layout(&text, width);
            assert_tiles(&lines, text.len());
            let rebuilt: String = lines.iter().map(|l| &text.as_str()[l.range()]).collect();
            assert_eq!(rebuilt, text.as_str());
        }
    }

    #[test]
    fn test_measure() {
        let mut layout = FixedAdvanceLayout::new().with_advance_ratio(1.0);
        let size = layout.measure(&StyledText::plain("ab cd"), 16.0 * 3.0);
        assert_eq!(size.width, 32.0);
        assert_eq!(size.height, Font::default().line_height() * 2.0);
    }
}
