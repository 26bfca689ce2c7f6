//! Line layout backed by cosmic-text shaping.
//!
//! Each cosmic-text layout run becomes one [`VisualLine`]. Glyph clusters
//! are reported by cosmic-text relative to their paragraph, so they are
//! shifted back to offsets in the full text before being stored.

use std::ops::Range;

use cosmic_text::{Attrs, Buffer, Metrics, Shaping, Wrap};

use crate::font::Font;
use crate::font_system::FontSystem;
use crate::layout::{LineGlyph, LineLayout, VisualLine, close_range_gaps, paragraph_alignment};
use crate::styled_text::StyledText;

/// A [`LineLayout`] that shapes text with real fonts.
///
/// ```no_run
/// use taglabel_text::{FontSystem, LineLayout, ShapedLayout, StyledText};
///
/// let mut layout = ShapedLayout::new(FontSystem::new());
/// let lines = layout.layout(&StyledText::plain("Hello #world"), 200.0);
/// println!("{} lines", lines.len());
/// ```
pub struct ShapedLayout {
    font_system: FontSystem,
    default_font: Font,
}

impl ShapedLayout {
    /// Create a layout over the given font system.
    pub fn new(font_system: FontSystem) -> Self {
        Self {
            font_system,
            default_font: Font::default(),
        }
    }

    /// Set the font used for runs without a font attribute.
    pub fn with_default_font(mut self, font: Font) -> Self {
        self.default_font = font;
        self
    }

    /// Access the font system, e.g. to load additional fonts.
    pub fn font_system_mut(&mut self) -> &mut FontSystem {
        &mut self.font_system
    }
}

/// Byte offset at which each `\n`-separated paragraph starts.
fn paragraph_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Shift paragraph-relative glyph clusters `(cluster, x, width)` by `base`.
fn absolute_glyphs<I>(base: usize, glyphs: I) -> Vec<LineGlyph>
where
    I: IntoIterator<Item = (Range<usize>, f32, f32)>,
{
    glyphs
        .into_iter()
        .map(|(cluster, x, width)| LineGlyph {
            cluster: (base + cluster.start)..(base + cluster.end),
            x,
            width,
        })
        .collect()
}

/// Smallest range covering every cluster, in any visual order.
/// A line without glyphs is the empty range at `base`.
fn cluster_extent(glyphs: &[LineGlyph], base: usize) -> Range<usize> {
    let start = glyphs.iter().map(|g| g.cluster.start).min().unwrap_or(base);
    let end = glyphs.iter().map(|g| g.cluster.end).max().unwrap_or(start);
    start..end
}

impl LineLayout for ShapedLayout {
    fn layout(&mut self, text: &StyledText, width: f32) -> Vec<VisualLine> {
        if text.is_empty() {
            return Vec::new();
        }

        let default_font = self.default_font.clone();
        let metrics = Metrics::new(default_font.size(), default_font.line_height());
        let font_system = self.font_system.inner_mut();

        let mut buffer = Buffer::new(font_system, metrics);
        buffer.set_wrap(font_system, Wrap::Word);
        buffer.set_size(font_system, Some(width), None);

        let source = text.as_str();
        let spans: Vec<(&str, Attrs<'_>)> = text
            .runs()
            .iter()
            .map(|run| {
                let attrs = run.attributes();
                let font = attrs.font.as_ref().unwrap_or(&default_font);
                let mut cosmic = font
                    .to_attrs()
                    .metrics(Metrics::new(font.size(), font.line_height()));
                if let Some(color) = attrs.color {
                    let [r, g, b, a] = color.to_rgba8();
                    cosmic = cosmic.color(cosmic_text::Color::rgba(r, g, b, a));
                }
                (&source[run.range()], cosmic)
            })
            .collect();

        buffer.set_rich_text(font_system, spans, default_font.to_attrs(), Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);

        let starts = paragraph_starts(source);
        let mut lines: Vec<VisualLine> = buffer
            .layout_runs()
            .map(|run| {
                let base = starts.get(run.line_i).copied().unwrap_or(source.len());
                let glyphs = absolute_glyphs(
                    base,
                    run.glyphs.iter().map(|g| (g.start..g.end, g.x, g.w)),
                );
                let range = cluster_extent(&glyphs, base);
                let ascent = run.line_y - run.line_top;
                VisualLine {
                    alignment: paragraph_alignment(text, range.start),
                    range,
                    top: run.line_top,
                    height: run.line_height,
                    ascent,
                    descent: run.line_height - ascent,
                    width: run.line_w,
                    glyphs,
                }
            })
            .collect();

        close_range_gaps(&mut lines, source.len());
        tracing::trace!(
            target: "taglabel::layout",
            width,
            line_count = lines.len(),
            "shaped layout"
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_system::FontSystemConfig;

    fn headless() -> ShapedLayout {
        ShapedLayout::new(FontSystem::with_config(
            FontSystemConfig::new().load_system_fonts(false),
        ))
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let mut layout = headless();
        assert!(layout.layout(&StyledText::new(), 100.0).is_empty());
    }

    /// Reads the first common sans-serif face found on this machine.
    fn system_face() -> Option<Vec<u8>> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .iter()
        .find_map(|path| std::fs::read(path).ok())
    }

    #[test]
    fn test_glyph_clusters_shift_to_paragraph_start() {
        let glyphs = absolute_glyphs(11, [(0..6, 0.0, 40.0), (6..7, 40.0, 5.0)]);
        let clusters: Vec<_> = glyphs.iter().map(|g| g.cluster.clone()).collect();
        assert_eq!(clusters, vec![11..17, 17..18]);
        assert_eq!(glyphs[1].x, 40.0);
        assert_eq!(glyphs[1].width, 5.0);
        assert_eq!(cluster_extent(&glyphs, 11), 11..18);
    }

    #[test]
    fn test_cluster_extent_ignores_visual_order() {
        // Right-to-left runs list glyphs from the end of the text.
        let glyphs = absolute_glyphs(4, [(6..8, 0.0, 8.0), (3..6, 8.0, 12.0), (0..3, 20.0, 12.0)]);
        assert_eq!(cluster_extent(&glyphs, 4), 4..12);
        assert_eq!(cluster_extent(&[], 9), 9..9);
    }

    #[test]
    fn test_ranges_follow_paragraphs_with_a_real_face() {
        let Some(data) = system_face() else {
            return;
        };
        let mut layout = headless();
        layout.font_system_mut().load_font_data(data);
        let family = layout
            .font_system_mut()
            .inner_mut()
            .db()
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
        if let Some(family) = family {
            layout.font_system_mut().inner_mut().db_mut().set_sans_serif_family(family);
        }

        let text = StyledText::plain("first line\nsecond line");
        let lines = layout.layout(&text, 300.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].range, 0..11);
        assert_eq!(lines[1].range, 11..22);
        assert_eq!(lines[1].glyphs.first().map(|g| g.cluster.start), Some(11));
        let joined: String = lines.iter().map(|l| &text.as_str()[l.range.clone()]).collect();
        assert_eq!(joined, text.as_str());
    }

    #[test]
    fn test_paragraph_starts() {
        assert_eq!(paragraph_starts("ab\ncd\n"), vec![0, 3, 6]);
        assert_eq!(paragraph_starts("abc"), vec![0]);
    }
}
