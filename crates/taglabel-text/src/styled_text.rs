//! Attributed text: a string plus contiguous runs of attributes.
//!
//! [`StyledText`] is immutable. Every transformation returns a new value, so
//! cached forms held by a widget can never be changed behind its back.
//!
//! All offsets are UTF-8 byte offsets into [`StyledText::as_str`].

use std::ops::Range;

use crate::font::Font;
use crate::layout::HorizontalAlign;
use crate::types::Color;

/// Paragraph-level layout attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    /// Horizontal alignment of lines in the paragraph.
    pub alignment: HorizontalAlign,
    /// Multiplier applied to the natural line height.
    pub line_height_multiple: f32,
    /// Extra space added after every line.
    pub line_spacing: f32,
    /// Lower bound for the line height (0 disables the bound).
    pub min_line_height: f32,
    /// Upper bound for the line height (0 disables the bound).
    pub max_line_height: f32,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: HorizontalAlign::Left,
            line_height_multiple: 1.0,
            line_spacing: 0.0,
            min_line_height: 0.0,
            max_line_height: 0.0,
        }
    }
}

impl ParagraphStyle {
    /// Set the alignment using builder pattern.
    pub fn with_alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.alignment = alignment;
        self
    }

    /// Resolve the height of a line whose natural height is `natural`.
    pub fn resolve_line_height(&self, natural: f32) -> f32 {
        let mut height = if self.line_height_multiple > 0.0 {
            natural * self.line_height_multiple
        } else {
            natural
        };
        if self.min_line_height > 0.0 {
            height = height.max(self.min_line_height);
        }
        if self.max_line_height > 0.0 {
            height = height.min(self.max_line_height);
        }
        height + self.line_spacing
    }
}

/// The attributes attached to one run of text.
///
/// Every field is optional; layout falls back to its default font and the
/// renderer to its default color when an attribute is absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAttributes {
    pub font: Option<Font>,
    pub color: Option<Color>,
    pub paragraph: Option<ParagraphStyle>,
    /// Vertical glyph offset from the baseline in pixels.
    pub baseline_offset: Option<f32>,
}

impl TextAttributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font using builder pattern.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the foreground color using builder pattern.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the paragraph style using builder pattern.
    pub fn with_paragraph(mut self, paragraph: ParagraphStyle) -> Self {
        self.paragraph = Some(paragraph);
        self
    }
}

/// A contiguous range of text sharing one attribute set.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    range: Range<usize>,
    attributes: TextAttributes,
}

impl StyledRun {
    /// Byte range of the run.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Attributes of the run.
    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }
}

/// Immutable text with attribute runs.
///
/// Runs are contiguous, never empty, cover the whole string, and adjacent
/// runs always differ in attributes, so two texts that look the same compare
/// equal.
///
/// ```
/// use taglabel_text::{Color, StyledText, TextAttributes};
///
/// let text = StyledText::plain("Hello #world");
/// let tagged = text.map_attributes(6..12, |attrs| attrs.color = Some(Color::BLUE));
/// assert_eq!(tagged.runs().len(), 2);
/// assert_eq!(tagged.as_str(), "Hello #world");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    runs: Vec<StyledRun>,
}

impl StyledText {
    /// Create an empty styled text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create styled text with no attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, TextAttributes::default())
    }

    /// Create styled text with a single attribute set.
    pub fn styled(text: impl Into<String>, attributes: TextAttributes) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![StyledRun {
                range: 0..text.len(),
                attributes,
            }]
        };
        Self { text, runs }
    }

    /// Build styled text from consecutive pieces.
    pub fn from_pieces<'a, I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, TextAttributes)>,
    {
        let mut text = String::new();
        let mut runs = Vec::new();
        for (piece, attributes) in pieces {
            if piece.is_empty() {
                continue;
            }
            let start = text.len();
            text.push_str(piece);
            runs.push(StyledRun {
                range: start..text.len(),
                attributes,
            });
        }
        Self::from_parts(text, runs)
    }

    fn from_parts(text: String, runs: Vec<StyledRun>) -> Self {
        let mut coalesced: Vec<StyledRun> = Vec::with_capacity(runs.len());
        for run in runs {
            if run.range.is_empty() {
                continue;
            }
            match coalesced.last_mut() {
                Some(last) if last.attributes == run.attributes => last.range.end = run.range.end,
                _ => coalesced.push(run),
            }
        }
        debug_assert!(coalesced.windows(2).all(|w| w[0].range.end == w[1].range.start));
        debug_assert_eq!(coalesced.last().map_or(0, |r| r.range.end), text.len());
        Self {
            text,
            runs: coalesced,
        }
    }

    /// The plain text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The attribute runs in text order.
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Attributes of the character starting at `offset`.
    pub fn attributes_at(&self, offset: usize) -> Option<&TextAttributes> {
        self.runs
            .iter()
            .find(|run| run.range.contains(&offset))
            .map(|run| &run.attributes)
    }

    /// Copy out a sub-range, keeping its attributes.
    ///
    /// # Panics
    ///
    /// Panics if the range does not fall on `char` boundaries.
    pub fn slice(&self, range: Range<usize>) -> StyledText {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        let runs = self
            .runs
            .iter()
            .filter_map(|run| {
                let lo = run.range.start.max(start);
                let hi = run.range.end.min(end);
                (lo < hi).then(|| StyledRun {
                    range: (lo - start)..(hi - start),
                    attributes: run.attributes.clone(),
                })
            })
            .collect();
        Self::from_parts(self.text[start..end].to_string(), runs)
    }

    /// Return this text followed by `other`.
    pub fn concat(&self, other: &StyledText) -> StyledText {
        let offset = self.text.len();
        let mut text = String::with_capacity(offset + other.text.len());
        text.push_str(&self.text);
        text.push_str(&other.text);
        let runs = self
            .runs
            .iter()
            .cloned()
            .chain(other.runs.iter().map(|run| StyledRun {
                range: (run.range.start + offset)..(run.range.end + offset),
                attributes: run.attributes.clone(),
            }))
            .collect();
        Self::from_parts(text, runs)
    }

    /// Return a copy with `f` applied to the attributes covering `range`.
    ///
    /// Runs straddling the range boundaries are split first. An empty range
    /// returns an unchanged copy.
    pub fn map_attributes<F>(&self, range: Range<usize>, mut f: F) -> StyledText
    where
        F: FnMut(&mut TextAttributes),
    {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        if start == end {
            return self.clone();
        }

        let mut runs = Vec::with_capacity(self.runs.len() + 2);
        for run in &self.runs {
            let lo = run.range.start.max(start);
            let hi = run.range.end.min(end);
            if lo >= hi {
                runs.push(run.clone());
                continue;
            }
            if run.range.start < lo {
                runs.push(StyledRun {
                    range: run.range.start..lo,
                    attributes: run.attributes.clone(),
                });
            }
            let mut attributes = run.attributes.clone();
            f(&mut attributes);
            runs.push(StyledRun {
                range: lo..hi,
                attributes,
            });
            if hi < run.range.end {
                runs.push(StyledRun {
                    range: hi..run.range.end,
                    attributes: run.attributes.clone(),
                });
            }
        }
        Self::from_parts(self.text.clone(), runs)
    }

    /// Return a copy with `f` applied to every run.
    pub fn map_all<F>(&self, f: F) -> StyledText
    where
        F: FnMut(&mut TextAttributes),
    {
        self.map_attributes(0..self.text.len(), f)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

static_assertions::assert_impl_all!(StyledText: Send, Sync);
