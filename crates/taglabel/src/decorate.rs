//! Attribute decoration: fonts, paragraph metrics and highlight colors.
//!
//! Every function takes a [`StyledText`] and returns a new one.

use std::sync::LazyLock;

use regex::Regex;
use taglabel_core::logging::targets;
use taglabel_text::{Color, Font, HorizontalAlign, ParagraphStyle, StyledText};

/// Line-height multiple applied to label text.
pub const LINE_HEIGHT_MULTIPLE: f32 = 1.05;

/// Baseline offset as a fraction of the font size.
pub const BASELINE_OFFSET_RATIO: f32 = 0.08;

/// Whitespace-delimited words containing an `@name`.
static MENTION_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S*@[a-zA-Z0-9_.]+\S*").expect("mention word pattern"));

/// Colors used when highlighting mentions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentionPalette {
    /// Color of ordinary text.
    pub title: Color,
    /// Color of mentioned user names.
    pub link: Color,
}

impl Default for MentionPalette {
    fn default() -> Self {
        Self {
            title: Color::DARK_GRAY,
            link: Color::LINK_BLUE,
        }
    }
}

/// Give `font` to every run that has no font yet.
///
/// Runs that already carry a font keep it, so applying the same font twice
/// yields the same text as applying it once.
pub fn apply_base_font(text: &StyledText, font: &Font) -> StyledText {
    text.map_all(|attrs| {
        if attrs.font.is_none() {
            attrs.font = Some(font.clone());
        }
    })
}

/// The paragraph style used for label text set in `font`.
///
/// Line heights are pinned to the font's natural line height.
pub fn label_paragraph_style(font: &Font) -> ParagraphStyle {
    let natural = font.line_height();
    ParagraphStyle {
        alignment: HorizontalAlign::Left,
        line_height_multiple: LINE_HEIGHT_MULTIPLE,
        line_spacing: 0.0,
        min_line_height: natural,
        max_line_height: natural,
    }
}

/// Apply the label paragraph style and baseline offset to the whole text.
pub fn apply_paragraph_style(text: &StyledText, font: &Font) -> StyledText {
    let style = label_paragraph_style(font);
    let baseline_offset = font.size() * BASELINE_OFFSET_RATIO;
    text.map_all(|attrs| {
        attrs.paragraph = Some(style);
        attrs.baseline_offset = Some(baseline_offset);
    })
}

/// Set the paragraph alignment of every run, keeping the rest of its style.
pub fn align(text: &StyledText, alignment: HorizontalAlign) -> StyledText {
    text.map_all(|attrs| {
        attrs.paragraph = Some(attrs.paragraph.unwrap_or_default().with_alignment(alignment));
    })
}

/// Render text in its pressed state: foreground alpha halved.
///
/// Runs without a color are treated as black.
pub fn dim(text: &StyledText) -> StyledText {
    text.map_all(|attrs| {
        let color = attrs.color.unwrap_or(Color::BLACK);
        attrs.color = Some(color.with_alpha(color.alpha() * 0.5));
    })
}

/// Color the whole text with `palette.title`, then the first occurrence of
/// each `@username` with `palette.link`.
///
/// Names that do not occur are skipped.
pub fn highlight_mentions<S: AsRef<str>>(
    text: &StyledText,
    usernames: &[S],
    palette: &MentionPalette,
) -> StyledText {
    let mut result = text.map_all(|attrs| attrs.color = Some(palette.title));
    for name in usernames {
        let needle = format!("@{}", name.as_ref());
        match text.as_str().find(&needle) {
            Some(start) => {
                result = result.map_attributes(start..start + needle.len(), |attrs| {
                    attrs.color = Some(palette.link);
                });
            }
            None => {
                tracing::trace!(target: targets::DECORATE, username = name.as_ref(), "mention not found");
            }
        }
    }
    result
}

/// Color every word that contains an `@name` with `color`.
pub fn color_mention_words(text: &StyledText, color: Color) -> StyledText {
    MENTION_WORD
        .find_iter(text.as_str())
        .fold(text.clone(), |acc, m| {
            acc.map_attributes(m.range(), |attrs| attrs.color = Some(color))
        })
}
