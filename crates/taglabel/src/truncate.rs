//! Collapsing text to a line limit with an appended "more" link.
//!
//! The collapsed form is the source text up to some offset, followed by an
//! optional ellipsis, a space and the link. Everything before that offset is
//! copied verbatim, so [`OffsetMap`] only needs to remember its length to
//! translate displayed offsets back to the source.
//!
//! Two strategies exist, selected by [`TruncationMode`]:
//!
//! - [`collapse_words`] drops whole words from the end of the last visible
//!   line until the result fits on one line.
//! - [`collapse_characters`] cuts the last visible line by grapheme count.

use std::ops::Range;

use taglabel_core::logging::targets;
use taglabel_text::{
    Font, FontWeight, HorizontalAlign, LineLayout, Rect, StyledText, TextAttributes, VisualLine,
};
use unicode_segmentation::UnicodeSegmentation;

/// Default ellipsis placed between the kept text and the link.
pub const DEFAULT_ELLIPSIS: &str = "\u{2026}";

/// How the last visible line is shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TruncationMode {
    /// Remove whole words.
    #[default]
    Word,
    /// Remove grapheme clusters.
    Character,
}

/// The text and placement of an expand or collapse link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSpec {
    pub text: StyledText,
    /// Paragraph alignment for the link. Only used for the expanded form,
    /// where it also moves the link onto its own line.
    pub alignment: Option<HorizontalAlign>,
}

impl LinkSpec {
    /// Create a link without an alignment override.
    pub fn new(text: impl Into<StyledText>) -> Self {
        Self {
            text: text.into(),
            alignment: None,
        }
    }

    /// The default collapsed link: "More" in the bold variant of `font`.
    pub fn more(font: &Font) -> Self {
        Self::new(StyledText::styled(
            "More",
            TextAttributes::new().with_font(font.with_weight(FontWeight::BOLD)),
        ))
    }

    /// Set the alignment override using builder pattern.
    pub fn with_alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Check if the link has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Inputs shared by [`collapse`] and [`expand`].
#[derive(Debug, Clone, Copy)]
pub struct TruncationRequest<'a> {
    /// The decorated source text.
    pub text: &'a StyledText,
    /// Container width in pixels.
    pub width: f32,
    /// Line limit of the collapsed form; 0 disables truncation.
    pub max_lines: usize,
    /// The collapsed link.
    pub link: Option<&'a StyledText>,
    /// Text placed before the link; empty counts as absent.
    pub ellipsis: Option<&'a StyledText>,
    /// Base font, used for separators and line positions.
    pub font: &'a Font,
    pub mode: TruncationMode,
}

/// Maps offsets in displayed text back to the source text.
///
/// Displayed offsets below [`kept`](Self::kept) are identical to source
/// offsets; anything at or past it belongs to inserted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetMap {
    kept: usize,
}

impl OffsetMap {
    /// A map for text whose first `kept` bytes are copied from the source.
    pub fn new(kept: usize) -> Self {
        Self { kept }
    }

    /// Length of the verbatim source prefix.
    pub fn kept(&self) -> usize {
        self.kept
    }

    /// Source offset of a displayed offset, if it shows source text.
    pub fn to_source(&self, displayed: usize) -> Option<usize> {
        (displayed < self.kept).then_some(displayed)
    }
}

/// A collapsed form of the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedText {
    pub text: StyledText,
    /// Byte range of the link in `text`.
    pub link_range: Option<Range<usize>>,
    /// Where the link is drawn, relative to the text origin.
    pub link_rect: Option<Rect>,
    /// Index of the line that was shortened.
    pub boundary_line: usize,
    pub offsets: OffsetMap,
}

/// The result of [`collapse`].
#[derive(Debug, Clone, PartialEq)]
pub enum CollapseOutcome {
    /// The text fits within the line limit.
    NotNeeded,
    /// The text was shortened and the link appended.
    Truncated(CollapsedText),
    /// No word-mode candidate fit on one line. Holds the source lines up to
    /// and including the boundary line, without a link.
    Unresolved(CollapsedText),
}

impl CollapseOutcome {
    /// The collapsed text, unless no truncation was needed.
    pub fn collapsed(&self) -> Option<&CollapsedText> {
        match self {
            CollapseOutcome::NotNeeded => None,
            CollapseOutcome::Truncated(text) | CollapseOutcome::Unresolved(text) => Some(text),
        }
    }

    /// Check if the text was shortened and a link appended.
    pub fn is_truncated(&self) -> bool {
        matches!(self, CollapseOutcome::Truncated(_))
    }
}

/// The expanded form of the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedText {
    pub text: StyledText,
    /// Byte range of the collapse link in `text`.
    pub link_range: Option<Range<usize>>,
    pub offsets: OffsetMap,
}

/// Ellipsis, separator and link, ready to be appended.
struct Appendix {
    text: StyledText,
    link_start: usize,
}

impl Appendix {
    fn new(request: &TruncationRequest<'_>) -> Self {
        let link = request.link.filter(|link| !link.is_empty());
        let mut text = StyledText::new();
        if let Some(ellipsis) = request.ellipsis.filter(|e| !e.is_empty()) {
            text = text.concat(ellipsis);
            if link.is_some() {
                text = text.concat(&separator(" ", request.font));
            }
        }
        let link_start = text.len();
        if let Some(link) = link {
            text = text.concat(link);
        }
        Self { text, link_start }
    }

    fn link_len(&self) -> usize {
        self.text.len() - self.link_start
    }

    fn grapheme_count(&self) -> usize {
        self.text.as_str().graphemes(true).count()
    }
}

fn separator(text: &str, font: &Font) -> StyledText {
    StyledText::styled(text, TextAttributes::new().with_font(font.clone()))
}

/// Byte offsets of the words in `line`, in order.
fn word_starts(line: &str) -> Vec<usize> {
    line.split_word_bound_indices()
        .filter(|(_, word)| word.chars().any(char::is_alphanumeric))
        .map(|(start, _)| start)
        .collect()
}

fn trim_line_breaks(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r', '\u{2028}', '\u{2029}'])
}

/// Lay out text for `width`, returning `NotNeeded` when it fits in
/// `max_lines`, otherwise shortening it with the requested mode.
pub fn collapse<L>(layout: &mut L, request: &TruncationRequest<'_>) -> CollapseOutcome
where
    L: LineLayout + ?Sized,
{
    let lines = layout.layout(request.text, request.width);
    if request.max_lines == 0 || request.max_lines >= lines.len() {
        tracing::debug!(
            target: targets::TRUNCATE,
            line_count = lines.len(),
            max_lines = request.max_lines,
            "no truncation needed"
        );
        return CollapseOutcome::NotNeeded;
    }

    let outcome = match request.mode {
        TruncationMode::Word => collapse_words(layout, request, &lines),
        TruncationMode::Character => collapse_characters(layout, request, &lines),
    };
    if let Some(collapsed) = outcome.collapsed() {
        tracing::debug!(
            target: targets::TRUNCATE,
            mode = ?request.mode,
            boundary_line = collapsed.boundary_line,
            kept = collapsed.offsets.kept(),
            resolved = outcome.is_truncated(),
            "collapsed text"
        );
    }
    outcome
}

/// Word-mode truncation over precomputed `lines` of `request.text`.
///
/// Starts from line `max_lines - 1` and moves up while the line has fewer
/// than two words. The longest prefix of that line, cut at a word start and
/// keeping at least two words, that fits on one line together with the
/// appendix wins. When no cut fits, earlier lines are tried the same way.
pub fn collapse_words<L>(
    layout: &mut L,
    request: &TruncationRequest<'_>,
    lines: &[VisualLine],
) -> CollapseOutcome
where
    L: LineLayout + ?Sized,
{
    let Some(mut index) = boundary_index(request, lines) else {
        return CollapseOutcome::NotNeeded;
    };
    let source = request.text.as_str();
    while index > 0 && word_starts(&source[lines[index].range()]).len() < 2 {
        index -= 1;
    }
    let boundary = index;
    let appendix = Appendix::new(request);

    loop {
        let line = &lines[index];
        let line_text = request.text.slice(line.range());
        let starts = word_starts(line_text.as_str());
        // Lines with two or more words keep at least two of them.
        let first = if starts.len() >= 2 { 2 } else { 0 };
        if starts.len() >= 2 || index == 0 {
            for &start in starts[first..].iter().rev() {
                let candidate = line_text.slice(0..start).concat(&appendix.text);
                let candidate_lines = layout.layout(&candidate, request.width);
                if candidate_lines.len() > 1 {
                    continue;
                }
                if index < boundary {
                    tracing::trace!(target: targets::TRUNCATE, from = boundary, to = index, "moved up a line");
                }
                let link_rect = link_rect(layout, request, &appendix, &candidate_lines, start, index);
                return CollapseOutcome::Truncated(finish(request, line, index, start, &appendix, link_rect));
            }
        }
        if index == 0 {
            break;
        }
        index -= 1;
    }

    tracing::trace!(
        target: targets::TRUNCATE,
        line = boundary,
        width = request.width,
        "no word boundary fits"
    );
    let line = &lines[boundary];
    let end = line.range.start + trim_line_breaks(&source[line.range()]).len();
    CollapseOutcome::Unresolved(CollapsedText {
        text: request.text.slice(0..end),
        link_range: None,
        link_rect: None,
        boundary_line: boundary,
        offsets: OffsetMap::new(end),
    })
}

/// Character-mode truncation over precomputed `lines` of `request.text`.
///
/// Keeps as many grapheme clusters of line `max_lines - 1` as the appendix
/// leaves room for, by count, without measuring.
pub fn collapse_characters<L>(
    layout: &mut L,
    request: &TruncationRequest<'_>,
    lines: &[VisualLine],
) -> CollapseOutcome
where
    L: LineLayout + ?Sized,
{
    let Some(index) = boundary_index(request, lines) else {
        return CollapseOutcome::NotNeeded;
    };
    let line = &lines[index];
    let line_text = request.text.slice(line.range());
    let trimmed = trim_line_breaks(line_text.as_str());
    let appendix = Appendix::new(request);

    let keep = trimmed
        .graphemes(true)
        .count()
        .saturating_sub(appendix.grapheme_count());
    let cut = trimmed
        .grapheme_indices(true)
        .nth(keep)
        .map_or(trimmed.len(), |(offset, _)| offset);

    let candidate = line_text.slice(0..cut).concat(&appendix.text);
    let candidate_lines = layout.layout(&candidate, request.width);
    let link_rect = link_rect(layout, request, &appendix, &candidate_lines, cut, index);
    CollapseOutcome::Truncated(finish(request, line, index, cut, &appendix, link_rect))
}

fn boundary_index(request: &TruncationRequest<'_>, lines: &[VisualLine]) -> Option<usize> {
    let index = request.max_lines.checked_sub(1)?;
    (index < lines.len()).then_some(index)
}

fn finish(
    request: &TruncationRequest<'_>,
    line: &VisualLine,
    index: usize,
    cut: usize,
    appendix: &Appendix,
    link_rect: Option<Rect>,
) -> CollapsedText {
    let kept = line.range.start + cut;
    let text = request.text.slice(0..kept).concat(&appendix.text);
    let link_len = appendix.link_len();
    let link_range = (link_len > 0).then(|| text.len() - link_len..text.len());
    CollapsedText {
        text,
        link_range,
        link_rect,
        boundary_line: index,
        offsets: OffsetMap::new(kept),
    }
}

/// Rectangle of the link inside the candidate line, placed at `line_index`.
fn link_rect<L>(
    layout: &mut L,
    request: &TruncationRequest<'_>,
    appendix: &Appendix,
    candidate_lines: &[VisualLine],
    prefix_len: usize,
    line_index: usize,
) -> Option<Rect>
where
    L: LineLayout + ?Sized,
{
    let link = request.link.filter(|link| !link.is_empty())?;
    let link_offset = prefix_len + appendix.link_start;
    let (row, line) = candidate_lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.range.contains(&link_offset))?;
    let x = line.pen_offset(request.width, HorizontalAlign::Left) + line.x_for_offset(link_offset);
    let y = (line_index + row) as f32 * request.font.line_height();
    let size = layout.measure(link, request.width);
    let width = if prefix_len == 0 {
        (request.width - x).max(size.width)
    } else {
        size.width
    };
    Some(Rect::new(x, y, width, size.height))
}

/// Build the expanded form: the full text, followed by the collapse link when
/// the text would be truncated at `request.max_lines`.
///
/// The link is separated by two spaces, or by a line break when it carries
/// an alignment override, in which case the alignment is applied to it.
pub fn expand<L>(layout: &mut L, request: &TruncationRequest<'_>, link: Option<&LinkSpec>) -> ExpandedText
where
    L: LineLayout + ?Sized,
{
    let offsets = OffsetMap::new(request.text.len());
    let line_count = layout.layout(request.text, request.width).len();
    let truncates = request.max_lines > 0 && request.max_lines < line_count;

    match link.filter(|link| truncates && !link.is_empty()) {
        Some(link) => {
            let (gap, link_text) = match link.alignment {
                None => ("  ", link.text.clone()),
                Some(alignment) => (
                    "\n",
                    link.text.map_all(|attrs| {
                        attrs.paragraph = Some(attrs.paragraph.unwrap_or_default().with_alignment(alignment));
                    }),
                ),
            };
            let text = request
                .text
                .concat(&separator(gap, request.font))
                .concat(&link_text);
            let link_range = text.len() - link_text.len()..text.len();
            ExpandedText {
                text,
                link_range: Some(link_range),
                offsets,
            }
        }
        None => ExpandedText {
            text: request.text.clone(),
            link_range: None,
            offsets,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taglabel_text::{FixedAdvanceLayout, Size};

    const TWELVE: &str = "one two three four five six seven eight nine ten eleven twelve";

    fn ellipsis() -> StyledText {
        StyledText::plain(DEFAULT_ELLIPSIS)
    }

    fn request<'a>(
        text: &'a StyledText,
        width: f32,
        max_lines: usize,
        link: &'a StyledText,
        ellipsis: &'a StyledText,
        font: &'a Font,
        mode: TruncationMode,
    ) -> TruncationRequest<'a> {
        TruncationRequest {
            text,
            width,
            max_lines,
            link: Some(link),
            ellipsis: Some(ellipsis),
            font,
            mode,
        }
    }

    #[test]
    fn test_fits_needs_no_truncation() {
        let mut layout = FixedAdvanceLayout::new();
        let (font, link, dots) = (Font::default(), StyledText::plain("More"), ellipsis());
        let text = StyledText::plain(TWELVE);
        // Five lines at 120px.
        assert_eq!(layout.layout(&text, 120.0).len(), 5);
        for max_lines in [0, 5, 9] {
            let req = request(&text, 120.0, max_lines, &link, &dots, &font, TruncationMode::Word);
            assert_eq!(collapse(&mut layout, &req), CollapseOutcome::NotNeeded);
        }
    }

    #[test]
    fn test_word_mode_drops_words_until_fit() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let link = LinkSpec::more(&font).text;
        let dots = ellipsis();
        let text = StyledText::plain(TWELVE);
        // 17 cells: "one two three ", "four five six ", ...
        let req = request(&text, 136.0, 2, &link, &dots, &font, TruncationMode::Word);

        let CollapseOutcome::Truncated(collapsed) = collapse(&mut layout, &req) else {
            panic!("expected truncation");
        };
        assert_eq!(collapsed.text.as_str(), "one two three four five \u{2026} More");
        assert_eq!(collapsed.boundary_line, 1);
        assert_eq!(collapsed.offsets.kept(), 24);
        assert_eq!(collapsed.link_range, Some(28..32));
        assert_eq!(&collapsed.text.as_str()[28..32], "More");
        assert_eq!(layout.layout(&collapsed.text, 136.0).len(), 2);

        // "More" sits after "four five … " on the second line.
        let rect = collapsed.link_rect.unwrap_or(Rect::ZERO);
        assert_eq!(rect, Rect::new(96.0, font.line_height(), 32.0, font.line_height()));
    }

    #[test]
    fn test_word_mode_keeps_two_words_on_the_line() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("More"), ellipsis());
        let text = StyledText::plain(TWELVE);
        // "four … More" would fit at 120px but keeps a single word.
        let req = request(&text, 120.0, 2, &link, &dots, &font, TruncationMode::Word);
        let CollapseOutcome::Truncated(collapsed) = collapse(&mut layout, &req) else {
            panic!("expected truncation");
        };
        assert_eq!(collapsed.text.as_str(), "one two \u{2026} More");
        assert_eq!(collapsed.boundary_line, 0);
        assert_eq!(collapsed.offsets.kept(), 8);
        assert_eq!(collapsed.link_range, Some(12..16));
        assert_eq!(collapsed.link_rect, Some(Rect::new(80.0, 0.0, 32.0, font.line_height())));
    }

    #[test]
    fn test_word_mode_moves_up_when_two_words_do_not_fit() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("More"), ellipsis());
        // Lines: "first line xx\n", "aaaaaaaaaa bbb\n", "tail".
        let text = StyledText::plain("first line xx\naaaaaaaaaa bbb\ntail");

        let req = request(&text, 144.0, 2, &link, &dots, &font, TruncationMode::Word);
        let CollapseOutcome::Truncated(collapsed) = collapse(&mut layout, &req) else {
            panic!("expected truncation");
        };
        assert_eq!(collapsed.text.as_str(), "first line \u{2026} More");
        assert_eq!(collapsed.boundary_line, 0);
        assert_eq!(word_starts(&collapsed.text.as_str()[..collapsed.offsets.kept()]).len(), 2);

        // At 120px not even "first line … More" fits.
        let narrow = request(&text, 120.0, 2, &link, &dots, &font, TruncationMode::Word);
        match collapse(&mut layout, &narrow) {
            CollapseOutcome::Unresolved(collapsed) => {
                assert_eq!(collapsed.text.as_str(), "first line xx\naaaaaaaaaa bbb");
                assert_eq!(collapsed.boundary_line, 1);
                assert_eq!(collapsed.link_range, None);
            }
            other => panic!("expected unresolved, got {other:?}"),
        }
    }

    #[test]
    fn test_word_mode_keeps_link_attributes() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let link = LinkSpec::more(&font).text;
        let dots = ellipsis();
        let text = StyledText::plain(TWELVE);
        let req = request(&text, 136.0, 2, &link, &dots, &font, TruncationMode::Word);
        let outcome = collapse(&mut layout, &req);
        let collapsed = outcome.collapsed().cloned().unwrap_or_else(|| panic!("collapsed"));
        let bold = collapsed.text.attributes_at(29).and_then(|a| a.font.clone());
        assert_eq!(bold.map(|f| f.weight()), Some(FontWeight::BOLD));
        // The separating space carries the base font.
        assert_eq!(collapsed.text.attributes_at(27).and_then(|a| a.font.clone()), Some(font));
    }

    #[test]
    fn test_word_mode_steps_back_from_single_word_line() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("More"), ellipsis());
        // Lines: "alpha beta gamma\n", "omega\n", "tail".
        let text = StyledText::plain("alpha beta gamma\nomega\ntail");
        let req = request(&text, 200.0, 2, &link, &dots, &font, TruncationMode::Word);
        let CollapseOutcome::Truncated(collapsed) = collapse(&mut layout, &req) else {
            panic!("expected truncation");
        };
        assert_eq!(collapsed.boundary_line, 0);
        assert_eq!(collapsed.text.as_str(), "alpha beta \u{2026} More");
        assert!(word_starts(&collapsed.text.as_str()[..collapsed.offsets.kept()]).len() >= 2);
    }

    #[test]
    fn test_word_mode_without_ellipsis_has_no_separator() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, empty) = (StyledText::plain("More"), StyledText::new());
        let text = StyledText::plain(TWELVE);
        let req = request(&text, 120.0, 2, &link, &empty, &font, TruncationMode::Word);
        let outcome = collapse(&mut layout, &req);
        let collapsed = outcome.collapsed().cloned().unwrap_or_else(|| panic!("collapsed"));
        assert_eq!(collapsed.text.as_str(), "one two three four five More");
    }

    #[test]
    fn test_word_mode_exhausted_is_unresolved() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("More"), ellipsis());
        // Five cells per line: "… More" needs six.
        let text = StyledText::plain("aa bb cc dd ee ff");
        let req = request(&text, 40.0, 2, &link, &dots, &font, TruncationMode::Word);
        match collapse(&mut layout, &req) {
            CollapseOutcome::Unresolved(collapsed) => {
                assert_eq!(collapsed.text.as_str(), "aa bb cc dd ");
                assert_eq!(collapsed.link_range, None);
                assert_eq!(collapsed.link_rect, None);
                assert_eq!(collapsed.offsets.kept(), 12);
            }
            other => panic!("expected unresolved, got {other:?}"),
        }
    }

    #[test]
    fn test_character_mode_cuts_by_graphemes() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("More"), ellipsis());
        let text = StyledText::plain(TWELVE);
        let req = request(&text, 120.0, 2, &link, &dots, &font, TruncationMode::Character);
        let CollapseOutcome::Truncated(collapsed) = collapse(&mut layout, &req) else {
            panic!("expected truncation");
        };
        // "four five six " has 14 graphemes, the appendix 6.
        assert_eq!(collapsed.text.as_str(), "one two three four fiv\u{2026} More");
        assert_eq!(collapsed.offsets.kept(), 22);
        assert_eq!(collapsed.link_range, Some(26..30));
        assert!(collapsed.link_rect.is_some());
    }

    #[test]
    fn test_character_mode_counts_clusters_not_bytes() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("More"), ellipsis());
        // Each "e\u{301}" is one cluster of three bytes.
        let line = "e\u{301}".repeat(8);
        let text = StyledText::plain(format!("{line}\nsecond\nthird"));
        let req = request(&text, 200.0, 1, &link, &dots, &font, TruncationMode::Character);
        let outcome = collapse(&mut layout, &req);
        let collapsed = outcome.collapsed().cloned().unwrap_or_else(|| panic!("collapsed"));
        assert_eq!(collapsed.offsets.kept(), 2 * 3);
        let kept = &collapsed.text.as_str()[..collapsed.offsets.kept()];
        assert_eq!(kept.graphemes(true).count() + 6, 8);
    }

    #[test]
    fn test_character_mode_clamps_to_empty_prefix() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (link, dots) = (StyledText::plain("MoreMoreMoreMoreMore"), ellipsis());
        let text = StyledText::plain(TWELVE);
        let req = request(&text, 120.0, 2, &link, &dots, &font, TruncationMode::Character);
        let outcome = collapse(&mut layout, &req);
        let collapsed = outcome.collapsed().cloned().unwrap_or_else(|| panic!("collapsed"));
        assert_eq!(collapsed.offsets.kept(), 14);
        assert_eq!(collapsed.text.as_str(), "one two three \u{2026} MoreMoreMoreMoreMore");
    }

    #[test]
    fn test_offset_map() {
        let map = OffsetMap::new(5);
        assert_eq!(map.to_source(0), Some(0));
        assert_eq!(map.to_source(4), Some(4));
        assert_eq!(map.to_source(5), None);
    }

    #[test]
    fn test_expand_appends_link_only_when_truncating() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (more, dots) = (StyledText::plain("More"), ellipsis());
        let less = LinkSpec::new("Less");
        let text = StyledText::plain(TWELVE);

        let req = request(&text, 120.0, 2, &more, &dots, &font, TruncationMode::Word);
        let expanded = expand(&mut layout, &req, Some(&less));
        assert_eq!(expanded.text.as_str(), format!("{TWELVE}  Less"));
        assert_eq!(expanded.link_range, Some(TWELVE.len() + 2..TWELVE.len() + 6));
        assert_eq!(expanded.offsets.kept(), TWELVE.len());

        let roomy = request(&text, 1000.0, 2, &more, &dots, &font, TruncationMode::Word);
        let expanded = expand(&mut layout, &roomy, Some(&less));
        assert_eq!(expanded.text, text);
        assert_eq!(expanded.link_range, None);

        assert_eq!(expand(&mut layout, &req, None).text, text);
    }

    #[test]
    fn test_expand_with_alignment_puts_link_on_own_line() {
        let mut layout = FixedAdvanceLayout::new();
        let font = Font::default();
        let (more, dots) = (StyledText::plain("More"), ellipsis());
        let less = LinkSpec::new("Less").with_alignment(HorizontalAlign::Right);
        let text = StyledText::plain(TWELVE);
        let req = request(&text, 120.0, 2, &more, &dots, &font, TruncationMode::Word);

        let expanded = expand(&mut layout, &req, Some(&less));
        assert_eq!(expanded.text.as_str(), format!("{TWELVE}\nLess"));
        let lines = layout.layout(&expanded.text, 120.0);
        let last = lines.last().cloned().unwrap_or_else(|| panic!("lines"));
        assert_eq!(&expanded.text.as_str()[last.range()], "Less");
        assert_eq!(last.alignment, Some(HorizontalAlign::Right));
        assert_eq!(layout.measure(&StyledText::plain("Less"), 120.0), Size::new(32.0, font.line_height()));
    }
}
