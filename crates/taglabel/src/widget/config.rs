//! Label configuration cells.

use taglabel_core::Property;
use taglabel_text::{Font, HorizontalAlign, StyledText};

use crate::decorate::MentionPalette;
use crate::truncate::{DEFAULT_ELLIPSIS, LinkSpec, TruncationMode};

/// Lines shown while collapsed, unless configured otherwise.
pub const DEFAULT_COLLAPSED_LINES: usize = 1;

/// Configuration of an [`ExpandableLabel`](super::ExpandableLabel).
///
/// Each value sits in a [`Property`] so the label can tell whether a setter
/// actually changed anything before invalidating its rendered forms.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Base font for runs without one.
    pub font: Property<Font>,
    /// Line limit of the collapsed form; 0 never truncates.
    pub collapsed_lines: Property<usize>,
    pub mode: Property<TruncationMode>,
    /// Link appended to the collapsed form.
    pub collapsed_link: Property<Option<LinkSpec>>,
    /// Link appended to the expanded form.
    pub expanded_link: Property<Option<LinkSpec>>,
    pub ellipsis: Property<Option<StyledText>>,
    /// Whether tapping the collapsed link expands the label.
    pub should_expand: Property<bool>,
    /// Whether tapping the expanded link collapses the label.
    pub should_collapse: Property<bool>,
    /// Horizontal alignment of the text.
    pub alignment: Property<HorizontalAlign>,
    pub palette: Property<MentionPalette>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        let font = Font::default();
        Self {
            collapsed_link: Property::new(Some(LinkSpec::more(&font))),
            font: Property::new(font),
            collapsed_lines: Property::new(DEFAULT_COLLAPSED_LINES),
            mode: Property::new(TruncationMode::Word),
            expanded_link: Property::new(None),
            ellipsis: Property::new(Some(StyledText::plain(DEFAULT_ELLIPSIS))),
            should_expand: Property::new(true),
            should_collapse: Property::new(false),
            alignment: Property::new(HorizontalAlign::Left),
            palette: Property::new(MentionPalette::default()),
        }
    }
}
