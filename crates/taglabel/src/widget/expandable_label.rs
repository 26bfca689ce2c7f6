//! Expandable label with tappable hashtags, mentions and a more/less link.
//!
//! The label keeps two rendered forms of its text: a collapsed one limited
//! to a number of lines and ending in a "more" link, and an expanded one
//! showing everything, optionally followed by a "less" link. Taps on the
//! link switch between them; taps on hashtags and mentions are reported
//! through signals.
//!
//! # Example
//!
//! ```
//! use taglabel::text::{FixedAdvanceLayout, Point, Rect};
//! use taglabel::widget::ExpandableLabel;
//!
//! let mut label = ExpandableLabel::new(FixedAdvanceLayout::new())
//!     .with_text("Release day! Thanks @ferris for #rust and everyone else who helped")
//!     .with_bounds(Rect::new(0.0, 0.0, 160.0, 100.0))
//!     .with_collapsed_lines(2);
//!
//! label.hashtag_tapped.connect(|tag| println!("tapped {}", tag.text));
//! label.render().expect("positive width");
//! assert!(label.displayed_text().is_some());
//! ```
//!
//! # Rendering
//!
//! Setters only record configuration and mark the label dirty. The host
//! calls [`ExpandableLabel::render`] during its layout pass, which rebuilds
//! both forms at once. [`ExpandableLabel::tap`] renders first if needed.

use std::ops::Range;

use taglabel_core::logging::targets;
use taglabel_core::{LabelError, LabelResult, PerfSpan, Signal, WidgetId, check_width};
use taglabel_text::{Font, HorizontalAlign, LineLayout, Point, Rect, StyledText};

use super::config::LabelConfig;
use crate::decorate::{self, MentionPalette};
use crate::hit_test::{self, TapTarget};
use crate::tokens::{TokenMatch, TokenSet};
use crate::truncate::{
    self, CollapseOutcome, CollapsedText, ExpandedText, LinkSpec, OffsetMap, TruncationMode,
    TruncationRequest,
};

/// One rendered form of the text.
#[derive(Debug, Clone, PartialEq)]
struct DisplayForm {
    text: StyledText,
    link_range: Option<Range<usize>>,
    offsets: OffsetMap,
}

impl DisplayForm {
    fn empty() -> Self {
        Self {
            text: StyledText::new(),
            link_range: None,
            offsets: OffsetMap::default(),
        }
    }

    fn full(text: StyledText) -> Self {
        let offsets = OffsetMap::new(text.len());
        Self {
            text,
            link_range: None,
            offsets,
        }
    }
}

impl From<CollapsedText> for DisplayForm {
    fn from(collapsed: CollapsedText) -> Self {
        Self {
            text: collapsed.text,
            link_range: collapsed.link_range,
            offsets: collapsed.offsets,
        }
    }
}

impl From<ExpandedText> for DisplayForm {
    fn from(expanded: ExpandedText) -> Self {
        Self {
            text: expanded.text,
            link_range: expanded.link_range,
            offsets: expanded.offsets,
        }
    }
}

/// Both forms produced by one render pass.
struct Rendered {
    collapsed: DisplayForm,
    /// The collapsed form with its link dimmed.
    collapsed_pressed: StyledText,
    collapsed_link_rect: Option<Rect>,
    expanded: DisplayForm,
}

/// A text label that collapses to a few lines and expands on tap.
///
/// Offsets reported by the label (link ranges, token ranges) are UTF-8 byte
/// offsets. Token ranges refer to the source text; link ranges refer to the
/// displayed form they belong to.
pub struct ExpandableLabel {
    id: WidgetId,
    source: StyledText,
    tokens: TokenSet,
    config: LabelConfig,
    bounds: Rect,
    collapsed: bool,
    link_pressed: bool,
    dirty: bool,
    rendered: Option<Rendered>,
    layout: Box<dyn LineLayout + Send>,

    /// Emitted before the label switches to its expanded form.
    pub will_expand: Signal<WidgetId>,
    /// Emitted after the label switched to its expanded form.
    pub did_expand: Signal<WidgetId>,
    /// Emitted before the label switches to its collapsed form.
    pub will_collapse: Signal<WidgetId>,
    /// Emitted after the label switched to its collapsed form.
    pub did_collapse: Signal<WidgetId>,
    pub hashtag_tapped: Signal<TokenMatch>,
    pub mention_tapped: Signal<TokenMatch>,
    /// Emitted with the new plain text when the text changes.
    pub text_changed: Signal<String>,
}

impl ExpandableLabel {
    /// Create an empty, collapsed label measuring text with `layout`.
    pub fn new<L>(layout: L) -> Self
    where
        L: LineLayout + Send + 'static,
    {
        Self {
            id: WidgetId::next(),
            source: StyledText::new(),
            tokens: TokenSet::default(),
            config: LabelConfig::default(),
            bounds: Rect::ZERO,
            collapsed: true,
            link_pressed: false,
            dirty: true,
            rendered: None,
            layout: Box::new(layout),
            will_expand: Signal::new(),
            did_expand: Signal::new(),
            will_collapse: Signal::new(),
            did_collapse: Signal::new(),
            hashtag_tapped: Signal::new(),
            mention_tapped: Signal::new(),
            text_changed: Signal::new(),
        }
    }

    /// The identifier carried by this label's expand and collapse signals.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// The plain source text.
    pub fn text(&self) -> &str {
        self.source.as_str()
    }

    /// The source text with its attributes, before decoration.
    pub fn styled_text(&self) -> &StyledText {
        &self.source
    }

    /// Set plain text, rescanning hashtags and mentions.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.set_styled_text(StyledText::plain(text));
    }

    /// Set text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set styled text, rescanning hashtags and mentions.
    pub fn set_styled_text(&mut self, text: StyledText) {
        if self.source == text {
            return;
        }
        self.tokens = TokenSet::scan(text.as_str());
        self.source = text;
        tracing::debug!(
            target: targets::WIDGET,
            widget = %self.id,
            len = self.source.len(),
            "text set"
        );
        self.invalidate();
        self.text_changed.emit(self.source.as_str().to_string());
    }

    /// Set styled text using builder pattern.
    pub fn with_styled_text(mut self, text: StyledText) -> Self {
        self.set_styled_text(text);
        self
    }

    /// Hashtags in the source text.
    pub fn hashtags(&self) -> &[TokenMatch] {
        &self.tokens.hashtags
    }

    /// Mentions in the source text.
    pub fn mentions(&self) -> &[TokenMatch] {
        &self.tokens.mentions
    }

    // =========================================================================
    // Geometry and configuration
    // =========================================================================

    /// The content bounds in host coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set the content bounds. Only a width change requires a new render.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds == bounds {
            return;
        }
        let width_changed = self.bounds.width() != bounds.width();
        self.bounds = bounds;
        if width_changed {
            self.invalidate();
        }
    }

    /// Set the content bounds using builder pattern.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.set_bounds(bounds);
        self
    }

    /// Get the base font.
    pub fn font(&self) -> Font {
        self.config.font.get()
    }

    /// Set the base font.
    ///
    /// A collapsed link still at its default follows the new font.
    pub fn set_font(&mut self, font: Font) {
        let previous = self.config.font.get();
        if !self.config.font.set(font.clone()) {
            return;
        }
        let default_link = Some(LinkSpec::more(&previous));
        if self.config.collapsed_link.with(|link| *link == default_link) {
            self.config.collapsed_link.set_silent(Some(LinkSpec::more(&font)));
        }
        self.invalidate();
    }

    /// Set the base font using builder pattern.
    pub fn with_font(mut self, font: Font) -> Self {
        self.set_font(font);
        self
    }

    /// Get the number of lines shown while collapsed.
    pub fn collapsed_lines(&self) -> usize {
        self.config.collapsed_lines.get()
    }

    /// Set the number of lines shown while collapsed (0 never truncates).
    pub fn set_collapsed_lines(&mut self, lines: usize) {
        if self.config.collapsed_lines.set(lines) {
            self.invalidate();
        }
    }

    /// Set the collapsed line count using builder pattern.
    pub fn with_collapsed_lines(mut self, lines: usize) -> Self {
        self.set_collapsed_lines(lines);
        self
    }

    /// Get the truncation mode.
    pub fn truncation_mode(&self) -> TruncationMode {
        self.config.mode.get()
    }

    /// Set the truncation mode.
    pub fn set_truncation_mode(&mut self, mode: TruncationMode) {
        if self.config.mode.set(mode) {
            self.invalidate();
        }
    }

    /// Set the truncation mode using builder pattern.
    pub fn with_truncation_mode(mut self, mode: TruncationMode) -> Self {
        self.set_truncation_mode(mode);
        self
    }

    /// Get the link shown while collapsed.
    pub fn collapsed_link(&self) -> Option<LinkSpec> {
        self.config.collapsed_link.get()
    }

    /// Set the link shown while collapsed.
    pub fn set_collapsed_link(&mut self, link: Option<LinkSpec>) {
        if self.config.collapsed_link.set(link) {
            self.invalidate();
        }
    }

    /// Set the collapsed link using builder pattern.
    pub fn with_collapsed_link(mut self, link: Option<LinkSpec>) -> Self {
        self.set_collapsed_link(link);
        self
    }

    /// Get the link shown while expanded.
    pub fn expanded_link(&self) -> Option<LinkSpec> {
        self.config.expanded_link.get()
    }

    /// Set the link shown while expanded.
    pub fn set_expanded_link(&mut self, link: Option<LinkSpec>) {
        if self.config.expanded_link.set(link) {
            self.invalidate();
        }
    }

    /// Set the expanded link using builder pattern.
    pub fn with_expanded_link(mut self, link: Option<LinkSpec>) -> Self {
        self.set_expanded_link(link);
        self
    }

    /// Set the expanded link from text and an optional alignment.
    ///
    /// With an alignment the link goes on its own line.
    pub fn set_less_link(&mut self, text: impl Into<StyledText>, alignment: Option<HorizontalAlign>) {
        let link = LinkSpec {
            text: text.into(),
            alignment,
        };
        self.set_expanded_link(Some(link));
    }

    /// Get the ellipsis placed before the collapsed link.
    pub fn ellipsis(&self) -> Option<StyledText> {
        self.config.ellipsis.get()
    }

    /// Set the ellipsis placed before the collapsed link.
    pub fn set_ellipsis(&mut self, ellipsis: Option<StyledText>) {
        if self.config.ellipsis.set(ellipsis) {
            self.invalidate();
        }
    }

    /// Set the ellipsis using builder pattern.
    pub fn with_ellipsis(mut self, ellipsis: Option<StyledText>) -> Self {
        self.set_ellipsis(ellipsis);
        self
    }

    /// Check if tapping the collapsed link expands the label.
    pub fn should_expand(&self) -> bool {
        self.config.should_expand.get()
    }

    /// Set whether tapping the collapsed link expands the label.
    pub fn set_should_expand(&mut self, enabled: bool) {
        self.config.should_expand.set(enabled);
    }

    /// Set expansion on tap using builder pattern.
    pub fn with_should_expand(mut self, enabled: bool) -> Self {
        self.set_should_expand(enabled);
        self
    }

    /// Check if tapping the expanded link collapses the label.
    pub fn should_collapse(&self) -> bool {
        self.config.should_collapse.get()
    }

    /// Set whether tapping the expanded link collapses the label.
    pub fn set_should_collapse(&mut self, enabled: bool) {
        self.config.should_collapse.set(enabled);
    }

    /// Set collapse on tap using builder pattern.
    pub fn with_should_collapse(mut self, enabled: bool) -> Self {
        self.set_should_collapse(enabled);
        self
    }

    /// Get the horizontal alignment of the text.
    pub fn alignment(&self) -> HorizontalAlign {
        self.config.alignment.get()
    }

    /// Set the horizontal alignment of the text.
    ///
    /// The alignment becomes part of the paragraph style of both forms, so
    /// the link placement and hit testing follow it. A less link with its own
    /// alignment keeps that alignment.
    pub fn set_alignment(&mut self, alignment: HorizontalAlign) {
        if self.config.alignment.set(alignment) {
            self.invalidate();
        }
    }

    /// Set the alignment using builder pattern.
    pub fn with_alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.set_alignment(alignment);
        self
    }

    /// Get the mention highlight colors.
    pub fn mention_palette(&self) -> MentionPalette {
        self.config.palette.get()
    }

    /// Set the mention highlight colors.
    pub fn set_mention_palette(&mut self, palette: MentionPalette) {
        if self.config.palette.set(palette) {
            self.invalidate();
        }
    }

    /// Set the mention highlight colors using builder pattern.
    pub fn with_mention_palette(mut self, palette: MentionPalette) -> Self {
        self.set_mention_palette(palette);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check if the collapsed form is shown.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Show the collapsed or the expanded form.
    ///
    /// Fires the matching will/did signal pair when the state changes.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        if self.collapsed != collapsed {
            self.transition(collapsed);
        }
    }

    /// Set the initial state using builder pattern, without signals.
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Check if configuration changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check if a press on the collapsed link is being held.
    pub fn is_link_pressed(&self) -> bool {
        self.link_pressed
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        tracing::trace!(target: targets::WIDGET, widget = %self.id, "invalidated");
    }

    fn transition(&mut self, collapse: bool) {
        if collapse {
            self.will_collapse.emit(self.id);
        } else {
            self.will_expand.emit(self.id);
        }
        self.collapsed = collapse;
        self.link_pressed = false;
        tracing::debug!(target: targets::WIDGET, widget = %self.id, collapsed = collapse, "state changed");
        if collapse {
            self.did_collapse.emit(self.id);
        } else {
            self.did_expand.emit(self.id);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Rebuild the collapsed and expanded forms.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidWidth`] when the bounds have no usable
    /// width. The previous forms, if any, are kept.
    pub fn render(&mut self) -> LabelResult<()> {
        let _perf = PerfSpan::new("render");
        let width = check_width(self.bounds.width()).inspect_err(|err| {
            tracing::debug!(target: targets::WIDGET, widget = %self.id, %err, "render skipped");
        })?;

        let rendered = if self.source.is_empty() {
            Rendered {
                collapsed: DisplayForm::empty(),
                collapsed_pressed: StyledText::new(),
                collapsed_link_rect: None,
                expanded: DisplayForm::empty(),
            }
        } else {
            self.render_forms(width)
        };

        tracing::debug!(
            target: targets::WIDGET,
            widget = %self.id,
            width,
            collapsed_len = rendered.collapsed.text.len(),
            expanded_len = rendered.expanded.text.len(),
            "rendered"
        );
        self.rendered = Some(rendered);
        self.dirty = false;
        Ok(())
    }

    fn render_forms(&mut self, width: f32) -> Rendered {
        let font = self.config.font.get();
        let usernames = self.tokens.usernames();
        let decorated = decorate::align(
            &decorate::apply_paragraph_style(&decorate::apply_base_font(&self.source, &font), &font),
            self.config.alignment.get(),
        );
        let text = decorate::highlight_mentions(&decorated, &usernames, &self.config.palette.get());

        let collapsed_link = self
            .config
            .collapsed_link
            .get()
            .map(|link| decorate::apply_base_font(&link.text, &font));
        let expanded_link = self.config.expanded_link.get().map(|link| LinkSpec {
            text: decorate::apply_base_font(&link.text, &font),
            alignment: link.alignment,
        });
        let ellipsis = self
            .config
            .ellipsis
            .get()
            .map(|ellipsis| decorate::apply_base_font(&ellipsis, &font));

        let request = TruncationRequest {
            text: &text,
            width,
            max_lines: self.config.collapsed_lines.get(),
            link: collapsed_link.as_ref(),
            ellipsis: ellipsis.as_ref(),
            font: &font,
            mode: self.config.mode.get(),
        };

        let outcome = truncate::collapse(self.layout.as_mut(), &request);
        let (collapsed, collapsed_link_rect) = match outcome {
            CollapseOutcome::NotNeeded => (DisplayForm::full(text.clone()), None),
            CollapseOutcome::Truncated(collapsed) => {
                let rect = collapsed.link_rect;
                (DisplayForm::from(collapsed), rect)
            }
            CollapseOutcome::Unresolved(collapsed) => {
                tracing::warn!(
                    target: targets::TRUNCATE,
                    widget = %self.id,
                    width,
                    line = collapsed.boundary_line,
                    "no truncation point fits; showing lines without a link"
                );
                (DisplayForm::from(collapsed), None)
            }
        };
        let expanded = DisplayForm::from(truncate::expand(
            self.layout.as_mut(),
            &request,
            expanded_link.as_ref(),
        ));

        let collapsed_pressed = match &collapsed.link_range {
            Some(range) => dim_range(&collapsed.text, range.clone()),
            None => collapsed.text.clone(),
        };

        Rendered {
            collapsed,
            collapsed_pressed,
            collapsed_link_rect,
            expanded,
        }
    }

    fn current_form(&self) -> Option<&DisplayForm> {
        self.rendered.as_ref().map(|rendered| {
            if self.collapsed {
                &rendered.collapsed
            } else {
                &rendered.expanded
            }
        })
    }

    /// The text currently on screen, once rendered.
    pub fn displayed_text(&self) -> Option<&StyledText> {
        let rendered = self.rendered.as_ref()?;
        Some(match (self.collapsed, self.link_pressed) {
            (true, true) => &rendered.collapsed_pressed,
            (true, false) => &rendered.collapsed.text,
            (false, _) => &rendered.expanded.text,
        })
    }

    /// The collapsed form, once rendered.
    pub fn collapsed_text(&self) -> Option<&StyledText> {
        self.rendered.as_ref().map(|rendered| &rendered.collapsed.text)
    }

    /// The expanded form, once rendered.
    pub fn expanded_text(&self) -> Option<&StyledText> {
        self.rendered.as_ref().map(|rendered| &rendered.expanded.text)
    }

    /// Range of the link in the displayed text.
    pub fn link_range(&self) -> Option<Range<usize>> {
        self.current_form().and_then(|form| form.link_range.clone())
    }

    /// Where the collapsed link is drawn, in host coordinates.
    pub fn collapsed_link_rect(&self) -> Option<Rect> {
        let rect = self.rendered.as_ref()?.collapsed_link_rect?;
        Some(rect.offset(self.bounds.left(), self.bounds.top()))
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Find what lies under `point` in the displayed text.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::NotRendered`] if the label has not been rendered
    /// since its last change.
    pub fn hit_test(&mut self, point: Point) -> LabelResult<TapTarget> {
        if self.dirty {
            return Err(LabelError::NotRendered);
        }
        let _perf = PerfSpan::new("hit_test");
        let collapsed = self.collapsed;
        let line_limit = if collapsed {
            self.config.collapsed_lines.get()
        } else {
            0
        };
        let alignment = self.config.alignment.get();
        let link_rect = self.collapsed_link_rect();
        let rendered = self.rendered.as_ref().ok_or(LabelError::NotRendered)?;
        let form = if collapsed {
            &rendered.collapsed
        } else {
            &rendered.expanded
        };

        let index = hit_test::locate(
            self.layout.as_mut(),
            point,
            &form.text,
            self.bounds,
            line_limit,
            alignment,
        );
        let mut target = index.map_or(TapTarget::Elsewhere, |index| {
            hit_test::resolve(index, form.link_range.as_ref(), &form.offsets, &self.tokens)
        });
        if target == TapTarget::Elsewhere
            && collapsed
            && link_rect.is_some_and(|rect| rect.contains(point))
        {
            target = TapTarget::Link;
        }
        tracing::trace!(target: targets::HIT_TEST, widget = %self.id, ?index, ?target, "tap resolved");
        Ok(target)
    }

    /// Handle a tap at `point`, rendering first if needed.
    ///
    /// A tap on the link expands or collapses the label, subject to
    /// [`should_expand`](Self::should_expand) and
    /// [`should_collapse`](Self::should_collapse). Taps on tokens emit
    /// [`hashtag_tapped`](Self::hashtag_tapped) or
    /// [`mention_tapped`](Self::mention_tapped).
    pub fn tap(&mut self, point: Point) -> TapTarget {
        if self.dirty && self.render().is_err() {
            return TapTarget::Elsewhere;
        }
        let target = match self.hit_test(point) {
            Ok(target) => target,
            Err(err) => {
                tracing::debug!(target: targets::WIDGET, widget = %self.id, %err, "tap ignored");
                return TapTarget::Elsewhere;
            }
        };

        match &target {
            TapTarget::Link => {
                if self.collapsed && self.config.should_expand.get() {
                    self.transition(false);
                } else if !self.collapsed && self.config.should_collapse.get() {
                    self.transition(true);
                }
            }
            TapTarget::Hashtag(token) => self.hashtag_tapped.emit(token.clone()),
            TapTarget::Mention(token) => self.mention_tapped.emit(token.clone()),
            TapTarget::Elsewhere => {}
        }
        target
    }

    /// Start a press at `point`.
    ///
    /// A press on the collapsed link dims it until the press is released or
    /// cancelled. Returns `true` if the link was pressed.
    pub fn press(&mut self, point: Point) -> bool {
        if !self.collapsed {
            return false;
        }
        if self.dirty && self.render().is_err() {
            return false;
        }
        self.link_pressed = matches!(self.hit_test(point), Ok(TapTarget::Link));
        self.link_pressed
    }

    /// Abandon a press without tapping.
    pub fn cancel_press(&mut self) {
        self.link_pressed = false;
    }

    /// Finish a press at `point`, handling it as a tap.
    pub fn release(&mut self, point: Point) -> TapTarget {
        self.link_pressed = false;
        self.tap(point)
    }
}

/// Dim the attributes in `range` without changing the text.
fn dim_range(text: &StyledText, range: Range<usize>) -> StyledText {
    text.slice(0..range.start)
        .concat(&decorate::dim(&text.slice(range.clone())))
        .concat(&text.slice(range.end..text.len()))
}

static_assertions::assert_impl_all!(ExpandableLabel: Send);
