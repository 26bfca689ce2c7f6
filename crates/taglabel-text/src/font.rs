//! Font representation and line metrics.

use std::fmt;

/// Ascent as a fraction of the font size when no face metrics are available.
const DEFAULT_ASCENT_RATIO: f32 = 0.8;
/// Descent as a fraction of the font size.
const DEFAULT_DESCENT_RATIO: f32 = 0.2;
/// Line gap as a fraction of the font size.
const DEFAULT_LEADING_RATIO: f32 = 0.2;

/// Font weight, typically ranging from 100 (thin) to 900 (black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Light weight (300).
    pub const LIGHT: Self = Self(300);
    /// Normal/regular weight (400).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (500).
    pub const MEDIUM: Self = Self(500);
    /// Semi-bold weight (600).
    pub const SEMI_BOLD: Self = Self(600);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);

    /// Create a font weight from a numeric value (clamped to 100-900).
    pub fn new(weight: u16) -> Self {
        Self(weight.clamp(100, 900))
    }

    /// Get the numeric weight value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Convert to cosmic-text Weight.
    pub fn to_cosmic(self) -> cosmic_text::Weight {
        cosmic_text::Weight(self.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Font style (normal, italic, or oblique).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Normal upright style.
    #[default]
    Normal,
    /// Italic style (designed italic glyphs).
    Italic,
    /// Oblique style (slanted normal glyphs).
    Oblique,
}

impl FontStyle {
    /// Convert to cosmic-text Style.
    pub fn to_cosmic(self) -> cosmic_text::Style {
        match self {
            FontStyle::Normal => cosmic_text::Style::Normal,
            FontStyle::Italic => cosmic_text::Style::Italic,
            FontStyle::Oblique => cosmic_text::Style::Oblique,
        }
    }
}

/// Font family specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// A specific font family by name.
    Name(String),
    /// Generic serif family.
    Serif,
    /// Generic sans-serif family.
    #[default]
    SansSerif,
    /// Generic monospace family.
    Monospace,
}

impl FontFamily {
    /// Create a named font family.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Convert to cosmic-text Family.
    pub fn to_cosmic(&self) -> cosmic_text::Family<'_> {
        match self {
            FontFamily::Name(name) => cosmic_text::Family::Name(name.as_str()),
            FontFamily::Serif => cosmic_text::Family::Serif,
            FontFamily::SansSerif => cosmic_text::Family::SansSerif,
            FontFamily::Monospace => cosmic_text::Family::Monospace,
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFamily::Name(name) => write!(f, "{}", name),
            FontFamily::Serif => write!(f, "serif"),
            FontFamily::SansSerif => write!(f, "sans-serif"),
            FontFamily::Monospace => write!(f, "monospace"),
        }
    }
}

/// Vertical metrics of a font at a specific size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the glyphs.
    pub descent: f32,
    /// Extra space below the descent.
    pub leading: f32,
}

impl LineMetrics {
    /// Natural line height: ascent + descent + leading.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

/// A font specification: family, size, weight and style.
///
/// `Font` does not reference font data. [`ShapedLayout`](crate::ShapedLayout)
/// resolves it against a [`FontSystem`](crate::FontSystem); the
/// [`FixedAdvanceLayout`](crate::FixedAdvanceLayout) only uses its size.
///
/// ```
/// use taglabel_text::{Font, FontFamily, FontWeight};
///
/// let body = Font::new(FontFamily::SansSerif, 16.0);
/// let link = body.with_weight(FontWeight::BOLD);
/// assert_eq!(link.size(), 16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    size: f32,
    weight: FontWeight,
    style: FontStyle,
}

impl Font {
    /// Create a new font with the given family and size in pixels.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }

    /// Get the font family.
    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Get the font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Get the font weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Get the font style.
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Create a copy of this font with a different size.
    pub fn with_size(&self, size: f32) -> Self {
        let mut font = self.clone();
        font.size = size;
        font
    }

    /// Create a copy of this font with a different weight.
    pub fn with_weight(&self, weight: FontWeight) -> Self {
        let mut font = self.clone();
        font.weight = weight;
        font
    }

    /// Create a copy of this font with a different style.
    pub fn with_style(&self, style: FontStyle) -> Self {
        let mut font = self.clone();
        font.style = style;
        font
    }

    /// Typographic line metrics at this size.
    pub fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: self.size * DEFAULT_ASCENT_RATIO,
            descent: self.size * DEFAULT_DESCENT_RATIO,
            leading: self.size * DEFAULT_LEADING_RATIO,
        }
    }

    /// Natural line height of this font.
    pub fn line_height(&self) -> f32 {
        self.line_metrics().line_height()
    }

    /// Convert to cosmic-text Attrs for text shaping.
    pub fn to_attrs(&self) -> cosmic_text::Attrs<'_> {
        cosmic_text::Attrs::new()
            .family(self.family.to_cosmic())
            .weight(self.weight.to_cosmic())
            .style(self.style.to_cosmic())
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, 16.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_creation() {
        let font = Font::new(FontFamily::name("Inter"), 14.0);
        assert_eq!(font.family(), &FontFamily::Name("Inter".into()));
        assert_eq!(font.size(), 14.0);
        assert_eq!(font.weight(), FontWeight::NORMAL);
        assert_eq!(font.style(), FontStyle::Normal);
    }

    #[test]
    fn test_font_modifiers() {
        let base = Font::default();
        let bold = base.with_weight(FontWeight::BOLD);
        assert_eq!(bold.weight(), FontWeight::BOLD);
        assert_eq!(bold.size(), base.size());
        assert_ne!(bold, base);
        assert_eq!(base.with_size(20.0).size(), 20.0);
        assert_eq!(base.with_style(FontStyle::Italic).style(), FontStyle::Italic);
    }

    #[test]
    fn test_line_metrics() {
        let font = Font::new(FontFamily::SansSerif, 10.0);
        let metrics = font.line_metrics();
        assert_eq!(metrics.ascent, 8.0);
        assert_eq!(metrics.descent, 2.0);
        assert!((font.line_height() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_weight_clamps() {
        assert_eq!(FontWeight::new(50).value(), 100);
        assert_eq!(FontWeight::new(1000).value(), 900);
        assert_eq!(FontFamily::Monospace.to_string(), "monospace");
    }
}
