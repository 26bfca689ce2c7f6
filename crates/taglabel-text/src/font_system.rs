//! Font database access for shaped layout.

/// Configuration for initializing the font system.
#[derive(Debug, Clone)]
pub struct FontSystemConfig {
    /// Whether to load system fonts on initialization.
    pub load_system_fonts: bool,
    /// Locale string for text shaping (e.g., "en-US").
    pub locale: String,
    /// Default serif font family name.
    pub serif_family: Option<String>,
    /// Default sans-serif font family name.
    pub sans_serif_family: Option<String>,
    /// Default monospace font family name.
    pub monospace_family: Option<String>,
}

impl Default for FontSystemConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            locale: sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()),
            serif_family: None,
            sans_serif_family: None,
            monospace_family: None,
        }
    }
}

impl FontSystemConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to load system fonts on initialization.
    pub fn load_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Set the locale for text shaping.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the default serif font family.
    pub fn serif_family(mut self, family: impl Into<String>) -> Self {
        self.serif_family = Some(family.into());
        self
    }

    /// Set the default sans-serif font family.
    pub fn sans_serif_family(mut self, family: impl Into<String>) -> Self {
        self.sans_serif_family = Some(family.into());
        self
    }

    /// Set the default monospace font family.
    pub fn monospace_family(mut self, family: impl Into<String>) -> Self {
        self.monospace_family = Some(family.into());
        self
    }
}

/// Owns the cosmic-text font system used by [`ShapedLayout`](crate::ShapedLayout).
///
/// Loading system fonts can take around a second; hosts usually create one
/// `FontSystem` at startup and hand it to the layout.
pub struct FontSystem {
    inner: cosmic_text::FontSystem,
}

impl FontSystem {
    /// Create a new font system with default configuration.
    pub fn new() -> Self {
        Self::with_config(FontSystemConfig::default())
    }

    /// Create a new font system with custom configuration.
    pub fn with_config(config: FontSystemConfig) -> Self {
        let mut inner = if config.load_system_fonts {
            cosmic_text::FontSystem::new()
        } else {
            let db = fontdb::Database::new();
            cosmic_text::FontSystem::new_with_locale_and_db(config.locale.clone(), db)
        };

        let db = inner.db_mut();
        if let Some(ref family) = config.serif_family {
            db.set_serif_family(family);
        }
        if let Some(ref family) = config.sans_serif_family {
            db.set_sans_serif_family(family);
        }
        if let Some(ref family) = config.monospace_family {
            db.set_monospace_family(family);
        }

        tracing::debug!(
            target: "taglabel::layout",
            faces = inner.db().len(),
            locale = %config.locale,
            "font system created"
        );
        Self { inner }
    }

    /// Get a mutable reference to the underlying cosmic-text font system.
    pub fn inner_mut(&mut self) -> &mut cosmic_text::FontSystem {
        &mut self.inner
    }

    /// Load font data from memory (TTF, OTF, TTC or OTC contents).
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.inner.db_mut().load_font_data(data);
    }

    /// Number of font faces in the database.
    pub fn face_count(&self) -> usize {
        self.inner.db().len()
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_system_creation() {
        let config = FontSystemConfig::new().load_system_fonts(false);
        let font_system = FontSystem::with_config(config);
        assert_eq!(font_system.face_count(), 0);
    }

    #[test]
    fn font_system_config_builder() {
        let config = FontSystemConfig::new()
            .load_system_fonts(false)
            .locale("ar-SA")
            .serif_family("Georgia")
            .sans_serif_family("Inter")
            .monospace_family("Iosevka");

        assert!(!config.load_system_fonts);
        assert_eq!(config.locale, "ar-SA");
        assert_eq!(config.serif_family.as_deref(), Some("Georgia"));
        assert_eq!(config.sans_serif_family.as_deref(), Some("Inter"));
        assert_eq!(config.monospace_family.as_deref(), Some("Iosevka"));
    }
}
