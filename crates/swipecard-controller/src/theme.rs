//! Card surface colors.
//!
//! The controller only reads from the host's theme: it asks for the current
//! appearance and picks the matching surface color.

use swipecard_core::{Appearance, Color};

/// Read-only view of the host's theme.
pub trait ThemeProvider: Send + Sync {
    /// The appearance preference in effect.
    fn appearance(&self) -> Appearance;

    /// Whether the platform is in dark mode. Only consulted for
    /// `Appearance::System`.
    fn system_dark(&self) -> bool {
        false
    }

    /// Whether the card should render with dark colors right now.
    fn is_dark(&self) -> bool {
        match self.appearance() {
            Appearance::Light => false,
            Appearance::Dark => true,
            Appearance::System => self.system_dark(),
        }
    }
}

/// A theme driven by a fixed appearance preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTheme {
    /// Light, dark, or follow system.
    pub appearance: Appearance,
    /// System appearance, consulted only for `Appearance::System`.
    pub system_dark: bool,
}

impl StaticTheme {
    pub fn new(appearance: Appearance) -> Self {
        Self {
            appearance,
            system_dark: false,
        }
    }
}

impl ThemeProvider for StaticTheme {
    fn appearance(&self) -> Appearance {
        self.appearance
    }

    fn system_dark(&self) -> bool {
        self.system_dark
    }
}

/// Surface colors for both appearances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPalette {
    pub light: Color,
    pub dark: Color,
}

impl Default for CardPalette {
    fn default() -> Self {
        Self {
            light: Color::WHITE,
            dark: Color::rgb(0x1A, 0x1D, 0x29),
        }
    }
}

impl CardPalette {
    /// Surface color for the provider's current appearance.
    pub fn background(&self, theme: &dyn ThemeProvider) -> Color {
        if theme.is_dark() {
            self.dark
        } else {
            self.light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_theme() {
        assert!(!StaticTheme::new(Appearance::Light).is_dark());
        assert!(StaticTheme::new(Appearance::Dark).is_dark());
        assert!(!StaticTheme::new(Appearance::System).is_dark());

        let system_dark = StaticTheme {
            appearance: Appearance::System,
            system_dark: true,
        };
        assert!(system_dark.is_dark());
    }

    struct AlwaysDark;

    impl ThemeProvider for AlwaysDark {
        fn appearance(&self) -> Appearance {
            Appearance::Dark
        }
    }

    #[test]
    fn test_provider_only_needs_appearance() {
        assert_eq!(AlwaysDark.appearance(), Appearance::Dark);
        assert!(AlwaysDark.is_dark());
        assert_eq!(
            CardPalette::default().background(&AlwaysDark),
            Color::rgb(0x1A, 0x1D, 0x29)
        );
    }

    #[test]
    fn test_palette_background() {
        let palette = CardPalette::default();
        assert_eq!(
            palette.background(&StaticTheme::new(Appearance::Dark)).to_string(),
            "#1A1D29"
        );
        assert_eq!(palette.background(&StaticTheme::new(Appearance::Light)), Color::WHITE);
    }
}
