//! Presentation settings for the TUI.

use crate::theme::{IconMode, IconSet, Theme, ThemeName};

/// UI configuration (from environment, overridden by flags).
#[derive(Debug, Clone, Default)]
pub struct UiConfig {
    /// Icon mode (Nerd, Unicode, or ASCII).
    pub icons: IconMode,
    /// Color palette.
    pub theme: ThemeName,
}

impl UiConfig {
    /// Create config from environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        Self::from_no_color(std::env::var_os("NO_COLOR").is_some())
    }

    fn from_no_color(no_color: bool) -> Self {
        if no_color {
            Self {
                icons: IconMode::Ascii,
                theme: ThemeName::HighContrast,
            }
        } else {
            Self::default()
        }
    }

    /// Override the icon mode.
    #[must_use]
    pub fn with_icons(mut self, icons: Option<IconMode>) -> Self {
        if let Some(icons) = icons {
            self.icons = icons;
        }
        self
    }

    /// Override the palette.
    #[must_use]
    pub fn with_theme(mut self, theme: Option<ThemeName>) -> Self {
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self
    }

    /// Build the icon set.
    pub fn icon_set(&self) -> IconSet {
        IconSet::new(self.icons)
    }

    /// Build the palette.
    pub fn palette(&self) -> Theme {
        Theme::named(self.theme)
    }
}
