//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Parse a mode name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nerd" => Some(Self::Nerd),
            "unicode" => Some(Self::Unicode),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    // === Avatars ===

    /// Assistant avatar (a shopping cart, the scraper's mascot).
    pub fn assistant_avatar(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰄐",
            IconMode::Unicode => "🛒",
            IconMode::Ascii => "[AI]",
        }
    }

    pub fn user_avatar(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰀄",
            IconMode::Unicode => "👤",
            IconMode::Ascii => "[U]",
        }
    }

    // === Input Bar ===

    pub fn send(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰒊",
            IconMode::Unicode => "➤",
            IconMode::Ascii => ">>",
        }
    }

    pub fn attach(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰏢",
            IconMode::Unicode => "📎",
            IconMode::Ascii => "+",
        }
    }

    // === Status ===

    pub fn typing(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "…",
            IconMode::Ascii => "...",
        }
    }

    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "│",
            IconMode::Ascii => "|",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_icons_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        for icon in [
            icons.assistant_avatar(),
            icons.user_avatar(),
            icons.send(),
            icons.attach(),
            icons.typing(),
            icons.separator(),
        ] {
            assert!(icon.is_ascii(), "{icon} should be ASCII");
        }
    }

    #[test]
    fn test_avatars_differ_by_sender() {
        for mode in [IconMode::Nerd, IconMode::Unicode, IconMode::Ascii] {
            let icons = IconSet::new(mode);
            assert_ne!(icons.assistant_avatar(), icons.user_avatar());
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(IconMode::from_name("ASCII"), Some(IconMode::Ascii));
        assert_eq!(IconMode::from_name("nerd"), Some(IconMode::Nerd));
        assert_eq!(IconMode::from_name("emoji"), None);
    }
}
