use std::fmt;
use std::str::FromStr;

/// Document attribute the current theme is mirrored to.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeId {
    Ruby,
    Ember,
    Moss,
    Breeze,
    Honey,
    Mocha,
}

impl ThemeId {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::Ruby => "ruby",
            ThemeId::Ember => "ember",
            ThemeId::Moss => "moss",
            ThemeId::Breeze => "breeze",
            ThemeId::Honey => "honey",
            ThemeId::Mocha => "mocha",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        theme_by_id(s.trim())
            .map(|theme| theme.id)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub name: &'static str,
    pub description: &'static str,
}

pub const THEMES: [Theme; 6] = [
    Theme {
        id: ThemeId::Ruby,
        name: "Ruby Midnight",
        description: "Bold reds on deep black, with golden highlights.",
    },
    Theme {
        id: ThemeId::Ember,
        name: "Terracotta Ember",
        description: "Fiery elegance",
    },
    Theme {
        id: ThemeId::Moss,
        name: "Midnight Moss",
        description: "Dark forest greens with warm amber accents.",
    },
    Theme {
        id: ThemeId::Breeze,
        name: "Azure Breeze",
        description: "Oceanic serenity",
    },
    Theme {
        id: ThemeId::Honey,
        name: "Honey Horizon",
        description: "Soft cream base with honey gold and playful lavender.",
    },
    Theme {
        id: ThemeId::Mocha,
        name: "Mocha Sophisticate",
        description: "Warm sophistication",
    },
];

pub const DEFAULT_THEME: ThemeId = ThemeId::Breeze;

pub fn theme_by_id(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.id.as_str() == id)
}

fn theme_entry(id: ThemeId) -> &'static Theme {
    let idx = match id {
        ThemeId::Ruby => 0,
        ThemeId::Ember => 1,
        ThemeId::Moss => 2,
        ThemeId::Breeze => 3,
        ThemeId::Honey => 4,
        ThemeId::Mocha => 5,
    };
    &THEMES[idx]
}

/// The single process-wide theme context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeContext {
    current: ThemeId,
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self {
            current: DEFAULT_THEME,
        }
    }
}

impl ThemeContext {
    /// Uses the persisted preference when it names a known theme.
    pub fn init(persisted: Option<&str>) -> Self {
        let current = persisted
            .and_then(|id| id.parse::<ThemeId>().ok())
            .unwrap_or(DEFAULT_THEME);
        Self { current }
    }

    pub fn current(&self) -> &'static Theme {
        theme_entry(self.current)
    }

    pub fn current_id(&self) -> ThemeId {
        self.current
    }

    /// Switches theme; returns the new `data-theme` attribute value.
    pub fn set_theme(&mut self, id: ThemeId) -> &'static str {
        self.current = id;
        id.as_str()
    }

    pub fn document_attribute(&self) -> (&'static str, &'static str) {
        (THEME_ATTRIBUTE, self.current.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_falls_back_to_breeze() {
        assert_eq!(ThemeContext::init(None).current_id(), ThemeId::Breeze);
        assert_eq!(ThemeContext::init(Some("neon")).current_id(), ThemeId::Breeze);
        assert_eq!(ThemeContext::init(Some("mocha")).current_id(), ThemeId::Mocha);
    }

    #[test]
    fn set_theme_updates_document_attribute() {
        let mut ctx = ThemeContext::default();
        assert_eq!(ctx.set_theme(ThemeId::Ruby), "ruby");
        assert_eq!(ctx.document_attribute(), ("data-theme", "ruby"));
        assert_eq!(ctx.current().name, "Ruby Midnight");
    }
}
