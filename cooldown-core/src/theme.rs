use serde::{Deserialize, Serialize};

/// Chế độ màu toàn cục của trang.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Giá trị đã lưu được ưu tiên, sau đó tới tuỳ chọn của hệ điều hành.
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Self {
        match saved {
            Some(value) => Theme::parse(value).unwrap_or_default(),
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_value_wins_over_preference() {
        assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
        assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Light);
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
