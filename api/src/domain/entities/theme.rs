//! Page theme
//!
//! The navigator ships a light and a dark skin over the same layout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// CSS custom properties for this theme
    pub fn css_variables(&self) -> &'static str {
        match self {
            Theme::Light => {
                "--bg:#f8fafc;--panel:#ffffff;--text:#0f172a;--muted:#64748b;\
                 --border:#e2e8f0;--accent:#2563eb;--loaded-bg:#d1fae5;--loaded-fg:#047857;\
                 --idle-bg:#f1f5f9;--idle-fg:#64748b;--error:#ef4444"
            }
            Theme::Dark => {
                "--bg:#0b1120;--panel:#111827;--text:#e5e7eb;--muted:#94a3b8;\
                 --border:#1f2937;--accent:#38bdf8;--loaded-bg:#064e3b;--loaded-fg:#6ee7b7;\
                 --idle-bg:#1e293b;--idle-fg:#94a3b8;--error:#f87171"
            }
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}
