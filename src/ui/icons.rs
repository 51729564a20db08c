//! Icon glyphs

use crate::state::Severity;

/// Icons used across the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    CheckCircle,
    AlertCircle,
    Info,
    Close,
    Menu,
    Mail,
    Download,
    Bullet,
    Project,
}

impl Icon {
    /// Glyph for this icon. Plain ASCII when unicode icons are off.
    pub fn glyph(self, unicode: bool) -> &'static str {
        if unicode {
            match self {
                Icon::CheckCircle => "✔",
                Icon::AlertCircle => "⚠",
                Icon::Info => "ℹ",
                Icon::Close => "✕",
                Icon::Menu => "≡",
                Icon::Mail => "✉",
                Icon::Download => "⤓",
                Icon::Bullet => "•",
                Icon::Project => "▸",
            }
        } else {
            match self {
                Icon::CheckCircle => "+",
                Icon::AlertCircle => "!",
                Icon::Info => "i",
                Icon::Close => "x",
                Icon::Menu => "=",
                Icon::Mail => "@",
                Icon::Download => "v",
                Icon::Bullet => "*",
                Icon::Project => ">",
            }
        }
    }

    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Success => Icon::CheckCircle,
            Severity::Error => Icon::AlertCircle,
            Severity::Info => Icon::Info,
        }
    }
}
