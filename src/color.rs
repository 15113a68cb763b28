use std::fmt;

use serde::Serialize;

/// Sidebar color attached to every Slack attachment.
///
/// The chat API understands the three named colors used here; anything that
/// is not an error or a warning renders with the neutral `good` bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentColor {
    Danger,
    Warning,
    Good,
}

impl Default for AttachmentColor {
    fn default() -> Self {
        Self::Good
    }
}

impl fmt::Display for AttachmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AttachmentColor {
    /// Picks the color for a record severity.
    ///
    /// Matching is case-sensitive; unrecognized levels render as `good`.
    pub fn from_level(level: &str) -> Self {
        match level {
            "error" => Self::Danger,
            "warning" | "warn" => Self::Warning,
            _ => Self::Good,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Good => "good",
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::AttachmentColor;

    #[rstest]
    #[case("error", AttachmentColor::Danger)]
    #[case("warning", AttachmentColor::Warning)]
    #[case("warn", AttachmentColor::Warning)]
    #[case("info", AttachmentColor::Good)]
    #[case("debug", AttachmentColor::Good)]
    #[case("silly", AttachmentColor::Good)]
    #[case("", AttachmentColor::Good)]
    fn maps_levels_to_colors(#[case] level: &str, #[case] expected: AttachmentColor) {
        assert_eq!(AttachmentColor::from_level(level), expected);
    }

    #[rstest]
    #[case("ERROR")]
    #[case("Error")]
    #[case("WARN")]
    fn uppercase_levels_fall_back_to_good(#[case] level: &str) {
        assert_eq!(AttachmentColor::from_level(level), AttachmentColor::Good);
    }

    #[rstest]
    fn serializes_as_wire_string(
        #[values(AttachmentColor::Danger, AttachmentColor::Warning, AttachmentColor::Good)]
        color: AttachmentColor,
    ) {
        let json = serde_json::to_string(&color).expect("serialize color");
        assert_eq!(json, format!("\"{color}\""));
    }
}
