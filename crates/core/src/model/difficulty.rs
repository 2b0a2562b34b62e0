use std::fmt;

/// Difficulty tier of a problem.
///
/// The set is closed; anything else coming from the remote service is
/// treated as "no tier" by the caller (see [`Difficulty::parse`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Every tier in reporting order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a tier label. Only the exact labels of [`Difficulty::as_str`]
    /// match; `"easy"` or `" Hard"` are unrecognized and yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == raw)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!(Difficulty::parse("Easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("Medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("Hard"), Some(Difficulty::Hard));

        assert_eq!(Difficulty::parse("easy"), None);
        assert_eq!(Difficulty::parse(" Hard"), None);
        assert_eq!(Difficulty::parse("MEDIUM"), None);
    }

    #[test]
    fn unknown_labels_have_no_tier() {
        assert_eq!(Difficulty::parse("Expert"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn all_is_in_reporting_order() {
        let labels: Vec<_> = Difficulty::ALL.iter().map(Difficulty::as_str).collect();
        assert_eq!(labels, ["Easy", "Medium", "Hard"]);
    }
}
