//! Exit-code classification.
//!
//! Both wrapped tools follow the detailed-exit-code convention:
//!
//! | code  | meaning                         | [`Classification`] |
//! |-------|---------------------------------|--------------------|
//! | 0     | succeeded, nothing changed      | `Unchanged`        |
//! | 2     | succeeded, state changed        | `Changed`          |
//! | 1     | failed                          | `Fatal`            |
//! | other | undefined by the tools          | `Fatal`            |
//!
//! Undefined codes are fatal so a tool crash or a signal (reported as `-1`
//! by the process adapter) can never be mistaken for a successful run. The
//! raw code travels with the resulting error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome bucket for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Unchanged,
    Changed,
    Fatal,
}

impl Classification {
    pub const fn from_exit_code(code: i32) -> Self {
        match code {
            0 => Self::Unchanged,
            2 => Self::Changed,
            _ => Self::Fatal,
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_codes() {
        assert_eq!(Classification::from_exit_code(0), Classification::Unchanged);
        assert_eq!(Classification::from_exit_code(1), Classification::Fatal);
        assert_eq!(Classification::from_exit_code(2), Classification::Changed);
    }

    #[test]
    fn undefined_codes_are_fatal() {
        for code in [-1, 3, 127, 130, 255] {
            assert!(Classification::from_exit_code(code).is_fatal(), "code {code}");
        }
    }

    #[test]
    fn only_two_is_changed() {
        assert!(Classification::from_exit_code(2).is_changed());
        assert!(!Classification::from_exit_code(0).is_changed());
        assert!(!Classification::from_exit_code(1).is_changed());
    }
}
