// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Voltia.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use serde::{Deserialize, Serialize};

/// Classification of a day's price level against a reference baseline.
///
/// The service historically published Spanish labels, accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayRating {
    /// Clearly below the baseline
    #[serde(alias = "BUENO")]
    Good,
    /// Within the tolerance band (both edges included)
    Normal,
    /// Clearly above the baseline
    #[serde(alias = "MALO")]
    Bad,
}

impl DayRating {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Normal => "NORMAL",
            Self::Bad => "BAD",
        }
    }
}

impl std::fmt::Display for DayRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_wire_names() {
        assert_eq!(serde_json::to_string(&DayRating::Good).unwrap(), "\"GOOD\"");
        assert_eq!(
            serde_json::from_str::<DayRating>("\"MALO\"").unwrap(),
            DayRating::Bad
        );
        assert_eq!(
            serde_json::from_str::<DayRating>("\"NORMAL\"").unwrap(),
            DayRating::Normal
        );
    }
}
