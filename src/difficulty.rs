use crate::{ConfigError, GameError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board dimensions and mine count for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl BoardConfig {
    pub const fn new(rows: usize, cols: usize, mines: usize) -> Self {
        Self { rows, cols, mines }
    }

    /// `None` when `rows * cols` overflows.
    pub const fn total_cells(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Rejects empty or oversized boards and boards with no room for a safe cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { rows, cols, mines } = *self;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard { rows, cols });
        }
        // Positions are i32 and ndarray caps element counts at isize::MAX
        let total = self
            .total_cells()
            .filter(|&total| total <= isize::MAX as usize)
            .filter(|_| i32::try_from(rows).is_ok() && i32::try_from(cols).is_ok())
            .ok_or(ConfigError::BoardTooLarge { rows, cols })?;
        if mines >= total {
            return Err(ConfigError::TooManyMines { rows, cols, mines });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Difficulty::Easy => BoardConfig::new(12, 12, 48),
            Difficulty::Medium => BoardConfig::new(16, 16, 80),
            Difficulty::Hard => BoardConfig::new(18, 18, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn test_presets() {
        assert_eq!(Difficulty::Easy.config(), BoardConfig::new(12, 12, 48));
        assert_eq!(Difficulty::Medium.config(), BoardConfig::new(16, 16, 80));
        assert_eq!(Difficulty::Hard.config(), BoardConfig::new(18, 18, 99));
        for difficulty in Difficulty::ALL {
            assert!(difficulty.config().validate().is_ok());
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "insane".parse::<Difficulty>(),
            Err(GameError::Config(ConfigError::UnknownDifficulty(
                "insane".to_string()
            )))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_validate_rejects_oversized_boards() {
        let overflowing = BoardConfig::new(usize::MAX, 2, 1);
        assert_eq!(overflowing.total_cells(), None);
        assert_eq!(
            overflowing.validate(),
            Err(ConfigError::BoardTooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );

        let too_many_rows = i32::MAX as usize + 1;
        assert_eq!(
            BoardConfig::new(too_many_rows, 1, 0).validate(),
            Err(ConfigError::BoardTooLarge {
                rows: too_many_rows,
                cols: 1
            })
        );
        assert!(matches!(
            Board::new(usize::MAX, usize::MAX, 3),
            Err(GameError::Config(ConfigError::BoardTooLarge { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert_eq!(
            BoardConfig::new(0, 5, 1).validate(),
            Err(ConfigError::EmptyBoard { rows: 0, cols: 5 })
        );
        assert_eq!(
            BoardConfig::new(3, 3, 9).validate(),
            Err(ConfigError::TooManyMines {
                rows: 3,
                cols: 3,
                mines: 9
            })
        );
        assert!(BoardConfig::new(3, 3, 8).validate().is_ok());
        assert_eq!(BoardConfig::new(3, 4, 1).total_cells(), Some(12));
        assert!(BoardConfig::new(1, 2, 0).validate().is_ok());
    }
}
