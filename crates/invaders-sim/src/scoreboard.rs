//! Score and lives.

/// Running score and remaining lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    lives: u32,
    max_lives: u32,
}

impl Scoreboard {
    pub fn new(max_lives: u32) -> Self {
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
        }
    }

    /// Add points and return the new total.
    pub fn add(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Remove one life, clamped to `[0, max_lives]`. Returns what is left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1).min(self.max_lives);
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_clamp_at_zero() {
        let mut board = Scoreboard::new(2);
        assert_eq!(board.lose_life(), 1);
        assert_eq!(board.lose_life(), 0);
        assert_eq!(board.lose_life(), 0);
    }

    #[test]
    fn test_score_accumulates() {
        let mut board = Scoreboard::new(3);
        assert_eq!(board.add(30), 30);
        assert_eq!(board.add(0), 30);
        assert_eq!(board.add(10), 40);
        assert_eq!(board.score(), 40);
    }
}
