//! Combat constants - all tunable values in one place

/// Bonus score for a controlled-side kill, added on top of the damage dealt
pub const KILL_BONUS: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_bonus_positive() {
        assert!(KILL_BONUS > 0);
    }
}
