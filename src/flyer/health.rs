//! Flyer health

/// Current and starting health. Never regenerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub life: i32,
    pub max_life: i32,
}

impl Health {
    pub fn new(max_life: i32) -> Self {
        Self {
            life: max_life,
            max_life,
        }
    }

    /// Apply damage. Zero damage counts as one point.
    /// Returns true if this hit left the flyer at or below zero.
    pub fn damage(&mut self, amount: u32) -> bool {
        let amount = i32::try_from(amount.max(1)).unwrap_or(i32::MAX);
        self.life = self.life.saturating_sub(amount);
        self.is_depleted()
    }

    pub fn is_depleted(&self) -> bool {
        self.life <= 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_one() {
        let health = Health::default();
        assert_eq!(health.life, 1);
        assert_eq!(health.max_life, 1);
    }

    #[test]
    fn test_zero_damage_counts_as_one() {
        let mut zero = Health::new(5);
        let mut one = Health::new(5);
        zero.damage(0);
        one.damage(1);
        assert_eq!(zero, one);
        assert_eq!(zero.life, 4);
    }

    #[rstest]
    #[case(3, &[1, 1], false)]
    #[case(3, &[1, 1, 1], true)]
    #[case(3, &[10], true)]
    #[case(1, &[0], true)]
    fn test_depletion(#[case] max: i32, #[case] hits: &[u32], #[case] depleted: bool) {
        let mut health = Health::new(max);
        for &hit in hits {
            health.damage(hit);
            assert!(health.life <= health.max_life);
        }
        assert_eq!(health.is_depleted(), depleted);
    }

    #[test]
    fn test_huge_damage_saturates() {
        let mut health = Health::new(2);
        assert!(health.damage(u32::MAX));
        assert!(health.damage(u32::MAX));
        assert_eq!(health.life, i32::MIN);
    }
}
