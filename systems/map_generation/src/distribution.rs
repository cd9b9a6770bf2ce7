//! Level-tiered power-up counts.

use rand::Rng;
use tile_maze_core::{LevelTier, PowerupKind};

/// Number of power-ups of each kind a level should attempt to place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerupDistribution {
    /// Speed power-ups.
    pub speed: u32,
    /// Extra-time power-ups.
    pub extra_time: u32,
    /// Bonus coins.
    pub bonus: u32,
}

impl PowerupDistribution {
    /// Draws the distribution for the provided level.
    ///
    /// Early levels always get one speed boost and two or three coins. Mid
    /// levels add an extra-time pickup and up to four coins. Late levels only
    /// occasionally hand out utility power-ups and between one and three coins.
    pub fn for_level<R>(level: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        match LevelTier::for_level(level) {
            LevelTier::Early => Self {
                speed: 1,
                extra_time: 0,
                bonus: rng.gen_range(2..=3),
            },
            LevelTier::Mid => Self {
                speed: 1,
                extra_time: 1,
                bonus: rng.gen_range(2..=4),
            },
            LevelTier::Late => Self {
                speed: u32::from(rng.gen_bool(0.3)),
                extra_time: u32::from(rng.gen_bool(0.2)),
                bonus: rng.gen_range(1..=3),
            },
        }
    }

    /// Count requested for the provided kind.
    #[must_use]
    pub const fn count(&self, kind: PowerupKind) -> u32 {
        match kind {
            PowerupKind::Speed => self.speed,
            PowerupKind::ExtraTime => self.extra_time,
            PowerupKind::Bonus => self.bonus,
        }
    }

    /// Kind and count pairs in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (PowerupKind, u32)> + '_ {
        PowerupKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.count(kind)))
    }

    /// Total number of power-ups requested.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.speed + self.extra_time + self.bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn early_levels_stay_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let distribution = PowerupDistribution::for_level(5, &mut rng);
            assert_eq!(distribution.speed, 1);
            assert_eq!(distribution.extra_time, 0);
            assert!((2..=3).contains(&distribution.bonus));
        }
    }

    #[test]
    fn mid_levels_stay_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let distribution = PowerupDistribution::for_level(30, &mut rng);
            assert_eq!(distribution.speed, 1);
            assert_eq!(distribution.extra_time, 1);
            assert!((2..=4).contains(&distribution.bonus));
        }
    }

    #[test]
    fn late_levels_stay_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let mut saw_speed = false;
        let mut saw_no_speed = false;
        for _ in 0..400 {
            let distribution = PowerupDistribution::for_level(80, &mut rng);
            assert!(distribution.speed <= 1);
            assert!(distribution.extra_time <= 1);
            assert!((1..=3).contains(&distribution.bonus));
            saw_speed |= distribution.speed == 1;
            saw_no_speed |= distribution.speed == 0;
        }
        assert!(saw_speed && saw_no_speed, "late tier speed should vary");
    }

    #[test]
    fn iteration_follows_placement_order() {
        let distribution = PowerupDistribution {
            speed: 1,
            extra_time: 0,
            bonus: 3,
        };
        let pairs: Vec<_> = distribution.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (PowerupKind::Speed, 1),
                (PowerupKind::ExtraTime, 0),
                (PowerupKind::Bonus, 3),
            ]
        );
        assert_eq!(distribution.total(), 4);
    }
}
