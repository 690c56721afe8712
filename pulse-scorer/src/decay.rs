//! Recency tiers turning article age into a multiplier.
#![forbid(unsafe_code)]

use chrono::TimeDelta;

use crate::ScoringConfigError;

/// `(max_age_hours, multiplier)` pairs, youngest first.
pub(crate) const DEFAULT_DECAY_TIERS: &[(u32, f64)] = &[
    (12, 1.2),
    (48, 1.0),
    (7 * 24, 0.8),
    (14 * 24, 0.5),
    (21 * 24, 0.3),
];

/// Multiplier for articles older than every tier.
pub const DEFAULT_DECAY_FLOOR: f64 = 0.1;

/// Articles no older than `max_age_hours` receive `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTier {
    max_age_hours: u32,
    max_age: TimeDelta,
    multiplier: f64,
}

impl DecayTier {
    /// Create a tier. Bounds beyond the representable range match any age.
    #[must_use]
    pub fn new(max_age_hours: u32, multiplier: f64) -> Self {
        let max_age = TimeDelta::try_hours(i64::from(max_age_hours)).unwrap_or(TimeDelta::MAX);
        Self {
            max_age_hours,
            max_age,
            multiplier,
        }
    }

    /// Inclusive upper bound in hours.
    #[must_use]
    pub const fn max_age_hours(&self) -> u32 {
        self.max_age_hours
    }

    /// Multiplier applied within the tier.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

/// Validated, monotonically non-increasing decay schedule.
///
/// # Examples
/// ```
/// use chrono::TimeDelta;
/// use pulse_scorer::TimeDecay;
///
/// let decay = TimeDecay::default();
/// assert_eq!(decay.multiplier(TimeDelta::hours(11)), 1.2);
/// assert_eq!(decay.multiplier(TimeDelta::days(30)), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDecay {
    tiers: Vec<DecayTier>,
    floor: f64,
}

impl TimeDecay {
    /// Validate `tiers` and `floor` into a schedule.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when bounds do not strictly increase,
    /// when a multiplier is negative, non-finite or larger than its
    /// predecessor, or when `floor` exceeds the last multiplier.
    pub fn new(tiers: Vec<DecayTier>, floor: f64) -> Result<Self, ScoringConfigError> {
        let mut previous: Option<&DecayTier> = None;
        for (index, tier) in tiers.iter().enumerate() {
            if !tier.multiplier.is_finite() || tier.multiplier < 0.0 {
                return Err(ScoringConfigError::InvalidDecayMultiplier {
                    index,
                    value: tier.multiplier,
                });
            }
            if let Some(prior) = previous {
                if tier.max_age_hours <= prior.max_age_hours {
                    return Err(ScoringConfigError::TierBoundNotIncreasing {
                        index,
                        max_age_hours: tier.max_age_hours,
                    });
                }
                if tier.multiplier > prior.multiplier {
                    return Err(ScoringConfigError::DecayNotMonotonic {
                        index,
                        previous: prior.multiplier,
                        value: tier.multiplier,
                    });
                }
            }
            previous = Some(tier);
        }

        let ceiling = previous.map_or(f64::MAX, |tier| tier.multiplier);
        if !floor.is_finite() || floor < 0.0 || floor > ceiling {
            return Err(ScoringConfigError::InvalidDecayFloor {
                value: floor,
                ceiling,
            });
        }
        Ok(Self { tiers, floor })
    }

    /// Tiers youngest first.
    #[must_use]
    pub fn tiers(&self) -> &[DecayTier] {
        &self.tiers
    }

    /// Multiplier for articles older than every tier.
    #[must_use]
    pub const fn floor(&self) -> f64 {
        self.floor
    }

    /// Multiplier for an article of the given age.
    ///
    /// Negative ages are treated as zero.
    #[must_use]
    pub fn multiplier(&self, age: TimeDelta) -> f64 {
        let clamped = age.max(TimeDelta::zero());
        self.tiers
            .iter()
            .find(|tier| clamped <= tier.max_age)
            .map_or(self.floor, |tier| tier.multiplier)
    }
}

impl Default for TimeDecay {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_DECAY_TIERS
                .iter()
                .map(|&(hours, multiplier)| DecayTier::new(hours, multiplier))
                .collect(),
            floor: DEFAULT_DECAY_FLOOR,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the decay schedule.

    use chrono::TimeDelta;
    use rstest::rstest;

    use super::{DecayTier, TimeDecay};
    use crate::ScoringConfigError;

    #[rstest]
    #[case(TimeDelta::zero(), 1.2)]
    #[case(TimeDelta::hours(12), 1.2)]
    #[case(TimeDelta::hours(12) + TimeDelta::seconds(1), 1.0)]
    #[case(TimeDelta::hours(48), 1.0)]
    #[case(TimeDelta::days(7), 0.8)]
    #[case(TimeDelta::days(10), 0.5)]
    #[case(TimeDelta::days(21), 0.3)]
    #[case(TimeDelta::days(22), 0.1)]
    #[case(TimeDelta::hours(-5), 1.2)]
    fn default_tiers_have_inclusive_bounds(#[case] age: TimeDelta, #[case] expected: f64) {
        assert_eq!(TimeDecay::default().multiplier(age), expected);
    }

    #[rstest]
    fn rejects_decreasing_bounds() {
        let tiers = vec![DecayTier::new(24, 1.0), DecayTier::new(24, 0.5)];
        let err = TimeDecay::new(tiers, 0.1).expect_err("duplicate bound");
        assert!(matches!(
            err,
            ScoringConfigError::TierBoundNotIncreasing { index: 1, max_age_hours: 24 }
        ));
    }

    #[rstest]
    fn rejects_rising_multipliers() {
        let tiers = vec![DecayTier::new(12, 0.8), DecayTier::new(24, 1.0)];
        let err = TimeDecay::new(tiers, 0.1).expect_err("rising multiplier");
        assert!(matches!(err, ScoringConfigError::DecayNotMonotonic { index: 1, .. }));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    fn rejects_invalid_multipliers(#[case] value: f64) {
        let err = TimeDecay::new(vec![DecayTier::new(12, value)], 0.0).expect_err("invalid");
        assert!(matches!(err, ScoringConfigError::InvalidDecayMultiplier { index: 0, .. }));
    }

    #[rstest]
    #[case(0.9)]
    #[case(-0.1)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_floor(#[case] floor: f64) {
        let err = TimeDecay::new(vec![DecayTier::new(12, 0.8)], floor).expect_err("bad floor");
        assert!(matches!(err, ScoringConfigError::InvalidDecayFloor { .. }));
    }

    #[rstest]
    fn floor_only_schedule_is_constant() {
        let decay = TimeDecay::new(Vec::new(), 0.4).expect("valid schedule");
        assert_eq!(decay.multiplier(TimeDelta::zero()), 0.4);
        assert_eq!(decay.multiplier(TimeDelta::days(400)), 0.4);
    }

    #[rstest]
    fn huge_bound_matches_any_age() {
        let decay = TimeDecay::new(vec![DecayTier::new(u32::MAX, 0.7)], 0.1).expect("valid");
        assert_eq!(decay.multiplier(TimeDelta::days(365 * 1000)), 0.7);
    }

    #[rstest]
    fn default_schedule_validates() {
        let default = TimeDecay::default();
        let rebuilt =
            TimeDecay::new(default.tiers().to_vec(), default.floor()).expect("defaults valid");
        assert_eq!(rebuilt, default);
    }
}
