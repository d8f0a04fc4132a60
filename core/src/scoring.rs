//! Survival score computation and tier classification.
//!
//! The score is a fixed-weight average of the six rating dimensions; the
//! weights sum to 1.0, so a vector with every dimension at `v` scores
//! exactly `v`.

use crate::types::project::{RatingVector, Tier};

pub const WEIGHT_INSIGHT_COMPRESSION: f64 = 0.20;
pub const WEIGHT_SUBSTRATE_EFFICIENCY: f64 = 0.18;
pub const WEIGHT_BROAD_UTILITY: f64 = 0.22;
pub const WEIGHT_AWARENESS: f64 = 0.15;
pub const WEIGHT_AGENT_FRICTION: f64 = 0.15;
pub const WEIGHT_HUMAN_COEFFICIENT: f64 = 0.10;

/// Weighted survival score, rounded to one decimal place.
pub fn score(ratings: &RatingVector) -> f64 {
    let raw = ratings.insight_compression * WEIGHT_INSIGHT_COMPRESSION
        + ratings.substrate_efficiency * WEIGHT_SUBSTRATE_EFFICIENCY
        + ratings.broad_utility * WEIGHT_BROAD_UTILITY
        + ratings.awareness * WEIGHT_AWARENESS
        + ratings.agent_friction * WEIGHT_AGENT_FRICTION
        + ratings.human_coefficient * WEIGHT_HUMAN_COEFFICIENT;

    (raw * 10.0).round() / 10.0
}

/// Tier thresholds are inclusive lower bounds: a boundary score belongs to
/// the higher tier.
pub fn tier(score: f64) -> Tier {
    if score >= 9.0 {
        Tier::S
    } else if score >= 8.0 {
        Tier::A
    } else if score >= 7.0 {
        Tier::B
    } else if score >= 6.0 {
        Tier::C
    } else if score >= 5.0 {
        Tier::D
    } else {
        Tier::F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_vector_scores_its_value() {
        // Weights sum to 1.0, so an all-v vector must score v.
        for v in [1.0, 2.5, 5.0, 7.3, 10.0] {
            assert_eq!(score(&RatingVector::uniform(v)), v);
        }
    }

    #[test]
    fn all_tens_is_a_perfect_s() {
        let s = score(&RatingVector::uniform(10.0));
        assert_eq!(s, 10.0);
        assert_eq!(tier(s), Tier::S);
    }

    #[test]
    fn all_fives_lands_in_d() {
        let s = score(&RatingVector::uniform(5.0));
        assert_eq!(s, 5.0);
        assert_eq!(tier(s), Tier::D);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(tier(9.0), Tier::S);
        assert_eq!(tier(8.999), Tier::A);
        assert_eq!(tier(8.0), Tier::A);
        assert_eq!(tier(7.0), Tier::B);
        assert_eq!(tier(6.0), Tier::C);
        assert_eq!(tier(5.0), Tier::D);
        assert_eq!(tier(4.999), Tier::F);
    }

    #[test]
    fn score_is_monotonic_in_each_dimension() {
        let base = RatingVector::uniform(5.0);
        let bumps: [fn(&mut RatingVector); 6] = [
            |r| r.insight_compression += 2.0,
            |r| r.substrate_efficiency += 2.0,
            |r| r.broad_utility += 2.0,
            |r| r.awareness += 2.0,
            |r| r.agent_friction += 2.0,
            |r| r.human_coefficient += 2.0,
        ];
        for bump in bumps {
            let mut raised = base;
            bump(&mut raised);
            assert!(score(&raised) >= score(&base));
        }
    }

    #[test]
    fn rounding_happens_at_one_decimal() {
        // 9.2*0.20 + 9.5*0.18 + 9.8*0.22 + 9.7*0.15 + 7.8*0.15 + 8.5*0.10
        // = 9.181 -> 9.2
        let ratings = RatingVector {
            insight_compression: 9.2,
            substrate_efficiency: 9.5,
            broad_utility: 9.8,
            awareness: 9.7,
            agent_friction: 7.8,
            human_coefficient: 8.5,
        };
        assert_eq!(score(&ratings), 9.2);
    }

    #[test]
    fn missing_dimensions_contribute_nothing() {
        use crate::types::project::RatingPatch;

        let patch = RatingPatch {
            broad_utility: Some(10.0),
            ..Default::default()
        };
        assert_eq!(score(&patch.to_vector()), 2.2);
    }
}
