//! Per-frame drift of the decorative pairs.
//!
//! Each pair index maps to exactly one of four additive drift rules,
//! checked in precedence order (an index divisible by both 5 and 3 gets
//! the divisible-by-5 rule). The offsets accumulate without bound over
//! the session; nothing clamps them.

use glam::Vec2;

use super::object::DecorPair;

/// Which drift rule a pair index falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftRule {
    /// Indices divisible by 5: (cos t, sin t) / 300.
    EveryFifth,
    /// Remaining indices divisible by 3: (cos t, sin t) / 400.
    EveryThird,
    /// Remaining even indices: (sin t, cos t) / 500.
    EverySecond,
    /// Everything else: (sin t, cos t) / 600.
    Remainder,
}

impl DriftRule {
    /// Classify a pair index. Total and mutually exclusive.
    #[must_use]
    pub fn for_index(i: usize) -> Self {
        if i % 5 == 0 {
            Self::EveryFifth
        } else if i % 3 == 0 {
            Self::EveryThird
        } else if i % 2 == 0 {
            Self::EverySecond
        } else {
            Self::Remainder
        }
    }

    /// The per-frame (x, y) offset at elapsed time `t`.
    #[must_use]
    pub fn offset(self, t: f32) -> Vec2 {
        match self {
            Self::EveryFifth => Vec2::new(t.cos(), t.sin()) / 300.0,
            Self::EveryThird => Vec2::new(t.cos(), t.sin()) / 400.0,
            Self::EverySecond => Vec2::new(t.sin(), t.cos()) / 500.0,
            Self::Remainder => Vec2::new(t.sin(), t.cos()) / 600.0,
        }
    }
}

/// Apply one frame of drift to every pair.
pub fn apply(pairs: &mut [DecorPair], t: f32) {
    for (i, pair) in pairs.iter_mut().enumerate() {
        let offset = DriftRule::for_index(i).offset(t);
        pair.cuboid.position.x += offset.x;
        pair.cuboid.position.y += offset.y;
        pair.donut.position.x += offset.x;
        pair.donut.position.y += offset.y;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::object::Transform;

    #[test]
    fn classification_is_total() {
        for i in 0..1000 {
            // Exactly one rule matches, by construction; just verify the
            // expected precedence on the shared multiples.
            let rule = DriftRule::for_index(i);
            if i % 5 == 0 {
                assert_eq!(rule, DriftRule::EveryFifth);
            } else if i % 3 == 0 {
                assert_eq!(rule, DriftRule::EveryThird);
            } else if i % 2 == 0 {
                assert_eq!(rule, DriftRule::EverySecond);
            } else {
                assert_eq!(rule, DriftRule::Remainder);
            }
        }
    }

    #[test]
    fn fifteen_takes_the_fifth_rule() {
        // 15 satisfies both %5 and %3; precedence picks %5.
        assert_eq!(DriftRule::for_index(15), DriftRule::EveryFifth);
        assert_eq!(DriftRule::for_index(6), DriftRule::EveryThird);
        assert_eq!(DriftRule::for_index(4), DriftRule::EverySecond);
        assert_eq!(DriftRule::for_index(7), DriftRule::Remainder);
    }

    #[test]
    fn amplitudes_match_divisors() {
        let t = 0.0;
        // cos(0)=1, sin(0)=0
        assert_eq!(DriftRule::EveryFifth.offset(t).x, 1.0 / 300.0);
        assert_eq!(DriftRule::EveryThird.offset(t).x, 1.0 / 400.0);
        assert_eq!(DriftRule::EverySecond.offset(t).y, 1.0 / 500.0);
        assert_eq!(DriftRule::Remainder.offset(t).y, 1.0 / 600.0);
    }

    #[test]
    fn drift_moves_both_members_identically() {
        let mut pairs = vec![DecorPair {
            cuboid: Transform {
                position: Vec3::ZERO,
                ..Transform::IDENTITY
            },
            donut: Transform {
                position: Vec3::new(1.0, 1.0, 1.0),
                ..Transform::IDENTITY
            },
        }];
        apply(&mut pairs, 0.5);
        let c = pairs[0].cuboid.position;
        let d = pairs[0].donut.position;
        assert!((c.x - (d.x - 1.0)).abs() < 1e-6);
        assert!((c.y - (d.y - 1.0)).abs() < 1e-6);
        // z never drifts
        assert_eq!(c.z, 0.0);
        assert_eq!(d.z, 1.0);
    }

    #[test]
    fn drift_accumulates() {
        let mut pairs = vec![DecorPair {
            cuboid: Transform::IDENTITY,
            donut: Transform::IDENTITY,
        }];
        apply(&mut pairs, 0.0);
        apply(&mut pairs, 0.0);
        // Index 0 is EveryFifth: x gains cos(0)/300 per call.
        assert!((pairs[0].cuboid.position.x - 2.0 / 300.0).abs() < 1e-7);
    }
}
