//! Candidate scoring: choose the retreat point farthest from the threat.
use glam::Vec3;

/// Picks the candidate with the greatest distance to `threat`.
///
/// Ties resolve to one of the maximal candidates. Returns `None` for an empty slice.
pub fn pick_farthest(candidates: &[Vec3], threat: Vec3) -> Option<Vec3> {
    candidates
        .iter()
        .copied()
        .max_by(|a, b| {
            a.distance_squared(threat)
                .total_cmp(&b.distance_squared(threat))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_strictly_farthest_candidate() {
        let candidates = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-8.0, 0.0, 3.0),
            Vec3::new(4.0, 0.0, 4.0),
        ];
        assert_eq!(
            pick_farthest(&candidates, Vec3::new(2.0, 0.0, 0.0)),
            Some(Vec3::new(-8.0, 0.0, 3.0))
        );
    }

    #[test]
    fn tie_resolves_to_a_maximal_candidate() {
        let a = Vec3::new(5.0, 0.0, 0.0);
        let b = Vec3::new(-5.0, 0.0, 0.0);
        let near = Vec3::new(1.0, 0.0, 0.0);
        let picked = pick_farthest(&[a, near, b], Vec3::ZERO).unwrap();
        assert!(picked == a || picked == b);
    }

    #[test]
    fn empty_candidates_select_nothing() {
        assert!(pick_farthest(&[], Vec3::ZERO).is_none());
    }
}
