use rand::Rng;

use crate::models::{Coordinates, SpecialistCategory, SpecialistMarker};

pub const DEFAULT_MARKER_COUNT: usize = 5;

/// Maximum offset in degrees applied to each axis.
pub const JITTER_DEGREES: f64 = 0.05;

/// Scatters `count` synthetic specialist markers around `center`.
///
/// Each axis gets an independent offset strictly inside
/// `(-JITTER_DEGREES, JITTER_DEGREES)` and each marker an independently drawn
/// category. No clamping is done near the poles or the antimeridian.
pub fn generate_nearby<R: Rng + ?Sized>(
    center: Coordinates,
    count: usize,
    rng: &mut R,
) -> Vec<SpecialistMarker> {
    (0..count)
        .map(|_| SpecialistMarker {
            latitude: center.latitude + jitter(rng),
            longitude: center.longitude + jitter(rng),
            category: random_category(rng),
        })
        .collect()
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // random_range is half-open; drop the lower bound to keep the interval open
    loop {
        let offset = rng.random_range(-JITTER_DEGREES..JITTER_DEGREES);
        if offset > -JITTER_DEGREES {
            return offset;
        }
    }
}

fn random_category<R: Rng + ?Sized>(rng: &mut R) -> SpecialistCategory {
    let all = SpecialistCategory::ALL;
    all[rng.random_range(0..all.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const BENGALURU: Coordinates = Coordinates { latitude: 12.9716, longitude: 77.5946 };

    #[test]
    fn markers_stay_within_jitter_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let markers = generate_nearby(BENGALURU, DEFAULT_MARKER_COUNT, &mut rng);

        assert_eq!(markers.len(), 5);
        for m in &markers {
            assert!((m.latitude - BENGALURU.latitude).abs() < JITTER_DEGREES);
            assert!((m.longitude - BENGALURU.longitude).abs() < JITTER_DEGREES);
            assert!(SpecialistCategory::ALL.contains(&m.category));
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_nearby(BENGALURU, 5, &mut StdRng::seed_from_u64(42));
        let b = generate_nearby(BENGALURU, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_count_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_nearby(BENGALURU, 0, &mut rng).is_empty());
    }

    #[test]
    fn categories_repeat_and_cover_the_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let markers = generate_nearby(BENGALURU, 300, &mut rng);
        let seen: HashSet<_> = markers.iter().map(|m| m.category).collect();
        assert_eq!(seen.len(), SpecialistCategory::ALL.len());
    }

    #[test]
    fn works_with_thread_rng() {
        let markers = generate_nearby(BENGALURU, 3, &mut rand::rng());
        assert_eq!(markers.len(), 3);
    }
}
