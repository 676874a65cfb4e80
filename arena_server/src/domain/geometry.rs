// Axis-aligned overlap tests and range sampling.

use crate::domain::entity::Entity;
use rand::Rng;

/// Axis-aligned bounding box overlap using centers and full extents.
///
/// Touching edges do not count. Rotation is ignored.
pub fn entities_collide<A, B>(a: &A, b: &B) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    let (a, b) = (a.body(), b.body());
    (a.x - b.x).abs() * 2.0 < a.width + b.width && (a.y - b.y).abs() * 2.0 < a.height + b.height
}

/// Uniform real-valued sample from `[min, max]`.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Nonce;
    use crate::domain::structure::Wall;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square(x: f32, y: f32, size: f32) -> Wall {
        Wall::new(x, y, size, size).with_nonce(Nonce(1))
    }

    #[test]
    fn when_boxes_overlap_then_they_collide_in_both_orders() {
        let pairs = [
            (square(100.0, 100.0, 20.0), square(100.0, 100.0, 5.0)),
            (square(0.0, 0.0, 10.0), square(9.0, -9.0, 10.0)),
            (Wall::new(5.0, 5.0, 40.0, 2.0), Wall::new(20.0, 5.5, 4.0, 4.0)),
        ];

        for (a, b) in &pairs {
            assert!(entities_collide(a, b));
            assert!(entities_collide(b, a));
        }
    }

    #[test]
    fn when_edges_only_touch_then_there_is_no_collision() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 0.0, 10.0);

        assert!(!entities_collide(&a, &b));
        assert!(!entities_collide(&b, &a));
    }

    #[test]
    fn when_only_one_axis_overlaps_then_there_is_no_collision() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 50.0, 10.0);

        assert!(!entities_collide(&a, &b));
        assert!(!entities_collide(&b, &a));
    }

    #[test]
    fn when_extents_are_zero_then_the_strict_inequality_decides() {
        let a = square(3.0, 3.0, 0.0);
        let b = square(3.0, 3.0, 0.0);

        assert!(!entities_collide(&a, &b));
    }

    #[test]
    fn when_sampling_then_values_stay_within_the_closed_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let value = random_in_range(&mut rng, -8.0, 8.0);
            assert!((-8.0..=8.0).contains(&value));
        }
    }

    #[test]
    fn when_sampling_many_values_then_they_are_not_integer_quantized() {
        let mut rng = StdRng::seed_from_u64(7);
        let fractional = (0..100)
            .map(|_| random_in_range(&mut rng, 5.0, 8.0))
            .filter(|v| v.fract() != 0.0)
            .count();

        assert!(fractional > 90);
    }
}
