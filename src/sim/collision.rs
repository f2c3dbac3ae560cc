//! Collision and proximity queries for circular bodies
//!
//! Everything in the arena is a circle, so all tests reduce to comparing
//! squared center distances against squared radius sums. No square roots on
//! the hot path.

use glam::Vec2;

use super::entity::{Body, EntityId};

/// Two circles overlap iff the squared center distance is strictly less than
/// the squared sum of their radii
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) < reach * reach
}

/// Point-in-range test used for pickup collection
#[inline]
pub fn within_range(center: Vec2, range: f32, point: Vec2) -> bool {
    center.distance_squared(point) < range * range
}

/// Find the closest live body to `origin`
///
/// Returns the ID and position of the nearest candidate by squared distance.
/// Dead bodies are ignored. Ties keep the first candidate in iteration order.
pub fn nearest<'a, I>(origin: Vec2, candidates: I) -> Option<(EntityId, Vec2)>
where
    I: IntoIterator<Item = (EntityId, &'a Body)>,
{
    let mut best: Option<(EntityId, Vec2, f32)> = None;
    for (id, body) in candidates {
        if body.is_dead() {
            continue;
        }
        let dist_sq = origin.distance_squared(body.pos);
        match best {
            Some((_, _, best_sq)) if dist_sq >= best_sq => {}
            _ => best = Some((id, body.pos, dist_sq)),
        }
    }
    best.map(|(id, pos, _)| (id, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 16.0, Vec2::new(20.0, 0.0), 12.0));
        assert!(!circles_overlap(Vec2::ZERO, 16.0, Vec2::new(28.0, 0.0), 12.0));
        assert!(!circles_overlap(Vec2::ZERO, 1.0, Vec2::new(100.0, 100.0), 1.0));
    }

    #[test]
    fn test_within_range() {
        assert!(within_range(Vec2::ZERO, 50.0, Vec2::new(30.0, 30.0)));
        assert!(!within_range(Vec2::ZERO, 50.0, Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_nearest_skips_dead() {
        let near = {
            let mut b = Body::new(Vec2::new(5.0, 0.0), 10.0);
            b.kill();
            b
        };
        let mid = Body::new(Vec2::new(0.0, 20.0), 10.0);
        let far = Body::new(Vec2::new(-100.0, 0.0), 10.0);
        let found = nearest(Vec2::ZERO, [(1, &near), (2, &mid), (3, &far)]);
        assert_eq!(found, Some((2, Vec2::new(0.0, 20.0))));
    }

    #[test]
    fn test_nearest_empty() {
        assert_eq!(nearest(Vec2::ZERO, std::iter::empty()), None);
    }
}
