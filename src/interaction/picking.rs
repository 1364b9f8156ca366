use glam::DVec3;
use ordered_float::NotNan;

/// The outcome of resolving a click against the scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickResult {
    Body(String),
    /// Nothing close enough; the click is dropped.
    Unresolved,
}

/// A half-line in scene space. The direction is always unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Where the ray meets the orbital plane `y = 0`, if it does so in front
    /// of the origin.
    pub fn orbital_plane_hit(&self) -> Option<DVec3> {
        if self.direction.y.abs() < 1e-9 {
            return None;
        }
        let t = -self.origin.y / self.direction.y;
        (t >= 0.0).then(|| self.origin + self.direction * t)
    }

    /// Distance from `point` to the infinite line through this ray.
    pub fn perpendicular_distance(&self, point: DVec3) -> f64 {
        (point - self.origin).cross(self.direction).length()
    }

    /// Distance along the ray to the first intersection with a sphere.
    pub fn hit_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt = disc.sqrt();
        [-b - sqrt, -b + sqrt].into_iter().find(|&t| t >= 0.0)
    }
}

/// A body as seen by the picker: where it is drawn and how big.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub position: DVec3,
    pub radius: f64,
}

/// Everything known about one click, from most to least precise.
#[derive(Clone, Debug, Default)]
pub struct PickQuery {
    /// A body the rendering or UI layer already resolved.
    pub direct_hit: Option<String>,
    /// The pointer's position projected into the scene.
    pub pointer: Option<DVec3>,
    pub ray: Option<Ray>,
}

impl PickQuery {
    /// A query for a click at `ray`, with the pointer projected onto the
    /// orbital plane.
    pub fn from_ray(ray: Ray) -> Self {
        Self {
            direct_hit: None,
            pointer: ray.orbital_plane_hit(),
            ray: Some(ray),
        }
    }

    pub fn direct(name: impl Into<String>) -> Self {
        Self {
            direct_hit: Some(name.into()),
            ..Default::default()
        }
    }

    /// Fills `direct_hit` with the nearest sphere the ray passes through.
    pub fn with_sphere_hit(mut self, candidates: &[Candidate<'_>]) -> Self {
        if let Some(ray) = self.ray {
            self.direct_hit = candidates
                .iter()
                .filter_map(|c| {
                    let t = ray.hit_sphere(c.position, c.radius)?;
                    Some((NotNan::new(t).ok()?, c.name))
                })
                .min_by_key(|&(t, _)| t)
                .map(|(_, name)| name.to_owned());
        }
        self
    }

    /// Resolves the click to at most one body.
    pub fn resolve(&self, candidates: &[Candidate<'_>]) -> PickResult {
        let direct = self
            .direct_hit
            .as_deref()
            .filter(|hit| candidates.iter().any(|c| c.name == *hit));

        let near_pointer = || {
            let pointer = self.pointer?;
            nearest_within(candidates, |c| {
                (c.position.distance(pointer), (c.radius * 2.5).max(1.0))
            })
        };

        let near_ray = || {
            let ray = self.ray?;
            nearest_within(candidates, |c| {
                (ray.perpendicular_distance(c.position), (c.radius * 2.0).max(0.8))
            })
        };

        match direct.or_else(near_pointer).or_else(near_ray) {
            Some(name) => PickResult::Body(name.to_owned()),
            None => PickResult::Unresolved,
        }
    }
}

/// Finds the candidate with the smallest distance, then checks it against its
/// own threshold. `measure` returns `(distance, threshold)`.
fn nearest_within<'a, F>(candidates: &[Candidate<'a>], measure: F) -> Option<&'a str>
where
    F: Fn(&Candidate<'a>) -> (f64, f64),
{
    let (dist, limit, name) = candidates
        .iter()
        .filter_map(|c| {
            let (d, limit) = measure(c);
            Some((NotNan::new(d).ok()?, limit, c.name))
        })
        .min_by_key(|&(d, _, _)| d)?;

    (dist.into_inner() <= limit).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene() -> Vec<Candidate<'static>> {
        vec![
            Candidate {
                name: "Sun",
                position: DVec3::ZERO,
                radius: 10.0,
            },
            Candidate {
                name: "Earth",
                position: DVec3::new(40.0, 0.0, 0.0),
                radius: 1.0,
            },
            Candidate {
                name: "Mars",
                position: DVec3::new(0.0, 0.0, 60.0),
                radius: 0.5,
            },
        ]
    }

    fn down_at(x: f64, z: f64) -> Ray {
        Ray::new(DVec3::new(x, 100.0, z), DVec3::NEG_Y).unwrap()
    }

    #[test]
    fn ray_rejects_zero_direction() {
        assert!(Ray::new(DVec3::ZERO, DVec3::ZERO).is_none());
        assert!(Ray::new(DVec3::ZERO, DVec3::new(f64::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn ray_meets_orbital_plane() {
        let ray = Ray::new(DVec3::new(0.0, 10.0, 0.0), DVec3::new(1.0, -1.0, 0.0)).unwrap();
        let hit = ray.orbital_plane_hit().unwrap();
        assert_relative_eq!(hit.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(hit.y, 0.0, epsilon = 1e-9);

        let away = Ray::new(DVec3::new(0.0, 10.0, 0.0), DVec3::Y).unwrap();
        assert_eq!(away.orbital_plane_hit(), None);
    }

    #[test]
    fn sphere_hit_reports_near_side() {
        let ray = down_at(40.0, 0.0);
        let t = ray.hit_sphere(DVec3::new(40.0, 0.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(t, 99.0, epsilon = 1e-9);
        assert_eq!(ray.hit_sphere(DVec3::new(45.0, 0.0, 0.0), 1.0), None);
    }

    #[test]
    fn direct_hit_wins_over_proximity() {
        let mut query = PickQuery::from_ray(down_at(40.2, 0.0));
        query.direct_hit = Some("Mars".into());
        assert_eq!(query.resolve(&scene()), PickResult::Body("Mars".into()));
    }

    #[test]
    fn unknown_direct_hit_falls_through() {
        let mut query = PickQuery::from_ray(down_at(40.2, 0.0));
        query.direct_hit = Some("Vulcan".into());
        assert_eq!(query.resolve(&scene()), PickResult::Body("Earth".into()));
    }

    #[test]
    fn proximity_uses_scaled_radius() {
        // Earth: threshold max(2.5, 1.0) = 2.5
        let near = PickQuery::from_ray(down_at(42.4, 0.0));
        assert_eq!(near.resolve(&scene()), PickResult::Body("Earth".into()));

        let far = PickQuery {
            direct_hit: None,
            pointer: Some(DVec3::new(43.0, 0.0, 0.0)),
            ray: None,
        };
        assert_eq!(far.resolve(&scene()), PickResult::Unresolved);
    }

    #[test]
    fn tiny_bodies_get_a_minimum_target() {
        // Mars: 2.5 * 0.5 < 1.0, so the floor applies.
        let query = PickQuery {
            direct_hit: None,
            pointer: Some(DVec3::new(0.0, 0.0, 60.9)),
            ray: None,
        };
        assert_eq!(query.resolve(&scene()), PickResult::Body("Mars".into()));
    }

    #[test]
    fn ray_tier_catches_what_proximity_misses() {
        // Parallel to the plane, so there's no pointer projection.
        let ray = Ray::new(DVec3::new(40.0, 0.5, -100.0), DVec3::Z).unwrap();
        let query = PickQuery {
            direct_hit: None,
            pointer: None,
            ray: Some(ray),
        };
        assert_eq!(query.resolve(&scene()), PickResult::Body("Earth".into()));
    }

    #[test]
    fn empty_click_is_unresolved() {
        let query = PickQuery::from_ray(down_at(500.0, 500.0));
        assert_eq!(query.resolve(&scene()), PickResult::Unresolved);
        assert_eq!(PickQuery::default().resolve(&scene()), PickResult::Unresolved);
    }

    #[test]
    fn sphere_hit_fills_direct_hit() {
        let query = PickQuery::from_ray(down_at(3.0, 3.0)).with_sphere_hit(&scene());
        assert_eq!(query.direct_hit.as_deref(), Some("Sun"));
    }
}
