use rand::Rng;

use crate::config::CameraSettings;
use crate::domain::{Boundary, Camera};
use crate::geometry::Coordinate;

/// Random four-digit camera id that never collides with the reserved one
pub fn generate_camera_id<R: Rng + ?Sized>(reserved: &str, rng: &mut R) -> String {
    loop {
        let id = rng.random_range(1000..=9999u32).to_string();
        if id != reserved {
            return id;
        }
    }
}

/// Rejection-sample a position inside the boundary
///
/// Returns `None` when every attempt lands outside, which happens for thin
/// or strongly concave boundaries.
pub fn sample_inside<R: Rng + ?Sized>(
    boundary: &Boundary,
    max_attempts: usize,
    rng: &mut R,
) -> Option<Coordinate> {
    (0..max_attempts)
        .map(|_| boundary.bounds().sample(rng))
        .find(|&candidate| boundary.contains(candidate))
}

/// Scatter cameras inside a completed boundary
///
/// One camera (chosen at random) carries the reserved id. Cameras whose
/// placement fails are skipped, so the result can be shorter than the drawn
/// count and may lack the reserved id.
pub fn place_cameras<R: Rng + ?Sized>(
    boundary: &Boundary,
    settings: &CameraSettings,
    rng: &mut R,
) -> Vec<Camera> {
    let min = settings.min_count.min(settings.max_count);
    let max = settings.min_count.max(settings.max_count);
    let count = rng.random_range(min..=max);
    if count == 0 {
        return Vec::new();
    }

    let special_index = rng.random_range(0..count);
    let mut cameras = Vec::with_capacity(count);

    for i in 0..count {
        let Some(position) = sample_inside(boundary, settings.max_attempts, rng) else {
            continue;
        };

        let id = if i == special_index {
            settings.reserved_id.clone()
        } else {
            generate_camera_id(&settings.reserved_id, rng)
        };

        cameras.push(Camera::new(id, position, settings.radius_km));
    }

    cameras
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square_boundary() -> Boundary {
        Boundary::new(vec![
            c(-122.45, 37.75),
            c(-122.40, 37.75),
            c(-122.40, 37.79),
            c(-122.45, 37.79),
        ])
        .unwrap()
    }

    #[test]
    fn test_generate_camera_id() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let id = generate_camera_id("3738", &mut rng);
            assert_eq!(id.len(), 4);
            assert_ne!(id, "3738");
            let n: u32 = id.parse().unwrap();
            assert!((1000..=9999).contains(&n));
        }
    }

    #[test]
    fn test_place_cameras_in_square() {
        let boundary = square_boundary();
        let settings = CameraSettings::default();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cameras = place_cameras(&boundary, &settings, &mut rng);

            // a convex square never exhausts 20 attempts in practice
            assert!((5..=10).contains(&cameras.len()));
            assert_eq!(cameras.iter().filter(|c| c.id == "3738").count(), 1);
            for camera in &cameras {
                assert!(boundary.contains(camera.position));
                assert_eq!(camera.radius_km, 1.2);
            }
        }
    }

    #[test]
    fn test_thin_sliver_can_skip_cameras() {
        // a sliver triangle covering a vanishing share of its bounding box
        let boundary = Boundary::new(vec![c(0.0, 0.0), c(1.0, 1.0), c(1.0, 1.0 + 1e-9)]).unwrap();
        let settings = CameraSettings {
            max_attempts: 1,
            ..CameraSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        assert!(place_cameras(&boundary, &settings, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_count() {
        let settings = CameraSettings {
            min_count: 0,
            max_count: 0,
            ..CameraSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(place_cameras(&square_boundary(), &settings, &mut rng).is_empty());
    }
}
