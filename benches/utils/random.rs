#![allow(dead_code)]

use std::f64::consts::PI;

use geo::{Coord, Line, LineString, Polygon, Rect, Rotate};

use rand::Rng;
use rand_distr::{Distribution, Normal, Standard};

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coord<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coord {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let line = Line::new(start, start + (length, 0.).into());
    let angle = rng.sample::<f64, _>(Standard) * 360.;
    line.rotate_around_point(angle, start.into())
}

/// A star-shaped polygon around the origin with `steps` vertices at
/// random radii in `[0.5, 1.5]`.
///
/// The angles are increasing, so the ring is simple and counter
/// clockwise.
pub fn circular_polygon<R: Rng>(rng: &mut R, steps: usize) -> Polygon<f64> {
    let mut ring = Vec::with_capacity(steps + 1);
    let ang_step = 2. * PI / steps as f64;
    let radius = Normal::<f64>::new(1., 0.15).unwrap();

    for i in 0..steps {
        let r: f64 = radius.sample(rng).max(0.5).min(1.5);
        let ang = ang_step * i as f64;
        ring.push(Coord {
            x: r * ang.cos(),
            y: r * ang.sin(),
        });
    }

    Polygon::new(LineString::from(ring), vec![])
}

/// Translate a polygon by `(dx, dy)`.
pub fn translated(poly: &Polygon<f64>, dx: f64, dy: f64) -> Polygon<f64> {
    use geo::MapCoords;
    poly.map_coords(|c| Coord {
        x: c.x + dx,
        y: c.y + dy,
    })
}
