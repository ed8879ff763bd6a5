/*

    Line segments and the closed quadrilateral handed to
    placement and occlusion tests.

    Orientation is measured on the ground plane (x, z), x as
    the first axis and z as the second one:

        signed_area = 1/2 * sum( x_i * z_{i+1} - x_{i+1} * z_i )

    positive area is reported as CounterClockwise.

    @date: Oct, 2025
*/

use crate::error::{CageError, Result};
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Vector3,
    pub end: Vector3,
}

impl Line {
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> Float {
        self.start.distance(self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        approx_zero(self.start.distance_squared(self.end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    Degenerate,
}

pub const POLYGON_SIDES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    lines: [Line; POLYGON_SIDES],
}

impl Polygon {

    pub fn new(lines: Vec<Line>) -> Result<Self> {
        let n = lines.len();
        let lines: [Line; POLYGON_SIDES] = lines.try_into().map_err(|_| CageError::PolygonSides(n))?;
        Ok(Self { lines })
    }

    pub fn from_lines(lines: [Line; POLYGON_SIDES]) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line; POLYGON_SIDES] {
        &self.lines
    }

    /// Start point of every line, in traversal order
    pub fn vertices(&self) -> [Vector3; POLYGON_SIDES] {
        self.lines.map(|l| l.start)
    }

    /// Every line ends where the next one (cyclically) starts
    pub fn is_closed(&self) -> bool {
        (0..POLYGON_SIDES).all(|i| {
            let next = &self.lines[(i + 1) % POLYGON_SIDES];
            approx_eq_vec(&self.lines[i].end, &next.start)
        })
    }

    pub fn perimeter(&self) -> Float {
        self.lines.iter().map(|l| l.length()).sum()
    }

    pub fn signed_area_xz(&self) -> Float {
        let v = self.vertices();
        let mut twice_area = 0.0;
        for i in 0..POLYGON_SIDES {
            let (a, b) = (v[i], v[(i + 1) % POLYGON_SIDES]);
            twice_area += a.x * b.z - b.x * a.z;
        }
        0.5 * twice_area
    }

    pub fn winding(&self) -> Winding {
        let area = self.signed_area_xz();
        if approx_zero(area) {
            Winding::Degenerate
        } else if area > 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    /// Even-odd crossing test on the ground plane, y is ignored.
    /// Points exactly on an edge may land on either side.
    pub fn contains_point_xz(&self, p: &Vector3) -> bool {
        let mut inside = false;
        for line in self.lines.iter() {
            let (a, b) = (line.start, line.end);
            if (a.z > p.z) != (b.z > p.z) {
                let x_cross = a.x + (p.z - a.z) * (b.x - a.x) / (b.z - a.z);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn square(points: [Vector3; 4]) -> Polygon {
        Polygon::from_lines(std::array::from_fn(|i| Line::new(points[i], points[(i + 1) % 4])))
    }

    #[test]
    fn test_new_requires_four_lines() {
        let l = Line::new(Vector3::ZERO, Vector3::X);
        assert!(matches!(Polygon::new(vec![l; 3]), Err(CageError::PolygonSides(3))));
        assert!(Polygon::new(vec![l; 4]).is_ok());
    }

    #[test]
    fn test_winding_follows_traversal() {
        let ccw = square([
            Vector3::new(0., 0., 0.),
            Vector3::new(2., 0., 0.),
            Vector3::new(2., 0., 3.),
            Vector3::new(0., 0., 3.),
        ]);
        assert!(ccw.is_closed());
        assert!(approx_zero(ccw.signed_area_xz() - 6.));
        assert_eq!(ccw.winding(), Winding::CounterClockwise);

        let mut reversed = ccw.vertices();
        reversed.reverse();
        assert_eq!(square(reversed).winding(), Winding::Clockwise);
    }

    #[test]
    fn test_contains_point() {
        let poly = square([
            Vector3::new(0., 0., 0.),
            Vector3::new(2., 0., 0.),
            Vector3::new(2., 0., 3.),
            Vector3::new(0., 0., 3.),
        ]);
        assert!(poly.contains_point_xz(&Vector3::new(1., 10., 1.)));
        assert!(!poly.contains_point_xz(&Vector3::new(3., 0., 1.)));
        assert!(!poly.contains_point_xz(&Vector3::new(1., 0., -0.5)));
    }

    #[test]
    fn test_degenerate_polygon() {
        let p = Vector3::new(1., 1., 1.);
        let poly = square([p; 4]);
        assert!(poly.is_closed());
        assert!(poly.lines().iter().all(|l| l.is_degenerate()));
        assert_eq!(poly.winding(), Winding::Degenerate);
        assert!(!poly.contains_point_xz(&p));
        assert_eq!(poly.perimeter(), 0.0);
    }
}
