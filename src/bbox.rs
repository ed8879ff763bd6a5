/*

    Axis Aligned Bounding Box given by its minimum and
    maximum corner in some local frame.

    Corner numbering (1-based, y is up):

        (c7)---(c8)
        /      / |
       /      /  |
     (c5)---(c6)(c4)
      |      |  /
      |      | /
      |      |/
     (c1)---(c2)

    Corners 1..=4 lie on the bottom face (y = min) and
    5..=8 on the top face (y = max), corner k and k + 4
    share their x and z coordinates.

    @date: 9 Nov, 2025
*/

use std::fmt;
use std::str::FromStr;

use crate::error::{CageError, Result};
use crate::interval::Interval;
use crate::json_parser::{deser_vec3, parse_string_vecvec3};
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BoundsJSON")]
pub struct BoundingBox {
    min: Vector3,
    max: Vector3,
}

// {"Min": .., "Max": ..} as written in scene files, checked by TryFrom
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BoundsJSON {
    #[serde(deserialize_with = "deser_vec3")]
    min: Vector3,
    #[serde(deserialize_with = "deser_vec3")]
    max: Vector3,
}

impl TryFrom<BoundsJSON> for BoundingBox {
    type Error = CageError;
    fn try_from(raw: BoundsJSON) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl BoundingBox {

    /// Fails if max < min on any axis. Zero extent is allowed.
    pub fn new(min: Vector3, max: Vector3) -> Result<Self> {
        let bbox = Self { min, max };
        if !bbox.validate() {
            return Err(CageError::InvalidBounds { min, max });
        }
        Ok(bbox)
    }

    pub fn new_from(xint: &Interval, yint: &Interval, zint: &Interval) -> Result<Self> {
        Self::new(
            Vector3::new(xint.min, yint.min, zint.min),
            Vector3::new(xint.max, yint.max, zint.max),
        )
    }

    /// Smallest box containing all the given points, None for an empty iterator
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3>,
    {
        let (mut xint, mut yint, mut zint) = (Interval::EMPTY, Interval::EMPTY, Interval::EMPTY);
        for p in points {
            xint.expand(p.x);
            yint.expand(p.y);
            zint.expand(p.z);
        }
        Self::new_from(&xint, &yint, &zint).ok()
    }

    pub fn point(p: Vector3) -> Self {
        Self { min: p, max: p }
    }

    pub fn validate(&self) -> bool {
        self.xint().validate() && self.yint().validate() && self.zint().validate()
    }

    pub fn min(&self) -> Vector3 { self.min }
    pub fn max(&self) -> Vector3 { self.max }

    pub fn xint(&self) -> Interval { Interval::new(self.min.x, self.max.x) }
    pub fn yint(&self) -> Interval { Interval::new(self.min.y, self.max.y) }
    pub fn zint(&self) -> Interval { Interval::new(self.min.z, self.max.z) }

    pub fn width(&self) -> Float { self.xint().size() }
    pub fn height(&self) -> Float { self.yint().size() }
    pub fn depth(&self) -> Float { self.zint().size() }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// True if any of the extents is zero, corners coincide pairwise then
    pub fn is_degenerate(&self) -> bool {
        approx_zero(self.width()) || approx_zero(self.height()) || approx_zero(self.depth())
    }

    /// Corner position by its 1-based label, see the diagram in the header.
    /// Bit 0 of (index - 1) selects x, bit 1 selects z, bit 2 selects y.
    ///
    /// # Panics
    /// If `index` is not in 1..=8.
    pub fn corner(&self, index: usize) -> Vector3 {
        assert!((1..=8).contains(&index), "corner index must be in 1..=8, got {index}");
        let bits = index - 1;
        let pick = |bit: usize, lo: Float, hi: Float| if bits & bit == 0 { lo } else { hi };
        Vector3::new(
            pick(0b001, self.min.x, self.max.x),
            pick(0b100, self.min.y, self.max.y),
            pick(0b010, self.min.z, self.max.z),
        )
    }

    /// All 8 corners, element i holds corner i + 1
    pub fn corners(&self) -> [Vector3; 8] {
        std::array::from_fn(|i| self.corner(i + 1))
    }

    pub fn contains(&self, p: &Vector3) -> bool {
        self.xint().contains(p.x) && self.yint().contains(p.y) && self.zint().contains(p.z)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Axis aligned box around this box after `mat` is applied to its corners.
    /// Fails if any corner lands on a NaN or infinite coordinate.
    pub fn transformed(&self, mat: &Matrix4) -> Result<BoundingBox> {
        let corners = self.corners().map(|c| transform_point(mat, &c));
        if !corners.iter().all(|c| c.is_finite()) {
            return Err(CageError::NonFiniteBounds(*self));
        }
        Self::from_points(corners).ok_or(CageError::NonFiniteBounds(*self))
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

// To accept "minx miny minz maxx maxy maxz" in scene files,
// see deser_string_or_struct in json_parser.rs
impl FromStr for BoundingBox {
    type Err = CageError;
    fn from_str(s: &str) -> Result<Self> {
        let format_err = |reason: String| CageError::BoundsFormat { input: s.to_string(), reason };
        let points = parse_string_vecvec3(s).map_err(format_err)?;
        match points.as_slice() {
            [min, max] => Self::new(*min, *max),
            _ => Err(format_err(format!("expected 6 numbers, got {}", points.len() * 3))),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoundingBox {
        BoundingBox::new(Vector3::new(0., 0., 0.), Vector3::new(2., 1., 3.)).unwrap()
    }

    #[test]
    fn test_corner_table() {
        let (lo, hi) = (Vector3::new(-1., -2., -3.), Vector3::new(4., 5., 6.));
        let bbox = BoundingBox::new(lo, hi).unwrap();
        let expected = [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ];
        assert_eq!(bbox.corners(), expected);
    }

    #[test]
    fn test_bottom_and_top_are_vertically_aligned() {
        let bbox = sample();
        for k in 1..=4 {
            let (bottom, top) = (bbox.corner(k), bbox.corner(k + 4));
            assert_eq!(bottom.x, top.x);
            assert_eq!(bottom.z, top.z);
            assert_eq!(bottom.y, bbox.min().y);
            assert_eq!(top.y, bbox.max().y);
        }
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let res = BoundingBox::new(Vector3::new(1., 0., 0.), Vector3::new(0., 1., 1.));
        assert!(matches!(res, Err(CageError::InvalidBounds { .. })));
    }

    #[test]
    fn test_degenerate_point_box() {
        let p = Vector3::new(1., 2., 3.);
        let bbox = BoundingBox::new(p, p).unwrap();
        assert!(bbox.is_degenerate());
        assert!(bbox.corners().iter().all(|c| *c == p));
    }

    #[test]
    fn test_from_points_and_union() {
        let bbox = BoundingBox::from_points([
            Vector3::new(1., 0., 0.),
            Vector3::new(-1., 2., 0.5),
        ]).unwrap();
        assert_eq!(bbox.min(), Vector3::new(-1., 0., 0.));
        assert_eq!(bbox.max(), Vector3::new(1., 2., 0.5));
        assert!(BoundingBox::from_points(Vec::new()).is_none());

        let merged = bbox.union(&BoundingBox::point(Vector3::new(0., -5., 0.)));
        assert_eq!(merged.min().y, -5.);
        assert!(merged.contains(&Vector3::new(0.5, 1., 0.25)));
    }

    #[test]
    fn test_transformed_by_quarter_turn() {
        let rot = Matrix4::from_rotation_y(std::f64::consts::FRAC_PI_2);
        let out = sample().transformed(&rot).unwrap();
        // x extent (2) and z extent (3) swap under a quarter turn about y
        assert!(approx_zero(out.width() - 3.));
        assert!(approx_zero(out.depth() - 2.));
        assert!(approx_zero(out.height() - 1.));
    }

    #[test]
    fn test_transformed_rejects_non_finite() {
        let flat = Matrix4::from_scale(Vector3::new(1., 0., 1.));
        // Squashing is fine, the box just loses its height
        assert!(approx_zero(sample().transformed(&flat).unwrap().height()));

        let far = Matrix4::from_translation(Vector3::new(Float::INFINITY, 0., 0.));
        let res = sample().transformed(&far);
        assert!(matches!(res, Err(CageError::NonFiniteBounds(_))));
    }

    #[test]
    #[should_panic]
    fn test_corner_zero_panics() {
        sample().corner(0);
    }

    #[test]
    #[should_panic]
    fn test_corner_nine_panics() {
        sample().corner(9);
    }

    #[test]
    fn test_from_str() {
        let bbox: BoundingBox = "0 0 0 2 1 3".parse().unwrap();
        assert_eq!(bbox, sample());

        let inverted = "1 1 1 0 0 0".parse::<BoundingBox>();
        assert!(matches!(inverted, Err(CageError::InvalidBounds { .. })));

        let short = "0 0 0".parse::<BoundingBox>();
        assert!(matches!(short, Err(CageError::BoundsFormat { .. })));

        // The number parser's message reaches the user
        match "0 0 zero 1 1 1".parse::<BoundingBox>() {
            Err(CageError::BoundsFormat { input, reason }) => {
                assert_eq!(input, "0 0 zero 1 1 1");
                assert!(reason.contains("invalid float literal"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let bbox: BoundingBox = serde_json::from_str(r#"{"Min": [0, 0, 0], "Max": "2 1 3"}"#).unwrap();
        assert_eq!(bbox, sample());

        let err = serde_json::from_str::<BoundingBox>(r#"{"Min": [1, 1, 1], "Max": [0, 0, 0]}"#).unwrap_err();
        assert!(err.to_string().contains("max < min"), "{err}");
    }
}
