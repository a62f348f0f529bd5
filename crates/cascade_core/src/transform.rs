//! 2D affine transforms

use crate::geometry::Point;

/// 2D affine transformation matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Scale around an anchor point instead of the origin
    ///
    /// Equivalent to `translate(anchor) * scale * translate(-anchor)`.
    pub fn scale_anchored(sx: f32, sy: f32, anchor_x: f32, anchor_y: f32) -> Self {
        Self {
            elements: [
                sx,
                0.0,
                0.0,
                sy,
                anchor_x * (1.0 - sx),
                anchor_y * (1.0 - sy),
            ],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_scale_keeps_anchor_fixed() {
        let t = Affine2D::scale_anchored(0.5, 0.5, 50.0, 20.0);
        assert_eq!(t.apply(Point::new(50.0, 20.0)), Point::new(50.0, 20.0));
        assert_eq!(t.apply(Point::new(0.0, 0.0)), Point::new(25.0, 10.0));
    }

    #[test]
    fn test_then_applies_right_hand_side_first() {
        let translate = Affine2D::translation(0.0, 8.0);
        let scale = Affine2D::scale(2.0, 2.0);
        let combined = translate.then(&scale);
        assert_eq!(combined.apply(Point::new(1.0, 1.0)), Point::new(2.0, 10.0));
    }
}
