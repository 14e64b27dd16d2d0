use crate::foundation::math::{Vec2, sign, sign0};
use serde::{Deserialize, Serialize};

/// An oriented half-plane.
///
/// The signed distance from a point `p` is `dot(normal, p) - offset`.
/// Positive distance lies on the side the normal points to (the empty side).
/// The normal is unit-length by convention but not enforced; with a non-unit
/// normal, reported distances scale linearly with its length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Direction of increasing distance.
    pub normal: Vec2,
    /// Displacement of the plane along the normal.
    pub offset: f32,
}

impl Plane {
    /// Plane through `point` with the given `normal`.
    pub fn from_point_and_normal(point: Vec2, normal: Vec2) -> Self {
        Self {
            normal,
            offset: point.dot(normal),
        }
    }

    /// Plane through both `a` and `b`, normal set to the right-hand
    /// perpendicular of `b - a`.
    ///
    /// The normal is not renormalized; pass normalized points if unit-normal
    /// semantics are required.
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        let d = b - a;
        Self::from_point_and_normal(a, Vec2::new(d.y, -d.x))
    }

    /// Plane through `point` with normal `(cos angle, sin angle)`.
    pub fn from_point_and_angle(point: Vec2, angle: f32) -> Self {
        Self::from_point_and_normal(point, Vec2::new(angle.cos(), angle.sin()))
    }

    /// Plane with normal `(cos angle, sin angle)`, moved by `offset` along it.
    pub fn from_angle_and_offset(angle: f32, offset: f32) -> Self {
        Self {
            normal: Vec2::new(angle.cos(), angle.sin()),
            offset,
        }
    }

    /// Signed distance from `p`, ignoring any scene scale.
    pub fn distance(&self, p: Vec2) -> f32 {
        self.normal.dot(p) - self.offset
    }
}

/// A circle with center and radius. Signed distance is `|p - c| - r`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Vec2,
    /// Radius, expected to be `>= 0`.
    pub radius: f32,
}

impl Circle {
    /// Signed distance from `p`, ignoring any scene scale.
    pub fn distance(&self, p: Vec2) -> f32 {
        (p - self.center).length() - self.radius
    }
}

/// An axis-aligned ellipse with per-axis radii.
///
/// Not a serializable primitive; circles degrade to ellipses when the scene
/// scale is nonuniform, so this carries the closed-form distance they share.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    /// Center point.
    pub center: Vec2,
    /// Per-axis radii `(rx, ry)`, expected to be `>= 0`.
    pub radius: Vec2,
}

impl Ellipse {
    /// Closed-form signed distance from `p`.
    ///
    /// Adapted from Inigo Quilez's exact ellipse SDF
    /// (<https://www.shadertoy.com/view/4sS3zz>): reduce to the first
    /// quadrant with the longer radius on `y`, then solve the quartic for
    /// the closest-point parameter via Cardano (one real root) or the
    /// trigonometric form (three real roots). The cubic-root solver
    /// cancels catastrophically in f32 for eccentric radii, so the
    /// intermediates run in f64; the result rounds back to f32.
    pub fn distance(&self, p: Vec2) -> f32 {
        let mut ab = self.radius;
        let mut q = (p - self.center).abs();
        if q.x > q.y {
            q = q.yx();
            ab = ab.yx();
        }

        let (qx, qy) = (f64::from(q.x), f64::from(q.y));
        let (abx, aby) = (f64::from(ab.x), f64::from(ab.y));

        let l = aby * aby - abx * abx;
        if l.abs() < 1e-9 {
            return Circle {
                center: self.center,
                radius: ab.y,
            }
            .distance(p);
        }

        let m = abx * qx / l;
        let n = aby * qy / l;
        let m2 = m * m;
        let n2 = n * n;

        let c = (m2 + n2 - 1.0) / 3.0;
        let c3 = c * c * c;

        let d = c3 + m2 * n2;
        let qq = d + m2 * n2;
        let g = m + m * n2;

        let mut co;
        if d < 0.0 {
            let h = (qq / c3).acos() / 3.0;
            let s = h.cos() + 2.0;
            let t = h.sin() * 3.0f64.sqrt();
            let rx = (m2 - c * (s + t)).sqrt();
            let ry = (m2 - c * (s - t)).sqrt();
            co = ry + sign0(l) * rx + g.abs() / (rx * ry);
        } else {
            let h = 2.0 * m * n * d.sqrt();
            let s = sign(qq + h) * (qq + h).abs().powf(1.0 / 3.0);
            let t = sign(qq - h) * (qq - h).abs().powf(1.0 / 3.0);
            let rx = -(s + t) - c * 4.0 + 2.0 * m2;
            let ry = (s - t) * 3.0f64.sqrt();
            let rm = (rx * rx + ry * ry).sqrt();
            co = ry / (rm - rx).sqrt() + 2.0 * g / rm;
        }
        co = (co - m) / 2.0;

        let si = (1.0 - co * co).max(0.0).sqrt();

        let rx = abx * co;
        let ry = aby * si;
        let dist = ((rx - qx) * (rx - qx) + (ry - qy) * (ry - qy)).sqrt();
        (dist * sign(qy - ry)) as f32
    }
}

/// Analytical shape with a closed-form distance.
///
/// Each variant has a stable on-disk tag (scalar = 0, plane = 4, circle = 5;
/// 1-3 are reserved for future versions).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Constant distance field.
    Scalar(f32),
    /// Oriented half-plane.
    Plane(Plane),
    /// Circle.
    Circle(Circle),
}

impl Primitive {
    /// Stable on-disk tag of the active variant.
    pub fn kind_tag(&self) -> u16 {
        match self {
            Self::Scalar(_) => 0,
            Self::Plane(_) => 4,
            Self::Circle(_) => 5,
        }
    }
}

impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Self::Plane(p)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<f32> for Primitive {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/primitive.rs"]
mod tests;
