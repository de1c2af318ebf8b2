//! Vector and matrix math for the pipeline
//!
//! Row-major matrices acting on column vectors: `a * b` applies `b` first.

use std::f32::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 2D Vector (texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero-length input
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Componentwise product
    pub fn hadamard(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Clamp every component to [0, 1]
    pub fn saturate(self) -> Vec3 {
        Vec3 {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
            z: self.z.clamp(0.0, 1.0),
        }
    }

    /// Extend to a homogeneous vector with the given `w`
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// Homogeneous 4D vector (clip-space positions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec4 {
        let l = self.len();
        if l == 0.0 {
            return Vec4::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }

    /// Drop the `w` component
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    fn as_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        self.scale(s)
    }
}

/// 3x3 matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    pub fn zero() -> Self {
        Self { m: [[0.0; 3]; 3] }
    }

    pub fn identity() -> Self {
        let mut result = Self::zero();
        for i in 0..3 {
            result.m[i][i] = 1.0;
        }
        result
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [1.0, 0.0, 0.0],
                [0.0, c, -s],
                [0.0, s, c],
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [c, 0.0, s],
                [0.0, 1.0, 0.0],
                [-s, 0.0, c],
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: [
                [c, -s, 0.0],
                [s, c, 0.0],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn scale(self, s: f32) -> Self {
        let mut result = self;
        for row in result.m.iter_mut() {
            for e in row.iter_mut() {
                *e *= s;
            }
        }
        result
    }
}

impl Add for Mat3 {
    type Output = Mat3;
    fn add(self, other: Mat3) -> Mat3 {
        let mut result = self;
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] += other.m[i][j];
            }
        }
        result
    }
}

impl Sub for Mat3 {
    type Output = Mat3;
    fn sub(self, other: Mat3) -> Mat3 {
        let mut result = self;
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] -= other.m[i][j];
            }
        }
        result
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    fn mul(self, other: Mat3) -> Mat3 {
        let mut result = Mat3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = (0..3).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        result
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        let row = |i: usize| self.m[i][0] * v.x + self.m[i][1] * v.y + self.m[i][2] * v.z;
        Vec3::new(row(0), row(1), row(2))
    }
}

/// 4x4 matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn zero() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    pub fn identity() -> Self {
        let mut result = Self::zero();
        for i in 0..4 {
            result.m[i][i] = 1.0;
        }
        result
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut result = Self::identity();
        result.m[0][3] = x;
        result.m[1][3] = y;
        result.m[2][3] = z;
        result
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[1][1] = c;
        result.m[1][2] = -s;
        result.m[2][1] = s;
        result.m[2][2] = c;
        result
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[0][0] = c;
        result.m[0][2] = s;
        result.m[2][0] = -s;
        result.m[2][2] = c;
        result
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[0][0] = c;
        result.m[0][1] = -s;
        result.m[1][0] = s;
        result.m[1][1] = c;
        result
    }

    /// Perspective projection.
    ///
    /// The `w` row is `-1/near`, so clip `w` is the view-space distance in
    /// units of the near plane. Points in front of the camera (negative view
    /// `z`) end up with positive `w`.
    pub fn projection(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let fov = degrees_to_radians(fov_degrees);
        let width = 2.0 * near * (fov / 2.0).tan();
        let height = width / aspect_ratio;

        let mut result = Self::zero();
        result.m[0][0] = 2.0 * near / width;
        result.m[1][1] = 2.0 * near / height;
        result.m[2][2] = -(far + near) / (far - near);
        result.m[2][3] = -2.0 * near * far / (far - near);
        result.m[3][2] = -1.0 / near;
        result
    }

    pub fn scale(self, s: f32) -> Self {
        let mut result = self;
        for row in result.m.iter_mut() {
            for e in row.iter_mut() {
                *e *= s;
            }
        }
        result
    }

    /// Transform a point (`w = 1`)
    pub fn transform_point(self, p: Vec3) -> Vec4 {
        self * p.extend(1.0)
    }

    /// Transform a direction (`w = 0`), dropping the homogeneous part
    pub fn transform_vector(self, v: Vec3) -> Vec3 {
        (self * v.extend(0.0)).xyz()
    }
}

impl Add for Mat4 {
    type Output = Mat4;
    fn add(self, other: Mat4) -> Mat4 {
        let mut result = self;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] += other.m[i][j];
            }
        }
        result
    }
}

impl Sub for Mat4 {
    type Output = Mat4;
    fn sub(self, other: Mat4) -> Mat4 {
        let mut result = self;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] -= other.m[i][j];
            }
        }
        result
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = Mat4::zero();
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        result
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        let v = v.as_array();
        let row = |i: usize| (0..4).map(|j| self.m[i][j] * v[j]).sum::<f32>();
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= 2.0 * PI { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.0001
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec4::ZERO.normalize(), Vec4::ZERO);
        let n = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!(approx(n.len(), 1.0));
        assert!(approx(n.x, 0.6));
    }

    #[test]
    fn test_saturate_and_hadamard() {
        let v = Vec3::new(-0.5, 0.5, 1.5).saturate();
        assert_eq!(v, Vec3::new(0.0, 0.5, 1.0));
        let h = Vec3::new(1.0, 2.0, 3.0).hadamard(Vec3::new(2.0, 0.5, 0.0));
        assert_eq!(h, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        let p = t.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec4::new(2.0, 3.0, 4.0, 1.0));
        let v = t.transform_vector(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(v, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotation_is_right_handed() {
        // +x rotated a quarter turn about +z lands on +y
        let p = Mat4::rotation_z(PI / 2.0).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p.x, 0.0) && approx(p.y, 1.0));
        // +y about +x lands on +z
        let p = Mat4::rotation_x(PI / 2.0).transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!(approx(p.y, 0.0) && approx(p.z, 1.0));
        // +z about +y lands on +x
        let p = Mat4::rotation_y(PI / 2.0).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(p.x, 1.0) && approx(p.z, 0.0));

        let q = Mat3::rotation_y(PI / 2.0) * Vec3::new(0.0, 0.0, 1.0);
        assert!(approx(q.x, 1.0) && approx(q.z, 0.0));
    }

    #[test]
    fn test_mul_applies_right_operand_first() {
        let translate = Mat4::translation(0.0, 0.0, -2.0);
        let rotate = Mat4::rotation_y(PI / 2.0);
        // rotate then translate
        let p = (translate * rotate).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(p.x, 1.0) && approx(p.z, -2.0));
        // translate then rotate
        let p = (rotate * translate).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(p.x, -1.0) && approx(p.z, 0.0));
    }

    #[test]
    fn test_identity_is_neutral() {
        let r = Mat4::rotation_x(0.3) * Mat4::translation(1.0, -2.0, 0.5);
        assert_eq!(Mat4::identity() * r, r);
        assert_eq!(r * Mat4::identity(), r);
        let m = Mat3::rotation_z(1.1);
        assert_eq!(Mat3::identity() * m, m);
        assert_eq!((m + m) - m, m);
    }

    #[test]
    fn test_projection_near_plane() {
        let proj = Mat4::projection(90.0, 4.0 / 3.0, 1.0, 10.0);
        let p = proj.transform_point(Vec3::new(1.0, 0.75, -1.0));
        // w = -z / near
        assert!(approx(p.w, 1.0));
        // the corner of the near plane maps to the corner of NDC
        assert!(approx(p.x / p.w, 1.0));
        assert!(approx(p.y / p.w, 1.0));
        assert!(approx(p.z / p.w, -1.0));

        let far = proj.transform_point(Vec3::new(0.0, 0.0, -10.0));
        assert!(approx(far.z / far.w, 1.0));
    }

    #[test]
    fn test_wrap_angle() {
        assert!(approx(wrap_angle(-PI / 2.0), 1.5 * PI));
        assert!(approx(wrap_angle(5.0 * PI), PI));
        assert!(approx(wrap_angle(0.25), 0.25));
        assert!(wrap_angle(-1e-9) < 2.0 * PI);
        assert!(approx(degrees_to_radians(180.0), PI));
    }
}
