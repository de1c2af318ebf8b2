//! Attribute algebra
//!
//! The rasterizer never looks inside a vertex beyond its position. Everything
//! else it needs (edge stepping, pre-stepping, per-pixel interpolation) is
//! expressed with the operations below, so one scan converter serves every
//! vertex layout. Each field of an attribute bundle must be linear under
//! these operations.

use std::ops::{Add, Mul, Sub};

/// Linear operations over a per-vertex attribute bundle.
///
/// `add` and `sub` are the `+` and `-` operators. Implemented for every
/// `Copy` type closed under `+`, `-` and `* f32`, which covers `f32`, the
/// vector types and anything built with [`impl_attributes!`](crate::impl_attributes).
pub trait Interpolate:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    /// `self · c`
    fn scale(self, c: f32) -> Self {
        self * c
    }

    /// `self + c · other`
    fn mul_add(self, other: Self, c: f32) -> Self {
        self + other * c
    }

    /// `(1 - alpha) · self + alpha · other`
    ///
    /// Exact at both endpoints: `alpha = 0` yields `self`, `alpha = 1`
    /// yields `other`.
    fn interpolate(self, other: Self, alpha: f32) -> Self {
        self * (1.0 - alpha) + other * alpha
    }
}

impl<T> Interpolate for T where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T> {}

/// Implements `Add`, `Sub` and `Mul<f32>` field by field for a vertex struct,
/// which makes it [`Interpolate`].
///
/// ```
/// use bloop::impl_attributes;
/// use bloop::rasterizer::{Interpolate, Vec2, Vec4};
///
/// #[derive(Debug, Clone, Copy)]
/// struct UvOut {
///     pos: Vec4,
///     uv: Vec2,
/// }
///
/// impl_attributes!(UvOut { pos, uv });
///
/// let a = UvOut { pos: Vec4::ZERO, uv: Vec2::new(0.0, 0.0) };
/// let b = UvOut { pos: Vec4::new(2.0, 2.0, 2.0, 2.0), uv: Vec2::new(1.0, 0.5) };
/// let mid = a.interpolate(b, 0.5);
/// assert_eq!(mid.uv, Vec2::new(0.5, 0.25));
/// ```
#[macro_export]
macro_rules! impl_attributes {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl ::std::ops::Add for $ty {
            type Output = $ty;
            fn add(self, other: $ty) -> $ty {
                $ty { $($field: self.$field + other.$field),+ }
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = $ty;
            fn sub(self, other: $ty) -> $ty {
                $ty { $($field: self.$field - other.$field),+ }
            }
        }

        impl ::std::ops::Mul<f32> for $ty {
            type Output = $ty;
            fn mul(self, c: f32) -> $ty {
                $ty { $($field: self.$field * c),+ }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::{Vec3, Vec4};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Bundle {
        pos: Vec4,
        color: Vec3,
        shade: f32,
    }

    impl_attributes!(Bundle { pos, color, shade });

    fn a() -> Bundle {
        Bundle {
            pos: Vec4::new(1.5, -2.0, 0.3, 0.7),
            color: Vec3::new(0.1, 0.2, 0.3),
            shade: 0.25,
        }
    }

    fn b() -> Bundle {
        Bundle {
            pos: Vec4::new(-7.25, 4.0, 0.9, 0.2),
            color: Vec3::new(0.9, 0.8, 0.7),
            shade: 1.0,
        }
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(a().interpolate(b(), 0.0), a());
        assert_eq!(a().interpolate(b(), 1.0), b());
        assert_eq!(3.0f32.interpolate(9.0, 0.0), 3.0);
        assert_eq!(3.0f32.interpolate(9.0, 1.0), 9.0);
    }

    #[test]
    fn test_interpolate_midpoint_touches_every_field() {
        let mid = a().interpolate(b(), 0.5);
        assert!((mid.pos.x - (-2.875)).abs() < 1e-5);
        assert!((mid.color.y - 0.5).abs() < 1e-5);
        assert!((mid.shade - 0.625).abs() < 1e-5);
    }

    #[test]
    fn test_mul_add_steps_along_difference() {
        let step = (b() - a()).scale(0.25);
        let mut v = a();
        for _ in 0..4 {
            v = v + step;
        }
        let jumped = a().mul_add(step, 4.0);
        assert!((v.pos.x - jumped.pos.x).abs() < 1e-4);
        assert!((jumped.pos.x - b().pos.x).abs() < 1e-4);
        assert!((jumped.color.z - b().color.z).abs() < 1e-5);
    }
}
