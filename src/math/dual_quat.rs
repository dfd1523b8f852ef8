use glam::{Mat4, Quat, Vec3, Vec4};
use std::ops::Mul;

/// Unit dual quaternion encoding a rigid transform (rotation + translation).
///
/// `real` holds the rotation, `dual` holds `0.5 * t * real` where `t` is the
/// translation as a pure quaternion. Composition follows the same order as
/// [`Quat`]: `a * b` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualQuat {
    pub real: Quat,
    pub dual: Quat,
}

/// Hamilton product without the unit-length assumptions of `Quat * Quat`.
#[inline]
fn hamilton(a: Quat, b: Quat) -> Quat {
    let (a, b) = (Vec4::from(a), Vec4::from(b));
    Quat::from_xyzw(
        a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
        a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
        a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
    )
}

#[inline]
fn scaled(q: Quat, s: f32) -> Quat {
    Quat::from_vec4(Vec4::from(q) * s)
}

impl DualQuat {
    pub const IDENTITY: Self = Self {
        real: Quat::IDENTITY,
        dual: Quat::from_xyzw(0.0, 0.0, 0.0, 0.0),
    };

    /// Rotation by `rotation` followed by translation by `translation`.
    #[must_use]
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        let t = Quat::from_xyzw(translation.x, translation.y, translation.z, 0.0);
        Self {
            real: rotation,
            dual: scaled(hamilton(t, rotation), 0.5),
        }
    }

    /// Rotation by `rotation` about `origin`, followed by translation by `translation`.
    ///
    /// Same motion as [`rigid_transform_matrix`](super::rigid_transform_matrix).
    #[must_use]
    pub fn from_rigid_transform(origin: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self::from_rotation_translation(rotation, origin + translation - rotation * origin)
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.real
    }

    #[must_use]
    pub fn translation(&self) -> Vec3 {
        let t = hamilton(scaled(self.dual, 2.0), self.real.conjugate());
        Vec3::new(t.x, t.y, t.z)
    }

    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.real * point + self.translation()
    }

    /// Rescales both parts so that `real` has unit length.
    ///
    /// Returns `self` unchanged when `real` is zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let length = self.real.length();
        if length <= f32::EPSILON {
            return self;
        }
        let inv = length.recip();
        Self {
            real: scaled(self.real, inv),
            dual: scaled(self.dual, inv),
        }
    }

    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.real, self.translation())
    }
}

impl Default for DualQuat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for DualQuat {
    type Output = DualQuat;

    fn mul(self, rhs: Self) -> Self::Output {
        DualQuat {
            real: hamilton(self.real, rhs.real),
            dual: Quat::from_vec4(
                Vec4::from(hamilton(self.real, rhs.dual)) + Vec4::from(hamilton(self.dual, rhs.real)),
            ),
        }
    }
}
