//! Bone transform tests
//!
//! Tests for:
//! - Local → global propagation (rotation order, scale, length)
//! - Global → local reconstruction and the round trip between the two
//! - Position-only reconstruction (two-axis constraint)
//! - Inter-pose matrices and dual quaternions

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use armature::{ArmatureError, Bone, DualQuat};
use glam::{Quat, Vec3};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Same rotation, allowing for the `q` / `-q` ambiguity.
fn quat_approx(a: Quat, b: Quat) -> bool {
    a.abs_diff_eq(b, EPSILON) || a.abs_diff_eq(-b, EPSILON)
}

fn parent_bone() -> Bone {
    Bone {
        global_rotation: Quat::from_euler(glam::EulerRot::XYZ, 0.3, -0.8, 1.1),
        global_scaling: Vec3::new(1.5, 0.5, 2.0),
        global_translation: Vec3::new(4.0, -1.0, 2.5),
        ..Bone::IDENTITY
    }
}

// ============================================================================
// UpdateGlobalData
// ============================================================================

#[test]
fn global_translation_follows_parent_rotation() {
    let parent = Bone {
        global_rotation: Quat::from_rotation_z(FRAC_PI_2),
        global_translation: Vec3::new(1.0, 0.0, 0.0),
        ..Bone::IDENTITY
    };
    let mut child = Bone {
        local_translation: Vec3::new(0.0, 1.0, 0.0),
        ..Bone::IDENTITY
    };
    child.update_global_data(&parent);

    // +Y turned 90° about Z points along -X.
    let expected = Vec3::new(1.0, 0.0, 0.0) + Quat::from_rotation_z(FRAC_PI_2) * Vec3::Y;
    assert!(vec3_approx(child.global_translation, expected));
    assert!(vec3_approx(child.global_translation, Vec3::ZERO));
    assert!(quat_approx(child.global_rotation, parent.global_rotation));
}

#[test]
fn global_rotation_applies_local_then_parent() {
    let parent = Bone {
        global_rotation: Quat::from_rotation_z(FRAC_PI_2),
        ..Bone::IDENTITY
    };
    let mut child = Bone {
        local_rotation: Quat::from_rotation_x(FRAC_PI_2),
        ..Bone::IDENTITY
    };
    child.update_global_data(&parent);

    // Local X-turn first carries +Z to -Y, the parent's Z-turn then carries -Y to +X.
    let z = child.global_rotation * Vec3::Z;
    assert!(vec3_approx(z, Vec3::X), "got {z:?}");
}

#[test]
fn global_scaling_and_length_accumulate() {
    let parent = parent_bone();
    let mut child = Bone {
        local_scaling: Vec3::new(2.0, 2.0, 0.5),
        local_translation: Vec3::new(0.0, 3.0, 4.0),
        ..Bone::IDENTITY
    };
    child.update_global_data(&parent);

    assert!(vec3_approx(child.global_scaling, Vec3::new(3.0, 1.0, 1.0)));
    assert!((child.local_length - 5.0).abs() < EPSILON);
    // (0, 3, 4) * (1.5, 0.5, 2.0) = (0, 1.5, 8)
    let expected = Vec3::new(0.0, 1.5, 8.0).length();
    assert!((child.global_length - expected).abs() < EPSILON);
    let offset = child.global_translation - parent.global_translation;
    assert!((offset.length() - expected).abs() < EPSILON);
}

#[test]
fn long_chain_keeps_unit_rotation() {
    let step = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0).normalize(), 0.0137);
    let mut parent = Bone::IDENTITY;
    for _ in 0..2000 {
        let mut child = Bone {
            local_rotation: step,
            local_translation: Vec3::Y,
            ..Bone::IDENTITY
        };
        child.update_global_data(&parent);
        parent = child;
    }
    assert!((parent.global_rotation.length() - 1.0).abs() < EPSILON);
}

// ============================================================================
// UpdateLocalData
// ============================================================================

#[test]
fn local_global_round_trip() {
    let parent = parent_bone();
    let locals = [
        (Quat::IDENTITY, Vec3::ONE, Vec3::Y),
        (Quat::from_rotation_y(FRAC_PI_4), Vec3::new(1.0, 2.0, 1.0), Vec3::new(0.5, -1.0, 2.0)),
        (
            Quat::from_axis_angle(Vec3::new(-1.0, 0.5, 0.25).normalize(), 2.4),
            Vec3::new(0.3, 1.7, 0.9),
            Vec3::new(-3.0, 0.0, 0.1),
        ),
    ];

    for (rotation, scaling, translation) in locals {
        let mut bone = Bone {
            local_rotation: rotation,
            local_scaling: scaling,
            local_translation: translation,
            ..Bone::IDENTITY
        };
        bone.update_global_data(&parent);

        let mut rebuilt = Bone {
            global_rotation: bone.global_rotation,
            global_scaling: bone.global_scaling,
            global_translation: bone.global_translation,
            ..Bone::IDENTITY
        };
        rebuilt.update_local_data(&parent).unwrap();

        assert!(quat_approx(rebuilt.local_rotation, rotation));
        assert!(vec3_approx(rebuilt.local_scaling, scaling));
        assert!(vec3_approx(rebuilt.local_translation, translation));
        assert!((rebuilt.local_length - translation.length()).abs() < EPSILON);
        assert!((rebuilt.global_length - bone.global_length).abs() < EPSILON);
    }
}

#[test]
fn local_data_rejects_zero_parent_scale() {
    let parent = Bone {
        global_scaling: Vec3::new(1.0, 1.0, 0.0),
        ..Bone::IDENTITY
    };
    let mut bone = Bone {
        global_rotation: Quat::from_rotation_x(0.5),
        global_translation: Vec3::new(3.0, 4.0, 0.0),
        ..Bone::IDENTITY
    };
    let before = bone;
    let err = bone.update_local_data(&parent).unwrap_err();
    assert!(matches!(err, ArmatureError::DegenerateScale { .. }));
    assert_eq!(bone, before);
}

// ============================================================================
// UpdateLocalDataByPositionOnly
// ============================================================================

#[test]
fn position_only_sets_length_and_direction() {
    let mut bone = Bone {
        global_translation: Vec3::new(0.0, 0.0, 2.0),
        ..Bone::IDENTITY
    };
    bone.update_local_data_by_position_only(&Bone::IDENTITY).unwrap();

    assert!(vec3_approx(bone.local_scaling, Vec3::new(1.0, 2.0, 1.0)));
    assert!(vec3_approx(bone.local_rotation * Vec3::Y, Vec3::Z));
    assert!(quat_approx(bone.global_rotation, bone.local_rotation));
}

#[test]
fn position_only_is_roll_then_pitch() {
    let targets = [
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-0.3, 0.2, 0.9),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.7, -0.1, -0.7),
    ];
    for target in targets {
        let mut bone = Bone {
            global_translation: target,
            ..Bone::IDENTITY
        };
        bone.update_local_data_by_position_only(&Bone::IDENTITY).unwrap();

        let dir = target.normalize();
        let roll = -dir.x.asin();
        let pitch = dir.z.atan2(dir.y);
        let expected = Quat::from_rotation_x(pitch) * Quat::from_rotation_z(roll);

        assert!(quat_approx(bone.local_rotation, expected), "target {target:?}");
        assert!(vec3_approx(bone.local_rotation * Vec3::Y, dir), "target {target:?}");
        assert!((bone.local_scaling.y - target.length()).abs() < EPSILON);
    }
}

// ============================================================================
// Inter-pose transforms
// ============================================================================

fn pose_pair() -> (Bone, Bone) {
    let from = Bone {
        global_rotation: Quat::from_rotation_z(0.3),
        global_scaling: Vec3::new(1.0, 2.0, 1.0),
        global_translation: Vec3::new(1.0, 2.0, 3.0),
        ..Bone::IDENTITY
    };
    let to = Bone {
        global_rotation: Quat::from_rotation_x(0.5),
        global_scaling: Vec3::new(1.0, 4.0, 1.0),
        global_translation: Vec3::new(-1.0, 0.0, 4.0),
        ..Bone::IDENTITY
    };
    (from, to)
}

#[test]
fn transform_matrix_maps_bone_space_with_scale_ratio() {
    let (from, to) = pose_pair();
    let m = Bone::transform_matrix(&from, &to).unwrap();

    assert!(vec3_approx(m.transform_point3(from.global_translation), to.global_translation));

    let along_from = from.global_translation + from.global_rotation * Vec3::Y;
    let along_to = to.global_translation + to.global_rotation * Vec3::new(0.0, 2.0, 0.0);
    assert!(vec3_approx(m.transform_point3(along_from), along_to));
}

#[test]
fn transform_matrix_rejects_zero_scale() {
    let (mut from, to) = pose_pair();
    from.global_scaling = Vec3::new(1.0, 0.0, 1.0);
    assert!(matches!(
        Bone::transform_matrix(&from, &to),
        Err(ArmatureError::DegenerateScale { .. })
    ));
}

#[test]
fn rigid_transform_ignores_scale() {
    let (from, to) = pose_pair();
    let m = Bone::rigid_transform_matrix(&from, &to);

    let v = Vec3::new(0.2, 1.0, -0.5);
    let p = from.global_translation + from.global_rotation * v;
    let expected = to.global_translation + to.global_rotation * v;
    assert!(vec3_approx(m.transform_point3(p), expected));
}

#[test]
fn rigid_dual_quaternion_matches_matrix() {
    let (from, to) = pose_pair();
    let m = Bone::rigid_transform_matrix(&from, &to);
    let dq: DualQuat = Bone::rigid_transform_dual_quaternion(&from, &to);

    assert!((dq.real.length() - 1.0).abs() < EPSILON);
    for p in [Vec3::ZERO, Vec3::ONE, from.global_translation, Vec3::new(-2.0, 5.0, 0.5)] {
        assert!(vec3_approx(dq.transform_point(p), m.transform_point3(p)));
    }
}

#[test]
fn same_pose_is_identity() {
    let (from, _) = pose_pair();
    let m = Bone::transform_matrix(&from, &from).unwrap();
    assert!(m.abs_diff_eq(glam::Mat4::IDENTITY, EPSILON));
    assert!(Bone::rigid_transform_matrix(&from, &from).abs_diff_eq(glam::Mat4::IDENTITY, EPSILON));
}
