use armature::{Armature, Bone, Frame, MirrorSettings};
use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use std::hint::black_box;

/// A spine of `depth` joints with a left/right limb chain of `depth`
/// joints hanging off every spine joint.
fn create_test_armature(depth: usize) -> Armature {
    let mut parents = Vec::new();
    let mut names = Vec::new();

    let mut spine_parent = -1;
    for s in 0..depth {
        let spine = parents.len() as i32;
        parents.push(spine_parent);
        names.push(format!("Spine{s}"));

        for side in ["Left", "Right"] {
            let mut parent = spine;
            for l in 0..depth {
                parents.push(parent);
                names.push(format!("{side}Limb{s}_{l}"));
                parent = parents.len() as i32 - 1;
            }
        }
        spine_parent = spine;
    }

    Armature::from_parents(&parents, &names).unwrap()
}

fn create_pose(armature: &Armature, phase: f32) -> Frame {
    let bones = (0..armature.size())
        .map(|i| {
            let t = i as f32 * 0.1 + phase;
            Bone {
                local_rotation: Quat::from_rotation_z(t.sin() * 0.3),
                local_translation: Vec3::new(0.0, 1.0, 0.1 * t.cos()),
                ..Bone::IDENTITY
            }
        })
        .collect::<Vec<_>>();
    let mut frame = Frame::from_bones(bones);
    frame.rebuild_global(armature).unwrap();
    frame
}

fn hierarchy_benchmark(c: &mut Criterion) {
    // 8 spine joints, 16 limbs of 8 joints: 136 joints.
    let armature = create_test_armature(8);
    let bind = create_pose(&armature, 0.0);
    let pose = create_pose(&armature, 1.0);

    c.bench_function("rebuild_global", |b| {
        let mut frame = pose.clone();
        b.iter(|| {
            frame.rebuild_global(black_box(&armature)).unwrap();
            black_box(&frame);
        })
    });

    c.bench_function("rebuild_local", |b| {
        let mut frame = pose.clone();
        b.iter(|| {
            frame.rebuild_local(black_box(&armature)).unwrap();
            black_box(&frame);
        })
    });

    c.bench_function("transform_matrices", |b| {
        let mut out = Vec::with_capacity(armature.size());
        b.iter(|| {
            Frame::transform_matrices_into(black_box(&bind), black_box(&pose), &mut out).unwrap();
            black_box(&out);
        })
    });

    c.bench_function("rigid_dual_quaternions", |b| {
        b.iter(|| black_box(Frame::rigid_dual_quaternions(black_box(&bind), black_box(&pose)).unwrap()))
    });
}

fn setup_benchmark(c: &mut Criterion) {
    c.bench_function("semantics_and_mirrors", |b| {
        b.iter(|| {
            let mut armature = create_test_armature(8);
            armature.assign_semantics();
            black_box(armature.build_mirror_relation(&MirrorSettings::default()).unwrap())
        })
    });
}

criterion_group!(benches, hierarchy_benchmark, setup_benchmark);
criterion_main!(benches);
