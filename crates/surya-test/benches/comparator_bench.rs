//! Benchmarks for SURYA pose comparison

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use surya_core::{angle_at, ComparatorConfig, JointPolicy, Point2, PoseComparator, POSE_COUNT};
use surya_test::{body, DetectorNoise, Posture, SyntheticDetector};

fn bench_compare_policies(c: &mut Criterion) {
    let frame = body(Posture::Aligned);
    let policies = [
        ("visible", JointPolicy::VisibleIsCorrect),
        ("angle", JointPolicy::AngleCheck),
        ("strict", JointPolicy::Strict),
    ];

    let mut group = c.benchmark_group("compare_policy");
    for (name, policy) in policies {
        let comparator = PoseComparator::with_config(ComparatorConfig {
            joint_policy: policy,
            ..Default::default()
        });
        group.bench_function(name, |b| {
            b.iter(|| black_box(comparator.compare(Some(black_box(&frame)), black_box(5))))
        });
    }
    group.finish();
}

fn bench_compare_all_poses(c: &mut Criterion) {
    let comparator = PoseComparator::with_config(ComparatorConfig::angle_checked());
    let frame = body(Posture::Leaning { offset: 0.2 });

    let mut group = c.benchmark_group("compare_pose");
    for pose in 0..POSE_COUNT {
        group.bench_with_input(BenchmarkId::from_parameter(pose), &pose, |b, &pose| {
            b.iter(|| black_box(comparator.compare(Some(&frame), pose)))
        });
    }
    group.finish();
}

fn bench_synthetic_frame(c: &mut Criterion) {
    let mut detector = SyntheticDetector::new(DetectorNoise::harsh(), 42);

    c.bench_function("synthetic_frame", |b| b.iter(|| black_box(detector.next_frame())));
}

fn bench_angle_at(c: &mut Criterion) {
    let a = Point2::new(0.4, 0.3);
    let v = Point2::new(0.5, 0.5);
    let z = Point2::new(0.7, 0.55);

    c.bench_function("angle_at", |b| {
        b.iter(|| black_box(angle_at(black_box(a), black_box(v), black_box(z))))
    });
}

criterion_group!(
    benches,
    bench_compare_policies,
    bench_compare_all_poses,
    bench_synthetic_frame,
    bench_angle_at,
);
criterion_main!(benches);
