// Criterion benchmarks for Exchange Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use exchange_algo::core::{normalize_university_name, Matcher};
use exchange_algo::models::{StudentProfile, UniversityRequirement};
use exchange_algo::services::RequirementStore;

fn build_store(size: usize) -> RequirementStore {
    let requirements = (0..size)
        .map(|i| UniversityRequirement {
            name: format!("University {}", i),
            min_gpa: 3.0 + (i % 10) as f64 * 0.1,
            min_ielts: 6.0 + (i % 4) as f64 * 0.5,
            required_extracurriculars: (i % 5) as u32 + 1,
            engineering_transfer_courses: vec![
                "ENGR 1010".to_string(),
                "MECH 2200".to_string(),
                "ELEC 3330".to_string(),
            ],
            science_transfer_courses: vec!["PHYS 1010".to_string(), "BIOL 2200".to_string()],
            business_transfer_courses: vec!["BUSI 1010".to_string()],
            additional_requirements: "Statement of purpose".to_string(),
        })
        .collect();
    RequirementStore::from_requirements(requirements)
}

fn build_student(choice_count: usize) -> StudentProfile {
    StudentProfile {
        gpa: Some(3.6),
        ielts: Some(7.0),
        major: "Engineering".to_string(),
        extracurriculars: vec!["Debate club".to_string()],
        ranked_choices: (0..choice_count)
            .map(|i| format!("University {}", i))
            .collect(),
    }
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_university_name", |b| {
        b.iter(|| normalize_university_name(black_box("massachusetts institute of technology")));
    });
}

fn bench_normalize_passthrough(c: &mut Criterion) {
    c.bench_function("normalize_unknown_name", |b| {
        b.iter(|| normalize_university_name(black_box("National University of Singapore")));
    });
}

fn bench_rank(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let store = build_store(15);

    let mut group = c.benchmark_group("rank_choices");
    for choice_count in [1, 5, 10] {
        let student = build_student(choice_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(choice_count),
            &student,
            |b, student| {
                b.iter(|| matcher.rank(black_box(student), black_box(&store)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_normalize_passthrough,
    bench_rank
);
criterion_main!(benches);
