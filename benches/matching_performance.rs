//! Performance benchmarks for gift matching

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wichteln::config::AppConfig;
use wichteln::exchange::{GroupRequest, IllegalPair};
use wichteln::matching::{check_feasibility, GiftMatcher, MatcherConfig, RandomRestartMatcher};
use wichteln::{ConstraintSet, ExchangeService, Pair};

fn participants(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Participant{}", i)).collect()
}

/// Forbid each participant from gifting the next `per_person` people
fn neighbour_constraints(names: &[String], per_person: usize) -> ConstraintSet {
    let n = names.len();
    (0..n)
        .flat_map(|i| (1..=per_person).map(move |k| (i, (i + k) % n)))
        .map(|(g, r)| Pair::new(names[g].clone(), names[r].clone()))
        .collect()
}

fn bench_unconstrained_matching(c: &mut Criterion) {
    let matcher = RandomRestartMatcher::new(MatcherConfig::default()).unwrap();
    let constraints = ConstraintSet::new();
    let mut group = c.benchmark_group("unconstrained_matching");

    for size in [3usize, 10, 50, 200] {
        let names = participants(size);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &names, |b, names| {
            b.iter(|| {
                let outcome = matcher.assign(black_box(names), &constraints, &mut rng);
                black_box(outcome)
            })
        });
    }

    group.finish();
}

fn bench_constrained_matching(c: &mut Criterion) {
    let matcher = RandomRestartMatcher::new(MatcherConfig::default()).unwrap();
    let names = participants(20);
    let mut group = c.benchmark_group("constrained_matching_20");

    for per_person in [1usize, 3, 6] {
        let constraints = neighbour_constraints(&names, per_person);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        group.bench_with_input(
            BenchmarkId::from_parameter(per_person),
            &constraints,
            |b, constraints| {
                b.iter(|| {
                    let outcome = matcher.assign(&names, black_box(constraints), &mut rng);
                    black_box(outcome)
                })
            },
        );
    }

    group.finish();
}

fn bench_degraded_fallback(c: &mut Criterion) {
    let matcher = RandomRestartMatcher::new(MatcherConfig::default()).unwrap();
    let names = participants(2);
    let constraints = neighbour_constraints(&names, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    c.bench_function("degraded_fallback_1000_attempts", |b| {
        b.iter(|| black_box(matcher.assign(&names, &constraints, &mut rng)))
    });
}

fn bench_feasibility_check(c: &mut Criterion) {
    let names = participants(100);
    let constraints = neighbour_constraints(&names, 10);

    c.bench_function("feasibility_check_100", |b| {
        b.iter(|| black_box(check_feasibility(black_box(&names), &constraints)))
    });
}

/// Unique PascalCase identifier for the `n`th benchmark exchange
fn bench_identifier(mut n: u64) -> String {
    let mut suffix = String::new();
    loop {
        suffix.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            break;
        }
    }
    format!("BenchGiftExchange{}", suffix)
}

fn bench_exchange_creation(c: &mut Criterion) {
    let names = participants(12);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut counter = 0u64;

    c.bench_function("exchange_creation_12", |b| {
        let service = ExchangeService::from_config(AppConfig::default()).unwrap();
        b.iter(|| {
            counter += 1;
            let request = GroupRequest {
                identifier: bench_identifier(counter),
                participants: names.clone(),
                illegal_pairs: vec![IllegalPair::new("Participant0", "Participant1")],
                description: None,
            };
            black_box(service.create_exchange(&request, &mut rng))
        })
    });
}

criterion_group!(
    benches,
    bench_unconstrained_matching,
    bench_constrained_matching,
    bench_degraded_fallback,
    bench_feasibility_check,
    bench_exchange_creation
);
criterion_main!(benches);
