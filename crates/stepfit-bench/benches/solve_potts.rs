// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stepfit_costs::RangeMedian;
use stepfit_offline::{PottsConfig, solve_potts, solve_potts_approx};

fn staircase(n: usize) -> Vec<f64> {
    let regime = n / 4;
    let mut values = vec![0.0; n];
    for v in values.iter_mut().skip(regime).take(regime) {
        *v = 0.9;
    }
    for v in values.iter_mut().skip(regime * 2).take(regime) {
        *v = -0.4;
    }
    for v in values.iter_mut().skip(regime * 3) {
        *v = 1.3;
    }
    values
}

fn bench_exact_vs_approx(c: &mut Criterion, case_suffix: &str, n: usize, gamma: f64) {
    let values = staircase(n);
    let config = PottsConfig::default();

    c.bench_function(&format!("solve_potts_exact_{case_suffix}"), |b| {
        b.iter(|| {
            let mut oracle =
                RangeMedian::unweighted(&values).expect("benchmark oracle should build");
            solve_potts(&mut oracle, black_box(gamma), black_box(&config))
                .expect("benchmark solve should succeed");
        })
    });

    c.bench_function(&format!("solve_potts_approx_{case_suffix}"), |b| {
        b.iter(|| {
            let mut oracle =
                RangeMedian::unweighted(&values).expect("benchmark oracle should build");
            solve_potts_approx(&mut oracle, Some(black_box(gamma)), black_box(&config))
                .expect("benchmark solve should succeed");
        })
    });
}

fn benchmark_n256(c: &mut Criterion) {
    bench_exact_vs_approx(c, "n256", 256, 0.5);
}

fn benchmark_n2048(c: &mut Criterion) {
    bench_exact_vs_approx(c, "n2048", 2_048, 0.5);
}

criterion_group!(benches, benchmark_n256, benchmark_n2048);
criterion_main!(benches);
