#![allow(dead_code)]

use std::hint::black_box;
use std::str::FromStr;

use clmm_core_math::math::{
    bit_math, liquidity_math, math_helpers, sqrt_price_math, swap_math, tick_bitmap::TickBitmap,
    tick_math,
};
use clmm_core_math::{Q96, U256};
use criterion::{BenchmarkId, Criterion};

const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

fn sqrt_price_2000() -> U256 {
    U256::from_str("3543191142285914378072636784640").unwrap()
}

pub fn bench_tick_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_math");

    for tick in [tick_math::MIN_TICK, -50_000, 0, 76_012, tick_math::MAX_TICK] {
        group.bench_with_input(
            BenchmarkId::new("sqrt_ratio_at_tick", tick),
            &tick,
            |b, &tick| b.iter(|| tick_math::sqrt_ratio_at_tick(black_box(tick))),
        );
    }

    for sqrt_price in [tick_math::MIN_SQRT_RATIO, Q96, sqrt_price_2000()] {
        group.bench_with_input(
            BenchmarkId::new("tick_at_sqrt_ratio", sqrt_price),
            &sqrt_price,
            |b, &sqrt_price| b.iter(|| tick_math::tick_at_sqrt_ratio(black_box(sqrt_price))),
        );
    }

    group.finish();
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt_price_math");
    let amount = U256::from(100_000_000_000_000_000u128);

    for zero_for_one in [true, false] {
        group.bench_with_input(
            BenchmarkId::new("next_sqrt_price_from_input", zero_for_one),
            &zero_for_one,
            |b, &zero_for_one| {
                b.iter(|| {
                    sqrt_price_math::next_sqrt_price_from_input(
                        black_box(Q96),
                        black_box(ONE_TOKEN),
                        black_box(amount),
                        zero_for_one,
                    )
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("next_sqrt_price_from_output", zero_for_one),
            &zero_for_one,
            |b, &zero_for_one| {
                b.iter(|| {
                    sqrt_price_math::next_sqrt_price_from_output(
                        black_box(Q96),
                        black_box(ONE_TOKEN),
                        black_box(amount),
                        zero_for_one,
                    )
                })
            },
        );
    }

    // product overflows, reciprocal form
    group.bench_function("next_sqrt_price_from_amount0_fallback", |b| {
        b.iter(|| {
            sqrt_price_math::next_sqrt_price_from_amount0(
                black_box(Q96),
                black_box(1),
                black_box(U256::MAX >> 1),
                true,
            )
        })
    });

    group.finish();
}

pub fn bench_swap_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_math");
    let current = sqrt_price_2000();
    let lower = U256::from_str("3361366258487168519347365740544").unwrap();
    let upper = U256::from_str("3716130220787573499654546915328").unwrap();

    group.bench_function("compute_swap_step_zero_for_one", |b| {
        b.iter(|| {
            swap_math::compute_swap_step(
                black_box(current),
                black_box(lower),
                black_box(ONE_TOKEN),
                black_box(100_000_000_000_000_000),
                true,
            )
        })
    });
    group.bench_function("compute_swap_step_one_for_zero", |b| {
        b.iter(|| {
            swap_math::compute_swap_step(
                black_box(current),
                black_box(upper),
                black_box(ONE_TOKEN),
                black_box(1_000_000_000_000),
                false,
            )
        })
    });
    group.bench_function("amounts_for_liquidity", |b| {
        b.iter(|| {
            liquidity_math::amounts_for_liquidity(
                black_box(current),
                black_box(lower),
                black_box(upper),
                black_box(ONE_TOKEN),
            )
        })
    });

    group.finish();
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("math_helpers");

    group.bench_function("mul_div_fits_256", |b| {
        b.iter(|| math_helpers::mul_div(black_box(Q96), black_box(Q96), black_box(Q96)))
    });
    group.bench_function("mul_div_512_intermediate", |b| {
        b.iter(|| {
            math_helpers::mul_div(black_box(U256::MAX), black_box(U256::MAX), black_box(U256::MAX))
        })
    });
    group.bench_function("sqrt_512", |b| {
        let radicand = math_helpers::widen(U256::MAX) << 96;
        b.iter(|| math_helpers::sqrt_512(black_box(radicand)))
    });

    group.finish();
}

pub fn bench_tick_bitmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_bitmap");

    let mut bitmap = TickBitmap::new();
    for tick in [-200, -55, -4, 70, 78, 84, 139, 240, 535] {
        bitmap.flip_tick(tick * 60, 60).unwrap();
    }

    for lte in [true, false] {
        group.bench_with_input(
            BenchmarkId::new("next_initialized_tick_within_one_word", lte),
            &lte,
            |b, &lte| {
                b.iter(|| {
                    bitmap.next_initialized_tick_within_one_word(black_box(4_680), 60, lte)
                })
            },
        );
    }

    group.bench_function("flip_tick_twice", |b| {
        let mut bitmap = bitmap.clone();
        b.iter(|| {
            bitmap.flip_tick(black_box(600), 60).unwrap();
            bitmap.flip_tick(black_box(600), 60).unwrap();
        })
    });

    group.finish();
}

pub fn bench_bit_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_math");
    let word = U256::from(0b1011001000u64) << 100;

    group.bench_function("most_significant_bit", |b| {
        b.iter(|| bit_math::most_significant_bit(black_box(word)))
    });
    group.bench_function("least_significant_bit", |b| {
        b.iter(|| bit_math::least_significant_bit(black_box(word)))
    });

    group.finish();
}
