use std::env;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sequence_sort::collections::contiguous::Sequence;
use sequence_sort::sort::{self, SortConfig, Strategy};

const DEFAULT_COUNT: usize = 100_000;
const DEFAULT_SEED: u64 = 42;
const THRESHOLDS: [usize; 8] = [1, 4, 8, 16, 20, 32, 48, 64];
const RUNS: u32 = 5;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let count = parse_arg(args.next(), "count", DEFAULT_COUNT);
    let seed = parse_arg(args.next(), "seed", DEFAULT_SEED);
    let mut rng = StdRng::seed_from_u64(seed);

    info!(count, seed, "starting");

    sequence_demo();
    compare_with_std(&mut rng, count);

    for (name, data) in inputs(&mut rng, count) {
        threshold_sweep(name, &data);
    }
}

fn parse_arg<T: std::str::FromStr + std::fmt::Display>(
    arg: Option<String>,
    name: &str,
    default: T,
) -> T {
    match arg.map(|arg| arg.parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            warn!(name, %default, "invalid argument, using the default");
            default
        },
        None => default,
    }
}

fn sequence_demo() {
    let mut seq = Sequence::with_cap(2);
    for value in [5, 2, 8, 2, 9, 1, 5, 5, 2] {
        seq.push(value);
    }
    seq.insert(3, 7);
    let removed = seq.remove(0);
    info!(%seq, removed, len = seq.len(), cap = seq.cap(), "filled sequence");

    let backwards: Sequence<_> = seq.cursor_rev().copied().collect();
    info!(%backwards, "reverse cursor");

    let report = seq.sort_with(|a, b| a < b, &SortConfig::default());
    info!(%seq, max_depth = report.max_depth, partitions = report.partitions, "sorted sequence");

    let mut moved = seq.take();
    moved.sort_by(|a, b| a > b);
    info!(%moved, source_len = seq.len(), source_cap = seq.cap(), "moved and sorted descending");
}

fn compare_with_std(rng: &mut StdRng, count: usize) {
    let data: Vec<i64> = (0..count).map(|_| rng.random_range(-1_000_000..=1_000_000)).collect();

    let mut ours = data.clone();
    let start = Instant::now();
    sort::sort(&mut ours);
    let ours_time = start.elapsed();

    let mut expected = data;
    let start = Instant::now();
    expected.sort_unstable();
    let std_time = start.elapsed();

    if ours != expected {
        warn!("sort disagrees with the standard library");
    }
    info!(?ours_time, ?std_time, "compared with slice::sort_unstable");
}

fn inputs(rng: &mut StdRng, count: usize) -> [(&'static str, Vec<i64>); 4] {
    let random = (0..count).map(|_| rng.random_range(0..=i64::MAX)).collect();
    let few_unique = (0..count).map(|_| rng.random_range(0..8)).collect();
    let sorted = (0..count as i64).collect();
    let reversed = (0..count as i64).rev().collect();

    [
        ("random", random),
        ("few unique", few_unique),
        ("sorted", sorted),
        ("reversed", reversed),
    ]
}

/// Times every strategy and threshold on copies of `data`, logging the average, min and max of a
/// few runs along with the fastest configuration.
fn threshold_sweep(name: &str, data: &[i64]) {
    let mut best: Option<(SortConfig, Duration)> = None;

    for strategy in [Strategy::Quick, Strategy::Hybrid, Strategy::HybridRecursive] {
        for threshold in THRESHOLDS {
            // Plain quicksort ignores the threshold.
            if strategy.is_quick() && threshold != THRESHOLDS[0] {
                continue;
            }

            let config = SortConfig::new().with_strategy(strategy).with_threshold(threshold);
            let mut times = Vec::with_capacity(RUNS as usize);
            let mut max_depth = 0;

            for _ in 0..RUNS {
                let mut attempt: Sequence<i64> = data.iter().copied().collect();
                let start = Instant::now();
                let report = attempt.sort_with(|a, b| a < b, &config);
                times.push(start.elapsed());

                max_depth = max_depth.max(report.max_depth);
                if !attempt.is_sorted() {
                    warn!(input = name, %strategy, threshold, "output isn't sorted");
                }
            }

            let avg = times.iter().sum::<Duration>() / RUNS;
            let min = times.iter().min().copied().unwrap_or_default();
            let max = times.iter().max().copied().unwrap_or_default();
            info!(input = name, %strategy, threshold, ?avg, ?min, ?max, max_depth, "timed");

            if best.as_ref().is_none_or(|(_, fastest)| avg < *fastest) {
                best = Some((config, avg));
            }
        }
    }

    if let Some((config, avg)) = best {
        info!(
            input = name,
            strategy = %config.strategy,
            threshold = config.insertion_threshold,
            ?avg,
            "fastest configuration"
        );
    }
}
