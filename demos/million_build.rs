use fks_fixed_set::{BuildConfig, Builder, FixedSetError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

const N_KEYS: usize = 1_000_000;
const GEN_SEED: u64 = 42;

fn main() -> Result<(), FixedSetError> {
    env_logger::init();
    println!("--- fks_fixed_set test ---");
    println!("n = {N_KEYS}");

    // 1) Generate unique keys
    let t0 = Instant::now();
    let keys = gen_unique_keys(N_KEYS, GEN_SEED);
    let gen_s = t0.elapsed().as_secs_f64();
    println!(
        "gen:    {:>8.3} s   ({:.1} M keys/s)",
        gen_s,
        N_KEYS as f64 / gen_s / 1e6
    );

    // 2) Build
    let cfg = BuildConfig::default();
    let t1 = Instant::now();
    let set = Builder::new().with_config(cfg).build(&keys)?;
    let build_s = t1.elapsed().as_secs_f64();
    println!(
        "build:  {:>8.3} s   ({:.1} M keys/s)   (inner slots={}, {:.2} per key)",
        build_s,
        N_KEYS as f64 / build_s / 1e6,
        set.additional_memory(),
        set.additional_memory() as f64 / N_KEYS as f64
    );

    // 3) Look up every member
    let t2 = Instant::now();
    let mut hits = 0usize;
    for chunk in keys.chunks(32_768) {
        for &k in chunk {
            hits += set.contains(k) as usize;
        }
    }
    let lookup_s = t2.elapsed().as_secs_f64();
    println!(
        "lookup: {:>8.3} s   ({:.1} M lookups/s)   (hits={hits})",
        lookup_s,
        N_KEYS as f64 / lookup_s / 1e6
    );

    // 4) Look up random values, mostly misses
    let mut rng = StdRng::seed_from_u64(GEN_SEED + 1);
    let t3 = Instant::now();
    let mut false_hits = 0usize;
    for _ in 0..N_KEYS {
        false_hits += set.contains(rng.gen_range(i32::MIN..=i32::MAX)) as usize;
    }
    let miss_s = t3.elapsed().as_secs_f64();
    println!(
        "random: {:>8.3} s   ({:.1} M lookups/s)   (hits={false_hits})",
        miss_s,
        N_KEYS as f64 / miss_s / 1e6
    );

    println!("----------------------------------------------");
    println!(
        "Total (gen + build + lookup): {:.3} s",
        gen_s + build_s + lookup_s + miss_s
    );

    Ok(())
}

/// Generate N unique i32 keys, deterministically.
fn gen_unique_keys(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = HashSet::with_capacity(n * 2);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let k: i32 = rng.gen_range(i32::MIN..=i32::MAX);
        if set.insert(k) {
            keys.push(k);
        }
    }
    keys
}
