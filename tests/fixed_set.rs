use fks_fixed_set::{BuildConfig, Builder, FixedSet, FixedSetError, MEMORY_FACTOR, Slot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

fn unique_keys(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(n);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let k: i32 = rng.gen_range(i32::MIN..=i32::MAX);
        if seen.insert(k) {
            keys.push(k);
        }
    }
    keys
}

#[test]
fn test_small_scenario() -> Result<(), FixedSetError> {
    init_logger();
    let set = Builder::new().with_seed(2024).build([1, 2, 3, 4, 5])?;
    assert_eq!(set.len(), 5);
    assert!(set.contains(3));
    assert!(!set.contains(100));
    assert!(!set.contains(-5));
    for v in 1..=5 {
        assert!(set.contains(v));
    }
    Ok(())
}

#[test]
fn test_empty_set() -> Result<(), FixedSetError> {
    let set = FixedSet::build(Vec::<i32>::new())?;
    assert!(set.is_empty());
    assert_eq!(set.additional_memory(), 0);
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert!(!set.contains(v));
    }
    assert!(!FixedSet::default().contains(0));
    Ok(())
}

#[test]
fn test_single_element() -> Result<(), FixedSetError> {
    let set = FixedSet::build([42])?;
    assert_eq!(set.tables().len(), 1);
    assert_eq!(set.tables()[0].len(), 1);
    assert_eq!(set.additional_memory(), 1);
    assert!(set.contains(42));
    assert!(!set.contains(0));
    Ok(())
}

#[test]
fn test_int32_boundaries() -> Result<(), FixedSetError> {
    let keys = [2_000_000_000, -2_000_000_000, i32::MAX, i32::MIN, -1, 0];
    let set = FixedSet::build(keys)?;
    for k in keys {
        assert!(set.contains(k), "missing {k}");
    }
    for v in [1_999_999_999, -1_999_999_999, i32::MAX - 1, i32::MIN + 1, 1] {
        assert!(!set.contains(v), "false positive {v}");
    }
    Ok(())
}

#[test]
fn test_small_keys_sharing_residues() -> Result<(), FixedSetError> {
    init_logger();
    let strided: Vec<i32> = (0..64).map(|i| i * 1024).collect();
    for keys in [vec![0, 4], vec![0, 16, 32, 48], strided] {
        for seed in 0..8 {
            let set = Builder::new().with_seed(seed).build(&keys)?;
            for &k in &keys {
                assert!(set.contains(k), "missing {k} (seed {seed})");
            }
            for v in [1, 2, 3, 5, 1023, 1025] {
                assert_eq!(set.contains(v), keys.contains(&v));
            }
        }
    }
    Ok(())
}

#[test]
fn test_membership_random_sets() -> Result<(), FixedSetError> {
    init_logger();
    let mut probe = StdRng::seed_from_u64(0xfeed);
    for (n, seed) in [(2, 1), (17, 2), (1_000, 3), (100_000, 4)] {
        let keys = unique_keys(n, seed);
        let set = FixedSet::build(&keys)?;
        assert_eq!(set.len(), n);
        for &k in &keys {
            assert!(set.contains(k));
        }
        let members: HashSet<i32> = keys.iter().copied().collect();
        for _ in 0..10_000 {
            let v: i32 = probe.gen_range(i32::MIN..=i32::MAX);
            assert_eq!(set.contains(v), members.contains(&v));
        }
        // Neighbours of members are the likeliest false positives.
        for &k in keys.iter().take(1_000) {
            for v in [k.wrapping_add(1), k.wrapping_sub(1)] {
                assert_eq!(set.contains(v), members.contains(&v));
            }
        }
        assert!(set.additional_memory() as u64 <= MEMORY_FACTOR * n as u64);
    }
    Ok(())
}

#[test]
fn test_dense_range() -> Result<(), FixedSetError> {
    let set = FixedSet::build(-5_000..5_000)?;
    for v in -6_000..6_000 {
        assert_eq!(set.contains(v), (-5_000..5_000).contains(&v));
    }
    Ok(())
}

#[test]
fn test_deterministic_per_seed() -> Result<(), FixedSetError> {
    let keys = unique_keys(5_000, 77);
    let cfg = BuildConfig { seed: 9 };
    let a = Builder::new().with_config(cfg.clone()).build(&keys)?;
    let b = Builder::new().with_config(cfg).build(&keys)?;
    assert_eq!(a, b);
    assert_eq!(a.outer_hash(), b.outer_hash());

    let mut rng = StdRng::seed_from_u64(9);
    let c = Builder::new().build_with_rng(&keys, &mut rng)?;
    assert_eq!(a, c);
    Ok(())
}

#[test]
fn test_inner_tables_collision_free() -> Result<(), FixedSetError> {
    let keys = unique_keys(10_000, 5);
    let set = FixedSet::build(&keys)?;
    let mut stored = HashSet::new();
    for table in set.tables() {
        let occupied: Vec<i32> = table
            .slots()
            .iter()
            .filter_map(|s| match *s {
                Slot::Occupied(k) => Some(k),
                Slot::Empty => None,
            })
            .collect();
        let k = occupied.len();
        assert_eq!(table.len(), k * k);
        for key in occupied {
            assert!(stored.insert(key));
            assert_eq!(table.slots()[table.hash().bucket(key, table.len())], Slot::Occupied(key));
        }
    }
    assert_eq!(stored.len(), keys.len());
    let all: HashSet<i32> = set.keys().collect();
    assert_eq!(all, keys.iter().copied().collect());
    Ok(())
}

#[test]
fn test_duplicate_keys_rejected() {
    let err = FixedSet::build([4, 8, 15, 16, 23, 42, 15]).unwrap_err();
    assert!(matches!(err, FixedSetError::DuplicateKey(15)));
    assert_eq!(err.to_string(), "duplicate key 15 detected during build");
}

#[test]
fn test_rebuild_from_scratch() -> Result<(), FixedSetError> {
    let mut rng = StdRng::seed_from_u64(1);
    let mut set = FixedSet::default();
    set.initialize(0..100, &mut rng)?;
    assert!(set.contains(50));
    set.initialize(1_000..1_010, &mut rng)?;
    assert_eq!(set.len(), 10);
    assert!(!set.contains(50));
    assert!(set.contains(1_005));
    Ok(())
}

#[test]
fn test_shared_across_threads() -> Result<(), FixedSetError> {
    let keys = unique_keys(1_000, 12);
    let set = FixedSet::build(&keys)?;
    std::thread::scope(|s| {
        for chunk in keys.chunks(250) {
            let set = &set;
            s.spawn(move || {
                for &k in chunk {
                    assert!(set.contains(k));
                }
            });
        }
    });
    Ok(())
}
