use growvec::{growvec, grown_capacity, GrowVec};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_push_growth_sequence() {
    init_tracing();
    let mut vec = GrowVec::new();
    let mut capacities = Vec::new();

    for i in 0..9 {
        vec.push(i);
        capacities.push(vec.capacity());
    }

    assert_eq!(capacities, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn test_amortized_reallocations() {
    init_tracing();
    let mut vec = GrowVec::new();
    let mut reallocations = 0;
    let mut last_capacity = vec.capacity();

    let pushes = 10_000;
    for i in 0..pushes {
        vec.push(i);
        if vec.capacity() != last_capacity {
            reallocations += 1;
            last_capacity = vec.capacity();
        }
    }

    // ceil(log2(10_000)) + 1 distinct capacities: 1, 2, 4, ..., 16384
    assert_eq!(reallocations, 15);
    assert!(vec.capacity() >= vec.len());
    assert_eq!(vec.capacity(), 16_384);
}

#[test]
fn test_growth_policy_matches_push() {
    let mut vec: GrowVec<u8> = GrowVec::new();
    for _ in 0..40 {
        let before = vec.capacity();
        let expected = if vec.len() == before {
            grown_capacity(before, before + 1)
        } else {
            before
        };
        vec.push(0);
        assert_eq!(vec.capacity(), expected);
    }
}

#[test]
fn test_reserve_exact_and_never_shrinks() {
    let mut vec = growvec![1, 2, 3];
    assert_eq!(vec.capacity(), 6);

    vec.reserve(4);
    assert_eq!(vec.capacity(), 6);

    vec.reserve(6);
    assert_eq!(vec.capacity(), 6);

    vec.reserve(11);
    assert_eq!(vec.capacity(), 11);
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn test_reserve_on_empty() {
    let mut vec: GrowVec<String> = GrowVec::new();
    vec.reserve(5);
    assert_eq!(vec.capacity(), 5);
    assert!(vec.is_empty());

    for word in ["a", "b", "c", "d", "e"] {
        vec.push(word.to_owned());
    }
    assert_eq!(vec.capacity(), 5);
}

#[test]
fn test_shrink_to_fit() {
    let mut vec = growvec![1, 2, 3];
    assert_eq!(vec.capacity(), 6);

    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 3);
    assert_eq!(vec, [1, 2, 3]);

    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 3);
}

#[test]
fn test_shrink_empty_releases_buffer() {
    let mut vec = growvec![1, 2];
    vec.pop();
    vec.pop();

    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 0);

    vec.push(1);
    assert_eq!(vec.capacity(), 1);
}

#[test]
fn test_try_reserve_and_shrink() {
    let mut vec = growvec![1u32];
    vec.try_reserve(64).unwrap();
    assert_eq!(vec.capacity(), 64);
    vec.try_shrink_to_fit().unwrap();
    assert_eq!(vec.capacity(), 1);
}

#[test]
fn test_max_size() {
    let bytes: GrowVec<u8> = GrowVec::new();
    let words: GrowVec<u64> = GrowVec::new();

    assert_eq!(bytes.max_size(), isize::MAX as usize);
    assert_eq!(words.max_size(), isize::MAX as usize / 8);
    assert!(words.max_size() < bytes.max_size());
}

#[test]
fn test_extend_reserves_from_size_hint() {
    let mut vec = growvec![0u8];
    assert_eq!(vec.capacity(), 2);

    vec.extend(std::iter::repeat(1).take(10));

    assert_eq!(vec.len(), 11);
    assert_eq!(vec.capacity(), 11);
}

#[test]
fn test_insert_growth_doubles() {
    let mut vec = growvec![1, 2];
    vec.shrink_to_fit();
    assert_eq!(vec.capacity(), 2);

    vec.insert(vec.begin(), 0);
    assert_eq!(vec.capacity(), 4);
    assert_eq!(vec, [0, 1, 2]);
}
