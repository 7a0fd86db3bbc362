use growvec::{growvec, GrowVec, GrowVecError, PushError};

#[test]
fn test_error_at_bounds() {
    let vec = growvec![1, 2, 3];

    for i in 0..vec.len() {
        assert_eq!(vec.at(i), Ok(&vec[i]));
    }
    assert_eq!(
        vec.at(vec.len()).unwrap_err(),
        GrowVecError::IndexOutOfBounds {
            index: 3,
            length: 3
        }
    );
    assert_eq!(
        vec.at(vec.len() + 1).unwrap_err(),
        GrowVecError::IndexOutOfBounds {
            index: 4,
            length: 3
        }
    );
}

#[test]
fn test_error_at_mut_writes_through() {
    let mut vec = growvec![1, 2, 3];

    *vec.at_mut(1).unwrap() = 20;
    assert_eq!(vec, [1, 20, 3]);

    let result = vec.at_mut(5);
    assert_eq!(
        result.unwrap_err(),
        GrowVecError::IndexOutOfBounds {
            index: 5,
            length: 3
        }
    );
}

#[test]
fn test_error_at_on_empty() {
    let vec: GrowVec<u8> = GrowVec::new();
    assert!(matches!(
        vec.at(0),
        Err(GrowVecError::IndexOutOfBounds {
            index: 0,
            length: 0
        })
    ));
}

#[test]
fn test_error_try_front_back() {
    let mut vec: GrowVec<i32> = GrowVec::new();
    assert_eq!(vec.try_front(), Err(GrowVecError::EmptyVector));
    assert_eq!(vec.try_back(), Err(GrowVecError::EmptyVector));

    vec.push(8);
    vec.push(9);
    assert_eq!(vec.try_front(), Ok(&8));
    assert_eq!(vec.try_back(), Ok(&9));
}

#[test]
fn test_error_reserve_overflow_leaves_vector() {
    let mut vec = growvec![1u64, 2, 3];
    let capacity = vec.capacity();
    let pointer = vec.as_ptr();

    let result = vec.try_reserve(usize::MAX / 2);
    assert_eq!(
        result.unwrap_err(),
        GrowVecError::CapacityOverflow {
            requested: usize::MAX / 2
        }
    );

    assert_eq!(vec, [1, 2, 3]);
    assert_eq!(vec.capacity(), capacity);
    assert_eq!(vec.as_ptr(), pointer);
}

#[test]
fn test_error_with_capacity_overflow() {
    let result = GrowVec::<u32>::try_with_capacity(usize::MAX);
    assert!(matches!(
        result,
        Err(GrowVecError::CapacityOverflow { .. })
    ));

    let result = GrowVec::<u32>::try_with_len(usize::MAX);
    assert!(result.is_err());
}

#[test]
fn test_error_range_capacity_overflow() {
    let mut vec = growvec![1u16];
    let result = vec.try_assign_fill(usize::MAX, 0);
    assert_eq!(
        result.unwrap_err(),
        GrowVecError::CapacityOverflow {
            requested: usize::MAX
        }
    );
    assert_eq!(vec, [1]);
}

#[test]
#[should_panic(expected = "Capacity overflow")]
fn test_error_reserve_overflow_panics() {
    let mut vec: GrowVec<u64> = GrowVec::new();
    vec.reserve(usize::MAX);
}

#[test]
fn test_error_try_push_succeeds() {
    let mut vec = GrowVec::new();
    assert!(vec.try_push(1).is_ok());
    assert!(vec.try_push(2).is_ok());
    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_push_error_returns_value() {
    let err = PushError {
        value: String::from("kept"),
        error: GrowVecError::CapacityOverflow { requested: 3 },
    };

    assert_eq!(
        err.to_string(),
        "Capacity overflow: 3 elements exceed the addressable limit"
    );
    let error: GrowVecError = err.clone().into();
    assert_eq!(error, GrowVecError::CapacityOverflow { requested: 3 });
    assert_eq!(err.into_value(), "kept");
}

#[test]
fn test_error_display_messages() {
    assert_eq!(
        GrowVecError::IndexOutOfBounds {
            index: 7,
            length: 2
        }
        .to_string(),
        "Index out of bounds: index 7 is beyond vector length 2"
    );
    assert_eq!(
        GrowVecError::EmptyVector.to_string(),
        "Operation on empty vector"
    );

    let layout = std::alloc::Layout::array::<u32>(4).unwrap();
    assert_eq!(
        GrowVecError::AllocationFailure { layout }.to_string(),
        "Allocation failure: could not allocate 16 bytes"
    );
}
