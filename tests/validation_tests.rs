//! Validation routines over complete attribute sets.

use accessor_codec::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_sanitize_unorm8_weights() {
    init_tracing();
    let mut weights = MemoryAccessor::from_components(ElementDimensions::Vec4, true, &[60u8, 60, 60, 60]).unwrap();
    assert!(verify_weights_sum(&weights).is_err());

    assert!(sanitize_weights_sum(&mut weights).unwrap());
    assert_eq!(weights.data(), &vec![75, 60, 60, 60]);
    verify_weights_sum(&weights).unwrap();

    // second pass is a no-op
    assert!(!sanitize_weights_sum(&mut weights).unwrap());
    assert_eq!(weights.data(), &vec![75, 60, 60, 60]);
}

#[test]
fn test_sanitize_float_idempotent() {
    let mut weights = MemoryAccessor::from_components(
        ElementDimensions::Vec4,
        false,
        &[0.1f32, 0.2, 0.3, 0.1, 0.9, 0.9, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0],
    )
    .unwrap();
    assert!(sanitize_weights_sum(&mut weights).unwrap());

    let view = weights.as_vector4_array().unwrap();
    for w in view.iter() {
        let non_zero = w.to_array().iter().filter(|&&x| x > 0.0).count() as f32;
        assert!((w.element_sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE * non_zero);
    }
    let once = weights.data().clone();

    assert!(!sanitize_weights_sum(&mut weights).unwrap());
    assert_eq!(weights.data(), &once);
}

#[test]
fn test_sanitize_two_sets() {
    init_tracing();
    let mut w0 = MemoryAccessor::from_components(ElementDimensions::Vec4, true, &[10000u16, 10000, 10000, 10000]).unwrap();
    let mut w1 = MemoryAccessor::from_components(ElementDimensions::Vec4, true, &[10000u16, 10000, 0, 0]).unwrap();

    assert!(sanitize_weights_sum_pair(&mut w0, &mut w1).unwrap());
    verify_weights_sum_pair(&w0, &w1).unwrap();

    let first = w0.as_index_array();
    assert!(first.is_err(), "weights are not an index layout");
    let raw = w0.numeric().unwrap();
    assert!((raw.get(0, 0) - 15535.0 / 65535.0).abs() < 1e-6);
}

#[test]
fn test_bounds_from_positions() {
    let positions = MemoryAccessor::from_components(
        ElementDimensions::Vec3,
        false,
        &[-1.0f32, 0.0, 2.0, 3.0, -4.0, 0.5, 0.0, 1.0, -0.5],
    )
    .unwrap();

    let bounds = compute_bounds(&positions).unwrap().unwrap();
    assert_eq!(bounds.min.as_slice(), &[-1.0, -4.0, -0.5]);
    assert_eq!(bounds.max.as_slice(), &[3.0, 1.0, 2.0]);
    verify_bounds(&positions, &bounds.min, &bounds.max).unwrap();

    match verify_bounds(&positions, &[-1.0, -4.0, 0.0], &bounds.max) {
        Err(Error::OutOfBounds { index, axis, value, .. }) => {
            assert_eq!((index, axis, value), (2, 2, -0.5));
        }
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

#[test]
fn test_index_restart_regardless_of_vertex_count() {
    for vertex_count in [0, 3, u32::MAX] {
        let indices = MemoryAccessor::from_components(ElementDimensions::Scalar, false, &[0xFFFFu16, 0, 1]).unwrap();
        assert!(matches!(
            verify_vertex_indices(&indices, vertex_count),
            Err(Error::RestartValueUsed { position: 0, encoding: ComponentEncoding::Uint16 })
        ));
    }
}

#[test]
fn test_index_range() {
    let indices = MemoryAccessor::from_components(ElementDimensions::Scalar, false, &[0u32, 1, 2, 2, 3, 0]).unwrap();
    verify_vertex_indices(&indices, 4).unwrap();
    assert_eq!(
        verify_vertex_indices(&indices, 3),
        Err(Error::IndexOutOfRange { position: 4, index: 3, vertex_count: 3 })
    );
}

#[test]
fn test_overlap_ranges() {
    let buf = vec![0u8; 128];
    let region = |offset: usize, len: usize| {
        MemoryAccessor::new(LayoutDescriptor::new(offset, len / 16, 0, AttributeFormat::VEC4F), &buf[..])
    };

    assert_eq!(region(0, 64).byte_range(), 0..64);
    assert!(have_overlapping_buffers(&region(0, 64), &region(32, 64)));
    assert!(!have_overlapping_buffers(&region(0, 32), &region(32, 32)));

    assert!(!any_overlapping_buffers(&[region(0, 32), region(32, 32), region(64, 64)]));
    assert!(any_overlapping_buffers(&[region(0, 32), region(64, 32), region(48, 32)]));
}

#[test]
fn test_sliced_accessors_over_one_buffer() {
    let acc = MemoryAccessor::from_components(ElementDimensions::Scalar, false, &[0.0f32; 16]).unwrap();
    let head = acc.slice(0, 8);
    let tail = acc.slice(8, 8);
    let middle = acc.slice(4, 8);

    assert!(!have_overlapping_buffers(&head, &tail));
    assert!(have_overlapping_buffers(&head, &middle));
    assert!(have_overlapping_buffers(&middle, &tail));
}
