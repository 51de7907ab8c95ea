//! End-to-end tests for the create_mask -> math -> apply_mask pipeline.

use approx::assert_relative_eq;
use pixmask::prelude::*;
use tracing_subscriber::EnvFilter;

/// Routes library logs to the test harness; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn dem() -> Image<i16> {
    // 4x3 elevation grid, -9999 marks missing samples.
    #[rustfmt::skip]
    let data = vec![
        100,   110, -9999, 130,
        -9999, 150,   160, 170,
        180,   190,   200, -9999,
    ];
    Image::from_data(4, 3, 1, data).unwrap()
}

#[test]
fn test_sentinel_zero_replaced_with_255() {
    init_tracing();
    let raw = Image::from_data(2, 2, 1, vec![10u8, 0, 0, 40]).unwrap();
    let masked = create_mask(&raw, 0);

    let mask_img = Image::from_view(&masked).unwrap();
    let validity: Vec<bool> = mask_img.data().iter().map(Masked::is_valid).collect();
    assert_eq!(validity, vec![true, false, false, true]);

    let out = Image::from_view(&apply_mask_with(&masked, 255)).unwrap();
    assert_eq!(out.data(), &[10, 255, 255, 40]);
}

#[test]
fn test_round_trip_without_sentinel_is_identity() {
    let raw = dem();
    let out = Image::from_view(&apply_mask(create_mask_unset(&raw))).unwrap();
    assert_eq!(out.data(), raw.data());
}

#[test]
fn test_round_trip_replaces_only_sentinels() {
    let raw = dem();
    let out = Image::from_view(&apply_mask_with(create_mask(&raw, -9999), 0)).unwrap();
    for (src, dst) in raw.data().iter().zip(out.data()) {
        if *src == -9999 {
            assert_eq!(*dst, 0);
        } else {
            assert_eq!(dst, src);
        }
    }
}

#[test]
fn test_masked_arithmetic_between_views() {
    let a = dem();
    let b = Image::filled(4, 3, 1, 5i16);
    let ma = Image::from_view(&create_mask(&a, -9999)).unwrap();
    let mb = Image::from_view(&create_mask_unset(&b)).unwrap();

    let sums: Vec<Masked<i16>> = ma.data().iter().zip(mb.data()).map(|(x, y)| *x + *y).collect();
    assert_eq!(sums[0].value(), 105);
    assert!(!sums[2].is_valid());
    assert!(!sums[4].is_valid());
    assert_eq!(sums[10].value(), 205);

    let valid = sums.iter().filter(|m| m.is_valid()).count();
    assert_eq!(valid, 9);
}

#[test]
fn test_mean_over_masked_rgb() {
    let pixels = vec![
        Rgb::new(0.2f32, 0.4, 0.6),
        Rgb::new(0.0, 0.0, 0.0),
        Rgb::new(0.9, 0.9, 0.9),
    ];
    let raw = Image::from_data(3, 1, 1, pixels).unwrap();
    let masked = create_mask(&raw, Rgb::new(0.0, 0.0, 0.0));

    let means: Vec<f64> = (0..3).map(|c| mean_channel_value(&masked.pixel(c, 0, 0))).collect();
    assert_relative_eq!(means[0], 0.4, epsilon = 1e-6);
    assert_eq!(means[1], 0.0);
    assert_relative_eq!(means[2], 0.9, epsilon = 1e-6);
    assert!(is_transparent(&masked.pixel(1, 0, 0)));
}

#[test]
fn test_multi_plane_rasterize_region() {
    init_tracing();
    let data: Vec<u8> = (0..24).map(|v| if v % 5 == 0 { 0 } else { v }).collect();
    let raw = Image::from_data(4, 3, 2, data).unwrap();
    let view = apply_mask_with(create_mask(&raw, 0), 99);

    let region = Rect::new(1, 1, 2, 2);
    let mut out: Image<u8> = Image::new(2, 2, 2);
    rasterize(&view, &mut out, region).unwrap();

    for plane in 0..2 {
        for row in 0..2 {
            for col in 0..2 {
                let src = raw.pixel(col + 1, row + 1, plane);
                let expected = if src == 0 { 99 } else { src };
                assert_eq!(out.pixel(col, row, plane), expected);
            }
        }
    }
}

#[test]
fn test_rasterize_rejects_mismatched_destination() {
    let raw = dem();
    let view = create_mask(&raw, -9999);
    let mut out: Image<Masked<i16>> = Image::new(3, 3, 1);
    let err = rasterize(&view, &mut out, Rect::new(0, 0, 2, 2)).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));

    let err = rasterize(&view, &mut out, Rect::new(2, 0, 3, 3)).unwrap_err();
    assert!(err.is_bounds_error());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_rasterize_matches_sequential() {
    init_tracing();
    let raw = dem();
    let view = apply_mask_with(create_mask(&raw, -9999), i16::MIN);
    let region = Rect::new(0, 1, 4, 2);

    let mut seq: Image<i16> = Image::new(4, 2, 1);
    let mut par: Image<i16> = Image::new(4, 2, 1);
    rasterize(&view, &mut seq, region).unwrap();
    rasterize_par(&view, &mut par, region).unwrap();
    assert_eq!(seq.data(), par.data());
    assert_eq!(seq.pixel(0, 0, 0), i16::MIN);
}

#[test]
fn test_accessor_walk_over_mask_view() {
    let raw = dem();
    let view = create_mask(&raw, -9999);
    let mut acc = view.origin();
    let mut row_valid = Vec::new();
    for _ in 0..4 {
        row_valid.push(acc.get().is_valid());
        acc.next_col();
    }
    assert_eq!(row_valid, vec![true, true, false, true]);

    acc.move_to(0, 0, 0);
    acc.next_row();
    assert!(!acc.get().is_valid());
    acc.advance(2, 1, 0);
    assert_eq!(acc.get().value(), 200);
}
