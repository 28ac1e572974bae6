mod common;

use approx::assert_relative_eq;
use common::synthetic_image::{constant, indices, ramp, wavy};
use higher_order_gradient::image::{NdImage, NdImageView, Region};
use higher_order_gradient::{
    compute_region, required_input_region, BoundaryPolicy, GradientConfig, GradientError,
    GradientFilter,
};
use nalgebra::DMatrix;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn ramp_gradient_is_exact_in_interior_and_zero_on_flat_axes() {
    init_logger();
    let shape = [9usize, 12, 7];
    let slope = 3.0f32;
    let img = ramp(&shape, 1, slope);
    for a in 1..=4 {
        let grad = GradientFilter::new(GradientConfig::new(a))
            .compute(&img)
            .unwrap();
        for idx in indices(&shape) {
            let g = grad.vector(&idx);
            assert_eq!(g[0], 0.0, "a={a} idx={idx:?} g={g:?}");
            assert_eq!(g[2], 0.0, "a={a} idx={idx:?} g={g:?}");
            if idx[1] >= a && idx[1] + a < shape[1] {
                assert_relative_eq!(g[1], slope, max_relative = 1e-5);
            }
        }
    }
}

#[test]
fn constant_image_has_zero_gradient_everywhere() {
    let shape = [6usize, 5, 4];
    let img = constant(&shape, 0.731);
    for a in 1..=5 {
        for boundary in [BoundaryPolicy::Replicate, BoundaryPolicy::Periodic] {
            let config = GradientConfig::new(a).with_boundary(boundary);
            let grad = GradientFilter::new(config).compute(&img).unwrap();
            assert!(
                grad.data().iter().all(|&v| v == 0.0),
                "a={a} boundary={boundary} produced a non-zero gradient"
            );
        }
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let img = wavy(&[17, 13, 5]).with_spacing(&[0.4, 1.1, 2.5]).unwrap();
    let filter = GradientFilter::new(GradientConfig::new(3)).with_pieces(4);
    let first = filter.compute(&img).unwrap();
    let second = filter.compute(&img).unwrap();
    assert_eq!(first.data(), second.data());
}

#[test]
fn spacing_divides_each_component() {
    let spacing = [0.5, 2.0, 1.25];
    let img = wavy(&[10, 9, 8]);
    let scaled_img = img.clone().with_spacing(&spacing).unwrap();
    let config = GradientConfig::new(2);
    let unscaled = GradientFilter::new(config.with_image_spacing(false))
        .compute(&scaled_img)
        .unwrap();
    let scaled = GradientFilter::new(config).compute(&scaled_img).unwrap();
    let unit = GradientFilter::new(config).compute(&img).unwrap();
    assert_eq!(unscaled.data(), unit.data());
    for idx in indices(img.shape()) {
        let u = unscaled.vector(&idx);
        let s = scaled.vector(&idx);
        for axis in 0..3 {
            assert_relative_eq!(
                s[axis],
                u[axis] / spacing[axis] as f32,
                epsilon = 1e-6,
                max_relative = 1e-5
            );
        }
    }
}

#[test]
fn disjoint_regions_compose_to_single_pass() {
    let img = wavy(&[11, 14]);
    let config = GradientConfig::new(3);
    let whole = GradientFilter::new(config).with_pieces(1).compute(&img).unwrap();
    let split = GradientFilter::new(config).with_pieces(5).compute(&img).unwrap();
    assert_eq!(whole.data(), split.data());

    let left = Region::new(vec![0, 0], vec![4, 14]).unwrap();
    let right = Region::new(vec![4, 0], vec![7, 14]).unwrap();
    let manual = GradientFilter::new(config)
        .compute_regions(&img, &[left, right])
        .unwrap();
    assert_eq!(whole.data(), manual.data());
}

#[test]
fn region_result_matches_full_image() {
    let img = wavy(&[12, 10]);
    let config = GradientConfig::new(2);
    let whole = GradientFilter::new(config).compute(&img).unwrap();
    let region = Region::new(vec![0, 3], vec![5, 4]).unwrap();
    let part = compute_region(&img, &region, &config).unwrap();
    for y in 3..7isize {
        for x in 0..5isize {
            let expected = whole.vector(&[x as usize, y as usize]);
            assert_eq!(part.vector(&[x, y]).unwrap(), expected);
        }
    }
}

#[test]
fn overlapping_regions_are_rejected() {
    let img = wavy(&[8, 8]);
    let a = Region::new(vec![0, 0], vec![5, 8]).unwrap();
    let b = Region::new(vec![4, 0], vec![4, 8]).unwrap();
    let err = GradientFilter::default()
        .compute_regions(&img, &[a, b])
        .unwrap_err();
    assert!(matches!(err, GradientError::OverlappingRegions { .. }));
}

#[test]
fn zero_spacing_fails_before_any_output() {
    let img = wavy(&[6, 6, 6]).with_spacing(&[1.0, 1.0, 0.0]).unwrap();
    let config = GradientConfig::new(2);
    let err = compute_region(&img, &img.largest_region(), &config).unwrap_err();
    assert_eq!(
        err,
        GradientError::InvalidSpacing {
            axis: 2,
            spacing: 0.0,
            accuracy_order: 2
        }
    );
    assert!(GradientFilter::new(config).with_pieces(3).compute(&img).is_err());
    assert!(GradientFilter::new(config.with_image_spacing(false))
        .compute(&img)
        .is_ok());
}

#[test]
fn invalid_accuracy_order_aborts_the_run() {
    let img = wavy(&[6, 6]);
    let err = GradientFilter::new(GradientConfig::new(0))
        .compute(&img)
        .unwrap_err();
    assert!(matches!(
        err,
        GradientError::InvalidKernelParameters { accuracy_order: 0, .. }
    ));
}

#[test]
fn direction_rotates_into_physical_space() {
    let rot = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]);
    let img = ramp(&[10, 10], 0, 2.0).with_direction(rot).unwrap();
    let config = GradientConfig::new(2);
    let physical = GradientFilter::new(config).compute(&img).unwrap();
    let local = GradientFilter::new(config.with_image_direction(false))
        .compute(&img)
        .unwrap();
    let idx = [5usize, 5];
    assert_relative_eq!(local.vector(&idx)[0], 2.0, max_relative = 1e-6);
    assert_eq!(local.vector(&idx)[1], 0.0);
    assert_eq!(physical.vector(&idx)[0], 0.0);
    assert_relative_eq!(physical.vector(&idx)[1], 2.0, max_relative = 1e-6);
}

#[test]
fn vector_pixels_get_one_gradient_per_component() {
    let shape = [8usize, 9];
    let mut img = NdImage::with_components(&shape, 2);
    for idx in indices(&shape) {
        img.set_component(&idx, 0, idx[0] as f32);
        img.set_component(&idx, 1, -2.0 * idx[1] as f32);
    }
    let grad = GradientFilter::new(GradientConfig::new(1)).compute(&img).unwrap();
    assert_eq!(grad.values_per_pixel(), 4);
    let g = grad.vector(&[4, 4]);
    assert_relative_eq!(g[0], 1.0, max_relative = 1e-6);
    assert_eq!(g[1], 0.0);
    assert_eq!(g[2], 0.0);
    assert_relative_eq!(g[3], -2.0, max_relative = 1e-6);
}

#[test]
fn direction_rotates_each_component_separately() {
    let shape = [8usize, 8];
    let rot = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]);
    let mut img = NdImage::with_components(&shape, 2);
    for idx in indices(&shape) {
        img.set_component(&idx, 0, idx[0] as f32);
        img.set_component(&idx, 1, 3.0 * idx[1] as f32);
    }
    let img = img.with_direction(rot).unwrap();
    let grad = GradientFilter::new(GradientConfig::new(2)).compute(&img).unwrap();
    let g = grad.vector(&[4, 4]);
    // comp0 local (1, 0) -> (0, 1); comp1 local (0, 3) -> (-3, 0).
    assert_eq!(g[0], 0.0);
    assert_relative_eq!(g[1], 1.0, max_relative = 1e-6);
    assert_relative_eq!(g[2], -3.0, max_relative = 1e-6);
    assert_eq!(g[3], 0.0);
}

#[test]
fn region_dimension_is_checked_before_planning() {
    let img = wavy(&[8, 8]);
    let line = Region::new(vec![0], vec![4]).unwrap();
    let err = GradientFilter::default()
        .compute_regions(&img, &[line])
        .unwrap_err();
    assert_eq!(
        err,
        GradientError::DimensionMismatch {
            what: "output region",
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn filter_keeps_config_and_clamps_pieces() {
    let config = GradientConfig::new(3).with_boundary(BoundaryPolicy::Periodic);
    let filter = GradientFilter::new(config).with_pieces(0);
    assert_eq!(filter.pieces(), 1);
    assert_eq!(filter.config(), &config);
    assert_eq!(filter.required_padding().unwrap(), 3);
}

#[test]
fn constant_boundary_policy_pads_with_value() {
    let img = constant(&[5], 1.0);
    let config = GradientConfig::new(1).with_boundary(BoundaryPolicy::Constant(0.0));
    let grad = GradientFilter::new(config).compute(&img).unwrap();
    assert_eq!(grad.vector(&[0]), &[0.5]);
    assert_eq!(grad.vector(&[2]), &[0.0]);
    assert_eq!(grad.vector(&[4]), &[-0.5]);
}

#[test]
fn periodic_boundary_follows_the_wrapped_signal() {
    let n = 32usize;
    let w = 2.0 * std::f64::consts::PI / n as f64;
    let img = NdImage::from_fn(&[n], |i| (w * i[0] as f64).sin() as f32);
    let config = GradientConfig::new(3).with_boundary(BoundaryPolicy::Periodic);
    let grad = GradientFilter::new(config).compute(&img).unwrap();
    for x in [0usize, 1, n - 1] {
        let expected = (w * (w * x as f64).cos()) as f32;
        assert_relative_eq!(grad.vector(&[x])[0], expected, epsilon = 1e-4);
    }
}

#[test]
fn error_policy_only_fails_when_the_boundary_is_reached() {
    let img = wavy(&[10, 10]);
    let config = GradientConfig::new(2).with_boundary(BoundaryPolicy::Error);
    let inner = Region::new(vec![2, 2], vec![6, 6]).unwrap();
    assert!(compute_region(&img, &inner, &config).is_ok());
    let err = GradientFilter::new(config).compute(&img).unwrap_err();
    assert!(matches!(err, GradientError::BoundaryViolation { .. }));
}

#[test]
fn input_region_is_padded_and_cropped() {
    let largest = Region::from_shape(&[10, 10]);
    let config = GradientConfig::new(2);
    let out = Region::new(vec![1, 4], vec![3, 2]).unwrap();
    let input = required_input_region(&config, &out, &largest).unwrap();
    assert_eq!(input, Region::new(vec![0, 2], vec![6, 6]).unwrap());

    let outside = Region::new(vec![20, 20], vec![2, 2]).unwrap();
    let err = required_input_region(&config, &outside, &largest).unwrap_err();
    match err {
        GradientError::InsufficientRegion { requested, largest: l } => {
            assert_eq!(requested, outside.pad_by_radius(2));
            assert_eq!(l, largest);
        }
        other => panic!("unexpected error {other:?}"),
    }
}
