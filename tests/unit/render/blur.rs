use super::*;

fn alpha(row: &[u8]) -> Vec<u8> {
    row.chunks_exact(4).map(|px| px[3]).collect()
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(GaussianKernel::from_shadow_blur(30.0).unwrap().radius(), 45);
    assert_eq!(GaussianKernel::from_shadow_blur(15.0).unwrap().radius(), 23);
}

#[test]
fn weights_sum_to_one() {
    for blur in [1.0, 7.0, 15.0, 30.0] {
        let k = GaussianKernel::from_shadow_blur(blur).unwrap();
        let sum: u32 = k.weights.iter().sum();
        assert_eq!(sum, 65536, "blur {blur}");
    }
}

#[test]
fn output_widens_by_the_radius_on_both_sides() {
    let k = GaussianKernel::from_shadow_blur(4.0).unwrap();
    let out = k.spread_row(&[255u8; 12]).unwrap();
    assert_eq!(out.len(), (3 + 2 * k.radius()) * 4);
}

#[test]
fn single_pixel_spreads_symmetrically_and_keeps_its_energy() {
    let k = GaussianKernel::from_shadow_blur(6.0).unwrap();
    let out = alpha(&k.spread_row(&[200, 200, 200, 200]).unwrap());
    let r = k.radius();
    assert_eq!(out.len(), 2 * r + 1);
    for i in 1..=r {
        assert_eq!(out[r - i], out[r + i]);
    }
    assert!(out[r] < 200 && out[r] > out[r + 1]);
    let sum: i32 = out.iter().map(|&a| i32::from(a)).sum();
    assert!((sum - 200).abs() <= 10, "sum {sum}");
}

#[test]
fn interior_of_a_long_constant_row_is_unchanged() {
    let k = GaussianKernel::from_shadow_blur(4.0).unwrap();
    let px = [10u8, 20, 30, 40];
    let out = k.spread_row(&px.repeat(40)).unwrap();
    let r = k.radius();
    // Input pixel 20 sits at output 20 + r, far from both edges.
    let mid = (20 + r) * 4;
    assert_eq!(&out[mid..mid + 4], &px);
}

#[test]
fn bad_input_is_rejected() {
    assert!(GaussianKernel::from_shadow_blur(0.0).is_err());
    assert!(GaussianKernel::from_shadow_blur(f32::NAN).is_err());
    let k = GaussianKernel::from_shadow_blur(2.0).unwrap();
    assert!(k.spread_row(&[0u8; 7]).is_err());
}
