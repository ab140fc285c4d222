use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn linspace_matches_endpoints_and_counts() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(0.3, 7.0, 1), vec![0.3]);

    let v = linspace(0.01, 1.0, 15);
    assert_eq!(v.len(), 15);
    assert_eq!(v[0], 0.01);
    assert_eq!(v[14], 1.0);
    assert!(v.windows(2).all(|w| w[0] < w[1]));

    let down = linspace(1.2, 0.9, 4);
    assert_eq!(down[0], 1.2);
    assert_eq!(down[3], 0.9);
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_and_clears_transparent() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);

    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_restores_half_alpha_within_rounding() {
    let mut px = vec![200u8, 100, 50, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
    assert_eq!(px[3], 128);
}
