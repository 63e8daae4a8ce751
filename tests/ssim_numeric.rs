use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simscore::lowlevel::SsimStats;
use simscore::{rgb_to_gray, ssim_global, ssim_tiled, ssim_views, ImageView, SimScoreError};

fn random_samples(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random_range(0..=255)).collect()
}

#[test]
fn identical_constant_buffers_score_one() {
    let a = vec![128u8; 1000];
    let b = a.clone();
    let score = ssim_global(&a, &b).unwrap();
    assert!((score - 1.0).abs() < 1e-9);
}

#[test]
fn length_mismatch_is_reported() {
    let err = ssim_global(&[0u8; 10], &[0u8; 11]).unwrap_err();
    assert_eq!(err, SimScoreError::LengthMismatch { left: 10, right: 11 });
}

#[test]
fn all_zero_buffers_score_one() {
    let zeros = vec![0u8; 64];
    assert!((ssim_global(&zeros, &zeros).unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn identity_holds_for_random_buffers() {
    let mut rng = StdRng::seed_from_u64(11);
    for len in [1usize, 2, 17, 256, 4096] {
        let a = random_samples(&mut rng, len);
        let score = ssim_global(&a, &a).unwrap();
        assert!((score - 1.0).abs() < 1e-9, "len {len}: {score}");
    }
}

#[test]
fn score_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..20 {
        let a = random_samples(&mut rng, 500);
        let b = random_samples(&mut rng, 500);
        assert_eq!(ssim_global(&a, &b).unwrap(), ssim_global(&b, &a).unwrap());
    }
}

#[test]
fn noise_lowers_score_monotonically() {
    let mut rng = StdRng::seed_from_u64(13);
    let base: Vec<u8> = (0..1024).map(|i| ((i * 5) % 256) as u8).collect();
    let offsets: Vec<i32> = (0..1024).map(|_| rng.random_range(-1..=1)).collect();

    let mut last = ssim_global(&base, &base).unwrap();
    for amplitude in [4i32, 16, 48] {
        let noisy: Vec<u8> = base
            .iter()
            .zip(&offsets)
            .map(|(&v, &o)| (v as i32 + o * amplitude).clamp(0, 255) as u8)
            .collect();
        let score = ssim_global(&base, &noisy).unwrap();
        assert!(score < last, "amplitude {amplitude}: {score} >= {last}");
        last = score;
    }
}

#[test]
fn brightness_shift_only_affects_luminance_term() {
    let a: Vec<u8> = (0..200).map(|i| (i % 100) as u8).collect();
    let b: Vec<u8> = a.iter().map(|v| v + 50).collect();
    let stats = SsimStats::from_samples(&a, &b).unwrap();
    assert!((stats.var_x - stats.var_y).abs() < 1e-9);
    assert!((stats.cov_xy - stats.var_x).abs() < 1e-9);
    let score = stats.score();
    assert!(score < 1.0 && score > 0.5);
}

#[test]
fn grayscale_conversion_feeds_scorer() {
    let (width, height) = (8usize, 4usize);
    let rgb: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let v = (i * 7 % 256) as u8;
            [v, v / 2, 255 - v]
        })
        .collect();
    let gray_a = rgb_to_gray(&rgb, width, height).unwrap();
    let gray_b = rgb_to_gray(&rgb, width, height).unwrap();

    let global = ssim_global(gray_a.data(), gray_b.data()).unwrap();
    let views = ssim_views(gray_a.view(), gray_b.view()).unwrap();
    let tiled = ssim_tiled(gray_a.view(), gray_b.view(), 3).unwrap();
    assert!((global - 1.0).abs() < 1e-9);
    assert_eq!(global, views);
    assert!((tiled - 1.0).abs() < 1e-9);
}

#[test]
fn tiled_score_reacts_to_local_edit_more_than_global() {
    let (width, height) = (32usize, 32usize);
    let a: Vec<u8> = (0..width * height)
        .map(|i| (((i % width) * 3 + (i / width) * 5) % 200) as u8)
        .collect();
    let mut b = a.clone();
    for y in 0..8 {
        for x in 0..8 {
            b[y * width + x] = 255;
        }
    }
    let va = ImageView::from_slice(&a, width, height).unwrap();
    let vb = ImageView::from_slice(&b, width, height).unwrap();
    let tiled = ssim_tiled(va, vb, 8).unwrap();
    assert!(tiled < 1.0);
    assert!(ssim_views(va, vb).unwrap() < 1.0);
}
