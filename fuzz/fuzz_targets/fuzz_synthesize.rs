#![no_main]

use libfuzzer_sys::fuzz_target;

use trafficdeck_core::{synthesize, CurveOptions};

fuzz_target!(|data: &[u8]| {
    // Each 8-byte chunk is one series value, capped at 256 points for speed
    let series: Vec<f64> = data
        .chunks_exact(8)
        .take(256)
        .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect();

    let Ok(curve) = synthesize(&series, &CurveOptions::default()) else {
        return;
    };

    assert_eq!(curve.points.len(), series.len());
    assert!(curve.reveal_delays.windows(2).all(|w| w[0] < w[1]));
    for point in &curve.points {
        // Should not panic
        let _ = curve.sample(point.x);
    }
    let _ = curve.path_data();
});
