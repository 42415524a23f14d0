#![no_main]
use libfuzzer_sys::fuzz_target;
use zenqoi::*;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick width and worker count, the rest are RGBA samples
    let [w, workers, rest @ ..] = data else {
        return;
    };
    let width = (*w as usize % 32) + 1;
    let pixels: Vec<Pixel> = rest
        .chunks_exact(4)
        .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
        .collect();
    let height = pixels.len() / width;
    if height == 0 {
        return;
    }
    let Ok(grid) = PixelGrid::from_pixels(width, height, pixels) else {
        return;
    };

    let qoi = EncodeRequest::new(&grid)
        .with_workers(*workers as usize % 16)
        .with_predictor_seed(PredictorSeed::Continuous)
        .encode(enough::Unstoppable)
        .expect("non-empty grid must encode");

    let Ok((header, decoded)) = rapid_qoi::Qoi::decode_alloc(&qoi) else {
        panic!("encoder produced a stream the reference decoder rejects");
    };
    assert_eq!(header.width as usize, width);
    assert_eq!(header.height as usize, height);
    assert_eq!(decoded, grid.to_rgba_bytes(), "roundtrip pixel mismatch");
});
