use enough::Unstoppable;
use proptest::prelude::*;
use zenqoi::*;

/// Decode with the reference decoder, returning (width, height, RGBA bytes).
fn reference_decode(qoi: &[u8]) -> (u32, u32, Vec<u8>) {
    let (header, pixels) = rapid_qoi::Qoi::decode_alloc(qoi)
        .ok()
        .expect("reference decoder rejected the stream");
    (header.width, header.height, pixels)
}

fn encode(grid: &PixelGrid, workers: usize, seed: PredictorSeed) -> Vec<u8> {
    EncodeRequest::new(grid)
        .with_workers(workers)
        .with_predictor_seed(seed)
        .encode(Unstoppable)
        .unwrap()
}

fn hardware_threads() -> usize {
    std::thread::available_parallelism().map_or(4, |n| n.get())
}

fn worker_counts() -> Vec<usize> {
    let n = hardware_threads();
    vec![1, 2, 3, n, n + 5]
}

fn gradient_with_alpha(w: usize, h: usize) -> PixelGrid {
    let mut grid = PixelGrid::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let a = if (x / 5 + y / 3) % 4 == 0 { 128 } else { 255 };
            grid.set(x, y, Pixel::new((x * 3) as u8, (y * 2) as u8, (x ^ y) as u8, a));
        }
    }
    grid
}

#[test]
fn single_threaded_roundtrip() {
    let grid = gradient_with_alpha(37, 23);
    let qoi = encode(&grid, 1, PredictorSeed::Reset);
    let (w, h, pixels) = reference_decode(&qoi);
    assert_eq!((w, h), (37, 23));
    assert_eq!(pixels, grid.to_rgba_bytes());
}

#[test]
fn continuous_seed_matches_single_threaded_for_all_worker_counts() {
    let grid = gradient_with_alpha(41, 57);
    let single = reference_decode(&encode(&grid, 1, PredictorSeed::Reset)).2;
    for workers in worker_counts() {
        let multi = reference_decode(&encode(&grid, workers, PredictorSeed::Continuous)).2;
        assert_eq!(multi, single, "workers={workers}");
    }
}

#[test]
fn reset_seed_is_exact_when_rows_end_in_opaque_black() {
    // Every stripe boundary then sees the same previous pixel as a decoder.
    let mut grid = gradient_with_alpha(20, 31);
    for y in 0..31 {
        grid.set(19, y, Pixel::OPAQUE_BLACK);
    }
    for workers in worker_counts() {
        let (_, _, pixels) = reference_decode(&encode(&grid, workers, PredictorSeed::Reset));
        assert_eq!(pixels, grid.to_rgba_bytes(), "workers={workers}");
    }
}

#[test]
fn reset_seed_diverges_after_non_black_stripe_end() {
    // Row 0 ends in transparent gray; row 1 is opaque black. The second
    // stripe encodes row 1 as a run of its (reset) predictor, which a
    // decoder applies to the transparent gray it actually holds.
    let mut grid = PixelGrid::new(1, 2);
    grid.set(0, 0, Pixel::new(100, 100, 100, 0));
    grid.set(0, 1, Pixel::OPAQUE_BLACK);

    let (_, _, single) = reference_decode(&encode(&grid, 1, PredictorSeed::Reset));
    assert_eq!(single, grid.to_rgba_bytes());

    let (_, _, reset) = reference_decode(&encode(&grid, 2, PredictorSeed::Reset));
    assert_eq!(&reset[4..], &[100, 100, 100, 0]);

    let (_, _, continuous) = reference_decode(&encode(&grid, 2, PredictorSeed::Continuous));
    assert_eq!(continuous, grid.to_rgba_bytes());
}

#[test]
fn header_roundtrip() {
    for (w, h) in [(1, 1), (3, 200), (300, 2), (65, 65)] {
        let grid = gradient_with_alpha(w, h);
        for workers in worker_counts() {
            let qoi = encode(&grid, workers, PredictorSeed::Reset);
            assert_eq!(&qoi[..4], b"qoif");
            assert_eq!(u32::from_be_bytes(qoi[4..8].try_into().unwrap()), w as u32);
            assert_eq!(u32::from_be_bytes(qoi[8..12].try_into().unwrap()), h as u32);
            assert_eq!(qoi[12], 4);
            assert_eq!(qoi[13], 0);
            // exactly one header
            assert_eq!(qoi.windows(4).filter(|win| *win == b"qoif").count(), 1);
        }
    }
}

#[test]
fn end_marker_regardless_of_stripe_count() {
    let grid = gradient_with_alpha(9, 17);
    for workers in [1, 2, 3, 4, 8, 16, 17, 18, 100] {
        let qoi = encode(&grid, workers, PredictorSeed::Reset);
        assert_eq!(&qoi[qoi.len() - 8..], &[0, 0, 0, 0, 0, 0, 0, 1], "workers={workers}");
    }
}

#[test]
fn solid_color_is_one_literal_then_runs() {
    let px = Pixel::rgb(200, 100, 50);
    for (w, h) in [(1, 1), (62, 1), (8, 8), (63, 2), (100, 100)] {
        let grid = PixelGrid::from_pixels(w, h, vec![px; w * h]).unwrap();
        let qoi = encode(&grid, 1, PredictorSeed::Reset);
        let body = &qoi[14..qoi.len() - 8];
        assert_eq!(&body[..4], &[0xFE, 200, 100, 50]);
        let runs = &body[4..];
        assert!(runs.iter().all(|&op| (0xC0..=0xFD).contains(&op)), "{w}x{h}");
        let covered: usize = runs.iter().map(|&op| (op & 0x3F) as usize + 1).sum();
        assert_eq!(covered, w * h - 1, "{w}x{h}");
        assert_eq!(reference_decode(&qoi).2, grid.to_rgba_bytes());
    }
}

#[test]
fn cache_hit_on_final_stripe_precedes_end_marker() {
    let a = Pixel::rgb(50, 60, 70);
    let b = Pixel::rgb(200, 10, 10);
    let grid = PixelGrid::from_pixels(3, 1, vec![a, b, a]).unwrap();
    let qoi = encode(&grid, 1, PredictorSeed::Reset);
    let tail = &qoi[qoi.len() - 9..];
    assert_eq!(tail, &[a.hash_index() as u8, 0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn pam_to_qoi() {
    let source = gradient_with_alpha(16, 12);
    for tuple_type in [pam::TupleType::RgbAlpha, pam::TupleType::Rgb] {
        let data = pam::encode(&source, tuple_type);
        let info = pam::ImageInfo::from_bytes(&data).unwrap();
        assert_eq!((info.width, info.height), (16, 12));
        assert_eq!(info.tuple_type, tuple_type);

        let grid = DecodeRequest::new(&data).decode(Unstoppable).unwrap();
        let qoi = encode(&grid, 3, PredictorSeed::Continuous);
        let (_, _, pixels) = reference_decode(&qoi);
        assert_eq!(pixels, grid.to_rgba_bytes());
        if tuple_type == pam::TupleType::Rgb {
            assert!(pixels.chunks_exact(4).all(|p| p[3] == 255));
        }
    }
}

#[test]
fn empty_pam_is_rejected_by_encoder() {
    let data = b"P7\nWIDTH 0\nHEIGHT 0\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n";
    let grid = DecodeRequest::new(data).decode(Unstoppable).unwrap();
    let err = EncodeRequest::new(&grid)
        .with_workers(4)
        .encode(Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invocation);
    match err {
        QoiError::EmptyImage { width: 0, height: 0 } => {}
        other => panic!("expected EmptyImage, got {other:?}"),
    }
}

fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
    // Small palette so runs, cache hits and diffs all occur.
    let palette = [
        Pixel::OPAQUE_BLACK,
        Pixel::TRANSPARENT_BLACK,
        Pixel::rgb(1, 1, 1),
        Pixel::rgb(12, 14, 10),
        Pixel::new(250, 3, 128, 255),
        Pixel::new(250, 3, 128, 7),
    ];
    (1usize..=24, 1usize..=24).prop_flat_map(move |(w, h)| {
        prop::collection::vec(0usize..palette.len(), w * h).prop_map(move |idx| {
            let pixels = idx.into_iter().map(|i| palette[i]).collect();
            PixelGrid::from_pixels(w, h, pixels).unwrap()
        })
    })
}

proptest! {
    /// Property: continuous-seeded stripes decode to the source pixels.
    #[test]
    fn prop_striped_decode_matches_source(grid in grid_strategy(), workers in 0usize..=30) {
        let qoi = encode(&grid, workers, PredictorSeed::Continuous);
        let (w, h, pixels) = reference_decode(&qoi);
        prop_assert_eq!((w as usize, h as usize), (grid.width(), grid.height()));
        prop_assert_eq!(pixels, grid.to_rgba_bytes());
    }

    /// Property: the reset predictor never changes single-stripe output.
    #[test]
    fn prop_single_stripe_is_seed_independent(grid in grid_strategy()) {
        prop_assert_eq!(
            encode(&grid, 1, PredictorSeed::Reset),
            encode(&grid, 1, PredictorSeed::Continuous)
        );
    }
}
