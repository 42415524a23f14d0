#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // PAM ingestion must never panic, whatever the input
    let limits = zenqoi::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let _ = zenqoi::pam::ImageInfo::from_bytes(data);
    let Ok(grid) = zenqoi::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Anything that decodes must encode (or be rejected as empty)
    let _ = zenqoi::EncodeRequest::new(&grid)
        .with_workers(3)
        .encode(enough::Unstoppable);
});
