#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_pam";
    fs::create_dir_all(dir).unwrap();

    // PAM RGBA 1x1
    let pam = b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n\xff\x00\x00\xff";
    fs::write(format!("{dir}/pam_rgba_1x1.pam"), pam).unwrap();

    // PAM RGB 2x2 with a comment
    let pam = b"P7\n# seed\nWIDTH 2\nHEIGHT 2\nDEPTH 3\nMAXVAL 255\nTUPLTYPE RGB\nENDHDR\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/pam_rgb_2x2.pam"), pam).unwrap();

    // Empty image: parses, encoder rejects
    let pam = b"P7\nWIDTH 0\nHEIGHT 0\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n";
    fs::write(format!("{dir}/pam_empty.pam"), pam).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p7.bin"), b"P7").unwrap();
    fs::write(format!("{dir}/p7_no_endhdr.bin"), b"P7\nWIDTH 1\nHEIGHT 1\n").unwrap();
    fs::write(
        format!("{dir}/p7_gray.bin"),
        b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 1\nMAXVAL 255\nTUPLTYPE GRAYSCALE\nENDHDR\n\x80",
    )
    .unwrap();

    let dir = "fuzz/corpus/fuzz_encode";
    fs::create_dir_all(dir).unwrap();
    let mut solid = vec![7u8, 4];
    solid.extend(std::iter::repeat_n([10u8, 20, 30, 255], 64).flatten());
    fs::write(format!("{dir}/solid_8x8.bin"), solid).unwrap();

    println!("Generated seed corpora in fuzz/corpus/");
}
