//! Integration tests for xdrcal crates.
//!
//! End-to-end runs through config, session, render and PNG output, checking
//! the interaction between the numeric crates and the session layer.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    use xdr_cal::{CalConfig, CalError, Session, StaticDisplay};
    use xdr_core::{FrameEncoding, LinearImage};
    use xdr_io::{encode_frame, write_frame, Decoder, PngDecoder, SourceTransfer};
    use xdr_pattern::Pattern;
    use xdr_transfer::Eotf;

    fn config_file(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp config");
        file.write_all(yaml.as_bytes()).expect("write config");
        file
    }

    fn session_from(config: &CalConfig, decoder: PngDecoder) -> Session<PngDecoder, StaticDisplay> {
        Session::new(config, StaticDisplay::new(config.display), decoder)
    }

    /// 16-bit PQ still at a constant scRGB level.
    fn pq_still(width: u32, height: u32, level: f32) -> Vec<u8> {
        let frame = LinearImage::filled(width, height, FrameEncoding::ScRgb, [level, level, level, 1.0]);
        encode_frame(&frame).expect("encode still")
    }

    #[test]
    fn sdr_chessboard_to_png() {
        let cfg = config_file("display:\n  hdr_enabled: false\nstart_page: 0\ncode_a: 0\n");
        let config = CalConfig::load(cfg.path()).unwrap();
        let mut session = session_from(&config, PngDecoder::srgb());
        session.resize(80, 80);
        let frame = session.render().expect("frame");
        assert_eq!(frame.pattern, Pattern::Chessboard);

        let dir = tempdir().unwrap();
        let path = dir.path().join("board.png");
        write_frame(&path, &frame.pixels).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let img = PngDecoder::srgb().decode(&bytes, false, 1.0).unwrap();
        assert_eq!(img.dimensions(), (80, 80));
        // cell (0,0) is A, cell (0,1) is B
        assert_eq!(img.pixel(5, 5), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(img.pixel(15, 5), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(img.pixel(15, 15), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn hdr_pq_ramp_to_png() {
        let cfg = config_file(
            "display:\n  hdr_enabled: true\n  peak_nits: 1000\nstart_hdr: true\nstart_eotf: pq\nstart_page: 1\ncode_b: 1023\n",
        );
        let config = CalConfig::load(cfg.path()).unwrap();
        let mut session = session_from(&config, PngDecoder::srgb());
        session.resize(160, 90);
        let frame = session.render().unwrap();
        assert_eq!(frame.pixels.encoding(), FrameEncoding::ScRgb);

        let labels: Vec<&str> = frame.commands.labels().map(|(t, _)| t).collect();
        assert_eq!(labels.first(), Some(&"0"));
        assert!(labels.contains(&"1E+04"));
        assert!(labels.contains(&"PQ EOTF"));

        let dir = tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        write_frame(&path, &frame.pixels).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let img = PngDecoder::new(SourceTransfer::Pq, xdr_core::Gamut::Bt709)
            .decode(&bytes, true, 0.0)
            .unwrap();
        assert_eq!(img.pixel(5, 45)[0], 0.0);
        assert_relative_eq!(img.pixel(155, 45)[0], 125.0, max_relative = 1e-3);
    }

    #[test]
    fn reference_image_follows_code_b_and_mode() {
        let config = CalConfig::from_yaml(
            "display:\n  hdr_enabled: true\n  peak_nits: 1000\n  sdr_white_level: 1.0\nstart_hdr: true\nstart_page: 3\n",
        )
        .unwrap();
        let mut session = session_from(&config, PngDecoder::pq());
        session.resize(16, 8);
        session.load_image_blocking(pq_still(8, 4, 8.0)).unwrap();
        assert_relative_eq!(session.peak_hdr().unwrap(), 8.0, max_relative = 1e-2);

        // target ~12.5 exceeds the image peak: full-range decode only
        let frame = session.render().unwrap();
        let blend = frame.blend.expect("image drawn");
        assert_eq!(blend.weight, 1.0);
        assert_eq!(blend.white_scale, 1.0);
        assert_relative_eq!(frame.pixels.pixel(8, 4)[0], 8.0, max_relative = 1e-2);

        // B at 320 nits: the full-range pass is re-decoded with a 4x ceiling
        session.set_code_b(Eotf::Pq.to_code(320.0).round());
        session.render().unwrap();
        assert!(session.wait_for_refresh());
        let frame = session.render().unwrap();
        assert_relative_eq!(session.peak_hdr().unwrap(), 4.0, max_relative = 2e-2);
        assert_relative_eq!(frame.pixels.pixel(8, 4)[0], 4.0, max_relative = 2e-2);

        // SDR output shows the SDR decode, gamma encoded
        assert!(session.set_hdr(false));
        let frame = session.render().unwrap();
        assert_eq!(frame.pixels.encoding(), FrameEncoding::DisplayNative);
        assert_eq!(frame.blend.map(|b| b.weight), Some(0.0));
        assert_relative_eq!(frame.pixels.pixel(8, 4)[0], 1.0, max_relative = 1e-3);
    }

    #[test]
    fn newest_load_wins_across_threads() {
        let mut session = session_from(&CalConfig::default(), PngDecoder::pq());
        let slow = session.load_image(pq_still(8, 4, 2.0));
        let fast = session.load_image(pq_still(6, 6, 2.0));

        let fast_done = std::thread::spawn(move || fast.run()).join().unwrap();
        assert!(session.finish_load(fast_done).unwrap());
        let slow_done = std::thread::spawn(move || slow.run()).join().unwrap();
        assert!(!session.finish_load(slow_done).unwrap());

        assert_eq!(session.image_size(), Some((6, 6)));
    }

    #[test]
    fn corrupt_image_keeps_previous() {
        let mut session = session_from(&CalConfig::default(), PngDecoder::pq());
        session.load_image_blocking(pq_still(4, 4, 1.0)).unwrap();

        match session.load_image_blocking(b"not a png".to_vec()) {
            Err(CalError::Decode(e)) => {
                assert_eq!(e.stage, "png_read_info");
                assert!(e.is_invalid_input());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(session.image_size(), Some((4, 4)));
    }

    #[test]
    fn config_start_state_and_labels() {
        let config = CalConfig::from_yaml(
            "display:\n  hdr_enabled: true\n  peak_nits: 400\nstart_hdr: true\nstart_eotf: gamma22\n",
        )
        .unwrap();
        let session = session_from(&config, PngDecoder::srgb());
        let c = session.coordinator();
        let expected_b = Eotf::Gamma22.to_code(400.0).round_ties_even();
        assert_eq!(c.code_b() as f32, expected_b);

        let (a, b) = c.slider_labels();
        assert_eq!(a, "0 nits");
        assert!(b.ends_with(" nits"));
        let shown: f32 = b.trim_end_matches(" nits").parse().unwrap();
        assert_relative_eq!(shown, 400.0, max_relative = 5e-3);
    }

    #[test]
    fn eotf_switch_keeps_rendered_luminance() {
        let config = CalConfig::from_yaml("start_hdr: true\nstart_page: 0\ncode_a: 300\ncode_b: 700\n").unwrap();
        let mut session = session_from(&config, PngDecoder::srgb());
        session.resize(16, 16);
        let before = session.render().unwrap().pixels;

        session.set_eotf(Eotf::Gamma24);
        let after = session.render().unwrap().pixels;
        for (x, y) in [(0, 0), (3, 0)] {
            assert_relative_eq!(after.pixel(x, y)[0], before.pixel(x, y)[0], max_relative = 2e-2);
        }
    }
}
