//! Pattern rendering command.
//!
//! Runs a full session: config and flags set the mode, an optional
//! reference image is decoded on the rayon pool, and one frame is written
//! to PNG.

use crate::PatternArgs;
use anyhow::{anyhow, bail, Context, Result};
use std::sync::mpsc;
use tracing::info;
use xdr_cal::layout::{calibration_size, to_device_pixels};
use xdr_cal::{CalConfig, Session, StaticDisplay};
use xdr_core::Gamut;
use xdr_io::{write_frame, PngDecoder, SourceTransfer};
use xdr_pattern::Pattern;

/// Runs the pattern command.
pub fn run(args: PatternArgs, config: &CalConfig, verbose: bool) -> Result<()> {
    let facts = args.display.facts(config.display);
    let decoder = decoder_for(&args.source, args.gamut.as_deref())?;

    let mut session = Session::new(config, StaticDisplay::new(facts), decoder);
    if let Some(e) = args.mode.eotf {
        session.set_eotf(e);
    }
    if args.mode.hdr {
        session.set_hdr(true);
    }
    if let Some(a) = args.mode.code_a {
        session.set_code_a(a);
    }
    if let Some(b) = args.mode.code_b {
        session.set_code_b(b);
    }
    if let Some(name) = &args.page {
        let page = Pattern::from_name(name).ok_or_else(|| anyhow!("Unknown page: {name}"))?;
        session.set_page(page);
    }

    let (dip_w, dip_h) = surface_dips(args.width, args.height, args.area)?;
    session.set_scale(args.scale);
    let width = to_device_pixels(dip_w, args.scale);
    let height = to_device_pixels(dip_h, args.scale);
    if width == 0 || height == 0 {
        bail!("Surface is empty: {width}x{height} device pixels");
    }
    session.resize(width, height);

    if let Some(path) = &args.image {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;
        let job = session.load_image(bytes);
        let (tx, rx) = mpsc::channel();
        rayon::spawn(move || {
            // receiver outlives the worker
            let _ = tx.send(job.run());
        });
        let done = rx.recv().context("Decode worker exited")?;
        session
            .finish_load(done)
            .with_context(|| format!("Failed to decode: {}", path.display()))?;
    }

    let frame = session.render().context("Session produced no frame")?;
    write_frame(&args.output, &frame.pixels)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;

    let c = session.coordinator();
    let (a, b) = c.slider_labels();
    info!(
        page = %frame.pattern,
        width,
        height,
        hdr = frame.mode.hdr,
        eotf = %frame.mode.eotf,
        "wrote {}",
        args.output.display()
    );
    println!(
        "{} -> {} ({}x{}, {}, A={a} B={b})",
        frame.pattern,
        args.output.display(),
        width,
        height,
        if frame.mode.hdr { "HDR" } else { "SDR" }
    );

    if verbose {
        for (text, anchor) in frame.commands.labels() {
            println!("  label {anchor:?}: {text}");
        }
        if let Some(p) = frame.blend {
            println!("  blend weight {:.4}, white scale {}", p.weight, p.white_scale);
        }
    }
    Ok(())
}

/// Surface size in DIPs: the whole window, or a calibration area of it.
fn surface_dips(width: f32, height: f32, area: Option<f32>) -> Result<(f32, f32)> {
    let Some(percent) = area else {
        return Ok((width, height));
    };
    if !(percent > 0.0 && percent <= 100.0) {
        bail!("Area must be in (0, 100]: {percent}");
    }
    calibration_size(width, height, width, height, percent)
        .ok_or_else(|| anyhow!("Calibration area is empty for a {width}x{height} window"))
}

fn decoder_for(source: &str, gamut: Option<&str>) -> Result<PngDecoder> {
    let transfer =
        SourceTransfer::from_name(source).ok_or_else(|| anyhow!("Unknown source transfer: {source}"))?;
    let mut decoder = match transfer {
        SourceTransfer::Srgb => PngDecoder::srgb(),
        SourceTransfer::Pq => PngDecoder::pq(),
    };
    if let Some(name) = gamut {
        decoder.gamut = Gamut::from_name(name).ok_or_else(|| anyhow!("Unknown gamut: {name}"))?;
    }
    Ok(decoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_window_without_area() {
        assert_eq!(surface_dips(1280.0, 720.0, None).unwrap(), (1280.0, 720.0));
    }

    #[test]
    fn area_sizes_a_square_when_it_fits() {
        // 25% of 800x800 is a 400x400 square
        assert_eq!(surface_dips(800.0, 800.0, Some(25.0)).unwrap(), (400.0, 400.0));
    }

    #[test]
    fn area_stretches_on_wide_window() {
        // 50% of 1600x400 is 320000 DIP², too big for a square under 400 high
        assert_eq!(surface_dips(1600.0, 400.0, Some(50.0)).unwrap(), (800.0, 400.0));
    }

    #[test]
    fn area_out_of_range() {
        assert!(surface_dips(800.0, 600.0, Some(0.0)).is_err());
        assert!(surface_dips(800.0, 600.0, Some(150.0)).is_err());
        assert!(surface_dips(800.0, 600.0, Some(f32::NAN)).is_err());
        assert!(surface_dips(0.0, 600.0, Some(50.0)).is_err());
    }
}
