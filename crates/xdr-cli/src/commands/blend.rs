//! Blend parameter inspection command.

use crate::BlendArgs;
use anyhow::{ensure, Result};
use xdr_color::{effective_white_level, max_display_boost, BlendParams};

/// Runs the blend command.
pub fn run(args: BlendArgs, verbose: bool) -> Result<()> {
    ensure!(args.peak.is_finite() && args.peak >= 0.0, "--peak must be a non-negative number");

    let target = match (args.target, args.code_b) {
        (Some(t), _) => t,
        (None, Some(b)) => args.eotf.to_scrgb(b),
        (None, None) => args.peak,
    };

    let params = BlendParams::compute(args.hdr, args.peak, args.white_level, target);
    let boost = max_display_boost(args.hdr, target, args.white_level);

    if verbose {
        println!("mode:        {}", if args.hdr { "HDR" } else { "SDR" });
        println!("peak_hdr:    {}", args.peak);
        println!("target:      {target} ({} nits)", target * xdr_transfer::SDR_WHITE_NITS);
        println!("white level: {}", effective_white_level(args.white_level));
    }
    println!("weight:      {:.6}", params.weight);
    println!("white_scale: {}", params.white_scale);
    println!("max_boost:   {boost}");
    Ok(())
}
