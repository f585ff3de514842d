//! Code/nits conversion command.

use crate::EotfArgs;
use anyhow::{ensure, Result};
use xdr_transfer::Eotf;

/// Runs the eotf command.
pub fn run(args: EotfArgs, verbose: bool) -> Result<()> {
    let eotf = args.eotf;
    if verbose {
        println!("{} (codes 0..={})", eotf.display_name(), eotf.max_code());
    }

    if args.values.is_empty() {
        ensure!(args.step > 0, "--step must be positive");
        print_table(eotf, args.step);
        return Ok(());
    }

    for &v in &args.values {
        if args.to_code {
            println!("{v} nits -> code {:.3}", eotf.to_code(v));
        } else if let Some(target) = args.convert {
            println!(
                "{} {v} -> {} {}  ({} nits)",
                eotf.short_name(),
                target.short_name(),
                eotf.convert_code(v, target),
                xdr_pattern::format_g4(eotf.to_nits(v))
            );
        } else {
            println!(
                "code {v} -> {} nits  scRGB {:.6}",
                xdr_pattern::format_g4(eotf.to_nits(v)),
                eotf.to_scrgb(v)
            );
        }
    }
    Ok(())
}

fn print_table(eotf: Eotf, step: u32) {
    let max = eotf.max_code() as u32;
    println!("{:>6}  {:>10}  {:>10}", "code", "nits", "scRGB");
    let codes = (0..max).step_by(step as usize).chain(std::iter::once(max));
    for code in codes {
        let c = code as f32;
        println!("{code:>6}  {:>10}  {:>10.4}", xdr_pattern::format_g4(eotf.to_nits(c)), eotf.to_scrgb(c));
    }
}
