//! UI string inspection command.

use crate::LabelsArgs;
use anyhow::Result;
use xdr_cal::CalConfig;
use xdr_pattern::{caption, ramp, PatternInput};

/// Runs the labels command.
pub fn run(args: LabelsArgs, config: &CalConfig, verbose: bool) -> Result<()> {
    let facts = args.display.facts(config.display);
    let c = args.mode.coordinator(config, &facts);
    let mode = c.mode();

    let (a, b) = c.slider_labels();
    println!("A: {a}");
    println!("B: {b}");

    let input = PatternInput {
        eotf: mode.eotf,
        hdr: mode.hdr,
        desktop_is_hdr: facts.desktop_is_hdr(mode.hdr),
        code_a: c.code_a(),
        code_b: c.code_b(),
        ..PatternInput::default()
    };
    println!("caption: {}", caption(&input));

    let bars: Vec<String> = (0..ramp::BARS)
        .map(|i| {
            let code = ramp::bar_code(input.code_a, input.code_b, i);
            xdr_pattern::caption::bar_label(mode.hdr, mode.eotf, code)
        })
        .collect();
    println!("ramp: {}", bars.join(" "));

    if verbose {
        let (la, lb) = c.luma_pair();
        println!("luma: A={la} B={lb} ({:?})", mode.encoding());
    }
    Ok(())
}
