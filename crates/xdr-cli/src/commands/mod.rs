//! CLI command implementations

pub mod blend;
pub mod eotf;
pub mod labels;
pub mod pattern;

use anyhow::{Context, Result};
use std::path::Path;
use xdr_cal::{CalConfig, DesktopFacts, ModeCoordinator};

use crate::{DisplayArgs, ModeArgs};

/// Loads the session config, or defaults without a path.
pub fn load_config(path: Option<&Path>) -> Result<CalConfig> {
    match path {
        Some(p) => CalConfig::load(p).with_context(|| format!("Failed to load config: {}", p.display())),
        None => Ok(CalConfig::default()),
    }
}

impl DisplayArgs {
    /// Config facts with command line overrides applied.
    pub fn facts(&self, base: DesktopFacts) -> DesktopFacts {
        let mut facts = base;
        if self.desktop_hdr {
            facts.hdr_enabled = Some(true);
        } else if self.desktop_sdr {
            facts.hdr_enabled = Some(false);
        }
        if let Some(p) = self.peak_nits {
            facts.peak_nits = Some(p);
        }
        if let Some(w) = self.white_level {
            facts.sdr_white_level = Some(w);
        }
        facts
    }
}

impl ModeArgs {
    /// Builds a coordinator: config start state, then flags.
    ///
    /// The EOTF is selected before entering HDR so code B defaults to the
    /// display peak under the requested curve.
    pub fn coordinator(&self, config: &CalConfig, facts: &DesktopFacts) -> ModeCoordinator {
        let mut c = ModeCoordinator::new(config.start_eotf);
        if let Some(e) = self.eotf {
            c.set_eotf(e);
        }
        if self.hdr || config.start_hdr {
            c.set_hdr(true, facts);
        }
        c.set_code_a(self.code_a.unwrap_or(config.code_a as f32));
        if let Some(b) = self.code_b.or(config.code_b.map(f32::from)) {
            c.set_code_b(b);
        }
        c
    }
}
