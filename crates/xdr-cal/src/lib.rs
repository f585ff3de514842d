//! # xdr-cal
//!
//! Calibration session: the state machine between the UI and the numeric
//! crates.
//!
//! - [`mode::ModeCoordinator`] - SDR/HDR and EOTF transitions over sliders A and B
//! - [`slider`] - code sliders and their value strings
//! - [`display`] - capability facts and the [`DisplayQuery`] seam
//! - [`loader`] - generation-gated reference image loads
//! - [`session::Session`] - resize, render, dispose
//! - [`config::CalConfig`] - YAML settings
//!
//! # Usage
//!
//! ```rust,ignore
//! use xdr_cal::{CalConfig, Session, StaticDisplay};
//! use xdr_io::PngDecoder;
//! use xdr_transfer::Eotf;
//!
//! let config = CalConfig::load("xdrcal.yaml")?;
//! let mut session = Session::new(&config, StaticDisplay::new(config.display), PngDecoder::srgb());
//! session.resize(1920, 1080);
//! session.set_hdr(true);
//! session.set_eotf(Eotf::Gamma22);
//! let frame = session.render();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod display;
pub mod error;
pub mod layout;
pub mod loader;
pub mod mode;
pub mod session;
pub mod slider;

pub use config::CalConfig;
pub use display::{DesktopFacts, DisplayQuery, StaticDisplay};
pub use error::{CalError, CalResult};
pub use loader::{Generation, ImageLoader, LoadOutcome, LoadTicket};
pub use mode::{ModeCoordinator, RenderMode};
pub use session::{DecodeDone, DecodeJob, Frame, Session};
pub use slider::{format_slider, DisplayMode, Slider};
