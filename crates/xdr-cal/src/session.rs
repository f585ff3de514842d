//! Calibration session.
//!
//! Ties the coordinator, the pattern generators and the blend engine to the
//! surface layer's three signals: [`resize`](Session::resize),
//! [`render`](Session::render) and [`dispose`](Session::dispose).
//!
//! The reference image is decoded twice per load (SDR-clamped and full
//! range). The full-range pass depends on the HDR flag and code B, so the
//! pair is re-decoded on the rayon pool when a reference-page render sees
//! them change; the result lands on a later render. A failed decode never
//! replaces the image on screen.
//!
//! Every decode captures the surface generation it was started under. A
//! completion arriving after a resize is dropped and the source is decoded
//! again for the new surface.
//!
//! # Example
//!
//! ```rust,ignore
//! use xdr_cal::{CalConfig, Session, StaticDisplay};
//! use xdr_io::PngDecoder;
//!
//! let mut session = Session::new(&CalConfig::default(), StaticDisplay::unknown(), PngDecoder::srgb());
//! session.resize(1280, 720);
//! let frame = session.render().expect("live session");
//! session.dispose();
//! assert!(session.render().is_none());
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use tracing::{debug, trace, warn};
use xdr_color::{composite, max_display_boost, BlendParams, ReferencePair};
use xdr_core::{DecodeError, DecodeErrorCode, LinearImage};
use xdr_io::Decoder;
use xdr_pattern::{background_luma, generate, rasterize, DrawList, Pattern, PatternInput};
use xdr_transfer::Eotf;

use crate::config::CalConfig;
use crate::display::{DesktopFacts, DisplayQuery};
use crate::error::CalResult;
use crate::loader::{Generation, ImageLoader, LoadOutcome, LoadTicket};
use crate::mode::{ModeCoordinator, RenderMode};

/// Parameters a pair was decoded with.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DecodeKey {
    hdr: bool,
    max_boost: f32,
}

impl DecodeKey {
    fn for_state(mode: RenderMode, target_peak_scrgb: f32, facts: &DesktopFacts) -> Self {
        Self {
            hdr: mode.hdr,
            max_boost: max_display_boost(mode.hdr, target_peak_scrgb, facts.sdr_white_level),
        }
    }
}

/// One rendered frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Surface generation the frame was rendered for
    pub generation: u64,
    /// Page shown
    pub pattern: Pattern,
    /// Mode the frame was rendered in
    pub mode: RenderMode,
    /// Desktop HDR state used for captions
    pub desktop_is_hdr: bool,
    /// Generator output, labels included
    pub commands: DrawList,
    /// Rasterized fills and reference image
    pub pixels: LinearImage,
    /// Blend used for the reference image, if one was drawn
    pub blend: Option<BlendParams>,
}

/// A reference image decode to run off the render thread.
#[derive(Debug)]
pub struct DecodeJob<D> {
    ticket: LoadTicket,
    surface: u64,
    bytes: Arc<[u8]>,
    decoder: Arc<D>,
    key: DecodeKey,
}

impl<D: Decoder> DecodeJob<D> {
    /// Ticket gating this job.
    pub fn ticket(&self) -> &LoadTicket {
        &self.ticket
    }

    /// Surface generation the job was started under.
    pub fn surface_generation(&self) -> u64 {
        self.surface
    }

    /// Runs both decode passes.
    pub fn run(self) -> DecodeDone {
        let result = decode_pair(self.decoder.as_ref(), &self.bytes, self.key, &self.ticket);
        DecodeDone {
            ticket: self.ticket,
            surface: self.surface,
            bytes: self.bytes,
            key: self.key,
            result,
        }
    }
}

/// A finished [`DecodeJob`], handed back to [`Session::finish_load`].
#[derive(Debug)]
pub struct DecodeDone {
    ticket: LoadTicket,
    surface: u64,
    bytes: Arc<[u8]>,
    key: DecodeKey,
    result: Result<ReferencePair, DecodeError>,
}

impl DecodeDone {
    /// Whether both passes succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn decode_pair<D: Decoder + ?Sized>(
    decoder: &D,
    bytes: &[u8],
    key: DecodeKey,
    ticket: &LoadTicket,
) -> Result<ReferencePair, DecodeError> {
    ticket.check("sdr_decode")?;
    let sdr = decoder.decode(bytes, false, 1.0)?;
    ticket.check("hdr_decode")?;
    let hdr = decoder.decode(bytes, true, key.max_boost)?;
    ReferencePair::new(sdr, hdr).map_err(|e| {
        DecodeError::new("reference_pair", DecodeErrorCode::InvalidOperation).with_detail(e.to_string())
    })
}

struct Reference {
    pair: ReferencePair,
    key: DecodeKey,
}

/// Interactive calibration state behind one surface.
pub struct Session<D, Q> {
    display: Q,
    decoder: Arc<D>,
    coordinator: ModeCoordinator,
    page: Pattern,
    width: u32,
    height: u32,
    scale: f32,
    min_surface_size: Option<u32>,
    background_code: u8,
    label_font_size: f32,
    surface: Generation,
    loader: ImageLoader,
    source: Option<Arc<[u8]>>,
    reference: Option<Reference>,
    attempted: Option<DecodeKey>,
    refresh_tx: Sender<DecodeDone>,
    refresh_rx: Receiver<DecodeDone>,
    refreshing: usize,
    disposed: bool,
}

impl<D: Decoder + 'static, Q: DisplayQuery> Session<D, Q> {
    /// Creates a session in the configured start state.
    ///
    /// The surface starts empty; nothing renders until [`resize`](Self::resize).
    pub fn new(config: &CalConfig, display: Q, decoder: D) -> Self {
        let mut coordinator = ModeCoordinator::new(config.start_eotf);
        if config.start_hdr {
            coordinator.set_hdr(true, &display.facts());
        }
        coordinator.set_code_a(config.code_a as f32);
        if let Some(b) = config.code_b {
            coordinator.set_code_b(b as f32);
        }
        let (refresh_tx, refresh_rx) = mpsc::channel();

        Self {
            display,
            decoder: Arc::new(decoder),
            coordinator,
            page: config.start_pattern(),
            width: 0,
            height: 0,
            scale: 1.0,
            min_surface_size: config.min_surface_size,
            background_code: config.background_code,
            label_font_size: config.label_font_size,
            surface: Generation::new(),
            loader: ImageLoader::new(),
            source: None,
            reference: None,
            attempted: None,
            refresh_tx,
            refresh_rx,
            refreshing: 0,
            disposed: false,
        }
    }

    /// Mode and sliders.
    pub fn coordinator(&self) -> &ModeCoordinator {
        &self.coordinator
    }

    /// Current page.
    pub fn page(&self) -> Pattern {
        self.page
    }

    /// Surface size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Surface generation, bumped by every resize.
    pub fn generation(&self) -> u64 {
        self.surface.current()
    }

    /// True after [`dispose`](Self::dispose).
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// True while an image load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    /// Size of the loaded reference image.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.reference.as_ref().map(|r| r.pair.dimensions())
    }

    /// Peak of the loaded full-range decode.
    pub fn peak_hdr(&self) -> Option<f32> {
        self.reference.as_ref().map(|r| r.pair.peak_hdr())
    }

    /// Sets the surface size in device pixels. Returns the new generation.
    pub fn resize(&mut self, width: u32, height: u32) -> u64 {
        let (w, h) = crate::layout::min_surface_size(width, height, self.min_surface_size);
        self.width = w;
        self.height = h;
        let generation = self.surface.bump();
        debug!(width = w, height = h, generation, "surface resized");
        generation
    }

    /// Sets the DIP-to-pixel scale used for label sizes.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            warn!(scale, "ignoring invalid display scale");
        }
    }

    /// Shows `page`.
    pub fn set_page(&mut self, page: Pattern) {
        self.page = page;
    }

    /// Next page, clamped.
    pub fn next_page(&mut self) -> Pattern {
        self.page = self.page.next();
        self.page
    }

    /// Previous page, clamped.
    pub fn prev_page(&mut self) -> Pattern {
        self.page = self.page.prev();
        self.page
    }

    /// Switches SDR/HDR, querying the display fresh.
    pub fn set_hdr(&mut self, hdr: bool) -> bool {
        let facts = self.display.facts();
        self.coordinator.set_hdr(hdr, &facts)
    }

    /// Selects an EOTF.
    pub fn set_eotf(&mut self, eotf: Eotf) -> bool {
        self.coordinator.set_eotf(eotf)
    }

    /// Moves slider A.
    pub fn set_code_a(&mut self, value: f32) {
        self.coordinator.set_code_a(value);
    }

    /// Moves slider B.
    pub fn set_code_b(&mut self, value: f32) {
        self.coordinator.set_code_b(value);
    }

    fn wanted_key(&self, facts: &DesktopFacts) -> DecodeKey {
        DecodeKey::for_state(self.coordinator.mode(), self.coordinator.target_peak_scrgb(), facts)
    }

    /// Starts loading a reference image.
    ///
    /// Cancels any load still in flight. Run the returned job anywhere and
    /// pass its result to [`finish_load`](Self::finish_load).
    pub fn load_image(&mut self, bytes: impl Into<Arc<[u8]>>) -> DecodeJob<D> {
        let key = self.wanted_key(&self.display.facts());
        self.job(bytes.into(), key)
    }

    fn job(&mut self, bytes: Arc<[u8]>, key: DecodeKey) -> DecodeJob<D> {
        DecodeJob {
            ticket: self.loader.begin(),
            surface: self.surface.current(),
            bytes,
            decoder: Arc::clone(&self.decoder),
            key,
        }
    }

    /// Installs a finished load.
    ///
    /// Returns `Ok(true)` when the image was replaced and `Ok(false)` when
    /// the result was stale. A decode failure of the newest load is an
    /// error and leaves the current image in place.
    ///
    /// A result started before the latest [`resize`](Self::resize) is
    /// stale. If it was the newest load its source is kept and decoded
    /// again on the next reference-page render.
    pub fn finish_load(&mut self, done: DecodeDone) -> CalResult<bool> {
        if self.disposed {
            return Ok(false);
        }
        if !self.surface.is_current(done.surface) {
            debug!(
                surface = done.surface,
                latest = self.surface.current(),
                "load finished for a resized surface, dropped"
            );
            if self.loader.is_live(&done.ticket) {
                self.source = Some(done.bytes);
                self.attempted = None;
            }
            self.loader
                .commit::<ReferencePair>(done.ticket, Err(DecodeError::cancelled("surface_resized")));
            return Ok(false);
        }
        match self.loader.commit(done.ticket, done.result) {
            LoadOutcome::Apply(pair) => {
                debug!(size = ?pair.dimensions(), peak_hdr = pair.peak_hdr(), "reference image loaded");
                self.source = Some(done.bytes);
                self.attempted = Some(done.key);
                self.reference = Some(Reference { pair, key: done.key });
                Ok(true)
            }
            LoadOutcome::Stale => Ok(false),
            LoadOutcome::Failed(e) => Err(e.into()),
        }
    }

    /// Loads a reference image on the calling thread.
    pub fn load_image_blocking(&mut self, bytes: impl Into<Arc<[u8]>>) -> CalResult<()> {
        let job = self.load_image(bytes);
        self.finish_load(job.run()).map(|_| ())
    }

    /// True while a background re-decode has not landed yet.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing > 0
    }

    /// Blocks until every background re-decode has landed. Returns whether
    /// the image was replaced.
    pub fn wait_for_refresh(&mut self) -> bool {
        let mut replaced = false;
        while self.refreshing > 0 {
            match self.refresh_rx.recv() {
                Ok(done) => replaced |= self.land_refresh(done),
                Err(_) => break,
            }
        }
        replaced
    }

    fn drain_refreshes(&mut self) {
        while let Ok(done) = self.refresh_rx.try_recv() {
            self.land_refresh(done);
        }
    }

    fn land_refresh(&mut self, done: DecodeDone) -> bool {
        self.refreshing = self.refreshing.saturating_sub(1);
        match self.finish_load(done) {
            Ok(replaced) => replaced,
            Err(e) => {
                warn!(error = %e, "re-decode failed, keeping previous image");
                false
            }
        }
    }

    /// Starts a background re-decode of the current source if the mode or
    /// code B moved since the last decode. Skipped while any load is in
    /// flight.
    fn refresh_reference(&mut self, facts: &DesktopFacts) {
        let Some(bytes) = self.source.clone() else {
            return;
        };
        let wanted = self.wanted_key(facts);
        if self.attempted == Some(wanted) || self.loader.is_pending() {
            return;
        }

        self.attempted = Some(wanted);
        let job = self.job(bytes, wanted);
        let tx = self.refresh_tx.clone();
        self.refreshing += 1;
        debug!(hdr = wanted.hdr, max_boost = wanted.max_boost, "re-decoding reference image");
        rayon::spawn(move || {
            // the session owns the receiver; a closed channel means it is gone
            let _ = tx.send(job.run());
        });
    }

    /// Renders the current page, or `None` once disposed or while the
    /// surface is empty.
    pub fn render(&mut self) -> Option<Frame> {
        if self.disposed || self.width == 0 || self.height == 0 {
            trace!(disposed = self.disposed, "render skipped");
            return None;
        }

        let facts = self.display.facts();
        let mode = self.coordinator.mode();
        let desktop_is_hdr = facts.desktop_is_hdr(mode.hdr);

        self.drain_refreshes();

        let mut image = None;
        let mut blend = None;
        if self.page == Pattern::ReferenceImage {
            self.refresh_reference(&facts);
            if let Some(r) = &self.reference {
                if r.key.hdr != mode.hdr {
                    trace!("showing reference decoded for the other mode");
                }
                let params = BlendParams::compute(
                    mode.hdr,
                    r.pair.peak_hdr(),
                    facts.sdr_white_level,
                    self.coordinator.target_peak_scrgb(),
                );
                image = Some(composite(&r.pair, &params, mode.encoding()));
                blend = Some(params);
            }
        }

        let input = PatternInput {
            width: self.width,
            height: self.height,
            eotf: mode.eotf,
            hdr: mode.hdr,
            desktop_is_hdr,
            code_a: self.coordinator.code_a(),
            code_b: self.coordinator.code_b(),
            label_size: self.label_font_size * self.scale,
            image_size: image.as_ref().map(|i: &LinearImage| (i.width(), i.height())),
        };
        let commands = generate(self.page, &input);
        let background = background_luma(mode.hdr, self.background_code);
        let pixels = rasterize(
            &commands,
            self.width,
            self.height,
            mode.encoding(),
            background,
            image.as_ref(),
        );

        trace!(page = %self.page, hdr = mode.hdr, desktop_is_hdr, "frame rendered");
        Some(Frame {
            generation: self.surface.current(),
            pattern: self.page,
            mode,
            desktop_is_hdr,
            commands,
            pixels,
            blend,
        })
    }

    /// Stops the session. Every later [`render`](Self::render) returns
    /// `None` and outstanding loads are dropped on arrival.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.loader.cancel();
        self.reference = None;
        self.source = None;
        debug!("session disposed");
    }
}
