//! Scratch surface
//!
//! The reveal state machine. Owns the overlay pixel buffer, erases it under
//! the pointer and samples its alpha channel to decide when the card has
//! been scratched off.
//!
//! # States
//!
//! ```text
//! Uninitialized ──(artwork + overlay + non-empty viewport)──► Ready
//! Ready ──pointer down──► Scratching ──pointer up/leave──► Ready
//! Ready | Scratching ──erased fraction > threshold──► Completed
//! ```
//!
//! `Completed` is terminal. Entering it runs the completion side effects
//! exactly once: persist the flag, notify, celebrate, drop the canvas and
//! expose the reveal panel. All mutation goes through `&mut self`, so no
//! two pointer events can interleave between the state check and the state
//! change.

use crate::capture::{NoCapture, PointerCapture, PointerId};
use crate::clock::{Clock, SystemClock, Throttle};
use crate::config::ScratchConfig;
use crate::contact::ContactInfo;
use crate::geometry::{ClientRect, Viewport};
use crate::notify::{Celebration, NoCelebration, NotificationSink, RedemptionPayload};
use crate::persistence::Persistence;
use crate::pixels::{OverlayImage, PixelBuffer, PixelSurface};
use crate::prize::PrizeCard;
use crate::reveal::RevealPanel;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of a scratch surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceState {
    /// Waiting for assets or a usable container size
    Uninitialized,
    /// Overlay drawn, no drag in progress
    Ready,
    /// Drag in progress, pointer captured
    Scratching,
    /// Scratched off (terminal)
    Completed,
}

impl SurfaceState {
    /// Whether erasure is accepted in this state
    #[inline]
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Ready | Self::Scratching)
    }
}

/// Collaborators the surface drives
#[derive(Clone)]
pub struct SurfaceHooks {
    /// Completion flag storage
    pub persistence: Arc<dyn Persistence>,
    /// Redemption delivery
    pub sink: Arc<dyn NotificationSink>,
    /// Completion effect
    pub celebration: Arc<dyn Celebration>,
    /// Host pointer capture
    pub capture: Arc<dyn PointerCapture>,
    /// Throttle time source
    pub clock: Arc<dyn Clock>,
}

impl SurfaceHooks {
    /// Hooks with no celebration, no capture and the system clock
    #[must_use]
    pub fn new(persistence: Arc<dyn Persistence>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            persistence,
            sink,
            celebration: Arc::new(NoCelebration),
            capture: Arc::new(NoCapture),
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// With celebration effect
    #[inline]
    #[must_use]
    pub fn with_celebration(mut self, celebration: Arc<dyn Celebration>) -> Self {
        self.celebration = celebration;
        self
    }

    /// With pointer capture hook
    #[inline]
    #[must_use]
    pub fn with_capture(mut self, capture: Arc<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    /// With clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl fmt::Debug for SurfaceHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHooks").finish_non_exhaustive()
    }
}

/// Drawing buffer plus the geometry it was sized for
#[derive(Debug)]
struct Canvas {
    buffer: PixelBuffer,
    viewport: Viewport,
}

/// The scratch-to-reveal state machine
#[derive(Debug)]
pub struct ScratchSurface {
    config: ScratchConfig,
    prize: PrizeCard,
    contact: ContactInfo,
    hooks: SurfaceHooks,
    state: SurfaceState,
    artwork_loaded: bool,
    overlay: Option<OverlayImage>,
    viewport: Option<Viewport>,
    canvas: Option<Canvas>,
    captured: Option<PointerId>,
    throttle: Throttle,
    reveal: RevealPanel,
}

impl ScratchSurface {
    /// Create surface for an assigned prize
    ///
    /// With `already_complete` the surface starts `Completed`: no canvas is
    /// ever attached and no side effect fires.
    #[must_use]
    pub fn new(
        config: ScratchConfig,
        prize: PrizeCard,
        contact: ContactInfo,
        already_complete: bool,
        hooks: SurfaceHooks,
    ) -> Self {
        let state = if already_complete {
            tracing::info!(prize = %prize.id, "card already scratched, showing reveal");
            SurfaceState::Completed
        } else {
            SurfaceState::Uninitialized
        };
        let throttle = Throttle::new(config.throttle());

        Self {
            config,
            prize,
            contact,
            hooks,
            state,
            artwork_loaded: false,
            overlay: None,
            viewport: None,
            canvas: None,
            captured: None,
            throttle,
            reveal: RevealPanel::default(),
        }
    }

    /// With custom reveal panel copy
    #[inline]
    #[must_use]
    pub fn with_reveal_panel(mut self, panel: RevealPanel) -> Self {
        self.reveal = panel;
        self
    }

    // ---------------------------------------------------------------------
    // Host lifecycle signals
    // ---------------------------------------------------------------------

    /// The prize artwork finished loading
    pub fn artwork_loaded(&mut self) {
        self.artwork_loaded = true;
        self.try_initialize();
    }

    /// The overlay image finished decoding
    pub fn overlay_decoded(&mut self, overlay: OverlayImage) {
        self.overlay = Some(overlay);
        self.try_initialize();
    }

    /// The container was laid out or resized
    ///
    /// Reallocates the buffer and redraws the full overlay: erasure progress
    /// is lost. An empty rect is ignored and leaves any existing canvas as is.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.rect.is_empty() {
            tracing::debug!(rect = ?viewport.rect, "ignoring resize to empty container");
            return;
        }
        self.viewport = Some(viewport);
        self.try_initialize();
    }

    /// The container moved without changing size (scroll, reflow)
    ///
    /// Only the client-to-buffer mapping changes; erasure is kept.
    pub fn reposition(&mut self, left: f64, top: f64) {
        let move_rect = |rect: &mut ClientRect| {
            rect.left = left;
            rect.top = top;
        };
        if let Some(viewport) = self.viewport.as_mut() {
            move_rect(&mut viewport.rect);
        }
        if let Some(canvas) = self.canvas.as_mut() {
            move_rect(&mut canvas.viewport.rect);
        }
    }

    fn try_initialize(&mut self) -> bool {
        if self.state == SurfaceState::Completed {
            return false;
        }
        if !self.artwork_loaded {
            tracing::debug!("deferring canvas: artwork not loaded");
            return false;
        }
        let Some(overlay) = self.overlay.as_ref() else {
            tracing::debug!("deferring canvas: overlay not decoded");
            return false;
        };
        let Some(viewport) = self.viewport else {
            tracing::debug!("deferring canvas: container not laid out");
            return false;
        };
        let (width, height) = viewport.buffer_size();
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "deferring canvas: zero-sized buffer");
            return false;
        }

        let mut buffer = PixelBuffer::new(width, height);
        buffer.draw_image_scaled(overlay);
        let reinitialized = self.canvas.replace(Canvas { buffer, viewport }).is_some();

        if self.state == SurfaceState::Uninitialized {
            self.state = SurfaceState::Ready;
        }
        tracing::info!(
            width,
            height,
            dpr = viewport.dpr(),
            reinitialized,
            "scratch overlay drawn"
        );
        true
    }

    // ---------------------------------------------------------------------
    // Erasure and completion
    // ---------------------------------------------------------------------

    /// Erase a disc under the client-space point
    ///
    /// No-op unless `Ready` or `Scratching`.
    pub fn scratch_at(&mut self, client_x: f64, client_y: f64) {
        if !self.state.accepts_input() {
            return;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let size = (canvas.buffer.width(), canvas.buffer.height());
        let (x, y) = canvas.viewport.to_buffer(client_x, client_y, size);
        let radius = self.config.scratch_radius_px * canvas.viewport.dpr();
        canvas.buffer.erase_circle(x, y, radius);
        tracing::trace!(x, y, radius, "erased");
    }

    /// Sample the overlay and complete if enough of it is gone
    ///
    /// Throttled to one evaluation per `throttle_ms` unless `force`.
    /// Returns true only for the call that performed the transition.
    pub fn check_completion(&mut self, force: bool) -> bool {
        if self.state == SurfaceState::Completed {
            return false;
        }
        if !self.throttle.admit(self.hooks.clock.now(), force) {
            return false;
        }
        let Some(canvas) = self.canvas.as_ref() else {
            return false;
        };

        let fraction = canvas.buffer.alpha_stats().erased_fraction();
        tracing::debug!(fraction, force, "completion check");

        if fraction > self.config.completion_threshold {
            self.complete(fraction);
            true
        } else {
            false
        }
    }

    fn complete(&mut self, fraction: f64) {
        self.state = SurfaceState::Completed;
        tracing::info!(prize = %self.prize.id, fraction, "card scratched off");

        self.hooks.persistence.mark_scratch_complete();

        if self.prize.promo.is_empty() {
            tracing::warn!(prize = %self.prize.id, "prize has no promo code, skipping notification");
        } else {
            let payload = RedemptionPayload::new(self.prize.promo.clone(), &self.contact);
            self.hooks.sink.notify(payload);
        }

        self.hooks.celebration.celebrate(&self.prize);

        self.canvas = None;
        self.release_capture();
    }

    // ---------------------------------------------------------------------
    // Pointer lifecycle
    // ---------------------------------------------------------------------

    /// Pointer pressed on the surface: capture, erase, throttled check
    pub fn pointer_down(&mut self, pointer: PointerId, client_x: f64, client_y: f64) {
        if !self.state.accepts_input() || self.canvas.is_none() {
            return;
        }
        if self.captured != Some(pointer) {
            self.release_capture();
            self.hooks.capture.acquire(pointer);
            self.captured = Some(pointer);
        }
        self.state = SurfaceState::Scratching;
        self.scratch_at(client_x, client_y);
        self.check_completion(false);
    }

    /// Pointer moved: erase and throttled check, only while captured
    pub fn pointer_move(&mut self, pointer: PointerId, client_x: f64, client_y: f64) {
        if self.state != SurfaceState::Scratching || self.captured != Some(pointer) {
            return;
        }
        self.scratch_at(client_x, client_y);
        self.check_completion(false);
    }

    /// Pointer released: end capture and force a final check
    pub fn pointer_up(&mut self, pointer: PointerId) {
        if self.captured != Some(pointer) {
            return;
        }
        self.release_capture();
        if self.state == SurfaceState::Scratching {
            self.state = SurfaceState::Ready;
        }
        self.check_completion(true);
    }

    /// Pointer left the surface: same as release
    pub fn pointer_leave(&mut self, pointer: PointerId) {
        self.pointer_up(pointer);
    }

    fn release_capture(&mut self) {
        if let Some(pointer) = self.captured.take() {
            self.hooks.capture.release(pointer);
        }
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Whether the card has been scratched off
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SurfaceState::Completed
    }

    /// Whether a drag currently holds pointer capture
    #[inline]
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.captured.is_some()
    }

    /// Current erased fraction, `None` without a canvas
    #[must_use]
    pub fn erased_fraction(&self) -> Option<f64> {
        self.canvas
            .as_ref()
            .map(|c| c.buffer.alpha_stats().erased_fraction())
    }

    /// Buffer size in device pixels, `None` without a canvas
    #[must_use]
    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        self.canvas
            .as_ref()
            .map(|c| (c.buffer.width(), c.buffer.height()))
    }

    /// Overlay pixels for the host to present
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> Option<&PixelBuffer> {
        self.canvas.as_ref().map(|c| &c.buffer)
    }

    /// Assigned prize
    #[inline]
    #[must_use]
    pub fn prize(&self) -> &PrizeCard {
        &self.prize
    }

    /// Contact captured at load
    #[inline]
    #[must_use]
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    /// Reveal panel, visible only once completed
    #[inline]
    #[must_use]
    pub fn reveal_panel(&self) -> Option<&RevealPanel> {
        self.is_complete().then_some(&self.reveal)
    }

    /// Mutable reveal panel (terms toggle), only once completed
    #[inline]
    pub fn reveal_panel_mut(&mut self) -> Option<&mut RevealPanel> {
        if self.is_complete() {
            Some(&mut self.reveal)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MockCelebration, MockNotificationSink};
    use crate::persistence::{EphemeralPersistence, MemoryStore, StoragePersistence};
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Clock advanced by hand
    #[derive(Default)]
    struct StepClock(Mutex<Duration>);

    impl StepClock {
        fn advance(&self, by: Duration) {
            *self.0.lock() += by;
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> Duration {
            *self.0.lock()
        }
    }

    #[derive(Default)]
    struct CaptureLog(Mutex<Vec<(&'static str, PointerId)>>);

    impl PointerCapture for CaptureLog {
        fn acquire(&self, pointer: PointerId) {
            self.0.lock().push(("acquire", pointer));
        }

        fn release(&self, pointer: PointerId) {
            self.0.lock().push(("release", pointer));
        }
    }

    fn prize() -> PrizeCard {
        PrizeCard::new("P1", "/prize.png", "2500 usd gift", "2500 usd gift")
    }

    /// 100x50 CSS container at (10, 20), dpr 1
    fn viewport() -> Viewport {
        Viewport::new(ClientRect::new(10.0, 20.0, 100.0, 50.0), 1.0)
    }

    fn silent_sink() -> Arc<dyn NotificationSink> {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().return_const(());
        Arc::new(sink)
    }

    fn surface_with(sink: Arc<dyn NotificationSink>, clock: Arc<dyn Clock>) -> ScratchSurface {
        let hooks = SurfaceHooks::new(Arc::new(EphemeralPersistence), sink).with_clock(clock);
        ScratchSurface::new(ScratchConfig::new(), prize(), ContactInfo::default(), false, hooks)
    }

    fn ready(surface: &mut ScratchSurface) {
        surface.artwork_loaded();
        surface.overlay_decoded(OverlayImage::gold());
        surface.resize(viewport());
    }

    /// Erase the whole container in a grid of taps
    fn wipe(surface: &mut ScratchSurface) {
        for row in 0..=5 {
            for col in 0..=10 {
                surface.scratch_at(10.0 + f64::from(col) * 10.0, 20.0 + f64::from(row) * 10.0);
            }
        }
    }

    #[test]
    fn waits_for_all_assets() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        surface.resize(viewport());
        assert_eq!(surface.state(), SurfaceState::Uninitialized);
        surface.overlay_decoded(OverlayImage::gold());
        assert_eq!(surface.state(), SurfaceState::Uninitialized);
        assert!(surface.canvas_size().is_none());

        surface.artwork_loaded();
        assert_eq!(surface.state(), SurfaceState::Ready);
        assert_eq!(surface.canvas_size(), Some((100, 50)));
        assert_eq!(surface.erased_fraction(), Some(0.0));
    }

    #[test]
    fn empty_container_defers_initialization() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        surface.artwork_loaded();
        surface.overlay_decoded(OverlayImage::gold());
        surface.resize(Viewport::new(ClientRect::new(0.0, 0.0, 0.0, 40.0), 2.0));
        assert_eq!(surface.state(), SurfaceState::Uninitialized);

        surface.resize(Viewport::new(ClientRect::new(0.0, 0.0, 50.0, 40.0), 2.0));
        assert_eq!(surface.canvas_size(), Some((100, 80)));
    }

    #[test]
    fn scratch_is_ignored_before_ready() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        surface.scratch_at(50.0, 40.0);
        surface.pointer_down(1, 50.0, 40.0);
        assert!(!surface.is_capturing());
        assert!(!surface.check_completion(true));
    }

    #[test]
    fn erasure_is_idempotent() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        ready(&mut surface);
        surface.scratch_at(40.0, 40.0);
        let once = surface.erased_fraction().unwrap();
        surface.scratch_at(40.0, 40.0);
        assert!(once > 0.0);
        assert!((surface.erased_fraction().unwrap() - once).abs() < f64::EPSILON);
    }

    #[test]
    fn radius_scales_with_density() {
        let clock: Arc<dyn Clock> = Arc::new(StepClock::default());
        let mut low = surface_with(silent_sink(), Arc::clone(&clock));
        let mut high = surface_with(silent_sink(), clock);
        ready(&mut low);
        ready(&mut high);
        high.resize(Viewport::new(viewport().rect, 2.0));

        low.scratch_at(60.0, 45.0);
        high.scratch_at(60.0, 45.0);
        let a = low.erased_fraction().unwrap();
        let b = high.erased_fraction().unwrap();
        assert!((a - b).abs() < 0.01, "{a} vs {b}");
    }

    #[test]
    fn completes_exactly_once() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify()
            .withf(|p| p.promo == "2500 usd gift" && p.email.is_none())
            .times(1)
            .return_const(());
        let mut celebration = MockCelebration::new();
        celebration.expect_celebrate().times(1).return_const(());

        let store = MemoryStore::new();
        let persistence = StoragePersistence::new(store.clone(), ScratchConfig::new().storage_keys);
        let hooks = SurfaceHooks::new(Arc::new(persistence), Arc::new(sink))
            .with_celebration(Arc::new(celebration))
            .with_clock(Arc::new(StepClock::default()));
        let mut surface =
            ScratchSurface::new(ScratchConfig::new(), prize(), ContactInfo::default(), false, hooks);
        ready(&mut surface);

        wipe(&mut surface);
        assert!(surface.check_completion(true));
        assert!(!surface.check_completion(true));
        assert!(!surface.check_completion(true));

        assert!(surface.is_complete());
        assert!(surface.canvas_size().is_none());
        assert!(surface.reveal_panel().is_some());
        assert_eq!(
            store.entries().get("mme_scratch_done").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn at_threshold_is_not_complete() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().times(0);
        let config = ScratchConfig::new().with_threshold(0.5);
        let hooks = SurfaceHooks::new(Arc::new(EphemeralPersistence), Arc::new(sink))
            .with_clock(Arc::new(StepClock::default()));
        let mut surface = ScratchSurface::new(config, prize(), ContactInfo::default(), false, hooks);
        // 2x1 overlay: left half opaque, right half already transparent
        let half = [[212, 175, 55, 255], [0, 0, 0, 0]].concat();
        surface.artwork_loaded();
        surface.overlay_decoded(OverlayImage::from_rgba(2, 1, half).unwrap());
        surface.resize(viewport());

        assert_eq!(surface.erased_fraction(), Some(0.5));
        assert!(!surface.check_completion(true));
        assert_eq!(surface.state(), SurfaceState::Ready);
    }

    #[test]
    fn throttled_check_defers_to_forced_release() {
        let clock = Arc::new(StepClock::default());
        let mut surface = surface_with(silent_sink(), clock.clone());
        ready(&mut surface);

        // Down runs the first (unthrottled) check on a fresh card
        surface.pointer_down(7, 10.0, 20.0);
        clock.advance(Duration::from_millis(10));
        for row in 0..=5 {
            for col in 0..=10 {
                surface.pointer_move(7, 10.0 + f64::from(col) * 10.0, 20.0 + f64::from(row) * 10.0);
            }
        }
        // Every move fell inside the throttle window
        assert!(!surface.is_complete());
        assert!(surface.erased_fraction().unwrap() > 0.85);

        surface.pointer_up(7);
        assert!(surface.is_complete());
    }

    #[test]
    fn throttle_window_reopens() {
        let clock = Arc::new(StepClock::default());
        let mut surface = surface_with(silent_sink(), clock.clone());
        ready(&mut surface);

        surface.pointer_down(1, 10.0, 20.0);
        wipe(&mut surface);
        surface.pointer_move(1, 50.0, 40.0);
        assert!(!surface.is_complete());

        clock.advance(Duration::from_millis(300));
        surface.pointer_move(1, 50.0, 40.0);
        assert!(surface.is_complete());
        assert!(!surface.is_capturing());
    }

    #[test]
    fn moves_without_capture_do_nothing() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        ready(&mut surface);
        surface.pointer_move(3, 50.0, 40.0);
        assert_eq!(surface.erased_fraction(), Some(0.0));

        surface.pointer_down(3, 20.0, 30.0);
        surface.pointer_move(4, 80.0, 60.0);
        surface.pointer_up(3);
        let after = surface.erased_fraction().unwrap();
        surface.pointer_move(3, 80.0, 60.0);
        assert!((surface.erased_fraction().unwrap() - after).abs() < f64::EPSILON);
        assert_eq!(surface.state(), SurfaceState::Ready);
    }

    #[test]
    fn capture_always_released() {
        let log = Arc::new(CaptureLog::default());
        let hooks = SurfaceHooks::new(Arc::new(EphemeralPersistence), silent_sink())
            .with_capture(log.clone())
            .with_clock(Arc::new(StepClock::default()));
        let mut surface =
            ScratchSurface::new(ScratchConfig::new(), prize(), ContactInfo::default(), false, hooks);
        ready(&mut surface);

        surface.pointer_down(1, 20.0, 30.0);
        surface.pointer_leave(1);
        surface.pointer_down(2, 20.0, 30.0);
        surface.pointer_down(5, 20.0, 30.0);
        wipe(&mut surface);
        surface.pointer_up(5);

        assert!(surface.is_complete());
        assert_eq!(
            *log.0.lock(),
            vec![
                ("acquire", 1),
                ("release", 1),
                ("acquire", 2),
                ("release", 2),
                ("acquire", 5),
                ("release", 5),
            ]
        );
    }

    #[test]
    fn completion_mid_drag_releases_capture() {
        let log = Arc::new(CaptureLog::default());
        let hooks = SurfaceHooks::new(Arc::new(EphemeralPersistence), silent_sink())
            .with_capture(log.clone())
            .with_clock(Arc::new(StepClock::default()));
        let mut surface =
            ScratchSurface::new(ScratchConfig::new(), prize(), ContactInfo::default(), false, hooks);
        ready(&mut surface);

        wipe(&mut surface);
        surface.pointer_down(9, 50.0, 40.0);
        assert!(surface.is_complete());
        assert_eq!(*log.0.lock(), vec![("acquire", 9), ("release", 9)]);

        // Late events for the finished drag are ignored
        surface.pointer_up(9);
        assert_eq!(log.0.lock().len(), 2);
    }

    #[test]
    fn resize_resets_progress() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        ready(&mut surface);
        surface.pointer_down(1, 30.0, 30.0);
        surface.pointer_move(1, 60.0, 40.0);
        assert!(surface.erased_fraction().unwrap() > 0.0);

        surface.resize(Viewport::new(ClientRect::new(10.0, 20.0, 120.0, 60.0), 1.0));
        assert_eq!(surface.canvas_size(), Some((120, 60)));
        assert_eq!(surface.erased_fraction(), Some(0.0));
        assert_eq!(surface.state(), SurfaceState::Scratching);
    }

    #[test]
    fn reposition_keeps_progress_and_moves_mapping() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        ready(&mut surface);
        surface.scratch_at(60.0, 45.0);
        let before = surface.erased_fraction().unwrap();

        surface.reposition(1_000.0, 1_000.0);
        assert!((surface.erased_fraction().unwrap() - before).abs() < f64::EPSILON);

        // Old coordinates now miss the container entirely
        surface.scratch_at(60.0, 45.0);
        assert!((surface.erased_fraction().unwrap() - before).abs() < f64::EPSILON);
        surface.scratch_at(1_080.0, 1_030.0);
        assert!(surface.erased_fraction().unwrap() > before);
    }

    #[test]
    fn already_complete_never_attaches_canvas() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().times(0);
        let hooks = SurfaceHooks::new(Arc::new(EphemeralPersistence), Arc::new(sink));
        let mut surface =
            ScratchSurface::new(ScratchConfig::new(), prize(), ContactInfo::default(), true, hooks);
        ready(&mut surface);
        surface.pointer_down(1, 50.0, 40.0);
        surface.pointer_up(1);

        assert_eq!(surface.state(), SurfaceState::Completed);
        assert!(surface.canvas_size().is_none());
        assert!(surface.reveal_panel().is_some());
    }

    #[test]
    fn empty_promo_skips_notification() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify().times(0);
        let hooks = SurfaceHooks::new(Arc::new(EphemeralPersistence), Arc::new(sink))
            .with_clock(Arc::new(StepClock::default()));
        let card = PrizeCard::new("P0", "/p0.png", "", "nothing");
        let mut surface =
            ScratchSurface::new(ScratchConfig::new(), card, ContactInfo::default(), false, hooks);
        ready(&mut surface);
        wipe(&mut surface);
        assert!(surface.check_completion(true));
    }

    #[test]
    fn reveal_panel_hidden_until_complete() {
        let mut surface = surface_with(silent_sink(), Arc::new(StepClock::default()));
        ready(&mut surface);
        assert!(surface.reveal_panel().is_none());
        assert!(surface.reveal_panel_mut().is_none());

        wipe(&mut surface);
        surface.check_completion(true);
        let panel = surface.reveal_panel_mut().unwrap();
        panel.toggle_terms();
        assert!(surface.reveal_panel().unwrap().is_terms_open());
    }
}
