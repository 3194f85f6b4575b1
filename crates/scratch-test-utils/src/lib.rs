//! Testing utilities for the scratch card workspace
//!
//! Shared fakes, fixtures, and stroke helpers.

#![allow(missing_docs)]

use parking_lot::Mutex;
use scratch_core::{
    Celebration, ClientRect, Clock, KeyValueStore, NotificationSink, OverlayImage, PointerId,
    PrizeCard, RedemptionPayload, ScratchSurface, StorageError, Viewport,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Key/value store that can be switched into a failing mode
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    broken: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that fails every call from the start
    pub fn broken() -> Self {
        let store = Self::default();
        store.set_broken(true);
        store
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(self.entry(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded);
        }
        self.insert(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Sink that records every payload
#[derive(Debug, Default)]
pub struct RecordingSink {
    payloads: Mutex<Vec<RedemptionPayload>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn payloads(&self) -> Vec<RedemptionPayload> {
        self.payloads.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.payloads.lock().len()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, payload: RedemptionPayload) {
        self.payloads.lock().push(payload);
    }
}

/// Celebration that counts invocations
#[derive(Debug, Default)]
pub struct CountingCelebration {
    count: AtomicUsize,
}

impl CountingCelebration {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Celebration for CountingCelebration {
    fn celebrate(&self, _prize: &PrizeCard) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn advance_ms(&self, ms: u64) {
        *self.now.lock() += Duration::from_millis(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// Standard test container: 200x100 CSS pixels at (50, 80)
pub fn test_viewport(dpr: f64) -> Viewport {
    Viewport::new(ClientRect::new(50.0, 80.0, 200.0, 100.0), dpr)
}

/// Signal every asset ready and lay the surface out
pub fn make_ready(surface: &mut ScratchSurface, viewport: Viewport) {
    surface.artwork_loaded();
    surface.overlay_decoded(OverlayImage::gold());
    surface.resize(viewport);
}

/// Client-space points of a serpentine sweep over `rect`, `step` apart,
/// covering the rows whose top lies above `coverage` of the height
pub fn sweep_points(rect: ClientRect, step: f64, coverage: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let limit = rect.top + rect.height * coverage;
    let mut y = rect.top;
    let mut row = 0_u32;
    while y <= limit {
        let mut xs: Vec<f64> = Vec::new();
        let mut x = rect.left;
        while x <= rect.left + rect.width {
            xs.push(x);
            x += step;
        }
        if row % 2 == 1 {
            xs.reverse();
        }
        points.extend(xs.into_iter().map(|x| (x, y)));
        y += step;
        row += 1;
    }
    points
}

/// Drag `pointer` through `points` and release
pub fn drag(surface: &mut ScratchSurface, pointer: PointerId, points: &[(f64, f64)]) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    surface.pointer_down(pointer, x0, y0);
    for &(x, y) in rest {
        surface.pointer_move(pointer, x, y);
    }
    surface.pointer_up(pointer);
}
