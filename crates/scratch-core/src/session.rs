//! Session bootstrap
//!
//! Load-time wiring: extract the contact, resolve the prize assignment and
//! the completion flag, then hand everything to a [`ScratchSurface`].

use crate::capture::PointerCapture;
use crate::clock::Clock;
use crate::config::ScratchConfig;
use crate::contact::extract_contact;
use crate::error::ScratchError;
use crate::notify::{Celebration, LogSink, NotificationSink};
use crate::persistence::{EphemeralPersistence, KeyValueStore, Persistence, StoragePersistence};
use crate::prize::{PrizeCard, PrizeStore};
use crate::reveal::RevealPanel;
use crate::surface::{ScratchSurface, SurfaceHooks};
use rand::Rng;
use std::sync::Arc;

/// Resolve the visitor's prize
///
/// A stored id that is still in the catalog is reused. A stale id (catalog
/// changed between visits) or no id at all gets a fresh random pick, which
/// is persisted.
pub fn assign_prize<'a, R: Rng>(
    prizes: &'a PrizeStore,
    persistence: &dyn Persistence,
    rng: &mut R,
) -> &'a PrizeCard {
    let stored = persistence.assigned_prize_id();
    if let Some(card) = stored.as_deref().and_then(|id| prizes.get(id)) {
        tracing::debug!(prize = %card.id, "reusing stored prize");
        return card;
    }

    let card = prizes.choose(rng);
    match stored {
        Some(stale) => {
            tracing::info!(stale = %stale, prize = %card.id, "stored prize no longer offered, reassigning");
        }
        None => tracing::info!(prize = %card.id, "assigned prize"),
    }
    persistence.set_assigned_prize_id(&card.id);
    card
}

/// Assembles a [`ScratchSurface`] for one page load
pub struct SessionBuilder {
    config: ScratchConfig,
    prizes: PrizeStore,
    query: String,
    persistence: Option<Arc<dyn Persistence>>,
    sink: Arc<dyn NotificationSink>,
    celebration: Option<Arc<dyn Celebration>>,
    capture: Option<Arc<dyn PointerCapture>>,
    clock: Option<Arc<dyn Clock>>,
    reveal: Option<RevealPanel>,
}

impl SessionBuilder {
    /// Builder with the default catalog, no storage and a logging sink
    #[must_use]
    pub fn new(config: ScratchConfig) -> Self {
        Self {
            config,
            prizes: PrizeStore::default(),
            query: String::new(),
            persistence: None,
            sink: Arc::new(LogSink),
            celebration: None,
            capture: None,
            clock: None,
            reveal: None,
        }
    }

    /// With prize catalog
    #[inline]
    #[must_use]
    pub fn with_prizes(mut self, prizes: PrizeStore) -> Self {
        self.prizes = prizes;
        self
    }

    /// With the page's location search string
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// With a key/value store, adapted using the configured keys
    #[must_use]
    pub fn with_store<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        let keys = self.config.storage_keys.clone();
        self.persistence = Some(Arc::new(StoragePersistence::new(store, keys)));
        self
    }

    /// With a ready-made persistence adapter
    #[inline]
    #[must_use]
    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// With notification sink
    #[inline]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// With celebration effect
    #[inline]
    #[must_use]
    pub fn with_celebration(mut self, celebration: Arc<dyn Celebration>) -> Self {
        self.celebration = Some(celebration);
        self
    }

    /// With pointer capture hook
    #[inline]
    #[must_use]
    pub fn with_capture(mut self, capture: Arc<dyn PointerCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    /// With clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// With reveal panel copy
    #[inline]
    #[must_use]
    pub fn with_reveal_panel(mut self, panel: RevealPanel) -> Self {
        self.reveal = Some(panel);
        self
    }

    /// Resolve the assignment and build the surface
    ///
    /// # Errors
    /// Returns `ScratchError::Config` if the configuration is invalid
    pub fn build<R: Rng>(self, rng: &mut R) -> Result<ScratchSurface, ScratchError> {
        self.config.validate()?;

        let contact = extract_contact(&self.query);
        let persistence: Arc<dyn Persistence> = match self.persistence {
            Some(persistence) if self.config.enable_persistence => persistence,
            Some(_) => {
                tracing::debug!("persistence disabled, ignoring configured store");
                Arc::new(EphemeralPersistence)
            }
            None => Arc::new(EphemeralPersistence),
        };

        let prize = assign_prize(&self.prizes, persistence.as_ref(), rng).clone();
        let already_complete = persistence.is_scratch_complete();

        let mut hooks = SurfaceHooks::new(persistence, self.sink);
        if let Some(celebration) = self.celebration {
            hooks = hooks.with_celebration(celebration);
        }
        if let Some(capture) = self.capture {
            hooks = hooks.with_capture(capture);
        }
        if let Some(clock) = self.clock {
            hooks = hooks.with_clock(clock);
        }

        let surface = ScratchSurface::new(self.config, prize, contact, already_complete, hooks);
        Ok(match self.reveal {
            Some(panel) => surface.with_reveal_panel(panel),
            None => surface,
        })
    }
}
