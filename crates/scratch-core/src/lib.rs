//! Scratch Core - scratch-to-reveal promotional card engine
//!
//! A headless implementation of a scratch card: an opaque overlay drawn
//! over a prize artwork, erased under the pointer, with completion detected
//! by sampling the overlay's alpha channel.
//!
//! - Prize store and persisted per-profile assignment
//! - Contact extraction from the landing page query string
//! - Pointer-driven erasure on an owned RGBA buffer
//! - Throttled, pixel-sampled completion detection
//! - One-shot completion side effects (persist, notify, celebrate, reveal)
//!
//! The host forwards image-load, layout and pointer events; everything with
//! an outside effect sits behind a trait ([`Persistence`],
//! [`NotificationSink`], [`Celebration`], [`PointerCapture`], [`Clock`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use scratch_core::prelude::*;
//!
//! let mut surface = SessionBuilder::new(ScratchConfig::new())
//!     .with_store(MemoryStore::new())
//!     .with_query("?email=a@b.com")
//!     .build(&mut rand::rng())?;
//!
//! surface.artwork_loaded();
//! surface.overlay_decoded(OverlayImage::gold());
//! surface.resize(Viewport::new(ClientRect::new(0.0, 0.0, 300.0, 150.0), 2.0));
//!
//! surface.pointer_down(1, 20.0, 20.0);
//! surface.pointer_move(1, 280.0, 20.0);
//! surface.pointer_up(1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod capture;
pub mod clock;
pub mod config;
pub mod contact;
pub mod error;
pub mod geometry;
pub mod notify;
pub mod persistence;
pub mod pixels;
pub mod prize;
pub mod reveal;
pub mod session;
pub mod surface;

// Re-exports for convenience
pub use capture::{NoCapture, PointerCapture, PointerId};
pub use clock::{Clock, SystemClock};
pub use config::{ScratchConfig, StorageKeys};
pub use contact::{extract_contact, ContactInfo};
pub use error::{ConfigError, ImageError, PrizeError, ScratchError, StorageError};
pub use geometry::{ClientRect, OverlayPlacement, Viewport};
pub use notify::{Celebration, LogSink, NoCelebration, NotificationSink, RedemptionPayload};
pub use persistence::{
    EphemeralPersistence, JsonFileStore, KeyValueStore, MemoryStore, Persistence,
    StoragePersistence,
};
pub use pixels::{AlphaStats, OverlayImage, PixelBuffer, PixelSurface, Rgba};
pub use prize::{PrizeCard, PrizeStore};
pub use reveal::{RevealPanel, TermsAndConditions};
pub use session::{assign_prize, SessionBuilder};
pub use surface::{ScratchSurface, SurfaceHooks, SurfaceState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for hosting a scratch surface
    pub use crate::{
        ClientRect, ContactInfo, KeyValueStore, MemoryStore, NotificationSink, OverlayImage,
        Persistence, PrizeCard, PrizeStore, RedemptionPayload, ScratchConfig, ScratchSurface,
        SessionBuilder, SurfaceState, Viewport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
