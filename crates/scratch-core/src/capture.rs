//! Pointer capture
//!
//! While a drag is in progress the host must route every move for that
//! pointer to the scratch surface, even outside its bounds. The surface
//! acquires capture on pointer-down and always releases it, on pointer-up,
//! pointer-leave, or when completion ends the drag early.

/// Host pointer identifier
pub type PointerId = i32;

/// Host hook for exclusive input capture
pub trait PointerCapture: Send + Sync {
    /// Begin routing `pointer` exclusively to the surface
    fn acquire(&self, pointer: PointerId);

    /// Stop routing `pointer` exclusively
    fn release(&self, pointer: PointerId);
}

/// Capture hook for hosts that deliver moves unconditionally
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&self, _pointer: PointerId) {}

    fn release(&self, _pointer: PointerId) {}
}
