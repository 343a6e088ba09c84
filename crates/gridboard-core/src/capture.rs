//! Global pointer listener attachment as a scoped resource.
//!
//! While a gesture is open the host must deliver pointer moves and releases
//! that happen outside the widget. Acquiring a [`CaptureLease`] attaches
//! those listeners; dropping it detaches them. Sessions own their lease, so
//! ending, cancelling or replacing a session always releases exactly once.

use std::fmt;
use std::rc::Rc;

/// Host hook for attaching and detaching global pointer listeners.
pub trait PointerCapture {
    /// Start delivering global pointer move/up events.
    fn attach(&self);
    /// Stop delivering global pointer move/up events.
    fn detach(&self);
}

/// Capture for hosts that already route every pointer event to the controller.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn attach(&self) {}
    fn detach(&self) {}
}

/// Attached global listeners; detached on drop.
pub struct CaptureLease {
    capture: Rc<dyn PointerCapture>,
}

impl CaptureLease {
    /// Attach listeners and return the lease that owns them.
    pub fn acquire(capture: &Rc<dyn PointerCapture>) -> Self {
        capture.attach();
        Self {
            capture: Rc::clone(capture),
        }
    }
}

impl Drop for CaptureLease {
    fn drop(&mut self) {
        self.capture.detach();
    }
}

impl fmt::Debug for CaptureLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureLease").finish_non_exhaustive()
    }
}
