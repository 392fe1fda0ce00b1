//! Pointer interaction events routed to skinned controls.
//!
//! The host maps its native mouse/touch notifications to these variants
//! and forwards them for controls it was asked to subscribe.

use serde::Serialize;

/// A pointer notification for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PointerEvent {
    /// Pointer entered the control bounds.
    Enter,
    /// Pointer left the control bounds.
    Leave,
    /// Primary button pressed over the control.
    Press,
    /// Primary button released over the control.
    Release,
    /// Press and release completed on the same control.
    Click,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_copy_and_comparable() {
        let e = PointerEvent::Enter;
        let copy = e;
        assert_eq!(e, copy);
        assert_ne!(PointerEvent::Press, PointerEvent::Release);
    }

    #[test]
    fn events_hash_distinctly() {
        use std::collections::HashSet;
        let set: HashSet<PointerEvent> = [
            PointerEvent::Enter,
            PointerEvent::Leave,
            PointerEvent::Press,
            PointerEvent::Release,
            PointerEvent::Click,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 5);
    }
}
