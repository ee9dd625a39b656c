use crate::viewport::picking::{PickHit, TargetKind};

/// An interactive target identified by its stable external id, so the
/// selection survives a model reload as long as the key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: TargetKind,
    pub key: String,
}

impl Target {
    pub fn region(key: &str) -> Self {
        Self {
            kind: TargetKind::Region,
            key: key.to_string(),
        }
    }

    pub fn marker(id: &str) -> Self {
        Self {
            kind: TargetKind::Marker,
            key: id.to_string(),
        }
    }

    pub fn from_hit(hit: &PickHit) -> Self {
        Self {
            kind: hit.kind,
            key: hit.id.clone(),
        }
    }
}

/// Active/hover target state. Selection is single-target: the render pass
/// highlights at most one region or marker. The rendering core only reads
/// this; it never owns it.
#[derive(Default)]
pub struct SelectionState {
    active: Option<Target>,
    hovered: Option<Target>,
}

impl SelectionState {
    pub fn active(&self) -> Option<&Target> {
        self.active.as_ref()
    }

    pub fn hovered(&self) -> Option<&Target> {
        self.hovered.as_ref()
    }

    pub fn set_active(&mut self, target: Target) {
        self.active = Some(target);
    }

    /// Click behavior: clicking the already-active target deselects it.
    pub fn toggle(&mut self, target: Target) {
        if self.active.as_ref() == Some(&target) {
            self.active = None;
        } else {
            self.active = Some(target);
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn set_hovered(&mut self, target: Option<Target>) {
        self.hovered = target;
    }

    pub fn is_active(&self, kind: TargetKind, key: &str) -> bool {
        self.active
            .as_ref()
            .map(|t| t.kind == kind && t.key == key)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.active().is_none());
        assert!(s.hovered().is_none());
    }

    #[test]
    fn test_select_single() {
        let mut s = SelectionState::default();
        s.set_active(Target::region("cortex"));
        assert!(s.is_active(TargetKind::Region, "cortex"));
        assert!(!s.is_active(TargetKind::Marker, "cortex"));
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut s = SelectionState::default();
        s.set_active(Target::region("a"));
        s.set_active(Target::marker("m"));
        assert!(!s.is_active(TargetKind::Region, "a"));
        assert!(s.is_active(TargetKind::Marker, "m"));
    }

    #[test]
    fn test_toggle_same_deselects() {
        let mut s = SelectionState::default();
        s.toggle(Target::region("a"));
        assert!(s.is_active(TargetKind::Region, "a"));
        s.toggle(Target::region("a"));
        assert!(s.active().is_none());
    }

    #[test]
    fn test_clear() {
        let mut s = SelectionState::default();
        s.set_active(Target::region("a"));
        s.set_hovered(Some(Target::region("b")));
        s.clear();
        assert!(s.active().is_none());
        // Hover is transient input state, not cleared by deselect
        assert!(s.hovered().is_some());
    }
}
