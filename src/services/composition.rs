//! Tracking of multi-keystroke text composition in the keyword box.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositionState {
    #[default]
    Idle,
    Composing,
}

/// Suppresses keyword submission while an input method is composing.
///
/// Intermediate composition fragments are not final text, so a search built
/// from them would query a partial keyword. Only keyword-driven submission is
/// guarded; sort, filter and page changes go through regardless.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompositionGuard {
    state: CompositionState,
}

impl CompositionGuard {
    pub fn state(&self) -> CompositionState {
        self.state
    }

    pub fn start(&mut self) {
        self.state = CompositionState::Composing;
    }

    pub fn end(&mut self) {
        self.state = CompositionState::Idle;
    }

    pub fn is_composing(&self) -> bool {
        self.state == CompositionState::Composing
    }

    pub fn permits_keyword_submit(&self) -> bool {
        !self.is_composing()
    }
}
