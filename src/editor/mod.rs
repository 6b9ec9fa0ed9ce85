//! Single-cell edit session.
//!
//! `Idle -> Editing(cell, draft) -> Idle`, leaving `Editing` either by commit
//! (submit/blur) or discard (Escape). At most one cell edits at a time; opening
//! a new session drops the previous draft without writing it.

#[cfg(target_arch = "wasm32")]
pub(crate) mod input;
pub(crate) mod mutation;

pub use mutation::{classify_draft, CellCommit};

use crate::cell_ref::CellId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        cell: CellId,
        draft: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `cell` with `seed` as the draft.
    ///
    /// Returns the cell whose uncommitted draft was discarded, if any.
    pub fn begin(&mut self, cell: CellId, seed: String) -> Option<CellId> {
        let previous = self.discard();
        if let Some(prev) = previous {
            tracing::debug!(%prev, %cell, "edit session replaced, previous draft discarded");
        }
        self.state = EditState::Editing { cell, draft: seed };
        previous
    }

    /// Replace the draft text. Ignored when idle.
    pub fn set_draft(&mut self, text: &str) -> bool {
        match &mut self.state {
            EditState::Editing { draft, .. } => {
                text.clone_into(draft);
                true
            }
            EditState::Idle => false,
        }
    }

    /// Finish the session and produce the commit to write.
    pub fn commit(&mut self) -> Option<CellCommit> {
        match std::mem::take(&mut self.state) {
            EditState::Editing { cell, draft } => Some(CellCommit::from_draft(cell, &draft)),
            EditState::Idle => None,
        }
    }

    /// Finish the session without writing. Returns the cell that was editing.
    pub fn discard(&mut self) -> Option<CellId> {
        match std::mem::take(&mut self.state) {
            EditState::Editing { cell, .. } => Some(cell),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn editing_cell(&self) -> Option<CellId> {
        match &self.state {
            EditState::Editing { cell, .. } => Some(*cell),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::cell_ref::to_id;
    use crate::types::CellValue;

    #[test]
    fn test_begin_then_commit() {
        let mut session = EditSession::new();
        assert_eq!(session.begin(to_id(0, 0), "1".into()), None);
        assert!(session.set_draft("2"));
        let commit = session.commit().unwrap();
        assert_eq!(commit.cell, to_id(0, 0));
        assert_eq!(commit.value, CellValue::Number(2.0));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_new_session_discards_previous_draft() {
        let mut session = EditSession::new();
        session.begin(to_id(0, 0), "a".into());
        session.set_draft("unsaved");
        assert_eq!(session.begin(to_id(1, 1), "b".into()), Some(to_id(0, 0)));
        assert_eq!(session.editing_cell(), Some(to_id(1, 1)));
        assert_eq!(session.draft(), Some("b"));
    }

    #[test]
    fn test_discard_writes_nothing() {
        let mut session = EditSession::new();
        session.begin(to_id(2, 2), "x".into());
        assert_eq!(session.discard(), Some(to_id(2, 2)));
        assert_eq!(session.commit(), None);
        assert_eq!(session.state(), &EditState::Idle);
    }

    #[test]
    fn test_idle_ignores_draft_and_commit() {
        let mut session = EditSession::new();
        assert!(!session.set_draft("ignored"));
        assert_eq!(session.commit(), None);
        assert_eq!(session.discard(), None);
    }
}
