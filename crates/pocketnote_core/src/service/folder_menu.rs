//! Folder-menu drag interaction state machine.
//!
//! # Responsibility
//! - Track whether the folder panel is open and which note, if any, is
//!   waiting to be dropped on a folder.
//! - Resolve drops through `Organizer::move_note` so gesture modalities never
//!   write notes directly.
//!
//! # Invariants
//! - At most one candidate note is pending; a new drag replaces it.
//! - Cancelling or dismissing a pending drag never mutates notes.

use crate::model::note::NoteId;
use crate::repo::collection::RepoResult;
use crate::service::organizer::{Organizer, OrganizerSnapshot};
use crate::store::KeyValueStore;
use log::{debug, info};

/// Minimum rightward swipe distance, in logical pixels, that starts a drag.
pub const DRAG_SWIPE_THRESHOLD: f32 = 100.0;

/// Input that can start a note-to-folder move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    LongPress,
    /// Horizontal swipe; positive `dx` is rightward.
    Swipe { dx: f32 },
}

impl DragGesture {
    fn starts_drag(self) -> bool {
        match self {
            Self::LongPress => true,
            Self::Swipe { dx } => dx >= DRAG_SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderMenuState {
    #[default]
    Idle,
    FolderPanelOpen,
    NoteDragPending { note_id: NoteId },
}

/// Folder panel interaction model owned by the presentation layer.
#[derive(Debug, Default)]
pub struct FolderMenu {
    state: FolderMenuState,
}

impl FolderMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FolderMenuState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != FolderMenuState::Idle
    }

    /// Note waiting to be dropped, if any.
    pub fn pending_note(&self) -> Option<&str> {
        match &self.state {
            FolderMenuState::NoteDragPending { note_id } => Some(note_id),
            _ => None,
        }
    }

    /// Opens the folder panel from `Idle`; other states are kept.
    pub fn open_panel(&mut self) {
        if self.state == FolderMenuState::Idle {
            self.state = FolderMenuState::FolderPanelOpen;
        }
    }

    /// Starts (or replaces) a pending drag for `note_id`.
    ///
    /// Opens the panel when needed. Returns `false` and leaves the state
    /// alone for swipes that are leftward or shorter than
    /// `DRAG_SWIPE_THRESHOLD`.
    pub fn begin_drag(&mut self, note_id: impl Into<NoteId>, gesture: DragGesture) -> bool {
        if !gesture.starts_drag() {
            debug!("event=note_drag module=service status=ignored reason=below_threshold");
            return false;
        }
        let note_id = note_id.into();
        info!("event=note_drag module=service status=pending note_id={note_id}");
        self.state = FolderMenuState::NoteDragPending { note_id };
        true
    }

    /// Drops the pending candidate without moving it; the panel stays open.
    pub fn cancel_drag(&mut self) {
        if matches!(self.state, FolderMenuState::NoteDragPending { .. }) {
            self.state = FolderMenuState::FolderPanelOpen;
        }
    }

    /// Backs out one level: a pending drag is cancelled, an open panel
    /// closes.
    pub fn dismiss(&mut self) {
        self.state = match self.state {
            FolderMenuState::NoteDragPending { .. } => FolderMenuState::FolderPanelOpen,
            FolderMenuState::FolderPanelOpen | FolderMenuState::Idle => FolderMenuState::Idle,
        };
    }

    /// Drops the pending note on `target_folder_id` (`None` ⇒ "All Notes",
    /// i.e. unfiled) and closes the panel.
    ///
    /// Returns `Ok(None)` when no drag is pending. On a store failure the
    /// drag stays pending so the drop can be retried.
    pub fn drop_on<S: KeyValueStore>(
        &mut self,
        organizer: &mut Organizer<S>,
        target_folder_id: Option<&str>,
    ) -> RepoResult<Option<OrganizerSnapshot>> {
        let FolderMenuState::NoteDragPending { note_id } = &self.state else {
            return Ok(None);
        };
        let snapshot = organizer.move_note(note_id, target_folder_id)?;
        self.state = FolderMenuState::Idle;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::{DragGesture, FolderMenu, FolderMenuState, DRAG_SWIPE_THRESHOLD};

    #[test]
    fn open_then_dismiss_returns_to_idle() {
        let mut menu = FolderMenu::new();
        menu.open_panel();
        assert_eq!(menu.state(), &FolderMenuState::FolderPanelOpen);
        menu.dismiss();
        assert_eq!(menu.state(), &FolderMenuState::Idle);
    }

    #[test]
    fn short_or_leftward_swipes_do_not_start_a_drag() {
        let mut menu = FolderMenu::new();
        menu.open_panel();
        assert!(!menu.begin_drag("n1", DragGesture::Swipe { dx: DRAG_SWIPE_THRESHOLD - 1.0 }));
        assert!(!menu.begin_drag("n1", DragGesture::Swipe { dx: -300.0 }));
        assert_eq!(menu.state(), &FolderMenuState::FolderPanelOpen);

        assert!(menu.begin_drag("n1", DragGesture::Swipe { dx: DRAG_SWIPE_THRESHOLD }));
        assert_eq!(menu.pending_note(), Some("n1"));
    }

    #[test]
    fn new_drag_replaces_pending_candidate() {
        let mut menu = FolderMenu::new();
        menu.begin_drag("first", DragGesture::LongPress);
        menu.begin_drag("second", DragGesture::LongPress);
        assert_eq!(menu.pending_note(), Some("second"));
    }

    #[test]
    fn cancel_and_dismiss_fall_back_to_open_panel() {
        let mut menu = FolderMenu::new();
        menu.begin_drag("n1", DragGesture::LongPress);
        menu.cancel_drag();
        assert_eq!(menu.state(), &FolderMenuState::FolderPanelOpen);

        menu.begin_drag("n1", DragGesture::LongPress);
        menu.dismiss();
        assert_eq!(menu.state(), &FolderMenuState::FolderPanelOpen);
        assert!(menu.is_open());
    }
}
