//! Event channel from the engine to external collaborators.
//!
//! The sink is handed to [`BoardEngine`](crate::BoardEngine) at construction.
//! Drivers that prefer polling use [`EventLog`] and drain it after each
//! command; tests usually record into a `Vec<BoardEvent>`.

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::OccupantId;

/// Notifications emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    PieceSpawned { piece: u32 },
    /// Emitted once per line check, also when nothing was cleared.
    LinesCleared { count: u32 },
    /// The visual object behind this occupant should be removed.
    OccupantReleased { occupant: OccupantId },
    GameOver,
}

/// Receiver side of the event channel.
pub trait BoardEvents {
    fn on_line_cleared(&mut self, count: u32);

    fn on_game_over(&mut self);

    fn on_occupant_released(&mut self, _occupant: OccupantId) {}

    fn on_piece_spawned(&mut self, _piece: u32) {}
}

/// Discards every event.
impl BoardEvents for () {
    fn on_line_cleared(&mut self, _count: u32) {}

    fn on_game_over(&mut self) {}
}

impl BoardEvents for Vec<BoardEvent> {
    fn on_line_cleared(&mut self, count: u32) {
        self.push(BoardEvent::LinesCleared { count });
    }

    fn on_game_over(&mut self) {
        self.push(BoardEvent::GameOver);
    }

    fn on_occupant_released(&mut self, occupant: OccupantId) {
        self.push(BoardEvent::OccupantReleased { occupant });
    }

    fn on_piece_spawned(&mut self, piece: u32) {
        self.push(BoardEvent::PieceSpawned { piece });
    }
}

impl<T: BoardEvents + ?Sized> BoardEvents for &mut T {
    fn on_line_cleared(&mut self, count: u32) {
        (**self).on_line_cleared(count);
    }

    fn on_game_over(&mut self) {
        (**self).on_game_over();
    }

    fn on_occupant_released(&mut self, occupant: OccupantId) {
        (**self).on_occupant_released(occupant);
    }

    fn on_piece_spawned(&mut self, piece: u32) {
        (**self).on_piece_spawned(piece);
    }
}

/// FIFO of pending events, drained by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    queue: VecDeque<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BoardEvent) {
        self.queue.push_back(event);
    }

    /// Take every pending event in emission order.
    pub fn drain(&mut self) -> impl Iterator<Item = BoardEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardEvent> {
        self.queue.iter()
    }
}

impl BoardEvents for EventLog {
    fn on_line_cleared(&mut self, count: u32) {
        self.push(BoardEvent::LinesCleared { count });
    }

    fn on_game_over(&mut self) {
        self.push(BoardEvent::GameOver);
    }

    fn on_occupant_released(&mut self, occupant: OccupantId) {
        self.push(BoardEvent::OccupantReleased { occupant });
    }

    fn on_piece_spawned(&mut self, piece: u32) {
        self.push(BoardEvent::PieceSpawned { piece });
    }
}
