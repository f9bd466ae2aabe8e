//! Board engine - legality checks, batch movement, locking and line clears
//!
//! The engine exclusively owns the [`Grid`]. Pieces are owned by the caller and
//! passed in by reference for every command; the engine only keeps their cells'
//! grid slots consistent with their coordinates.
//!
//! Every operation is synchronous and either applies completely or leaves the
//! board untouched. Rotation lives in [`crate::rotation`].

use std::collections::BTreeSet;

use tracing::{debug, error, trace, warn};

use crate::error::BoundaryError;
use crate::events::{BoardEvents, EventLog};
use crate::grid::{Grid, Slot};
use crate::piece::{Cell, Piece};
use crate::snapshot::BoardSnapshot;
use crate::types::{BoardConfig, ConfigError, Coord, Direction, OccupantId};

pub struct BoardEngine<E = EventLog> {
    grid: Grid,
    config: BoardConfig,
    events: E,
}

impl BoardEngine<EventLog> {
    /// Engine with the given dimensions, default spawn and an [`EventLog`] sink.
    pub fn with_size(width: i32, height: i32) -> Result<Self, ConfigError> {
        Self::new(BoardConfig::new(width, height), EventLog::new())
    }
}

impl<E: BoardEvents> BoardEngine<E> {
    pub fn new(config: BoardConfig, events: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.width, config.height),
            config,
            events,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    pub fn is_free(&self, c: Coord) -> bool {
        self.grid.is_free(c)
    }

    pub fn occupant_at(&self, c: Coord) -> Option<OccupantId> {
        self.grid.occupant_at(c)
    }

    /// The only public writer of grid slots.
    pub fn set_occupant(&mut self, c: Coord, slot: Option<Slot>) -> Result<(), BoundaryError> {
        self.grid.set(c, slot)
    }

    /// Internal write; every caller has already checked `is_free` for `c`, so a
    /// rejection means the engine itself is broken.
    fn write(&mut self, c: Coord, slot: Option<Slot>) {
        if let Err(err) = self.grid.set(c, slot) {
            error!(%err, "engine wrote outside the tolerated range");
            panic!("{err}");
        }
    }

    /// Move `cell` to `dest`, vacating its previous slot only if that slot still
    /// holds this cell (another cell of the batch may already have moved in).
    fn relocate(&mut self, cell: &mut Cell, dest: Coord) {
        let prev = cell.coord;
        cell.coord = dest;
        if self.grid.occupant_at(prev) == Some(cell.occupant) {
            self.write(prev, None);
        }
        self.write(
            dest,
            Some(Slot {
                occupant: cell.occupant,
                movable: cell.movable,
            }),
        );
    }

    /// Apply precomputed destinations to `cells`, index for index.
    pub(crate) fn relocate_all(&mut self, cells: &mut [Cell], dests: &[Coord]) {
        debug_assert_eq!(cells.len(), dests.len());
        for (cell, &dest) in cells.iter_mut().zip(dests) {
            self.relocate(cell, dest);
        }
    }

    /// Translate a batch of cells one step, all or nothing.
    ///
    /// Every destination is validated before any cell is touched.
    pub fn move_cells(&mut self, cells: &mut [Cell], dir: Direction) -> bool {
        let delta = dir.delta();
        if !cells.iter().all(|c| self.grid.is_free(c.coord + delta)) {
            return false;
        }
        for cell in cells.iter_mut() {
            let dest = cell.coord + delta;
            self.relocate(cell, dest);
        }
        true
    }

    pub fn move_piece(&mut self, piece: &mut Piece, dir: Direction) -> bool {
        let moved = self.move_cells(piece.cells_mut(), dir);
        trace!(piece = piece.id(), dir = dir.as_str(), moved, "move");
        moved
    }

    /// Put a freshly built piece on the board.
    ///
    /// Fails without touching the grid if any cell's coordinate is not free.
    pub fn place_piece(&mut self, piece: &mut Piece) -> bool {
        if !piece.coords().all(|c| self.grid.is_free(c)) {
            return false;
        }
        piece.set_movable(true);
        for cell in piece.cells() {
            self.write(cell.coord, Some(Slot::movable(cell.occupant)));
        }
        true
    }

    /// Fix a piece's cells into the grid and clear any rows it completed.
    ///
    /// Cells that lock in the strip above the board are not stored; their
    /// occupants are released. Returns the number of cleared rows.
    pub fn lock_piece(&mut self, piece: Piece) -> u32 {
        let piece_id = piece.id();
        let rows = piece.rows();
        for mut cell in piece.into_cells() {
            cell.movable = false;
            if self.grid.contains(cell.coord) {
                self.write(cell.coord, Some(Slot::locked(cell.occupant)));
            } else {
                debug!(piece = piece_id, coord = %cell.coord, "cell locked above the board");
                self.events.on_occupant_released(cell.occupant);
            }
        }
        debug!(piece = piece_id, "piece locked");
        self.check_lines(rows)
    }

    /// Clear every full row among `rows` and compact the board.
    ///
    /// Emits the cleared count (also when zero) before compacting.
    pub fn check_lines<I>(&mut self, rows: I) -> u32
    where
        I: IntoIterator<Item = i32>,
    {
        let cleared = self.clear_full_rows(rows);

        let count = cleared.len() as u32;
        self.events.on_line_cleared(count);
        if count > 0 {
            debug!(count, rows = ?cleared, "rows cleared");
        }

        // Highest cleared row first: each compaction then only moves rows that
        // sit above every row it has not handled yet.
        for &y in cleared.iter().rev() {
            self.shift_down(y);
        }
        count
    }

    /// Empty every full row among `rows`, releasing its occupants.
    ///
    /// Returns the emptied rows in ascending order. Nothing above them moves.
    pub(crate) fn clear_full_rows<I>(&mut self, rows: I) -> Vec<i32>
    where
        I: IntoIterator<Item = i32>,
    {
        let candidates: BTreeSet<i32> = rows.into_iter().collect();
        let mut cleared = Vec::new();
        for y in candidates {
            if !self.grid.is_row_full(y) {
                continue;
            }
            for x in 0..self.grid.width() {
                let c = Coord::new(x, y);
                if let Some(occupant) = self.grid.occupant_at(c) {
                    self.events.on_occupant_released(occupant);
                }
                self.write(c, None);
            }
            cleared.push(y);
        }
        cleared
    }

    /// Move every occupied cell above row `y` down by one row.
    pub fn shift_down(&mut self, y: i32) {
        let mut batch: Vec<Cell> = self
            .grid
            .occupied()
            .filter(|(c, _)| c.y > y)
            .map(|(c, slot)| Cell::new(c, slot.occupant))
            .collect();
        if batch.is_empty() {
            return;
        }
        // Lowest first so a lower destination is vacated before anything lands on it.
        batch.sort_by_key(|cell| cell.coord.y);

        self.mark_batch(&mut batch, true);
        if !self.move_cells(&mut batch, Direction::Down) {
            warn!(row = y, "compaction blocked; rows above left in place");
        }
        self.mark_batch(&mut batch, false);
    }

    fn mark_batch(&mut self, batch: &mut [Cell], movable: bool) {
        for cell in batch.iter_mut() {
            cell.movable = movable;
            self.write(
                cell.coord,
                Some(Slot {
                    occupant: cell.occupant,
                    movable,
                }),
            );
        }
    }

    /// Empty the board, releasing every occupant.
    pub fn clear(&mut self) {
        let occupied: Vec<(Coord, Slot)> = self.grid.occupied().collect();
        for (c, slot) in occupied {
            self.events.on_occupant_released(slot.occupant);
            self.write(c, None);
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_grid(&self.grid)
    }
}
