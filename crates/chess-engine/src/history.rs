//! Linear game history with a movable cursor.
//!
//! The history keeps one snapshot per ply, starting with the initial
//! position, and one move record per transition. The cursor selects the
//! current snapshot; moving it never discards anything, but committing a
//! new move while the cursor is behind the end drops everything after it.

use crate::error::HistoryError;
use crate::position::RepetitionKey;
use crate::rules::GameResult;
use crate::Position;
use chess_core::MoveRecord;

/// Complete game state at one ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub position: Position,
    /// Set once the game has ended in this position.
    pub result: Option<GameResult>,
}

/// Snapshots and move records, with a cursor into them.
///
/// Invariant: `snapshots.len() == records.len() + 1`, and `pointer` indexes
/// into `snapshots`. `records[i]` leads from `snapshots[i]` to
/// `snapshots[i + 1]`.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    records: Vec<MoveRecord>,
    pointer: usize,
}

impl History {
    /// Creates a history holding only the initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        History {
            snapshots: vec![initial],
            records: Vec::new(),
            pointer: 0,
        }
    }

    /// Returns the snapshot under the cursor.
    #[inline]
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.pointer]
    }

    /// Returns the cursor, which is also the number of plies played to
    /// reach the current snapshot.
    #[inline]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Returns the number of stored plies, including any ahead of the cursor.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no moves have been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a ply after the cursor, discarding any undone plies first.
    pub fn push(&mut self, record: MoveRecord, snapshot: Snapshot) {
        self.snapshots.truncate(self.pointer + 1);
        self.records.truncate(self.pointer);
        self.records.push(record);
        self.snapshots.push(snapshot);
        self.pointer += 1;
    }

    /// Steps the cursor back one ply.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        if self.pointer == 0 {
            return Err(HistoryError::AtStart);
        }
        self.pointer -= 1;
        Ok(())
    }

    /// Steps the cursor forward one ply.
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        if self.pointer == self.records.len() {
            return Err(HistoryError::AtEnd);
        }
        self.pointer += 1;
        Ok(())
    }

    /// Moves the cursor to an absolute ply.
    pub fn goto(&mut self, ply: usize) -> Result<(), HistoryError> {
        let last = self.records.len();
        if ply > last {
            return Err(HistoryError::PlyOutOfRange { ply, last });
        }
        self.pointer = ply;
        Ok(())
    }

    /// Moves the cursor to the initial snapshot.
    pub fn goto_start(&mut self) {
        self.pointer = 0;
    }

    /// Moves the cursor to the last stored snapshot.
    pub fn goto_end(&mut self) {
        self.pointer = self.records.len();
    }

    /// Returns the record of the move that led to the current snapshot.
    pub fn last_record(&self) -> Option<&MoveRecord> {
        self.pointer.checked_sub(1).map(|i| &self.records[i])
    }

    /// Iterates the plies up to the cursor as (position before, record).
    pub fn plies(&self) -> impl Iterator<Item = (&Position, &MoveRecord)> {
        self.snapshots[..self.pointer]
            .iter()
            .map(|s| &s.position)
            .zip(&self.records[..self.pointer])
    }

    /// Counts snapshots up to and including the cursor whose position
    /// matches `key`.
    pub fn repetitions(&self, key: &RepetitionKey) -> usize {
        self.snapshots[..=self.pointer]
            .iter()
            .filter(|s| &s.position.repetition_key() == key)
            .count()
    }
}
