use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::booking::StopLeg;

/// A draft field guarded by the edit-tracking state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    /// The booking's base price.
    BasePrice,
    /// The time-window surcharge.
    NightSurcharge,
    /// The price of one stop slot, addressed by leg and position.
    StopPrice(StopLeg, usize),
}

/// State of a guarded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// Eligible for silent recomputation.
    Auto,
    /// Locked by a direct user edit; recomputation is suppressed.
    Manual,
}

/// Records which guarded fields a user has directly edited.
///
/// Fields start in [`FieldState::Auto`]. A direct edit through an input
/// control moves a field to [`FieldState::Manual`]; an identity change
/// resets the whole set, and vacating a stop slot resets that slot only,
/// recycling it for its next occupant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTracking {
    manual: HashSet<TrackedField>,
}

impl EditTracking {
    /// Create a tracking set with every field in its auto state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a guarded field.
    pub fn state(&self, field: TrackedField) -> FieldState {
        if self.manual.contains(&field) {
            FieldState::Manual
        } else {
            FieldState::Auto
        }
    }

    /// Whether a guarded field is locked by a direct edit.
    pub fn is_manual(&self, field: TrackedField) -> bool {
        self.manual.contains(&field)
    }

    /// Lock a field after a direct user edit.
    pub fn mark_manual(&mut self, field: TrackedField) {
        self.manual.insert(field);
    }

    /// Return a single field to its auto state.
    pub fn reset(&mut self, field: TrackedField) {
        self.manual.remove(&field);
    }

    /// Return every field to its auto state (identity change).
    pub fn reset_all(&mut self) {
        self.manual.clear();
    }

    /// Whether any field is currently locked.
    pub fn has_manual_fields(&self) -> bool {
        !self.manual.is_empty()
    }
}
