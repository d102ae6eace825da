//! Room availability results and the three-way search outcome.

use serde::{Deserialize, Serialize};

/// Time-range text the backend sends when it could not determine a room's
/// booking status.
pub const UNRESOLVED_SENTINEL: &str = "확인 불가";

/// One room returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub room_name: String,
    pub time_range: String,
    pub booking_url: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub price: Option<String>,
}

impl RoomAvailability {
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.time_range.trim() == UNRESOLVED_SENTINEL
    }

    /// `(lat, lon)` when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    /// First whitespace-delimited token of the room name, used to name the
    /// studio in user-facing messages.
    #[must_use]
    pub fn studio_prefix(&self) -> Option<&str> {
        self.room_name.split_whitespace().next()
    }
}

/// Deduplicated studio prefixes of `rooms`, in first-seen order.
#[must_use]
pub fn unresolved_prefixes(rooms: &[RoomAvailability]) -> Vec<String> {
    let mut prefixes: Vec<String> = Vec::new();
    for prefix in rooms.iter().filter_map(RoomAvailability::studio_prefix) {
        if !prefixes.iter().any(|p| p == prefix) {
            prefixes.push(prefix.to_string());
        }
    }
    prefixes
}

/// What a completed search means for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Nothing valid and nothing unresolved.
    NoMatches,
    /// Nothing valid, but some studios could not be checked.
    AllUnresolved { studios: Vec<String> },
    /// At least one valid room. `unresolved` may be empty.
    Found {
        rooms: Vec<RoomAvailability>,
        unresolved: Vec<String>,
    },
}

impl SearchOutcome {
    /// Partition `rooms` into valid and unresolved entries and pick the branch.
    #[must_use]
    pub fn classify(rooms: Vec<RoomAvailability>) -> Self {
        let (unresolved, valid): (Vec<_>, Vec<_>) =
            rooms.into_iter().partition(RoomAvailability::is_unresolved);
        let unresolved = unresolved_prefixes(&unresolved);

        match (valid.is_empty(), unresolved.is_empty()) {
            (true, true) => SearchOutcome::NoMatches,
            (true, false) => SearchOutcome::AllUnresolved {
                studios: unresolved,
            },
            (false, _) => SearchOutcome::Found {
                rooms: valid,
                unresolved,
            },
        }
    }

    #[must_use]
    pub fn rooms(&self) -> &[RoomAvailability] {
        match self {
            SearchOutcome::Found { rooms, .. } => rooms,
            _ => &[],
        }
    }

    #[must_use]
    pub fn unresolved(&self) -> &[String] {
        match self {
            SearchOutcome::NoMatches => &[],
            SearchOutcome::AllUnresolved { studios } => studios,
            SearchOutcome::Found { unresolved, .. } => unresolved,
        }
    }
}
