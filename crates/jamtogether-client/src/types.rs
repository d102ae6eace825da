//! Search backend response types.
//!
//! The backend is a thin scraper service with Korean field names. Older
//! builds spelled two of them with spaces, so both spellings are accepted.

use serde::Deserialize;

/// `GET /all-studios` → `{ "studios": [ ... ] }`.
///
/// Entries are kept as raw JSON so that one malformed studio does not sink
/// the whole listing; see [`crate::JamClient::all_studios`].
#[derive(Debug, Deserialize)]
pub struct AllStudiosResponse {
    #[serde(default)]
    pub studios: Vec<serde_json::Value>,
}

/// `GET /search` → `{ "results": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RoomAvailabilityRaw>,
}

/// One room as the backend reports it.
///
/// Both spellings can arrive on the same entry, so each is its own field;
/// [`crate::normalize_room`] prefers the spaced one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomAvailabilityRaw {
    #[serde(rename = "합주실", default)]
    pub room_name: Option<String>,
    #[serde(rename = "합주실 이름", default)]
    pub room_name_spaced: Option<String>,
    /// `"HH:MM-HH:MM"`, or `"확인 불가"` when the scanner gave up on the room.
    #[serde(rename = "예약가능시간", default)]
    pub time_range: Option<String>,
    #[serde(rename = "예약 가능 시간", default)]
    pub time_range_spaced: Option<String>,
    #[serde(rename = "예약링크", default)]
    pub booking_url: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(rename = "가격", default)]
    pub price: Option<String>,
}
