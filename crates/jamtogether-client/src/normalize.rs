//! Conversion from raw backend rooms to [`jamtogether_core::RoomAvailability`].

use jamtogether_core::RoomAvailability;

use crate::types::RoomAvailabilityRaw;

const UNNAMED_ROOM: &str = "이름 없음";
const NO_TIME: &str = "-";
const NO_LINK: &str = "#";

/// Fills the display defaults for missing fields. Blank strings count as
/// missing; the spaced key spelling wins over the compact one when both are
/// set. The time text is trimmed so the unresolved sentinel compares
/// cleanly.
#[must_use]
pub fn normalize_room(raw: RoomAvailabilityRaw) -> RoomAvailability {
    let non_blank = |s: Option<String>| {
        s.map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    RoomAvailability {
        room_name: non_blank(raw.room_name_spaced)
            .or_else(|| non_blank(raw.room_name))
            .unwrap_or_else(|| UNNAMED_ROOM.to_string()),
        time_range: non_blank(raw.time_range_spaced)
            .or_else(|| non_blank(raw.time_range))
            .unwrap_or_else(|| NO_TIME.to_string()),
        booking_url: non_blank(raw.booking_url).unwrap_or_else(|| NO_LINK.to_string()),
        lat: raw.lat.filter(|v| v.is_finite()),
        lon: raw.lon.filter(|v| v.is_finite()),
        price: non_blank(raw.price),
    }
}
