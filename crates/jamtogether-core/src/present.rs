//! Presentation model: map markers, result cards, share text and user-facing copy.
//!
//! Nothing here draws anything. The front end turns these values into
//! whatever it renders, so the rules about which rooms appear and how they
//! are labelled live in one place.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::RoomAvailability;
use crate::catalog::Studio;

pub const NO_STUDIO_SELECTED: &str = "⚠️ 최소 1개 이상의 합주실을 선택해주세요!";
pub const NO_MATCHES: &str = "😭 조건에 맞는 방이 없어요! 시간이나 날짜를 변경해보세요.";
pub const SERVER_FAILURE: &str = "서버 통신 실패! 백엔드를 확인해주세요.";
pub const SHARE_COPIED: &str = "📋 텍스트 복사 완료! 합주실을 공유하세요.";
pub const PRICE_ON_REQUEST: &str = "가격 별도 문의";

/// Rotated every loading interval while a search is in flight.
pub const LOADING_MESSAGES: &[&str] = &[
    "탐색 중... 합주실 예약 현황을 스캔하고 있어요 ⏳",
    "빈 방을 하나씩 확인하는 중이에요 🎸",
    "조금만 기다려 주세요, 거의 다 왔어요 🥁",
    "예약 가능한 시간을 맞춰보는 중 🎹",
];

pub const FAQ: &[(&str, &str)] = &[
    (
        "Q. 잼투게더는 무엇인가요?",
        "합주실 예약 현황을 실시간으로 스캔해서, 원하는 시간에 딱 맞는 빈 방을 찾아주는 서비스입니다.",
    ),
    (
        "Q. '확인 불가'는 무슨 뜻인가요?",
        "합주실 예약 페이지가 제때 응답하지 않아 빈 방 여부를 확인하지 못한 경우입니다. 잠시 후 다시 검색해보세요.",
    ),
    (
        "Q. 예약도 여기서 되나요?",
        "아니요. 결과의 예약 링크를 누르면 해당 합주실의 예약 페이지로 이동합니다.",
    ),
];

/// Warning shown when every checked studio came back unresolved.
#[must_use]
pub fn unresolved_warning(studios: &[String]) -> String {
    format!(
        "⚠️ 일부 합주실의 예약 현황을 확인하지 못했어요: {}. 잠시 후 다시 시도해주세요.",
        studios.join(", ")
    )
}

/// Inline banner above a non-empty result list.
#[must_use]
pub fn unresolved_banner(studios: &[String]) -> String {
    format!("ℹ️ 확인 불가: {} (결과에서 제외됨)", studios.join(", "))
}

#[must_use]
pub fn result_header(count: usize) -> String {
    format!("🎉 검색 결과 {count}개")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Browse mode: every listed studio.
    Neutral,
    /// Result mode: a room with an open slot.
    Available,
    /// Result mode: a room whose studio prefix also appears among the
    /// unresolved studios of the same search.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub title: String,
    pub lat: f64,
    pub lon: f64,
    pub link: String,
    pub time_range: Option<String>,
    pub style: MarkerStyle,
}

/// One neutral marker per listed studio, linking to its booking page.
#[must_use]
pub fn browse_markers(studios: &[Studio]) -> Vec<Marker> {
    studios
        .iter()
        .map(|s| Marker {
            title: s.name.clone(),
            lat: s.lat,
            lon: s.lon,
            link: s.url.clone(),
            time_range: None,
            style: MarkerStyle::Neutral,
        })
        .collect()
}

/// Markers for the current result set. Rooms without coordinates are left
/// off the map but still appear in the list.
#[must_use]
pub fn result_markers(rooms: &[RoomAvailability], unresolved: &[String]) -> Vec<Marker> {
    rooms
        .iter()
        .filter_map(|room| {
            let (lat, lon) = room.coordinates()?;
            let flagged = room
                .studio_prefix()
                .is_some_and(|p| unresolved.iter().any(|u| u == p));
            Some(Marker {
                title: room.room_name.clone(),
                lat,
                lon,
                link: room.booking_url.clone(),
                time_range: Some(room.time_range.clone()),
                style: if flagged {
                    MarkerStyle::Unresolved
                } else {
                    MarkerStyle::Available
                },
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub room_name: String,
    pub time_range: String,
    pub booking_url: String,
    pub area: &'static str,
    pub price: String,
    pub map_link: Option<String>,
}

impl ResultCard {
    #[must_use]
    pub fn from_room(room: &RoomAvailability) -> Self {
        Self {
            room_name: room.room_name.clone(),
            time_range: room.time_range.clone(),
            booking_url: room.booking_url.clone(),
            area: infer_area(&room.room_name),
            price: room
                .price
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| PRICE_ON_REQUEST.to_string()),
            map_link: room.coordinates().map(|(lat, lon)| naver_map_link(lat, lon)),
        }
    }
}

/// Neighbourhood label guessed from the room name. The backend does not
/// send region text per room.
#[must_use]
pub fn infer_area(room_name: &str) -> &'static str {
    const AREAS: &[(&str, &str)] = &[
        ("홍대", "홍대입구역 부근"),
        ("합정", "합정역 부근"),
        ("신촌", "신촌역 부근"),
        ("망원", "망원역 부근"),
        ("연남", "연남동"),
        ("상수", "상수역 부근"),
    ];
    AREAS
        .iter()
        .find(|(needle, _)| room_name.contains(*needle))
        .map_or("서울 마포/서대문", |&(_, label)| label)
}

#[must_use]
pub fn naver_map_link(lat: f64, lon: f64) -> String {
    format!("https://map.naver.com/v5/?c={lon},{lat},15,0,0,0,dh")
}

/// Text copied by the share action.
#[must_use]
pub fn share_text(date: NaiveDate, room: &RoomAvailability) -> String {
    format!(
        "🎸 [잼투게더] {} {} 예약 가능!\n⏰ 시간: {}\n🔗 예약하기: {}",
        date.format("%Y-%m-%d"),
        room.room_name,
        room.time_range,
        room.booking_url
    )
}
