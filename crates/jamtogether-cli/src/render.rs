//! Terminal output for every command.
//!
//! Each `format_*` function builds the full text so tests can assert on it;
//! the `print_*` wrappers only write it out.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use jamtogether_core::present::{self, Marker, MarkerStyle, ResultCard, FAQ};
use jamtogether_core::store::MAP_ZOOM;
use jamtogether_core::{Catalog, Store};

const UNGROUPED_HEADING: &str = "기타 (지역 미지정)";

pub(crate) fn print_catalog(catalog: &Catalog) {
    print!("{}", format_catalog(catalog));
}

pub(crate) fn print_faq() {
    print!("{}", format_faq());
}

pub(crate) fn print_browse(store: &Store) {
    print!("{}", format_browse(store));
}

pub(crate) fn print_search(store: &Store) {
    print!("{}", format_search(store));
}

pub(crate) fn print_markers_json(store: &Store) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&store.markers())?);
    Ok(())
}

pub(crate) fn print_search_json(store: &Store) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&SearchReport::from_store(store))?);
    Ok(())
}

pub(crate) fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for region in catalog.regions() {
        let _ = writeln!(out, "{} ({})", region.name, region.studios.len());
        for name in &region.studios {
            let rooms = catalog.studio(name).map_or(0, |s| s.rooms.len());
            let _ = writeln!(out, "  {name}  [{rooms} rooms]");
        }
    }

    let ungrouped: Vec<_> = catalog.ungrouped_studios().collect();
    if !ungrouped.is_empty() {
        let _ = writeln!(out, "{UNGROUPED_HEADING} ({})", ungrouped.len());
        for studio in ungrouped {
            let _ = writeln!(out, "  {}  [{} rooms]", studio.name, studio.rooms.len());
        }
    }

    let _ = writeln!(
        out,
        "\n{} studios, {} rooms",
        catalog.studios().len(),
        catalog.room_count()
    );
    out
}

pub(crate) fn format_faq() -> String {
    let mut out = String::new();
    for (question, answer) in FAQ {
        let _ = writeln!(out, "{question}\n  {answer}\n");
    }
    out
}

pub(crate) fn format_browse(store: &Store) -> String {
    let mut out = String::new();
    let markers = store.markers();
    if markers.is_empty() {
        let _ = writeln!(out, "no studios to show; the listing could not be loaded");
        return out;
    }

    write_map_summary(&mut out, store, &markers);
    for marker in &markers {
        let _ = writeln!(
            out,
            "  📍 {}  ({:.5}, {:.5})  {}",
            marker.title, marker.lat, marker.lon, marker.link
        );
    }

    let selection = &store.filter().selection;
    let _ = writeln!(out, "\n선택된 합주실:");
    for region in store.catalog().regions() {
        let _ = writeln!(out, "  {} {}", region.name, selection.region_badge(region));
    }
    out
}

pub(crate) fn format_search(store: &Store) -> String {
    let mut out = String::new();

    if let Some(notice) = store.notice() {
        let _ = writeln!(out, "{}", notice.text());
    }
    if !store.is_searched() {
        return out;
    }

    if let Some(banner) = store.banner() {
        let _ = writeln!(out, "{banner}");
    }
    let cards = store.cards();
    let _ = writeln!(out, "{}\n", present::result_header(cards.len()));
    for (i, card) in cards.iter().enumerate() {
        write_card(&mut out, i + 1, card);
    }

    write_map_summary(&mut out, store, &store.markers());
    out
}

fn write_card(out: &mut String, number: usize, card: &ResultCard) {
    let _ = writeln!(out, "[{number}] {}", card.room_name);
    let _ = writeln!(
        out,
        "    ⏰ {}  📍 {}  💰 {}",
        card.time_range, card.area, card.price
    );
    let _ = writeln!(out, "    🔗 {}", card.booking_url);
    if let Some(link) = &card.map_link {
        let _ = writeln!(out, "    🗺️ {link}");
    }
}

fn write_map_summary(out: &mut String, store: &Store, markers: &[Marker]) {
    let (lat, lon) = store.map_center();
    let flagged = markers
        .iter()
        .filter(|m| m.style == MarkerStyle::Unresolved)
        .count();
    let _ = write!(
        out,
        "지도 중심 ({lat:.5}, {lon:.5}) zoom {MAP_ZOOM} · 마커 {}개",
        markers.len()
    );
    if flagged > 0 {
        let _ = write!(out, " (확인 불가 지점 {flagged}개)");
    }
    let _ = writeln!(out);
}

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    date: NaiveDate,
    start_hour: u8,
    end_hour: u8,
    min_hours: u8,
    studios: Vec<&'a str>,
    notice: Option<&'a str>,
    banner: Option<&'a str>,
    results: Vec<ResultCard>,
    unresolved: &'a [String],
    map_center: (f64, f64),
    markers: Vec<Marker>,
}

impl<'a> SearchReport<'a> {
    fn from_store(store: &'a Store) -> Self {
        let filter = store.filter();
        Self {
            date: filter.date,
            start_hour: filter.start_hour,
            end_hour: filter.end_hour,
            min_hours: filter.min_hours,
            studios: filter.selection.iter().collect(),
            notice: store.notice().map(|n| n.text()),
            banner: store.banner(),
            results: store.cards(),
            unresolved: store.unresolved(),
            map_center: store.map_center(),
            markers: if store.is_searched() {
                store.markers()
            } else {
                Vec::new()
            },
        }
    }
}
