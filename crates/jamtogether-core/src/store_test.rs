use super::*;
use crate::availability::UNRESOLVED_SENTINEL;

const CATALOG: &str = r#"
regions:
  - name: "홍대입구역 근처"
    studios: ["그라운드합주실 본점", "호랑이합주실"]
  - name: "신촌/이대"
    studios: ["그라운드합주실 신촌1호점"]
studios:
  - name: "그라운드합주실 본점"
    rooms:
      - { name: "그라운드 본점 A1룸", url: "https://x/a1", lat: 37.5561, lon: 126.9234 }
  - name: "호랑이합주실"
    rooms:
      - { name: "호랑이 1", url: "https://x/t1", lat: 37.5575, lon: 126.9255 }
  - name: "그라운드합주실 신촌1호점"
    rooms:
      - { name: "그라운드 신촌1호점 S룸", url: "https://x/s", lat: 37.556237, lon: 126.940985 }
"#;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 22).unwrap()
}

fn store() -> Store {
    Store::new(Catalog::from_yaml_str(CATALOG).unwrap(), Filter::new(date()))
}

fn room(name: &str, time: &str, coords: Option<(f64, f64)>) -> RoomAvailability {
    RoomAvailability {
        room_name: name.to_string(),
        time_range: time.to_string(),
        booking_url: "https://x".to_string(),
        lat: coords.map(|c| c.0),
        lon: coords.map(|c| c.1),
        price: None,
    }
}

/// Selects one studio and submits, returning the issued ticket.
fn submit(store: &mut Store) -> SearchTicket {
    if store.filter().selection.is_empty() {
        let _ = store.dispatch(Action::ToggleStudio("그라운드합주실 본점".to_string()));
    }
    match store.dispatch(Action::SubmitSearch) {
        Effect::Search { ticket, .. } => ticket,
        Effect::None => panic!("expected a search effect"),
    }
}

fn complete(store: &mut Store, ticket: SearchTicket, rooms: Vec<RoomAvailability>) {
    let _ = store.dispatch(Action::SearchSucceeded {
        ticket,
        outcome: SearchOutcome::classify(rooms),
    });
}

#[test]
fn starts_with_search_sheet_open() {
    let s = store();
    assert_eq!(s.mode(), UiMode::SearchOpen);
    assert!(!s.result_sheet_visible());
    assert_eq!(s.map_center(), DEFAULT_MAP_CENTER);
}

#[test]
fn submit_without_selection_sets_validation_error_and_no_effect() {
    let mut s = store();
    let effect = s.dispatch(Action::SubmitSearch);
    assert_eq!(effect, Effect::None);
    assert_eq!(
        s.notice(),
        Some(&Notice::Error(present::NO_STUDIO_SELECTED.to_string()))
    );
    assert!(!s.is_loading());
}

#[test]
fn invalid_submit_cancels_pending_search_and_reopens_sheet() {
    let mut s = store();
    let ticket = submit(&mut s);
    let _ = s.dispatch(Action::DismissSearch);
    let _ = s.dispatch(Action::ToggleStudio("그라운드합주실 본점".to_string()));
    assert!(s.filter().selection.is_empty());

    let effect = s.dispatch(Action::SubmitSearch);
    assert_eq!(effect, Effect::None);
    assert!(!s.is_loading());
    assert!(s.loading_message().is_none());
    assert_eq!(s.mode(), UiMode::SearchOpen);
    assert_eq!(
        s.notice().map(Notice::text),
        Some(present::NO_STUDIO_SELECTED)
    );

    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);
    assert!(!s.is_searched());
    assert!(s.rooms().is_empty());
}

#[test]
fn submit_carries_filter_snapshot() {
    let mut s = store();
    let _ = s.dispatch(Action::ToggleStudio("호랑이합주실".to_string()));
    let _ = s.dispatch(Action::Increment(HourField::MinDuration));
    match s.dispatch(Action::SubmitSearch) {
        Effect::Search { filter, .. } => {
            assert_eq!(filter.min_hours, 3);
            assert!(filter.selection.contains("호랑이합주실"));
        }
        Effect::None => panic!("expected search"),
    }
    assert!(s.is_loading());
    assert!(s.loading_message().is_some());
}

#[test]
fn studios_loaded_selects_every_region_studio() {
    let mut s = store();
    let _ = s.dispatch(Action::StudiosLoaded(vec![Studio {
        name: "호랑이합주실".to_string(),
        url: "https://booking".to_string(),
        lat: 37.5575,
        lon: 126.9255,
    }]));
    assert_eq!(s.filter().selection.len(), 3);
    assert_eq!(s.markers().len(), 1);
    assert_eq!(s.markers()[0].style, present::MarkerStyle::Neutral);
}

#[test]
fn studios_load_failure_leaves_nothing_to_browse() {
    let mut s = store();
    let _ = s.dispatch(Action::StudiosLoadFailed);
    assert!(s.studios().is_empty());
    assert!(s.markers().is_empty());
    assert!(s.filter().selection.is_empty());
}

#[test]
fn single_valid_room_shows_sheet_and_recenters() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(
        &mut s,
        ticket,
        vec![room("그라운드 본점 A1룸", "18:00-20:00", Some((37.55, 126.92)))],
    );

    assert_eq!(s.mode(), UiMode::ResultsShown);
    assert!(s.result_sheet_visible());
    assert_eq!(s.cards().len(), 1);
    assert_eq!(s.cards()[0].room_name, "그라운드 본점 A1룸");
    assert_eq!(s.map_center(), (37.55, 126.92));
    assert!(s.banner().is_none());
    assert!(!s.is_loading());
}

#[test]
fn found_without_coordinates_keeps_map_center() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "16:00-18:00", None)]);
    assert_eq!(s.map_center(), DEFAULT_MAP_CENTER);
    assert_eq!(s.cards().len(), 1);
    assert!(s.markers().is_empty());
}

#[test]
fn empty_response_reports_no_matches_without_sheet() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![]);

    assert_eq!(s.mode(), UiMode::SearchOpen);
    assert!(!s.result_sheet_visible());
    assert_eq!(
        s.notice(),
        Some(&Notice::Error(present::NO_MATCHES.to_string()))
    );
}

#[test]
fn all_unresolved_warns_with_prefixes_and_hides_sheet() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("A B룸", UNRESOLVED_SENTINEL, None)]);

    assert!(!s.result_sheet_visible());
    assert!(s.cards().is_empty());
    match s.notice() {
        Some(Notice::Warning(text)) => assert!(text.contains('A'), "{text}"),
        other => panic!("expected warning, got {other:?}"),
    }
}

#[test]
fn partial_unresolved_shows_results_with_banner() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(
        &mut s,
        ticket,
        vec![
            room("호랑이 1", "18:00-20:00", Some((37.5575, 126.9255))),
            room("제시뮤직 홍대점 R룸", UNRESOLVED_SENTINEL, None),
        ],
    );

    assert_eq!(s.rooms().len(), 1);
    assert_eq!(s.unresolved(), ["제시뮤직".to_string()]);
    assert!(s.banner().is_some_and(|b| b.contains("제시뮤직")));
    assert!(s.notice().is_none());
}

#[test]
fn stale_completion_is_discarded() {
    let mut s = store();
    let first = submit(&mut s);
    let second = submit(&mut s);
    assert!(second > first);

    complete(&mut s, first, vec![room("호랑이 1", "10:00-12:00", None)]);
    assert!(s.rooms().is_empty());
    assert!(s.is_loading());

    complete(&mut s, second, vec![room("그라운드 본점 A1룸", "18:00-20:00", None)]);
    assert_eq!(s.rooms()[0].room_name, "그라운드 본점 A1룸");
    assert!(!s.is_loading());
}

#[test]
fn duplicate_completion_for_same_ticket_is_ignored() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);
    complete(&mut s, ticket, vec![]);
    assert_eq!(s.rooms().len(), 1);
    assert!(s.notice().is_none());
}

#[test]
fn failure_shows_generic_error_and_keeps_previous_results() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);

    let _ = s.dispatch(Action::OpenSearch);
    let ticket = submit(&mut s);
    let _ = s.dispatch(Action::SearchFailed { ticket });

    assert_eq!(
        s.notice(),
        Some(&Notice::Error(present::SERVER_FAILURE.to_string()))
    );
    assert_eq!(s.rooms().len(), 1);
    assert_eq!(s.mode(), UiMode::SearchOpen);
}

#[test]
fn reset_drops_results_and_cancels_pending_search() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);

    let pending = submit(&mut s);
    let _ = s.dispatch(Action::Reset);
    assert_eq!(s.mode(), UiMode::SearchOpen);
    assert!(s.rooms().is_empty());
    assert!(!s.is_searched());
    assert!(!s.is_loading());

    complete(&mut s, pending, vec![room("호랑이 1", "10:00-12:00", None)]);
    assert!(s.rooms().is_empty());
}

#[test]
fn dismiss_and_reopen_search() {
    let mut s = store();
    let _ = s.dispatch(Action::DismissSearch);
    assert_eq!(s.mode(), UiMode::Browsing);
    let _ = s.dispatch(Action::OpenSearch);
    assert_eq!(s.mode(), UiMode::SearchOpen);
}

#[test]
fn change_conditions_from_results_reopens_search() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);
    assert_eq!(s.mode(), UiMode::ResultsShown);

    let _ = s.dispatch(Action::OpenSearch);
    assert_eq!(s.mode(), UiMode::SearchOpen);
    assert!(!s.result_sheet_visible());

    let _ = s.dispatch(Action::DismissSearch);
    assert_eq!(s.mode(), UiMode::ResultsShown);
}

#[test]
fn faq_returns_to_previous_mode() {
    let mut s = store();
    let _ = s.dispatch(Action::DismissSearch);
    let _ = s.dispatch(Action::OpenFaq);
    assert_eq!(s.mode(), UiMode::FaqOpen);
    let _ = s.dispatch(Action::CloseFaq);
    assert_eq!(s.mode(), UiMode::Browsing);

    let _ = s.dispatch(Action::OpenSearch);
    let _ = s.dispatch(Action::OpenFaq);
    let _ = s.dispatch(Action::CloseFaq);
    assert_eq!(s.mode(), UiMode::SearchOpen);
}

#[test]
fn faq_blocks_interaction_but_not_completions() {
    let mut s = store();
    let ticket = submit(&mut s);
    let _ = s.dispatch(Action::OpenFaq);

    let _ = s.dispatch(Action::ToggleStudio("호랑이합주실".to_string()));
    assert!(!s.filter().selection.contains("호랑이합주실"));
    assert_eq!(s.dispatch(Action::SubmitSearch), Effect::None);

    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);
    assert_eq!(s.mode(), UiMode::FaqOpen);
    let _ = s.dispatch(Action::CloseFaq);
    assert_eq!(s.mode(), UiMode::ResultsShown);
}

#[test]
fn region_toggle_round_trip_through_store() {
    let mut s = store();
    let _ = s.dispatch(Action::ToggleAll);
    let full = s.filter().selection.clone();

    let _ = s.dispatch(Action::ToggleRegion("홍대입구역 근처".to_string()));
    assert_eq!(s.filter().selection.len(), 1);
    let _ = s.dispatch(Action::ToggleRegion("홍대입구역 근처".to_string()));
    assert_eq!(s.filter().selection, full);

    let _ = s.dispatch(Action::ToggleRegion("없는 지역".to_string()));
    assert_eq!(s.filter().selection, full);
}

#[test]
fn toggle_all_policy_is_configurable() {
    let mut s = store().with_toggle_all_policy(ToggleAllPolicy::ClearIfAll);
    let _ = s.dispatch(Action::ToggleStudio("호랑이합주실".to_string()));
    let _ = s.dispatch(Action::ToggleAll);
    assert_eq!(s.filter().selection.len(), 3);
    let _ = s.dispatch(Action::ToggleAll);
    assert!(s.filter().selection.is_empty());
}

#[test]
fn region_accordion_toggles() {
    let mut s = store();
    assert!(!s.is_region_expanded("신촌/이대"));
    let _ = s.dispatch(Action::ToggleRegionExpanded("신촌/이대".to_string()));
    assert!(s.is_region_expanded("신촌/이대"));
    let _ = s.dispatch(Action::ToggleRegionExpanded("신촌/이대".to_string()));
    assert!(!s.is_region_expanded("신촌/이대"));
}

fn store_with_results_on_touch(viewport: f64) -> Store {
    let mut s = store();
    let _ = s.dispatch(Action::SetLayout(SheetLayout::Touch {
        viewport_height_px: viewport,
    }));
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);
    s
}

#[test]
fn drag_previews_then_commits_on_release() {
    let mut s = store_with_results_on_touch(1000.0);
    let _ = s.dispatch(Action::DragStart { y_px: 700.0 });
    let _ = s.dispatch(Action::DragMove { y_px: 500.0 });
    match s.sheet_height() {
        SheetHeight::Percent(p) => assert!((p - 55.0).abs() < 1e-9, "{p}"),
        SheetHeight::Auto => panic!("touch layout should report a percentage"),
    }
    assert!(s.is_dragging());
    assert!((s.committed_sheet_percent() - SHEET_DEFAULT_PERCENT).abs() < f64::EPSILON);

    let _ = s.dispatch(Action::DragEnd);
    assert!(!s.is_dragging());
    assert!((s.committed_sheet_percent() - 55.0).abs() < 1e-9);
}

#[test]
fn drag_is_clamped_to_sheet_bounds() {
    let mut s = store_with_results_on_touch(1000.0);
    let _ = s.dispatch(Action::DragStart { y_px: 900.0 });
    let _ = s.dispatch(Action::DragMove { y_px: -5000.0 });
    let _ = s.dispatch(Action::DragEnd);
    assert!((s.committed_sheet_percent() - SHEET_MAX_PERCENT).abs() < f64::EPSILON);

    let _ = s.dispatch(Action::DragStart { y_px: 100.0 });
    let _ = s.dispatch(Action::DragMove { y_px: 5000.0 });
    let _ = s.dispatch(Action::DragMove { y_px: f64::NAN });
    let _ = s.dispatch(Action::DragEnd);
    assert!((s.committed_sheet_percent() - SHEET_MIN_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn non_finite_viewport_never_commits_out_of_bounds() {
    let mut s = store_with_results_on_touch(f64::NAN);
    let _ = s.dispatch(Action::DragStart { y_px: 500.0 });
    let _ = s.dispatch(Action::DragMove { y_px: 400.0 });
    let _ = s.dispatch(Action::DragEnd);
    let p = s.committed_sheet_percent();
    assert!((SHEET_MIN_PERCENT..=SHEET_MAX_PERCENT).contains(&p), "{p}");

    let mut s = store_with_results_on_touch(f64::INFINITY);
    let _ = s.dispatch(Action::DragStart { y_px: 500.0 });
    let _ = s.dispatch(Action::DragMove { y_px: 400.0 });
    let _ = s.dispatch(Action::DragEnd);
    assert!((s.committed_sheet_percent() - SHEET_DEFAULT_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn wide_layout_ignores_drag() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);

    let _ = s.dispatch(Action::DragStart { y_px: 700.0 });
    let _ = s.dispatch(Action::DragMove { y_px: 100.0 });
    let _ = s.dispatch(Action::DragEnd);
    assert_eq!(s.sheet_height(), SheetHeight::Auto);
    assert!((s.committed_sheet_percent() - SHEET_DEFAULT_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn loading_tick_cycles_only_while_loading() {
    let mut s = store();
    let _ = s.dispatch(Action::LoadingTick);
    assert!(s.loading_message().is_none());

    let _ticket = submit(&mut s);
    let first = s.loading_message();
    for _ in 0..present::LOADING_MESSAGES.len() {
        let _ = s.dispatch(Action::LoadingTick);
    }
    assert_eq!(s.loading_message(), first);
    let _ = s.dispatch(Action::LoadingTick);
    assert_ne!(s.loading_message(), first);
}

#[test]
fn share_text_and_toast() {
    let mut s = store();
    let ticket = submit(&mut s);
    complete(&mut s, ticket, vec![room("호랑이 1", "10:00-12:00", None)]);

    let text = s.share_text(0).unwrap();
    assert!(text.starts_with("🎸 [잼투게더] 2026-02-22 호랑이 1"));
    assert!(s.share_text(1).is_none());

    let _ = s.dispatch(Action::ShareCopied);
    assert_eq!(s.toast(), Some(present::SHARE_COPIED));
    let _ = s.dispatch(Action::DismissToast);
    assert!(s.toast().is_none());
}

#[test]
fn result_markers_after_search_replace_browse_markers() {
    let mut s = store();
    let _ = s.dispatch(Action::StudiosLoaded(vec![Studio {
        name: "호랑이합주실".to_string(),
        url: "https://booking".to_string(),
        lat: 37.5575,
        lon: 126.9255,
    }]));
    let ticket = submit(&mut s);
    complete(
        &mut s,
        ticket,
        vec![room("그라운드 본점 A1룸", "18:00-20:00", Some((37.55, 126.92)))],
    );
    let markers = s.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].style, present::MarkerStyle::Available);
}
