//! `search` command: build the filter from flags, run one search through the
//! store, and print the outcome.

use std::time::Duration;

use anyhow::Context;
use jamtogether_client::JamClient;
use jamtogether_core::present::SERVER_FAILURE;
use jamtogether_core::{Action, AppConfig, Catalog, Effect, Filter, HourField, Store};

use crate::clipboard::{copy_share_text, SystemClipboard};
use crate::render;
use crate::SearchArgs;

/// Seed a store from config defaults, then apply the command-line filter.
///
/// With no `--studio` and no `--region`, every studio that belongs to a
/// region is selected, matching what the app does once the listing loads.
///
/// # Errors
///
/// Returns an error when a named studio or region is not in the catalog.
pub(crate) fn build_store(
    catalog: Catalog,
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<Store> {
    for name in &args.studios {
        if catalog.studio(name).is_none() {
            anyhow::bail!("unknown studio '{name}'; run `jamtogether studios` to list names");
        }
    }
    for name in &args.regions {
        if catalog.region(name).is_none() {
            anyhow::bail!("unknown region '{name}'; run `jamtogether studios` to list regions");
        }
    }

    let mut store = Store::new(catalog, Filter::today());
    let actions = [
        args.date.map(Action::SetDate),
        Some(Action::SetHour(
            HourField::Start,
            args.start.unwrap_or(config.default_start_hour),
        )),
        Some(Action::SetHour(
            HourField::End,
            args.end.unwrap_or(config.default_end_hour),
        )),
        Some(Action::SetHour(
            HourField::MinDuration,
            args.min_hours.unwrap_or(config.default_min_hours),
        )),
    ];
    for action in actions.into_iter().flatten() {
        let _ = store.dispatch(action);
    }

    if args.studios.is_empty() && args.regions.is_empty() {
        let _ = store.dispatch(Action::ToggleAll);
        return Ok(store);
    }

    for name in &args.regions {
        let already = store
            .catalog()
            .region(name)
            .is_some_and(|r| store.filter().selection.is_region_fully_selected(r));
        if !already {
            let _ = store.dispatch(Action::ToggleRegion(name.clone()));
        }
    }
    for name in &args.studios {
        if !store.filter().selection.contains(name) {
            let _ = store.dispatch(Action::ToggleStudio(name.clone()));
        }
    }

    Ok(store)
}

/// Run the `search` command end to end.
///
/// # Errors
///
/// Returns an error if a studio or region name is unknown, nothing ends up
/// selected, the backend request fails, or the clipboard write fails.
pub(crate) async fn run_search(
    client: &JamClient,
    config: &AppConfig,
    catalog: Catalog,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let mut store = build_store(catalog, config, args)?;

    let filter = store.filter();
    if filter.window_is_inverted() {
        tracing::warn!(
            start = filter.start_hour,
            end = filter.end_hour,
            "start hour is not before end hour; sending as-is"
        );
    }

    let Effect::Search { ticket, filter } = store.dispatch(Action::SubmitSearch) else {
        let message = store.notice().map_or("search was not submitted", |n| n.text());
        anyhow::bail!("{message}");
    };

    let interval = Duration::from_millis(config.loading_interval_ms);
    let result = {
        let request = client.search(&filter);
        tokio::pin!(request);
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        show_loading(&store, args.json);

        loop {
            tokio::select! {
                res = &mut request => break res,
                _ = ticker.tick() => {
                    let _ = store.dispatch(Action::LoadingTick);
                    show_loading(&store, args.json);
                }
            }
        }
    };

    match result {
        Ok(outcome) => {
            let _ = store.dispatch(Action::SearchSucceeded { ticket, outcome });
        }
        Err(err) => {
            tracing::error!(error = %err, ticket = ticket.get(), "search request failed");
            let _ = store.dispatch(Action::SearchFailed { ticket });
            return Err(err).context(SERVER_FAILURE);
        }
    }

    if args.json {
        render::print_search_json(&store)?;
    } else {
        render::print_search(&store);
    }

    if let Some(n) = args.copy {
        let mut clipboard = SystemClipboard;
        copy_share_text(&mut store, n.get() - 1, &mut clipboard)?;
        if let Some(toast) = store.toast() {
            eprintln!("{toast}");
        }
    }

    Ok(())
}

fn show_loading(store: &Store, quiet: bool) {
    if quiet {
        return;
    }
    if let Some(message) = store.loading_message() {
        eprintln!("{message}");
    }
}
