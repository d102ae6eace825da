//! `browse` command: the map-only view with every listed studio.

use jamtogether_client::JamClient;
use jamtogether_core::{Action, AppConfig, Catalog, Filter, Store};

use crate::render;

/// Fetch the studio listing and print one marker per studio.
///
/// A failed listing is logged and leaves the map empty; the command still
/// succeeds, the same way the app keeps working without markers.
///
/// # Errors
///
/// Returns an error only if JSON output cannot be serialized.
pub(crate) async fn run_browse(
    client: &JamClient,
    config: &AppConfig,
    catalog: Catalog,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = Store::new(catalog, Filter::today());
    let _ = store.dispatch(Action::DismissSearch);

    let action = match client.all_studios().await {
        Ok(studios) => {
            tracing::info!(count = studios.len(), "studio listing loaded");
            Action::StudiosLoaded(studios)
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                backend = %config.backend_url_redacted(),
                "failed to load studio listing"
            );
            Action::StudiosLoadFailed
        }
    };
    let _ = store.dispatch(action);

    if json {
        render::print_markers_json(&store)
    } else {
        render::print_browse(&store);
        Ok(())
    }
}
