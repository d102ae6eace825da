//! Share-text clipboard writes.

use anyhow::Context;
use jamtogether_core::{Action, Store};

/// Write-only text sink. The system clipboard in production, a recorder in
/// tests.
pub(crate) trait Clipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

pub(crate) struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut cb| cb.set_text(text))
            .context("failed to write to the system clipboard")
    }
}

/// Copy the share text of result `index` (0-based) and raise the "copied"
/// toast.
///
/// # Errors
///
/// Returns an error if there is no such result or the clipboard write fails.
/// The toast is only raised after a successful write.
pub(crate) fn copy_share_text(
    store: &mut Store,
    index: usize,
    clipboard: &mut impl Clipboard,
) -> anyhow::Result<String> {
    let text = store.share_text(index).ok_or_else(|| {
        anyhow::anyhow!(
            "no result #{}; the last search returned {} room(s)",
            index + 1,
            store.rooms().len()
        )
    })?;

    clipboard.set_text(&text)?;
    let _ = store.dispatch(Action::ShareCopied);
    tracing::debug!(index, "share text copied");
    Ok(text)
}
