use gostr_core::error::{CoreError, CoreResult};
use gostr_core::runtime::Clipboard;

/// The desktop clipboard through `arboard`.
pub(crate) struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> CoreResult<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CoreError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| CoreError::Clipboard(e.to_string()))
    }
}
