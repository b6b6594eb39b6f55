use tracing::{debug, warn};

use crate::app::input::Key;
use crate::app::message::Command;
use crate::app::screen::{ImagePreviewScreen, ImageSelectScreen, ImageStatus, Screen};
use crate::app::AppState;
use crate::error::CoreError;

fn is_close(key: Key) -> bool {
    matches!(key, Key::Esc | Key::Char('u') | Key::Char('q'))
}

/// Preview `urls` on top of `return_to`: one URL is previewed directly,
/// several open a picker first.
pub(crate) fn open_images(state: &mut AppState, mut urls: Vec<String>, return_to: Screen) -> Option<Command> {
    match urls.len() {
        0 => {
            state.screen = return_to;
            None
        }
        1 => {
            let url = urls.remove(0);
            Some(open_preview(state, url, return_to))
        }
        _ => {
            state.screen = Screen::ImageSelect(ImageSelectScreen {
                urls,
                cursor: 0,
                return_to: Box::new(return_to),
            });
            None
        }
    }
}

fn open_preview(state: &mut AppState, url: String, return_to: Screen) -> Command {
    state.screen = Screen::ImagePreview(ImagePreviewScreen {
        url: url.clone(),
        status: ImageStatus::Loading,
        return_to: Box::new(return_to),
    });
    Command::LoadImage { url }
}

pub(crate) fn on_select_key(
    state: &mut AppState,
    mut select: ImageSelectScreen,
    key: Key,
) -> Option<Command> {
    match key {
        k if is_close(k) => {
            state.screen = *select.return_to;
            return None;
        }
        k if k.is_up() => select.cursor = select.cursor.saturating_sub(1),
        k if k.is_down() => {
            if select.cursor + 1 < select.urls.len() {
                select.cursor += 1;
            }
        }
        k if k.is_select() => {
            if let Some(url) = select.urls.get(select.cursor).cloned() {
                return Some(open_preview(state, url, Screen::ImageSelect(select)));
            }
        }
        _ => {}
    }
    state.screen = Screen::ImageSelect(select);
    None
}

pub(crate) fn on_preview_key(
    state: &mut AppState,
    preview: ImagePreviewScreen,
    key: Key,
) -> Option<Command> {
    state.screen = if is_close(key) {
        *preview.return_to
    } else {
        Screen::ImagePreview(preview)
    };
    None
}

pub(crate) fn on_loaded(
    state: &mut AppState,
    url: String,
    result: Result<String, CoreError>,
) -> Option<Command> {
    match &mut state.screen {
        Screen::ImagePreview(preview)
            if preview.url == url && preview.status == ImageStatus::Loading =>
        {
            preview.status = match result {
                Ok(art) => ImageStatus::Ready(art),
                Err(e) => {
                    warn!("image preview for {} failed: {}", url, e);
                    ImageStatus::Failed(e.to_string())
                }
            };
        }
        _ => debug!("discarding image {} (preview closed)", url),
    }
    None
}
