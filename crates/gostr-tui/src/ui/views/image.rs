use gostr_core::app::{ImagePreviewScreen, ImageSelectScreen, ImageStatus};
use ratatui::{
    layout::Rect,
    widgets::{ListItem, Paragraph},
    Frame,
};

use super::render_list;
use crate::ui::theme;

pub(crate) fn render_image_select(f: &mut Frame, area: Rect, select: &ImageSelectScreen) {
    let items = select
        .urls
        .iter()
        .map(|url| ListItem::new(url.clone()))
        .collect();
    render_list(f, area, items, select.cursor);
}

pub(crate) fn render_image_preview(f: &mut Frame, area: Rect, preview: &ImagePreviewScreen) {
    let widget = match &preview.status {
        ImageStatus::Loading => {
            Paragraph::new(format!("Loading {}…", preview.url)).style(theme::muted())
        }
        ImageStatus::Ready(art) => Paragraph::new(art.clone()).style(theme::text()),
        ImageStatus::Failed(error) => Paragraph::new(error.clone()).style(theme::error()),
    };
    f.render_widget(widget, area);
}
