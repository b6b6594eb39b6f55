use gostr_core::app::{MENU_ITEMS, OPTION_ITEMS};
use ratatui::{layout::Rect, widgets::ListItem, Frame};

use super::render_list;

pub(crate) fn render_menu(f: &mut Frame, area: Rect, cursor: usize) {
    let items = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(format!("{}. {}", i + 1, item.label())))
        .collect();
    render_list(f, area, items, cursor);
}

pub(crate) fn render_options(f: &mut Frame, area: Rect, cursor: usize) {
    let items = OPTION_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(format!("{}. {}", i + 1, item.label())))
        .collect();
    render_list(f, area, items, cursor);
}
