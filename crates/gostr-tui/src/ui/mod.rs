pub(crate) mod terminal;
pub(crate) mod theme;
pub(crate) mod views;

pub(crate) use terminal::Tui;
