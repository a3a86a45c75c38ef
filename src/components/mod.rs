use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod menu_panel;
pub mod region_view;
pub mod status_bar;

pub use menu_panel::MenuPanelComponent;
pub use region_view::RegionViewComponent;
pub use status_bar::StatusBar;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect);
}
