pub mod location_picker;
pub mod pagination_bar;

pub use location_picker::{LocationPicker, PickerAction};
pub use pagination_bar::PaginationBar;

use crate::tui::{styles::Theme, Frame};
use ratatui::layout::Rect;

/// Base trait for all UI components
pub trait Component {
    /// Render the component
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Check if component has focus
    fn has_focus(&self) -> bool {
        false
    }

    /// Set component focus
    fn set_focus(&mut self, focus: bool) {
        let _ = focus;
    }
}
