pub mod map_view;
pub mod popup;
pub mod side_panel;
