pub mod filters_bar;
pub mod form_field;
pub mod header;
pub mod map_view;
pub mod multi_select;
