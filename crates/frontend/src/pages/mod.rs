pub mod listing_detail;
pub mod new_property;
pub mod search;
