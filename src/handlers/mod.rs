pub mod listing_handlers;
pub mod florist_handlers;
