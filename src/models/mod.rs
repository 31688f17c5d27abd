pub mod click_event;
pub mod short_link;
