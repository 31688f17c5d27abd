pub mod click_info;
pub mod hash_ip;
