pub mod table;
pub mod time_range;
pub mod update_info;
