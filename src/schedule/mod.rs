pub mod aggregate;
pub mod group;
pub mod hourly;
pub mod row_filter;
