pub mod page;
pub mod time_unit;
