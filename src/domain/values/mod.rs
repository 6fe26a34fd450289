pub mod schedule;
pub mod time_table;
