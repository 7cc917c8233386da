pub mod calendar;
pub mod friend_directory;
pub mod month_grid;
pub mod schedule;
