pub mod friend;
pub mod task;
