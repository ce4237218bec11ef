pub mod app_state;
pub mod settings;
pub mod todo;
pub mod todo_priority;
pub mod todo_status;
pub mod user;
