pub mod authentication_controller;
pub mod health_controller;
pub mod todo_controller;
