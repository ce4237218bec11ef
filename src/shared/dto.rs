// Requests
pub mod create_todo_request;
pub mod update_todo_request;
pub mod todo_queries;
pub mod login_request;
pub mod user_add_request;
pub mod field_parsing;

// Responses
pub mod api_response;
pub mod todo_response;
pub mod login_response;
pub mod user_summary;
