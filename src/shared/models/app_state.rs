use std::sync::Arc;

use crate::{data_access::data_context::DataContext, settings::Settings, todo_repository::TodoRepository};

pub struct AppState {
    pub data_context: DataContext,
    pub todos: TodoRepository,
    pub settings: Settings,
}

impl AppState {
    pub fn new(data_context: DataContext, settings: Settings) -> Self {
        Self {
            todos: TodoRepository::new(data_context.clone()),
            data_context,
            settings,
        }
    }
}

pub type SharedState = Arc<AppState>;
