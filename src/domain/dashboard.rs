use serde::Serialize;
use uuid::Uuid;

use crate::todo_response::TodoResponse;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub assigned_by_me: Vec<TodoResponse>,
    pub assigned_to_me: Vec<TodoResponse>,
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_created: usize,
    pub total_assigned: usize,
    pub completed_by_me: usize,
    pub pending_by_me: usize,
    pub completed_assigned_by_me: usize,
    pub pending_assigned_by_me: usize,
}

/// Split `todos` (newest first) into what `user_id` created and what they
/// were handed. A self-assigned todo lands in both lists.
pub fn build_dashboard(user_id: Uuid, todos: Vec<TodoResponse>) -> Dashboard {
    let assigned_to_me: Vec<TodoResponse> = todos
        .iter()
        .filter(|t| t.assigned_to.id == user_id)
        .cloned()
        .collect();
    let assigned_by_me: Vec<TodoResponse> = todos
        .into_iter()
        .filter(|t| t.created_by.id == user_id)
        .collect();

    let (completed_by_me, pending_by_me) = count_by_status(&assigned_to_me);
    let (completed_assigned_by_me, pending_assigned_by_me) = count_by_status(&assigned_by_me);

    let stats = DashboardStats {
        total_created: assigned_by_me.len(),
        total_assigned: assigned_to_me.len(),
        completed_by_me,
        pending_by_me,
        completed_assigned_by_me,
        pending_assigned_by_me,
    };

    Dashboard {
        assigned_by_me,
        assigned_to_me,
        stats,
    }
}

/// (completed, pending)
fn count_by_status(todos: &[TodoResponse]) -> (usize, usize) {
    let completed = todos.iter().filter(|t| t.status.is_completed()).count();
    (completed, todos.len() - completed)
}
