//! Who may touch a todo. Pure predicates; the repository enforces them.

use uuid::Uuid;

use crate::todo::Todo;

/// Creator or assignee: status toggles, field edits, reassignment.
pub fn can_modify(todo: &Todo, actor: Uuid) -> bool {
    actor == todo.created_by || actor == todo.assigned_to
}

/// Creator only.
pub fn can_delete(todo: &Todo, actor: Uuid) -> bool {
    actor == todo.created_by
}
