//! Domain types and the resource-access policy for the task subsystem.
//!
//! This module provides type-safe wrappers and domain primitives. It follows
//! the Newtype pattern to prevent ID mixing.

use crate::entities::users::Role;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a Task in the system.
///
/// This newtype wrapper prevents mixing task ids with other entity ids and
/// guarantees the wrapped value is a well-formed UUID.
///
/// # Examples
///
/// ```rust
/// use taskarr::domain::TaskId;
///
/// let id = TaskId::generate();
/// let parsed: TaskId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from an already-validated UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random task id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub const fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<TaskId> for Uuid {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

/// Decides whether an actor may read, update, or delete a task owned by
/// `owner_username`.
///
/// The single rule: the actor is the owner, or the actor is an administrator.
/// Read, update, and delete are governed uniformly; there is no separate
/// read/write matrix. Pure and deterministic; callers must evaluate it fresh
/// per request since roles and ownership can change between calls.
#[must_use]
pub fn can_access(actor_role: Role, actor_username: &str, owner_username: &str) -> bool {
    actor_username == owner_username || actor_role == Role::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_access_own_task() {
        assert!(can_access(Role::Reader, "reader", "reader"));
        assert!(can_access(Role::Admin, "admin", "admin"));
    }

    #[test]
    fn admin_can_access_any_task() {
        assert!(can_access(Role::Admin, "admin", "reader"));
        assert!(can_access(Role::Admin, "admin", "someone-else"));
    }

    #[test]
    fn non_admin_cannot_access_foreign_task() {
        assert!(!can_access(Role::Reader, "guest", "reader"));
        assert!(!can_access(Role::Reader, "reader", "admin"));
    }

    #[test]
    fn task_id_round_trips_through_display() {
        let id = TaskId::generate();
        let parsed: TaskId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn task_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<TaskId>().is_err());
    }
}
