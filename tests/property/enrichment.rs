//! Property-based tests for the task/user join and the partial-update merge.
//!
//! Uses proptest to verify:
//! 1. The join attaches a user exactly when the loaded user set contains the
//!    task's owner id, for any combination of ids.
//! 2. `merge_patch` never alters a field that is absent from the patch and
//!    always applies a field that is present.

use proptest::prelude::*;

use taskdeck::board::{BoardCache, TaskPatch, merge_patch};
use taskdeck_api::{Task, TaskId, TaskStatus, User, UserId};

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::Doing),
        Just(TaskStatus::Done),
    ]
}

/// Tasks and users draw owner ids from a small range so that collisions
/// and misses both occur regularly.
fn arb_task(id: i64) -> impl Strategy<Value = Task> {
    (".{1,20}", arb_status(), 1i64..8).prop_map(move |(description, status, user_id)| Task {
        id: TaskId::new(id),
        description,
        status,
        user_id: UserId::new(user_id),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    })
}

fn arb_users() -> impl Strategy<Value = Vec<User>> {
    proptest::collection::btree_set(1i64..8, 0..6).prop_map(|ids| {
        ids.into_iter()
            .map(|id| User {
                id: UserId::new(id),
                full_name: format!("User {id}"),
            })
            .collect()
    })
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec((".{1,20}", arb_status(), 1i64..8), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (description, status, user_id))| Task {
                id: TaskId::new(i64::try_from(i).unwrap_or_default() + 1),
                description,
                status,
                user_id: UserId::new(user_id),
                created_at: "2024-01-01T00:00:00Z".to_string(),
                updated_at: "2024-01-01T00:00:00Z".to_string(),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn join_attaches_user_exactly_when_owner_is_loaded(
        tasks in arb_tasks(),
        users in arb_users(),
    ) {
        let mut cache = BoardCache::new();
        cache.begin_tasks_fetch();
        cache.complete_tasks(Ok(tasks.clone()));
        cache.begin_users_fetch();
        cache.complete_users(Ok(users.clone()));

        let enriched = cache.enriched_tasks();
        prop_assert_eq!(enriched.len(), tasks.len());

        for entry in &enriched {
            let expected = users.iter().find(|u| u.id == entry.task.user_id);
            prop_assert_eq!(entry.user.as_ref(), expected);
        }
    }

    #[test]
    fn merge_keeps_fields_absent_from_the_patch(
        current in arb_task(1),
        new_description in proptest::option::of(".{1,20}"),
        new_status in proptest::option::of(arb_status()),
        new_owner in proptest::option::of(1i64..8),
    ) {
        let patch = TaskPatch {
            description: new_description.clone(),
            status: new_status,
            user_id: new_owner.map(UserId::new),
        };
        let payload = merge_patch(&current, &patch);

        match new_description {
            Some(d) => prop_assert_eq!(&payload.description, &d),
            None => prop_assert_eq!(&payload.description, &current.description),
        }
        match new_status {
            Some(s) => prop_assert_eq!(payload.status, s),
            None => prop_assert_eq!(payload.status, current.status),
        }
        match new_owner {
            Some(o) => prop_assert_eq!(payload.user_id, UserId::new(o)),
            None => prop_assert_eq!(payload.user_id, current.user_id),
        }
    }

    #[test]
    fn empty_patch_reproduces_the_current_task(current in arb_task(1)) {
        let payload = merge_patch(&current, &TaskPatch::default());
        prop_assert_eq!(payload.description, current.description);
        prop_assert_eq!(payload.status, current.status);
        prop_assert_eq!(payload.user_id, current.user_id);
    }
}
