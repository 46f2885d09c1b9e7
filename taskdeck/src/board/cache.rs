//! Cached board state and the task/user join.
//!
//! [`BoardCache`] is the single source of truth per resource. Each slot is
//! mutated only by fetch start, fetch completion, or explicit invalidation
//! after a successful mutation; everything else consumes derived views.
//! Previously fetched data is kept while a refetch is in flight, and the
//! last completed fetch wins the slot.

use taskdeck_api::{ApiError, EnrichedTask, Task, TaskId, User, UserId};

/// One cached remote collection with its loading/error flags.
#[derive(Debug)]
struct ResourceSlot<T> {
    data: Option<T>,
    loading: bool,
    error: Option<ApiError>,
    stale: bool,
}

impl<T> ResourceSlot<T> {
    /// A fresh slot starts stale so the first read triggers a fetch.
    const fn new() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            stale: true,
        }
    }

    fn begin_fetch(&mut self) {
        self.loading = true;
        self.stale = false;
    }

    fn complete(&mut self, result: Result<T, ApiError>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    const fn invalidate(&mut self) {
        self.stale = true;
    }
}

/// Aggregated board state: tasks, users, and the derived joined view.
#[derive(Debug)]
pub struct BoardCache {
    tasks: ResourceSlot<Vec<Task>>,
    users: ResourceSlot<Vec<User>>,
}

impl Default for BoardCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardCache {
    /// Creates an empty cache with both slots stale.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: ResourceSlot::new(),
            users: ResourceSlot::new(),
        }
    }

    /// Marks the task slot as fetching. Existing data is retained.
    pub fn begin_tasks_fetch(&mut self) {
        self.tasks.begin_fetch();
    }

    /// Marks the user slot as fetching. Existing data is retained.
    pub fn begin_users_fetch(&mut self) {
        self.users.begin_fetch();
    }

    /// Records the outcome of a task fetch.
    pub fn complete_tasks(&mut self, result: Result<Vec<Task>, ApiError>) {
        self.tasks.complete(result);
    }

    /// Records the outcome of a user fetch.
    pub fn complete_users(&mut self, result: Result<Vec<User>, ApiError>) {
        self.users.complete(result);
    }

    /// Marks the cached task collection stale after a successful mutation.
    pub const fn invalidate_tasks(&mut self) {
        self.tasks.invalidate();
    }

    /// Whether the task slot needs a (re)fetch.
    #[must_use]
    pub const fn tasks_stale(&self) -> bool {
        self.tasks.stale
    }

    /// Whether the user slot needs a (re)fetch.
    #[must_use]
    pub const fn users_stale(&self) -> bool {
        self.users.stale
    }

    /// The currently loaded users, empty while none have been fetched.
    #[must_use]
    pub fn users(&self) -> &[User] {
        self.users.data.as_deref().unwrap_or_default()
    }

    fn raw_tasks(&self) -> &[Task] {
        self.tasks.data.as_deref().unwrap_or_default()
    }

    /// Joins every task to its owning user by id (linear scan; the
    /// collections are expected to stay small). A task whose owner is not
    /// in the loaded user set gets `user: None` rather than an error.
    #[must_use]
    pub fn enriched_tasks(&self) -> Vec<EnrichedTask> {
        self.raw_tasks()
            .iter()
            .map(|task| EnrichedTask {
                task: task.clone(),
                user: self.user_by_id(task.user_id).cloned(),
            })
            .collect()
    }

    /// Looks up a task by id in the joined view.
    #[must_use]
    pub fn task_by_id(&self, id: TaskId) -> Option<EnrichedTask> {
        self.raw_tasks()
            .iter()
            .find(|task| task.id == id)
            .map(|task| EnrichedTask {
                task: task.clone(),
                user: self.user_by_id(task.user_id).cloned(),
            })
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users().iter().find(|user| user.id == id)
    }

    /// Looks up a user by exact display name.
    #[must_use]
    pub fn user_by_name(&self, full_name: &str) -> Option<&User> {
        self.users().iter().find(|user| user.full_name == full_name)
    }

    /// The joined view is loading while either source is.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.tasks.loading || self.users.loading
    }

    /// First error across the sources; the tasks error takes precedence
    /// over the users error.
    #[must_use]
    pub const fn first_error(&self) -> Option<&ApiError> {
        match &self.tasks.error {
            Some(e) => Some(e),
            None => self.users.error.as_ref(),
        }
    }

    /// Builds an immutable view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.enriched_tasks(),
            users: self.users().to_vec(),
            tasks_loading: self.tasks.loading,
            users_loading: self.users.loading,
            error: self.first_error().map(ToString::to_string),
        }
    }
}

/// Immutable view of the board handed to the UI thread.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Tasks joined with their resolved owners.
    pub tasks: Vec<EnrichedTask>,
    /// The loaded user collection.
    pub users: Vec<User>,
    /// Whether a task fetch is in flight.
    pub tasks_loading: bool,
    /// Whether a user fetch is in flight.
    pub users_loading: bool,
    /// Message of the first source error, if any.
    pub error: Option<String>,
}

impl BoardSnapshot {
    /// Loading if either source collection is loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.tasks_loading || self.users_loading
    }

    /// Tasks in one board column, in fetch order.
    #[must_use]
    pub fn column(&self, status: taskdeck_api::TaskStatus) -> Vec<&EnrichedTask> {
        self.tasks
            .iter()
            .filter(|t| t.task.status == status)
            .collect()
    }

    /// Looks up a user by exact display name.
    #[must_use]
    pub fn user_by_name(&self, full_name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.full_name == full_name)
    }
}
