//! Application state and event handling.
//!
//! [`App`] owns the latest [`BoardSnapshot`] plus all purely-local UI
//! state (selection, inline edit buffer, create form). Key handling never
//! mutates board data directly; it returns a [`BoardCommand`] for the
//! background task, and the board changes only when the next snapshot
//! arrives.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_api::{EnrichedTask, TaskId, TaskStatus, UserId};

use crate::board::{BoardSnapshot, TaskDraft, TaskPatch};
use crate::net::{BoardCommand, BoardEvent};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The three-column board (default).
    Board,
    /// The create-task form.
    CreateForm,
}

/// Fields of the create form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    /// Free-text description input.
    Description,
    /// Owner picker.
    Owner,
    /// Initial column picker.
    Status,
}

impl CreateField {
    const fn next(self) -> Self {
        match self {
            Self::Description => Self::Owner,
            Self::Owner => Self::Status,
            Self::Status => Self::Description,
        }
    }
}

/// State of the create-task form.
#[derive(Debug, Clone)]
pub struct CreateForm {
    /// Description being typed.
    pub description: String,
    /// Index into the snapshot's user list, if an owner is picked.
    pub owner_index: Option<usize>,
    /// Initial column for the new task.
    pub status: TaskStatus,
    /// Currently focused form field.
    pub field: CreateField,
}

impl CreateForm {
    const fn new() -> Self {
        Self {
            description: String::new(),
            owner_index: None,
            status: TaskStatus::Todo,
            field: CreateField::Description,
        }
    }
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight inline edit of the selected task's description.
#[derive(Debug, Clone)]
pub struct EditState {
    /// Task being edited.
    pub id: TaskId,
    /// Description as fetched, for change detection.
    pub original: String,
    /// Edit buffer.
    pub buffer: String,
}

/// Main application state.
pub struct App {
    /// Latest board view from the background task.
    pub snapshot: BoardSnapshot,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Column holding the selection.
    pub selected_column: TaskStatus,
    /// Row of the selection within its column.
    pub selected_row: usize,
    /// Inline edit in progress, if any.
    pub editing: Option<EditState>,
    /// Create form state.
    pub create: CreateForm,
    /// Transient status-line messages, newest last.
    pub messages: Vec<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Character cap for description input.
    pub max_description_len: usize,
}

impl App {
    /// Create a new application awaiting its first snapshot.
    #[must_use]
    pub fn new(max_description_len: usize) -> Self {
        let snapshot = BoardSnapshot {
            // The background task starts with a full refresh; show the
            // loading state until its first snapshot lands.
            tasks_loading: true,
            users_loading: true,
            ..BoardSnapshot::default()
        };
        Self {
            snapshot,
            focus: PanelFocus::Board,
            selected_column: TaskStatus::Todo,
            selected_row: 0,
            editing: None,
            create: CreateForm::new(),
            messages: Vec::new(),
            should_quit: false,
            max_description_len,
        }
    }

    /// The currently selected task, if the selected column is non-empty.
    #[must_use]
    pub fn selected_task(&self) -> Option<&EnrichedTask> {
        self.snapshot
            .column(self.selected_column)
            .into_iter()
            .nth(self.selected_row)
    }

    /// Apply an event from the background task.
    pub fn apply_event(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::Snapshot(snapshot) => {
                self.snapshot = snapshot;
                self.clamp_selection();
            }
            BoardEvent::MutationFailed { action, message } => {
                self.push_message(format!("Failed to {action} task: {message}"));
            }
        }
    }

    /// Append a status-line message.
    pub fn push_message(&mut self, message: String) {
        self.messages.push(message);
    }

    /// Handle a key event, producing a command for the background task
    /// when the key maps to a remote operation.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<BoardCommand> {
        // Ctrl-C always quits, regardless of focus or edit state.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Some(BoardCommand::Shutdown);
        }

        if self.editing.is_some() {
            return self.handle_edit_key(key);
        }

        match self.focus {
            PanelFocus::Board => self.handle_board_key(key),
            PanelFocus::CreateForm => self.handle_create_key(key),
        }
    }

    /// Key handling on the board.
    fn handle_board_key(&mut self, key: KeyEvent) -> Option<BoardCommand> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) => {
                self.should_quit = true;
                return Some(BoardCommand::Shutdown);
            }
            (KeyCode::Char('r'), _) => return Some(BoardCommand::Refresh),
            (KeyCode::Char('n') | KeyCode::Tab, _) => {
                self.focus = PanelFocus::CreateForm;
            }
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                let len = self.snapshot.column(self.selected_column).len();
                if self.selected_row + 1 < len {
                    self.selected_row += 1;
                }
            }
            (KeyCode::Left, m) if m.contains(KeyModifiers::SHIFT) => {
                return self.move_selected(TaskStatus::left);
            }
            (KeyCode::Right, m) if m.contains(KeyModifiers::SHIFT) => {
                return self.move_selected(TaskStatus::right);
            }
            (KeyCode::Char('H'), _) => return self.move_selected(TaskStatus::left),
            (KeyCode::Char('L'), _) => return self.move_selected(TaskStatus::right),
            (KeyCode::Left | KeyCode::Char('h'), _) => {
                if let Some(column) = self.selected_column.left() {
                    self.selected_column = column;
                    self.clamp_selection();
                }
            }
            (KeyCode::Right | KeyCode::Char('l'), _) => {
                if let Some(column) = self.selected_column.right() {
                    self.selected_column = column;
                    self.clamp_selection();
                }
            }
            (KeyCode::Enter | KeyCode::Char('e'), _) => self.start_edit(),
            (KeyCode::Char('u'), _) => return self.cycle_owner(),
            (KeyCode::Char('d'), _) => {
                if let Some(task) = self.selected_task() {
                    return Some(BoardCommand::DeleteTask(task.task.id));
                }
            }
            _ => {}
        }
        None
    }

    /// Moves the selected task one column over, if there is one.
    fn move_selected(&mut self, step: fn(TaskStatus) -> Option<TaskStatus>) -> Option<BoardCommand> {
        let task = self.selected_task()?;
        let target = step(task.task.status)?;
        Some(BoardCommand::UpdateTask {
            id: task.task.id,
            patch: TaskPatch::status(target),
        })
    }

    /// Reassigns the selected task to the next user in the loaded list,
    /// wrapping around.
    fn cycle_owner(&mut self) -> Option<BoardCommand> {
        let task = self.selected_task()?;
        if self.snapshot.users.is_empty() {
            return None;
        }
        let current = self
            .snapshot
            .users
            .iter()
            .position(|user| user.id == task.task.user_id);
        let next = current.map_or(0, |i| (i + 1) % self.snapshot.users.len());
        let owner: UserId = self.snapshot.users[next].id;
        Some(BoardCommand::UpdateTask {
            id: task.task.id,
            patch: TaskPatch::owner(owner),
        })
    }

    /// Begins an inline edit of the selected task's description.
    fn start_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.editing = Some(EditState {
                id: task.task.id,
                original: task.task.description.clone(),
                buffer: task.task.description.clone(),
            });
        }
    }

    /// Key handling while an inline edit is active.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<BoardCommand> {
        match key.code {
            KeyCode::Enter => return self.commit_edit(),
            KeyCode::Esc => self.editing = None,
            KeyCode::Backspace => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(edit) = self.editing.as_mut()
                    && edit.buffer.chars().count() < self.max_description_len
                {
                    edit.buffer.push(c);
                }
            }
            _ => {}
        }
        None
    }

    /// Commits the edit buffer. A blank or unchanged buffer reverts the
    /// edit without issuing an update.
    fn commit_edit(&mut self) -> Option<BoardCommand> {
        let edit = self.editing.take()?;
        let trimmed = edit.buffer.trim();
        if trimmed.is_empty() || trimmed == edit.original {
            return None;
        }
        Some(BoardCommand::UpdateTask {
            id: edit.id,
            patch: TaskPatch::description(trimmed),
        })
    }

    /// Key handling in the create form.
    fn handle_create_key(&mut self, key: KeyEvent) -> Option<BoardCommand> {
        match key.code {
            KeyCode::Esc => {
                self.focus = PanelFocus::Board;
                return None;
            }
            KeyCode::Tab => {
                self.create.field = self.create.field.next();
                return None;
            }
            KeyCode::Enter => return self.submit_create(),
            _ => {}
        }

        match self.create.field {
            CreateField::Description => match key.code {
                KeyCode::Char(c) => {
                    if self.create.description.chars().count() < self.max_description_len {
                        self.create.description.push(c);
                    }
                }
                KeyCode::Backspace => {
                    self.create.description.pop();
                }
                _ => {}
            },
            CreateField::Owner => match key.code {
                KeyCode::Left => self.cycle_form_owner(-1),
                KeyCode::Right => self.cycle_form_owner(1),
                _ => {}
            },
            CreateField::Status => match key.code {
                KeyCode::Left => {
                    if let Some(status) = self.create.status.left() {
                        self.create.status = status;
                    }
                }
                KeyCode::Right => {
                    if let Some(status) = self.create.status.right() {
                        self.create.status = status;
                    }
                }
                _ => {}
            },
        }
        None
    }

    /// Steps the form's owner picker through the loaded user list.
    fn cycle_form_owner(&mut self, step: isize) {
        let len = self.snapshot.users.len();
        if len == 0 {
            self.create.owner_index = None;
            return;
        }
        let next = match self.create.owner_index {
            None => {
                if step > 0 {
                    0
                } else {
                    len - 1
                }
            }
            #[allow(clippy::cast_possible_wrap)]
            Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
        };
        self.create.owner_index = Some(next);
    }

    /// Submits the create form. Validation failures surface through the
    /// mutation-failed path like any other rejected create.
    fn submit_create(&mut self) -> Option<BoardCommand> {
        let owner = self
            .create
            .owner_index
            .and_then(|i| self.snapshot.users.get(i))
            .map(|user| user.id);
        let draft = TaskDraft {
            description: self.create.description.clone(),
            status: self.create.status,
            owner,
        };
        self.create = CreateForm::new();
        self.focus = PanelFocus::Board;
        Some(BoardCommand::CreateTask(draft))
    }

    /// Keeps the selection inside the (possibly shrunk) selected column.
    fn clamp_selection(&mut self) {
        let len = self.snapshot.column(self.selected_column).len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }
}
