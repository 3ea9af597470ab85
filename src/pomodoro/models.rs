use crate::ops::tasks::{Importance, TaskList};
use crate::ops::timer::{TickOutcome, Timer, TimerMode};
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

pub const TASK_DONE_MESSAGE: &str = "Task completed! 😊";

// Define input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddingTask,
    EditingName,
}

/// Everything the user (or the tick) can do to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Reset,
    SetMode(TimerMode),
    Tick,
    OpenAddTask,
    OpenEditName,
    CloseInput,
    InputChar(char),
    InputBackspace,
    CycleImportance,
    SubmitTask,
    SelectNext,
    SelectPrev,
    ToggleComplete(usize),
    DeleteTask(usize),
    ToggleDarkMode,
    Quit,
}

/// Side effects requested by a transition, carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The timer went from paused to running.
    ArmTicker,
    /// The timer went from running to paused.
    DisarmTicker,
    Notify { summary: String, body: String },
    Quit,
}

/// Transient message shown in the corner until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

/// The single state container for the widget.
pub struct App {
    pub timer: Timer,
    pub tasks: TaskList,
    /// Bumped by task toggles and by finished timer cycles alike
    pub completed_count: u32,
    pub user_name: String,
    pub dark_mode: bool,
    pub input_mode: InputMode,
    pub input_text: String,
    pub new_importance: Importance,
    pub selected_task: Option<usize>,
    pub toast: Option<Toast>,
    pub started_at: DateTime<Local>,
}

impl App {
    pub fn new(user_name: &str, dark_mode: bool) -> App {
        App {
            timer: Timer::default(),
            tasks: TaskList::new(),
            completed_count: 0,
            user_name: user_name.to_string(),
            dark_mode,
            input_mode: InputMode::Normal,
            input_text: String::new(),
            new_importance: Importance::Low,
            selected_task: None,
            toast: None,
            started_at: Local::now(),
        }
    }

    pub fn greeting(&self) -> String {
        let name = if self.user_name.is_empty() {
            "user"
        } else {
            self.user_name.as_str()
        };
        format!("Hello, {}!", name)
    }

    /// Applies one action and returns the effects it asks for.
    /// Ticker effects are derived from the running flag before and after,
    /// so each transition arms or disarms exactly once.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let was_running = self.timer.is_running();
        let mut effects = Vec::new();

        match action {
            Action::Start => self.timer.start(),
            Action::Pause => self.timer.pause(),
            Action::Reset => self.timer.reset(),
            Action::SetMode(mode) => {
                tracing::debug!(mode = mode.label(), "timer mode changed");
                self.timer.set_mode(mode);
            }
            Action::Tick => {
                if let TickOutcome::Completed { finished, next } = self.timer.tick() {
                    self.completed_count += 1;
                    tracing::info!(
                        finished = finished.label(),
                        next = next.label(),
                        completed = self.completed_count,
                        "timer cycle completed"
                    );
                    effects.push(Effect::Notify {
                        summary: format!("{} finished", finished.label()),
                        body: format!("Up next: {}", next.label()),
                    });
                }
            }
            Action::OpenAddTask => self.input_mode = InputMode::AddingTask,
            Action::OpenEditName => self.input_mode = InputMode::EditingName,
            Action::CloseInput => {
                if self.input_mode == InputMode::AddingTask {
                    self.clear_task_input();
                }
                self.input_mode = InputMode::Normal;
            }
            Action::InputChar(c) => match self.input_mode {
                InputMode::AddingTask => self.input_text.push(c),
                InputMode::EditingName => self.user_name.push(c),
                InputMode::Normal => {}
            },
            Action::InputBackspace => match self.input_mode {
                InputMode::AddingTask => {
                    self.input_text.pop();
                }
                InputMode::EditingName => {
                    self.user_name.pop();
                }
                InputMode::Normal => {}
            },
            Action::CycleImportance => self.new_importance = self.new_importance.cycle(),
            Action::SubmitTask => self.submit_task(),
            Action::SelectNext => self.select_next_task(),
            Action::SelectPrev => self.select_prev_task(),
            Action::ToggleComplete(index) => effects.extend(self.toggle_complete(index)),
            Action::DeleteTask(index) => self.delete_task(index),
            Action::ToggleDarkMode => self.dark_mode = !self.dark_mode,
            Action::Quit => effects.push(Effect::Quit),
        }

        let is_running = self.timer.is_running() && action != Action::Quit;
        match (was_running, is_running) {
            (false, true) => effects.insert(0, Effect::ArmTicker),
            (true, false) => effects.insert(0, Effect::DisarmTicker),
            _ => {}
        }

        effects
    }

    fn submit_task(&mut self) {
        // Blank text is ignored and the popup stays open
        if self.tasks.add(&self.input_text, self.new_importance).is_ok() {
            tracing::debug!(importance = self.new_importance.label(), "task added");
            self.clear_task_input();
            self.selected_task = Some(self.tasks.len() - 1);
            self.input_mode = InputMode::Normal;
        }
    }

    fn clear_task_input(&mut self) {
        self.input_text.clear();
        self.new_importance = Importance::Low;
    }

    fn toggle_complete(&mut self, index: usize) -> Option<Effect> {
        match self.tasks.toggle(index) {
            Ok(completed) => {
                // Un-completing still counts and still notifies
                self.completed_count += 1;
                if !completed {
                    tracing::debug!(index, "task un-completed, counter incremented anyway");
                }
                Some(Effect::Notify {
                    summary: "pomodo".to_string(),
                    body: TASK_DONE_MESSAGE.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring toggle");
                None
            }
        }
    }

    fn delete_task(&mut self, index: usize) {
        if let Err(e) = self.tasks.delete(index) {
            tracing::warn!(error = %e, "ignoring delete");
            return;
        }
        tracing::debug!(index, "task deleted");

        // Adjust the selection
        if self.tasks.is_empty() {
            self.selected_task = None;
        } else if let Some(selected) = self.selected_task {
            if selected >= self.tasks.len() {
                self.selected_task = Some(self.tasks.len() - 1);
            }
        }
    }

    pub fn select_prev_task(&mut self) {
        if self.tasks.is_empty() {
            self.selected_task = None;
            return;
        }

        match self.selected_task {
            Some(current) if current > 0 => self.selected_task = Some(current - 1),
            None => self.selected_task = Some(self.tasks.len() - 1),
            _ => {} // Already at the first task
        }
    }

    pub fn select_next_task(&mut self) {
        if self.tasks.is_empty() {
            self.selected_task = None;
            return;
        }

        match self.selected_task {
            Some(current) if current < self.tasks.len() - 1 => {
                self.selected_task = Some(current + 1)
            }
            None => self.selected_task = Some(0),
            _ => {} // Already at the last task
        }
    }

    pub fn show_toast(&mut self, message: &str, now: Instant, ttl: Duration) {
        self.toast = Some(Toast {
            message: message.to_string(),
            expires_at: now + ttl,
        });
    }

    /// Drops the toast once it has expired.
    pub fn prune_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }
}
