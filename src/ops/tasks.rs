use crate::error::{PomodoError, Result};

/// Importance tier of a task, used for color-coding only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    #[default]
    Low,
    Medium,
    High,
}

impl Importance {
    /// Cycles Low -> Medium -> High -> Low.
    pub fn cycle(self) -> Importance {
        match self {
            Importance::Low => Importance::Medium,
            Importance::Medium => Importance::High,
            Importance::High => Importance::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Importance::Low => "Low",
            Importance::Medium => "Medium",
            Importance::High => "High",
        }
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub importance: Importance,
    pub completed: bool,
}

/// Ordered list of tasks, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Appends a new, not yet completed task.
    /// The text is stored as typed; only the emptiness check trims it.
    pub fn add(&mut self, text: &str, importance: Importance) -> Result<()> {
        if text.trim().is_empty() {
            return Err(PomodoError::EmptyTaskText);
        }

        self.tasks.push(Task {
            text: text.to_string(),
            importance,
            completed: false,
        });
        Ok(())
    }

    /// Flips the completed flag of the task at `index` and returns the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(PomodoError::TaskIndexOutOfRange { index, len })?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Removes and returns the task at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        if index >= self.tasks.len() {
            return Err(PomodoError::TaskIndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(self.tasks.remove(index))
    }
}
