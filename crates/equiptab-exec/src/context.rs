//! Application-state container.
//!
//! Holds the current project / model / view selection that the table
//! session reads when it builds its title. Shared as `Arc<AppContext>`;
//! writers take the lock briefly and readers get a cloned snapshot.

use std::sync::{PoisonError, RwLock};

/// A named backend object: display name plus opaque id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub id: String,
}

impl Selection {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub project: Option<Selection>,
    pub model: Option<Selection>,
    pub view_definition: Option<String>,
}

#[derive(Debug, Default)]
pub struct AppContext {
    state: RwLock<AppState>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting a new project clears the model and view chosen under the
    /// previous one.
    pub fn select_project(&self, project: Selection) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.project = Some(project);
        state.model = None;
        state.view_definition = None;
    }

    pub fn select_model(&self, model: Selection) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.model = Some(model);
        state.view_definition = None;
    }

    pub fn set_view_definition(&self, id: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.view_definition = Some(id.into());
    }

    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = AppState::default();
    }

    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `"{base} - Project: {project} ({model})"`, dropping whichever parts
    /// are not selected.
    pub fn title(&self, base: &str) -> String {
        let state = self.snapshot();
        let mut title = base.to_string();
        if let Some(project) = &state.project {
            title.push_str(" - Project: ");
            title.push_str(&project.name);
        }
        if let Some(model) = &state.model {
            title.push_str(" (");
            title.push_str(&model.name);
            title.push(')');
        }
        title
    }
}
