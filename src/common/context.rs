// Ambient metadata passed into every validation call

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Operation being validated. Controls mode-dependent rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Create,
    Update,
    View,
}

/// Read-only context constructed once per validation call.
///
/// Rules may consult it but never mutate it; the timestamp is fixed at
/// construction so date checks inside one call agree with each other.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationContext {
    pub mode: Mode,
    pub actor_id: Option<String>,
    pub actor_role: Option<String>,
    pub request_path: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ValidationContext {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            actor_id: None,
            actor_role: None,
            request_path: None,
            timestamp: Utc::now(),
        }
    }

    pub fn create() -> Self {
        Self::new(Mode::Create)
    }

    pub fn update() -> Self {
        Self::new(Mode::Update)
    }

    pub fn view() -> Self {
        Self::new(Mode::View)
    }

    pub fn with_actor(mut self, id: impl Into<String>, role: impl Into<String>) -> Self {
        self.actor_id = Some(id.into());
        self.actor_role = Some(role.into());
        self
    }

    pub fn with_request_path(mut self, path: impl Into<String>) -> Self {
        self.request_path = Some(path.into());
        self
    }

    /// Future calendar dates are rejected when writing (create/update) and
    /// accepted when rendering stored data (view).
    pub fn allows_future_dates(&self) -> bool {
        self.mode == Mode::View
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::create()
    }
}
