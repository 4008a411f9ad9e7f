use crate::history::HistoryEntry;
use crate::llm::Failure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Validating,
    Generating,
    Succeeded,
    Failed,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Succeeded | SessionPhase::Failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub filename: String,
    pub before_code: String,
    pub after_code: String,
}

impl From<&HistoryEntry> for FormFields {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            filename: entry.filename.clone(),
            before_code: entry.before_code.clone(),
            after_code: entry.after_code.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub form: FormFields,
    pub change_notes: String,
    pub is_loading: bool,
    pub error: Option<Failure>,
    pub active_history_id: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            form: FormFields::default(),
            change_notes: String::new(),
            is_loading: false,
            error: None,
            active_history_id: None,
        }
    }
}

impl SessionState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|failure| failure.message.as_str())
    }
}
