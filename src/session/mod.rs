mod gateway;
mod guards;
mod state;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::export;
use crate::history::{HistoryEntry, HistoryStore};
use crate::llm::{ErrorKind, Failure, GenerationResult};
use crate::prompt::GenerationRequest;
use crate::render::{self, RenderedNote};

pub use gateway::GenerationGateway;
pub use state::{FormFields, SessionPhase, SessionState};

const HISTORY_NOT_SAVED_MESSAGE: &str =
    "Change notes were generated but could not be saved to history.";
const HISTORY_NOT_CLEARED_MESSAGE: &str = "History could not be cleared. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Succeeded { entry_id: String },
    Failed(Failure),
}

/// Drives one generation at a time over an owned gateway and history.
///
/// Methods that change state take `&mut self`; share a controller across
/// tasks through `tokio::sync::Mutex` so a second call waits for the first.
pub struct SessionController {
    gateway: Box<dyn GenerationGateway>,
    history: HistoryStore,
    state: SessionState,
}

impl SessionController {
    pub fn new(gateway: Box<dyn GenerationGateway>, history: HistoryStore) -> Self {
        Self {
            gateway,
            history,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn rendered_notes(&self) -> RenderedNote {
        render::render(&self.state.change_notes)
    }

    /// Returns a terminal phase to `Idle` once the caller has shown the result.
    pub fn acknowledge(&mut self) {
        if self.state.phase.is_terminal() {
            self.state.phase = SessionPhase::Idle;
        }
    }

    pub async fn generate(
        &mut self,
        credentials: &str,
        filename: &str,
        before_code: &str,
        after_code: &str,
        cancel: &CancellationToken,
    ) -> GenerateOutcome {
        if self.state.is_loading {
            warn!("previous generation was abandoned before completing");
        }
        self.state.phase = SessionPhase::Validating;
        self.state.form = FormFields {
            filename: filename.to_string(),
            before_code: before_code.to_string(),
            after_code: after_code.to_string(),
        };
        self.state.active_history_id = None;

        let missing = guards::missing_fields(credentials, filename, before_code, after_code);
        if !missing.is_empty() {
            return self.fail(guards::validation_failure(&missing));
        }

        self.state.phase = SessionPhase::Generating;
        self.state.is_loading = true;
        self.state.error = None;
        self.state.change_notes.clear();

        let request = GenerationRequest::new(filename, before_code, after_code);
        let prompt = request.to_prompt();
        debug!(filename, prompt_len = prompt.len(), "generating change notes");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.gateway.generate(&prompt, credentials) => Some(result),
        };

        match result {
            None => self.cancel(),
            Some(Ok(GenerationResult::Success { text })) => self.commit(request, text),
            Some(Ok(GenerationResult::Failure(failure))) if failure.kind == ErrorKind::Cancelled => {
                self.cancel()
            }
            Some(Ok(GenerationResult::Failure(failure))) => self.fail(failure),
            Some(Err(err)) => {
                error!(error = ?err, "generation gateway failed unexpectedly");
                self.fail(Failure::unknown())
            }
        }
    }

    /// Unknown ids leave the session untouched.
    pub fn select_history(&mut self, id: &str) -> bool {
        let Some(entry) = self.history.find_by_id(id) else {
            debug!(id, "history entry not found");
            return false;
        };
        self.state.form = FormFields::from(&entry);
        self.state.change_notes = entry.change_notes;
        self.state.active_history_id = Some(entry.id);
        self.state.error = None;
        true
    }

    pub fn clear_history(&mut self) -> bool {
        if let Err(err) = self.history.clear() {
            error!(error = ?err, "failed to clear history");
            self.state.error = Some(Failure::new(
                ErrorKind::Unknown,
                HISTORY_NOT_CLEARED_MESSAGE,
            ));
            return false;
        }
        self.state.form = FormFields::default();
        self.state.change_notes.clear();
        self.state.active_history_id = None;
        self.state.error = None;
        info!("history cleared");
        true
    }

    /// Writes the current notes as `<sanitized filename>.md`; `None` when there
    /// is nothing to export.
    pub fn export_current(&self, dir: &Path) -> Result<Option<PathBuf>> {
        if self.state.change_notes.trim().is_empty() {
            return Ok(None);
        }
        let path = export::write_notes(dir, &self.state.form.filename, &self.state.change_notes)?;
        Ok(Some(path))
    }

    fn commit(&mut self, request: GenerationRequest, text: String) -> GenerateOutcome {
        self.state.is_loading = false;
        self.state.change_notes = text.clone();
        let entry = HistoryEntry::new(
            request.filename(),
            request.before_code(),
            request.after_code(),
            text,
        );
        let entry_id = entry.id.clone();

        match self.history.append(entry) {
            Ok(entries) => {
                info!(entries = entries.len(), "change notes generated");
                self.state.active_history_id = Some(entry_id.clone());
                self.state.phase = SessionPhase::Succeeded;
                GenerateOutcome::Succeeded { entry_id }
            }
            Err(err) => {
                error!(error = ?err, "failed to save change notes to history");
                let failure = Failure::new(ErrorKind::Unknown, HISTORY_NOT_SAVED_MESSAGE);
                self.state.error = Some(failure.clone());
                self.state.phase = SessionPhase::Failed;
                GenerateOutcome::Failed(failure)
            }
        }
    }

    fn fail(&mut self, failure: Failure) -> GenerateOutcome {
        warn!(kind = failure.kind.as_str(), "generation failed");
        self.state.is_loading = false;
        self.state.change_notes.clear();
        self.state.error = Some(failure.clone());
        self.state.phase = SessionPhase::Failed;
        GenerateOutcome::Failed(failure)
    }

    fn cancel(&mut self) -> GenerateOutcome {
        info!("generation cancelled");
        self.state.is_loading = false;
        self.state.change_notes.clear();
        self.state.error = None;
        self.state.phase = SessionPhase::Failed;
        GenerateOutcome::Failed(Failure::cancelled())
    }
}
