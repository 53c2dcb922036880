use crate::pipeline::PredictionOutcome;

/// Where the session sits between UI interactions. The pipeline may run
/// only from `Requested` with a staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FileStaged,
    Requested,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::FileStaged => "file_staged",
            SessionPhase::Requested => "requested",
        }
    }
}

/// The uploaded molecule list, held verbatim until a predict action
/// consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub file_name: String,
    pub contents: String,
}

/// Per-user session state. Mutated only by the upload/predict/reset
/// handlers; everything else reads.
#[derive(Debug, Default)]
pub struct Session {
    staged: Option<StagedFile>,
    prediction_requested: bool,
    outcome: Option<PredictionOutcome>,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        match (&self.staged, self.prediction_requested) {
            (None, _) => SessionPhase::Idle,
            (Some(_), false) => SessionPhase::FileStaged,
            (Some(_), true) => SessionPhase::Requested,
        }
    }

    /// Upload event: stage the file, leave the request flag alone.
    pub fn stage_upload(&mut self, file: StagedFile) {
        self.staged = Some(file);
    }

    /// Predict action. With a staged file this moves the session to
    /// `Requested` and hands back the contents for exactly one pipeline
    /// run. Without one it clears the request flag and returns None; the
    /// caller surfaces the warning and must not run the pipeline.
    pub fn request_predict(&mut self) -> Option<StagedFile> {
        match &self.staged {
            Some(file) => {
                self.prediction_requested = true;
                Some(file.clone())
            }
            None => {
                self.prediction_requested = false;
                None
            }
        }
    }

    /// Cache a completed run so re-renders never re-invoke the tool.
    pub fn store_outcome(&mut self, outcome: PredictionOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    pub fn staged_file_name(&self) -> Option<&str> {
        self.staged.as_ref().map(|f| f.file_name.as_str())
    }

    pub fn reset(&mut self) {
        *self = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged() -> StagedFile {
        StagedFile {
            file_name: "molecules.txt".to_string(),
            contents: "CCO ethanol\n".to_string(),
        }
    }

    #[test]
    fn starts_idle() {
        let session = Session::default();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn upload_stages_without_requesting() {
        let mut session = Session::default();
        session.stage_upload(staged());
        assert_eq!(session.phase(), SessionPhase::FileStaged);
    }

    #[test]
    fn predict_with_file_moves_to_requested() {
        let mut session = Session::default();
        session.stage_upload(staged());
        let file = session.request_predict();
        assert_eq!(file, Some(staged()));
        assert_eq!(session.phase(), SessionPhase::Requested);
    }

    #[test]
    fn predict_without_file_clears_the_request_flag() {
        let mut session = Session::default();
        session.stage_upload(staged());
        session.request_predict();

        session.reset();
        assert!(session.request_predict().is_none());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn reset_drops_file_and_outcome() {
        let mut session = Session::default();
        session.stage_upload(staged());
        session.request_predict();
        session.store_outcome(crate::pipeline::PredictionOutcome {
            molecules: vec![],
            descriptor_shape: (0, 0),
            selected_shape: (0, 0),
            results: vec![],
        });

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.outcome().is_none());
        assert!(session.staged_file_name().is_none());
    }
}
