//! User-triggered flows that talk to the backend.
//!
//! Every successful mutation is followed by exactly one full resync
//! (students, then grades). Nothing retries.

use tracing::{debug, warn};

use crate::api::Backend;
use crate::collate::Collator;
use crate::error::{ApiError, AuthError, ErrorClass};
use crate::form::{FormDraft, LoginDraft, Mutation, RegisterDraft};
use crate::modal::Modal;
use crate::model::{Grade, Student, StudentId};
use crate::session::{clear_session, Session, SessionStore};
use crate::state::{ClientState, Snapshot};

pub const CONNECTION_ERROR: &str = "Connection error";
pub const PREDICTION_FALLBACK: &str = "Prediction unavailable";
pub const SELECT_STUDENT: &str = "Select a student";

/// Outcome of one load cycle, kept per collection so a failing loader
/// never discards what the other one fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Resync {
    pub students: Result<Vec<Student>, ApiError>,
    /// `None` when the students request ended the session and grades were
    /// never requested.
    pub grades: Option<Result<Vec<Grade>, ApiError>>,
}

impl Resync {
    /// Apply whichever collections arrived. Returns the loader errors, in
    /// request order; state for a failed loader is left untouched.
    pub fn apply_to<C: Collator + ?Sized>(
        self,
        state: &mut ClientState,
        collator: &C,
    ) -> Vec<ApiError> {
        let mut errors = Vec::new();
        match (self.students, self.grades) {
            (Ok(students), Some(Ok(grades))) => {
                state.data_loaded(Snapshot { students, grades }, collator);
            }
            (students, grades) => {
                match students {
                    Ok(list) => state.students_loaded(list, collator),
                    Err(e) => errors.push(e),
                }
                match grades {
                    Some(Ok(list)) => state.grades_loaded(list),
                    Some(Err(e)) => errors.push(e),
                    None => {}
                }
            }
        }
        errors
    }
}

/// Fetch both collections, students first. Grades are still requested when
/// students fail, unless that failure ended the session.
pub async fn resync<B: Backend>(backend: &B, session: &Session) -> Resync {
    let students = backend.fetch_students(session).await;
    if let Err(e) = &students {
        if e.class() == ErrorClass::Session {
            return Resync {
                students,
                grades: None,
            };
        }
        warn!("Students load failed, still loading grades: {}", e);
    }
    let grades = Some(backend.fetch_grades(session).await);
    Resync { students, grades }
}

/// Drop the stored session on a 401. Returns true when the caller must
/// return to the logged-out view.
pub fn end_session_if_unauthorized(err: &ApiError, store: &impl SessionStore) -> bool {
    if err.class() == ErrorClass::Session {
        warn!("Session rejected by backend, signing out");
        clear_session(store);
        true
    } else {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Backend accepted; carries the follow-up resync.
    Saved(Resync),
    /// Backend refused or the request failed; nothing was reloaded.
    Failed { error: ApiError, notice: String },
}

impl MutationOutcome {
    /// Move the modal to its post-submit phase.
    pub fn settle<F: FormDraft>(&self, modal: &mut Modal<F>) {
        match self {
            MutationOutcome::Saved(_) => modal.succeeded(),
            MutationOutcome::Failed { notice, .. } => modal.failed(notice.clone()),
        }
    }
}

fn notice_for(mutation: &Mutation, err: &ApiError) -> String {
    if let ApiError::Rejected { message: Some(m) } = err {
        if !m.is_empty() {
            return m.clone();
        }
    }
    match err.class() {
        ErrorClass::Network => CONNECTION_ERROR.to_string(),
        ErrorClass::Session => err.to_string(),
        ErrorClass::Application => mutation.failure_notice().to_string(),
    }
}

/// Send one mutation; on success call `on_accepted`, then run the resync.
pub async fn mutate_and_resync<B: Backend>(
    backend: &B,
    session: &Session,
    mutation: &Mutation,
    on_accepted: impl FnOnce(),
) -> MutationOutcome {
    match backend.mutate(session, mutation).await {
        Ok(()) => {
            debug!("Mutation accepted, resyncing");
            on_accepted();
            MutationOutcome::Saved(resync(backend, session).await)
        }
        Err(error) => {
            let notice = notice_for(mutation, &error);
            MutationOutcome::Failed { error, notice }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionDisplay {
    Text(String),
    /// Backend answered without a prediction.
    Fallback,
    ConnectionError,
    /// No student picked; nothing was requested.
    NoSelection,
    /// 401: the caller must sign out.
    SignedOut,
}

impl PredictionDisplay {
    pub fn message(&self) -> &str {
        match self {
            PredictionDisplay::Text(t) => t,
            PredictionDisplay::Fallback => PREDICTION_FALLBACK,
            PredictionDisplay::ConnectionError => CONNECTION_ERROR,
            PredictionDisplay::NoSelection => SELECT_STUDENT,
            PredictionDisplay::SignedOut => "",
        }
    }
}

pub async fn lookup_prediction<B: Backend>(
    backend: &B,
    session: &Session,
    student: Option<StudentId>,
) -> PredictionDisplay {
    let Some(student) = student else {
        return PredictionDisplay::NoSelection;
    };
    match backend.predict(session, student).await {
        Ok(Some(text)) => PredictionDisplay::Text(text),
        Ok(None) => PredictionDisplay::Fallback,
        Err(e) => match e.class() {
            ErrorClass::Session => PredictionDisplay::SignedOut,
            ErrorClass::Network => {
                warn!("Prediction request failed: {}", e);
                PredictionDisplay::ConnectionError
            }
            ErrorClass::Application => {
                warn!("Prediction unavailable: {}", e);
                PredictionDisplay::Fallback
            }
        },
    }
}

/// Log in and persist the session.
pub async fn sign_in<B: Backend>(
    backend: &B,
    store: &impl SessionStore,
    draft: &LoginDraft,
) -> Result<Session, AuthError> {
    let (username, password) = draft.validate()?;
    let session = backend.login(&username, &password).await?;
    session.save(store);
    Ok(session)
}

pub async fn sign_up<B: Backend>(backend: &B, draft: &RegisterDraft) -> Result<String, AuthError> {
    let (username, password, email) = draft.validate()?;
    Ok(backend.register(&username, &password, &email).await?)
}

pub fn sign_out(store: &impl SessionStore) {
    clear_session(store);
}
