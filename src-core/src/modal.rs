//! Modal form lifecycle: closed → open → submitting → closed | open.

use crate::error::FormError;
use crate::form::{FormDraft, Mutation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    AddStudent,
    EditStudent,
    AddGrade,
    EditGrade,
}

impl ModalKind {
    pub fn title(&self) -> &'static str {
        match self {
            ModalKind::AddStudent => "Add student",
            ModalKind::EditStudent => "Edit student",
            ModalKind::AddGrade => "Add grade",
            ModalKind::EditGrade => "Edit grade",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            ModalKind::AddStudent | ModalKind::AddGrade => "Add",
            ModalKind::EditStudent | ModalKind::EditGrade => "Save",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open,
    Submitting,
}

/// One modal of a given kind and its draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal<F: FormDraft> {
    kind: ModalKind,
    phase: ModalPhase,
    target: Option<F::Target>,
    pub draft: F,
    notice: Option<String>,
}

impl<F> Modal<F>
where
    F: FormDraft + Default,
{
    pub fn closed(kind: ModalKind) -> Self {
        Self {
            kind,
            phase: ModalPhase::Closed,
            target: None,
            draft: F::default(),
            notice: None,
        }
    }
}

impl<F: FormDraft> Modal<F> {
    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn target(&self) -> Option<F::Target> {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == ModalPhase::Submitting
    }

    /// Last failure message shown for this modal, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Open with a fresh draft; replaces whatever was open in this slot.
    pub fn show(&mut self, kind: ModalKind, draft: F, target: Option<F::Target>) {
        self.kind = kind;
        self.draft = draft;
        self.target = target;
        self.notice = None;
        self.phase = ModalPhase::Open;
    }

    /// Close without any request.
    pub fn cancel(&mut self) {
        self.phase = ModalPhase::Closed;
        self.notice = None;
    }

    /// Enter `Submitting` and hand out the mutation to send.
    ///
    /// Returns `Ok(None)` when the modal is not open (closed, or a submit is
    /// already in flight). Validation errors keep the modal open.
    pub fn begin_submit(&mut self) -> Result<Option<Mutation>, FormError> {
        if self.phase != ModalPhase::Open {
            return Ok(None);
        }
        match self.draft.to_mutation(self.target) {
            Ok(mutation) => {
                self.notice = None;
                self.phase = ModalPhase::Submitting;
                Ok(Some(mutation))
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Backend accepted the mutation.
    pub fn succeeded(&mut self) {
        self.phase = ModalPhase::Closed;
        self.notice = None;
    }

    /// Backend refused or the request failed; the draft is kept as typed.
    pub fn failed(&mut self, notice: impl Into<String>) {
        self.phase = ModalPhase::Open;
        self.notice = Some(notice.into());
    }
}
