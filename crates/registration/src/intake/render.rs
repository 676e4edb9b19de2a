use serde::Serialize;

use super::catalog::lookup_program;
use super::domain::{FieldErrors, NormalizedField, NormalizedSubmission, ReferenceId, SubmissionResult};

pub const DEFAULT_CELEBRATION_PIECES: usize = 18;

pub const PREVIEW_NAME_PLACEHOLDER: &str = "Your Name";
pub const PREVIEW_PROGRAM_PLACEHOLDER: &str = "Program (preview)";
pub const PREVIEW_EMAIL_PLACEHOLDER: &str = "you@example.com";
pub const PREVIEW_PHONE_PLACEHOLDER: &str = "—";
pub const PREVIEW_BIO_PLACEHOLDER: &str = "A short bio will appear here.";

/// Which of the three mutually exclusive page layouts is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderBranch {
    BlankForm,
    FormWithErrors,
    Confirmation,
}

/// Values written back into the form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub full_name: NormalizedField,
    pub email: NormalizedField,
    pub phone: NormalizedField,
    /// Catalog code to mark `selected`, echoed from the raw submission.
    pub selected_program: Option<&'static str>,
    pub bio: NormalizedField,
}

/// Live preview card. Empty fields show their placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewCard {
    pub name: NormalizedField,
    pub program: NormalizedField,
    pub email: NormalizedField,
    pub phone: NormalizedField,
    pub bio: NormalizedField,
}

/// Read-only summary shown after an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub reference_id: ReferenceId,
    /// Plain text; escape before embedding in markup.
    pub program_name: String,
    pub full_name: NormalizedField,
    pub email: NormalizedField,
    pub phone: NormalizedField,
    pub bio: NormalizedField,
}

/// Asks the presentation layer for a decorative overlay of `pieces` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CelebrationSignal {
    pub pieces: usize,
}

/// Everything needed to draw one response page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    pub branch: RenderBranch,
    pub show_errors: bool,
    pub show_confirmation: bool,
    pub accepted: bool,
    pub fields: FormFields,
    pub errors: FieldErrors,
    /// Bio length as counted server-side, on the escaped value.
    pub bio_count: usize,
    pub preview: PreviewCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<CelebrationSignal>,
}

impl RenderState {
    pub fn title(&self) -> &'static str {
        if self.show_confirmation {
            "Submission Success"
        } else {
            "Student Registration Form"
        }
    }
}

/// Pure mapping from an evaluation outcome to a `RenderState`.
#[derive(Debug, Clone, Copy)]
pub struct RenderStateBuilder {
    celebration_pieces: usize,
}

impl Default for RenderStateBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CELEBRATION_PIECES)
    }
}

impl RenderStateBuilder {
    pub fn new(celebration_pieces: usize) -> Self {
        Self { celebration_pieces }
    }

    pub fn celebration_pieces(&self) -> usize {
        self.celebration_pieces
    }

    /// Initial page load: empty form, no errors, no confirmation.
    pub fn blank(&self) -> RenderState {
        let values = NormalizedSubmission::default();
        RenderState {
            branch: RenderBranch::BlankForm,
            show_errors: false,
            show_confirmation: false,
            accepted: false,
            fields: FormFields::default(),
            errors: FieldErrors::new(),
            bio_count: 0,
            preview: preview_card(&values, None),
            confirmation: None,
            celebration: None,
        }
    }

    pub fn build(&self, result: &SubmissionResult, was_submitted: bool) -> RenderState {
        if !was_submitted {
            return self.blank();
        }

        let values = result.normalized_values();
        let fields = FormFields {
            full_name: values.full_name.clone(),
            email: values.email.clone(),
            phone: values.phone.clone(),
            selected_program: lookup_program(result.selected_program()).map(|entry| entry.code),
            bio: values.bio.clone(),
        };
        let preview = preview_card(values, result.program_name());
        let bio_count = values.bio.char_count();

        let confirmation = match (result.accepted(), result.reference_id(), result.program_name())
        {
            (true, Some(reference_id), Some(program_name)) => Some(Confirmation {
                reference_id: reference_id.clone(),
                program_name: program_name.to_string(),
                full_name: values.full_name.clone(),
                email: values.email.clone(),
                phone: values.phone.clone(),
                bio: values.bio.clone(),
            }),
            _ => None,
        };

        match confirmation {
            Some(confirmation) => RenderState {
                branch: RenderBranch::Confirmation,
                show_errors: false,
                show_confirmation: true,
                accepted: true,
                fields,
                errors: FieldErrors::new(),
                bio_count,
                preview,
                confirmation: Some(confirmation),
                celebration: Some(CelebrationSignal {
                    pieces: self.celebration_pieces,
                }),
            },
            None => RenderState {
                branch: RenderBranch::FormWithErrors,
                show_errors: true,
                show_confirmation: false,
                accepted: false,
                fields,
                errors: result.errors().clone(),
                bio_count,
                preview,
                confirmation: None,
                celebration: None,
            },
        }
    }
}

fn preview_card(values: &NormalizedSubmission, program_name: Option<&str>) -> PreviewCard {
    let or_placeholder = |value: &NormalizedField, placeholder: &str| {
        if value.is_empty() {
            NormalizedField::from_plain(placeholder)
        } else {
            value.clone()
        }
    };

    PreviewCard {
        name: or_placeholder(&values.full_name, PREVIEW_NAME_PLACEHOLDER),
        program: NormalizedField::from_plain(program_name.unwrap_or(PREVIEW_PROGRAM_PLACEHOLDER)),
        email: or_placeholder(&values.email, PREVIEW_EMAIL_PLACEHOLDER),
        phone: or_placeholder(&values.phone, PREVIEW_PHONE_PLACEHOLDER),
        bio: or_placeholder(&values.bio, PREVIEW_BIO_PLACEHOLDER),
    }
}
