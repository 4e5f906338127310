//! Core data model of an edit session.
//!
//! An [`EditSession`] holds the committed snapshot, the edit buffer, the
//! reference catalog and transient UI flags.

pub mod catalog;
pub mod mapping;
pub mod session;
pub mod snapshot;
pub mod ui;

pub use catalog::{
    PlatformVariant, PlatformVariantId, ReferenceData, Style, StyleId, Template, TemplateId,
    TemplateOption, TemplateOptionValue, TemplateVariant, TemplateVariantId,
};
pub use mapping::VariantMapping;
pub use session::{EditSession, InitializationPayload};
pub use snapshot::Snapshot;
pub use ui::{ActionResult, SaveAttemptId, UiState};
