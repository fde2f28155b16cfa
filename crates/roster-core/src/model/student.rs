// ── Student domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::student_id::StudentId;

/// Enrollment status, rendered as the "Active"/"Inactive" badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
}

impl From<bool> for StudentStatus {
    fn from(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}

/// A record as stored by the service. Never patched locally: the listing
/// is replaced wholesale after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    /// Student-facing code, distinct from `id`.
    pub code: String,
    pub active: bool,
}

impl StudentRecord {
    pub fn status(&self) -> StudentStatus {
        StudentStatus::from(self.active)
    }
}

/// Local-only record being composed for creation. Has no id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudentDraft {
    pub name: String,
    pub code: String,
    pub active: bool,
}

impl NewStudentDraft {
    pub fn new(name: impl Into<String>, code: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            active,
        }
    }

    /// Presence check: both `name` and `code` must be non-empty.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.code.is_empty()
    }

    /// Whether the draft is in its reset state.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
