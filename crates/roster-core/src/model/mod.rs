// ── Domain model ──

pub mod student;
pub mod student_id;

pub use student::{NewStudentDraft, StudentRecord, StudentStatus};
pub use student_id::StudentId;
