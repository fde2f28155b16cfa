// ── API-to-domain type conversions ──
//
// Bridges raw `roster_api` wire types into `roster_core::model` and back
// for the create body.

use roster_api::{CreateStudentRequest, StudentResponse, WireId};

use crate::model::{NewStudentDraft, StudentId, StudentRecord};

impl From<WireId> for StudentId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(n) => StudentId::from(n),
            WireId::Text(s) => StudentId::from(s),
        }
    }
}

impl From<StudentResponse> for StudentRecord {
    fn from(r: StudentResponse) -> Self {
        Self {
            id: r.id.into(),
            name: r.name,
            code: r.code,
            active: r.active,
        }
    }
}

impl From<&NewStudentDraft> for CreateStudentRequest {
    fn from(d: &NewStudentDraft) -> Self {
        Self {
            student_code: d.code.clone(),
            name: d.name.clone(),
            is_active: d.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_collapse() {
        assert_eq!(StudentId::from(WireId::Int(1)), StudentId::from("1"));
        assert_eq!(StudentId::from(WireId::Text("1".into())), StudentId::from("1"));
    }

    #[test]
    fn response_to_record() {
        let record = StudentRecord::from(StudentResponse {
            id: WireId::Int(42),
            name: "Ann".into(),
            code: "A1".into(),
            active: true,
        });
        assert_eq!(record.id.as_str(), "42");
        assert_eq!(record.code, "A1");
        assert!(record.active);
    }

    #[test]
    fn draft_to_request() {
        let req = CreateStudentRequest::from(&NewStudentDraft::new("Bo", "B2", false));
        assert_eq!(req.student_code, "B2");
        assert_eq!(req.name, "Bo");
        assert!(!req.is_active);
    }
}
