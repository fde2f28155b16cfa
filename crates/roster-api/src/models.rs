// Wire types for the student service.
//
// Reads come back as `{id, name, code, active}`; creates are submitted as
// `{studentCode, name, isActive}`. Some deployments echo the create field
// names on responses, so both spellings are accepted when decoding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as it appears on the wire: a JSON string or a JSON integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A stored student record as returned by `GET /students[/{id}]` and
/// `POST /students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResponse {
    #[serde(alias = "_id")]
    pub id: WireId,
    pub name: String,
    #[serde(alias = "studentCode")]
    pub code: String,
    #[serde(alias = "isActive")]
    pub active: bool,
}

/// Body of `POST /students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub student_code: String,
    pub name: String,
    pub is_active: bool,
}
