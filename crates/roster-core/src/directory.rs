// ── Remote collection access ──
//
// Domain-typed facade over `StudentClient`. One round-trip per call,
// no retries, no caching. Every API error becomes a
// `RemoteRequestFailure` tagged with the operation name.

use roster_api::{CreateStudentRequest, StudentClient};
use tracing::debug;
use url::Url;

use crate::config::RosterConfig;
use crate::error::CoreError;
use crate::model::{NewStudentDraft, StudentId, StudentRecord};

/// Create/read/delete access to the remote student collection.
///
/// Cheaply cloneable; clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct StudentDirectory {
    client: StudentClient,
}

impl StudentDirectory {
    /// Build a directory from runtime configuration.
    pub fn new(config: &RosterConfig) -> Result<Self, CoreError> {
        let client = StudentClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: StudentClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> &Url {
        self.client.base_url()
    }

    /// `GET /students`, whole collection in server order.
    pub async fn list_all(&self) -> Result<Vec<StudentRecord>, CoreError> {
        let students = self
            .client
            .list_students()
            .await
            .map_err(|e| CoreError::remote("list_all", &e))?;
        Ok(students.into_iter().map(StudentRecord::from).collect())
    }

    /// `POST /students`, returning the stored record with its assigned id.
    pub async fn create(&self, draft: &NewStudentDraft) -> Result<StudentRecord, CoreError> {
        let body = CreateStudentRequest::from(draft);
        let created = self
            .client
            .create_student(&body)
            .await
            .map_err(|e| CoreError::remote("create", &e))?;
        let record = StudentRecord::from(created);
        debug!(id = %record.id, "student created");
        Ok(record)
    }

    /// `DELETE /students/{id}`.
    pub async fn delete_by_id(&self, id: &StudentId) -> Result<(), CoreError> {
        self.client
            .delete_student(id.as_str())
            .await
            .map_err(|e| CoreError::remote("delete_by_id", &e))?;
        debug!(%id, "student deleted");
        Ok(())
    }

    /// `GET /students/{id}`. Not-found is just another failure here.
    pub async fn get_by_id(&self, id: &StudentId) -> Result<StudentRecord, CoreError> {
        self.client
            .get_student(id.as_str())
            .await
            .map(StudentRecord::from)
            .map_err(|e| CoreError::remote("get_by_id", &e))
    }
}
