// Student collection endpoints
//
// `GET /students`, `GET /students/{id}`, `POST /students`,
// `DELETE /students/{id}`. Ids are passed as strings and inserted as a
// single percent-encoded path segment.

use tracing::debug;

use crate::client::StudentClient;
use crate::error::Error;
use crate::models::{CreateStudentRequest, StudentResponse};

const COLLECTION: &str = "students";

impl StudentClient {
    /// Fetch the full collection in server order.
    pub async fn list_students(&self) -> Result<Vec<StudentResponse>, Error> {
        let url = self.resource_url(&[COLLECTION])?;
        let students: Vec<StudentResponse> = self.get(url).await?;
        debug!(count = students.len(), "listed students");
        Ok(students)
    }

    /// Fetch one record by id.
    pub async fn get_student(&self, id: &str) -> Result<StudentResponse, Error> {
        let url = self.resource_url(&[COLLECTION, id])?;
        self.get(url).await
    }

    /// Create a record and return what the service stored.
    pub async fn create_student(
        &self,
        body: &CreateStudentRequest,
    ) -> Result<StudentResponse, Error> {
        let url = self.resource_url(&[COLLECTION])?;
        self.post(url, body).await
    }

    /// Delete one record by id.
    pub async fn delete_student(&self, id: &str) -> Result<(), Error> {
        let url = self.resource_url(&[COLLECTION, id])?;
        self.delete(url).await
    }
}
