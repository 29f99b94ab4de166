//! Client for the third-party exam result service

use async_trait::async_trait;
use std::time::Duration;

use super::{BackendClient, Result};
use crate::config::ResultApiConfig;
use crate::models::{SchoolResultInfo, StudentResultQuery, SubjectResult};

/// Where exam results come from
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Classes, sections, years and exam names for the search form
    async fn school_info(&self) -> Result<SchoolResultInfo>;

    /// Subject rows for one student and exam
    async fn student_result(&self, query: &StudentResultQuery) -> Result<Vec<SubjectResult>>;
}

/// `ResultSource` backed by the result service's public API
#[derive(Debug, Clone)]
pub struct ResultApiClient {
    client: BackendClient,
    school_code: u32,
}

impl ResultApiClient {
    pub fn new(config: &ResultApiConfig, timeout: Duration) -> Result<Self> {
        let client = BackendClient::with_base_url(&config.base_url, timeout, None)?;
        Ok(Self {
            client,
            school_code: config.school_code,
        })
    }

    pub fn school_code(&self) -> u32 {
        self.school_code
    }
}

#[async_trait]
impl ResultSource for ResultApiClient {
    async fn school_info(&self) -> Result<SchoolResultInfo> {
        self.client
            .get(
                "/api/schoolInfo-for-result",
                &[("school_code", self.school_code.to_string())],
            )
            .await
    }

    async fn student_result(&self, query: &StudentResultQuery) -> Result<Vec<SubjectResult>> {
        let query = query.normalized();
        tracing::debug!(
            "Looking up result for student {} ({} {})",
            query.student_id,
            query.exam_name,
            query.year
        );

        self.client
            .get(
                "/api/student-result",
                &[
                    ("student_id", query.student_id),
                    ("exam_name", query.exam_name),
                    ("year", query.year),
                    ("school_code", self.school_code.to_string()),
                ],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> ResultApiClient {
        let config = ResultApiConfig {
            base_url: server.base_url(),
            school_code: 10120,
        };
        ResultApiClient::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_school_info_sends_school_code() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/schoolInfo-for-result")
                    .query_param("school_code", "10120");
                then.status(200).json_body(serde_json::json!({
                    "classes": ["Six", "Seven"],
                    "sections": ["A"],
                    "academic_years": ["2024"],
                    "exam_names": ["Half Yearly", "Annual"]
                }));
            })
            .await;

        let info = client_for(&server).school_info().await.unwrap();

        mock.assert_async().await;
        assert_eq!(info.classes, vec!["Six", "Seven"]);
        assert_eq!(info.exam_names.len(), 2);
    }

    #[tokio::test]
    async fn test_student_result_lowercases_exam_name() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/student-result")
                    .query_param("student_id", "1001")
                    .query_param("exam_name", "annual")
                    .query_param("year", "2024")
                    .query_param("school_code", "10120");
                then.status(200).json_body(serde_json::json!([
                    { "id": 1, "name": "Karim", "student_id": "1001", "subject": "Bangla",
                      "total_marks": "78", "gpa": "4.00", "grade": "A" }
                ]));
            })
            .await;

        let query = StudentResultQuery {
            student_id: "1001".into(),
            exam_name: "Annual".into(),
            year: "2024".into(),
        };
        let rows = client_for(&server).student_result(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "Bangla");
        assert_eq!(rows[0].id, "1");
    }

    #[tokio::test]
    async fn test_student_result_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/student-result");
                then.status(500).json_body(serde_json::json!({ "message": "down" }));
            })
            .await;

        let err = client_for(&server)
            .student_result(&StudentResultQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
