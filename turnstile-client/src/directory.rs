//! Employee directory operations
//!
//! The remote half of the employee table: list the collection, flip an
//! employee's access status, delete an employee. Nothing here retries; a
//! failure is returned once and the caller decides what to surface.

use async_trait::async_trait;

use shared::{Ack, EmployeeId, EmployeeRecord, LoginRequest, LoginResponse, StatusChange};

use crate::{AccessToken, ClientConfig, ClientResult, NetworkHttpClient, Operation};

/// Remote employee collection
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `GET /admin/employees`
    async fn list(&self, token: &AccessToken) -> ClientResult<Vec<EmployeeRecord>>;

    /// `PATCH /admin/employees/{uuid}/status`
    async fn set_active(
        &self,
        id: &EmployeeId,
        active: bool,
        token: &AccessToken,
    ) -> ClientResult<Ack>;

    /// `DELETE /admin/employees/{uuid}`
    async fn remove(&self, id: &EmployeeId, token: &AccessToken) -> ClientResult<Ack>;
}

/// Directory client over HTTP
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: NetworkHttpClient,
}

impl DirectoryClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Exchange admin credentials for a bearer token (`POST /admin/login`)
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let form = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let url = self.http.endpoint(&["admin", "login"])?;
        self.http.post_form(url, &form, Operation::Login).await
    }
}

#[async_trait]
impl DirectoryApi for DirectoryClient {
    async fn list(&self, token: &AccessToken) -> ClientResult<Vec<EmployeeRecord>> {
        let url = self.http.endpoint(&["admin", "employees"])?;
        let records: Vec<EmployeeRecord> =
            self.http.get(url, token, Operation::ListEmployees).await?;
        tracing::debug!(count = records.len(), "fetched employees");
        Ok(records)
    }

    async fn set_active(
        &self,
        id: &EmployeeId,
        active: bool,
        token: &AccessToken,
    ) -> ClientResult<Ack> {
        let url = self
            .http
            .endpoint(&["admin", "employees", id.as_str(), "status"])?;
        let change = StatusChange {
            employee_uuid: id.clone(),
            is_active: active,
        };
        let body = self
            .http
            .patch(url, &change, token, Operation::UpdateStatus)
            .await?;
        tracing::info!(employee = %id, active, "employee status updated");
        Ok(Ack::from_body(&body))
    }

    async fn remove(&self, id: &EmployeeId, token: &AccessToken) -> ClientResult<Ack> {
        let url = self.http.endpoint(&["admin", "employees", id.as_str()])?;
        let body = self
            .http
            .delete(url, token, Operation::DeleteEmployee)
            .await?;
        tracing::info!(employee = %id, "employee deleted");
        Ok(Ack::from_body(&body))
    }
}
