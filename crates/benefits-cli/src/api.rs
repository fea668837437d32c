//! Benefits API Client
//!
//! `BenefitStore` implementation over the REST API
//! (`/api/v1/beneficios`, `/ativos`, `/transferir`).

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use benefits::{Benefit, BenefitId, BenefitStore, DomainError, MutationRequest, TransferRequest};

/// API Client for the benefits service
pub struct BenefitsClient {
    client: Client,
    base_url: String,
}

impl BenefitsClient {
    /// Create a new API client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send and decode a JSON body
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let resp = self.execute(request).await?;
        resp.json()
            .await
            .map_err(|e| DomainError::store(format!("Failed to parse response: {}", e)))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let resp = request.send().await.map_err(|e| {
            tracing::warn!("Request to benefits API failed: {}", e);
            DomainError::store(format!("Failed to connect to benefits API: {}", e))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!("Benefits API error ({}): {}", status, message);
            return Err(DomainError::store(message));
        }

        Ok(resp)
    }
}

const ACTIVE_PATH: &str = "ativos";
const TRANSFER_PATH: &str = "transferir";

/// The server's `message` field plus any per-field `errors`, or the HTTP
/// status line
pub fn error_message(status: StatusCode, body: &str) -> String {
    let value = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = value
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty());

    let fields: Vec<String> = value
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|e| e.as_object())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|(field, text)| text.as_str().map(|t| format!("{}: {}", field, t)))
                .collect()
        })
        .unwrap_or_default();

    match (message, fields.is_empty()) {
        (Some(message), true) => message.to_string(),
        (Some(message), false) => format!("{} ({})", message, fields.join("; ")),
        (None, false) => fields.join("; "),
        (None, true) => {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        }
    }
}

#[async_trait]
impl BenefitStore for BenefitsClient {
    async fn list_all(&self) -> Result<Vec<Benefit>, DomainError> {
        self.fetch(self.client.get(self.url(""))).await
    }

    async fn list_active(&self) -> Result<Vec<Benefit>, DomainError> {
        self.fetch(self.client.get(self.url(ACTIVE_PATH))).await
    }

    async fn get_by_id(&self, id: BenefitId) -> Result<Benefit, DomainError> {
        self.fetch(self.client.get(self.url(&id.to_string()))).await
    }

    async fn create(&self, request: &MutationRequest) -> Result<Benefit, DomainError> {
        self.fetch(self.client.post(self.url("")).json(request))
            .await
    }

    async fn update(
        &self,
        id: BenefitId,
        request: &MutationRequest,
    ) -> Result<Benefit, DomainError> {
        self.fetch(self.client.put(self.url(&id.to_string())).json(request))
            .await
    }

    async fn deactivate(&self, id: BenefitId) -> Result<(), DomainError> {
        self.execute(self.client.delete(self.url(&id.to_string())))
            .await?;
        Ok(())
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), DomainError> {
        self.execute(self.client.post(self.url(TRANSFER_PATH)).json(request))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_server_message() {
        let body = r#"{"status":400,"message":"Insufficient balance in benefit 1","path":"uri=/api/v1/beneficios/transferir"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Insufficient balance in benefit 1"
        );
    }

    #[test]
    fn test_error_message_appends_field_errors() {
        let body = r#"{
            "status": 400,
            "message": "Erro de validação",
            "path": "uri=/api/v1/beneficios",
            "errors": {
                "valor": "Valor não pode ser nulo",
                "nome": "Nome não pode ser vazio"
            }
        }"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Erro de validação (nome: Nome não pode ser vazio; valor: Valor não pode ser nulo)"
        );

        let body = r#"{"errors":{"deId":"ID de origem não pode ser nulo"}}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "deId: ID de origem não pode ser nulo"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, ""),
            "HTTP 404: Not Found"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":""}"#),
            "HTTP 500: Internal Server Error"
        );
    }

    #[test]
    fn test_urls() {
        let client =
            BenefitsClient::new("http://localhost:8080/api/v1/beneficios/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.url(""), "http://localhost:8080/api/v1/beneficios");
        assert_eq!(client.url("7"), "http://localhost:8080/api/v1/beneficios/7");
        assert_eq!(
            client.url(ACTIVE_PATH),
            "http://localhost:8080/api/v1/beneficios/ativos"
        );
        assert_eq!(
            client.url(TRANSFER_PATH),
            "http://localhost:8080/api/v1/beneficios/transferir"
        );
    }
}
