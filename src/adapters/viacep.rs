//! Postal-code lookup against the ViaCEP web service.

use crate::core::cep;
use crate::domain::model::Address;
use crate::domain::ports::AddressLookup;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ViaCepResponse {
    cep: Option<String>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    /// `true` (or `"true"` on newer deployments) when the CEP does not exist.
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            _ => false,
        }
    }

    fn into_address(self, requested: &str) -> Address {
        Address {
            cep: self.cep.unwrap_or_else(|| requested.to_string()),
            street: self.logradouro.unwrap_or_default(),
            district: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state: self.uf.unwrap_or_default(),
            ..Address::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    fn endpoint(&self, digits: &str) -> String {
        format!("{}/ws/{}/json/", self.base_url, digits)
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, input: &str) -> Result<Address> {
        let digits = cep::normalize(input);
        if digits.len() != cep::CEP_LENGTH {
            return Err(IntakeError::ValidationError {
                message: "CEP deve ter 8 dígitos".to_string(),
            });
        }

        let url = self.endpoint(&digits);
        tracing::debug!("Looking up CEP {} at {}", digits, url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("ViaCEP response status: {}", response.status());

        let body: ViaCepResponse = response.error_for_status()?.json().await?;
        if body.not_found() {
            tracing::info!("CEP {} not found", digits);
            return Err(IntakeError::CepNotFound { cep: digits });
        }

        Ok(body.into_address(input))
    }
}

/// Copies the looked-up street, district, city and state into a form address.
/// The CEP typed by the user, the number and the complement are kept.
pub fn apply_to(found: &Address, target: &mut Address) {
    target.street = found.street.clone();
    target.district = found.district.clone();
    target.city = found.city.clone();
    target.state = found.state.clone();
}
