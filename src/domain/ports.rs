use crate::domain::model::Address;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Resolves a postal code into the street-level part of an address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<Address>;
}
