use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Address lookup request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("CEP não encontrado: {cep}")]
    CepNotFound { cep: String },
}

impl IntakeError {
    /// Message suitable for showing next to the form field or on stderr.
    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::ApiError(_) => "Erro ao buscar CEP".to_string(),
            IntakeError::CepNotFound { .. } => "CEP não encontrado".to_string(),
            IntakeError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_message() {
        let err = IntakeError::CepNotFound {
            cep: "99999999".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "CEP não encontrado");

        let err = IntakeError::ValidationError {
            message: "CEP deve ter 8 dígitos".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "CEP deve ter 8 dígitos");
    }
}
