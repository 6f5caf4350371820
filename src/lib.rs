pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::IntakeConfig;

pub use crate::adapters::ViaCepClient;
pub use crate::core::birth_date::validate_birth_date;
pub use crate::core::cep::{format_cep, validate_cep};
pub use crate::core::cpf::{format_cpf, validate_cpf};
pub use crate::core::email::validate_email;
pub use crate::core::form::{validate_form, validate_login, FieldErrors, FieldKey, FormRules};
pub use crate::core::video::{extract_video_info, validate_video_url, Platform, VideoInfo};
pub use crate::domain::model::{CandidateForm, LoginForm};
pub use crate::domain::ports::AddressLookup;
pub use crate::utils::error::{IntakeError, Result};
