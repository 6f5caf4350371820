pub mod attachments;
pub mod birth_date;
pub mod cep;
pub mod cpf;
pub mod digits;
pub mod email;
pub mod entries;
pub mod form;
pub mod video;

pub use crate::domain::model::{Address, CandidateForm, EntryId, EntryKind, LoginForm};
pub use crate::domain::ports::AddressLookup;
pub use crate::utils::error::Result;
