//! The intake form as typed data.
//!
//! Serde names follow the form UI's field names so an exported form state
//! (JSON or TOML) loads directly.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub cpf: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(rename = "nomeCompleto")]
    pub full_name: String,
    pub cpf: String,
    pub rg: String,
    #[serde(rename = "orgaoExpedidor")]
    pub rg_issuer: String,
    #[serde(rename = "ufRg")]
    pub rg_state: String,
    #[serde(rename = "emissaoRg")]
    pub rg_issue_date: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: String,
    #[serde(rename = "estadoCivil")]
    pub marital_status: String,
    #[serde(rename = "nacionalidade")]
    pub nationality: String,
    #[serde(rename = "tituloEleitor")]
    pub voter_title: String,
    #[serde(rename = "zona")]
    pub voter_zone: String,
    #[serde(rename = "secao")]
    pub voter_section: String,
    #[serde(rename = "carteiraReservista")]
    pub reservist_certificate: String,
    #[serde(rename = "serie")]
    pub reservist_series: String,
    #[serde(rename = "regiao")]
    pub reservist_region: String,
    #[serde(rename = "pisPasep")]
    pub pis_pasep: String,
    #[serde(rename = "pcd")]
    pub disability: String,
    #[serde(rename = "tipoDeficiencia")]
    pub disability_kind: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            cpf: String::new(),
            rg: String::new(),
            rg_issuer: String::new(),
            rg_state: String::new(),
            rg_issue_date: String::new(),
            birth_date: String::new(),
            marital_status: String::new(),
            nationality: "Brasileira".to_string(),
            voter_title: String::new(),
            voter_zone: String::new(),
            voter_section: String::new(),
            reservist_certificate: String::new(),
            reservist_series: String::new(),
            reservist_region: String::new(),
            pis_pasep: String::new(),
            disability: String::new(),
            disability_kind: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(rename = "telefoneFixo")]
    pub landline: String,
    #[serde(rename = "celular")]
    pub mobile: String,
    pub email: String,
    #[serde(rename = "emailAlternativo")]
    pub alternative_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
}

/// Stable identifier of a repeatable history entry within one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalEntry {
    #[serde(rename = "profissao")]
    pub occupation: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "dataInicio")]
    pub start_date: String,
    #[serde(rename = "dataFim")]
    pub end_date: String,
    #[serde(rename = "atual")]
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationalEntry {
    #[serde(rename = "escolaridade")]
    pub schooling: String,
    /// `superior` or `tecnico`.
    #[serde(rename = "nivel")]
    pub level: String,
    #[serde(rename = "areaFormacao")]
    pub field_of_study: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "dataFormatura")]
    pub graduation_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum EntryKind {
    #[serde(rename = "profissional")]
    Professional(ProfessionalEntry),
    #[serde(rename = "educacional")]
    Educational(EducationalEntry),
}

impl EntryKind {
    pub fn professional() -> Self {
        EntryKind::Professional(ProfessionalEntry::default())
    }

    pub fn educational() -> Self {
        EntryKind::Educational(EducationalEntry::default())
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Professional(_) => "Experiência Profissional",
            EntryKind::Educational(_) => "Formação Educacional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    #[serde(flatten)]
    pub kind: EntryKind,
}

/// An uploaded document, described by what the browser reports about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateForm {
    #[serde(flatten)]
    pub personal: PersonalInfo,
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(flatten)]
    pub address: Address,
    #[serde(rename = "informacoesProfissionaisEducacionais")]
    pub history: Vec<HistoryEntry>,
    #[serde(rename = "linkVideo", skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    #[serde(rename = "arquivos")]
    pub attachments: Vec<Attachment>,
}

impl CandidateForm {
    /// A blank form, pre-filled with the identity used to log in and a single
    /// empty professional entry.
    pub fn new(login: &LoginForm) -> Self {
        Self {
            personal: PersonalInfo {
                cpf: login.cpf.clone(),
                birth_date: login.birth_date.clone(),
                ..PersonalInfo::default()
            },
            history: vec![HistoryEntry {
                id: EntryId(1),
                kind: EntryKind::professional(),
            }],
            ..Self::default()
        }
    }

    /// The video link, treating an empty or blank string as absent.
    pub fn video_link(&self) -> Option<&str> {
        self.video_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}
