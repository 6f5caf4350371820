//! Whole-form validation.
//!
//! Each pass rebuilds a [`FieldErrors`] map from scratch; an empty map means
//! the form (or the login) can be submitted. Keys order the way the fields
//! appear on the form, so the first key is the field to focus.

use crate::core::attachments::{validate_attachments, AttachmentLimits};
use crate::core::birth_date::{meets_minimum_age, parse_date, MINIMUM_AGE};
use crate::core::cep::validate_cep;
use crate::core::cpf::validate_cpf;
use crate::core::email::validate_email;
use crate::core::video::validate_video_url;
use crate::domain::model::{CandidateForm, EntryId, EntryKind, HistoryEntry, LoginForm};
use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

pub const STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Form fields that can carry an error, in the order they appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Cpf,
    Rg,
    BirthDate,
    MaritalStatus,
    Mobile,
    Email,
    AlternativeEmail,
    Cep,
    Street,
    Number,
    District,
    City,
    State,
    Company,
    Role,
    StartDate,
    EndDate,
    Schooling,
    Institution,
    VideoLink,
    Attachments,
}

impl Field {
    /// The field's name in the form UI.
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "nomeCompleto",
            Field::Cpf => "cpf",
            Field::Rg => "rg",
            Field::BirthDate => "dataNascimento",
            Field::MaritalStatus => "estadoCivil",
            Field::Mobile => "celular",
            Field::Email => "email",
            Field::AlternativeEmail => "emailAlternativo",
            Field::Cep => "cep",
            Field::Street => "logradouro",
            Field::Number => "numero",
            Field::District => "bairro",
            Field::City => "cidade",
            Field::State => "estado",
            Field::Company => "empresa",
            Field::Role => "cargo",
            Field::StartDate => "dataInicio",
            Field::EndDate => "dataFim",
            Field::Schooling => "escolaridade",
            Field::Institution => "instituicao",
            Field::VideoLink => "linkVideo",
            Field::Attachments => "arquivos",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Field::FullName => "Nome completo é obrigatório",
            Field::Cpf => "CPF é obrigatório",
            Field::Rg => "RG é obrigatório",
            Field::BirthDate => "Data de nascimento é obrigatória",
            Field::MaritalStatus => "Estado civil é obrigatório",
            Field::Mobile => "Celular é obrigatório",
            Field::Email => "Email é obrigatório",
            Field::AlternativeEmail => "Email alternativo é obrigatório",
            Field::Cep => "CEP é obrigatório",
            Field::Street => "Logradouro é obrigatório",
            Field::Number => "Número é obrigatório",
            Field::District => "Bairro é obrigatório",
            Field::City => "Cidade é obrigatória",
            Field::State => "Estado é obrigatório",
            Field::Company => "Empresa é obrigatória",
            Field::Role => "Cargo é obrigatório",
            Field::StartDate => "Data de início é obrigatória",
            Field::EndDate => "Data de término é obrigatória",
            Field::Schooling => "Escolaridade é obrigatória",
            Field::Institution => "Instituição é obrigatória",
            Field::VideoLink => "Link do vídeo é obrigatório",
            Field::Attachments => "Arquivos são obrigatórios",
        }
    }

    /// 0 before the history section, 1 inside it, 2 after it.
    fn section(self) -> u8 {
        match self {
            Field::Company
            | Field::Role
            | Field::StartDate
            | Field::EndDate
            | Field::Schooling
            | Field::Institution => 1,
            Field::VideoLink | Field::Attachments => 2,
            _ => 0,
        }
    }
}

/// A field of the form, or a field of one history entry.
///
/// Entry keys carry the entry's position in the history list as well as its
/// id: ids only identify an entry, the position places it on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub field: Field,
    pub entry: Option<EntryId>,
    pub position: usize,
}

impl FieldKey {
    pub fn field(field: Field) -> Self {
        Self {
            field,
            entry: None,
            position: 0,
        }
    }

    /// Key of `field` in the entry `entry`, listed at `position` in the history.
    pub fn entry(field: Field, position: usize, entry: EntryId) -> Self {
        Self {
            field,
            entry: Some(entry),
            position,
        }
    }
}

impl Ord for FieldKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.field.section(), self.position, self.entry, self.field).cmp(&(
            other.field.section(),
            other.position,
            other.entry,
            other.field,
        ))
    }
}

impl PartialOrd for FieldKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry {
            Some(id) => write!(f, "{}_{}", self.field.name(), id),
            None => f.write_str(self.field.name()),
        }
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type FieldErrors = BTreeMap<FieldKey, String>;

/// The field to focus after a failed submit.
pub fn first_error(errors: &FieldErrors) -> Option<FieldKey> {
    errors.keys().next().copied()
}

/// Tunables of the validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRules {
    pub minimum_age: u32,
    pub attachments: AttachmentLimits,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            minimum_age: MINIMUM_AGE,
            attachments: AttachmentLimits::default(),
        }
    }
}

impl FormRules {
    fn birth_date_message(&self) -> String {
        format!(
            "Data de nascimento inválida ou idade menor que {} anos",
            self.minimum_age
        )
    }
}

struct ErrorCollector {
    errors: FieldErrors,
}

impl ErrorCollector {
    fn new() -> Self {
        Self {
            errors: FieldErrors::new(),
        }
    }

    fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.errors.entry(key).or_insert_with(|| message.into());
    }

    /// Flags a blank field. Returns true when the field has content.
    fn require(&mut self, key: FieldKey, value: &str) -> bool {
        if value.trim().is_empty() {
            self.insert(key, key.field.required_message());
            false
        } else {
            true
        }
    }

    fn check(&mut self, key: FieldKey, ok: bool, message: impl Into<String>) {
        if !ok {
            self.insert(key, message);
        }
    }
}

/// Validates the login gate on a fixed day.
pub fn validate_login_on(login: &LoginForm, rules: &FormRules, today: NaiveDate) -> FieldErrors {
    let mut c = ErrorCollector::new();

    let cpf = FieldKey::field(Field::Cpf);
    if c.require(cpf, &login.cpf) {
        c.check(cpf, validate_cpf(&login.cpf), "CPF inválido");
    }

    let birth = FieldKey::field(Field::BirthDate);
    if c.require(birth, &login.birth_date) {
        c.check(
            birth,
            meets_minimum_age(login.birth_date.as_str(), today, rules.minimum_age),
            rules.birth_date_message(),
        );
    }

    c.errors
}

/// Validates the CPF + birth date login.
pub fn validate_login(login: &LoginForm, rules: &FormRules) -> FieldErrors {
    validate_login_on(login, rules, Local::now().date_naive())
}

fn validate_entry(c: &mut ErrorCollector, position: usize, entry: &HistoryEntry) {
    let key = |field| FieldKey::entry(field, position, entry.id);

    match &entry.kind {
        EntryKind::Professional(p) => {
            c.require(key(Field::Company), &p.company);
            c.require(key(Field::Role), &p.role);
            if c.require(key(Field::StartDate), &p.start_date) {
                c.check(
                    key(Field::StartDate),
                    parse_date(&p.start_date).is_some(),
                    "Data de início inválida",
                );
            }
            if !p.current && !p.end_date.trim().is_empty() {
                match (parse_date(&p.start_date), parse_date(&p.end_date)) {
                    (_, None) => c.insert(key(Field::EndDate), "Data de término inválida"),
                    (Some(start), Some(end)) if end < start => c.insert(
                        key(Field::EndDate),
                        "Data de término anterior à data de início",
                    ),
                    _ => {}
                }
            }
        }
        EntryKind::Educational(e) => {
            c.require(key(Field::Schooling), &e.schooling);
            c.require(key(Field::Institution), &e.institution);
        }
    }
}

/// Validates a whole candidate form on a fixed day.
pub fn validate_form_on(form: &CandidateForm, rules: &FormRules, today: NaiveDate) -> FieldErrors {
    let mut c = ErrorCollector::new();
    let key = FieldKey::field;
    let personal = &form.personal;
    let contact = &form.contact;
    let address = &form.address;

    c.require(key(Field::FullName), &personal.full_name);
    if c.require(key(Field::Cpf), &personal.cpf) {
        c.check(key(Field::Cpf), validate_cpf(&personal.cpf), "CPF inválido");
    }
    c.require(key(Field::Rg), &personal.rg);
    if c.require(key(Field::BirthDate), &personal.birth_date) {
        c.check(
            key(Field::BirthDate),
            meets_minimum_age(personal.birth_date.as_str(), today, rules.minimum_age),
            rules.birth_date_message(),
        );
    }
    c.require(key(Field::MaritalStatus), &personal.marital_status);

    c.require(key(Field::Mobile), &contact.mobile);
    if c.require(key(Field::Email), &contact.email) {
        c.check(key(Field::Email), validate_email(&contact.email), "Email inválido");
    }
    if !contact.alternative_email.is_empty() {
        c.check(
            key(Field::AlternativeEmail),
            validate_email(&contact.alternative_email),
            "Email alternativo inválido",
        );
    }

    if c.require(key(Field::Cep), &address.cep) {
        c.check(key(Field::Cep), validate_cep(&address.cep), "CEP inválido");
    }
    c.require(key(Field::Street), &address.street);
    c.require(key(Field::Number), &address.number);
    c.require(key(Field::District), &address.district);
    c.require(key(Field::City), &address.city);
    if c.require(key(Field::State), &address.state) {
        c.check(
            key(Field::State),
            STATES.contains(&address.state.as_str()),
            "Estado inválido",
        );
    }

    for (position, entry) in form.history.iter().enumerate() {
        validate_entry(&mut c, position, entry);
    }

    if let Some(link) = form.video_link() {
        c.check(key(Field::VideoLink), validate_video_url(link), "URL do vídeo inválida");
    }

    let attachment_errors = validate_attachments(&form.attachments, &rules.attachments);
    if !attachment_errors.is_empty() {
        c.insert(key(Field::Attachments), attachment_errors.join("\n"));
    }

    c.errors
}

/// Validates a whole candidate form, judging the birth date against today.
pub fn validate_form(form: &CandidateForm, rules: &FormRules) -> FieldErrors {
    validate_form_on(form, rules, Local::now().date_naive())
}

/// `DD/MM/YYYY`, or the input unchanged when it is not a date.
pub fn format_date_br(input: &str) -> String {
    match parse_date(input) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => input.to_string(),
    }
}

pub fn marital_status_label(code: &str) -> &str {
    match code {
        "solteiro" => "Solteiro(a)",
        "casado" => "Casado(a)",
        "divorciado" => "Divorciado(a)",
        "viuvo" => "Viúvo(a)",
        "uniao-estavel" => "União Estável",
        other => other,
    }
}

pub fn schooling_label(code: &str) -> &str {
    match code {
        "fundamental-incompleto" => "Ensino Fundamental Incompleto",
        "fundamental-completo" => "Ensino Fundamental Completo",
        "medio-incompleto" => "Ensino Médio Incompleto",
        "medio-completo" => "Ensino Médio Completo",
        "superior-incompleto" => "Ensino Superior Incompleto",
        "superior-completo" => "Ensino Superior Completo",
        "pos-graduacao" => "Pós-graduação",
        "mestrado" => "Mestrado",
        "doutorado" => "Doutorado",
        other => other,
    }
}
