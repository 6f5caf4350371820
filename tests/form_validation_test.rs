//! Whole-form and login validation over forms loaded the way the CLI loads them.

use candidate_intake::core::entries::HistoryEntries;
use candidate_intake::core::form::{first_error, validate_form_on, Field};
use candidate_intake::domain::model::{EntryId, EntryKind};
use candidate_intake::{CandidateForm, FieldKey, FormRules, IntakeConfig, LoginForm};
use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn complete_form() -> serde_json::Value {
    serde_json::json!({
        "nomeCompleto": "Maria da Silva",
        "cpf": "111.444.777-35",
        "rg": "12.345.678-9",
        "dataNascimento": "1995-08-20",
        "estadoCivil": "solteiro",
        "celular": "(11) 91234-5678",
        "email": "maria@example.com",
        "emailAlternativo": "",
        "cep": "01310-100",
        "logradouro": "Avenida Paulista",
        "numero": "1578",
        "bairro": "Bela Vista",
        "cidade": "São Paulo",
        "estado": "SP",
        "informacoesProfissionaisEducacionais": [
            {
                "id": 1,
                "tipo": "profissional",
                "empresa": "ACME",
                "cargo": "Analista",
                "dataInicio": "2018-02-01",
                "dataFim": "2022-07-31",
                "atual": false
            },
            {
                "id": 2,
                "tipo": "educacional",
                "escolaridade": "superior-completo",
                "instituicao": "USP",
                "nivel": "superior",
                "areaFormacao": "administracao"
            }
        ],
        "linkVideo": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "arquivos": [
            {"id": 1, "name": "curriculo.pdf", "type": "application/pdf", "size": 204800}
        ]
    })
}

#[test]
fn test_complete_form_is_valid() {
    let form: CandidateForm = serde_json::from_value(complete_form()).unwrap();
    let errors = validate_form_on(&form, &FormRules::default(), today());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_blank_form_reports_required_fields_in_form_order() {
    let login = LoginForm::default();
    let form = CandidateForm::new(&login);
    let errors = validate_form_on(&form, &FormRules::default(), today());

    assert_eq!(first_error(&errors), Some(FieldKey::field(Field::FullName)));
    assert_eq!(
        errors[&FieldKey::field(Field::City)],
        "Cidade é obrigatória"
    );
    assert_eq!(
        errors[&FieldKey::entry(Field::Company, 0, EntryId(1))],
        "Empresa é obrigatória"
    );
    assert!(!errors.contains_key(&FieldKey::field(Field::AlternativeEmail)));
    assert!(!errors.contains_key(&FieldKey::field(Field::VideoLink)));
}

#[test]
fn test_format_errors() {
    let mut json = complete_form();
    json["cpf"] = "111.444.777-36".into();
    json["email"] = "maria@example".into();
    json["emailAlternativo"] = "maria @example.com".into();
    json["cep"] = "1310-100".into();
    json["estado"] = "XX".into();
    json["linkVideo"] = "ftp://videos.example.com/pitch".into();
    json["arquivos"][0]["type"] = "image/png".into();

    let form: CandidateForm = serde_json::from_value(json).unwrap();
    let errors = validate_form_on(&form, &FormRules::default(), today());

    assert_eq!(errors[&FieldKey::field(Field::Cpf)], "CPF inválido");
    assert_eq!(errors[&FieldKey::field(Field::Email)], "Email inválido");
    assert_eq!(
        errors[&FieldKey::field(Field::AlternativeEmail)],
        "Email alternativo inválido"
    );
    assert_eq!(errors[&FieldKey::field(Field::Cep)], "CEP inválido");
    assert_eq!(errors[&FieldKey::field(Field::State)], "Estado inválido");
    assert_eq!(
        errors[&FieldKey::field(Field::VideoLink)],
        "URL do vídeo inválida"
    );
    assert_eq!(
        errors[&FieldKey::field(Field::Attachments)],
        "curriculo.pdf: Apenas arquivos PDF são permitidos"
    );
    assert_eq!(first_error(&errors), Some(FieldKey::field(Field::Cpf)));
}

#[test]
fn test_underage_with_configured_minimum() {
    let mut json = complete_form();
    json["dataNascimento"] = "2009-03-02".into();
    let form: CandidateForm = serde_json::from_value(json).unwrap();

    let config = IntakeConfig::from_toml_str("[validation]\nminimum_age = 16\n").unwrap();
    let errors = validate_form_on(&form, &config.form_rules(), today());
    assert_eq!(
        errors[&FieldKey::field(Field::BirthDate)],
        "Data de nascimento inválida ou idade menor que 16 anos"
    );

    let config = IntakeConfig::from_toml_str("[validation]\nminimum_age = 14\n").unwrap();
    assert!(validate_form_on(&form, &config.form_rules(), today()).is_empty());
}

#[test]
fn test_removed_entry_errors_are_dropped() {
    let mut form: CandidateForm = serde_json::from_value(complete_form()).unwrap();
    let mut entries = HistoryEntries::from_entries(std::mem::take(&mut form.history));
    let blank = entries.add(EntryKind::professional());
    form.history = entries.clone().into_entries();

    let mut errors = validate_form_on(&form, &FormRules::default(), today());
    assert_eq!(blank, EntryId(3));
    assert!(errors.contains_key(&FieldKey::entry(Field::Company, 2, blank)));

    entries.remove(blank);
    entries.retain_errors(&mut errors);
    assert!(errors.is_empty());
}

#[test]
fn test_form_serializes_back_to_ui_names() {
    let form: CandidateForm = serde_json::from_value(complete_form()).unwrap();
    let json = serde_json::to_value(&form).unwrap();
    assert_eq!(json["nomeCompleto"], "Maria da Silva");
    assert_eq!(json["informacoesProfissionaisEducacionais"][0]["tipo"], "profissional");
    assert_eq!(json["informacoesProfissionaisEducacionais"][1]["instituicao"], "USP");
    assert_eq!(json["arquivos"][0]["type"], "application/pdf");
}

#[test]
fn test_form_loads_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
nomeCompleto = "João Souza"
cpf = "529.982.247-25"
celular = "11912345678"

[[informacoesProfissionaisEducacionais]]
id = 5
tipo = "educacional"
escolaridade = "medio-completo"
instituicao = "ETEC"
"#
    )
    .unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let form: CandidateForm = toml::from_str(&content).unwrap();
    assert_eq!(form.personal.full_name, "João Souza");
    assert!(matches!(form.history[0].kind, EntryKind::Educational(_)));

    let errors = validate_form_on(&form, &FormRules::default(), today());
    assert!(!errors.contains_key(&FieldKey::field(Field::Cpf)));
    assert!(!errors.contains_key(&FieldKey::entry(Field::Institution, 0, EntryId(5))));
    assert!(errors.contains_key(&FieldKey::field(Field::Rg)));
}

#[test]
fn test_login_gate() {
    let login = LoginForm {
        cpf: "11144477735".to_string(),
        birth_date: "20/08/1995".to_string(),
    };
    assert!(candidate_intake::validate_login(&login, &FormRules::default()).is_empty());
}
