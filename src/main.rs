use anyhow::Context;
use candidate_intake::adapters::viacep::ViaCepClient;
use candidate_intake::config::{CliConfig, Command, IntakeConfig};
use candidate_intake::core::{birth_date, cep, cpf, email, form, video};
use candidate_intake::domain::model::{CandidateForm, LoginForm};
use candidate_intake::domain::ports::AddressLookup;
use candidate_intake::utils::logger::{self, LogFormat};
use candidate_intake::utils::validation::Validate;
use chrono::Local;
use clap::Parser;
use serde_json::json;
use std::path::Path;

const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Runs one command and reports whether the checked value was valid.
async fn run(cli: &CliConfig) -> anyhow::Result<bool> {
    let config = cli.load_config().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let rules = config.form_rules();

    let valid = match &cli.command {
        Command::Cpf { value } => {
            let valid = cpf::validate_cpf(value);
            let formatted = cpf::format_cpf(value);
            let digits = cpf::normalize(value);
            let expected = (!valid && digits.len() == cpf::CPF_LENGTH)
                .then(|| cpf::check_digits(&digits[..9]))
                .flatten()
                .map(|(first, second)| format!("{}{}", first, second));

            if cli.json {
                print_json(&json!({
                    "valid": valid,
                    "formatted": formatted,
                    "expectedCheckDigits": expected,
                }))?;
            } else if valid {
                println!("✅ CPF válido: {}", formatted);
            } else {
                println!("❌ CPF inválido: {}", formatted);
                if let Some(expected) = expected {
                    println!("💡 Dígitos verificadores esperados: {}", expected);
                }
            }
            valid
        }
        Command::Cep { value, lookup } => {
            let valid = cep::validate_cep(value);
            let formatted = cep::format_cep(value);
            let address = if valid && *lookup {
                Some(lookup_address(&config, value).await?)
            } else {
                None
            };

            if cli.json {
                print_json(&json!({
                    "valid": valid,
                    "formatted": formatted,
                    "address": address,
                }))?;
            } else if valid {
                println!("✅ CEP válido: {}", formatted);
                if let Some(address) = &address {
                    println!(
                        "📍 {}, {} - {}/{}",
                        address.street, address.district, address.city, address.state
                    );
                }
            } else {
                println!("❌ CEP inválido: {}", formatted);
            }
            valid
        }
        Command::Email { value } => {
            let valid = email::validate_email(value);
            report(cli.json, valid, "Email", value)?;
            valid
        }
        Command::BirthDate { value } => {
            let today = Local::now().date_naive();
            let valid = birth_date::meets_minimum_age(value.as_str(), today, rules.minimum_age);
            let age = birth_date::parse_date(value).map(|birth| birth_date::age_on(birth, today));

            if cli.json {
                print_json(&json!({ "valid": valid, "age": age }))?;
            } else if valid {
                println!("✅ Data de nascimento válida: {}", form::format_date_br(value));
            } else {
                println!(
                    "❌ Data de nascimento inválida ou idade menor que {} anos",
                    rules.minimum_age
                );
            }
            valid
        }
        Command::Video { url } => {
            let valid = video::validate_video_url(url);
            let info = if valid { video::extract_video_info(url) } else { None };

            if cli.json {
                print_json(&json!({ "valid": valid, "info": info }))?;
            } else if valid {
                println!("✅ URL do vídeo válida");
                if let Some(embed) = info.as_ref().and_then(|i| i.embed_url.as_deref()) {
                    println!("🎬 {}", embed);
                }
            } else {
                println!("❌ URL do vídeo inválida");
            }
            valid
        }
        Command::Login { cpf, birth_date } => {
            let login = LoginForm {
                cpf: cpf.clone(),
                birth_date: birth_date.clone(),
            };
            let errors = form::validate_login(&login, &rules);
            report_errors(cli.json, &errors)?
        }
        Command::Form { path } => {
            let candidate = load_form(path)?;
            tracing::info!(
                "Validating form with {} history entries and {} attachments",
                candidate.history.len(),
                candidate.attachments.len()
            );
            let errors = form::validate_form(&candidate, &rules);
            report_errors(cli.json, &errors)?
        }
    };

    Ok(valid)
}

async fn lookup_address(
    config: &IntakeConfig,
    value: &str,
) -> anyhow::Result<candidate_intake::domain::model::Address> {
    let client = ViaCepClient::new(config.cep_lookup.base_url.clone(), config.lookup_timeout())?;
    let address = client
        .lookup(value)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_friendly_message()))?;
    Ok(address)
}

fn load_form(path: &Path) -> anyhow::Result<CandidateForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file '{}'", path.display()))?;

    let candidate = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML form '{}'", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON form '{}'", path.display()))?,
    };
    Ok(candidate)
}

fn report(as_json: bool, valid: bool, label: &str, value: &str) -> anyhow::Result<()> {
    if as_json {
        print_json(&json!({ "valid": valid }))?;
    } else if valid {
        println!("✅ {} válido: {}", label, value);
    } else {
        println!("❌ {} inválido: {}", label, value);
    }
    Ok(())
}

fn report_errors(as_json: bool, errors: &form::FieldErrors) -> anyhow::Result<bool> {
    if as_json {
        print_json(&json!({
            "valid": errors.is_empty(),
            "firstError": form::first_error(errors).map(|key| key.to_string()),
            "errors": errors,
        }))?;
    } else if errors.is_empty() {
        println!("✅ Formulário válido");
    } else {
        println!("❌ {} campo(s) com erro:", errors.len());
        for (key, message) in errors {
            println!("  - {}: {}", key, message);
        }
    }
    Ok(errors.is_empty())
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
