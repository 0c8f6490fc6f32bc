use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::{Confirm, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use thai_vocab::ai_provider::AiProvider;
use thai_vocab::auth::AdminSession;
use thai_vocab::cli::{Cli, Commands};
use thai_vocab::common::{VocabularyRecord, KNOWN_FIELDS};
use thai_vocab::config::Config;
use thai_vocab::generator::Backend;
use thai_vocab::pipeline::{IngestionPipeline, IngestionRequest};
use thai_vocab::store::WordSetStore;
use thai_vocab::{editor, Result, VocabError};
use tracing_subscriber::EnvFilter;

/// Supplies the admin password without a prompt (scripts, CI).
const ADMIN_PASSWORD_INPUT_ENV: &str = "THAI_VOCAB_ADMIN_PASSWORD_INPUT";

fn init_tracing(verbose: bool) {
    let filter = if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else if verbose {
        EnvFilter::new("thai_vocab=debug,thai_vocab_common=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("설정 파일을 읽을 수 없습니다")?;
    let store = WordSetStore::new(cli.data_dir.clone().unwrap_or_else(|| config.data_dir()));

    match cli.command {
        Commands::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("세트가 없습니다. `thai-vocab create <이름>` 으로 먼저 만들어주세요.");
                println!("  폴더: {}", store.dir().display());
            }
            for name in names {
                match store.load(&name) {
                    Ok(records) => println!("{} ({}개)", name, records.len()),
                    Err(e) => println!("{} (읽기 실패: {})", name, e),
                }
            }
        }

        Commands::Show { name, index, json } => {
            if !store.exists(&name) {
                return Err(VocabError::NotFound(name).into());
            }
            let records = store.load(&name)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("이 세트에는 단어가 없습니다.");
            } else if let Some(index) = index {
                if index == 0 || index > records.len() {
                    bail!(VocabError::Validation(format!(
                        "단어 번호는 1~{} 사이여야 합니다",
                        records.len()
                    )));
                }
                println!("📘 세트: {} [{}/{}]\n", name, index, records.len());
                print_card(&records[index - 1]);
            } else {
                println!("📘 세트: {} ({}개)\n", name, records.len());
                for (i, record) in records.iter().enumerate() {
                    println!(
                        "{:>3}. {}  {}  {}",
                        i + 1,
                        record.thai,
                        record.pron_kor,
                        record.meaning_ko
                    );
                }
            }
        }

        Commands::Config { set_api_key, set_admin_password, set_data_dir, set_model, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API 키를 설정했습니다");
            }

            if let Some(password) = set_admin_password {
                // changing an existing password needs the old one
                let _session = match config.admin_credential()? {
                    Some(_) => Some(admin_login(&config)?),
                    None => None,
                };
                config.set_admin_password(&password)?;
                println!("✔ 관리자 비밀번호를 설정했습니다");
            }

            if let Some(dir) = set_data_dir {
                config.data_dir = dir;
                config.save()?;
                println!("✔ 저장 폴더를 설정했습니다");
            }

            if let Some(model) = set_model {
                config.model = model;
                config.save()?;
                println!("✔ 모델을 설정했습니다");
            }

            if show {
                println!("설정: {}", Config::config_path()?.display());
                println!("  프로바이더: {}", config.provider);
                println!("  모델: {}", config.model);
                println!("  API 주소: {}", config.api_base);
                println!("  저장 폴더: {}", config.data_dir().display());
                println!("  기본 단어 수: {}", config.default_count);
                println!("  최대 단어 수: {}", config.effective_max_words());
                println!("  중복 비교: {}", config.dedup_policy);
                println!(
                    "  타임아웃: {}",
                    config
                        .timeout_seconds
                        .map(|s| format!("{}초", s))
                        .unwrap_or_else(|| "없음".into())
                );
                println!("  API 키: {}", if config.get_api_key().is_ok() { "설정됨" } else { "미설정" });
                println!(
                    "  관리자 비밀번호: {}",
                    if config.admin_credential()?.is_some() { "설정됨" } else { "미설정" }
                );
            }
        }

        command => {
            debug_assert!(command.requires_admin());
            let session = admin_login(&config)?;
            run_admin(command, &session, &store, &config, cli.verbose, cli.ai_provider).await?;
        }
    }

    Ok(())
}

/// Commands that change stored sets. Only reachable with an open session.
async fn run_admin(
    command: Commands,
    _session: &AdminSession,
    store: &WordSetStore,
    config: &Config,
    verbose: bool,
    ai_provider: Option<AiProvider>,
) -> anyhow::Result<()> {
    match command {
        Commands::Create { name, placeholder } => {
            if store.exists(&name) {
                println!("⚠ 기존 세트 '{}' 를 덮어씁니다", name);
            }
            let records = store.create(&name, placeholder)?;
            println!("✔ '{}' 세트 생성 완료 ({}개)", name, records.len());
        }

        Commands::Delete { name, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("'{}' 세트를 삭제할까요?", name))
                    .default(false)
                    .interact()
                    .map_err(|e| VocabError::Config(format!("입력 실패: {}", e)))?;
                if !confirmed {
                    println!("취소했습니다");
                    return Ok(());
                }
            }

            if store.delete(&name)? {
                println!("✔ '{}' 삭제 완료", name);
            } else {
                println!("⚠ '{}' 세트가 없습니다 (변경 없음)", name);
            }
        }

        Commands::Generate { name, count, theme } => {
            println!("🤖 thai-vocab - 단어 자동 생성\n");

            let provider = ai_provider.unwrap_or(config.provider);
            let backend = Backend::from_config(provider, config)?;
            let pipeline = IngestionPipeline::new(store, &backend)
                .with_max_words(config.effective_max_words())
                .with_policy(config.dedup_policy);
            let request = IngestionRequest {
                name,
                count: count.unwrap_or(config.default_count),
                theme,
            };
            pipeline.validate(&request)?;

            println!("[1/2] 단어 {}개 생성 요청 중... ({})", request.count, backend.describe());
            let spinner = spinner("응답 대기 중...");
            let result = tokio::select! {
                result = pipeline.run(&request) => result,
                _ = tokio::signal::ctrl_c() => {
                    spinner.finish_and_clear();
                    bail!("중단되었습니다. 세트는 변경되지 않았습니다");
                }
            };
            spinner.finish_and_clear();

            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    if let Some(raw) = e.raw_response() {
                        eprintln!("--- 모델 응답 ---\n{}\n-----------------", raw);
                    }
                    return Err(e.into());
                }
            };

            if verbose {
                println!("--- 모델 응답 ---\n{}\n-----------------", report.raw_response);
            }
            println!(
                "✔ 기존 단어 {}개 / 응답에서 {}개 추출\n",
                report.known_terms, report.parsed
            );

            println!("[2/2] 중복 제거 후 저장");
            println!("  - 기존 단어와 중복: {}개", report.dropped_known);
            println!("  - 응답 내 반복: {}개", report.dropped_repeats);
            if report.truncated > 0 {
                println!("  - 요청 수 초과로 제외: {}개", report.truncated);
            }
            if report.saved.is_empty() {
                println!("⚠ 새 단어가 없어 빈 세트로 저장했습니다");
            }

            println!(
                "\n✅ 세트 '{}' 생성 완료 ({}개 / 요청 {}개)",
                report.name,
                report.saved.len(),
                report.requested
            );
        }

        Commands::Upload { name, file } => {
            match editor::replace_from_file(store, &name, &file) {
                Ok(records) => println!("✔ 업로드 완료: '{}' ({}개)", name, records.len()),
                Err(e) => {
                    eprintln!("기존 세트는 변경되지 않았습니다");
                    return Err(e.into());
                }
            }
        }

        Commands::Edit { name, action } => {
            let edit = action.into_table_edit()?;
            let records = editor::edit_set(store, &name, &[edit])?;
            println!("✔ 저장 완료: '{}' ({}개)", name, records.len());
        }

        Commands::List | Commands::Show { .. } | Commands::Config { .. } => {
            bail!("관리자 명령이 아닙니다")
        }
    }

    Ok(())
}

fn admin_login(config: &Config) -> Result<AdminSession> {
    let credential = config.admin_credential()?.ok_or_else(|| {
        VocabError::Config(
            "관리자 비밀번호가 설정되지 않았습니다. `thai-vocab config --set-admin-password <비밀번호>` 로 설정하세요"
                .into(),
        )
    })?;

    let attempt = match std::env::var(ADMIN_PASSWORD_INPUT_ENV) {
        Ok(password) => password,
        Err(_) => Password::new()
            .with_prompt("관리자 비밀번호")
            .interact()
            .map_err(|e| VocabError::Config(format!("비밀번호 입력 실패: {}", e)))?,
    };

    AdminSession::login(&credential, &attempt)
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn print_card(record: &VocabularyRecord) {
    println!("## {}\n", record.thai);
    println!("의미(한글): {}", record.meaning_ko);
    println!("품사: {}", record.pos);
    println!("로마자: {}", record.transliteration);
    println!("한국어 발음: {}", record.pron_kor);
    println!("\n예문(Thai)\n  {}", record.example_th);
    println!("예문(Korean)\n  {}", record.example_ko);

    for (key, _) in record.extra.iter().filter(|(k, _)| !KNOWN_FIELDS.contains(&k.as_str())) {
        println!("{}: {}", key, record.field(key));
    }
}
