use crate::ai_provider::AiProvider;
use crate::editor::TableEdit;
use crate::error::{Result, VocabError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thai_vocab_common::VocabularyRecord;

#[derive(Parser)]
#[command(name = "thai-vocab")]
#[command(about = "태국어 단어 세트 관리 및 GPT 자동 생성 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 세트 저장 폴더 (기본: 설정값 또는 ./data)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// AI 프로바이더 (openai/claude/codex)
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 세트 목록
    List,

    /// 세트 내용 보기
    Show {
        /// 세트 이름
        #[arg(required = true)]
        name: String,

        /// 카드 번호 (1부터)
        #[arg(short, long)]
        index: Option<usize>,

        /// JSON 그대로 출력
        #[arg(long)]
        json: bool,
    },

    /// 새 세트 생성 (같은 이름이 있으면 덮어씀)
    Create {
        #[arg(required = true)]
        name: String,

        /// 예시 단어 1개를 넣어서 생성
        #[arg(long)]
        placeholder: bool,
    },

    /// 세트 삭제
    Delete {
        #[arg(required = true)]
        name: String,

        /// 확인 없이 삭제
        #[arg(short, long)]
        yes: bool,
    },

    /// GPT로 새 단어 세트 자동 생성
    Generate {
        /// 생성할 세트 이름
        #[arg(required = true)]
        name: String,

        /// 단어 수 (기본: 설정값)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// 주제 (예: "음식과 식당")
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// JSON 파일로 세트 전체 교체
    Upload {
        #[arg(required = true)]
        name: String,

        /// JSON 배열 파일
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 세트 수동 편집
    Edit {
        #[arg(required = true)]
        name: String,

        #[command(subcommand)]
        action: EditAction,
    },

    /// 설정 보기/변경
    Config {
        /// OpenAI API 키 설정
        #[arg(long)]
        set_api_key: Option<String>,

        /// 관리자 비밀번호 설정 (SHA-256 으로 저장)
        #[arg(long)]
        set_admin_password: Option<String>,

        /// 기본 세트 저장 폴더 설정
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 모델 이름 설정
        #[arg(long)]
        set_model: Option<String>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// Commands that change stored sets.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Commands::Create { .. }
                | Commands::Delete { .. }
                | Commands::Generate { .. }
                | Commands::Upload { .. }
                | Commands::Edit { .. }
        )
    }
}

/// Row numbers are 1-based on the command line.
#[derive(Subcommand)]
pub enum EditAction {
    /// 마지막에 행 추가
    Add {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// 지정 위치에 행 삽입
    Insert {
        row: usize,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// 행 삭제
    Remove { row: usize },

    /// 행 이동
    Move { from: usize, to: usize },

    /// 필드 값 설정
    Set {
        row: usize,
        field: String,
        value: String,
    },

    /// 필드 값 지우기
    Clear { row: usize, field: String },
}

#[derive(Args)]
pub struct RecordArgs {
    /// 태국어 단어
    #[arg(long)]
    pub thai: String,

    /// 로마자 표기
    #[arg(long)]
    pub transliteration: Option<String>,

    /// 한국어 발음
    #[arg(long)]
    pub pron_kor: Option<String>,

    /// 품사
    #[arg(long)]
    pub pos: Option<String>,

    /// 한국어 뜻
    #[arg(long)]
    pub meaning_ko: Option<String>,

    /// 태국어 예문
    #[arg(long)]
    pub example_th: Option<String>,

    /// 예문 해석
    #[arg(long)]
    pub example_ko: Option<String>,
}

impl RecordArgs {
    pub fn into_record(self) -> VocabularyRecord {
        let optional = [
            ("transliteration", self.transliteration),
            ("pron_kor", self.pron_kor),
            ("pos", self.pos),
            ("meaning_ko", self.meaning_ko),
            ("example_th", self.example_th),
            ("example_ko", self.example_ko),
        ];

        optional
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .fold(VocabularyRecord::new(self.thai), |record, (field, value)| {
                record.with(field, value)
            })
    }
}

impl EditAction {
    pub fn into_table_edit(self) -> Result<TableEdit> {
        Ok(match self {
            EditAction::Add { record } => TableEdit::Append(record.into_record()),
            EditAction::Insert { row, record } => TableEdit::Insert {
                row: zero_based(row)?,
                record: record.into_record(),
            },
            EditAction::Remove { row } => TableEdit::Remove {
                row: zero_based(row)?,
            },
            EditAction::Move { from, to } => TableEdit::Move {
                from: zero_based(from)?,
                to: zero_based(to)?,
            },
            EditAction::Set { row, field, value } => TableEdit::SetField {
                row: zero_based(row)?,
                field,
                value,
            },
            EditAction::Clear { row, field } => TableEdit::ClearField {
                row: zero_based(row)?,
                field,
            },
        })
    }
}

fn zero_based(row: usize) -> Result<usize> {
    row.checked_sub(1)
        .ok_or_else(|| VocabError::Validation("행 번호는 1부터 시작합니다".into()))
}
