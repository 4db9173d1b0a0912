//! 에러 타입 정의 모듈
//!
//! csv2json에서 발생할 수 있는 모든 에러 타입과 프로세스 종료 코드를 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// csv2json에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 인자 개수가 허용 범위를 벗어남
    #[error("하나 이상 {max}개 이하의 CSV 경로가 필요합니다 (입력: {count}개)")]
    ArgumentCount { count: usize, max: usize },

    /// 입력 파일이 존재하지 않음
    #[error("파일이 존재하지 않습니다: {path}")]
    PathNotFound { path: PathBuf },

    /// 입력 파일 상태 조회 실패
    #[error("파일 상태를 확인할 수 없습니다 ({path}): {reason}")]
    PathStat { path: PathBuf, reason: String },

    /// 확장자가 .csv가 아님
    #[error("잘못된 파일 확장자입니다: {path}")]
    WrongExtension { path: PathBuf },

    /// 검증 단계에서 수집된 에러 목록
    #[error("입력 검증 실패 ({} 건)", .0.len())]
    Validation(Vec<ConvertError>),

    /// CSV 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpen { file: PathBuf, reason: String },

    /// CSV 라인 읽기 실패
    #[error("파일 읽기 실패 ({file}): {reason}")]
    Read { file: PathBuf, reason: String },

    /// 행의 값 개수가 헤더보다 적음
    #[error("{line}번째 줄의 값 개수({found})가 헤더 개수({expected})보다 적습니다 ({file})")]
    ShortRow {
        file: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// 행을 JSON 문자열로 직렬화 실패
    #[error("JSON 직렬화 실패 ({file}): {reason}")]
    Encode { file: PathBuf, reason: String },

    /// 전달받은 JSON 문자열 파싱 실패
    #[error("JSON 파싱 실패 ({file}): {reason}")]
    Decode { file: PathBuf, reason: String },

    /// JSON 파일 쓰기 실패
    #[error("JSON 파일 쓰기 실패 ({file}): {reason}")]
    Write { file: PathBuf, reason: String },

    /// 다른 파일의 실패로 변환이 중단됨
    #[error("다른 파일의 오류로 변환이 중단되었습니다: {file}")]
    Cancelled { file: PathBuf },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPool { reason: String },
}

impl ConvertError {
    /// 에러 종류에 대응하는 프로세스 종료 코드
    ///
    /// 검증 에러 목록은 첫 번째 에러의 코드를 따릅니다.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::ArgumentCount { .. } => 1,
            ConvertError::PathNotFound { .. } | ConvertError::PathStat { .. } => 2,
            ConvertError::WrongExtension { .. } => 3,
            ConvertError::Validation(errors) => {
                errors.first().map(ConvertError::exit_code).unwrap_or(1)
            }
            ConvertError::FileOpen { .. } => 41,
            ConvertError::Read { .. } => 411,
            ConvertError::Decode { .. } => 412,
            ConvertError::Write { .. } => 413,
            ConvertError::Encode { .. } => 20,
            ConvertError::ShortRow { .. } => 21,
            ConvertError::Cancelled { .. } | ConvertError::ThreadPool { .. } => 70,
        }
    }

    /// 형제 파일 실패로 인한 중단인지 확인
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConvertError::Cancelled { .. })
    }
}

/// csv2json 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
