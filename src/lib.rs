//! csv2json - CSV TO JSON CONVERTER
//!
//! CSV 파일들을 동시에 JSON 배열 파일로 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🚀 **병렬 처리**: 파일마다 독립된 파이프라인을 Rayon으로 동시에 실행
//! - 🔗 **생산자/소비자 파이프라인**: 줄 단위 변환 결과를 랑데부 채널로 전달
//! - 🧾 **순서 보장**: 출력 배열은 항상 입력 줄 순서를 따름
//! - ✅ **입력 검증**: 인자 개수, 파일 존재 여부, 확장자 검사
//! - 🎯 **종료 코드**: 오류 종류별로 구분되는 종료 코드
//! - 📈 **상세 통계**: 성공/실패 파일 수, 레코드 수, 입출력 용량
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! csv2json users.csv orders.csv
//!
//! # 실패한 파일이 있어도 나머지는 계속 변환
//! csv2json a.csv b.csv --keep-going
//! ```

pub mod cli;
pub mod error;
pub mod logger;
pub mod orchestrator;
pub mod pipeline;
pub mod record;
pub mod row;
pub mod stats;
pub mod validation;

// Re-exports for convenient access
pub use cli::Args;
pub use error::{ConvertError, Result};
pub use orchestrator::{FailurePolicy, FileOutcome, Orchestrator};
pub use pipeline::{convert_file, destination_path, ConversionReport};
pub use record::parse_record;
pub use row::convert_row;
pub use stats::{format_bytes, Statistics};
pub use validation::validate;
