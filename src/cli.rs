//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::orchestrator::FailurePolicy;

/// csv2json CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "csv2json",
    author = "YourName <your@email.com>",
    version,
    about = "CSV TO JSON CONVERTER - CSV 파일들을 동시에 JSON 배열 파일로 변환하는 CLI 도구",
    long_about = r#"
CSV TO JSON CONVERTER
=====================

입력된 CSV 파일마다 같은 폴더에 같은 이름의 .json 파일을 생성합니다.
첫 줄은 헤더로 사용되며, 이후 각 줄이 JSON 객체 하나가 됩니다.

특징:
  • 여러 파일 동시 변환 (최대 10개)
  • 헤더 순서를 유지하는 문자열 필드
  • 빈 헤더 이름의 열은 출력에서 제외
  • 오류 종류별 종료 코드

예제:
  csv2json users.csv
  csv2json a.csv b.csv c.csv --keep-going
  csv2json data/*.csv --dry-run
"#
)]
pub struct Args {
    /// 변환할 CSV 파일 경로 (1~10개)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실패한 파일이 있어도 나머지 파일은 끝까지 변환
    #[arg(long)]
    pub keep_going: bool,

    /// 실제 변환 없이 생성될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    /// 실패 처리 방식 반환
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        }
    }
}
