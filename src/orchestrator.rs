//! 파일 오케스트레이션 모듈
//!
//! 검증된 경로마다 변환 파이프라인을 하나씩 동시에 실행하고 모두 끝날 때까지 기다립니다.

use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ConvertError, Result};
use crate::pipeline::{convert_file, ConversionReport};

/// 한 파일이 실패했을 때 나머지 파일의 처리 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 첫 실패 시 다른 파일의 변환을 중단
    #[default]
    FailFast,
    /// 다른 파일은 끝까지 변환
    KeepGoing,
}

/// 파일별 처리 결과
#[derive(Debug)]
pub struct FileOutcome {
    /// 원본 CSV 경로
    pub path: PathBuf,
    /// 변환 결과
    pub result: Result<ConversionReport>,
}

/// 여러 CSV 파일을 동시에 변환하는 오케스트레이터
#[derive(Debug, Default)]
pub struct Orchestrator {
    policy: FailurePolicy,
    cancel: AtomicBool,
}

impl Orchestrator {
    /// 새 오케스트레이터 생성
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            cancel: AtomicBool::new(false),
        }
    }

    /// 모든 경로를 동시에 변환
    ///
    /// 결과는 입력 경로 순서대로 반환됩니다.
    ///
    /// # Arguments
    /// * `paths` - 검증된 CSV 경로 목록
    /// * `on_finish` - 파일 하나가 끝날 때마다 호출되는 콜백 (진행률 표시용)
    pub fn run<F>(&self, paths: Vec<PathBuf>, on_finish: F) -> Vec<FileOutcome>
    where
        F: Fn(&FileOutcome) + Sync,
    {
        paths
            .into_par_iter()
            .map(|path| {
                let result = convert_file(&path, &self.cancel);

                if let Err(ref e) = result {
                    if !e.is_cancelled() {
                        tracing::debug!("{} 변환 실패: {}", path.display(), e);
                        if self.policy == FailurePolicy::FailFast {
                            self.cancel.store(true, Ordering::Relaxed);
                        }
                    }
                }

                let outcome = FileOutcome { path, result };
                on_finish(&outcome);
                outcome
            })
            .collect()
    }

    /// 중단이 아닌 첫 번째 에러
    ///
    /// 프로세스 종료 코드를 결정하는 데 사용합니다.
    pub fn first_error(outcomes: &[FileOutcome]) -> Option<&ConvertError> {
        let errors = || outcomes.iter().filter_map(|o| o.result.as_ref().err());
        errors()
            .find(|e| !e.is_cancelled())
            .or_else(|| errors().next())
    }
}
