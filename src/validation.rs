//! 입력 검증 모듈
//!
//! 인자 개수, 파일 존재 여부, 확장자를 순서대로 검사합니다.
//! 각 단계는 해당 단계의 에러를 모두 모아서 한 번에 보고합니다.

use rayon::prelude::*;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{ConvertError, Result};

/// 한 번에 변환할 수 있는 최대 파일 수
pub const MAX_PATHS: usize = 10;

/// 허용되는 입력 확장자
pub const CSV_EXTENSION: &str = "csv";

/// 인자 개수가 1 이상 `MAX_PATHS` 이하인지 확인
pub fn validate_argument_count(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    if paths.is_empty() || paths.len() > MAX_PATHS {
        return Err(ConvertError::ArgumentCount {
            count: paths.len(),
            max: MAX_PATHS,
        });
    }
    Ok(paths)
}

/// 모든 경로가 존재하는지 병렬로 확인
pub fn validate_paths_exist(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let errors: Vec<ConvertError> = paths
        .par_iter()
        .filter_map(|path| match std::fs::metadata(path) {
            Ok(_) => None,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Some(ConvertError::PathNotFound { path: path.clone() })
            }
            Err(e) => Some(ConvertError::PathStat {
                path: path.clone(),
                reason: e.to_string(),
            }),
        })
        .collect();

    into_result(paths, errors)
}

/// 모든 경로의 확장자가 `.csv`인지 확인
pub fn validate_extensions(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let errors: Vec<ConvertError> = paths
        .iter()
        .filter(|path| {
            path.extension()
                .and_then(|s| s.to_str())
                .map(|s| s != CSV_EXTENSION)
                .unwrap_or(true)
        })
        .map(|path| ConvertError::WrongExtension { path: path.clone() })
        .collect();

    into_result(paths, errors)
}

/// 세 단계를 순서대로 실행
///
/// 실패한 첫 단계에서 멈추며, 반환되는 에러는 항상 `Validation`입니다.
///
/// # Examples
/// ```
/// use csv2json::validation::validate;
///
/// let err = validate(Vec::new()).unwrap_err();
/// assert_eq!(err.exit_code(), 1);
/// ```
pub fn validate(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    validate_argument_count(paths)
        .and_then(validate_paths_exist)
        .and_then(validate_extensions)
        .map_err(|e| match e {
            ConvertError::Validation(_) => e,
            other => ConvertError::Validation(vec![other]),
        })
}

fn into_result(paths: Vec<PathBuf>, errors: Vec<ConvertError>) -> Result<Vec<PathBuf>> {
    if errors.is_empty() {
        Ok(paths)
    } else {
        Err(ConvertError::Validation(errors))
    }
}
