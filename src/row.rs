//! 행 변환 모듈
//!
//! 헤더와 값 목록을 짝지어 JSON 객체를 만듭니다.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{ConvertError, Result};

/// 헤더와 값 목록으로 JSON 객체 생성
///
/// 빈 헤더 이름의 열은 건너뛰며, 헤더보다 많은 값은 무시합니다.
///
/// # Arguments
/// * `file` - 에러 메시지에 사용할 원본 파일 경로
/// * `line` - 에러 메시지에 사용할 줄 번호 (1부터 시작)
/// * `headers` - 헤더 레코드
/// * `values` - 데이터 레코드
///
/// # Errors
/// 값 개수가 읽어야 할 헤더 위치보다 적으면 `ShortRow`
pub fn build_object(
    file: &Path,
    line: usize,
    headers: &[String],
    values: &[String],
) -> Result<Map<String, Value>> {
    let mut object = Map::new();

    for (index, key) in headers.iter().enumerate() {
        if key.is_empty() {
            continue;
        }

        let value = values.get(index).ok_or_else(|| ConvertError::ShortRow {
            file: file.to_path_buf(),
            line,
            expected: headers.len(),
            found: values.len(),
        })?;

        object.insert(key.clone(), Value::String(value.clone()));
    }

    Ok(object)
}

/// 한 행을 JSON 객체 문자열로 변환
///
/// # Returns
/// 압축된 JSON 객체 문자열 (예: `{"id":"1","name":"Kim"}`)
pub fn convert_row(file: &Path, line: usize, headers: &[String], values: &[String]) -> Result<String> {
    let object = build_object(file, line, headers, values)?;

    serde_json::to_string(&object).map_err(|e| ConvertError::Encode {
        file: file.to_path_buf(),
        reason: e.to_string(),
    })
}
