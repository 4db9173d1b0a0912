//! CSV 레코드 파싱 모듈
//!
//! 한 줄의 텍스트를 필드 값 목록으로 분리합니다.

use csv::ReaderBuilder;

/// 한 줄을 CSV 레코드로 파싱
///
/// 따옴표로 감싼 필드 안의 구분자는 값의 일부로 취급하며,
/// 구분자 뒤(필드 시작)의 공백은 여는 따옴표를 확인하기 전에 제거합니다.
/// 따옴표 안의 공백은 그대로 유지합니다.
///
/// # Arguments
/// * `line` - 파싱할 한 줄 (줄바꿈 제외)
///
/// # Returns
/// 필드 값 목록. 파싱에 실패하거나 레코드가 없으면 빈 목록을 반환합니다.
///
/// # Examples
/// ```
/// use csv2json::record::parse_record;
///
/// assert_eq!(parse_record(r#"a, "b,c", d"#), vec!["a", "b,c", "d"]);
/// ```
pub fn parse_record(line: &str) -> Vec<String> {
    let line = trim_leading_space(line);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(e)) => {
            tracing::warn!("CSV 레코드 파싱 실패: {}", e);
            Vec::new()
        }
        None => {
            tracing::warn!("레코드가 없는 줄입니다: {:?}", line);
            Vec::new()
        }
    }
}

/// 따옴표 밖에서 각 필드 시작 부분의 공백을 제거
fn trim_leading_space(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut at_field_start = true;
    let mut quoted_field = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        if at_field_start {
            if ch.is_whitespace() {
                continue;
            }
            at_field_start = false;
            quoted_field = ch == '"';
            in_quotes = quoted_field;
        } else if in_quotes {
            if ch == '"' {
                in_quotes = false;
            }
        } else if quoted_field && ch == '"' {
            // 이스케이프된 따옴표 ("")
            in_quotes = true;
        } else if ch == ',' {
            at_field_start = true;
            quoted_field = false;
        }
        out.push(ch);
    }

    out
}
