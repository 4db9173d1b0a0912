//! 통합 테스트 모듈
//!
//! csv2json의 전체 기능을 테스트합니다.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 테스트용 CSV 파일 생성 헬퍼
fn create_csv_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 생성된 JSON 파일 읽기
fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// 여러 CSV 파일이 있는 테스트 디렉토리 생성
fn setup_test_directory() -> (TempDir, Vec<PathBuf>) {
    let temp_dir = TempDir::new().unwrap();

    let paths = vec![
        create_csv_file(
            temp_dir.path(),
            "users.csv",
            "id,name,city\n1,Kim,Seoul\n2,Lee,Busan\n",
        ),
        create_csv_file(
            temp_dir.path(),
            "orders.csv",
            "order_id,amount\n100,9.99\n101,19.50\n102,0\n",
        ),
        create_csv_file(
            temp_dir.path(),
            "quoted.csv",
            "title, note\n\"Hello, World\", greeting\n",
        ),
    ];

    (temp_dir, paths)
}

mod conversion_tests {
    use super::*;
    use csv2json::{FailurePolicy, Orchestrator};

    #[test]
    fn test_round_trip_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(
            temp_dir.path(),
            "data.csv",
            "h1,h2,h3\na,b,c\nd,e,f\ng,h,i\n",
        );

        let outcomes = Orchestrator::default().run(vec![path], |_| {});
        let report = outcomes[0].result.as_ref().unwrap();

        assert_eq!(report.records, 3);
        assert_eq!(
            read_json(&report.destination),
            json!([
                {"h1": "a", "h2": "b", "h3": "c"},
                {"h1": "d", "h2": "e", "h3": "f"},
                {"h1": "g", "h2": "h", "h3": "i"}
            ])
        );
    }

    #[test]
    fn test_empty_header_field_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "gap.csv", "a,,c\n1,2,3\n");

        let outcomes = Orchestrator::default().run(vec![path], |_| {});
        let report = outcomes[0].result.as_ref().unwrap();

        assert_eq!(read_json(&report.destination), json!([{"a": "1", "c": "3"}]));
    }

    #[test]
    fn test_short_row_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "short.csv", "a,b,c\n1,2\n");

        let outcomes = Orchestrator::default().run(vec![path], |_| {});
        let error = Orchestrator::first_error(&outcomes).unwrap();

        assert_eq!(error.exit_code(), 21);
        assert!(!temp_dir.path().join("short.json").exists());
    }

    #[test]
    fn test_idempotent_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(
            temp_dir.path(),
            "same.csv",
            "z,a,m\n1,2,3\n4,5,6\n",
        );
        let destination = temp_dir.path().join("same.json");

        Orchestrator::default().run(vec![path.clone()], |_| {});
        let first = fs::read(&destination).unwrap();
        Orchestrator::default().run(vec![path], |_| {});
        let second = fs::read(&destination).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_multi_file_independence() {
        let (temp_dir, paths) = setup_test_directory();

        let outcomes = Orchestrator::new(FailurePolicy::FailFast).run(paths, |_| {});

        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        assert_eq!(
            read_json(&temp_dir.path().join("users.json")),
            json!([
                {"id": "1", "name": "Kim", "city": "Seoul"},
                {"id": "2", "name": "Lee", "city": "Busan"}
            ])
        );
        assert_eq!(
            read_json(&temp_dir.path().join("orders.json"))
                .as_array()
                .unwrap()
                .len(),
            3
        );
        assert_eq!(
            read_json(&temp_dir.path().join("quoted.json")),
            json!([{"title": "Hello, World", "note": "greeting"}])
        );
    }

    #[test]
    fn test_quoted_column_does_not_shift_later_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(
            temp_dir.path(),
            "cities.csv",
            "id, city, country\n1, \"Seoul, Korea\", KR\n",
        );

        Orchestrator::default().run(vec![path], |_| {});

        assert_eq!(
            read_json(&temp_dir.path().join("cities.json")),
            json!([{"id": "1", "city": "Seoul, Korea", "country": "KR"}])
        );
    }

    #[test]
    fn test_output_keys_follow_header_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "order.csv", "b,a\n1,2\n");

        Orchestrator::default().run(vec![path], |_| {});
        let text = fs::read_to_string(temp_dir.path().join("order.json")).unwrap();

        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
    }
}

mod validation_tests {
    use super::*;
    use csv2json::validation::{validate, MAX_PATHS};
    use csv2json::ConvertError;

    #[test]
    fn test_extension_rejection() {
        let temp_dir = TempDir::new().unwrap();
        let paths = vec![
            create_csv_file(temp_dir.path(), "good.csv", "a\n1\n"),
            create_csv_file(temp_dir.path(), "data.txt", "a\n1\n"),
        ];

        let err = validate(paths).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(!temp_dir.path().join("good.json").exists());
    }

    #[test]
    fn test_arity_bounds() {
        let temp_dir = TempDir::new().unwrap();
        let make = |count: usize| -> Vec<PathBuf> {
            (0..count)
                .map(|i| create_csv_file(temp_dir.path(), &format!("f{i}.csv"), "a\n1\n"))
                .collect()
        };

        assert_eq!(validate(make(0)).unwrap_err().exit_code(), 1);
        assert_eq!(validate(make(MAX_PATHS + 1)).unwrap_err().exit_code(), 1);
        assert_eq!(validate(make(1)).unwrap().len(), 1);
        assert_eq!(validate(make(MAX_PATHS)).unwrap().len(), MAX_PATHS);
    }

    #[test]
    fn test_missing_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = validate(vec![temp_dir.path().join("ghost.csv")]).unwrap_err();

        assert!(matches!(
            &err,
            ConvertError::Validation(errors)
                if matches!(errors[0], ConvertError::PathNotFound { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_ten_files_convert() {
        let temp_dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..MAX_PATHS)
            .map(|i| create_csv_file(temp_dir.path(), &format!("f{i}.csv"), &format!("n\n{i}\n")))
            .collect();

        let paths = validate(paths).unwrap();
        let outcomes = csv2json::Orchestrator::default().run(paths, |_| {});

        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        for i in 0..MAX_PATHS {
            assert_eq!(
                read_json(&temp_dir.path().join(format!("f{i}.json"))),
                json!([{"n": i.to_string()}])
            );
        }
    }
}

mod record_tests {
    use csv2json::parse_record;

    #[test]
    fn test_quoted_field_with_delimiter() {
        assert_eq!(parse_record(r#""a,b", c"#), vec!["a,b", "c"]);
    }

    #[test]
    fn test_quoted_field_after_delimiter_space() {
        assert_eq!(
            parse_record(r#"1, "Seoul, Korea", KR"#),
            vec!["1", "Seoul, Korea", "KR"]
        );
    }

    #[test]
    fn test_quoted_leading_space_kept() {
        assert_eq!(parse_record(r#"a," x""#), vec!["a", " x"]);
    }

    #[test]
    fn test_leading_space_stripped() {
        assert_eq!(parse_record("x,   y"), vec!["x", "y"]);
    }
}

mod error_tests {
    use csv2json::ConvertError;
    use std::path::PathBuf;

    #[test]
    fn test_error_display() {
        let error = ConvertError::PathNotFound {
            path: PathBuf::from("/nonexistent.csv"),
        };
        assert!(error.to_string().contains("파일이 존재하지 않습니다"));
    }

    #[test]
    fn test_short_row_display() {
        let error = ConvertError::ShortRow {
            file: PathBuf::from("test.csv"),
            line: 4,
            expected: 3,
            found: 1,
        };
        let msg = error.to_string();
        assert!(msg.contains("4번째 줄"));
        assert!(msg.contains("test.csv"));
    }
}
