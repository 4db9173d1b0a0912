//! 파일 단위 변환 파이프라인 모듈
//!
//! CSV 파일 하나를 읽어 JSON 배열 파일로 저장합니다.
//! 생산자 스레드가 각 줄을 JSON 객체 문자열로 변환해 랑데부 채널로 넘기고,
//! 소비자는 채널이 닫힐 때까지 받아서 배열에 모읍니다.

use serde_json::{Map, Value};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use crate::error::{ConvertError, Result};
use crate::record::parse_record;
use crate::row::convert_row;

/// 파이프라인 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Opened,
    HeaderRead,
    Streaming,
    Draining,
    Written,
    Closed,
    Aborted,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Opened => "Opened",
            PipelineState::HeaderRead => "HeaderRead",
            PipelineState::Streaming => "Streaming",
            PipelineState::Draining => "Draining",
            PipelineState::Written => "Written",
            PipelineState::Closed => "Closed",
            PipelineState::Aborted => "Aborted",
        };
        write!(f, "{}", name)
    }
}

/// 파일 변환 결과
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// 원본 CSV 경로
    pub source: PathBuf,
    /// 생성된 JSON 경로
    pub destination: PathBuf,
    /// 변환된 레코드 수
    pub records: usize,
    /// 원본 파일 크기
    pub bytes_read: u64,
    /// 저장된 JSON 크기
    pub bytes_written: u64,
}

/// 채널로 전달되는 항목: (줄 번호, JSON 객체 문자열)
type Handoff = (usize, String);

/// 줄 단위 리더
///
/// `\n` 또는 `\r\n`으로 끝나는 줄을 읽으며, 유효하지 않은 UTF-8 바이트는
/// U+FFFD로 대체합니다.
struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// 원본 경로에 대응하는 JSON 경로 (`data.csv` → `data.json`)
pub fn destination_path(path: &Path) -> PathBuf {
    path.with_extension("json")
}

/// CSV 파일 하나를 JSON 배열 파일로 변환
///
/// `cancel`이 설정되면 다음 줄을 읽기 전에 `Cancelled`로 중단합니다.
/// 대상 파일이 이미 있으면 덮어씁니다.
///
/// # Arguments
/// * `path` - 변환할 CSV 파일 경로
/// * `cancel` - 다른 파일과 공유하는 중단 플래그
pub fn convert_file(path: &Path, cancel: &AtomicBool) -> Result<ConversionReport> {
    let destination = destination_path(path);

    match run(path, &destination, cancel) {
        Ok(report) => {
            log_state(path, PipelineState::Closed);
            Ok(report)
        }
        Err(e) => {
            log_state(path, PipelineState::Aborted);
            Err(e)
        }
    }
}

fn run(path: &Path, destination: &Path, cancel: &AtomicBool) -> Result<ConversionReport> {
    let file = File::open(path).map_err(|e| ConvertError::FileOpen {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let bytes_read = file.metadata().map(|m| m.len()).unwrap_or(0);
    log_state(path, PipelineState::Opened);

    let mut lines = LossyLines::new(BufReader::new(file));
    let headers = match lines.next() {
        Some(line) => parse_record(&line.map_err(|e| read_error(path, e))?),
        None => Vec::new(),
    };
    log_state(path, PipelineState::HeaderRead);
    tracing::debug!("{}: 헤더 {:?}", path.display(), headers);

    let (sender, receiver) = mpsc::sync_channel::<Handoff>(0);
    let headers = &headers;

    let (produced, drained) = thread::scope(|scope| {
        let producer = scope.spawn(move || produce(path, headers, lines, sender, cancel));
        log_state(path, PipelineState::Streaming);

        let drained = drain(path, receiver);
        let produced = producer
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (produced, drained)
    });

    let mut records = drained?;
    produced?;

    if cancel.load(Ordering::Relaxed) {
        return Err(ConvertError::Cancelled {
            file: path.to_path_buf(),
        });
    }

    records.sort_by_key(|(line, _)| *line);
    let array: Vec<Value> = records
        .into_iter()
        .map(|(_, object)| Value::Object(object))
        .collect();

    let bytes_written = write_array(destination, &array)?;
    log_state(path, PipelineState::Written);

    Ok(ConversionReport {
        source: path.to_path_buf(),
        destination: destination.to_path_buf(),
        records: array.len(),
        bytes_read,
        bytes_written,
    })
}

/// 생산자: 남은 줄을 읽어 변환한 뒤 채널로 전달
///
/// 반환 시 `sender`가 해제되어 채널이 닫힙니다.
fn produce(
    path: &Path,
    headers: &[String],
    lines: LossyLines<BufReader<File>>,
    sender: SyncSender<Handoff>,
    cancel: &AtomicBool,
) -> Result<usize> {
    let mut sent = 0;

    // 헤더가 1번째 줄
    for (line_number, line) in (2..).zip(lines) {
        if cancel.load(Ordering::Relaxed) {
            return Err(ConvertError::Cancelled {
                file: path.to_path_buf(),
            });
        }

        let line = line.map_err(|e| read_error(path, e))?;
        let values = parse_record(&line);
        let json = convert_row(path, line_number, headers, &values)?;

        if sender.send((line_number, json)).is_err() {
            // 소비자가 먼저 실패함
            break;
        }
        sent += 1;
    }

    Ok(sent)
}

/// 소비자: 채널이 닫힐 때까지 받아서 객체로 복원
fn drain(path: &Path, receiver: Receiver<Handoff>) -> Result<Vec<(usize, Map<String, Value>)>> {
    log_state(path, PipelineState::Draining);
    let mut records = Vec::new();

    for (line_number, json) in receiver {
        let object: Map<String, Value> =
            serde_json::from_str(&json).map_err(|e| ConvertError::Decode {
                file: path.to_path_buf(),
                reason: format!("{}번째 줄: {}", line_number, e),
            })?;
        records.push((line_number, object));
    }

    Ok(records)
}

/// JSON 배열을 2칸 들여쓰기로 저장하고 쓴 바이트 수를 반환
fn write_array(destination: &Path, array: &[Value]) -> Result<u64> {
    let write_error = |reason: String| ConvertError::Write {
        file: destination.to_path_buf(),
        reason,
    };

    let mut bytes = serde_json::to_vec_pretty(array).map_err(|e| write_error(e.to_string()))?;
    bytes.push(b'\n');

    let mut file = File::create(destination).map_err(|e| write_error(e.to_string()))?;
    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| write_error(e.to_string()))?;

    Ok(bytes.len() as u64)
}

fn read_error(path: &Path, e: io::Error) -> ConvertError {
    ConvertError::Read {
        file: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn log_state(path: &Path, state: PipelineState) {
    tracing::debug!("{}: {}", path.display(), state);
}
