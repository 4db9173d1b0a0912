//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::orchestrator::FileOutcome;

/// 변환 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 파일 수
    pub total_files: usize,
    /// 변환 성공 수
    pub converted_count: AtomicUsize,
    /// 변환 실패 수
    pub failed_count: AtomicUsize,
    /// 중단된 파일 수
    pub cancelled_count: AtomicUsize,
    /// 변환된 총 레코드 수
    pub total_records: AtomicU64,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 파일 하나의 처리 결과 반영
    pub fn record(&self, outcome: &FileOutcome) {
        match &outcome.result {
            Ok(report) => {
                self.converted_count.fetch_add(1, Ordering::Relaxed);
                self.total_records
                    .fetch_add(report.records as u64, Ordering::Relaxed);
                self.total_bytes_read
                    .fetch_add(report.bytes_read, Ordering::Relaxed);
                self.total_bytes_written
                    .fetch_add(report.bytes_written, Ordering::Relaxed);
            }
            Err(e) if e.is_cancelled() => {
                self.cancelled_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                self.failed_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// 성공 수 반환
    pub fn get_converted_count(&self) -> usize {
        self.converted_count.load(Ordering::Relaxed)
    }

    /// 실패 수 반환
    pub fn get_failed_count(&self) -> usize {
        self.failed_count.load(Ordering::Relaxed)
    }

    /// 중단 수 반환
    pub fn get_cancelled_count(&self) -> usize {
        self.cancelled_count.load(Ordering::Relaxed)
    }

    /// 레코드 수 반환
    pub fn get_total_records(&self) -> u64 {
        self.total_records.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        let converted = self.get_converted_count();
        let failed = self.get_failed_count();
        let cancelled = self.get_cancelled_count();
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} 성공:         {}",
            "✅".bright_green(),
            converted.to_string().green()
        );

        if failed > 0 {
            println!(
                "  {} 실패:         {}",
                "❌".bright_red(),
                failed.to_string().red()
            );
        } else {
            println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
        }

        if cancelled > 0 {
            println!(
                "  {} 중단:         {}",
                "⏹️".bright_yellow(),
                cancelled.to_string().yellow()
            );
        }

        println!(
            "  {} 레코드 수:    {}",
            "🧾".bright_white(),
            self.get_total_records()
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );

        if self.total_files > 0 {
            let success_rate = (converted as f64 / self.total_files as f64) * 100.0;
            println!(
                "  {} 성공률:       {:.1}%",
                "📈".bright_white(),
                success_rate
            );
        }

        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use csv2json::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
