//! csv2json - CSV TO JSON CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv2json::{
    cli::Args,
    error::ConvertError,
    logger,
    orchestrator::{FileOutcome, Orchestrator},
    pipeline::destination_path,
    stats::Statistics,
    validation::validate,
};

fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI 인자: {:?}", args);

    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            exit_with(&ConvertError::ThreadPool {
                reason: e.to_string(),
            });
        }
    }

    // 입력 경로 검증
    let paths = match validate(args.paths.clone()) {
        Ok(paths) => paths,
        Err(e) => {
            print_validation_errors(&e);
            exit_with(&e);
        }
    };

    // 헤더 출력
    print_header(&args, &paths);

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&paths);
        return Ok(());
    }

    let outcomes = run_conversion(&args, paths);

    let errors: Vec<(PathBuf, String)> = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.clone(), e.to_string())))
        .collect();

    // 에러 출력
    print_errors(&errors, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
    }

    if let Some(e) = Orchestrator::first_error(&outcomes) {
        exit_with(e);
    }

    Ok(())
}

/// 변환 실행
fn run_conversion(args: &Args, paths: Vec<PathBuf>) -> Vec<FileOutcome> {
    let stats = Statistics::new(paths.len());
    let pb = create_progress_bar(paths.len());
    let verbose = args.verbose;

    println!("\n{}", "⚡ 병렬 변환 중...".bright_cyan());

    let orchestrator = Orchestrator::new(args.failure_policy());
    let outcomes = orchestrator.run(paths, |outcome| {
        stats.record(outcome);
        pb.inc(1);

        match &outcome.result {
            Ok(report) => {
                pb.println(format!(
                    "  {} JSON 배열 저장 완료: {:?}",
                    "✓".green(),
                    report.destination
                ));
                if verbose {
                    pb.println(format!(
                        "    {} 레코드, {} 바이트",
                        report.records, report.bytes_written
                    ));
                }
            }
            Err(e) => pb.println(format!("  {} {}", "✗".red(), e)),
        }
    });

    pb.finish_with_message("완료!");

    // 통계 출력
    stats.print_summary();

    outcomes
}

/// 에러 메시지 출력 후 종료 코드로 프로세스 종료
fn exit_with(error: &ConvertError) -> ! {
    tracing::error!("종료 코드 {}: {}", error.exit_code(), error);
    eprintln!("\n{} {}", "❌".bright_red(), error.to_string().red());
    std::process::exit(error.exit_code());
}

/// 검증 에러 목록 출력
fn print_validation_errors(error: &ConvertError) {
    if let ConvertError::Validation(errors) = error {
        eprintln!("\n{}", "❌ 입력 검증 오류:".bright_red());
        for e in errors {
            eprintln!("  {} {}", "•".red(), e);
        }
    }
}

/// 헤더 출력
fn print_header(args: &Args, paths: &[PathBuf]) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 CSV TO JSON CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!(
        "  {} 입력 파일 수: {}",
        "📋".bright_white(),
        paths.len().to_string().bright_green()
    );

    if args.keep_going {
        println!(
            "  {} {}",
            "⚙️".bright_yellow(),
            "실패 시 계속 진행 모드".yellow()
        );
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(paths: &[PathBuf]) {
    println!("\n{}", "📋 생성 예정 파일 목록:".bright_cyan());
    for (i, path) in paths.iter().enumerate() {
        println!("  {}. {:?} → {:?}", i + 1, path, destination_path(path));
    }
    println!(
        "\n{} 총 {} 개의 파일이 변환될 예정입니다.",
        "ℹ️".bright_blue(),
        paths.len().to_string().bright_green()
    );
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        println!("  {} {:?}", "•".red(), path.file_name().unwrap_or_default());
        if verbose {
            println!("    {}", error.dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, errors: &[(PathBuf, String)]) -> Result<()> {
    let mut log_file = File::create(log_path)?;

    writeln!(log_file, "csv2json 에러 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_now())?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, error) in errors {
        writeln!(log_file, "\n파일: {:?}", path)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}
