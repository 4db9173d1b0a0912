//! 로깅 초기화 모듈

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 콘솔 로거 초기화
///
/// `RUST_LOG`가 설정되어 있으면 그 값을 우선합니다.
/// 진행률 표시와 섞이지 않도록 로그는 stderr로 출력합니다.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose { "csv2json=debug" } else { "csv2json=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(verbose)
                .compact(),
        )
        .init();
}
