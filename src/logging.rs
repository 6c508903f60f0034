//! ログ初期化
//!
//! 進捗表示は標準出力（println!）、診断ログは tracing で標準エラーへ出す。

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `RUST_LOG` 未指定時のフィルタ
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,wms_qr=debug,wms_qr_common=debug"
    } else {
        "warn"
    }
}

/// tracing subscriber を登録する。二重登録は無視
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
