use tracing::{debug, error, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::gui::config_manager::{LogConfig, WindowConfig};

/// ログ初期化
///
/// `RUST_LOG` があればそちらを優先する。ファイル出力が有効な場合は
/// 日次ローテーションのログを書き、返したガードが生きている間フラッシュされる。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let mut guard = None;
    let file_layer = match config.resolved_log_dir() {
        Some(log_dir) if config.enable_file_logging => {
            std::fs::create_dir_all(&log_dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("psydesign")
                .filename_suffix("log")
                .max_log_files(config.max_log_files.max(1))
                .build(&log_dir)?;
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            )
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// 失敗をcauseの連鎖ごと記録
pub fn log_error_with_context(error: &anyhow::Error, context: &str) {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    error!(context, %error, ?causes, "❌ {}に失敗しました", context);
}

/// これより小さいウィンドウは復元しない
const MIN_WINDOW_SIZE: (u32, u32) = (480, 360);

/// 保存済みのウィンドウを画面に収める
///
/// 大きすぎれば画面サイズまで縮め、はみ出した位置は画面の端に寄せる。
pub fn clamp_window_to_screen(config: &mut WindowConfig, screen: (u32, u32)) {
    let (screen_w, screen_h) = screen;
    config.width = config.width.clamp(MIN_WINDOW_SIZE.0.min(screen_w), screen_w);
    config.height = config.height.clamp(MIN_WINDOW_SIZE.1.min(screen_h), screen_h);

    let max_x = screen_w.saturating_sub(config.width) as i32;
    let max_y = screen_h.saturating_sub(config.height) as i32;
    config.x = config.x.clamp(0, max_x);
    config.y = config.y.clamp(0, max_y);
}

/// プライマリモニターの物理サイズ
pub fn get_primary_monitor_size() -> Option<(u32, u32)> {
    let event_loop = dioxus::desktop::tao::event_loop::EventLoop::new();
    let size = event_loop.primary_monitor()?.size();
    Some((size.width, size.height))
}

/// 起動前にウィンドウ設定を検証
pub fn validate_window_bounds(config: &mut WindowConfig) {
    match get_primary_monitor_size() {
        Some(screen) => {
            clamp_window_to_screen(config, screen);
            debug!("🖥️ 画面 {}x{} に合わせてウィンドウを調整", screen.0, screen.1);
        }
        None => {
            config.x = config.x.max(0);
            config.y = config.y.max(0);
            config.width = config.width.max(MIN_WINDOW_SIZE.0);
            config.height = config.height.max(MIN_WINDOW_SIZE.1);
            warn!("⚠️ モニターを検出できないため最小限の検証のみ行いました");
        }
    }
}
