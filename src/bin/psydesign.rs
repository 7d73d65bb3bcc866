use clap::Parser;
use dioxus::prelude::*;
use parking_lot::{const_mutex, Mutex};
use psydesign::{
    gui::{
        components::MainWindow, config_manager, desktop_platform::DesktopPlatform, utils,
        AppDashboard,
    },
    Dashboard, GuiError, HttpBackend, PsyDesignResult,
};

/// ウィンドウ設定の保存用
static LAST_WINDOW_CONFIG: Mutex<Option<config_manager::WindowConfig>> = const_mutex(None);

/// PsyDesign AI - ブランド心理デザイナーのデスクトップクライアント
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// バックエンドのURL（設定ファイルより優先）
    #[arg(long)]
    backend_url: Option<String>,

    /// 表示言語 (en/es/fr/hi/zh/ar)
    #[arg(long)]
    lang: Option<String>,

    /// ログレベル (trace/debug/info/warn/error)
    #[arg(long)]
    log_level: Option<String>,
}

fn app() -> Element {
    let window = dioxus::desktop::use_window();

    // ウィンドウ状態を定期的に記録
    use_effect({
        let window = window.clone();
        move || {
            let window = window.clone();
            spawn(async move {
                let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(1));
                loop {
                    interval.tick().await;

                    let current_size = window.inner_size();
                    let current_position = window.outer_position().unwrap_or_default();

                    *LAST_WINDOW_CONFIG.lock() = Some(config_manager::WindowConfig {
                        width: current_size.width,
                        height: current_size.height,
                        x: current_position.x,
                        y: current_position.y,
                        maximized: window.is_maximized(),
                    });
                }
            });
        }
    });

    rsx! {
        MainWindow {}
    }
}

fn main() -> PsyDesignResult<()> {
    let args = Args::parse();

    let config_manager = config_manager::ConfigManager::new()?;
    let mut config = config_manager.load_config().unwrap_or_else(|e| {
        eprintln!("設定読み込みエラー、デフォルト設定を使用: {}", e);
        config_manager::AppConfig::default()
    });

    config.apply_overrides(args.backend_url, args.lang.as_deref());
    if let Some(level) = args.log_level {
        config.log.log_level = level;
    }

    let _log_guard = utils::init_logging(&config.log)?;

    tracing::info!("🎬 Starting PsyDesign AI dashboard");
    tracing::info!(
        "🌐 バックエンド: {} / 言語: {}",
        config.backend.base_url,
        config.language
    );

    let backend = HttpBackend::new(&config.backend)?;
    let dashboard: AppDashboard = Dashboard::new(backend, DesktopPlatform::new(), config.language);

    // ウィンドウ位置をデスクトップ範囲内に調整
    utils::validate_window_bounds(&mut config.window);

    tracing::info!(
        "🪟 ウィンドウ設定: {}x{} at ({}, {}), 最大化: {}",
        config.window.width,
        config.window.height,
        config.window.x,
        config.window.y,
        config.window.maximized
    );

    let launch_builder = dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::tao::window::WindowBuilder::new()
                    .with_title(config.language.labels().title)
                    .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(
                        config.window.width as f64,
                        config.window.height as f64,
                    ))
                    .with_position(dioxus::desktop::tao::dpi::LogicalPosition::new(
                        config.window.x as f64,
                        config.window.y as f64,
                    ))
                    .with_maximized(config.window.maximized)
                    .with_resizable(true),
            ),
        )
        .with_context(dashboard);

    // Ctrl+Cシグナルハンドラー
    ctrlc::set_handler(move || {
        tracing::info!("🛑 終了シグナルを受信しました");
        save_window_config_on_exit();
        std::process::exit(0);
    })
    .map_err(|e| GuiError::Configuration(format!("Failed to set signal handler: {}", e)))?;

    launch_builder.launch(app);

    // 正常終了時の設定保存
    save_window_config_on_exit();

    tracing::info!("👋 PsyDesign shutting down");
    Ok(())
}

/// 終了時にウィンドウ設定を保存
fn save_window_config_on_exit() {
    let Some(window_config) = LAST_WINDOW_CONFIG.lock().clone() else {
        tracing::warn!("保存する最新のウィンドウ設定が見つかりませんでした");
        return;
    };

    let result = config_manager::ConfigManager::new()
        .and_then(|manager| manager.update_config(|config| config.window = window_config));

    match result {
        Ok(config) => tracing::info!(
            "💾 ウィンドウ設定を保存しました: {}x{} at ({}, {}), 最大化: {}",
            config.window.width,
            config.window.height,
            config.window.x,
            config.window.y,
            config.window.maximized
        ),
        Err(e) => utils::log_error_with_context(&e, "ウィンドウ設定の保存"),
    }
}
