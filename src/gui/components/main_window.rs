use dioxus::prelude::*;

use crate::gui::{
    components::NodeView, config_manager, dispatcher::Intent, styles::theme::get_embedded_css,
    view::dashboard_page, AppDashboard,
};

/// メインウィンドウコンポーネント
///
/// ダッシュボードの変更通知を受けてセッションのスナップショットを描き直す。
#[component]
pub fn MainWindow() -> Element {
    let dashboard = use_context::<AppDashboard>();
    let mut session = use_signal(|| dashboard.snapshot());

    // 起動時に履歴を読み込む
    use_hook({
        let dashboard = dashboard.clone();
        move || {
            spawn(async move {
                dashboard.dispatch(Intent::RefreshHistory).await;
            });
        }
    });

    use_future(move || {
        let dashboard = dashboard.clone();
        async move {
            let mut revisions = dashboard.subscribe();
            let mut language = dashboard.snapshot().language;

            while revisions.changed().await.is_ok() {
                let snapshot = dashboard.snapshot();
                if snapshot.language != language {
                    language = snapshot.language;
                    config_manager::save_language_async(language);
                }
                session.set(snapshot);
            }
            tracing::debug!("🔚 MainWindow: 変更通知の購読を終了");
        }
    });

    let current = session();
    let page = dashboard_page(&current);
    let fonts = current.fonts.fonts().to_vec();
    let dir = if current.language.is_rtl() { "rtl" } else { "ltr" };
    let lang = current.language.code();
    let title = current.labels().title;

    tracing::trace!("🖥️ MainWindow: Rendering mode={:?}", current.mode());

    rsx! {
        document::Title { "{title}" }

        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        // レポートで使うWebフォント（登録済みのものだけ）
        for font in fonts {
            document::Link {
                key: "{font.element_id}",
                rel: "stylesheet",
                href: font.href.clone(),
            }
        }

        div {
            class: "app",
            dir: dir,
            lang: lang,
            NodeView { node: page }
        }
    }
}
