//! 描画ツリーをDioxusの要素に変換するコンポーネント

use dioxus::prelude::*;

use crate::gui::dispatcher::Intent;
use crate::gui::view::{ElementNode, Node, Tag};
use crate::gui::AppDashboard;

fn dispatch(dashboard: &AppDashboard, intent: Intent) {
    let dashboard = dashboard.clone();
    spawn(async move {
        dashboard.dispatch(intent).await;
    });
}

/// ノード1つ分（子は再帰的に描画）
#[component]
pub fn NodeView(node: Node) -> Element {
    let dashboard = use_context::<AppDashboard>();

    match node {
        Node::Text(text) => rsx! { "{text}" },
        Node::Icon(icon) => rsx! {
            span { class: "icon icon-{icon.name()}", "{icon.glyph()}" }
        },
        Node::Element(element) => render_element(element, dashboard),
    }
}

fn render_element(element: ElementNode, dashboard: AppDashboard) -> Element {
    let ElementNode {
        tag,
        id,
        class,
        style,
        title,
        src,
        alt,
        disabled,
        on_click,
        binding,
        children,
    } = element;

    let click_dashboard = dashboard.clone();
    let onclick = move |evt: MouseEvent| {
        if let Some(intent) = on_click.clone() {
            // 行の中のボタン（削除など）が行自体のクリックを起こさないように
            evt.stop_propagation();
            dispatch(&click_dashboard, intent);
        }
    };

    let (field, value, placeholder, on_enter) = match binding {
        Some(binding) => (
            Some(binding.field),
            binding.value,
            binding.placeholder,
            binding.on_enter,
        ),
        None => (None, String::new(), String::new(), None),
    };
    let input_dashboard = dashboard.clone();
    let oninput = move |evt: FormEvent| {
        if let Some(field) = field {
            dispatch(&input_dashboard, Intent::edit(field, evt.value()));
        }
    };
    let onkeyup = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            if let Some(intent) = on_enter.clone() {
                dispatch(&dashboard, intent);
            }
        }
    };

    let kids = rsx! {
        for child in children {
            NodeView { node: child }
        }
    };

    match tag {
        Tag::Div => rsx! { div { id, class, style, title, onclick: onclick, {kids} } },
        Tag::Aside => rsx! { aside { id, class, style, {kids} } },
        Tag::Header => rsx! { header { id, class, style, {kids} } },
        Tag::Main => rsx! { main { id, class, style, {kids} } },
        Tag::H1 => rsx! { h1 { id, class, style, {kids} } },
        Tag::H2 => rsx! { h2 { id, class, style, {kids} } },
        Tag::H3 => rsx! { h3 { id, class, style, {kids} } },
        Tag::H4 => rsx! { h4 { id, class, style, {kids} } },
        Tag::P => rsx! { p { id, class, style, {kids} } },
        Tag::Em => rsx! { em { class, {kids} } },
        Tag::Strong => rsx! { strong { class, {kids} } },
        Tag::Span => rsx! { span { id, class, style, title, {kids} } },
        Tag::Ul => rsx! { ul { id, class, style, {kids} } },
        Tag::Li => rsx! { li { id, class, style, title, onclick: onclick, {kids} } },
        Tag::Img => rsx! { img { id, class, style, src, alt } },
        Tag::Button => rsx! {
            button { id, class, style, title, disabled, onclick: onclick, {kids} }
        },
        Tag::Input => rsx! {
            input {
                id,
                class,
                style,
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                disabled,
                oninput: oninput,
                onkeyup: onkeyup,
            }
        },
        Tag::Textarea => rsx! {
            textarea {
                id,
                class,
                style,
                value: "{value}",
                placeholder: "{placeholder}",
                disabled,
                oninput: oninput,
            }
        },
    }
}
