//! Live preview of a template rendered against a chosen sample document.
//!
//! SYSTEM CONTEXT
//! ==============
//! Embedded next to a template input (e.g. the filename template field). The
//! parent passes the template text as a signal; every change is fed into
//! [`PreviewPanel`], and any request it issues is sent from a local task
//! whose response is applied back through the panel's sequence check.
//! Transport failures go to the host's `NoticeState` context when provided.

use leptos::prelude::*;
use previews::panel::{ApplyOutcome, PendingRender, PreviewPanel};

use crate::net::api;
use crate::state::notices::NoticeState;
use crate::state::preview::{
    DocumentOption, PREVIEW_TITLE, ResultView, document_options, parse_document_choice,
};

/// Preview panel for `template`, talking to `api_base` (defaults to `/api/`).
#[component]
pub fn TemplatingPreview(
    #[prop(into)] template: Signal<String>,
    #[prop(optional, into)] api_base: Option<String>,
) -> impl IntoView {
    let panel = RwSignal::new(PreviewPanel::default());
    let notices = use_context::<RwSignal<NoticeState>>();
    let api_base = StoredValue::new(api_base.unwrap_or_else(|| api::DEFAULT_API_BASE.to_owned()));

    #[cfg(feature = "hydrate")]
    {
        let base = api_base.get_value();
        leptos::task::spawn_local(async move {
            match api::fetch_docs_for_preview(&base).await {
                Ok(docs) => panel.update(|p| p.set_documents(docs)),
                Err(message) => report_failure(notices, message),
            }
        });
    }

    Effect::new(move || {
        let text = template.get();
        let mut pending = None;
        panel.update(|p| pending = p.set_template(text));
        if let Some(pending) = pending {
            send_render(api_base, pending, panel, notices);
        }
    });

    let on_toggle = move |ev: leptos::ev::Event| {
        let enabled = event_target_checked(&ev);
        panel.update(|p| p.set_live_preview(enabled));
    };

    let on_select = move |ev: leptos::ev::Event| {
        let choice = parse_document_choice(&event_target_value(&ev));
        panel.update(|p| p.select_document(choice));
    };

    let on_refresh = move |_| {
        let mut pending = None;
        panel.update(|p| pending = p.refresh());
        if let Some(pending) = pending {
            send_render(api_base, pending, panel, notices);
        }
    };

    view! {
        <details class="templating-preview">
            <summary class="templating-preview__title">{PREVIEW_TITLE}</summary>
            <div class="templating-preview__controls">
                <label class="templating-preview__toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || panel.with(PreviewPanel::live_preview)
                        on:change=on_toggle
                    />
                    "Enable live preview"
                </label>
                <select
                    class="templating-preview__documents"
                    disabled=move || panel.with(|p| p.documents().is_none())
                    on:change=on_select
                >
                    {move || {
                        panel
                            .with(document_options)
                            .into_iter()
                            .map(|option| {
                                let DocumentOption { value, label, selected } = option;
                                view! { <option value=value selected=selected>{label}</option> }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <button
                    class="btn templating-preview__refresh"
                    on:click=on_refresh
                    disabled=move || panel.with(|p| p.template().is_none())
                >
                    "Refresh"
                </button>
            </div>
            {move || {
                panel
                    .with(|p| p.result().map(ResultView::from_result))
                    .map(render_result)
            }}
        </details>
    }
}

fn render_result(result: ResultView) -> impl IntoView {
    let ResultView { status_label, status_class, preview, debug, errors, warnings } = result;
    let status_classes = format!("templating-preview__status {status_class}");

    view! {
        <div class="templating-preview__result">
            <span class=status_classes>{status_label}</span>
            <code class="templating-preview__output">{preview}</code>
            {debug.map(|debug| view! { <code class="templating-preview__debug">{debug}</code> })}
            <ul class="templating-preview__errors">
                {errors.into_iter().map(|e| view! { <li>{e}</li> }).collect::<Vec<_>>()}
            </ul>
            <ul class="templating-preview__warnings">
                {warnings.into_iter().map(|w| view! { <li>{w}</li> }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

fn send_render(
    api_base: StoredValue<String>,
    pending: PendingRender,
    panel: RwSignal<PreviewPanel>,
    notices: Option<RwSignal<NoticeState>>,
) {
    leptos::task::spawn_local(async move {
        let base = api_base.get_value();
        match api::request_preview(&base, &pending.request).await {
            Ok(result) => {
                let mut outcome = ApplyOutcome::Applied;
                panel.update(|p| outcome = p.apply_result(pending.seq, result));
                if outcome == ApplyOutcome::Stale {
                    #[cfg(feature = "hydrate")]
                    {
                        log::debug!("discarding stale template preview #{}", pending.seq);
                    }
                }
            }
            Err(message) => report_failure(notices, message),
        }
    });
}

fn report_failure(notices: Option<RwSignal<NoticeState>>, message: String) {
    #[cfg(feature = "hydrate")]
    {
        log::error!("{message}");
    }
    if let Some(notices) = notices {
        notices.update(|n| {
            n.push_error(message);
        });
    }
}
