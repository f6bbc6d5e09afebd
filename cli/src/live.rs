//! Headless live preview session driven by line input.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each input line is a template change unless it is a control line
//! (`:on`, `:off`, `:doc <id>`, `:doc none`, `:docs`, `:quit`). Template
//! changes go through [`PreviewPanel`]; issued requests run as spawned tasks
//! and report back over a channel, so only this task ever touches the panel.
//! Nothing is cancelled: a response that loses the race to a newer one is
//! dropped by the panel's sequence check.

use std::io::Write;

use previews::RenderResult;
use previews::panel::{ApplyOutcome, PendingRender, PreviewPanel};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::client::{ClientError, PreviewClient};
use crate::output;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveCommand {
    Template(String),
    Enable,
    Disable,
    Select(Option<i64>),
    ListDocs,
    Quit,
    Invalid(String),
}

/// Counters reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveSummary {
    pub issued: u64,
    pub applied: u64,
    pub stale: u64,
    pub failed: u64,
}

type RenderOutcome = (u64, Result<RenderResult, ClientError>);

#[must_use]
pub fn parse_line(line: &str) -> LiveCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(control) = line.strip_prefix(':') else {
        return LiveCommand::Template(line.to_owned());
    };

    let mut parts = control.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("on"), None, None) => LiveCommand::Enable,
        (Some("off"), None, None) => LiveCommand::Disable,
        (Some("docs"), None, None) => LiveCommand::ListDocs,
        (Some("quit"), None, None) => LiveCommand::Quit,
        (Some("doc"), Some("none"), None) => LiveCommand::Select(None),
        (Some("doc"), Some(raw), None) => match raw.parse::<i64>() {
            Ok(id) => LiveCommand::Select(Some(id)),
            Err(_) => LiveCommand::Invalid(format!("not a document id: {raw}")),
        },
        _ => LiveCommand::Invalid(format!("unknown command: {line}")),
    }
}

/// Run a session until input ends (or `:quit`) and every issued request has
/// reported back.
///
/// # Errors
///
/// Returns an error if the initial document list cannot be fetched or if
/// reading input / writing output fails. Individual render failures are
/// reported to `out` and counted, not returned.
pub async fn run_live<R, W>(
    client: &PreviewClient,
    mut panel: PreviewPanel,
    input: R,
    out: &mut W,
) -> Result<LiveSummary, ClientError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    panel.set_documents(client.list_previewable_documents().await?);
    writeln!(
        out,
        "{} documents available; live preview {}",
        panel.documents().map_or(0, <[_]>::len),
        on_off(panel.live_preview())
    )?;

    let (tx, mut rx) = mpsc::unbounded_channel::<RenderOutcome>();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut in_flight = 0_usize;
    let mut summary = LiveSummary::default();

    loop {
        if !input_open && in_flight == 0 {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match parse_line(&line) {
                    LiveCommand::Template(template) => {
                        if let Some(pending) = panel.set_template(template) {
                            summary.issued = summary.issued.saturating_add(1);
                            in_flight = in_flight.saturating_add(1);
                            spawn_render(client, pending, tx.clone());
                        }
                    }
                    LiveCommand::Enable => {
                        panel.set_live_preview(true);
                        writeln!(out, "live preview on")?;
                    }
                    LiveCommand::Disable => {
                        panel.set_live_preview(false);
                        writeln!(out, "live preview off")?;
                    }
                    LiveCommand::Select(id) => {
                        panel.select_document(id);
                        match id {
                            Some(id) => writeln!(out, "document {id} selected")?,
                            None => writeln!(out, "no document selected")?,
                        }
                    }
                    LiveCommand::ListDocs => {
                        let docs = panel.documents().unwrap_or_default();
                        writeln!(out, "{}", output::format_documents(docs))?;
                    }
                    LiveCommand::Quit => input_open = false,
                    LiveCommand::Invalid(message) => writeln!(out, "? {message}")?,
                }
            }
            Some((seq, outcome)) = rx.recv(), if in_flight > 0 => {
                in_flight = in_flight.saturating_sub(1);
                match outcome {
                    Ok(result) => {
                        let rendered = output::format_result(&result);
                        match panel.apply_result(seq, result) {
                            ApplyOutcome::Applied => {
                                summary.applied = summary.applied.saturating_add(1);
                                writeln!(out, "[{seq}] {rendered}")?;
                            }
                            ApplyOutcome::Stale => {
                                summary.stale = summary.stale.saturating_add(1);
                                tracing::warn!(seq, "discarding stale preview response");
                            }
                        }
                    }
                    Err(error) => {
                        summary.failed = summary.failed.saturating_add(1);
                        tracing::error!(seq, %error, "preview request failed");
                        writeln!(out, "[{seq}] error: {error}")?;
                    }
                }
            }
            else => break,
        }
    }

    Ok(summary)
}

fn spawn_render(client: &PreviewClient, pending: PendingRender, tx: mpsc::UnboundedSender<RenderOutcome>) {
    let client = client.clone();
    tokio::spawn(async move {
        let outcome = client.send_render(&pending.request).await;
        let _ = tx.send((pending.seq, outcome));
    });
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

#[cfg(test)]
#[path = "live_test.rs"]
mod tests;
