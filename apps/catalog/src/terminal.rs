//! Terminal stand-ins for the dialog, the notification area and the table.

use std::sync::Arc;

use async_trait::async_trait;
use client_core::{
    list_view::DISPLAYED_COLUMNS, notifications::ToastId, ConfirmDialog, ConfirmRequest,
    Notification, NotificationCenter, NotificationKind, Notifier,
};
use shared::domain::Product;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::debug;

/// Line reader over stdin shared by the shell loop and the confirmation prompt.
pub struct TerminalInput {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// `None` once stdin is closed.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        if let Err(error) = stdout.write_all(prompt.as_bytes()).await {
            debug!(%error, "failed to write prompt");
        }
        if let Err(error) = stdout.flush().await {
            debug!(%error, "failed to flush prompt");
        }
        self.lines.lock().await.next_line().await.ok().flatten()
    }
}

pub struct TerminalPrompt {
    input: Arc<TerminalInput>,
}

impl TerminalPrompt {
    pub fn new(input: Arc<TerminalInput>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl ConfirmDialog for TerminalPrompt {
    async fn confirm(&self, request: &ConfirmRequest) -> bool {
        if let Some(title) = &request.title {
            println!("{title}");
        }
        let prompt = format!(
            "{} [{}/{}] ",
            request.message, request.ok_label, request.cancel_label
        );
        let answer = self.input.read_line(&prompt).await.unwrap_or_default();
        let confirmed = is_affirmative(&answer, &request.ok_label);
        debug!(confirmed, "confirmation answered");
        confirmed
    }
}

pub fn is_affirmative(answer: &str, ok_label: &str) -> bool {
    let answer = answer.trim();
    ["y", "yes"]
        .iter()
        .any(|word| answer.eq_ignore_ascii_case(word))
        || (!answer.is_empty() && answer.eq_ignore_ascii_case(ok_label.trim()))
}

/// Prints every notification to stderr and keeps it as a toast until it
/// expires or is dismissed.
#[derive(Default)]
pub struct TerminalNotifier {
    center: NotificationCenter,
}

impl TerminalNotifier {
    /// Toasts that have not expired yet, formatted one per line.
    pub fn render_toasts(&self) -> String {
        let visible = self.center.visible();
        if visible.is_empty() {
            return "(no notifications)\n".to_string();
        }
        visible
            .iter()
            .map(|(id, notification)| {
                format!(
                    "#{} {} ({})\n",
                    id.0,
                    format_notification(notification),
                    notification.action_label
                )
            })
            .collect()
    }

    pub fn dismiss(&self, id: u64) -> bool {
        self.center.dismiss(ToastId(id))
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", format_notification(&notification));
        self.center.notify(notification);
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}

/// Renders the list view rows with an id column in front of the data columns.
pub fn render_table(rows: &[Product]) -> String {
    let mut header = vec!["id".to_string()];
    header.extend(
        DISPLAYED_COLUMNS
            .iter()
            .filter(|column| **column != "actions")
            .map(|column| column.to_string()),
    );

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|p| {
            vec![
                p.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                p.name.clone(),
                p.description.clone(),
                format!("{:.2}", p.price),
                p.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &body {
        push_row(&mut out, row, &widths);
    }
    if body.is_empty() {
        out.push_str("(no products)\n");
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
