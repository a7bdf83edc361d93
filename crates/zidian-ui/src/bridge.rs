use kanal::{AsyncReceiver, AsyncSender};
use zidian_core::types::AppEvent;

/// Everything the UI loop reacts to, on one channel
#[derive(Debug)]
pub enum Incoming {
    Line(String),
    InputClosed,
    App(AppEvent),
    BackendClosed,
}

/// Funnels input lines and backend events into a single receiver.
///
/// A kanal receive dropped by `select!` after a sender handed it a value
/// loses that value, so each source gets its own forwarding task and the
/// loop only ever awaits one receive.
pub struct UiBridge {
    forwarders: Vec<tokio::task::JoinHandle<()>>,
}

impl UiBridge {
    pub fn new(
        lines: AsyncReceiver<String>,
        app_to_ui_rx: AsyncReceiver<AppEvent>,
    ) -> (Self, AsyncReceiver<Incoming>) {
        let (tx, rx) = kanal::unbounded_async();

        let forwarders = vec![
            tokio::spawn(forward_lines(lines, tx.clone())),
            tokio::spawn(forward_from_backend(app_to_ui_rx, tx)),
        ];

        (Self { forwarders }, rx)
    }
}

impl Drop for UiBridge {
    fn drop(&mut self) {
        for forwarder in &self.forwarders {
            forwarder.abort();
        }
    }
}

async fn forward_lines(lines: AsyncReceiver<String>, tx: AsyncSender<Incoming>) {
    while let Ok(line) = lines.recv().await {
        if tx.send(Incoming::Line(line)).await.is_err() {
            return;
        }
    }
    let _ = tx.send(Incoming::InputClosed).await;
}

async fn forward_from_backend(app_to_ui_rx: AsyncReceiver<AppEvent>, tx: AsyncSender<Incoming>) {
    while let Ok(event) = app_to_ui_rx.recv().await {
        if tx.send(Incoming::App(event)).await.is_err() {
            return;
        }
    }
    let _ = tx.send(Incoming::BackendClosed).await;
}
