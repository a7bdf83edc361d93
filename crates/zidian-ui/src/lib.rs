use std::io::{self, BufRead, Write};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;
use zidian_config::{Config, OutputFormat};
use zidian_core::types::{AppEvent, UiEvent};

pub mod bridge;
pub mod input;
pub mod renderer;

use bridge::{Incoming, UiBridge};
pub use input::InputLine;
pub use renderer::Renderer;

const PROMPT: &str = "字> ";
const QUIT: &str = ":q";

/// Terminal front end: input lines in, rendered views out.
/// `lines` closing is treated as end of input.
pub async fn ui_loop(
    lines: AsyncReceiver<String>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let (renderer, input) = {
        let config = config.read().await;
        (
            Renderer::from_config(&config.ui),
            InputLine::new(config.ui.max_input_chars),
        )
    };
    let interactive = renderer.format() == OutputFormat::Text && atty::is(atty::Stream::Stdin);

    let mut input_open = true;
    let mut submit_enabled = true;

    print!("{}", renderer.header());
    prompt(interactive);

    let (_bridge, incoming) = UiBridge::new(lines, app_to_ui_rx);

    while let Ok(next) = incoming.recv().await {
        match next {
            Incoming::App(AppEvent::Render(view)) => {
                submit_enabled = view.input.submit_enabled;
                println!("{}", renderer.render(&view));

                if submit_enabled {
                    if !input_open {
                        tracing::debug!("[UI] Input exhausted, closing");
                        let _ = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await;
                        break;
                    }
                    prompt(interactive);
                }
            }
            Incoming::App(AppEvent::Shutdown) | Incoming::BackendClosed => {
                tracing::debug!("[UI] Backend gone, stopping");
                break;
            }
            Incoming::App(_) => {}
            Incoming::Line(line) if line.trim() == QUIT => {
                let _ = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await;
                break;
            }
            Incoming::Line(line) => {
                if !submit_enabled {
                    tracing::info!("[UI] Submit disabled while loading, dropping input {:?}", line);
                    continue;
                }

                // Disabled until the backend renders the outcome
                submit_enabled = false;
                let text = input.accept(&line);
                ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::SetQuery(text))).await?;
                ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Submit)).await?;
            }
            Incoming::InputClosed => {
                input_open = false;
                if submit_enabled {
                    let _ = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await;
                    break;
                }
            }
        }
    }

    Ok(())
}

fn prompt(interactive: bool) {
    if interactive {
        print!("{PROMPT}");
        let _ = io::stdout().flush();
    }
}

/// Read stdin on a detached thread; a blocking read must not hold up runtime shutdown
pub fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("[UI] Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    rx.to_async()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::task::JoinHandle;
    use tokio::time::timeout;
    use zidian_core::QueryView;

    use super::*;

    struct Harness {
        lines: Option<AsyncSender<String>>,
        to_ui: AsyncSender<AppEvent>,
        from_ui: AsyncReceiver<AppEvent>,
        handle: JoinHandle<anyhow::Result<()>>,
    }

    impl Harness {
        fn start() -> Self {
            let (line_tx, line_rx) = kanal::bounded_async(0);
            let (to_ui, app_to_ui_rx) = kanal::unbounded_async();
            let (ui_to_app_tx, from_ui) = kanal::unbounded_async();
            let config = Arc::new(RwLock::new(Config::default()));

            let handle = tokio::spawn(ui_loop(line_rx, app_to_ui_rx, ui_to_app_tx, config));

            Self {
                lines: Some(line_tx),
                to_ui,
                from_ui,
                handle,
            }
        }

        async fn type_line(&self, line: &str) {
            let lines = self.lines.as_ref().expect("input still open");
            lines.send(line.to_string()).await.unwrap();
            settle().await;
        }

        async fn render(&self, view: zidian_core::View) {
            self.to_ui.send(AppEvent::Render(view)).await.unwrap();
            settle().await;
        }

        async fn next_event(&self) -> AppEvent {
            match timeout(Duration::from_secs(2), self.from_ui.recv()).await {
                Ok(Ok(event)) => event,
                Ok(Err(e)) => panic!("Channel error: {}", e),
                Err(_) => panic!("Timeout - UI sent nothing"),
            }
        }

        async fn expect_submit_of(&self, text: &str) {
            match self.next_event().await {
                AppEvent::UiEvent(UiEvent::SetQuery(query)) => assert_eq!(query, text),
                other => panic!("expected SetQuery, got {other:?}"),
            }
            assert!(matches!(
                self.next_event().await,
                AppEvent::UiEvent(UiEvent::Submit)
            ));
        }
    }

    // Lines and renders reach the loop through separate forwarders
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    fn loading_view() -> zidian_core::View {
        let mut view = QueryView::new();
        view.set_query("水");
        view.begin_submit();
        view.render()
    }

    fn settled_view() -> zidian_core::View {
        QueryView::new().render()
    }

    #[tokio::test]
    async fn line_during_lookup_is_dropped() {
        let ui = Harness::start();

        ui.type_line("水").await;
        ui.expect_submit_of("水").await;

        ui.render(loading_view()).await;
        ui.type_line("火").await;
        ui.render(settled_view()).await;
        ui.type_line("木").await;

        ui.expect_submit_of("木").await;
    }

    #[tokio::test]
    async fn line_before_first_render_is_dropped() {
        let ui = Harness::start();

        ui.type_line("水").await;
        ui.expect_submit_of("水").await;

        // Submit stays disabled until the backend answers
        ui.type_line("火").await;
        ui.render(settled_view()).await;
        ui.type_line("木").await;

        ui.expect_submit_of("木").await;
    }

    #[tokio::test]
    async fn input_is_truncated_before_submit() {
        let ui = Harness::start();

        ui.type_line("水火").await;
        ui.expect_submit_of("水").await;
    }

    #[tokio::test]
    async fn end_of_input_during_lookup_waits_for_outcome() {
        let mut ui = Harness::start();

        ui.type_line("水").await;
        ui.expect_submit_of("水").await;
        ui.lines.take();

        ui.render(loading_view()).await;
        let early = timeout(Duration::from_millis(100), ui.from_ui.recv()).await;
        assert!(early.is_err(), "closed before the lookup settled");

        ui.render(settled_view()).await;
        assert!(matches!(
            ui.next_event().await,
            AppEvent::UiEvent(UiEvent::Close)
        ));

        let result = timeout(Duration::from_secs(2), ui.handle)
            .await
            .expect("UI loop did not stop");
        assert!(result.unwrap().is_ok());
    }

    #[tokio::test]
    async fn quit_command_closes() {
        let ui = Harness::start();

        ui.type_line(":q").await;

        assert!(matches!(
            ui.next_event().await,
            AppEvent::UiEvent(UiEvent::Close)
        ));
        let result = timeout(Duration::from_secs(2), ui.handle)
            .await
            .expect("UI loop did not stop");
        assert!(result.unwrap().is_ok());
    }

    #[tokio::test]
    async fn end_of_input_when_idle_closes() {
        let mut ui = Harness::start();

        ui.lines.take();

        assert!(matches!(
            ui.next_event().await,
            AppEvent::UiEvent(UiEvent::Close)
        ));
    }
}
