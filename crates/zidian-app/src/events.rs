use std::ops::ControlFlow;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use zidian_core::QueryView;
use zidian_core::types::{AppEvent, UiEvent};
use zidian_lookup::LookupClient;

pub mod submit;

use submit::handle_submit;

/// App's main loop. Sole owner and writer of the query view.
pub async fn event_loop(
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    client: Arc<dyn LookupClient>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut view = QueryView::new();

    let provider = client.metadata();
    tracing::info!(
        "[EVENT_LOOP] Starting with provider {} ({})",
        provider.name,
        provider.endpoint
    );

    app_to_ui_tx.send(AppEvent::Render(view.render())).await?;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        if handle_events(&mut view, client.as_ref(), &app_to_ui_tx, event)
            .await?
            .is_break()
        {
            tracing::info!("[EVENT_LOOP] Closing");
            break;
        }
    }

    Ok(())
}

async fn handle_events(
    view: &mut QueryView,
    client: &dyn LookupClient,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        AppEvent::UiEvent(UiEvent::SetQuery(text)) => {
            tracing::debug!("Query text set: {:?}", text);
            view.set_query(text);
        }
        AppEvent::UiEvent(UiEvent::Submit) => {
            handle_submit(view, client, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(UiEvent::Close) | AppEvent::Shutdown => {
            return Ok(ControlFlow::Break(()));
        }
        AppEvent::Render(_) => {
            // UI-only event, ignore in backend
        }
    }

    Ok(ControlFlow::Continue(()))
}
