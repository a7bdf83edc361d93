use kanal::AsyncSender;
use zidian_core::types::AppEvent;
use zidian_core::{QueryView, Submission};
use zidian_lookup::LookupClient;

/// Run one submission, rendering the loading state before the request and
/// the outcome after it
pub async fn handle_submit(
    view: &mut QueryView,
    client: &dyn LookupClient,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match view.begin_submit() {
        Submission::Started(query) => {
            app_to_ui_tx.send(AppEvent::Render(view.render())).await?;

            let outcome = client.fetch(query.as_str()).await;
            view.complete(outcome);
        }
        Submission::Rejected(err) => {
            tracing::info!("Input rejected: {}", err);
        }
        Submission::Busy => {
            tracing::debug!("Lookup in flight, submit ignored");
        }
    }

    app_to_ui_tx.send(AppEvent::Render(view.render())).await?;
    Ok(())
}
