use zidian_lookup::{LookupClient, LookupError, LookupRecord, LookupResponse};

use crate::query::{Query, QueryError};
use crate::render::{self, View};

const GENERIC_FAILURE: &str = "查询失败";
const TRANSPORT_FAILURE: &str = "查询失败，请稍后重试";
const BAD_STATUS: &str = "网络响应异常";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptyInput,
    InvalidLength,
    Transport,
    LogicalApi,
}

/// A failed submission, reduced to one user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<QueryError> for Failure {
    fn from(err: QueryError) -> Self {
        let kind = match err {
            QueryError::EmptyInput => FailureKind::EmptyInput,
            QueryError::InvalidLength(_) => FailureKind::InvalidLength,
        };

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<&LookupError> for Failure {
    fn from(err: &LookupError) -> Self {
        let (kind, message) = match err {
            LookupError::Status(_) => (FailureKind::Transport, BAD_STATUS.to_string()),
            LookupError::Network(_) | LookupError::Decode(_) => {
                (FailureKind::Transport, TRANSPORT_FAILURE.to_string())
            }
            LookupError::Api { message, .. } => (
                FailureKind::LogicalApi,
                message.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            ),
            LookupError::EmptyResult => (FailureKind::LogicalApi, GENERIC_FAILURE.to_string()),
        };

        Self { kind, message }
    }
}

/// Everything the page can show. Error and result are exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Failed(Failure),
    Found(LookupRecord),
}

/// Outcome of asking for a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validation passed, a lookup for this query is in flight
    Started(Query),
    /// Validation failed, no request was made
    Rejected(QueryError),
    /// A lookup is already in flight
    Busy,
}

/// Owns the input text and the displayed state of the lookup page
#[derive(Debug, Clone, Default)]
pub struct QueryView {
    query: String,
    state: ViewState,
}

impl QueryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Replace the input text. A stale error goes away, a shown result stays.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();

        if matches!(self.state, ViewState::Failed(_)) {
            self.state = ViewState::Idle;
        }
    }

    /// Validate and enter the loading state.
    ///
    /// On `Started` the caller performs the lookup and hands the outcome to
    /// [`QueryView::complete`].
    pub fn begin_submit(&mut self) -> Submission {
        if self.is_loading() {
            tracing::debug!("Submit ignored, lookup already in flight");
            return Submission::Busy;
        }

        match Query::parse(&self.query) {
            Ok(query) => {
                tracing::info!("Looking up '{}'", query);
                self.state = ViewState::Loading;
                Submission::Started(query)
            }
            Err(err) => {
                tracing::debug!("Rejected input {:?}: {:?}", self.query, err);
                self.state = ViewState::Failed(err.into());
                Submission::Rejected(err)
            }
        }
    }

    /// Settle an in-flight lookup. Always leaves the loading state.
    pub fn complete(&mut self, outcome: Result<LookupResponse, LookupError>) {
        if !self.is_loading() {
            tracing::warn!("Lookup outcome arrived with no lookup in flight, ignoring");
            return;
        }

        self.state = match outcome.and_then(LookupResponse::into_record) {
            Ok(record) => {
                tracing::debug!("Lookup found '{}'", record.hanzi);
                ViewState::Found(record)
            }
            Err(err) => {
                if err.is_transport() {
                    tracing::error!("Lookup request failed: {}", err);
                } else {
                    tracing::warn!("Lookup rejected by API: {}", err);
                }
                ViewState::Failed(Failure::from(&err))
            }
        };
    }

    /// Validate, look up and settle in one step
    pub async fn submit(&mut self, client: &dyn LookupClient) -> Submission {
        let submission = self.begin_submit();

        if let Submission::Started(query) = &submission {
            let outcome = client.fetch(query.as_str()).await;
            self.complete(outcome);
        }

        submission
    }

    pub fn render(&self) -> View {
        render::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeClient, success_body};

    fn failure(view: &QueryView) -> &Failure {
        match view.state() {
            ViewState::Failed(failure) => failure,
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_input_fails_without_network() {
        let client = FakeClient::responding(success_body());
        let mut view = QueryView::new();

        view.set_query("  ");
        let submission = view.submit(&client).await;

        assert_eq!(submission, Submission::Rejected(QueryError::EmptyInput));
        assert_eq!(failure(&view).kind, FailureKind::EmptyInput);
        assert_eq!(failure(&view).message, "请输入一个汉字");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn long_input_fails_without_network() {
        let client = FakeClient::responding(success_body());
        let mut view = QueryView::new();

        view.set_query("ab");
        view.submit(&client).await;

        assert_eq!(failure(&view).kind, FailureKind::InvalidLength);
        assert_eq!(failure(&view).message, "请输入单个汉字");
        assert!(!view.is_loading());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn valid_character_issues_one_call_and_stores_first_entry() {
        let client = FakeClient::responding(success_body());
        let mut view = QueryView::new();

        view.set_query("水");
        view.submit(&client).await;

        assert_eq!(client.calls(), vec!["水".to_string()]);
        match view.state() {
            ViewState::Found(record) => {
                assert_eq!(record.hanzi, "水");
                assert_eq!(record.reading(), "shuǐ");
            }
            other => panic!("expected result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_leaves_loading() {
        let client = FakeClient::failing_with_status(500);
        let mut view = QueryView::new();

        view.set_query("水");
        view.submit(&client).await;

        assert!(!view.is_loading());
        assert_eq!(failure(&view).kind, FailureKind::Transport);
        assert_eq!(failure(&view).message, "网络响应异常");
    }

    #[tokio::test]
    async fn api_error_uses_provided_message_or_fallback() {
        let client = FakeClient::responding(r#"{"code":250,"msg":"数据返回为空"}"#);
        let mut view = QueryView::new();
        view.set_query("水");
        view.submit(&client).await;
        assert_eq!(failure(&view).kind, FailureKind::LogicalApi);
        assert_eq!(failure(&view).message, "数据返回为空");

        let client = FakeClient::responding(r#"{"code":150}"#);
        let mut view = QueryView::new();
        view.set_query("水");
        view.submit(&client).await;
        assert_eq!(failure(&view).message, "查询失败");
    }

    #[tokio::test]
    async fn empty_list_is_a_failure() {
        let client = FakeClient::responding(r#"{"code":200,"msg":"success","result":{"list":[]}}"#);
        let mut view = QueryView::new();

        view.set_query("水");
        view.submit(&client).await;

        assert_eq!(failure(&view).kind, FailureKind::LogicalApi);
        assert_eq!(failure(&view).message, "查询失败");
    }

    #[tokio::test]
    async fn resubmit_replaces_previous_outcome() {
        let mut view = QueryView::new();

        view.set_query("水");
        view.submit(&FakeClient::failing_with_status(503)).await;
        assert!(matches!(view.state(), ViewState::Failed(_)));

        view.set_query("水");
        view.submit(&FakeClient::responding(success_body())).await;
        assert!(matches!(view.state(), ViewState::Found(_)));
    }

    #[test]
    fn submit_is_refused_while_loading() {
        let mut view = QueryView::new();
        view.set_query("水");

        assert!(matches!(view.begin_submit(), Submission::Started(_)));
        assert!(view.is_loading());
        assert_eq!(view.begin_submit(), Submission::Busy);
        assert!(view.is_loading());
    }

    #[test]
    fn invalid_submit_replaces_shown_result() {
        let mut view = QueryView::new();
        view.set_query("水");
        view.begin_submit();
        view.complete(Ok(serde_json::from_str(success_body()).unwrap()));
        assert!(matches!(view.state(), ViewState::Found(_)));

        view.set_query("");
        assert!(matches!(view.state(), ViewState::Found(_)));
        view.begin_submit();
        assert_eq!(failure(&view).kind, FailureKind::EmptyInput);
    }

    #[test]
    fn editing_clears_a_stale_error() {
        let mut view = QueryView::new();
        view.set_query("ab");
        view.begin_submit();
        assert!(matches!(view.state(), ViewState::Failed(_)));

        view.set_query("水");
        assert_eq!(view.state(), &ViewState::Idle);
    }

    #[test]
    fn outcome_without_pending_lookup_is_ignored() {
        let mut view = QueryView::new();
        view.complete(Err(LookupError::Status(500)));
        assert_eq!(view.state(), &ViewState::Idle);
    }
}
