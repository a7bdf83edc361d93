use serde::Serialize;
use zidian_lookup::LookupRecord;

use crate::sanitize::sanitize_html;
use crate::view::{QueryView, ViewState};

pub const PLACEHOLDER: &str = "请输入一个汉字...";
pub const WELCOME: &str = "在上方输入框中输入汉字开始查询";
pub const DEFINITION_TITLE: &str = "基本释义";
pub const EXPLANATION_TITLE: &str = "详细解释";

/// Render-ready snapshot of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub input: InputView,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub text: String,
    pub placeholder: String,
    /// Spinner in place of the search icon
    pub busy: bool,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Welcome { message: String },
    Loading,
    Error { message: String },
    Entry(EntryView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub glyph: String,
    pub reading: String,
    /// Radical, strokes, wubi code and stroke order, always in that order
    pub facts: Vec<Fact>,
    /// Sanitized rich-text blocks, only those with content
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub html: String,
}

pub fn render(view: &QueryView) -> View {
    let loading = view.is_loading();

    let body = match view.state() {
        ViewState::Loading => Body::Loading,
        ViewState::Found(record) => Body::Entry(entry_view(record)),
        ViewState::Failed(failure) => Body::Error {
            message: failure.message.clone(),
        },
        ViewState::Idle => Body::Welcome {
            message: WELCOME.to_string(),
        },
    };

    View {
        input: InputView {
            text: view.query().to_string(),
            placeholder: PLACEHOLDER.to_string(),
            busy: loading,
            submit_enabled: !loading,
        },
        body,
    }
}

fn entry_view(record: &LookupRecord) -> EntryView {
    let facts = [
        ("部首", &record.bushou),
        ("笔画", &record.bihua),
        ("五笔", &record.wubi),
        ("笔顺", &record.bishun),
    ]
    .into_iter()
    .map(|(label, value)| Fact {
        label: label.to_string(),
        value: value.clone(),
    })
    .collect();

    let sections = [
        (DEFINITION_TITLE, &record.content),
        (EXPLANATION_TITLE, &record.explain),
    ]
    .into_iter()
    .filter(|(_, html)| !html.is_empty())
    .map(|(title, html)| Section {
        title: title.to_string(),
        html: sanitize_html(html),
    })
    .collect();

    EntryView {
        glyph: record.hanzi.clone(),
        reading: record.reading().to_string(),
        facts,
        sections,
    }
}
