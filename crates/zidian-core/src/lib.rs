pub mod query;
pub mod render;
pub mod sanitize;
pub mod state;
pub mod types;
pub mod view;

pub use query::{Query, QueryError};
pub use render::{Body, EntryView, Fact, InputView, Section, View};
pub use view::{Failure, FailureKind, QueryView, Submission, ViewState};

#[cfg(test)]
pub(crate) mod testing;
