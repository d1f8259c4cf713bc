use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One remote commit, flattened from the hosting API's envelope. Immutable
/// once parsed; ordering in the report comes from `author_date` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub author_date: DateTime<Utc>,
    pub web_url: String,
}

/// Wire shape of one element of the commit-listing response:
/// `{ commit: { message, author: { name, email, date } }, html_url }`.
/// Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CommitEnvelope {
    pub commit: CommitPayload,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitPayload {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

impl From<CommitEnvelope> for CommitRecord {
    fn from(envelope: CommitEnvelope) -> Self {
        CommitRecord {
            message: envelope.commit.message,
            author_name: envelope.commit.author.name,
            author_email: envelope.commit.author.email,
            author_date: envelope.commit.author.date,
            web_url: envelope.html_url,
        }
    }
}
