use crate::domain::{RecommendationDraft, RecordId};
use crate::query::SearchQuery;

pub const COLLECTION: &str = "recommendations";
const INTERESTED: &str = "interested";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A request against the recommendation resource, independent of any transport.
///
/// `segments` are unencoded path segments relative to the service root and
/// `query` is an already-encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub query: Option<String>,
    pub body: Option<RecommendationDraft>,
}

impl ApiRequest {
    pub fn create(draft: RecommendationDraft) -> Self {
        Self {
            method: HttpMethod::Post,
            segments: vec![COLLECTION.to_string()],
            query: None,
            body: Some(draft),
        }
    }

    pub fn update(id: &RecordId, draft: RecommendationDraft) -> Self {
        Self {
            method: HttpMethod::Put,
            segments: item_segments(id),
            query: None,
            body: Some(draft),
        }
    }

    pub fn retrieve(id: &RecordId) -> Self {
        Self {
            method: HttpMethod::Get,
            segments: item_segments(id),
            query: None,
            body: None,
        }
    }

    pub fn delete(id: &RecordId) -> Self {
        Self {
            method: HttpMethod::Delete,
            segments: item_segments(id),
            query: None,
            body: None,
        }
    }

    /// Increment has its own sub-resource so it never collides with update.
    pub fn increment_interest(id: &RecordId) -> Self {
        let mut segments = item_segments(id);
        segments.push(INTERESTED.to_string());
        Self {
            method: HttpMethod::Put,
            segments,
            query: None,
            body: None,
        }
    }

    pub fn search(query: &SearchQuery) -> Self {
        let encoded = query.to_query_string();
        Self {
            method: HttpMethod::Get,
            segments: vec![COLLECTION.to_string()],
            query: (!encoded.is_empty()).then_some(encoded),
            body: None,
        }
    }

    /// Display form used in logs, e.g. `/recommendations/5?type=1`.
    pub fn target(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(segment);
        }
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        out
    }
}

fn item_segments(id: &RecordId) -> Vec<String> {
    vec![COLLECTION.to_string(), id.to_string()]
}
