//! Search request construction.
//!
//! One builder covers all four query modes:
//! - pure vector: a `vectorQueries` entry and no query text,
//! - filtered vector: adds a `filter` expression evaluated server-side,
//! - hybrid: adds free text in `search` alongside the vector,
//! - semantic hybrid: adds `queryType: semantic` with extractive captions
//!   and answers.
//!
//! Every request carries `count: true` so the total-count indicator is
//! always present in the response.

use serde::Serialize;

/// A nearest-neighbor sub-query against one or more vector fields.
#[derive(Debug, Clone, Serialize)]
pub struct VectorQuery {
    kind: String,
    pub vector: Vec<f32>,
    pub k: usize,
    pub fields: String,
}

impl VectorQuery {
    /// Create a k-NN query over the given vector field(s).
    ///
    /// `fields` is a comma-separated list of vector field names.
    pub fn new(vector: Vec<f32>, k: usize, fields: impl Into<String>) -> Self {
        Self {
            kind: "vector".to_string(),
            vector,
            k,
            fields: fields.into(),
        }
    }
}

/// A search request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Free-text query; absent for pure vector search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vector_queries: Vec<VectorQuery>,

    /// Boolean filter expression evaluated by the service over
    /// filterable fields; passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Comma-separated result-field projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,

    /// Ask the service for the total match count.
    pub count: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_configuration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub captions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_language: Option<String>,
}

impl SearchQuery {
    /// Pure vector search: no query text, one k-NN sub-query.
    pub fn vector(vector: Vec<f32>, k: usize, fields: impl Into<String>) -> Self {
        Self {
            search: None,
            vector_queries: vec![VectorQuery::new(vector, k, fields)],
            filter: None,
            select: None,
            top: None,
            count: true,
            query_type: None,
            semantic_configuration: None,
            captions: None,
            answers: None,
            query_language: None,
        }
    }

    /// Add free text, turning a vector query into a hybrid query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Add a server-evaluated filter expression
    /// (e.g., `category eq 'Databases'`).
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Project only the named fields into the results.
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Cap the number of returned documents.
    pub fn with_top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }

    /// Enable semantic reranking with extractive captions and answers.
    ///
    /// `answer_count` bounds how many extractive answers the service may
    /// return; the answers list is independent of the per-document hits.
    pub fn semantic(
        mut self,
        configuration: impl Into<String>,
        language: impl Into<String>,
        answer_count: usize,
    ) -> Self {
        self.query_type = Some("semantic".to_string());
        self.semantic_configuration = Some(configuration.into());
        self.captions = Some("extractive".to_string());
        self.answers = Some(format!("extractive|count-{}", answer_count));
        self.query_language = Some(language.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exactly representable in binary so f32 -> JSON -> f64 stays equal
    fn vec4() -> Vec<f32> {
        vec![0.5, 0.25, -0.125, 1.0]
    }

    #[test]
    fn test_pure_vector_query() {
        let query = SearchQuery::vector(vec4(), 5, "contentVector")
            .with_select("title,content,category");

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "count": true,
                "vectorQueries": [{
                    "kind": "vector",
                    "vector": [0.5, 0.25, -0.125, 1.0],
                    "k": 5,
                    "fields": "contentVector",
                }],
                "select": "title,content,category",
            })
        );
        // No query text in pure vector mode
        assert!(json.get("search").is_none());
    }

    #[test]
    fn test_filtered_vector_query() {
        let query = SearchQuery::vector(vec4(), 3, "contentVector")
            .with_filter("category eq 'Databases'");

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["filter"], "category eq 'Databases'");
        assert_eq!(json["vectorQueries"][0]["k"], 3);
        assert!(json.get("search").is_none());
    }

    #[test]
    fn test_hybrid_query() {
        let query = SearchQuery::vector(vec4(), 5, "contentVector")
            .with_text("scalable storage solution")
            .with_top(5);

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["search"], "scalable storage solution");
        assert_eq!(json["top"], 5);
        assert_eq!(json["vectorQueries"][0]["kind"], "vector");
        // Not semantic unless asked
        assert!(json.get("queryType").is_none());
    }

    #[test]
    fn test_semantic_hybrid_query() {
        let query = SearchQuery::vector(vec4(), 5, "contentVector")
            .with_text("what is azure search")
            .semantic("semantic-default", "en-us", 3);

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["queryType"], "semantic");
        assert_eq!(json["semanticConfiguration"], "semantic-default");
        assert_eq!(json["captions"], "extractive");
        assert_eq!(json["answers"], "extractive|count-3");
        assert_eq!(json["queryLanguage"], "en-us");
        assert_eq!(json["search"], "what is azure search");
    }

    #[test]
    fn test_count_always_requested() {
        let query = SearchQuery::vector(vec4(), 5, "contentVector");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["count"], true);
    }
}
