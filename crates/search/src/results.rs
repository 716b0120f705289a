//! Response normalization.
//!
//! The service streams results page by page; each page carries hits under
//! `value` with `@search.*` annotations, plus optional answers and a total
//! count on the first page. Pages are concatenated in arrival order — the
//! service assigns relevance order and this crate never re-sorts.
//!
//! Zero matches is a valid empty result set, not an error. Request
//! failures never reach this module; they surface as typed errors from the
//! provider.

use searchlight_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of the wire response.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "@odata.count")]
    pub count: Option<u64>,

    #[serde(rename = "@search.answers", default)]
    pub answers: Option<Vec<RawAnswer>>,

    #[serde(default)]
    pub value: Vec<Map<String, Value>>,

    /// Continuation body; re-POST it to fetch the next page.
    #[serde(rename = "@search.nextPageParameters")]
    pub next_page_parameters: Option<Value>,
}

/// Extractive answer as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct RawAnswer {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub highlights: Option<String>,
    #[serde(default)]
    pub score: f64,
}

/// Extractive caption as it appears on the wire.
#[derive(Debug, Deserialize)]
struct RawCaption {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    highlights: Option<String>,
}

/// A normalized result record.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Relevance score assigned by the service.
    pub score: f64,

    /// Semantic reranker score, present only on semantic queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranker_score: Option<f64>,

    /// Selected caption text: highlighted snippet when present and
    /// non-empty, plain snippet otherwise. Never both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// The document projection (whatever fields the query selected).
    pub fields: Map<String, Value>,
}

impl SearchHit {
    /// Build a hit from one raw `value` entry, peeling off the
    /// `@search.*` annotations.
    fn from_raw(mut raw: Map<String, Value>) -> AppResult<Self> {
        let score = raw
            .remove("@search.score")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| AppError::Search("Result record missing @search.score".to_string()))?;

        let reranker_score = raw
            .remove("@search.rerankerScore")
            .and_then(|v| v.as_f64());

        let caption = match raw.remove("@search.captions") {
            Some(value) => {
                let captions: Vec<RawCaption> = serde_json::from_value(value)?;
                select_caption(&captions)
            }
            None => None,
        };

        // Drop any remaining annotations so `fields` is a clean projection
        raw.retain(|key, _| !key.starts_with("@search."));

        Ok(Self {
            score,
            reranker_score,
            caption,
            fields: raw,
        })
    }

    /// Convenience accessor for a string-valued field.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

/// A normalized extractive answer.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<RawAnswer> for Answer {
    fn from(raw: RawAnswer) -> Self {
        // Same preference rule as captions: highlighted text wins when
        // present and non-empty.
        let text = match raw.highlights {
            Some(h) if !h.is_empty() => h,
            _ => raw.text,
        };
        Self {
            text,
            score: raw.score,
            key: raw.key,
        }
    }
}

/// Prefer the highlighted snippet of the first caption when present and
/// non-empty; fall back to the plain snippet.
fn select_caption(captions: &[RawCaption]) -> Option<String> {
    let caption = captions.first()?;
    if let Some(highlights) = &caption.highlights {
        if !highlights.is_empty() {
            return Some(highlights.clone());
        }
    }
    caption.text.as_ref().filter(|t| !t.is_empty()).cloned()
}

/// Fully normalized search results.
///
/// Hits preserve service arrival order. Answers are independent of the
/// hit list; an empty answers list is valid. `total_count` is the
/// service's count indicator from the first page.
#[derive(Debug, Default, Serialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub answers: Vec<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl SearchResults {
    /// Fold one wire page into the accumulated results.
    ///
    /// Count and answers only ever appear on the first page; hits are
    /// appended in arrival order.
    pub fn absorb_page(&mut self, page: SearchPage) -> AppResult<()> {
        if self.total_count.is_none() {
            self.total_count = page.count;
        }

        if let Some(answers) = page.answers {
            self.answers.extend(answers.into_iter().map(Answer::from));
        }

        for raw in page.value {
            self.hits.push(SearchHit::from_raw(raw)?);
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_prefers_nonempty_highlights() {
        let captions = vec![RawCaption {
            text: Some("plain text".to_string()),
            highlights: Some("<em>highlighted</em> text".to_string()),
        }];
        assert_eq!(
            select_caption(&captions).as_deref(),
            Some("<em>highlighted</em> text")
        );
    }

    #[test]
    fn test_caption_falls_back_on_empty_highlights() {
        let captions = vec![RawCaption {
            text: Some("plain text".to_string()),
            highlights: Some(String::new()),
        }];
        assert_eq!(select_caption(&captions).as_deref(), Some("plain text"));
    }

    #[test]
    fn test_caption_none_when_both_empty() {
        let captions = vec![RawCaption {
            text: Some(String::new()),
            highlights: None,
        }];
        assert_eq!(select_caption(&captions), None);
    }

    #[test]
    fn test_hit_missing_score_is_an_error() {
        let raw: Map<String, Value> =
            serde_json::from_str(r#"{"title": "No score here"}"#).unwrap();
        assert!(SearchHit::from_raw(raw).is_err());
    }

    #[test]
    fn test_hit_strips_annotations() {
        let raw: Map<String, Value> = serde_json::from_str(
            r#"{
                "@search.score": 0.92,
                "@search.rerankerScore": 2.5,
                "@search.highlights": {"content": ["x"]},
                "title": "Azure Data Factory",
                "category": "Integration"
            }"#,
        )
        .unwrap();

        let hit = SearchHit::from_raw(raw).unwrap();
        assert_eq!(hit.score, 0.92);
        assert_eq!(hit.reranker_score, Some(2.5));
        assert_eq!(hit.field_str("title"), Some("Azure Data Factory"));
        assert!(hit.fields.keys().all(|k| !k.starts_with("@search.")));
    }

    #[test]
    fn test_answer_prefers_highlights() {
        let raw = RawAnswer {
            key: Some("1".to_string()),
            text: "plain answer".to_string(),
            highlights: Some("<em>rich</em> answer".to_string()),
            score: 0.88,
        };
        let answer = Answer::from(raw);
        assert_eq!(answer.text, "<em>rich</em> answer");
        assert_eq!(answer.score, 0.88);
    }
}
