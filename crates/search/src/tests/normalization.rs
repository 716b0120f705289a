//! Tests for response normalization: arrival-order preservation, caption
//! selection, answers independence, pagination, and the zero-match case.

use crate::results::{SearchPage, SearchResults};

fn parse_page(body: &str) -> SearchPage {
    serde_json::from_str(body).expect("fixture should parse")
}

/// A realistic first page of a semantic hybrid query.
const SEMANTIC_PAGE: &str = r#"{
    "@odata.count": 7,
    "@search.answers": [
        {
            "key": "4",
            "text": "Azure Data Factory is a cloud-based data integration service.",
            "highlights": "<em>Azure Data Factory</em> is a cloud-based data integration service.",
            "score": 0.97
        }
    ],
    "value": [
        {
            "@search.score": 0.031,
            "@search.rerankerScore": 2.91,
            "@search.captions": [
                {
                    "text": "A data integration service for ETL workloads.",
                    "highlights": "A <em>data integration</em> service for ETL workloads."
                }
            ],
            "id": "4",
            "title": "Azure Data Factory",
            "category": "Integration"
        },
        {
            "@search.score": 0.028,
            "@search.rerankerScore": 2.47,
            "@search.captions": [
                {
                    "text": "A serverless event-driven compute service.",
                    "highlights": ""
                }
            ],
            "id": "9",
            "title": "Azure Functions",
            "category": "Compute"
        },
        {
            "@search.score": 0.022,
            "@search.rerankerScore": 1.88,
            "id": "2",
            "title": "Azure Synapse Analytics",
            "category": "Analytics"
        }
    ]
}"#;

#[test]
fn test_hits_preserve_arrival_order() {
    let mut results = SearchResults::default();
    results.absorb_page(parse_page(SEMANTIC_PAGE)).unwrap();

    let ids: Vec<&str> = results
        .hits
        .iter()
        .map(|h| h.field_str("id").unwrap())
        .collect();
    assert_eq!(ids, vec!["4", "9", "2"]);

    // The service already ranks descending; normalization must not
    // reorder anything.
    for pair in results.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_caption_selection_per_hit() {
    let mut results = SearchResults::default();
    results.absorb_page(parse_page(SEMANTIC_PAGE)).unwrap();

    // Non-empty highlights preferred
    assert_eq!(
        results.hits[0].caption.as_deref(),
        Some("A <em>data integration</em> service for ETL workloads.")
    );
    // Empty highlights fall back to plain text
    assert_eq!(
        results.hits[1].caption.as_deref(),
        Some("A serverless event-driven compute service.")
    );
    // No captions at all
    assert_eq!(results.hits[2].caption, None);
}

#[test]
fn test_answers_are_independent_of_hits() {
    let mut results = SearchResults::default();
    results.absorb_page(parse_page(SEMANTIC_PAGE)).unwrap();

    assert_eq!(results.answers.len(), 1);
    assert_eq!(results.answers[0].key.as_deref(), Some("4"));
    assert!(results.answers[0].text.contains("<em>Azure Data Factory</em>"));

    // Removing all hits does not touch the answers list
    results.hits.clear();
    assert_eq!(results.answers.len(), 1);
}

#[test]
fn test_total_count_taken_from_first_page() {
    let mut results = SearchResults::default();
    results.absorb_page(parse_page(SEMANTIC_PAGE)).unwrap();
    assert_eq!(results.total_count, Some(7));
}

#[test]
fn test_zero_matches_is_a_valid_empty_result() {
    let mut results = SearchResults::default();
    results
        .absorb_page(parse_page(r#"{"@odata.count": 0, "value": []}"#))
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(results.total_count, Some(0));
    assert!(results.answers.is_empty());
}

#[test]
fn test_pagination_concatenates_in_arrival_order() {
    let first = parse_page(
        r#"{
            "@odata.count": 4,
            "value": [
                {"@search.score": 0.9, "id": "1"},
                {"@search.score": 0.8, "id": "2"}
            ],
            "@search.nextPageParameters": {"search": "*", "skip": 2}
        }"#,
    );
    let second = parse_page(
        r#"{
            "value": [
                {"@search.score": 0.7, "id": "3"},
                {"@search.score": 0.6, "id": "4"}
            ]
        }"#,
    );

    assert!(first.next_page_parameters.is_some());
    assert!(second.next_page_parameters.is_none());

    let mut results = SearchResults::default();
    results.absorb_page(first).unwrap();
    results.absorb_page(second).unwrap();

    let ids: Vec<&str> = results
        .hits
        .iter()
        .map(|h| h.field_str("id").unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(results.total_count, Some(4));
    assert_eq!(results.len(), 4);
}

#[test]
fn test_filtered_page_projection_survives() {
    let page = parse_page(
        r#"{
            "@odata.count": 2,
            "value": [
                {"@search.score": 0.5, "title": "Cosmos DB", "category": "Databases"},
                {"@search.score": 0.4, "title": "Azure SQL", "category": "Databases"}
            ]
        }"#,
    );

    let mut results = SearchResults::default();
    results.absorb_page(page).unwrap();

    // Every returned document satisfies the filter the service applied
    assert!(results
        .hits
        .iter()
        .all(|h| h.field_str("category") == Some("Databases")));
}
