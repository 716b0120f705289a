//! Document ingestion.
//!
//! Converts loosely-typed key/value documents into service-ready documents
//! by attaching a freshly computed content vector to each, validates every
//! vector against the schema-declared dimensions, then uploads the whole
//! set in one batch call. A batch with any failed item fails the ingest
//! whole; there is no splitting or retry.

use crate::provider::SearchProvider;
use crate::schema::IndexSchema;
use searchlight_core::{AppError, AppResult};
use searchlight_embeddings::EmbeddingClient;
use serde_json::{Map, Value};

/// Ingestion settings.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Document field whose text is embedded.
    pub text_field: String,

    /// Vector field the computed embedding is written to.
    pub vector_field: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            text_field: "content".to_string(),
            vector_field: "contentVector".to_string(),
        }
    }
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub embedded: usize,
    pub uploaded: usize,
}

/// Embed, validate, and upload a set of raw documents.
///
/// # Errors
/// - a raw document is not a JSON object or lacks the text field,
/// - any vector's length disagrees with the schema-declared dimensions
///   (checked before the upload; vectors are never truncated or padded),
/// - the embedding request or the upload fails,
/// - the batch response reports any failed item.
pub async fn ingest_documents(
    provider: &dyn SearchProvider,
    embeddings: &dyn EmbeddingClient,
    schema: &IndexSchema,
    raw_documents: Vec<Value>,
    options: &IngestOptions,
) -> AppResult<IngestSummary> {
    let mut documents = Vec::with_capacity(raw_documents.len());
    let mut texts = Vec::with_capacity(raw_documents.len());

    for (position, raw) in raw_documents.into_iter().enumerate() {
        let doc = match raw {
            Value::Object(map) => map,
            other => {
                return Err(AppError::Search(format!(
                    "Document {} is not an object: {}",
                    position, other
                )))
            }
        };

        let text = doc
            .get(&options.text_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::Search(format!(
                    "Document {} has no text in field '{}'",
                    position, options.text_field
                ))
            })?;

        texts.push(text.to_string());
        documents.push(doc);
    }

    tracing::info!(
        "Embedding {} documents with model '{}'",
        texts.len(),
        embeddings.model_name()
    );

    let vectors = embeddings.embed_batch(&texts).await?;

    for (doc, vector) in documents.iter_mut().zip(vectors) {
        doc.insert(
            options.vector_field.clone(),
            Value::Array(vector.into_iter().map(|v| v.into()).collect()),
        );
    }

    for (position, doc) in documents.iter().enumerate() {
        validate_vector_dimensions(schema, doc)
            .map_err(|e| AppError::Search(format!("Document {}: {}", position, e)))?;
    }

    let embedded = documents.len();
    let summary = provider.upload_documents(&schema.name, documents).await?;

    if summary.failed() > 0 {
        return Err(AppError::Search(format!(
            "Batch upload failed for {} of {} documents: {}",
            summary.failed(),
            summary.results.len(),
            summary.failure_messages().join("; ")
        )));
    }

    Ok(IngestSummary {
        embedded,
        uploaded: summary.succeeded(),
    })
}

/// Check every vector field present on the document against the
/// schema-declared dimensions.
pub fn validate_vector_dimensions(
    schema: &IndexSchema,
    document: &Map<String, Value>,
) -> AppResult<()> {
    for (field, expected) in schema.vector_fields() {
        let Some(value) = document.get(field) else {
            continue;
        };

        let actual = value
            .as_array()
            .ok_or_else(|| {
                AppError::Search(format!("field '{}' is not a vector array", field))
            })?
            .len();

        if actual != expected {
            return Err(AppError::Search(format!(
                "field '{}' has {} dimensions, index declares {}",
                field, actual, expected
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, SchemaField};

    fn schema(dimensions: usize) -> IndexSchema {
        IndexSchema::new("catalog-index")
            .with_field(SchemaField::new("id", FieldType::String).key())
            .with_field(SchemaField::new("content", FieldType::String).searchable())
            .with_field(
                SchemaField::new("contentVector", FieldType::SingleCollection)
                    .vector(dimensions, "vector-profile"),
            )
    }

    fn doc(vector_len: usize) -> Map<String, Value> {
        let vector: Vec<f32> = vec![0.5; vector_len];
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "content": "some content",
            "contentVector": vector,
        }))
        .unwrap()
    }

    #[test]
    fn test_matching_dimensions_pass() {
        assert!(validate_vector_dimensions(&schema(8), &doc(8)).is_ok());
    }

    #[test]
    fn test_mismatched_dimensions_fail() {
        let err = validate_vector_dimensions(&schema(8), &doc(4)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("contentVector"));
        assert!(message.contains("4"));
        assert!(message.contains("8"));
    }

    #[test]
    fn test_absent_vector_field_is_not_checked() {
        let mut document = doc(8);
        document.remove("contentVector");
        assert!(validate_vector_dimensions(&schema(8), &document).is_ok());
    }

    #[test]
    fn test_non_array_vector_fails() {
        let mut document = doc(8);
        document.insert(
            "contentVector".to_string(),
            Value::String("not a vector".to_string()),
        );
        assert!(validate_vector_dimensions(&schema(8), &document).is_err());
    }
}
