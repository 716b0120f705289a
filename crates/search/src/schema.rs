//! Index definition model.
//!
//! Mirrors the service's index JSON: a field list with per-field
//! capabilities, a vector-search configuration (algorithm + profile), and a
//! semantic configuration binding title/content/keyword fields. The schema
//! is applied with create-or-update semantics and is immutable during the
//! query phase.

use serde::{Deserialize, Serialize};

/// Service field types (EDM names on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "Edm.String")]
    String,
    #[serde(rename = "Collection(Edm.String)")]
    StringCollection,
    #[serde(rename = "Edm.Int64")]
    Int64,
    #[serde(rename = "Edm.Double")]
    Double,
    #[serde(rename = "Edm.Boolean")]
    Boolean,
    /// Float collection used for vector fields.
    #[serde(rename = "Collection(Edm.Single)")]
    SingleCollection,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single index field and its capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "is_false")]
    pub key: bool,

    #[serde(default)]
    pub searchable: bool,

    #[serde(default)]
    pub filterable: bool,

    #[serde(default)]
    pub sortable: bool,

    #[serde(default)]
    pub facetable: bool,

    /// Vector dimensions; present only on vector fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,

    /// Vector-search profile name; present only on vector fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_search_profile: Option<String>,
}

impl SchemaField {
    /// Create a field with no capabilities enabled.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            key: false,
            searchable: false,
            filterable: false,
            sortable: false,
            facetable: false,
            dimensions: None,
            vector_search_profile: None,
        }
    }

    /// Mark this field as the document key.
    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn facetable(mut self) -> Self {
        self.facetable = true;
        self
    }

    /// Turn this field into a vector field.
    ///
    /// The service requires vector fields to be searchable and bound to a
    /// vector-search profile.
    pub fn vector(mut self, dimensions: usize, profile: impl Into<String>) -> Self {
        self.searchable = true;
        self.dimensions = Some(dimensions);
        self.vector_search_profile = Some(profile.into());
        self
    }
}

/// Vector-search algorithm declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchAlgorithm {
    pub name: String,
    pub kind: String,
}

/// Profile binding fields to an algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchProfile {
    pub name: String,
    pub algorithm: String,
}

/// Vector-search configuration section of the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearch {
    pub algorithms: Vec<VectorSearchAlgorithm>,
    pub profiles: Vec<VectorSearchProfile>,
}

impl VectorSearch {
    /// Single-HNSW configuration with one profile, the common case.
    pub fn hnsw(algorithm_name: impl Into<String>, profile_name: impl Into<String>) -> Self {
        let algorithm_name = algorithm_name.into();
        Self {
            algorithms: vec![VectorSearchAlgorithm {
                name: algorithm_name.clone(),
                kind: "hnsw".to_string(),
            }],
            profiles: vec![VectorSearchProfile {
                name: profile_name.into(),
                algorithm: algorithm_name,
            }],
        }
    }
}

/// Reference to a field in a semantic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticField {
    pub field_name: String,
}

/// Field bindings the semantic reranker prioritizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_field: Option<SemanticField>,
    pub prioritized_content_fields: Vec<SemanticField>,
    pub prioritized_keywords_fields: Vec<SemanticField>,
}

/// A named semantic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticConfiguration {
    pub name: String,
    pub prioritized_fields: PrioritizedFields,
}

/// Semantic section of the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticSearch {
    pub configurations: Vec<SemanticConfiguration>,
}

impl SemanticSearch {
    /// Single configuration with title/content/keyword bindings.
    pub fn single(
        name: impl Into<String>,
        title_field: impl Into<String>,
        content_fields: &[&str],
        keyword_fields: &[&str],
    ) -> Self {
        Self {
            configurations: vec![SemanticConfiguration {
                name: name.into(),
                prioritized_fields: PrioritizedFields {
                    title_field: Some(SemanticField {
                        field_name: title_field.into(),
                    }),
                    prioritized_content_fields: content_fields
                        .iter()
                        .map(|f| SemanticField {
                            field_name: (*f).to_string(),
                        })
                        .collect(),
                    prioritized_keywords_fields: keyword_fields
                        .iter()
                        .map(|f| SemanticField {
                            field_name: (*f).to_string(),
                        })
                        .collect(),
                },
            }],
        }
    }
}

/// Full index definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSchema {
    pub name: String,
    pub fields: Vec<SchemaField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_search: Option<VectorSearch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticSearch>,
}

impl IndexSchema {
    /// Create an empty schema with the given index name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            vector_search: None,
            semantic: None,
        }
    }

    pub fn with_field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_vector_search(mut self, vector_search: VectorSearch) -> Self {
        self.vector_search = Some(vector_search);
        self
    }

    pub fn with_semantic(mut self, semantic: SemanticSearch) -> Self {
        self.semantic = Some(semantic);
        self
    }

    /// Declared dimensions of a vector field, if the field exists and is
    /// a vector field.
    pub fn vector_dimensions(&self, field_name: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|f| f.name == field_name)
            .and_then(|f| f.dimensions)
    }

    /// All vector fields with their declared dimensions.
    pub fn vector_fields(&self) -> impl Iterator<Item = (&str, usize)> {
        self.fields
            .iter()
            .filter_map(|f| f.dimensions.map(|d| (f.name.as_str(), d)))
    }
}
