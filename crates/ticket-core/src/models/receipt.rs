//! Receipt data models shared by the parser, the corpus and the classifier.

use serde::{Deserialize, Deserializer, Serialize};

/// A `{key, value}` record as stored in the category dictionary and the
/// correction store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// Category label.
    pub key: String,

    /// Exemplar product names for the label.
    pub value: Vec<String>,
}

impl CorpusRecord {
    pub fn new(key: impl Into<String>, value: Vec<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A user-supplied relabeling of a candidate item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Correct category label.
    pub label: String,

    /// Candidate item text that was misclassified.
    pub name: String,
}

impl Correction {
    pub fn new(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
        }
    }
}

impl From<&Correction> for CorpusRecord {
    fn from(correction: &Correction) -> Self {
        CorpusRecord::new(correction.label.clone(), vec![correction.name.clone()])
    }
}

/// A classified candidate item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Position of the item in the candidate sequence, starting at 0.
    pub id: usize,

    /// Candidate item text.
    pub name: String,

    /// Predicted category.
    pub label: String,
}

/// Total and categorized items of one receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptAnalysis {
    /// Classified items in receipt order.
    pub items: Vec<ClassificationResult>,

    /// Total amount paid; NaN (serialized as `null`) when no total was found.
    #[serde(deserialize_with = "nan_from_null")]
    pub value: f64,
}

impl ReceiptAnalysis {
    /// Whether a numeric total was recognized.
    pub fn has_total(&self) -> bool {
        !self.value.is_nan()
    }
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_correction_to_record() {
        let correction = Correction::new("Almacén", "Galletas Caricias an");
        let record = CorpusRecord::from(&correction);
        assert_eq!(
            record,
            CorpusRecord::new("Almacén", vec!["Galletas Caricias an".to_string()])
        );
    }

    #[test]
    fn test_missing_total_serializes_as_null() {
        let analysis = ReceiptAnalysis {
            items: vec![],
            value: f64::NAN,
        };
        let json = serde_json::to_string(&analysis).unwrap();
        assert_eq!(json, r#"{"items":[],"value":null}"#);

        let back: ReceiptAnalysis = serde_json::from_str(&json).unwrap();
        assert!(!back.has_total());
    }

    #[test]
    fn test_classification_result_field_names() {
        let result = ClassificationResult {
            id: 0,
            name: "ZANAHORIA SUELTA".to_string(),
            label: "Verduras".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 0, "name": "ZANAHORIA SUELTA", "label": "Verduras"})
        );
    }
}
