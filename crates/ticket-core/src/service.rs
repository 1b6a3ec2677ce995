//! Receipt service tying the line heuristics to an initialized categorizer.

use tracing::info;

use crate::classifier::Categorizer;
use crate::corpus::CorpusStore;
use crate::error::Result;
use crate::models::config::TicketConfig;
use crate::models::receipt::{ClassificationResult, Correction, ReceiptAnalysis};
use crate::receipt::{extract_total, CandidateExtractor};

/// Entry point for interpreting receipts and feeding back corrections.
pub struct ReceiptService {
    categorizer: Categorizer,
    extractor: CandidateExtractor,
}

impl ReceiptService {
    /// Build a service over an initialized categorizer.
    pub fn new(categorizer: Categorizer, extractor: CandidateExtractor) -> Self {
        Self {
            categorizer,
            extractor,
        }
    }

    /// Initialize the categorizer from the configured data files.
    pub async fn open(config: &TicketConfig) -> Result<Self> {
        let store = CorpusStore::from_config(config);
        let categorizer = Categorizer::initialize(store).await?;
        let extractor =
            CandidateExtractor::new().with_min_line_length(config.parser.min_line_length);
        Ok(Self::new(categorizer, extractor))
    }

    /// Total amount paid, NaN when none is recognized.
    pub fn total(&self, text: &str) -> f64 {
        extract_total(text)
    }

    /// Candidate product names in receipt order.
    pub fn candidates(&self, text: &str) -> Vec<String> {
        self.extractor.candidates(text).collect()
    }

    /// Distinct category labels of the merged corpus.
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.categorizer.store().categories().await
    }

    /// Classify every candidate item of a receipt.
    pub async fn classify(&self, text: &str) -> Vec<ClassificationResult> {
        self.categorizer
            .classify_batch(self.extractor.candidates(text))
            .await
    }

    /// Total and classified items of a receipt.
    pub async fn analyze(&self, text: &str) -> ReceiptAnalysis {
        let value = self.total(text);
        let items = self.classify(text).await;
        info!("Analyzed receipt: {} items, total {}", items.len(), value);
        ReceiptAnalysis { items, value }
    }

    /// Rebuild the model from the dictionary and all stored corrections.
    pub async fn force_retrain(&self) -> Result<()> {
        self.categorizer.force_retrain().await
    }

    /// Record corrections for the next training pass.
    pub async fn add_corrections(&self, corrections: &[Correction]) -> Result<usize> {
        self.categorizer.store().add_corrections(corrections).await
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DICTIONARY: &str = r#"[
        {"key": "Verduras", "value": ["Zanahoria suelta", "Papa elegida", "Choclo amarillo"]},
        {"key": "Carnes", "value": ["Paleta clasica", "Molida comun", "Trasero de novillo"]},
        {"key": "Almacén", "value": ["Galletas Caricias", "Mayonesa Hellmanns", "Lentejas secas"]}
    ]"#;

    const RECEIPT: &str = "1/4 TRASERO SOYCHU (10.50) 98.89\n\n202148000000 1.350 X 29.99\n\nPAPA ELEGIDA SUELT (10.50) 40.49\nSUBTOT. 139.34\n\nTOTAL. 139. 34\n\n";

    async fn service() -> (tempfile::TempDir, ReceiptService) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("categoryArray.json"), DICTIONARY).unwrap();
        let config = TicketConfig::default().with_data_dir(dir.path());
        let service = ReceiptService::open(&config).await.unwrap();
        (dir, service)
    }

    #[tokio::test]
    async fn test_analyze_receipt() {
        let (_dir, service) = service().await;
        let analysis = service.analyze(RECEIPT).await;

        assert_eq!(analysis.value, 139.34);
        assert_eq!(
            analysis.items,
            vec![ClassificationResult {
                id: 0,
                name: "PAPA ELEGIDA SUELT".to_string(),
                label: "Verduras".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_categories_include_new_correction_labels() {
        let (_dir, service) = service().await;
        assert_eq!(
            service.categories().await.unwrap(),
            vec!["Verduras", "Carnes", "Almacén"]
        );

        service
            .add_corrections(&[Correction::new("Limpieza", "Papel Floripel un")])
            .await
            .unwrap();
        assert_eq!(
            service.categories().await.unwrap(),
            vec!["Verduras", "Carnes", "Almacén", "Limpieza"]
        );

        service.force_retrain().await.unwrap();
        let items = service.classify("Papel Floripel 4un\n").await;
        assert_eq!(items[0].label, "Limpieza");
    }

    #[tokio::test]
    async fn test_empty_receipt() {
        let (_dir, service) = service().await;
        let analysis = service.analyze("\n\u{000C}\n").await;
        assert!(analysis.items.is_empty());
        assert!(!analysis.has_total());
    }
}
