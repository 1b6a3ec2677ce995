//! Merging the category dictionary with accumulated corrections.

use std::collections::HashMap;

use tracing::debug;

use crate::models::receipt::CorpusRecord;

/// Labelled exemplars used to train the classifier.
///
/// Holds at most one exemplar list per label, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingCorpus {
    records: Vec<CorpusRecord>,
    index: HashMap<String, usize>,
}

impl TrainingCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge dictionary records with correction records.
    ///
    /// A record whose label is already present appends its exemplars to the
    /// existing list; otherwise it opens a new label at the end.
    pub fn merge(dictionary: Vec<CorpusRecord>, corrections: Vec<CorpusRecord>) -> Self {
        let mut corpus = Self::new();
        let dictionary_len = dictionary.len();
        let corrections_len = corrections.len();

        corpus.extend(dictionary);
        corpus.extend(corrections);

        debug!(
            "Merged {} dictionary and {} correction records into {} labels",
            dictionary_len,
            corrections_len,
            corpus.len()
        );
        corpus
    }

    /// Add one record, folding it into an existing label if present.
    pub fn push(&mut self, record: CorpusRecord) {
        match self.index.get(&record.key) {
            Some(&position) => self.records[position].value.extend(record.value),
            None => {
                self.index.insert(record.key.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Exemplars recorded for a label.
    pub fn exemplars(&self, label: &str) -> Option<&[String]> {
        self.index
            .get(label)
            .map(|&position| self.records[position].value.as_slice())
    }

    /// Distinct labels in corpus order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// Records in corpus order.
    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    /// Iterate over `(exemplar, label)` training pairs.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().flat_map(|record| {
            record
                .value
                .iter()
                .map(move |exemplar| (exemplar.as_str(), record.key.as_str()))
        })
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of exemplars over all labels.
    pub fn document_count(&self) -> usize {
        self.records.iter().map(|r| r.value.len()).sum()
    }
}

impl Extend<CorpusRecord> for TrainingCorpus {
    fn extend<I: IntoIterator<Item = CorpusRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<CorpusRecord> for TrainingCorpus {
    fn from_iter<I: IntoIterator<Item = CorpusRecord>>(iter: I) -> Self {
        let mut corpus = Self::new();
        corpus.extend(iter);
        corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(key: &str, values: &[&str]) -> CorpusRecord {
        CorpusRecord::new(key, values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_corrections_append_to_existing_label() {
        let dictionary = vec![
            record("Almacén", &["Arroz Gallo Oro", "Fideos Matarazzo"]),
            record("Verduras", &["Zanahoria"]),
        ];
        let corrections = vec![
            record("Almacén", &["Galletas Caricias an"]),
            record("Almacén", &["Pure tomate Marolio"]),
        ];

        let corpus = TrainingCorpus::merge(dictionary, corrections);

        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.exemplars("Almacén").unwrap(),
            &[
                "Arroz Gallo Oro",
                "Fideos Matarazzo",
                "Galletas Caricias an",
                "Pure tomate Marolio",
            ]
        );
        assert_eq!(corpus.labels().collect::<Vec<_>>(), vec!["Almacén", "Verduras"]);
    }

    #[test]
    fn test_new_label_from_corrections() {
        let corpus = TrainingCorpus::merge(
            vec![record("Verduras", &["Zanahoria"])],
            vec![
                record("Limpieza", &["Lavandina Ayudin"]),
                record("Limpieza", &["Papel Floripel un"]),
            ],
        );

        assert_eq!(corpus.labels().collect::<Vec<_>>(), vec!["Verduras", "Limpieza"]);
        assert_eq!(
            corpus.exemplars("Limpieza").unwrap(),
            &["Lavandina Ayudin", "Papel Floripel un"]
        );
        assert_eq!(corpus.document_count(), 3);
    }

    #[test]
    fn test_one_list_per_label_regardless_of_order() {
        let records = vec![
            record("Carnes", &["Molida comun"]),
            record("Lácteos", &["Leche"]),
            record("Carnes", &["Paleta"]),
            record("Lácteos", &["Yogur"]),
            record("Carnes", &["Trasero"]),
        ];

        let forward: TrainingCorpus = records.iter().cloned().collect();
        let reversed: TrainingCorpus = records.iter().rev().cloned().collect();

        for corpus in [&forward, &reversed] {
            assert_eq!(corpus.len(), 2);
            assert_eq!(corpus.exemplars("Carnes").unwrap().len(), 3);
            assert_eq!(corpus.exemplars("Lácteos").unwrap().len(), 2);
        }
    }

    #[test]
    fn test_duplicate_dictionary_labels_are_folded() {
        let corpus = TrainingCorpus::merge(
            vec![record("Bebidas", &["Coca Cola"]), record("Bebidas", &["Sprite"])],
            vec![],
        );
        assert_eq!(corpus.records(), &[record("Bebidas", &["Coca Cola", "Sprite"])]);
    }

    #[test]
    fn test_documents_pairs() {
        let corpus = TrainingCorpus::merge(
            vec![record("Verduras", &["Zanahoria", "Choclo"])],
            vec![record("Carnes", &["Paleta"])],
        );
        let documents: Vec<_> = corpus.documents().collect();
        assert_eq!(
            documents,
            vec![
                ("Zanahoria", "Verduras"),
                ("Choclo", "Verduras"),
                ("Paleta", "Carnes"),
            ]
        );
    }
}
