//! Typed records for the most queried collections
//!
//! The service returns whatever fields a query selects, so every field is
//! optional and anything not modelled here lands in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A row of the `genome` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub genome_id: Option<String>,
    pub genome_name: Option<String>,
    pub taxon_id: Option<i64>,
    pub genome_status: Option<String>,
    pub strain: Option<String>,
    pub species: Option<String>,
    pub genus: Option<String>,
    pub genome_length: Option<i64>,
    pub gc_content: Option<f64>,
    pub contigs: Option<i64>,
    pub host_name: Option<String>,
    pub isolation_country: Option<String>,
    pub collection_year: Option<i64>,
    pub date_inserted: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A row of the `genome_feature` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenomeFeature {
    pub feature_id: Option<String>,
    pub patric_id: Option<String>,
    pub genome_id: Option<String>,
    pub genome_name: Option<String>,
    pub accession: Option<String>,
    pub feature_type: Option<String>,
    pub annotation: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    /// `+` or `-`
    pub strand: Option<String>,
    pub na_length: Option<i64>,
    pub aa_length: Option<i64>,
    pub gene: Option<String>,
    pub product: Option<String>,
    pub refseq_locus_tag: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A row of the `taxonomy` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub taxon_id: Option<i64>,
    pub taxon_name: Option<String>,
    pub taxon_rank: Option<String>,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub lineage_ids: Vec<i64>,
    #[serde(default)]
    pub lineage_names: Vec<String>,
    pub genetic_code: Option<i64>,
    /// Number of genomes under this taxon
    pub genomes: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_genome_partial_row() {
        let genome: Genome = serde_json::from_value(json!({
            "genome_id": "83332.12",
            "genome_name": "Mycobacterium tuberculosis H37Rv",
            "gc_content": 65.6,
            "mlst": "MLST.Mycobacterium_tuberculosis.1"
        }))
        .unwrap();

        assert_eq!(genome.genome_id.as_deref(), Some("83332.12"));
        assert_eq!(genome.gc_content, Some(65.6));
        assert_eq!(genome.taxon_id, None);
        assert_eq!(
            genome.extra.get("mlst"),
            Some(&json!("MLST.Mycobacterium_tuberculosis.1"))
        );
    }

    #[test]
    fn test_feature_rows() {
        let features: Vec<GenomeFeature> = serde_json::from_value(json!([
            {"feature_id": "PATRIC.83332.12.NC_000962.CDS.1.1524.fwd", "strand": "+", "start": 1, "end": 1524},
            {"patric_id": "fig|83332.12.peg.2", "strand": "-"}
        ]))
        .unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].end, Some(1524));
        assert_eq!(features[1].strand.as_deref(), Some("-"));
    }

    #[test]
    fn test_taxonomy_lineage_defaults() {
        let taxon: Taxonomy = serde_json::from_value(json!({"taxon_id": 1773})).unwrap();
        assert_eq!(taxon.taxon_id, Some(1773));
        assert!(taxon.lineage_names.is_empty());
    }
}
