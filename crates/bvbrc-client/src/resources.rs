//! Catalog of BV-BRC collections
//!
//! Each entry names a collection, its primary key, the fields that are
//! commonly matched by equality and the numeric or date fields that are
//! commonly queried by range. The field lists guide callers (the CLI uses
//! them for suggestions); they are not a schema and nothing is rejected
//! for naming a field outside them.
//!
//! The `resource_catalog!` table expands into the [`Resource`] enum and one
//! accessor per collection on [`BvbrcClient`](crate::BvbrcClient), so adding
//! a collection is a one-entry change.

use crate::client::{BvbrcClient, ResourceClient};
use crate::error::BvbrcError;
use std::fmt;
use std::str::FromStr;

macro_rules! resource_catalog {
    ($(
        $(#[$doc:meta])*
        $name:ident => $variant:ident {
            key: $key:literal,
            eq: [$($field:literal),* $(,)?],
            range: [$($range:literal),* $(,)?] $(,)?
        }
    ),+ $(,)?) => {
        /// A known BV-BRC collection
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Resource {
            $($(#[$doc])* $variant),+
        }

        impl Resource {
            /// Every known collection, in catalog order.
            pub const ALL: &'static [Resource] = &[$(Resource::$variant),+];

            /// Collection name as used in the endpoint path.
            pub fn name(self) -> &'static str {
                match self {
                    $(Resource::$variant => stringify!($name)),+
                }
            }

            /// Field that [`ResourceClient::get_by_id`] matches on.
            pub fn primary_key(self) -> &'static str {
                match self {
                    $(Resource::$variant => $key),+
                }
            }

            /// Well-known equality fields.
            pub fn eq_fields(self) -> &'static [&'static str] {
                match self {
                    $(Resource::$variant => &[$($field),*]),+
                }
            }

            /// Well-known range fields.
            pub fn range_fields(self) -> &'static [&'static str] {
                match self {
                    $(Resource::$variant => &[$($range),*]),+
                }
            }
        }

        impl BvbrcClient {
            $(
                #[doc = concat!("Handle for the `", stringify!($name), "` collection.")]
                pub fn $name(&self) -> ResourceClient {
                    self.resource(Resource::$variant)
                }
            )+
        }
    };
}

resource_catalog! {
    antibiotics => Antibiotics {
        key: "pubchem_cid",
        eq: ["antibiotic_name", "cas_id", "molecular_formula", "atc_classification"],
        range: ["molecular_weight"],
    },
    bioset => Bioset {
        key: "bioset_id",
        eq: ["exp_id", "bioset_name", "bioset_type", "organism", "taxon_id", "strain", "treatment_type", "treatment_name"],
        range: [],
    },
    bioset_result => BiosetResult {
        key: "id",
        eq: ["bioset_id", "exp_id", "feature_id", "patric_id", "gene", "product", "entity_type", "result_type"],
        range: ["fpkm", "log2_fc", "tpm"],
    },
    enzyme_class_ref => EnzymeClassRef {
        key: "ec_number",
        eq: ["ec_description", "go"],
        range: [],
    },
    epitope => Epitope {
        key: "epitope_id",
        eq: ["epitope_type", "epitope_sequence", "organism", "taxon_id", "protein_name", "protein_id", "protein_accession"],
        range: ["start", "end", "total_assays"],
    },
    epitope_assay => EpitopeAssay {
        key: "assay_id",
        eq: ["epitope_id", "epitope_sequence", "assay_type", "assay_result", "host_name", "organism", "taxon_id", "protein_accession", "pdb_id"],
        range: ["start", "end"],
    },
    experiment => Experiment {
        key: "exp_id",
        eq: ["exp_name", "exp_type", "organism", "taxon_id", "genome_id", "strain", "study_name", "measurement_technique", "public_identifier"],
        range: ["samples", "biosets"],
    },
    feature_sequence => FeatureSequence {
        key: "md5",
        eq: ["sequence_type"],
        range: [],
    },
    gene_ontology_ref => GeneOntologyRef {
        key: "go_id",
        eq: ["go_name", "ontology"],
        range: [],
    },
    genome => Genome {
        key: "genome_id",
        eq: [
            "genome_name", "taxon_id", "genome_status", "strain", "species", "genus", "family",
            "order", "class", "phylum", "host_name", "isolation_country", "biovar", "serovar",
            "mlst", "sequencing_platform", "assembly_accession", "bioproject_accession",
            "biosample_accession", "refseq_accessions", "genbank_accessions",
        ],
        range: ["genome_length", "gc_content", "contigs", "patric_cds", "collection_year", "date_inserted", "completion_date"],
    },
    genome_amr => GenomeAmr {
        key: "id",
        eq: ["genome_id", "genome_name", "taxon_id", "antibiotic", "resistant_phenotype", "laboratory_typing_method", "evidence", "testing_standard"],
        range: ["measurement_value", "testing_standard_year"],
    },
    genome_feature => GenomeFeature {
        key: "feature_id",
        eq: [
            "patric_id", "genome_id", "genome_name", "taxon_id", "accession", "annotation",
            "feature_type", "gene", "product", "strand", "refseq_locus_tag", "protein_id",
            "figfam_id", "plfam_id", "pgfam_id", "go", "ec",
        ],
        range: ["start", "end", "na_length", "aa_length"],
    },
    genome_sequence => GenomeSequence {
        key: "sequence_id",
        eq: ["genome_id", "genome_name", "taxon_id", "accession", "sequence_type", "topology", "chromosome", "plasmid", "segment"],
        range: ["length", "gc_content"],
    },
    id_ref => IdRef {
        key: "id",
        eq: ["id_type", "id_value", "uniprotkb_accession"],
        range: [],
    },
    misc_niaid_sgc => MiscNiaidSgc {
        key: "target_id",
        eq: ["target_status", "organism_name", "genus", "species", "strain", "gene_symbol_collection", "has_clones", "has_proteins", "selection_criteria"],
        range: [],
    },
    pathway => Pathway {
        key: "id",
        eq: ["pathway_id", "pathway_name", "pathway_class", "genome_id", "taxon_id", "feature_id", "patric_id", "ec_number", "gene", "product", "annotation"],
        range: [],
    },
    pathway_ref => PathwayRef {
        key: "id",
        eq: ["pathway_id", "pathway_name", "pathway_class", "ec_number", "ec_description"],
        range: [],
    },
    ppi => Ppi {
        key: "id",
        eq: [
            "interactor_a", "interactor_b", "interactor_desc_a", "interactor_desc_b",
            "genome_id_a", "genome_id_b", "taxon_id_a", "taxon_id_b", "interaction_type",
            "detection_method", "evidence", "pmid",
        ],
        range: ["score"],
    },
    protein_family_ref => ProteinFamilyRef {
        key: "family_id",
        eq: ["family_type", "family_product"],
        range: [],
    },
    protein_feature => ProteinFeature {
        key: "id",
        eq: ["genome_id", "feature_id", "patric_id", "source", "source_id", "description", "interpro_id", "gene", "product", "taxon_id"],
        range: ["start", "end", "e_value", "score"],
    },
    protein_structure => ProteinStructure {
        key: "pdb_id",
        eq: ["title", "organism_name", "taxon_id", "genome_id", "feature_id", "patric_id", "uniprotkb_accession", "gene", "product", "method", "institution", "authors"],
        range: ["resolution", "release_date"],
    },
    sequence_feature => SequenceFeature {
        key: "id",
        eq: ["sf_id", "sf_name", "sf_category", "genome_id", "feature_id", "patric_id", "gene", "source", "source_id", "evidence_code", "taxon_id"],
        range: ["start", "end"],
    },
    sequence_feature_vt => SequenceFeatureVt {
        key: "id",
        eq: ["sf_id", "sf_category", "sf_name", "sf_sequence", "sf_sequence_md5"],
        range: [],
    },
    serology => Serology {
        key: "id",
        eq: [
            "project_identifier", "sample_identifier", "host_identifier", "host_type",
            "host_species", "host_sex", "geographic_country", "test_type", "test_result",
            "virus_identifier", "serotype",
        ],
        range: ["host_age", "collection_date"],
    },
    sp_gene => SpGene {
        key: "id",
        eq: [
            "genome_id", "genome_name", "taxon_id", "feature_id", "patric_id", "refseq_locus_tag",
            "gene", "product", "property", "source", "source_id", "evidence", "organism",
            "antibiotics_class",
        ],
        range: ["identity", "query_coverage", "subject_coverage", "e_value"],
    },
    sp_gene_ref => SpGeneRef {
        key: "id",
        eq: ["property", "source", "source_id", "gene_name", "locus_tag", "organism", "classification", "antibiotics_class", "function"],
        range: [],
    },
    spike_lineage => SpikeLineage {
        key: "id",
        eq: ["lineage", "lineage_of_concern", "country", "region", "month"],
        range: ["lineage_count", "prevalence", "growth_rate"],
    },
    spike_variant => SpikeVariant {
        key: "id",
        eq: ["aa_variant", "country", "region", "month"],
        range: ["lineage_count", "prevalence", "growth_rate"],
    },
    strain => Strain {
        key: "id",
        eq: ["taxon_id", "family", "genus", "species", "strain", "subtype", "h_type", "n_type", "host_name", "geographic_group", "isolation_country"],
        range: ["collection_year"],
    },
    subsystem => Subsystem {
        key: "id",
        eq: [
            "subsystem_id", "subsystem_name", "superclass", "class", "subclass", "role_id",
            "role_name", "genome_id", "genome_name", "taxon_id", "feature_id", "patric_id",
            "gene", "product", "active",
        ],
        range: [],
    },
    subsystem_ref => SubsystemRef {
        key: "id",
        eq: ["subsystem_id", "subsystem_name", "superclass", "class", "subclass", "role_id", "role_name"],
        range: [],
    },
    surveillance => Surveillance {
        key: "id",
        eq: [
            "sample_identifier", "sample_accession", "collector_institution", "collection_country",
            "collection_state", "host_species", "host_common_name", "host_group",
            "pathogen_test_type", "pathogen_test_result", "type", "subtype", "strain",
            "sequence_accession",
        ],
        range: ["collection_date", "host_age"],
    },
    taxonomy => Taxonomy {
        key: "taxon_id",
        eq: ["taxon_name", "taxon_rank", "parent_id", "genetic_code", "division", "lineage_names", "lineage_ids", "other_names"],
        range: ["genomes"],
    },
}

impl Resource {
    /// Names of every known collection, in catalog order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|r| r.name())
    }

    /// Whether `field` is the primary key or one of the catalog fields.
    pub fn knows_field(self, field: &str) -> bool {
        field == self.primary_key()
            || self
                .eq_fields()
                .iter()
                .chain(self.range_fields())
                .any(|known| *known == field)
    }

    /// Primary key, equality fields and range fields, deduplicated.
    pub fn all_fields(self) -> Vec<&'static str> {
        let mut fields = vec![self.primary_key()];
        for field in self.eq_fields().iter().chain(self.range_fields()) {
            if !fields.contains(field) {
                fields.push(*field);
            }
        }
        fields
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = BvbrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| BvbrcError::UnknownResource(s.to_string()))
    }
}
