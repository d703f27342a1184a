//! Statute lineage records.

use serde::{Deserialize, Serialize};

/// One statute to crawl: an immutable record naming the output folder,
/// the short statute code used in filenames, and the seed URL (section 1).
///
/// The record is threaded by reference through every stage of a lineage;
/// it is never mutated after configuration load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statute {
    /// Output folder name, e.g. "TaxesConsolidationAct1997"
    pub name: String,

    /// Short statute code embedded in filename stems, e.g. "tca"
    pub abbr: String,

    /// URL of the statute's first section
    pub seed_url: String,
}

impl Statute {
    /// The five statutes crawled by default.
    pub fn default_statutes() -> Vec<Statute> {
        vec![
            Statute {
                name: "TaxesConsolidationAct1997".to_string(),
                abbr: "tca".to_string(),
                seed_url:
                    "https://www.irishstatutebook.ie/eli/1997/act/39/section/1/enacted/en/html#part1"
                        .to_string(),
            },
            Statute {
                name: "Value-AddedTaxConsolidationAct2010".to_string(),
                abbr: "vat".to_string(),
                seed_url:
                    "https://www.irishstatutebook.ie/eli/2010/act/31/section/1/enacted/en/html#part1"
                        .to_string(),
            },
            Statute {
                name: "StampDutiesConsolidationAct1999".to_string(),
                abbr: "sdca".to_string(),
                seed_url:
                    "https://www.irishstatutebook.ie/eli/1999/act/31/section/1/enacted/en/html#part1"
                        .to_string(),
            },
            Statute {
                name: "CapitalAcquisitionsTaxConsolidationAct2003".to_string(),
                abbr: "cat".to_string(),
                seed_url:
                    "https://www.irishstatutebook.ie/eli/2003/act/1/section/1/enacted/en/html#part1"
                        .to_string(),
            },
            Statute {
                name: "CompaniesAct2014".to_string(),
                abbr: "cat".to_string(),
                seed_url:
                    "https://www.irishstatutebook.ie/eli/2014/act/38/section/1/enacted/en/html#part1"
                        .to_string(),
            },
        ]
    }
}
