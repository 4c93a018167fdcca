use serde::{Deserialize, Serialize};

/// Text DNA is already single-stranded, so denaturation leaves it unchanged.
pub fn denature(dna: &str) -> &str {
    dna
}

pub fn anneal_primer(dna: &str, primer: &str) -> bool {
    dna.contains(primer)
}

/// Strand synthesised from the first site where `primer` binds.
pub fn extend<'a>(primer: &str, dna: &'a str) -> Option<&'a str> {
    dna.find(primer).map(|start| &dna[start..])
}

/// Outcome of one denature → anneal → extend cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcrCycle {
    pub template: String,
    pub primer: String,
    pub annealed: bool,
    pub extended: Option<String>,
}

pub fn simulate_cycle(dna: &str, primer: &str) -> PcrCycle {
    let template = denature(dna);
    PcrCycle {
        template: template.to_string(),
        primer: primer.to_string(),
        annealed: anneal_primer(template, primer),
        extended: extend(primer, template).map(str::to_string),
    }
}
