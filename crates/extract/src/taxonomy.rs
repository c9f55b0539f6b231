//! Product-type taxonomy extraction
//!
//! Resolves free text to canonical product-type labels:
//!
//! 1. Every alias of every label compiles to a case-insensitive,
//!    word-bounded pattern. Multi-word aliases accept spaces or hyphens
//!    between words; single-word alphabetic aliases accept a plural suffix.
//! 2. All patterns are run over the text, collecting `(label, span)`
//!    candidates. Candidates may overlap.
//! 3. Candidates are ordered longest span first, then earliest start, then
//!    label name, and accepted greedily when they do not overlap an already
//!    accepted span. A match nested in a longer one is discarded.
//! 4. The disambiguation rules in [`crate::rules`] patch the label set.
//!
//! Labels come back in the order their spans appear in the text, with labels
//! added by rules appended.

use crate::rules::{apply_rules, LabelSet};
use once_cell::sync::Lazy;
use regex::Regex;
use stylesearch_core::{Error, Result};

/// Canonical label → aliases.
///
/// Aliases are written in singular form; the plural is admitted
/// automatically for single alphabetic words.
pub const TAXONOMY: &[(&str, &[&str])] = &[
    // Tops and dresses
    ("dress", &["dress", "gown", "maxi dress", "midi dress", "mini dress", "sundress"]),
    ("top", &["top", "crop top", "tank top", "camisole", "cami"]),
    ("t-shirt", &["t-shirt", "tshirt", "tee"]),
    ("shirt", &["shirt"]),
    ("blouse", &["blouse"]),
    ("tunic", &["tunic"]),
    ("sweatshirt", &["sweatshirt"]),
    ("hoodie", &["hoodie", "hoody"]),
    ("sweater", &["sweater", "pullover", "jumper"]),
    ("cardigan", &["cardigan", "shrug"]),
    ("jacket", &["jacket", "denim jacket", "bomber jacket", "biker jacket", "shacket"]),
    ("blazer", &["blazer"]),
    ("coat", &["coat", "overcoat", "trench coat"]),
    // Bottoms
    ("jeans", &["jean", "jeans", "denim"]),
    ("jeggings", &["jegging"]),
    ("trousers", &["trouser", "chino", "cigarette pants"]),
    ("pants", &["pant", "pants"]),
    ("track pants", &["track pant", "track pants", "jogger", "trackpant"]),
    ("tracksuit", &["tracksuit", "track suit"]),
    ("leggings", &["legging"]),
    ("shorts", &["shorts"]),
    ("skirt", &["skirt"]),
    ("jumpsuit", &["jumpsuit"]),
    ("playsuit", &["playsuit"]),
    ("romper", &["romper"]),
    ("dungarees", &["dungaree"]),
    // Ethnic wear
    ("saree", &["saree", "sari"]),
    ("lehenga", &["lehenga", "lehnga", "lehenga choli"]),
    ("kurta", &["kurta", "kurti"]),
    ("salwar", &["salwar", "shalwar", "churidar"]),
    ("salwar suit", &["salwar suit", "salwar kameez", "churidar suit"]),
    ("dupatta", &["dupatta"]),
    ("choli", &["choli"]),
    ("palazzo", &["palazzo"]),
    ("sharara", &["sharara"]),
    ("dhoti pants", &["dhoti", "dhoti pant", "dhoti pants"]),
    ("anarkali", &["anarkali"]),
    ("ethnic set", &["ethnic set", "kurta set"]),
    // Lingerie and nightwear
    ("bra", &["bra", "bralette"]),
    ("panties", &["panty", "panties", "brief", "hipster", "thong"]),
    ("nightwear", &["nightwear", "nightdress", "nightgown", "nighty", "nightie", "night suit"]),
    ("pyjamas", &["pyjama", "pajama", "pyjamas", "pajamas"]),
    ("robe", &["robe", "bathrobe"]),
    ("shapewear", &["shapewear"]),
    // Footwear
    ("heels", &["heel", "stiletto", "pump"]),
    ("wedges", &["wedge"]),
    ("sandals", &["sandal"]),
    ("boots", &["boot", "ankle boot"]),
    ("sneakers", &["sneaker", "trainer"]),
    ("peep toes", &["peep toe", "peep toes", "peeptoe"]),
    ("mules", &["mule"]),
    ("loafers", &["loafer", "moccasin"]),
    ("platforms", &["platform"]),
    ("clogs", &["clog"]),
    ("slides", &["slide"]),
    ("floaters", &["floater"]),
    ("bellies", &["bellies", "ballerina", "ballet flat", "ballet flats"]),
    ("brogues", &["brogue"]),
    ("slip-ons", &["slip-on", "slip-ons", "slip on", "slip ons"]),
    ("shoes", &["shoe"]),
    ("flats", &["flat"]),
    ("flip flops", &["flip flop", "flip flops", "flipflop"]),
    ("slippers", &["slipper"]),
    // Watches, jewellery and bags
    ("watch", &["watch", "smartwatch", "wristwatch"]),
    ("bracelet", &["bracelet"]),
    ("bangle", &["bangle", "kada"]),
    ("necklace", &["necklace", "choker", "necklace set"]),
    ("pendant", &["pendant"]),
    ("earrings", &["earring", "earrings", "jhumka", "jhumki", "stud earrings"]),
    ("ring", &["ring"]),
    ("anklet", &["anklet"]),
    ("handbag", &["handbag", "hand bag", "shoulder bag", "sling bag", "satchel"]),
    ("clutch", &["clutch"]),
    ("wallet", &["wallet"]),
    ("purse", &["purse"]),
    ("tote", &["tote", "tote bag"]),
    ("backpack", &["backpack"]),
    // Fragrance
    ("perfume", &["perfume", "eau de parfum", "eau de toilette", "body mist", "deodorant"]),
];

/// Build the regex source for one alias
fn alias_pattern(alias: &str) -> String {
    let words: Vec<&str> = alias
        .split(|c: char| c == ' ' || c == '-')
        .filter(|w| !w.is_empty())
        .collect();

    let body = if words.len() > 1 {
        words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join(r"[\s-]+")
    } else if alias.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{}(?:s|es)?", regex::escape(alias))
    } else {
        regex::escape(alias)
    };

    format!(r"(?i)\b{}\b", body)
}

// ============================================================================
// Candidate
// ============================================================================

/// One alias match: a label claiming a byte span of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'t> {
    /// Canonical label
    pub label: &'static str,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
    /// Matched text
    pub matched: &'t str,
}

impl Candidate<'_> {
    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for an empty span
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Greedy interval scheduling: longest first, then earliest, then label.
///
/// Returns the accepted candidates ordered by start offset.
pub fn resolve_overlaps<'t>(mut candidates: Vec<Candidate<'t>>) -> Vec<Candidate<'t>> {
    candidates.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then(a.start.cmp(&b.start))
            .then(a.label.cmp(b.label))
    });

    let mut occupied: Vec<(usize, usize)> = Vec::new();
    let mut accepted: Vec<Candidate<'t>> = Vec::new();
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        if occupied
            .iter()
            .any(|&(start, end)| candidate.overlaps(start, end))
        {
            continue;
        }
        occupied.push((candidate.start, candidate.end));
        accepted.push(candidate);
    }

    accepted.sort_by_key(|c| c.start);
    accepted
}

// ============================================================================
// Taxonomy
// ============================================================================

struct TaxonomyEntry {
    label: &'static str,
    patterns: Vec<Regex>,
}

/// Compiled label → pattern table
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
}

static BUILTIN: Lazy<Taxonomy> = Lazy::new(|| {
    Taxonomy::from_table(TAXONOMY).expect("built-in taxonomy aliases must compile")
});

impl Taxonomy {
    /// The built-in fashion taxonomy, compiled on first use
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    /// Compile a label → aliases table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if an alias does not compile.
    pub fn from_table(table: &[(&'static str, &[&str])]) -> Result<Self> {
        let mut entries = Vec::with_capacity(table.len());
        for &(label, aliases) in table {
            let mut patterns = Vec::with_capacity(aliases.len());
            for alias in aliases {
                let re = Regex::new(&alias_pattern(alias)).map_err(|e| {
                    Error::invalid_input(format!("bad alias '{}' for '{}': {}", alias, label, e))
                })?;
                patterns.push(re);
            }
            entries.push(TaxonomyEntry { label, patterns });
        }
        Ok(Taxonomy { entries })
    }

    /// Canonical labels in table order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.label)
    }

    /// Collect every alias match of every label
    pub fn scan<'t>(&self, text: &'t str) -> Vec<Candidate<'t>> {
        let mut candidates = Vec::new();
        for entry in &self.entries {
            for pattern in &entry.patterns {
                for m in pattern.find_iter(text) {
                    candidates.push(Candidate {
                        label: entry.label,
                        start: m.start(),
                        end: m.end(),
                        matched: m.as_str(),
                    });
                }
            }
        }
        candidates
    }

    /// Resolve `text` to canonical labels.
    ///
    /// No match yields an empty list.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let accepted = resolve_overlaps(self.scan(text));

        let mut labels = LabelSet::new();
        for candidate in &accepted {
            labels.add(candidate.label);
        }

        let lowered = text.to_lowercase();
        apply_rules(&mut labels, &lowered);
        labels.into_strings()
    }
}

impl std::fmt::Debug for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Taxonomy")
            .field("labels", &self.entries.len())
            .finish()
    }
}

/// Extract product types with the built-in taxonomy
pub fn extract_product_types(text: &str) -> Vec<String> {
    Taxonomy::builtin().extract(text)
}
