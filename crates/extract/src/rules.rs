//! Disambiguation rules applied after overlap resolution
//!
//! Each rule is a pure patch over the label set, given the lower-cased
//! source text. Rules run in [`RULES`] order.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered, duplicate-free label list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<&'static str>,
}

impl LabelSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label unless already present
    pub fn add(&mut self, label: &'static str) {
        if !self.contains(label) {
            self.labels.push(label);
        }
    }

    /// Membership test
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| *l == label)
    }

    /// True if any of `labels` is present
    pub fn contains_any(&self, labels: &[&str]) -> bool {
        labels.iter().any(|l| self.contains(l))
    }

    /// Remove a label, keeping the order of the rest
    pub fn remove(&mut self, label: &str) {
        self.labels.retain(|l| *l != label);
    }

    /// Remove every label in `labels`
    pub fn remove_all(&mut self, labels: &[&str]) {
        self.labels.retain(|l| !labels.contains(l));
    }

    /// Labels in order
    pub fn as_slice(&self) -> &[&'static str] {
        &self.labels
    }

    /// Owned labels in order
    pub fn into_strings(self) -> Vec<String> {
        self.labels.into_iter().map(String::from).collect()
    }
}

/// A label-set patch
pub type Rule = fn(&mut LabelSet, &str);

/// Rules in application order
pub const RULES: &[(&str, Rule)] = &[
    ("tracksuit", tracksuit),
    ("denim-jacket", denim_jacket),
    ("ethnic-set", ethnic_set),
    ("footwear-specificity", footwear_specificity),
    ("necklace-pendant", necklace_pendant),
];

/// Run every rule in order
pub fn apply_rules(labels: &mut LabelSet, text: &str) {
    for (_, rule) in RULES {
        rule(labels, text);
    }
}

static TRACKSUIT_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btrack[\s-]*suits?\b").expect("tracksuit phrase"));

static DENIM_JACKET_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdenim[\s-]+jackets?\b").expect("denim jacket phrase"));

const BOTTOM_WEAR: &[&str] = &[
    "salwar",
    "palazzo",
    "trousers",
    "leggings",
    "pants",
    "dhoti pants",
    "sharara",
];

const SPECIFIC_FOOTWEAR: &[&str] = &[
    "heels",
    "wedges",
    "sandals",
    "boots",
    "sneakers",
    "peep toes",
    "mules",
    "loafers",
    "platforms",
    "clogs",
    "slides",
    "floaters",
    "bellies",
    "brogues",
];

const GENERIC_FOOTWEAR: &[&str] = &["slip-ons", "shoes", "flats"];

/// A tracksuit mention swallows track pants
pub fn tracksuit(labels: &mut LabelSet, text: &str) {
    if TRACKSUIT_PHRASE.is_match(text) {
        labels.remove("track pants");
        labels.add("tracksuit");
    }
}

/// "denim jacket" is a jacket, not jeans
pub fn denim_jacket(labels: &mut LabelSet, text: &str) {
    if DENIM_JACKET_PHRASE.is_match(text) {
        labels.remove("jeans");
    }
}

/// Kurta + dupatta/choli + bottom collapses to a salwar suit; kurta + bottom
/// alone is tagged as an ethnic set.
pub fn ethnic_set(labels: &mut LabelSet, _text: &str) {
    if !labels.contains("kurta") || !labels.contains_any(BOTTOM_WEAR) {
        return;
    }
    if labels.contains_any(&["dupatta", "choli"]) {
        labels.remove_all(&["kurta", "dupatta", "choli"]);
        labels.remove_all(BOTTOM_WEAR);
        labels.add("salwar suit");
    } else {
        labels.add("ethnic set");
    }
}

/// Specific footwear styles drop the generic footwear labels
pub fn footwear_specificity(labels: &mut LabelSet, _text: &str) {
    if labels.contains_any(SPECIFIC_FOOTWEAR) {
        labels.remove_all(GENERIC_FOOTWEAR);
    }
}

/// A pendant on a necklace is just a necklace
pub fn necklace_pendant(labels: &mut LabelSet, _text: &str) {
    if labels.contains("necklace") && labels.contains("pendant") {
        labels.remove("pendant");
    }
}
