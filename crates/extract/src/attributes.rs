//! Field cleaners
//!
//! Pure functions turning one raw field into its canonical form. None of
//! them fail: unusable input maps to `None`, an empty list or `Other`.

use once_cell::sync::Lazy;
use regex::Regex;
use stylesearch_core::{ColorFamily, ProductFeatures};

// ============================================================================
// Prices and discounts
// ============================================================================

static CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)₹|rs\.?|inr|[$£€,\s]").expect("currency pattern"));

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit pattern"));

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse price text after stripping currency marks, thousands separators
/// and whitespace. Unparseable or non-finite values are `None`.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let stripped = CURRENCY.replace_all(raw, "");
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse and convert a price into the target currency
pub fn convert_price(raw: Option<&str>, rate: f64) -> Option<f64> {
    parse_price(raw).map(|v| round2(v * rate))
}

/// First run of digits in the discount text, as a percentage
pub fn parse_discount(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    DIGITS
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

// ============================================================================
// Category
// ============================================================================

/// Known raw category → canonical label
pub const CATEGORY_MAP: &[(&str, &str)] = &[
    ("westernwear-women", "Western Wear"),
    ("indianwear-women", "Indian Wear"),
    ("lingerie&nightwear-women", "Lingerie & Nightwear"),
    ("footwear-women", "Footwear"),
    ("watches-women", "Watches"),
    ("jewellery-women", "Jewellery"),
    ("fragrance-women", "Fragrance"),
];

/// Label for missing or empty categories
pub const OTHER_CATEGORY: &str = "Other";

/// Canonical category label
pub fn clean_category(raw: Option<&str>) -> String {
    let cleaned = match raw {
        Some(r) => r.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase(),
        None => return OTHER_CATEGORY.to_string(),
    };

    if let Some((_, label)) = CATEGORY_MAP.iter().find(|(k, _)| *k == cleaned) {
        return label.to_string();
    }

    let spaced = cleaned
        .replace('&', " and ")
        .replace(['-', '_', '/'], " ");
    let titled = title_case(&spaced);
    if titled.is_empty() {
        OTHER_CATEGORY.to_string()
    } else {
        titled
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ============================================================================
// Sizes
// ============================================================================

static SIZE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(xxx-?large|xx-?large|x-?large|extra[\s-]?large|large|medium|xx-?small|x-?small|extra[\s-]?small|small|xxxl|xxl|xl|xxs|xs|3xl|4xl|s|m|l|\d{2})\b",
    )
    .expect("size pattern")
});

/// Canonical form of one recognized size token
fn canonical_size(token: &str) -> String {
    let key: String = token
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let canonical = match key.as_str() {
        "xxs" | "xxsmall" => "XXS",
        "xs" | "xsmall" | "extrasmall" => "XS",
        "s" | "small" => "S",
        "m" | "medium" => "M",
        "l" | "large" => "L",
        "xl" | "xlarge" | "extralarge" => "XL",
        "xxl" | "xxlarge" => "XXL",
        "xxxl" | "3xl" | "xxxlarge" => "3XL",
        "4xl" => "4XL",
        _ => return token.to_uppercase(),
    };
    canonical.to_string()
}

/// Canonical size set, deduplicated and sorted by (length, text)
pub fn parse_sizes(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(r) => r,
        None => return Vec::new(),
    };
    let mut sizes: Vec<String> = SIZE_TOKEN
        .find_iter(raw)
        .map(|m| canonical_size(m.as_str()))
        .collect();
    sizes.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    sizes.dedup();
    sizes
}

/// Canonicalize a user-supplied size for filtering (`xl` → `XL`)
pub fn normalize_size_query(size: &str) -> String {
    let trimmed = size.trim();
    match SIZE_TOKEN.find(trimmed) {
        Some(m) if m.as_str().len() == trimmed.len() => canonical_size(trimmed),
        _ => trimmed.to_uppercase(),
    }
}

// ============================================================================
// Colour
// ============================================================================

/// Common misspellings fixed before colour lookup
pub const COLOR_SPELLING: &[(&str, &str)] = &[
    ("fuschia", "fuchsia"),
    ("fushia", "fuchsia"),
    ("voilet", "violet"),
    ("lavendar", "lavender"),
    ("burgandy", "burgundy"),
    ("turqoise", "turquoise"),
    ("mehroon", "maroon"),
];

/// Colour families with their aliases, in lookup order.
///
/// Metallic sits last: its aliases that also belong to a primary hue
/// (gold, bronze, copper, silver) resolve to the hue.
pub const COLOR_TABLE: &[(ColorFamily, &[&str])] = &[
    (ColorFamily::Red, &["red", "crimson", "maroon", "burgundy", "scarlet", "rust", "wine"]),
    (
        ColorFamily::Blue,
        &[
            "blue", "navy", "teal", "turquoise", "cobalt", "azure", "indigo", "midnight", "denim",
            "aqua", "ocean",
        ],
    ),
    (
        ColorFamily::Green,
        &[
            "green", "olive", "mint", "emerald", "sage", "peacock", "lime", "forest", "khaki",
            "jade",
        ],
    ),
    (ColorFamily::Black, &["black", "ebony", "jet", "charcoal", "onyx", "coal"]),
    (ColorFamily::White, &["white", "ivory", "off[- ]white", "cream"]),
    (ColorFamily::Yellow, &["yellow", "mustard", "gold", "lemon", "honey", "ecru"]),
    (
        ColorFamily::Pink,
        &["pink", "rose", "blush", "coral", "peach", "fuchsia", "magenta", "bubblegum"],
    ),
    (
        ColorFamily::Purple,
        &["purple", "lavender", "lilac", "violet", "plum", "mauve", "amethyst", "orchid"],
    ),
    (ColorFamily::Orange, &["orange", "tangerine"]),
    (
        ColorFamily::Brown,
        &["brown", "tan", "camel", "chocolate", "coffee", "mocha", "bronze", "copper"],
    ),
    (
        ColorFamily::Grey,
        &["grey", "gray", "charcoal", "slate", "graphite", "silver", "ash"],
    ),
    (ColorFamily::Beige, &["beige", "natural", "nude", "sand"]),
    (
        ColorFamily::Multi,
        &["multi[- ]?colou?r(?:ed)?", "multi", "mixed"],
    ),
    (
        ColorFamily::Metallic,
        &["metallic", "gold", "silver", "bronze", "copper", "gunmetal"],
    ),
];

static COLOR_PATTERNS: Lazy<Vec<(ColorFamily, Regex)>> = Lazy::new(|| {
    COLOR_TABLE
        .iter()
        .map(|(family, aliases)| {
            let source = format!(r"(?i)\b(?:{})\b", aliases.join("|"));
            (*family, Regex::new(&source).expect("colour pattern"))
        })
        .collect()
});

/// Apply [`COLOR_SPELLING`] to lower-cased text
pub fn fix_color_spelling(text: &str) -> String {
    let mut fixed = text.to_lowercase();
    for (wrong, right) in COLOR_SPELLING {
        if fixed.contains(wrong) {
            fixed = fixed.replace(wrong, right);
        }
    }
    fixed
}

/// First colour family (in table order) with a matching alias
pub fn color_family(text: &str) -> Option<ColorFamily> {
    let fixed = fix_color_spelling(text);
    COLOR_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&fixed))
        .map(|(family, _)| *family)
}

// ============================================================================
// Descriptive features
// ============================================================================

const MATERIALS: &[&str] = &[
    "cotton", "polyester", "silk", "wool", "denim", "linen", "viscose", "rayon",
];
const FITS: &[&str] = &["regular fit", "slim fit", "loose fit", "tight fit", "oversized"];
const NECKS: &[&str] = &[
    "collar neck",
    "v-neck",
    "round neck",
    "boat neck",
    "turtleneck",
    "cowl neck",
];
const PATTERNS: &[&str] = &["solid", "striped", "printed", "checked", "floral", "geometric"];

fn first_substring(text: &str, vocabulary: &[&str]) -> Option<String> {
    vocabulary
        .iter()
        .find(|v| text.contains(*v))
        .map(|v| v.to_string())
}

/// Material, fit, neckline and pattern found in the details text
pub fn extract_features(details: &str) -> ProductFeatures {
    let lowered = details.to_lowercase();
    ProductFeatures {
        material: first_substring(&lowered, MATERIALS),
        fit: first_substring(&lowered, FITS),
        neck_type: first_substring(&lowered, NECKS),
        pattern: first_substring(&lowered, PATTERNS),
    }
}
