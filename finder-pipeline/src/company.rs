//! Company name heuristics.

/// Used when nothing in the query names a known company.
pub const DEFAULT_COMPANY: &str = "General";

/// Lowercase fragments searched for in the query, first match wins.
pub const KNOWN_COMPANIES: &[&str] = &[
    "goldman sachs",
    "morgan stanley",
    "google",
    "amazon",
    "microsoft",
    "meta",
    "facebook",
    "apple",
    "netflix",
    "adobe",
    "uber",
    "airbnb",
    "linkedin",
    "twitter",
    "oracle",
    "salesforce",
    "flipkart",
    "walmart",
    "infosys",
    "wipro",
    "accenture",
    "paypal",
    "nvidia",
    "samsung",
    "bloomberg",
    "atlassian",
    "swiggy",
    "zomato",
];

/// Values a model uses when it has no real company to report.
const PLACEHOLDERS: &[&str] = &["unknown", "general", "n/a", "none", "null"];

/// Find a company mentioned in `query`, case-insensitively.
///
/// ```
/// use finder_pipeline::company::extract_company;
///
/// assert_eq!(extract_company("Amazon SDE-2 dynamic programming"), "Amazon");
/// assert_eq!(extract_company("goldman sachs coding round"), "Goldman Sachs");
/// assert_eq!(extract_company("binary tree traversal"), "General");
/// ```
pub fn extract_company(query: &str) -> String {
    let lowered = query.to_lowercase();
    KNOWN_COMPANIES
        .iter()
        .find(|company| lowered.contains(*company))
        .map(|company| title_case(company))
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string())
}

/// Capitalize each whitespace-separated word, lowercasing the rest.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
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

/// True for blank values and the stock "no company" answers.
pub fn is_placeholder(company: &str) -> bool {
    let trimmed = company.trim();
    trimmed.is_empty() || PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p))
}
