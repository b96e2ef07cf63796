//! Field-specific text standardization.
//!
//! Runs only on string-typed, already-normalized values and only for
//! recognized canonical field names; everything else passes through
//! unchanged.

use std::sync::OnceLock;

use regex::Regex;

/// Branch-name abbreviation fixes applied after title-casing.
const BRANCH_FIXES: [(&str, &str); 6] = [
    (r"\bYmca\b", "YMCA"),
    (r"\bHq\b", "HQ"),
    (r"\bNw\b", "NW"),
    (r"\bNe\b", "NE"),
    (r"\bSw\b", "SW"),
    (r"\bSe\b", "SE"),
];

fn branch_fixes() -> &'static Vec<(Regex, &'static str)> {
    static FIXES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    FIXES.get_or_init(|| {
        BRANCH_FIXES
            .iter()
            .map(|(pattern, replacement)| {
                (Regex::new(pattern).expect("static branch pattern"), *replacement)
            })
            .collect()
    })
}

fn tag_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^PRJ[-\s_]*").expect("static tag pattern"))
}

/// Apply the standardizer for a recognized field; pass through otherwise.
pub fn standardize_field(field: &str, value: &str) -> String {
    match field {
        "branch" => standardize_branch(value),
        "project_tag" => standardize_project_tag(value),
        "department" => title_case(value),
        _ => value.to_string(),
    }
}

fn standardize_branch(value: &str) -> String {
    let mut result = title_case(value);
    for (pattern, replacement) in branch_fixes() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Normalize the project-tag prefix: `prj 42`, `prj_42`, and `PRJ-42` all
/// render as `PRJ-42`. Tags without the prefix are left alone apart from
/// casing and separator cleanup.
fn standardize_project_tag(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    let collapsed = upper
        .split(|ch: char| ch.is_whitespace() || ch == '_' || ch == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if let Some(found) = tag_prefix().find(&collapsed) {
        let rest = &collapsed[found.end()..];
        if rest.is_empty() {
            collapsed
        } else {
            format!("PRJ-{rest}")
        }
    } else {
        collapsed
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_casing_and_abbreviations() {
        assert_eq!(standardize_field("branch", "downtown ymca"), "Downtown YMCA");
        assert_eq!(standardize_field("branch", "nw  community center"), "NW Community Center");
        assert_eq!(standardize_field("branch", "hq"), "HQ");
    }

    #[test]
    fn project_tag_prefix_normalized() {
        assert_eq!(standardize_field("project_tag", "prj 42"), "PRJ-42");
        assert_eq!(standardize_field("project_tag", "prj_42"), "PRJ-42");
        assert_eq!(standardize_field("project_tag", "PRJ-42"), "PRJ-42");
        assert_eq!(standardize_field("project_tag", "outreach"), "OUTREACH");
    }

    #[test]
    fn unrecognized_fields_pass_through() {
        assert_eq!(standardize_field("assignee", "ada LOVELACE"), "ada LOVELACE");
        assert_eq!(standardize_field("notes", "  as-is "), "  as-is ");
    }
}
