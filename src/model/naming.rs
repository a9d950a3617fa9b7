// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Name validation and display-name helpers shared by the store and editors.

use std::sync::OnceLock;

use regex::Regex;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier pattern compiles")
    })
}

/// The name-validity predicate applied before any mutation that introduces a
/// name: starts with a letter or underscore, continues with letters, digits,
/// or underscores, no surrounding whitespace.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.trim() != name {
        return false;
    }
    identifier_pattern().is_match(name)
}

/// Picks the first free name by appending (or continuing) a numeric suffix:
/// `Method` -> `Method1` -> `Method2`, and `Method2` -> `Method3`.
pub fn unique_name(expected: &str, existing: &[&str]) -> String {
    let trimmed_end = expected.trim_end_matches(|c: char| c.is_ascii_digit());
    let (base, start) = if trimmed_end.len() == expected.len() {
        (expected, 0u64)
    } else {
        let suffix = &expected[trimmed_end.len()..];
        (trimmed_end, suffix.parse::<u64>().unwrap_or(0))
    };

    let mut index = start;
    loop {
        let candidate = if index == 0 {
            base.to_owned()
        } else {
            format!("{base}{index}")
        };
        if !existing.contains(&candidate.as_str()) {
            return candidate;
        }
        index = index.saturating_add(1);
    }
}

/// Turns an identifier into a display title: `customerId` -> `Customer Id`,
/// `order_line` -> `Order Line`.
pub fn human_title(name: &str) -> String {
    let mut title = String::with_capacity(name.len() + 4);
    let mut start_word = true;
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c == '_' {
            start_word = true;
            prev = None;
            continue;
        }

        let camel_break = c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if (start_word || camel_break) && !title.is_empty() && !title.ends_with(' ') {
            title.push(' ');
        }

        if start_word {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        start_word = false;
        prev = Some(c);
    }

    title
}

#[cfg(test)]
mod tests {
    use super::{human_title, is_valid_name, unique_name};

    #[test]
    fn valid_names_are_identifiers() {
        assert!(is_valid_name("customerId"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name("Order2"));

        assert!(!is_valid_name(""));
        assert!(!is_valid_name(" padded "));
        assert!(!is_valid_name("2fast"));
        assert!(!is_valid_name("has space"));
        assert!(!is_valid_name("dash-case"));
    }

    #[test]
    fn unique_name_appends_the_smallest_free_suffix() {
        assert_eq!(unique_name("Method", &[]), "Method");
        assert_eq!(unique_name("Method", &["Method"]), "Method1");
        assert_eq!(
            unique_name("Method", &["Method", "Method1"]),
            "Method2"
        );
        assert_eq!(unique_name("Method2", &["Method2"]), "Method3");
    }

    #[test]
    fn human_title_splits_camel_case_and_underscores() {
        assert_eq!(human_title("customerId"), "Customer Id");
        assert_eq!(human_title("OrderLine"), "Order Line");
        assert_eq!(human_title("order_line"), "Order Line");
        assert_eq!(human_title("Id"), "Id");
        assert_eq!(human_title(""), "");
    }
}
