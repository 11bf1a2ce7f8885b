//! Text matching used by the search operations.
//!
//! Everything here is pure: the storage layer loads rows and hands them to
//! these functions, which decide what survives and in which order.

use crate::model::Item;
use std::collections::HashSet;

/// Split a query into lowercase tokens on whitespace.
#[must_use]
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Case-insensitive literal substring test.
///
/// `needle` must already be lowercase.
#[must_use]
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Whether a project name matches a (lowercase) search needle.
#[must_use]
pub fn name_matches(name: &str, needle: &str) -> bool {
    contains_folded(name, needle)
}

/// Whether a single token matches an item's title or due day.
#[must_use]
pub fn item_matches(item: &Item, token: &str) -> bool {
    contains_folded(&item.title, token)
        || item
            .due_day_string()
            .is_some_and(|day| day.contains(token))
}

/// Keep the items matched by any token.
///
/// Items are collected token by token, so an item first matched by the
/// second token sorts after every match of the first. Repeats are dropped by
/// `id`, keeping the first occurrence.
#[must_use]
pub fn filter_items(items: &[Item], tokens: &[String]) -> Vec<Item> {
    let matched = tokens
        .iter()
        .flat_map(|token| items.iter().filter(move |item| item_matches(item, token)));
    dedup_by_id(matched)
}

/// Drop repeated items by `id`, preserving first-seen order.
#[must_use]
pub fn dedup_by_id<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: i64, title: &str, due: Option<(i32, u32, u32)>) -> Item {
        Item {
            id,
            project_id: 1,
            is_done: false,
            title: title.to_string(),
            due_date: due.map(|(y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap()
            }),
        }
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  Milk\tBANK  "), vec!["milk", "bank"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_item_matches_title_and_date() {
        let milk = item(1, "Buy milk", Some((2024, 1, 15)));

        assert!(item_matches(&milk, "milk"));
        assert!(item_matches(&milk, "buy m"));
        assert!(item_matches(&milk, "2024-01"));
        assert!(!item_matches(&milk, "09:00"));
        assert!(!item_matches(&milk, "bank"));
    }

    #[test]
    fn test_undated_item_matches_title_only() {
        let undated = item(1, "Someday", None);
        assert!(!item_matches(&undated, "none"));
        assert!(item_matches(&undated, "some"));
    }

    #[test]
    fn test_filter_items_dedups_in_first_seen_order() {
        let items = vec![
            item(1, "Buy milk", Some((2024, 1, 15))),
            item(2, "Call bank", Some((2024, 2, 1))),
            item(3, "Walk dog", None),
        ];

        // "bank" matches item 2 first, "2024" then matches 1 and 2 again
        let tokens = tokenize("bank 2024");
        let ids: Vec<i64> = filter_items(&items, &tokens).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_filter_items_without_tokens_is_empty() {
        let items = vec![item(1, "Buy milk", None)];
        assert!(filter_items(&items, &[]).is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let items = vec![item(1, "Fix a.b", None), item(2, "Fix axb", None)];
        let ids: Vec<i64> = filter_items(&items, &tokenize("a.b"))
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }
}
