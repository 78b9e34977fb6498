//! Version ordering for Maven-style version strings
//!
//! Maven versions are not semantic versions: `1.1-beta-2`, `2.0.0.RELEASE`
//! and `1.2.1-SNAPSHOT` all occur in practice. [`MavenVersionComparator`]
//! splits a version into numeric and qualifier items and compares them item
//! by item, padding the shorter side with "null" items (`0` or the release
//! qualifier).

use std::cmp::Ordering;

/// Total order over version strings
pub trait VersionComparator: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Sort ascending; equal versions keep their relative order
    fn sort(&self, versions: &mut [String]) {
        versions.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Digits with leading zeros removed
    Number(String),
    /// Lowercased qualifier
    Qualifier(String),
}

impl Item {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Item::Number(trimmed.to_string())
    }

    fn qualifier(text: &str) -> Self {
        Item::Qualifier(text.to_ascii_lowercase())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Number(digits) => digits.is_empty(),
            Item::Qualifier(q) => qualifier_rank(q) == RELEASE_RANK,
        }
    }
}

const RELEASE_RANK: u8 = 5;

fn qualifier_rank(qualifier: &str) -> u8 {
    match qualifier {
        "alpha" | "a" => 0,
        "beta" | "b" => 1,
        "milestone" | "m" => 2,
        "rc" | "cr" => 3,
        "snapshot" => 4,
        "" | "ga" | "final" | "release" => RELEASE_RANK,
        "sp" => 6,
        _ => 7,
    }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    let (rank_a, rank_b) = (qualifier_rank(a), qualifier_rank(b));
    match rank_a.cmp(&rank_b) {
        Ordering::Equal if rank_a == 7 => a.cmp(b),
        other => other,
    }
}

fn compare_items(a: Option<&Item>, b: Option<&Item>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(item), None) => compare_to_null(item),
        (None, Some(item)) => compare_to_null(item).reverse(),
        (Some(Item::Number(x)), Some(Item::Number(y))) => compare_numbers(x, y),
        (Some(Item::Qualifier(x)), Some(Item::Qualifier(y))) => compare_qualifiers(x, y),
        (Some(Item::Number(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
        (Some(Item::Qualifier(_)), Some(Item::Number(_))) => Ordering::Less,
    }
}

fn compare_to_null(item: &Item) -> Ordering {
    match item {
        Item::Number(digits) if digits.is_empty() => Ordering::Equal,
        Item::Number(_) => Ordering::Greater,
        Item::Qualifier(q) => qualifier_rank(q).cmp(&RELEASE_RANK),
    }
}

/// Drop trailing null items back to `floor`
fn trim_nulls(items: &mut Vec<Item>, floor: usize) {
    while items.len() > floor && items.last().is_some_and(Item::is_null) {
        items.pop();
    }
}

fn parse(version: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut segment_start = 0;
    let mut token = String::new();
    let mut token_is_digit = false;

    let flush = |token: &mut String, is_digit: bool, items: &mut Vec<Item>| {
        if token.is_empty() {
            return;
        }
        if is_digit {
            items.push(Item::number(token));
        } else {
            // A qualifier never follows a null item, whatever the separator
            trim_nulls(items, 0);
            items.push(Item::qualifier(token));
        }
        token.clear();
    };

    for ch in version.trim().chars() {
        match ch {
            '.' => flush(&mut token, token_is_digit, &mut items),
            '-' | '_' => {
                flush(&mut token, token_is_digit, &mut items);
                trim_nulls(&mut items, segment_start);
                segment_start = items.len();
            }
            c => {
                let is_digit = c.is_ascii_digit();
                if !token.is_empty() && is_digit != token_is_digit {
                    flush(&mut token, token_is_digit, &mut items);
                    trim_nulls(&mut items, segment_start);
                    segment_start = items.len();
                }
                token_is_digit = is_digit;
                token.push(c);
            }
        }
    }
    flush(&mut token, token_is_digit, &mut items);
    trim_nulls(&mut items, 0);
    items
}

/// Maven ordering: `alpha < beta < milestone < rc < snapshot < release < sp`
///
/// Numbers compare numerically and rank above any qualifier at the same
/// position. Unknown qualifiers rank above `sp` and compare lexically.
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenVersionComparator;

impl MavenVersionComparator {
    pub fn new() -> Self {
        Self
    }
}

impl VersionComparator for MavenVersionComparator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let (left, right) = (parse(a), parse(b));
        let len = left.len().max(right.len());
        for i in 0..len {
            let ordering = compare_items(left.get(i), right.get(i));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
