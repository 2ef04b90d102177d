//! Locale-aware string comparison.
//!
//! The browser build plugs in `Intl.Collator`; everything else (and the
//! fallback when `Intl` is unavailable) uses [`FoldedCollator`].

use std::cmp::Ordering;

pub trait Collator {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<C: Collator + ?Sized> Collator for &C {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        (**self).compare(a, b)
    }
}

impl<C: Collator + ?Sized> Collator for Box<C> {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        (**self).compare(a, b)
    }
}

/// Multi-level comparison in pure Rust.
///
/// Levels, in order: case-folded letters with `ё` weighted as `е`, then `ё`
/// after `е`, then lowercase before uppercase, then raw code points. Only
/// identical strings compare `Equal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldedCollator;

fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
}

fn secondary(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().flat_map(char::to_lowercase).map(|c| c == 'ё')
}

fn tertiary(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

impl Collator for FoldedCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        primary(a)
            .cmp(primary(b))
            .then_with(|| secondary(a).cmp(secondary(b)))
            .then_with(|| tertiary(a).cmp(tertiary(b)))
            .then_with(|| a.cmp(b))
    }
}
