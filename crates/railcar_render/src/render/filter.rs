//! Car filter evaluation and memoization
//!
//! Whitelist/blacklist expressions select which cars of a multi-car train a
//! rule applies to. Each comma-separated token is either an absolute
//! 1-indexed car number (negative indexing from the rear via
//! `n == current − total`) or a modulo pattern `%m+a`. Absolute matches must
//! always win over periodic rules ("every 4th car except car 7"), hence the
//! strict strength ordering absolute > modulo > default.

use std::collections::HashMap;

/// Match strength of an absolute car-number token
const STRENGTH_ABSOLUTE: u8 = 3;
/// Match strength of a modulo pattern token
const STRENGTH_MODULO: u8 = 2;
/// Baseline strength of a blank filter list (matches everything)
const STRENGTH_DEFAULT: u8 = 1;

/// Evaluate one filter list against a car position
///
/// Returns the maximum strength achieved. A blank list (no non-empty tokens)
/// is the baseline match; malformed tokens are ignored without error. An
/// absolute match short-circuits the remaining tokens.
pub fn filter_strength(list: &str, current_car: usize, total_cars: usize) -> u8 {
    let current = current_car as i64;
    let total = total_cars as i64;

    let mut strength = 0;
    let mut any_token = false;
    for token in list.split(',').filter(|token| !token.is_empty()) {
        any_token = true;
        if token.contains('%') {
            let mut halves = token.split('+');
            let multiple = halves
                .next()
                .unwrap_or("")
                .replace('%', "")
                .parse::<i64>();
            let additional = halves.next().map_or(Ok(0), str::parse::<i64>);
            if let (Ok(multiple), Ok(additional)) = (multiple, additional) {
                if multiple != 0 && (current + 1 + additional) % multiple == 0 {
                    strength = STRENGTH_MODULO;
                }
            }
        } else if let Ok(car) = token.parse::<i64>() {
            if car == current + 1 || car == current - total {
                return STRENGTH_ABSOLUTE;
            }
        }
    }

    if any_token {
        strength
    } else {
        STRENGTH_DEFAULT
    }
}

/// Memoized whitelist/blacklist skip decisions
///
/// Keyed by the full (total, car, whitelist, blacklist) tuple; entries are
/// never evicted. The key space is bounded by realistic car-count and
/// filter-string combinations per descriptor, so the map stays small for the
/// descriptor's lifetime.
#[derive(Debug, Default)]
pub struct FilterCache {
    entries: HashMap<String, bool>,
    misses: usize,
}

impl FilterCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the rule is skipped for this car, evaluating at most once per
    /// distinct (total, car, whitelist, blacklist) tuple
    pub fn should_skip(
        &mut self,
        whitelist: &str,
        blacklist: &str,
        current_car: usize,
        total_cars: usize,
    ) -> bool {
        let key = format!("{total_cars}|{current_car}|{whitelist}|{blacklist}");
        if let Some(&skip) = self.entries.get(&key) {
            return skip;
        }

        self.misses += 1;
        let skip = filter_strength(blacklist, current_car, total_cars)
            > filter_strength(whitelist, current_car, total_cars);
        self.entries.insert(key, skip);
        skip
    }

    /// Number of evaluations that missed the cache (diagnostic)
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of cached decisions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no decision has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
