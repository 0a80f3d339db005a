//! Environment variable validation
//!
//! Invalid override values are ignored with a logged warning that names the
//! valid values and, when one is close, a suggested correction.

use tracing::warn;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning `None` (with a warning) if it is invalid
    pub fn parse<'v, T, F>(&self, value: &'v str, parser: F) -> Option<T>
    where
        F: Fn(&'v str) -> Option<T>,
    {
        let parsed = parser(value);
        if parsed.is_none() {
            warn!(
                var = self.var_name,
                value,
                valid = %self.valid_values.join(", "),
                suggestion = self.suggest(value),
                "ignoring invalid environment override"
            );
        }
        parsed
    }

    /// Closest valid value within two edits
    pub fn suggest(&self, value: &str) -> Option<&'a str> {
        let input = value.to_lowercase();
        let mut best: Option<(&'a str, usize)> = None;

        for &valid in self.valid_values {
            let dist = levenshtein(&input, valid);
            match best {
                None => best = Some((valid, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((valid, dist)),
                _ => {}
            }
        }

        match best {
            Some((valid, dist)) if dist <= 2 => Some(valid),
            _ => None,
        }
    }
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
