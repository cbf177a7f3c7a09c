use std::collections::BTreeSet;

use itertools::Itertools;
use regex::Regex;

/// Pattern that matches every name.
pub const MATCH_ALL: &str = "*";

// Compile a `|`-separated list of glob alternatives into anchored, case-insensitive
// regexes. Only `*` is special, everything else matches literally.
fn compile_pattern(pattern: &str) -> Vec<Regex> {
    pattern
        .split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .filter_map(|alt| {
            let body = alt.split('*').map(regex::escape).join(".*");
            Regex::new(&format!("(?i)^{body}$")).ok()
        })
        .collect()
}

/// Filter a list of names by a glob pattern. The result is sorted and de-duplicated.
pub fn filter_pattern<I, S>(names: I, pattern: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let regexes = compile_pattern(pattern);

    names
        .into_iter()
        .filter(|name| regexes.iter().any(|r| r.is_match(name.as_ref())))
        .map(|name| name.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
