//! # Error Suggestions
//!
//! Helper functions for generating error messages with hints. Errors at the
//! CLI boundary should tell users what went wrong AND how to fix it, so the
//! helpers here attach concrete next steps and did-you-mean suggestions.

use std::path::Path;

use crate::hooks;

/// Generate an error for when the settings file is not found.
///
/// Includes hints about:
/// - Creating a settings document
/// - Using the --settings flag
pub fn settings_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Settings file not found: {path}\n\n\
         hint: Create a settings.json with 'sync_folder' and 'repos' entries\n\
         hint: Use --settings to point at a document elsewhere (.json, .yaml and .yml are accepted)",
        path = path.display()
    )
}

/// Generate an error for a repository key that is not configured.
///
/// Includes the configured keys and, when one is close enough, a
/// did-you-mean suggestion.
pub fn unknown_repo_key(key: &str, configured: &[&str]) -> anyhow::Error {
    let suggestion = find_similar(key, configured);
    let did_you_mean = suggestion
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown repository key: {key}{did_you_mean}\n\n\
         Configured repositories are: {keys}\n\
         hint: Run 'repo-sync info' to inspect the configured repositories",
        keys = configured.join(", ")
    )
}

/// Suggest a known hook name close to `name`, if any.
pub fn similar_hook_name(name: &str) -> Option<&'static str> {
    find_similar(name, hooks::HOOK_NAMES)
}

/// Suggest a known extension point close to `point`, if any.
pub fn similar_extension_point(point: &str) -> Option<&'static str> {
    find_similar(point, hooks::EXTENSION_POINTS)
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub(crate) fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein edit distance, two rows at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
