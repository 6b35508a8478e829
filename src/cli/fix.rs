//! `--fix` list resolution.
//!
//! The list is read left to right. `all` resets it to the standard
//! categories, `none` empties it, and any category name is added at the
//! front, so `bases,gaps` resolves to `[gaps, bases]`. Experimental
//! categories are accepted with a warning.

use tracing::warn;

use crate::cli::ConfigError;
use crate::core::config::FixList;
use crate::core::types::FixCategory;

/// Resolve a comma-separated `--fix` value, warning about experimental
/// categories
///
/// # Errors
///
/// Returns `ConfigError::UnknownFixCategory` naming the first token that is
/// neither a category nor `all`/`none`.
pub fn resolve_fix_list(spec: &str) -> Result<FixList, ConfigError> {
    let (fixes, experimental) = read_fix_list(spec)?;
    warn_experimental(&experimental);
    Ok(fixes)
}

/// Resolve a `--fix` value without logging. Also returns the experimental
/// categories named along the way, in the order given.
///
/// A single trailing empty token (`bases,`) is dropped. Any other empty token
/// is rejected like an unknown name.
pub(crate) fn read_fix_list(spec: &str) -> Result<(FixList, Vec<FixCategory>), ConfigError> {
    let mut tokens: Vec<&str> = spec.split(',').map(str::trim).collect();
    if tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    let mut fixes = FixList::empty();
    let mut experimental = Vec::new();

    for token in tokens {
        match token.to_lowercase().as_str() {
            "all" => fixes = FixList::standard(),
            "none" => fixes = FixList::empty(),
            name => {
                let category = FixCategory::parse(name)
                    .ok_or_else(|| ConfigError::UnknownFixCategory(token.to_string()))?;
                if category.is_experimental() {
                    experimental.push(category);
                }
                fixes.prepend(category);
            }
        }
    }

    Ok((fixes, experimental))
}

pub(crate) fn warn_experimental(categories: &[FixCategory]) {
    for category in categories {
        warn!("Experimental fix option: {category}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FixCategory::{Bases, Breaks, Gaps, Local, Novel};

    fn resolve(spec: &str) -> Vec<FixCategory> {
        resolve_fix_list(spec).unwrap().as_slice().to_vec()
    }

    #[test]
    fn test_all_is_standard_set() {
        assert_eq!(resolve("all"), vec![Bases, Gaps, Local]);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(resolve("none").is_empty());
    }

    #[test]
    fn test_categories_are_prepended() {
        assert_eq!(resolve("bases,gaps"), vec![Gaps, Bases]);
        assert_eq!(resolve("local,bases,gaps"), vec![Gaps, Bases, Local]);
    }

    #[test]
    fn test_directives_replace_accumulator() {
        assert_eq!(resolve("bases,all"), vec![Bases, Gaps, Local]);
        assert_eq!(resolve("all,none"), Vec::<FixCategory>::new());
        assert_eq!(resolve("gaps,none,local"), vec![Local]);
        assert_eq!(resolve("all,novel"), vec![Novel, Bases, Gaps, Local]);
    }

    #[test]
    fn test_experimental_categories_accepted() {
        assert_eq!(resolve("novel,breaks"), vec![Breaks, Novel]);
    }

    #[test]
    fn test_duplicates_ignored() {
        assert_eq!(resolve("gaps,bases,gaps"), vec![Bases, Gaps]);
    }

    #[test]
    fn test_tokens_trimmed_and_case_insensitive() {
        assert_eq!(resolve(" Bases , GAPS "), vec![Gaps, Bases]);
        assert_eq!(resolve("bases,"), vec![Bases]);
    }

    #[test]
    fn test_empty_tokens_are_fatal() {
        for spec in ["", " ", ",bases", "bases,,gaps", "bases,,"] {
            let err = resolve_fix_list(spec).unwrap_err();
            assert!(
                matches!(err, ConfigError::UnknownFixCategory(ref t) if t.is_empty()),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_experimental_categories_reported() {
        let (fixes, experimental) = read_fix_list("breaks,bases,novel").unwrap();
        assert_eq!(fixes.as_slice(), &[Novel, Bases, Breaks]);
        assert_eq!(experimental, vec![Breaks, Novel]);
    }

    #[test]
    fn test_unknown_category_is_fatal() {
        let err = resolve_fix_list("bogus").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFixCategory(ref t) if t == "bogus"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("bogus"));

        assert!(resolve_fix_list("bases,snps,gaps").is_err());
    }
}
