//! Removal of repeated CLI inputs.
//!
//! The result is a [`BTreeSet`]: membership is all that matters for
//! correctness, and sorted iteration keeps filename generation and test
//! fixtures reproducible across runs. The caller's input order is not kept.

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::error::{ExportError, Result};
use crate::verbose::Logger;

/// Deduplicates `items`, reporting what changed through `logger`.
///
/// `argument` names the dimension in log lines and in the
/// [`MissingRequiredArgument`](ExportError::MissingRequiredArgument) error
/// raised when `items` is empty and `required` is set. An empty optional
/// dimension yields an empty set.
///
/// # Example
///
/// ```rust
/// use exportpack::core::dedup::deduplicate;
/// use exportpack::verbose::Logger;
///
/// let states = deduplicate("state", &["NY", "OH", "NY"], true, &Logger::silent()).unwrap();
/// assert_eq!(states.into_iter().collect::<Vec<_>>(), vec!["NY", "OH"]);
///
/// let none: &[&str] = &[];
/// assert!(deduplicate("state", none, true, &Logger::silent()).is_err());
/// ```
pub fn deduplicate<T>(
    argument: &str,
    items: &[T],
    required: bool,
    logger: &Logger,
) -> Result<BTreeSet<T>>
where
    T: Ord + Clone + Debug,
{
    if items.is_empty() {
        if required {
            logger.high(format!("\tMissing required {argument}."));
            return Err(ExportError::missing_argument(argument));
        }
        logger.high(format!("\tSkipping {argument}. Nothing supplied."));
        return Ok(BTreeSet::new());
    }

    logger.high(format!("\t[In]: {:?}", items));
    let unique: BTreeSet<T> = items.iter().cloned().collect();
    let removed = items.len() - unique.len();

    let mut response = format!(
        "\t[Out]: {:?} ({} -> {}).",
        unique,
        items.len(),
        unique.len()
    );
    if removed == 0 {
        response.push_str(" No duplicates to remove.");
    } else {
        response.push_str(&format!(" Removed {removed} duplicate(s)."));
    }
    logger.high(response);

    Ok(unique)
}
