//! On-the-fly generation of output filenames.
//!
//! A [`FilenameRequest`] describes the dimensions of an export run; the
//! generator expands it into the cartesian product of [`FilenameSpec`]s.
//!
//! # Axis order
//!
//! The product is taken over `prefix × tag groups × labels × formats`,
//! row-major: the format varies fastest, then the label, then the tag
//! group. This order is part of the public contract.
//!
//! ```rust
//! use exportpack::core::filename::{FilenameRequest, generate_filenames};
//! use exportpack::verbose::Logger;
//!
//! let request = FilenameRequest::new()
//!     .with_labels(["out"])
//!     .with_formats(["csv", "json"])
//!     .with_tags(["NY", "OH"])
//!     .with_prefix("ns")
//!     .with_separator(".");
//!
//! let names: Vec<String> = generate_filenames(&request, &Logger::silent())
//!     .iter()
//!     .map(|spec| spec.render())
//!     .collect();
//!
//! assert_eq!(
//!     names,
//!     vec!["ns.NY.out.csv", "ns.NY.out.json", "ns.OH.out.csv", "ns.OH.out.json"]
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::verbose::Logger;

/// Label used when no filename label was supplied.
pub const DEFAULT_LABEL: &str = "output";

/// Suffix used when no format was supplied.
pub const DEFAULT_SUFFIX: &str = ".txt";

/// Separator used when none was supplied.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Prefix used when none was supplied. Empty, so it drops out of the name.
pub const DEFAULT_PREFIX: &str = "";

/// Renderable parts of one output filename.
///
/// Built once per combination by [`generate_filenames`] and never mutated
/// afterwards; the fields are private and only readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilenameSpec {
    separator: String,
    prefix: String,
    tags: Vec<String>,
    label: String,
    suffix: String,
}

impl FilenameSpec {
    /// Creates a spec from its parts. `suffix` includes its leading dot.
    pub fn new(
        separator: impl Into<String>,
        prefix: impl Into<String>,
        tags: Vec<String>,
        label: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            separator: separator.into(),
            prefix: prefix.into(),
            tags,
            label: label.into(),
            suffix: suffix.into(),
        }
    }

    /// Renders the filename.
    ///
    /// Empty components are skipped, so an empty prefix does not produce a
    /// leading separator.
    pub fn render(&self) -> String {
        let parts: Vec<&str> = std::iter::once(self.prefix.as_str())
            .chain(self.tags.iter().map(String::as_str))
            .chain(std::iter::once(self.label.as_str()))
            .filter(|part| !part.is_empty())
            .collect();
        parts.join(&self.separator) + &self.suffix
    }

    /// Returns the format key implied by the suffix (`.csv` -> `csv`).
    pub fn format_key(&self) -> &str {
        self.suffix.trim_start_matches('.')
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Display for FilenameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Dimensions to expand into filenames.
///
/// Every dimension may be left empty; [`generate_filenames`] substitutes a
/// single default element so that no axis of the product is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameRequest {
    /// Filename labels (basenames)
    pub labels: Vec<String>,

    /// Format keys or suffixes (`csv` and `.csv` are equivalent)
    pub formats: Vec<String>,

    /// Tag groups; each group contributes all of its tags to one filename
    pub tags: Vec<Vec<String>>,

    /// Filename prefix (namespace)
    pub prefix: Option<String>,

    /// Component separator
    pub separator: Option<String>,
}

impl FilenameRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the tag groups with one group per item (`["NY", "OH"]`
    /// gives two groups).
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(|tag| vec![tag.into()]).collect();
        self
    }

    /// Appends a single tag group made of one tag.
    ///
    /// A lone string is one group, never a sequence of characters.
    #[must_use]
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(vec![tag.into()]);
        self
    }

    /// Appends a tag group made of several tags (`["NY", "new-york"]`).
    #[must_use]
    pub fn add_tag_group<I, S>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.push(group.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Number of filenames [`generate_filenames`] will produce.
    pub fn combinations(&self) -> usize {
        self.labels.len().max(1) * self.formats.len().max(1) * self.tags.len().max(1)
    }
}

/// Turns a format key into a suffix with a leading dot.
fn suffix_for(format: &str) -> String {
    if format.is_empty() {
        DEFAULT_SUFFIX.to_string()
    } else if format.starts_with('.') {
        format.to_string()
    } else {
        format!(".{format}")
    }
}

/// Returns `values`, or a single default element if there are none.
fn or_default<T: Clone>(values: &[T], default: T) -> Vec<T> {
    if values.is_empty() {
        vec![default]
    } else {
        values.to_vec()
    }
}

/// Expands `request` into one [`FilenameSpec`] per combination.
///
/// The result has exactly `labels × formats × tag groups` elements after
/// defaults are applied, in the axis order documented at module level.
/// Each rendered filename is logged at high verbosity.
pub fn generate_filenames(request: &FilenameRequest, logger: &Logger) -> Vec<FilenameSpec> {
    let prefix = request
        .prefix
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PREFIX);
    let separator = request
        .separator
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SEPARATOR);
    let labels = or_default(&request.labels, DEFAULT_LABEL.to_string());
    let suffixes: Vec<String> = or_default(&request.formats, String::new())
        .iter()
        .map(|format| suffix_for(format))
        .collect();
    let tags = or_default(&request.tags, Vec::new());

    let mut filenames = Vec::with_capacity(labels.len() * suffixes.len() * tags.len());
    for group in &tags {
        for label in &labels {
            for suffix in &suffixes {
                filenames.push(FilenameSpec::new(
                    separator,
                    prefix,
                    group.clone(),
                    label.clone(),
                    suffix.clone(),
                ));
            }
        }
    }

    logger.high(format!("\tGenerated {} filename(s):", filenames.len()));
    for filename in &filenames {
        logger.high(format!("\t\t\"{}\"", filename.render()));
    }

    filenames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verbose::{Verbosity, capture};

    fn render_all(request: &FilenameRequest) -> Vec<String> {
        generate_filenames(request, &Logger::silent())
            .iter()
            .map(FilenameSpec::render)
            .collect()
    }

    #[test]
    fn test_render_joins_non_empty_parts() {
        let spec = FilenameSpec::new(".", "ns", vec!["NY".into()], "out", ".csv");
        assert_eq!(spec.render(), "ns.NY.out.csv");

        let spec = FilenameSpec::new("_", "", vec![], "out", ".json");
        assert_eq!(spec.render(), "out.json");

        let spec = FilenameSpec::new("-", "ns", vec!["NY".into(), "new york".into()], "", ".tsv");
        assert_eq!(spec.render(), "ns-NY-new york.tsv");
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = FilenameSpec::new(".", "ns", vec!["NY".into()], "out", ".csv");
        let b = a.clone();
        assert_eq!(a.render(), b.render());
        assert_eq!(a.to_string(), a.render());
    }

    #[test]
    fn test_format_key() {
        let spec = FilenameSpec::new(".", "", vec![], "out", ".csv");
        assert_eq!(spec.format_key(), "csv");
    }

    #[test]
    fn test_two_formats_one_tag() {
        let request = FilenameRequest::new()
            .with_labels(["out"])
            .with_formats(["csv", "json"])
            .with_tags(["NY"])
            .with_prefix("ns")
            .with_separator(".");
        assert_eq!(render_all(&request), vec!["ns.NY.out.csv", "ns.NY.out.json"]);
    }

    #[test]
    fn test_axis_order() {
        let request = FilenameRequest::new()
            .with_labels(["a", "b"])
            .with_formats(["csv", "tsv"])
            .with_tags(["NY", "OH"])
            .with_prefix("p");
        assert_eq!(
            render_all(&request),
            vec![
                "p.NY.a.csv",
                "p.NY.a.tsv",
                "p.NY.b.csv",
                "p.NY.b.tsv",
                "p.OH.a.csv",
                "p.OH.a.tsv",
                "p.OH.b.csv",
                "p.OH.b.tsv",
            ]
        );
    }

    #[test]
    fn test_defaults_fill_empty_dimensions() {
        let names = render_all(&FilenameRequest::new());
        assert_eq!(names, vec!["output.txt"]);
    }

    #[test]
    fn test_empty_prefix_and_separator_use_defaults() {
        let request = FilenameRequest::new()
            .with_labels(["out"])
            .with_formats(["json"])
            .with_prefix("")
            .with_separator("");
        assert_eq!(render_all(&request), vec!["out.json"]);
    }

    #[test]
    fn test_single_tag_is_one_group() {
        let request = FilenameRequest::new().add_tag("NY").with_labels(["out"]);
        let specs = generate_filenames(&request, &Logger::silent());
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].tags(), ["NY".to_string()]);
    }

    #[test]
    fn test_tag_group_contributes_all_tags() {
        let request = FilenameRequest::new()
            .add_tag_group(["NY", "new-york"])
            .with_labels(["out"])
            .with_formats(["csv"]);
        assert_eq!(render_all(&request), vec!["NY.new-york.out.csv"]);
    }

    #[test]
    fn test_with_methods_replace_add_methods_append() {
        let request = FilenameRequest::new()
            .with_labels(["old"])
            .with_labels(["out"])
            .with_formats(["json"])
            .with_formats(["csv"])
            .with_tags(["CA"])
            .with_tags(["NY"])
            .add_tag("OH")
            .add_tag_group(["TX", "texas"]);
        assert_eq!(
            render_all(&request),
            vec!["NY.out.csv", "OH.out.csv", "TX.texas.out.csv"]
        );

        let reset = request.with_tags(["WA"]);
        assert_eq!(render_all(&reset), vec!["WA.out.csv"]);
    }

    #[test]
    fn test_suffix_with_leading_dot_kept() {
        let request = FilenameRequest::new().with_formats([".csv"]);
        assert_eq!(render_all(&request), vec!["output.csv"]);
    }

    #[test]
    fn test_count_matches_product() {
        let request = FilenameRequest::new()
            .with_labels(["a", "b", "c"])
            .with_formats(["csv", "json"])
            .with_tags(["NY", "OH", "CA", "TX"]);
        let specs = generate_filenames(&request, &Logger::silent());
        assert_eq!(specs.len(), 3 * 2 * 4);
        assert_eq!(specs.len(), request.combinations());
    }

    #[test]
    fn test_logs_each_filename_at_high() {
        let request = FilenameRequest::new()
            .with_labels(["out"])
            .with_formats(["csv", "json"]);

        let (logger, lines) = capture(Verbosity::High);
        generate_filenames(&request, &logger);
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Generated 2 filename(s)"));
        assert!(lines[1].contains("\"out.csv\""));
        assert!(lines[2].contains("\"out.json\""));

        let (logger, lines) = capture(Verbosity::Low);
        generate_filenames(&request, &logger);
        assert!(lines.lock().unwrap().is_empty());
    }
}
