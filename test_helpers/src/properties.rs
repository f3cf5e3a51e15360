//! Builders for `.properties` fixtures.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Returns the resource file name for `base`, optionally for `environment`.
///
/// # Examples
///
/// ```
/// use discovery_bootstrap_test_helpers::properties::resource_file_name;
///
/// assert_eq!(resource_file_name("eureka-client", None), "eureka-client.properties");
/// assert_eq!(
///     resource_file_name("eureka-client", Some("prod")),
///     "eureka-client-prod.properties"
/// );
/// ```
#[must_use]
pub fn resource_file_name(base: &str, environment: Option<&str>) -> String {
    environment.map_or_else(
        || format!("{base}.properties"),
        |env| format!("{base}-{env}.properties"),
    )
}

/// Renders `pairs` as `.properties` text, escaping separators and
/// backslashes so each pair reads back verbatim.
#[must_use]
pub fn render(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}\n", escape(key, true), escape(value, false)))
        .collect()
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            other => out.push(other),
        }
    }
    out
}

/// Writes `pairs` to `dir/file_name` and returns the written path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_resource(
    dir: &Utf8Path,
    file_name: &str,
    pairs: &[(&str, &str)],
) -> Result<Utf8PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, render(pairs)).with_context(|| format!("write fixture {path}"))?;
    Ok(path)
}
