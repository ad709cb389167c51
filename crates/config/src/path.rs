use itertools::Itertools;

/// Format a user-visible title out of a file or route name.
///
/// Underscores and hyphens become spaces and each word gets an upper-case first letter; the
/// rest of the word is left alone, so `my_iOS-app` becomes `My IOS App`.
pub fn titleize<S: AsRef<str>>(name: S) -> String {
    titleize_str(name.as_ref())
}

fn titleize_str(name: &str) -> String {
    name.split(['_', '-', ' '])
        .map(title_case)
        .join(" ")
}

/// Upper-case the first letter of a single word
fn title_case(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().chain(c).collect(),
    }
}

pub fn split_ext(name: &str) -> (&str, Option<&str>) {
    name.rsplit_once('.')
        .filter(|(n, _)| !n.is_empty())
        .map(|(n, e)| (n, Some(e)))
        .unwrap_or((name, None))
}

/// The file name without its extension.
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    split_ext(name).0
}
