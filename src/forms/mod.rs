pub mod collections;
pub mod custom_fields;
pub mod images;
pub mod pages;
pub mod products;
pub mod settings;

/// Maximum length shared by titles, names and other single-line fields.
pub(crate) const TEXT_MAX_LEN: u64 = 255;

/// Collapses whitespace runs into single spaces and drops control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitizes each line and squeezes blank line runs into one.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        if line.is_empty() {
            if previous_empty {
                continue;
            }
            previous_empty = true;
        } else {
            previous_empty = false;
        }
        result.push(line);
    }

    result.join("\n")
}

/// Builds a URL segment from free text: lowercase alphanumerics separated by
/// single dashes.
pub(crate) fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Whether `slug` is usable as a single URL segment.
pub(crate) fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
}

/// Uses the submitted slug when present, otherwise derives one from `title`.
pub(crate) fn resolve_slug(slug: Option<&str>, title: &str) -> String {
    match slug.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_lowercase(),
        None => slugify(title),
    }
}

/// Parses an optional positive identifier. Blank input means "none"; the
/// offending text is returned when it is not a number.
pub(crate) fn parse_optional_id(value: Option<&str>) -> Result<Option<i32>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => match trimmed.parse::<i32>() {
            Ok(parsed) if parsed > 0 => Ok(Some(parsed)),
            _ => Err(trimmed.to_string()),
        },
    }
}
