use deunicode::deunicode;

/// Derive a URL-safe slug from a display name.
///
/// Transliterates to ASCII, lowercases, drops commas between digits
/// (`1,000` -> `1000`) and collapses every other run of non-alphanumerics,
/// apostrophes included, into one `-`. Leading and trailing dashes are
/// trimmed, so `"Men's Home Jersey (2024)"` becomes `"men-s-home-jersey-2024"`.
/// Slugs already stored by the storefront's earlier tooling follow these rules.
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input);
    let chars: Vec<char> = ascii.chars().collect();
    let mut slug = String::with_capacity(chars.len());
    let mut last_dash = false;
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
            continue;
        }
        let digit_comma = ch == ','
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
        if digit_comma {
            continue;
        }
        if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}
