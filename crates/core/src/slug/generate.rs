//! Slug derivation from movie titles.

use uuid::Uuid;

/// Maximum length of a freshly generated slug, in bytes.
///
/// Uniqueness suffixes are appended after this cap is applied, so a stored
/// slug may end up slightly longer.
pub const MAX_SLUG_LEN: usize = 50;

/// Derive a URL-safe slug from a movie title.
///
/// Lowercases the title, strips every character outside `[a-z0-9]`,
/// whitespace and hyphens, then collapses whitespace and hyphen runs into
/// single hyphens with none at either end. Results longer than
/// [`MAX_SLUG_LEN`] are cut back to the last complete word that fits; a
/// single oversized word is hard-cut at the limit.
///
/// Returns an empty string when the title contains no alphanumeric
/// characters at all. Callers are expected to fall back to
/// [`fallback_slug`] in that case.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_LEN + 1));
    let mut last_was_hyphen = true; // suppresses a leading hyphen

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
        // everything else is dropped without leaving a separator
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    truncate_on_word_boundary(&slug).to_string()
}

/// Slug of last resort for titles that slugify to nothing.
///
/// With a known record id the result is stable (`movie-42`). Without one, a
/// short random suffix is drawn so that concurrent creations do not all
/// contend on the same base.
pub fn fallback_slug(movie_id: Option<i64>) -> String {
    match movie_id {
        Some(id) => format!("movie-{}", id),
        None => {
            let uuid = Uuid::new_v4().simple().to_string();
            format!("movie-{}", &uuid[..8])
        }
    }
}

fn truncate_on_word_boundary(slug: &str) -> &str {
    if slug.len() <= MAX_SLUG_LEN {
        return slug;
    }

    // slugify only ever pushes ASCII, so byte indexing is safe here
    let head = &slug[..MAX_SLUG_LEN];
    if slug.as_bytes()[MAX_SLUG_LEN] == b'-' {
        // the cut already lands on a word boundary
        return head;
    }

    match head.rfind('-') {
        Some(idx) => &head[..idx],
        None => head,
    }
}
