//! URL slug derivation from a brand name.
//!
//! The function is total: any input produces a non-empty slug.

/// Fixed Cyrillic-to-Latin transliteration table (lowercase forms; input is
/// lowercased before lookup).
const CYRILLIC: &[(char, &str)] = &[
    ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"),
    ('е', "e"), ('ё', "e"), ('ж', "zh"), ('з', "z"), ('и', "i"),
    ('й', "y"), ('к', "k"), ('л', "l"), ('м', "m"), ('н', "n"),
    ('о', "o"), ('п', "p"), ('р', "r"), ('с', "s"), ('т', "t"),
    ('у', "u"), ('ф', "f"), ('х', "kh"), ('ц', "ts"), ('ч', "ch"),
    ('ш', "sh"), ('щ', "shch"), ('ъ', ""), ('ы', "y"), ('ь', ""),
    ('э', "e"), ('ю', "yu"), ('я', "ya"), ('і', "i"), ('ї', "yi"),
    ('є', "ye"), ('ґ', "g"),
];

const MAX_SLUG_CHARS: usize = 50;

/// Fallback for inputs that leave nothing usable.
const FALLBACK: &str = "site";

fn transliterate(c: char) -> Option<&'static str> {
    CYRILLIC.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}

/// Unicode combining marks (diacritics left over after decomposition).
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{0483}'..='\u{0489}' | '\u{20D0}'..='\u{20FF}')
}

/// Derive a URL slug: transliterate Cyrillic, strip combining marks,
/// lowercase, collapse runs of anything outside `[a-z0-9]` into single
/// hyphens, trim hyphens, cap at 50 code points. Empty results fall back
/// to `"site"`.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if is_combining_mark(c) {
            continue;
        }
        let mapped: String = match transliterate(c) {
            Some(latin) => latin.to_string(),
            None => c.to_string(),
        };
        for m in mapped.chars() {
            if m.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(m);
            } else {
                pending_hyphen = true;
            }
        }
    }

    let capped: String = out.chars().take(MAX_SLUG_CHARS).collect();
    let trimmed = capped.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}
