//! Transliterating slugify for note titles.
//!
//! Titles are mostly written in Cyrillic, so a plain ASCII filter would throw
//! the whole title away. Instead the title is lowercased, separators are
//! collapsed into single hyphens, and every Cyrillic letter is replaced by its
//! Latin transliteration: `"Новый заголовок"` becomes `"novyij-zagolovok"`.

/// Maximum length of a stored slug, in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Latin spelling of a lowercase Cyrillic letter. `None` for anything else.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'ї' | 'ы' => "yi",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Build a URL-safe slug from arbitrary text.
///
/// The result only contains `[a-z0-9-]`, never starts or ends with a hyphen
/// and may be empty when the input has no usable characters. It is not
/// truncated; callers storing it cut it to [`MAX_SLUG_LEN`].
pub fn slugify(input: &str) -> String {
    let lowered = input
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");

    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.chars() {
        if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
            continue;
        }
        let mut buf = [0; 4];
        let piece = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            &*c.encode_utf8(&mut buf)
        } else {
            match transliterate(c) {
                Some(latin) => latin,
                None => continue,
            }
        };
        if piece.is_empty() {
            continue;
        }
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.push_str(piece);
    }
    out
}

/// `slugify` cut down to the length a note slug may have.
pub fn slugify_truncated(input: &str) -> String {
    let slug = slugify(input);
    match slug.char_indices().nth(MAX_SLUG_LEN) {
        Some((idx, _)) => slug[..idx].to_owned(),
        None => slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterates_cyrillic_title() {
        assert_eq!(slugify("Новый заголовок"), "novyij-zagolovok");
        assert_eq!(slugify("Заголовок"), "zagolovok");
        assert_eq!(slugify("Щука и ёж"), "schuka-i-yozh");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("  Hello -- big   World "), "hello-big-world");
        assert_eq!(slugify("tea & cake"), "tea-and-cake");
        assert_eq!(slugify("a &amp; b"), "a-and-b");
    }

    #[test]
    fn test_drops_unknown_characters() {
        assert_eq!(slugify("Rust 2024!"), "rust-2024");
        assert_eq!(slugify("snake_case"), "snakecase");
        assert_eq!(slugify("Объём"), "obyom");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_truncates_to_max_length() {
        let title = "а".repeat(MAX_SLUG_LEN + 20);
        let slug = slugify_truncated(&title);
        assert_eq!(slug.chars().count(), MAX_SLUG_LEN);
        assert_eq!(slugify_truncated("short"), "short");
    }
}
