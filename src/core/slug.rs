/// Suggest a collective URL slug from a display name.
///
/// Folds common Latin diacritics to ASCII, drops characters that are not
/// URL friendly, trims surrounding whitespace and collapses every run of
/// whitespace or `-` into a single `-`. Case is kept, and so is a dash at
/// either end ("-abc-" stays "-abc-").
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .chars()
        .flat_map(fold_char)
        .filter(|c| is_allowed(*c))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut in_separator = false;

    for c in folded.trim().chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator {
                slug.push('-');
            }
            in_separator = true;
            continue;
        }
        in_separator = false;
        slug.push(c);
    }

    slug
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '_' | '$' | '*' | '+' | '~' | '.' | '(' | ')' | '\'' | '"' | '!' | '-' | ':' | '@')
}

fn fold_char(c: char) -> Vec<char> {
    let folded: &str = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' => "C",
        'ç' => "c",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ý' | 'Ÿ' => "Y",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        '&' => "and",
        '|' => "or",
        '<' => "less",
        '>' => "greater",
        '%' => "percent",
        _ => return vec![c],
    };
    folded.chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_dashes() {
        assert_eq!(slugify("Open Source Collective"), "Open-Source-Collective");
        assert_eq!(slugify("  babel   -  js "), "babel-js");
    }

    #[test]
    fn test_diacritics_and_symbols() {
        assert_eq!(slugify("Café Crème"), "Cafe-Creme");
        assert_eq!(slugify("R&D / labs"), "RandD-labs");
        assert_eq!(slugify("100% rust"), "100percent-rust");
    }

    #[test]
    fn test_edge_dashes_are_kept() {
        assert_eq!(slugify("-abc-"), "-abc-");
        assert_eq!(slugify(" - abc"), "-abc");
        assert_eq!(slugify("abc -- def--"), "abc-def-");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("###"), "");
    }
}
