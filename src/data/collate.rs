//! Locale-aware ordering for feature names.
//!
//! Names are compared the way a reader scanning an alphabetical list expects:
//! letters are compared case-insensitively with diacritics folded onto their
//! base letter ("Åland" files under A, "Curaçao" next to "Cuba"). Ties fall
//! back to accents, then case (lowercase first), then the raw string, so the
//! order is total and deterministic.

use std::cmp::Ordering;

/// Compares two names in dictionary order
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| secondary_key(a).cmp(secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Sorts names in place in dictionary order
pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| locale_cmp(a, b));
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .flat_map(char::to_lowercase)
        .flat_map(BaseLetters::of)
}

fn secondary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

// lowercase sorts before uppercase
fn tertiary_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

/// Up to two base letters a (lowercase) character folds to
struct BaseLetters {
    letters: [char; 2],
    len: usize,
    pos: usize,
}

impl BaseLetters {
    fn of(c: char) -> Self {
        let (letters, len) = match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => (['a', '\0'], 1),
            'æ' => (['a', 'e'], 2),
            'ç' | 'ć' | 'č' | 'ĉ' => (['c', '\0'], 1),
            'ď' | 'đ' | 'ð' => (['d', '\0'], 1),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => (['e', '\0'], 1),
            'ğ' | 'ģ' => (['g', '\0'], 1),
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => (['i', '\0'], 1),
            'ķ' => (['k', '\0'], 1),
            'ĺ' | 'ļ' | 'ľ' | 'ł' => (['l', '\0'], 1),
            'ñ' | 'ń' | 'ņ' | 'ň' => (['n', '\0'], 1),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => (['o', '\0'], 1),
            'œ' => (['o', 'e'], 2),
            'ŕ' | 'ř' => (['r', '\0'], 1),
            'ś' | 'š' | 'ş' | 'ș' => (['s', '\0'], 1),
            'ß' => (['s', 's'], 2),
            'ť' | 'ţ' | 'ț' => (['t', '\0'], 1),
            'þ' => (['t', 'h'], 2),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => (['u', '\0'], 1),
            'ý' | 'ÿ' => (['y', '\0'], 1),
            'ź' | 'ż' | 'ž' => (['z', '\0'], 1),
            other => ([other, '\0'], 1),
        };
        Self {
            letters,
            len,
            pos: 0,
        }
    }
}

impl Iterator for BaseLetters {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.pos < self.len {
            self.pos += 1;
            Some(self.letters[self.pos - 1])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(locale_cmp("china", "Chile"), Ordering::Greater);
        assert_eq!(locale_cmp("chile", "China"), Ordering::Less);
    }

    #[test]
    fn test_diacritics_fold_to_base_letter() {
        let mut names: Vec<String> = [
            "Zimbabwe",
            "Austria",
            "Curaçao",
            "Åland",
            "Croatia",
            "Côte d'Ivoire",
            "Cuba",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        sort_names(&mut names);
        assert_eq!(
            names,
            vec!["Åland", "Austria", "Côte d'Ivoire", "Croatia", "Cuba", "Curaçao", "Zimbabwe"]
        );
    }

    #[test]
    fn test_ties_are_deterministic() {
        assert_eq!(locale_cmp("Peru", "Perú"), Ordering::Less);
        assert_eq!(locale_cmp("niger", "Niger"), Ordering::Less);
        assert_eq!(locale_cmp("Niger", "Niger"), Ordering::Equal);
    }

    #[test]
    fn test_ligatures_expand() {
        assert_eq!(locale_cmp("Færøerne", "Faeroe"), Ordering::Greater);
        assert_eq!(locale_cmp("Æb", "Aea"), Ordering::Greater);
    }
}
