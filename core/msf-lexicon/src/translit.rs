//! Latin rendering of lemmas that fall through every relation table.

use std::borrow::Cow;

/// Greek and Cyrillic letters with their usual Latin spelling. Lower case only;
/// upper case input is lowered first.
const LETTERS: &[(char, &str)] = &[
    // Greek
    ('α', "a"), ('ά', "a"), ('β', "v"), ('γ', "g"), ('δ', "d"), ('ε', "e"), ('έ', "e"),
    ('ζ', "z"), ('η', "i"), ('ή', "i"), ('θ', "th"), ('ι', "i"), ('ί', "i"), ('ϊ', "i"),
    ('κ', "k"), ('λ', "l"), ('μ', "m"), ('ν', "n"), ('ξ', "x"), ('ο', "o"), ('ό', "o"),
    ('π', "p"), ('ρ', "r"), ('σ', "s"), ('ς', "s"), ('τ', "t"), ('υ', "y"), ('ύ', "y"),
    ('φ', "f"), ('χ', "ch"), ('ψ', "ps"), ('ω', "o"), ('ώ', "o"),
    // Cyrillic
    ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"), ('е', "e"), ('ё', "e"),
    ('ж', "zh"), ('з', "z"), ('и', "i"), ('й', "j"), ('к', "k"), ('л', "l"), ('м', "m"),
    ('н', "n"), ('о', "o"), ('п', "p"), ('р', "r"), ('с', "s"), ('т', "t"), ('у', "u"),
    ('ф', "f"), ('х', "kh"), ('ц', "ts"), ('ч', "ch"), ('ш', "sh"), ('щ', "shch"),
    ('ъ', ""), ('ы', "y"), ('ь', ""), ('э', "e"), ('ю', "ju"), ('я', "ja"),
];

fn latin_for(c: char) -> Option<&'static str> {
    LETTERS
        .iter()
        .find(|(letter, _)| *letter == c)
        .map(|(_, latin)| *latin)
}

/// Rewrites Greek and Cyrillic letters in Latin script. Anything else is kept.
pub fn transliterate(text: &str) -> Cow<'_, str> {
    if !text.chars().flat_map(char::to_lowercase).any(|c| latin_for(c).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let upper = c.is_uppercase();
        let lower: String = c.to_lowercase().collect();
        let mut chars = lower.chars();
        match (chars.next().and_then(latin_for), chars.next()) {
            (Some(latin), None) if upper => {
                let mut it = latin.chars();
                if let Some(first) = it.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(it.as_str());
                }
            }
            (Some(latin), None) => out.push_str(latin),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Feature value for a lemma no table maps: Latin script, no whitespace.
pub fn fallback_value(lemma: &str) -> String {
    transliterate(lemma)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
