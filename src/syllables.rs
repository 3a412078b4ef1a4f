use std::cmp::Ordering;

use tracing::trace;

//
// Structs etc.
//

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tone {
    #[default]
    Neutral,
    First,
    Second,
    Third,
    Fourth,
}

impl Tone {
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Which syllable separators a word contains. A word with both a space and a
/// hyphen counts as `Space`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeparatorClass {
    #[default]
    None,
    Space,
    Hyphen,
}

impl SeparatorClass {
    pub fn of(word: &str) -> Self {
        if word.contains(' ') {
            Self::Space
        } else if word.contains('-') {
            Self::Hyphen
        } else {
            Self::None
        }
    }
}

/// Share of uppercase letters among all letters, kept as an exact fraction.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseRatio {
    upper: u32,
    letters: u32,
}

impl CaseRatio {
    pub fn of(word: &str) -> Self {
        let (upper, letters) = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0, 0), |(upper, letters), c| {
                (upper + u32::from(c.is_uppercase()), letters + 1)
            });

        Self { upper, letters }
    }

    // Cross-multiplied numerator; no letters at all counts as zero
    fn scaled(self, other: Self) -> u64 {
        u64::from(self.upper) * u64::from(other.letters.max(1))
    }
}

impl PartialEq for CaseRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CaseRatio {}

impl PartialOrd for CaseRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CaseRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scaled(*other).cmp(&other.scaled(*self))
    }
}

/// A word with tone marks, case and separators stripped, plus its tone marks in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decomposition {
    pub base: String,
    pub tones: Vec<Tone>,
}

/// Sort key of a word under a [`SyllableCollator`]. Fields compare in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyllableKey {
    pub base: String,
    pub tones: Vec<Tone>,
    pub has_umlaut: bool,
    pub case_ratio: CaseRatio,
    pub separators: SeparatorClass,
}

/// Orders by base letters, then tone marks in reading order, then plain ü last,
/// then lowercase before uppercase, then no separator < space < hyphen.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyllableCollator;

impl SyllableCollator {
    pub fn sort_key(&self, word: &str) -> SyllableKey {
        let Decomposition { base, tones } = base_and_tones(word);

        SyllableKey {
            base,
            tones,
            has_umlaut: has_umlaut(word),
            case_ratio: CaseRatio::of(word),
            separators: SeparatorClass::of(word),
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        self.sort_key(a).cmp(&self.sort_key(b))
    }
}

//
// Functions, public
//

/// Splits a toned vowel into its plain vowel and tone. Plain vowels come back
/// with `Tone::Neutral`; anything else is `None`.
pub fn split_tone(c: char) -> Option<(char, Tone)> {
    let (plain, tone) = match c {
        'a' | 'e' | 'i' | 'o' | 'u' | 'ü' => (c, Tone::Neutral),
        'ā' => ('a', Tone::First),
        'á' => ('a', Tone::Second),
        'ǎ' => ('a', Tone::Third),
        'à' => ('a', Tone::Fourth),
        'ē' => ('e', Tone::First),
        'é' => ('e', Tone::Second),
        'ě' => ('e', Tone::Third),
        'è' => ('e', Tone::Fourth),
        'ī' => ('i', Tone::First),
        'í' => ('i', Tone::Second),
        'ǐ' => ('i', Tone::Third),
        'ì' => ('i', Tone::Fourth),
        'ō' => ('o', Tone::First),
        'ó' => ('o', Tone::Second),
        'ǒ' => ('o', Tone::Third),
        'ò' => ('o', Tone::Fourth),
        'ū' => ('u', Tone::First),
        'ú' => ('u', Tone::Second),
        'ǔ' => ('u', Tone::Third),
        'ù' => ('u', Tone::Fourth),
        'ǖ' => ('ü', Tone::First),
        'ǘ' => ('ü', Tone::Second),
        'ǚ' => ('ü', Tone::Third),
        'ǜ' => ('ü', Tone::Fourth),
        _ => return None,
    };

    Some((plain, tone))
}

/// Lowercases `word`, splits it into syllables at spaces and hyphens, and
/// returns the toneless concatenation of the syllables together with their
/// tone marks in reading order. A syllable without any tone mark contributes
/// one `Tone::Neutral`. Apostrophes stay inside their syllable.
pub fn base_and_tones(word: &str) -> Decomposition {
    let lower = word.to_lowercase();
    let mut decomposition = Decomposition::default();

    for syllable in regex!(r"[ \-]+").split(&lower) {
        if syllable.is_empty() {
            continue;
        }

        let marks_before = decomposition.tones.len();

        for c in syllable.chars() {
            match split_tone(c) {
                Some((plain, tone)) => {
                    if tone != Tone::Neutral {
                        decomposition.tones.push(tone);
                    }
                    decomposition.base.push(plain);
                }
                None => decomposition.base.push(c),
            }
        }

        if decomposition.tones.len() == marks_before {
            decomposition.tones.push(Tone::Neutral);
        }
    }

    trace!(word, base = %decomposition.base, tones = ?decomposition.tones, "decomposed");

    decomposition
}

/// True when the word holds a plain (toneless) ü in either case.
pub fn has_umlaut(word: &str) -> bool {
    word.to_lowercase().contains('ü')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&'static str]) -> Vec<&'static str> {
        let mut words = words.to_vec();
        words.sort_by(|a, b| SyllableCollator.compare(a, b));
        words
    }

    #[test]
    fn decomposition() {
        let d = base_and_tones("Hòu Jìn");
        assert_eq!(d.base, "houjin");
        assert_eq!(d.tones, [Tone::Fourth, Tone::Fourth]);

        let d = base_and_tones("bǎo'ān-xiǎo");
        assert_eq!(d.base, "bao'anxiao");
        assert_eq!(d.tones, [Tone::Third, Tone::First, Tone::Third]);

        let d = base_and_tones("lǐgōng");
        assert_eq!(d.base, "ligong");
        assert_eq!(d.tones, [Tone::Third, Tone::First]);

        let d = base_and_tones("shīshi de");
        assert_eq!(d.tones, [Tone::First, Tone::Neutral]);

        let d = base_and_tones("zhong");
        assert_eq!(d.base, "zhong");
        assert_eq!(d.tones, [Tone::Neutral]);
    }

    #[test]
    fn empty_syllables_skipped() {
        let d = base_and_tones(" -lǜ  shī- ");
        assert_eq!(d.base, "lüshi");
        assert_eq!(d.tones, [Tone::Fourth, Tone::First]);

        assert_eq!(base_and_tones(""), Decomposition::default());
        assert!(base_and_tones(" - ").tones.is_empty());
    }

    #[test]
    fn every_tone_mark_counts() {
        assert_eq!(base_and_tones("āà").tones, [Tone::First, Tone::Fourth]);
        assert_eq!(base_and_tones("nǜrén").tones, [Tone::Fourth, Tone::Second]);
    }

    #[test]
    fn tone_marks_inside_words() {
        let c = SyllableCollator;
        assert_eq!(c.compare("shīshi", "shīshī"), Ordering::Less);
        assert_eq!(c.compare("shīshī", "shīshí"), Ordering::Less);
        assert_eq!(c.compare("bōlì", "bólì"), Ordering::Less);
        assert_eq!(c.compare("lǐgōng", "lìgōng"), Ordering::Less);
    }

    #[test]
    fn plain_umlaut_sorts_last() {
        assert!(has_umlaut("Lü"));
        assert!(has_umlaut("LÜ"));
        assert!(!has_umlaut("lǚ"));
        assert_eq!(SyllableCollator.compare("lǜe", "lüè"), Ordering::Less);
        // Tones decide before ü does: [3] < [3, 3]
        assert_eq!(SyllableCollator.compare("nüǚ", "nǚǚ"), Ordering::Less);
    }

    #[test]
    fn tone_numbers() {
        assert_eq!(Tone::Neutral.number(), 0);
        assert_eq!(Tone::Fourth.number(), 4);
        assert_eq!(split_tone('Ǚ'), None);
        assert_eq!(split_tone('ǚ'), Some(('ü', Tone::Third)));
    }

    #[test]
    fn case_ratio_is_exact() {
        assert_eq!(CaseRatio::of("Ab"), CaseRatio::of("ABcd"));
        assert!(CaseRatio::of("abc") < CaseRatio::of("Abc"));
        assert!(CaseRatio::of("ABc") < CaseRatio::of("ABC"));
        assert_eq!(CaseRatio::of("- '"), CaseRatio::of("abc"));
    }

    #[test]
    fn separator_classes() {
        assert_eq!(SeparatorClass::of("baoan"), SeparatorClass::None);
        assert_eq!(SeparatorClass::of("bao an"), SeparatorClass::Space);
        assert_eq!(SeparatorClass::of("bao-an"), SeparatorClass::Hyphen);
        assert_eq!(SeparatorClass::of("bao-an xiao"), SeparatorClass::Space);
        assert_eq!(SeparatorClass::of("bao'an"), SeparatorClass::None);
    }

    #[test]
    fn tone_order() {
        let c = SyllableCollator;
        assert_eq!(c.compare("a", "ā"), Ordering::Less);
        assert_eq!(c.compare("ā", "á"), Ordering::Less);
        assert_eq!(c.compare("á", "ǎ"), Ordering::Less);
        assert_eq!(c.compare("ǎ", "à"), Ordering::Less);
    }

    #[test]
    fn u_before_umlaut() {
        let c = SyllableCollator;
        assert_eq!(c.compare("lu", "lü"), Ordering::Less);
        assert_eq!(c.compare("Lu", "Lü"), Ordering::Less);
        assert_eq!(sorted(&["lù", "lü", "Lù", "Lǚ"]), ["lù", "Lù", "lü", "Lǚ"]);
    }

    #[test]
    fn lowercase_first() {
        assert_eq!(SyllableCollator.compare("bao", "Bao"), Ordering::Less);
        assert_eq!(
            sorted(&["HòuJìn", "Hòu Jìn", "hòujìn", "Hòujìn"]),
            ["hòujìn", "Hòujìn", "HòuJìn", "Hòu Jìn"]
        );
    }

    #[test]
    fn separator_order() {
        assert_eq!(
            sorted(&["lǐ-gōng", "lǐ gōng", "lǐgōng"]),
            ["lǐgōng", "lǐ gōng", "lǐ-gōng"]
        );
        assert_eq!(
            SyllableCollator.compare("lǐ gōng", "lǐ-gōng"),
            Ordering::Less
        );
    }

    #[test]
    fn base_letters_first() {
        assert_eq!(
            sorted(&["shīshí", "bólì", "shīshī", "bōli", "shīshi"]),
            ["bōli", "bólì", "shīshi", "shīshī", "shīshí"]
        );
    }

    #[test]
    fn reflexive_and_antisymmetric() {
        let words = ["", "a", "Ā", "lǚ", "lu", "bǎo an", "bǎo-an", "bǎo'an", "bǎo#"];

        for a in words {
            assert_eq!(SyllableCollator.compare(a, a), Ordering::Equal);
            for b in words {
                assert_eq!(
                    SyllableCollator.compare(a, b),
                    SyllableCollator.compare(b, a).reverse()
                );
            }
        }
    }
}
