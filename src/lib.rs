//! Letter-by-letter collation of Hànyǔ Pīnyīn.
//!
//! Tone-marked vowels sort as variants of their plain letter, in tone order
//! (a < ā < á < ǎ < à). Three rule variants are available:
//!
//! - [`RuleVariant::WeightTableCaseFolding`]: one weight per character from a
//!   lowercase alphabet, with a second pass over the original string to break
//!   case ties.
//! - [`RuleVariant::WeightTableFullAlphabet`]: one weight per character from an
//!   alphabet that lists uppercase letters explicitly.
//! - [`RuleVariant::SyllableDecomposition`]: toneless base letters first, then
//!   syllable tones, u before ü, case, and finally separators.
//!
//! ```
//! use pinyin_collate::{collate, CollationOptions, RuleVariant};
//! use std::cmp::Ordering;
//!
//! let options = CollationOptions {
//!     variant: RuleVariant::SyllableDecomposition,
//!     ..CollationOptions::default()
//! };
//!
//! assert_eq!(collate("lu", "lü", &options), Ordering::Less);
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::{is_nfc, UnicodeNormalization};

//
// Macros
//

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: ::once_cell::sync::OnceCell<::regex::Regex> = ::once_cell::sync::OnceCell::new();
        RE.get_or_init(|| ::regex::Regex::new($re).unwrap())
    }};
}

pub mod error;
pub mod sort;
pub mod syllables;
pub mod weights;

pub use error::Error;
pub use sort::{sort_by_key, sort_records, sort_strings};
pub use syllables::{base_and_tones, Decomposition, SyllableCollator, SyllableKey, Tone};
pub use weights::{RankTable, WeightKey, WeightMode, WeightTableCollator};

//
// Structs etc.
//

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleVariant {
    #[default]
    WeightTableCaseFolding,
    WeightTableFullAlphabet,
    SyllableDecomposition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollationOptions {
    pub variant: RuleVariant,
    /// Compose input to NFC before weighting it.
    pub normalize: bool,
}

impl Default for CollationOptions {
    fn default() -> Self {
        Self {
            variant: RuleVariant::WeightTableCaseFolding,
            normalize: true,
        }
    }
}

/// Precomputed comparison key of one word. Keys from the same [`Collator`]
/// order exactly as [`Collator::compare`] orders their words.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Weights(WeightKey),
    Syllables(SyllableKey),
}

#[derive(Clone, Debug)]
enum Strategy {
    WeightTable(WeightTableCollator),
    Syllables(SyllableCollator),
}

#[derive(Clone, Debug)]
pub struct Collator {
    strategy: Strategy,
    normalize: bool,
}

impl Collator {
    pub fn new(options: CollationOptions) -> Self {
        let strategy = match options.variant {
            RuleVariant::WeightTableCaseFolding => {
                Strategy::WeightTable(WeightTableCollator::case_folding())
            }
            RuleVariant::WeightTableFullAlphabet => {
                Strategy::WeightTable(WeightTableCollator::full_alphabet())
            }
            RuleVariant::SyllableDecomposition => Strategy::Syllables(SyllableCollator),
        };

        Self {
            strategy,
            normalize: options.normalize,
        }
    }

    /// Uses a custom weight table instead of one of the built-in alphabets.
    pub fn with_weight_table(collator: WeightTableCollator, normalize: bool) -> Self {
        Self {
            strategy: Strategy::WeightTable(collator),
            normalize,
        }
    }

    pub fn variant(&self) -> RuleVariant {
        match &self.strategy {
            Strategy::WeightTable(w) => match w.mode() {
                WeightMode::CaseFolding => RuleVariant::WeightTableCaseFolding,
                WeightMode::FullAlphabet => RuleVariant::WeightTableFullAlphabet,
            },
            Strategy::Syllables(_) => RuleVariant::SyllableDecomposition,
        }
    }

    pub fn compare(&self, str_a: &str, str_b: &str) -> Ordering {
        if str_a == str_b {
            return Ordering::Equal;
        }

        let a = self.prepare(str_a);
        let b = self.prepare(str_b);

        match &self.strategy {
            Strategy::WeightTable(w) => w.compare(&a, &b),
            Strategy::Syllables(s) => s.compare(&a, &b),
        }
    }

    pub fn sort_key(&self, word: &str) -> SortKey {
        let word = self.prepare(word);

        match &self.strategy {
            Strategy::WeightTable(w) => SortKey::Weights(w.sort_key(&word)),
            Strategy::Syllables(s) => SortKey::Syllables(s.sort_key(&word)),
        }
    }

    fn prepare<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.normalize && !is_nfc(input) {
            Cow::Owned(input.nfc().collect())
        } else {
            Cow::Borrowed(input)
        }
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::new(CollationOptions::default())
    }
}

//
// Functions, public
//

pub fn collate(str_a: &str, str_b: &str, options: &CollationOptions) -> Ordering {
    Collator::new(*options).compare(str_a, str_b)
}
