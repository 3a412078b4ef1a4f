use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

//
// Alphabets
//

/// Lowercase letters only; uppercase input is handled by folding plus the code-point fallback.
pub const CASE_FOLDING_ALPHABET: &str =
    "0123456789aāáǎàbcdeēéěèfghiīíǐìjklmnoōóǒòpqrstuūúǔùüǖǘǚǜvwxyz'- ";

/// Every tone variant of every letter, with the uppercase forms following the lowercase ones.
pub const FULL_ALPHABET: &str = concat!(
    "0123456789",
    "aāáǎàAĀÁǍÀ",
    "bBcCdD",
    "eēéěèEĒÉĚÈ",
    "fFgGhH",
    "iīíǐìIĪÍǏÌ",
    "jJkKlLmMnN",
    "oōóǒòOŌÓǑÒ",
    "pPqQrRsStT",
    "uūúǔùUŪÚǓÙ",
    "üǖǘǚǜÜǕǗǙǛ",
    "vVwWxXyYzZ",
    "'- ",
);

static CASE_FOLDING_TABLE: Lazy<Arc<RankTable>> =
    Lazy::new(|| Arc::new(RankTable::new(CASE_FOLDING_ALPHABET).unwrap()));

static FULL_TABLE: Lazy<Arc<RankTable>> =
    Lazy::new(|| Arc::new(RankTable::new(FULL_ALPHABET).unwrap()));

//
// Structs etc.
//

/// Maps each character of an alphabet to its position in it.
///
/// Serialized as the alphabet string itself, so decoding goes through the same
/// uniqueness check as [`RankTable::new`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct RankTable {
    alphabet: String,
    ranks: HashMap<char, u32>,
}

impl RankTable {
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(alphabet: &str) -> Result<Self, Error> {
        let mut ranks = HashMap::new();

        for (i, c) in alphabet.chars().enumerate() {
            if ranks.insert(c, i as u32).is_some() {
                return Err(Error::DuplicateCharacter(c));
            }
        }

        debug!(size = ranks.len(), "built rank table");

        Ok(Self {
            alphabet: alphabet.to_owned(),
            ranks,
        })
    }

    pub fn alphabet(&self) -> &str {
        &self.alphabet
    }

    pub fn get(&self, c: char) -> Option<u32> {
        self.ranks.get(&c).copied()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn len(&self) -> u32 {
        self.ranks.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl TryFrom<String> for RankTable {
    type Error = Error;

    fn try_from(alphabet: String) -> Result<Self, Self::Error> {
        Self::new(&alphabet)
    }
}

impl From<RankTable> for String {
    fn from(table: RankTable) -> Self {
        table.alphabet
    }
}

/// How a weight table deals with case and with characters it doesn't list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightMode {
    /// Compare lowercased input first, then the original input as a tiebreaker.
    /// Unlisted characters weigh their code point plus the table size.
    CaseFolding,
    /// Compare the original input once. Unlisted characters all weigh the table size.
    FullAlphabet,
}

/// Sort key of a word under a [`WeightTableCollator`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeightKey {
    Folded { folded: Vec<u32>, exact: Vec<u32> },
    Exact(Vec<u32>),
}

#[derive(Clone, Debug)]
pub struct WeightTableCollator {
    table: Arc<RankTable>,
    mode: WeightMode,
}

impl WeightTableCollator {
    pub fn new(table: RankTable, mode: WeightMode) -> Self {
        Self {
            table: Arc::new(table),
            mode,
        }
    }

    pub fn case_folding() -> Self {
        Self {
            table: Arc::clone(&CASE_FOLDING_TABLE),
            mode: WeightMode::CaseFolding,
        }
    }

    pub fn full_alphabet() -> Self {
        Self {
            table: Arc::clone(&FULL_TABLE),
            mode: WeightMode::FullAlphabet,
        }
    }

    pub fn mode(&self) -> WeightMode {
        self.mode
    }

    pub fn table(&self) -> &RankTable {
        &self.table
    }

    pub fn rank(&self, c: char) -> u32 {
        match (self.table.get(c), self.mode) {
            (Some(rank), _) => rank,
            (None, WeightMode::CaseFolding) => c as u32 + self.table.len(),
            (None, WeightMode::FullAlphabet) => self.table.len(),
        }
    }

    pub fn ranks(&self, word: &str) -> Vec<u32> {
        word.chars().map(|c| self.rank(c)).collect()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self.mode {
            WeightMode::CaseFolding => {
                let a_lower = a.to_lowercase();
                let b_lower = b.to_lowercase();

                let comparison = compare_ranks(&self.ranks(&a_lower), &self.ranks(&b_lower));
                if comparison != Ordering::Equal {
                    return comparison;
                }

                // Case tiebreaker
                compare_ranks(&self.ranks(a), &self.ranks(b))
            }
            WeightMode::FullAlphabet => compare_ranks(&self.ranks(a), &self.ranks(b)),
        }
    }

    pub fn sort_key(&self, word: &str) -> WeightKey {
        match self.mode {
            WeightMode::CaseFolding => WeightKey::Folded {
                folded: self.ranks(&word.to_lowercase()),
                exact: self.ranks(word),
            },
            WeightMode::FullAlphabet => WeightKey::Exact(self.ranks(word)),
        }
    }
}

//
// Functions, public
//

/// Lexicographic comparison; a strict prefix sorts first.
pub fn compare_ranks(a: &[u32], b: &[u32]) -> Ordering {
    let min_length = a.len().min(b.len());

    for i in 0..min_length {
        if a[i] < b[i] {
            return Ordering::Less;
        }

        if a[i] > b[i] {
            return Ordering::Greater;
        }
    }

    a.len().cmp(&b.len())
}
