//! Exhibit label algebra
//!
//! Alphabetic labels are bijective base-26 numerals: `A`..`Z` carry digit
//! values 1..26, so `Z` is followed by `AA` and there is no letter for zero.
//! Numeric labels are plain positive integers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const ALPHABET_SIZE: u64 = 26;

/// Case of an alphabetic label, preserved across advancement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterCase {
    Upper,
    Lower,
}

/// An exhibit label such as `A`, `aa` or `7`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Positive integer label
    Numeric(u64),
    /// Letter run; `letters` is always stored uppercase
    Alphabetic { letters: String, case: LetterCase },
}

impl Label {
    /// Parse a user-supplied or inferred token into a label
    pub fn parse(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::InvalidLabel(token.to_string()));
        }

        if token.bytes().all(|b| b.is_ascii_digit()) {
            return match token.parse::<u64>() {
                Ok(0) | Err(_) => Err(Error::InvalidLabel(token.to_string())),
                Ok(n) => Ok(Label::Numeric(n)),
            };
        }

        let case = if token.bytes().all(|b| b.is_ascii_uppercase()) {
            LetterCase::Upper
        } else if token.bytes().all(|b| b.is_ascii_lowercase()) {
            LetterCase::Lower
        } else {
            return Err(Error::InvalidLabel(token.to_string()));
        };

        // Reject runs too long to have an ordinal so that `next` can't fail on them
        label_to_ordinal(token)?;

        Ok(Label::Alphabetic {
            letters: token.to_ascii_uppercase(),
            case,
        })
    }

    /// Build an uppercase alphabetic label from its ordinal
    pub fn from_ordinal(n: u64, case: LetterCase) -> Result<Self> {
        Ok(Label::Alphabetic {
            letters: ordinal_to_label(n)?,
            case,
        })
    }

    /// The label that follows this one in sequence
    pub fn next(&self) -> Result<Self> {
        match self {
            Label::Numeric(n) => n
                .checked_add(1)
                .map(Label::Numeric)
                .ok_or_else(|| Error::InvalidLabel(self.to_string())),
            Label::Alphabetic { letters, case } => {
                let ordinal = label_to_ordinal(letters)?
                    .checked_add(1)
                    .ok_or_else(|| Error::InvalidLabel(self.to_string()))?;
                Label::from_ordinal(ordinal, *case)
            }
        }
    }

    /// Position of this label within its own kind, starting at 1
    pub fn ordinal(&self) -> u64 {
        match self {
            Label::Numeric(n) => *n,
            // Parsing guarantees the ordinal fits
            Label::Alphabetic { letters, .. } => label_to_ordinal(letters).unwrap_or(u64::MAX),
        }
    }

    /// Display designation, e.g. "Exhibit A"
    pub fn designation(&self) -> String {
        format!("Exhibit {}", self)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Numeric(n) => write!(f, "{}", n),
            Label::Alphabetic {
                letters,
                case: LetterCase::Upper,
            } => f.write_str(letters),
            Label::Alphabetic {
                letters,
                case: LetterCase::Lower,
            } => f.write_str(&letters.to_ascii_lowercase()),
        }
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Label::parse(s)
    }
}

impl Ord for Label {
    /// Numeric labels sort before alphabetic ones; within a kind, by ordinal
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Numeric(a), Label::Numeric(b)) => a.cmp(b),
            (Label::Numeric(_), Label::Alphabetic { .. }) => Ordering::Less,
            (Label::Alphabetic { .. }, Label::Numeric(_)) => Ordering::Greater,
            (
                Label::Alphabetic { case: ca, .. },
                Label::Alphabetic { case: cb, .. },
            ) => self.ordinal().cmp(&other.ordinal()).then_with(|| ca.cmp(cb)),
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Convert an alphabetic label to its bijective base-26 ordinal (`A` = 1, `AA` = 27)
pub fn label_to_ordinal(label: &str) -> Result<u64> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(Error::InvalidLabel(label.to_string()));
    }

    label.bytes().try_fold(0u64, |acc, b| {
        let digit = u64::from(b.to_ascii_uppercase() - b'A') + 1;
        acc.checked_mul(ALPHABET_SIZE)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidLabel(label.to_string()))
    })
}

/// Convert an ordinal (>= 1) to its uppercase alphabetic label (`27` = `AA`)
pub fn ordinal_to_label(n: u64) -> Result<String> {
    if n == 0 {
        return Err(Error::InvalidLabel(n.to_string()));
    }

    let mut digits = Vec::new();
    let mut rest = n;
    while rest > 0 {
        // Digits run 1..=26, so shift down by one before each division
        let remainder = (rest - 1) % ALPHABET_SIZE;
        digits.push(b'A' + remainder as u8);
        rest = (rest - 1) / ALPHABET_SIZE;
    }
    digits.reverse();

    Ok(digits.into_iter().map(char::from).collect())
}

/// Successor of a label, preserving kind and letter case
pub fn next_label(label: &Label) -> Result<Label> {
    label.next()
}

/// Whether `token` is a uniform-case letter run or a positive integer
pub fn is_valid_label(token: &str) -> bool {
    Label::parse(token).is_ok()
}
