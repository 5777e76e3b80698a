//! Sharenote labels: parsing, construction, and ordering.
//!
//! A Sharenote names a proof-of-work rarity level with a whole-bit component
//! and a fractional "cent" component, rendered as e.g. `33Z53` (33.53 bits of
//! difficulty). Three label spellings are accepted: the standard `33Z53`
//! (optionally `33Z 53CZ`), the dotted `33.53Z`, and a plain decimal `33.537812Z`
//! which keeps the full continuous precision.

use core::cmp::Ordering;
use core::fmt;

use crate::error::SharenoteError;

/// Fractional bit increment represented by one cent.
pub const CENT_BIT_STEP: f64 = 0.01;
/// Lowest cent value.
pub const MIN_CENTS: u8 = 0;
/// Highest cent value.
pub const MAX_CENTS: u8 = 99;

/// Guard against float noise when quantising fractional bits into cents.
const CENT_EPSILON: f64 = 1e-9;

/// A note label: whole bits, cents, and the continuous bit difficulty.
///
/// Values are immutable once constructed; every constructor clamps cents into
/// `[0, 99]` and keeps `bits >= 0`. Ordering and equality go by `(z, cents)`,
/// so harder notes compare greater.
#[derive(Debug, Clone)]
pub struct Sharenote {
    z: u32,
    cents: u8,
    bits: f64,
    label_override: Option<String>,
}

impl Sharenote {
    /// Build a note from whole bits and cents. Cents are clamped into `[0, 99]`.
    pub fn from_components(z: u32, cents: i32) -> Self {
        let cents = cents.clamp(i32::from(MIN_CENTS), i32::from(MAX_CENTS)) as u8;
        let bits = f64::from(z) + f64::from(cents) * CENT_BIT_STEP;
        Sharenote {
            z,
            cents,
            bits,
            label_override: None,
        }
    }

    /// Quantise a continuous bit difficulty down to whole cents.
    ///
    /// The stored `bits` are recomputed from the quantised components, so
    /// `from_bits(33.537812)` carries exactly 33.53 bits.
    pub fn from_bits(bits: f64) -> Result<Self, SharenoteError> {
        if !bits.is_finite() || bits < 0.0 {
            return Err(SharenoteError::InvalidBits);
        }
        let z = bits.floor() as u32;
        let fractional = bits - f64::from(z);
        let raw_cents = ((fractional / CENT_BIT_STEP) + CENT_EPSILON) as i32;
        Ok(Self::from_components(z, raw_cents))
    }

    /// Like [`from_bits`](Self::from_bits), but the stored `bits` keep the
    /// exact input value for precision round-tripping. Only the label is
    /// quantised.
    pub fn from_bits_exact(bits: f64) -> Result<Self, SharenoteError> {
        let mut note = Self::from_bits(bits)?;
        note.bits = bits;
        Ok(note)
    }

    /// Interpret an integer count of 0.01-bit units (3353 becomes `33Z53`).
    pub fn from_cent_z_bits(cent_units: i64) -> Result<Self, SharenoteError> {
        if cent_units < 0 {
            return Err(SharenoteError::NegativeCentUnits);
        }
        let z = u32::try_from(cent_units / 100).map_err(|_| SharenoteError::InvalidBits)?;
        Ok(Self::from_components(z, (cent_units % 100) as i32))
    }

    /// The zero note, `0Z00`.
    pub fn zero() -> Self {
        Self::from_components(0, 0)
    }

    /// Whole-bit component.
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Cent component in `[0, 99]`.
    pub fn cents(&self) -> u8 {
        self.cents
    }

    /// Continuous bit difficulty.
    pub fn bits(&self) -> f64 {
        self.bits
    }

    /// The canonical label (e.g. `33Z53`), or the preserved original text for
    /// notes parsed from the plain-decimal syntax.
    pub fn label(&self) -> String {
        match &self.label_override {
            Some(text) => text.clone(),
            None => format!("{}Z{:02}", self.z, self.cents),
        }
    }
}

impl fmt::Display for Sharenote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl PartialEq for Sharenote {
    fn eq(&self, other: &Self) -> bool {
        self.z == other.z && self.cents == other.cents
    }
}

impl Eq for Sharenote {}

impl PartialOrd for Sharenote {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sharenote {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.z, self.cents).cmp(&(other.z, other.cents))
    }
}

/// Polymorphic input for operations that accept "anything note-like".
#[derive(Debug, Clone)]
pub enum NoteInput {
    /// An already-constructed note, passed through unchanged.
    Note(Sharenote),
    /// A textual label such as `"33Z53"`.
    Label(String),
    /// Continuous bits, taken exactly; must be finite and non-negative.
    Bits(f64),
}

impl From<Sharenote> for NoteInput {
    fn from(note: Sharenote) -> Self {
        NoteInput::Note(note)
    }
}

impl From<&Sharenote> for NoteInput {
    fn from(note: &Sharenote) -> Self {
        NoteInput::Note(note.clone())
    }
}

impl From<&str> for NoteInput {
    fn from(label: &str) -> Self {
        NoteInput::Label(label.to_string())
    }
}

impl From<String> for NoteInput {
    fn from(label: String) -> Self {
        NoteInput::Label(label)
    }
}

impl From<f64> for NoteInput {
    fn from(bits: f64) -> Self {
        NoteInput::Bits(bits)
    }
}

/// Coerce any note-like input into a [`Sharenote`].
///
/// Idempotent: feeding the result back in yields the same note.
pub fn ensure_note(input: impl Into<NoteInput>) -> Result<Sharenote, SharenoteError> {
    match input.into() {
        NoteInput::Note(note) => Ok(note),
        NoteInput::Label(text) => parse_label(&text),
        NoteInput::Bits(bits) => Sharenote::from_bits_exact(bits),
    }
}

/// Total order over notes by rarity: whole bits first, then cents.
pub fn compare_notes(
    a: impl Into<NoteInput>,
    b: impl Into<NoteInput>,
) -> Result<Ordering, SharenoteError> {
    let note_a = ensure_note(a)?;
    let note_b = ensure_note(b)?;
    Ok(note_a.cmp(&note_b))
}

/// Parse a note label. Case-insensitive; internal whitespace is ignored.
///
/// Accepted spellings, tried in order:
/// 1. standard: `33Z53`, `33Z 53CZ`, `33Z`
/// 2. dotted: `33.53Z`, `33.5Z`
/// 3. decimal: `33.537812Z` (continuous bits, full precision preserved)
pub fn parse_label(label: &str) -> Result<Sharenote, SharenoteError> {
    let cleaned: String = label
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if let Some((z, cents)) = match_standard(&cleaned) {
        return Ok(Sharenote::from_components(z, cents));
    }
    if let Some((z, cents)) = match_dotted(&cleaned) {
        return Ok(Sharenote::from_components(z, cents));
    }
    if let Some(text) = match_decimal(&cleaned) {
        let bits: f64 = text
            .parse()
            .map_err(|_| SharenoteError::InvalidLabel(label.to_string()))?;
        let mut note = Sharenote::from_bits_exact(bits)?;
        note.label_override = Some(cleaned);
        return Ok(note);
    }

    Err(SharenoteError::InvalidLabel(label.to_string()))
}

/// Split a leading run of ASCII digits from the rest of the string.
fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// `<int>Z<0-2 digits>[CZ]`
fn match_standard(s: &str) -> Option<(u32, i32)> {
    let (digits, rest) = split_digits(s);
    if digits.is_empty() {
        return None;
    }
    let z: u32 = digits.parse().ok()?;
    let rest = rest.strip_prefix('Z')?;
    if rest.is_empty() {
        return Some((z, 0));
    }
    let (cent_digits, tail) = split_digits(rest);
    if cent_digits.is_empty() || cent_digits.len() > 2 {
        return None;
    }
    if !tail.is_empty() && tail != "CZ" {
        return None;
    }
    let cents: i32 = cent_digits.parse().ok()?;
    Some((z, cents))
}

/// `<int>.<1-2 digits>Z` — a short fraction is padded out (`33.5Z` is 50 cents).
fn match_dotted(s: &str) -> Option<(u32, i32)> {
    let (digits, rest) = split_digits(s);
    if digits.is_empty() {
        return None;
    }
    let z: u32 = digits.parse().ok()?;
    let rest = rest.strip_prefix('.')?;
    let (frac_digits, tail) = split_digits(rest);
    if frac_digits.is_empty() || frac_digits.len() > 2 || tail != "Z" {
        return None;
    }
    let mut padded = frac_digits.to_string();
    while padded.len() < 2 {
        padded.push('0');
    }
    let cents: i32 = padded.parse().ok()?;
    Some((z, cents))
}

/// `<number>Z` with an arbitrary-precision decimal body.
fn match_decimal(s: &str) -> Option<&str> {
    let body = s.strip_suffix('Z')?;
    let (whole, rest) = split_digits(body);
    if whole.is_empty() {
        return None;
    }
    if rest.is_empty() {
        return Some(body);
    }
    let rest = rest.strip_prefix('.')?;
    let (frac, tail) = split_digits(rest);
    if frac.is_empty() || !tail.is_empty() {
        return None;
    }
    Some(body)
}
