//! crates/logging/src/code.rs
//! Structural validation for log codes embedded in messages.

use std::fmt;

/// Number of uppercase component letters at the start of a code.
const COMPONENT_LEN: usize = 3;

/// Number of decimal digits in the numeric body of a code.
const DIGITS_LEN: usize = 8;

/// Level letters a code may end with.
const LEVEL_LETTERS: [char; 6] = ['I', 'W', 'T', 'D', 'E', 'F'];

/// Reports whether `text` is a well-formed log code.
///
/// A log code is a short classification tag of the exact shape
/// `<XXXNNNNNNNNL>`: an opening angle bracket, three uppercase ASCII
/// letters naming a component, exactly eight ASCII digits, one level letter
/// from `I`, `W`, `T`, `D`, `E`, `F`, and a closing angle bracket. Codes
/// exist so external tooling can grep and classify messages; the level
/// letter has no relation to [`Level`](crate::Level) filtering.
///
/// The check is purely structural and side-effect free. Any deviation
/// (missing bracket, wrong digit count, lowercase letters, an unknown level
/// letter) returns `false`.
///
/// # Examples
///
/// ```
/// use logging::is_log_code;
///
/// assert!(is_log_code("<ORC12345678D>"));
/// assert!(!is_log_code("<ORC178D>"));
/// assert!(!is_log_code("<orc12345678D>"));
/// ```
#[must_use]
pub fn is_log_code(text: &str) -> bool {
    let Some(inner) = text
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        return false;
    };
    // Byte-wise so multi-byte input can never land on a char boundary.
    let inner = inner.as_bytes();
    if inner.len() != COMPONENT_LEN + DIGITS_LEN + 1 {
        return false;
    }

    let component = &inner[..COMPONENT_LEN];
    let digits = &inner[COMPONENT_LEN..COMPONENT_LEN + DIGITS_LEN];
    let letter = inner[COMPONENT_LEN + DIGITS_LEN] as char;

    component.iter().all(u8::is_ascii_uppercase)
        && digits.iter().all(u8::is_ascii_digit)
        && LEVEL_LETTERS.contains(&letter)
}

/// A validated log code carried on a log entry.
///
/// Construction rejects malformed text, so a `LogCode` held anywhere in the
/// system is known to satisfy [`is_log_code`] and formatters render it
/// without re-checking.
///
/// # Examples
///
/// ```
/// use logging::LogCode;
///
/// let code: LogCode = "<NET00000042E>".parse()?;
/// assert_eq!(code.as_str(), "<NET00000042E>");
/// # Ok::<(), logging::InvalidLogCodeError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LogCode(String);

impl LogCode {
    /// Returns the code text, brackets included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LogCode {
    type Err = InvalidLogCodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if is_log_code(text) {
            Ok(Self(text.to_owned()))
        } else {
            Err(InvalidLogCodeError::new(text))
        }
    }
}

impl TryFrom<&str> for LogCode {
    type Error = InvalidLogCodeError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// Error returned when text does not satisfy the log-code shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidLogCodeError {
    input: String,
}

impl InvalidLogCodeError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the text that failed validation.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for InvalidLogCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid log code [{}]", self.input)
    }
}

impl std::error::Error for InvalidLogCodeError {}
