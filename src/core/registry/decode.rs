//! Form value decoding
//!
//! Browsers post form fields percent-escaped with `+` for spaces. Swapping
//! `%` for `=` turns the escapes into quoted-printable, which is then decoded
//! to bytes and read as UTF-8.

use crate::domain::{PolyclinicError, Result};

/// Decodes one form value
///
/// # Errors
///
/// Returns `PolyclinicError::Decode` when an escape is not two hex digits
/// or the decoded bytes are not UTF-8.
///
/// # Examples
///
/// ```rust
/// use polyclinic::core::registry::decode_value;
///
/// assert_eq!(decode_value("%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82").unwrap(), "Привет");
/// assert_eq!(decode_value("City+Clinic").unwrap(), "City Clinic");
/// ```
pub fn decode_value(raw: &str) -> Result<String> {
    let escaped: String = raw
        .chars()
        .map(|c| match c {
            '%' => '=',
            '+' => ' ',
            other => other,
        })
        .collect();

    let bytes = decode_quoted_printable(escaped.as_bytes())?;
    String::from_utf8(bytes)
        .map_err(|e| PolyclinicError::Decode(format!("value is not valid UTF-8: {e}")))
}

fn decode_quoted_printable(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] != b'=' {
            out.push(input[i]);
            i += 1;
            continue;
        }

        match &input[i + 1..] {
            // Soft line breaks, including a dangling '=' at the very end
            [] => i += 1,
            [b'\n', ..] => i += 2,
            [b'\r', b'\n', ..] => i += 3,
            [hi, lo, ..] => {
                let byte = hex_pair(*hi, *lo).ok_or_else(|| {
                    PolyclinicError::Decode(format!(
                        "invalid escape '={}{}' at offset {i}",
                        *hi as char, *lo as char
                    ))
                })?;
                out.push(byte);
                i += 3;
            }
            [_] => {
                return Err(PolyclinicError::Decode(format!(
                    "truncated escape at offset {i}"
                )))
            }
        }
    }

    Ok(out)
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82", "Привет" ; "cyrillic")]
    #[test_case("Central+District", "Central District" ; "plus is space")]
    #[test_case("a%3Db", "a=b" ; "escaped equals")]
    #[test_case("%2B1", "+1" ; "escaped plus")]
    #[test_case("plain", "plain" ; "no escapes")]
    #[test_case("", "" ; "empty")]
    #[test_case("%d0%bf", "п" ; "lowercase hex")]
    #[test_case("end%", "end" ; "dangling soft break")]
    fn test_decode_value(raw: &str, expected: &str) {
        assert_eq!(decode_value(raw).unwrap(), expected);
    }

    #[test_case("%ZZ" ; "non hex escape")]
    #[test_case("abc%4" ; "truncated escape")]
    #[test_case("%D0" ; "incomplete utf8 sequence")]
    #[test_case("%FF%FE" ; "invalid utf8")]
    fn test_decode_value_rejects(raw: &str) {
        let err = decode_value(raw).unwrap_err();
        assert!(matches!(err, PolyclinicError::Decode(_)));
    }
}
