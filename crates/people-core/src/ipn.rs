//! IPN checksum validation.
//!
//! An IPN is ten ASCII digits. The last digit is a check digit computed from
//! the first nine with a weighted sum reduced modulo 11, then modulo 10.

/// Number of digits in a well-formed IPN.
pub const IPN_LENGTH: usize = 10;

/// Weights applied to digits 0..=8.
pub const COEFFICIENTS: [i32; IPN_LENGTH - 1] = [-1, 5, 7, 9, 4, 6, 10, 5, 7];

/// Why a candidate IPN was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpnDefect {
  /// Blank, wrong length, or contains something other than `0-9`.
  Malformed,
  /// Well-formed, but the last digit does not match the computed check digit.
  ChecksumMismatch { expected: u8, found: u8 },
}

/// Compute the check digit for the first nine digits of `digits`.
///
/// `digits` must hold at least nine values in `0..=9`.
pub fn check_digit(digits: &[u8]) -> u8 {
  let sum: i32 = COEFFICIENTS
    .iter()
    .zip(digits)
    .map(|(c, d)| c * i32::from(*d))
    .sum();
  // The first weight is negative; rem_euclid keeps the residue in 0..11.
  (sum.rem_euclid(11) % 10) as u8
}

/// Validate `s`, reporting which rule it broke.
pub fn check(s: &str) -> Result<(), IpnDefect> {
  let bytes = s.as_bytes();
  if bytes.len() != IPN_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
    return Err(IpnDefect::Malformed);
  }

  let digits: Vec<u8> = bytes.iter().map(|b| b - b'0').collect();
  let expected = check_digit(&digits);
  let found = digits[IPN_LENGTH - 1];
  if expected == found {
    Ok(())
  } else {
    Err(IpnDefect::ChecksumMismatch { expected, found })
  }
}

/// `true` iff `s` is exactly ten digits with a matching check digit.
pub fn is_valid(s: &str) -> bool { check(s).is_ok() }
