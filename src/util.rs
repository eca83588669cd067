//! Small utility helpers used across modules.

use uuid::Uuid;

use crate::error::GameError;

pub const REFERRAL_CODE_LEN: usize = 8;
pub const MIN_NAME_CHARS: usize = 3;
pub const MAX_NAME_CHARS: usize = 50;

/// Fresh referral code: the leading hex digits of a v4 UUID.
/// Collisions are possible in principle; the store's uniqueness check is the backstop.
pub fn new_referral_code() -> String {
  let mut hex = Uuid::new_v4().simple().to_string();
  hex.truncate(REFERRAL_CODE_LEN);
  hex
}

/// Canonical form of a player name: surrounding whitespace removed.
/// Every store read and write keyed by name goes through this.
pub fn normalize_player_name(raw: &str) -> &str {
  raw.trim()
}

/// Normalized player name, if its length is within the registration bounds.
pub fn validate_player_name(raw: &str) -> Result<String, GameError> {
  let name = normalize_player_name(raw);
  let len = name.chars().count();
  if len < MIN_NAME_CHARS || len > MAX_NAME_CHARS {
    return Err(GameError::InvalidName(format!(
      "must be {MIN_NAME_CHARS}-{MAX_NAME_CHARS} characters, got {len}"
    )));
  }
  Ok(name.to_string())
}

/// Log-safe truncation for user-supplied strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}
