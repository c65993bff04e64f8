//! Credential redaction for outbound error text
//!
//! Upstream (database/ORM) errors can embed connection strings and
//! passwords. Everything that leaves on the 500 path runs through
//! `sanitize` first. The substitutions are ordered and idempotent:
//! sanitizing already-sanitized text is a no-op.

use lazy_static::lazy_static;
use regex::Regex;

const REDACTED: &str = "[REDACTED]";

lazy_static! {
    /// `connection string "..."` including the quoted value, or the bare phrase.
    static ref CONNECTION_STRING_REGEX: Regex =
        Regex::new(r#"(?i)connection string(\s*"[^"]*")?"#).unwrap();
    /// `password` plus separator and the following token.
    static ref PASSWORD_REGEX: Regex = Regex::new(r#"(?i)password[\s:=]*[^\s"]*"#).unwrap();
    /// Userinfo in URLs: `user:secret@host`.
    static ref USERINFO_REGEX: Regex = Regex::new(r"user:.*?@").unwrap();
}

/// Redact credential-like substrings from an error message.
pub fn sanitize(message: &str) -> String {
    let message = CONNECTION_STRING_REGEX.replace_all(message, REDACTED);
    let message = PASSWORD_REGEX.replace_all(&message, REDACTED);
    let message = USERINFO_REGEX.replace_all(&message, format!("{}@", REDACTED).as_str());
    message.into_owned()
}
