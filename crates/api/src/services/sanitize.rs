//! Free-text cleaning for names, contacts and catering details.
//!
//! Each function trims, collapses whitespace runs to a single space, drops
//! characters outside its allow-list and truncates to `max_len` characters.

use super::sha256_hex;

pub const NAME_MAX: usize = 24;
pub const CONTACT_MAX: usize = 32;

const NAME_EXTRA: &str = "@._- áéíóúÁÉÍÓÚñÑ";
const CONTACT_EXTRA: &str = "@._+ ()-";

fn clean(input: &str, max_len: usize, keep: impl Fn(char) -> bool) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let kept: String = collapsed.chars().filter(|c| keep(*c)).take(max_len).collect();
    kept.trim().to_string()
}

pub fn name(input: &str, max_len: usize) -> String {
    clean(input, max_len, |c| c.is_ascii_alphanumeric() || NAME_EXTRA.contains(c))
}

pub fn contact(input: &str, max_len: usize) -> String {
    clean(input, max_len, |c| {
        c.is_ascii_alphanumeric() || CONTACT_EXTRA.contains(c)
    })
}

pub fn details(input: &str, max_len: usize) -> String {
    clean(input, max_len, |c| c != '<' && c != '>')
}

/// How a sanitized contact is interpreted for rate limiting and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Social handle: starts with `@` or contains a letter.
    Handle,
    Phone,
}

impl ContactKind {
    pub fn of(contact: &str) -> Self {
        if contact.starts_with('@') || contact.chars().any(|c| c.is_ascii_alphabetic()) {
            ContactKind::Handle
        } else {
            ContactKind::Phone
        }
    }

    /// Rate-limit key for `contact`. Handles are case-insensitive.
    pub fn rate_key(self, contact: &str) -> String {
        match self {
            ContactKind::Handle => format!("ig:{}", sha256_hex(&contact.to_lowercase())),
            ContactKind::Phone => format!("phone:{}", sha256_hex(contact)),
        }
    }
}
