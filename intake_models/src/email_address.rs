use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

/// `local@domain.tld` with no whitespace and exactly the one `@` separating
/// the local part from the domain.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[nutype(
    validate(regex = EMAIL_ADDRESS_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize)
)]
pub struct EmailAddress(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        for input in [
            "ana@x.com",
            "max.mustermann@example.de",
            "a+b@sub.domain.org",
            "x@y.z",
        ] {
            assert!(EmailAddress::try_new(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn invalid() {
        for input in [
            "",
            "ana",
            "ana.x.com",
            "ana@x",
            "ana@.com",
            "@x.com",
            "ana @x.com",
            "ana@x .com",
            "ana@x.com ",
            "ana@@x.com",
            "ana@x@y.com",
            "ana@x.",
        ] {
            assert!(EmailAddress::try_new(input).is_err(), "{input}");
        }
    }
}
