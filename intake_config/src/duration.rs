use serde::Deserialize;

/// A duration written as whitespace separated parts like `10s`, `1m 30s` or
/// `2h`. Supported units are `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl std::str::FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(0u64, |total, part| {
                let (value, unit) = part.split_at(part.len().saturating_sub(1));
                let multiplier = match unit {
                    "s" => 1,
                    "m" => 60,
                    "h" => 60 * 60,
                    "d" => 24 * 60 * 60,
                    _ => return Err("Invalid duration unit"),
                };
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err("Invalid duration");
                }
                value
                    .parse::<u64>()
                    .ok()
                    .and_then(|value| value.checked_mul(multiplier))
                    .and_then(|seconds| total.checked_add(seconds))
                    .ok_or("Duration is too large")
            })
            .map(|seconds| Self(std::time::Duration::from_secs(seconds)))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("20d", Some(20 * 24 * 60 * 60)),
            ("", Some(0)),
            ("1m 30s", Some(90)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("xyz", None),
            ("7dd", None),
            ("s", None),
            ("10", None),
            ("-1s", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|x| x.0.as_secs());
            assert_eq!(output, expected);
        }
    }
}
