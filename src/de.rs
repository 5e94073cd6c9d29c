//! Deserialisers pinning Slack's `ok` flag to an expected value, which lets an
//! untagged enum pick the right variant for a response.

use serde::de::{Deserialize, Deserializer, Error};

fn expect_bool<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let b = bool::deserialize(deserializer)?;

    if b == expected {
        Ok(b)
    } else {
        Err(Error::custom(format!("invalid bool: {}", b)))
    }
}

pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_bool(deserializer, true)
}

pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    expect_bool(deserializer, false)
}
