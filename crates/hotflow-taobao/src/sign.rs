// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MD5 request signing for the TOP router.

use md5::{Digest, Md5};

/// Name of the parameter that carries the signature.
pub const SIGN_PARAM: &str = "sign";

/// Computes the request signature for `params`.
///
/// Absent values and any existing `sign` entry are ignored. The rest are
/// sorted by name and hashed as `secret + k1 + v1 + k2 + v2 + … + secret`,
/// rendered as uppercase hex. Input order does not matter.
pub fn sign<I, K, V>(params: I, secret: &str) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut present: Vec<(K, V)> = params
        .into_iter()
        .filter(|(name, _)| name.as_ref() != SIGN_PARAM)
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();
    present.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    for (name, value) in &present {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(value.as_ref().as_bytes());
    }
    hasher.update(secret.as_bytes());
    hex::encode_upper(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<(&'static str, Option<&'static str>)> {
        vec![
            ("app_key", Some("123456")),
            ("method", Some("taobao.test")),
            ("timestamp", Some("2024-01-01 00:00:00")),
            ("format", Some("json")),
        ]
    }

    #[test]
    fn matches_known_digest() {
        // md5("abcdefg" + "app_key123456" + "formatjson" + "methodtaobao.test"
        //     + "timestamp2024-01-01 00:00:00" + "abcdefg")
        assert_eq!(sign(sample(), "abcdefg"), "7B7031BD85FC93603CE0D4F2832A3423");
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(sign(sample(), "abcdefg"), sign(reversed, "abcdefg"));
    }

    #[test]
    fn absent_values_and_existing_signature_are_ignored() {
        let mut params = sample();
        params.push(("adzone_id", None));
        params.push(("sign", Some("STALE")));
        assert_eq!(sign(params, "abcdefg"), sign(sample(), "abcdefg"));
    }

    #[test]
    fn secret_changes_signature() {
        assert_ne!(sign(sample(), "abcdefg"), sign(sample(), "gfedcba"));
    }

    #[test]
    fn output_is_uppercase_hex() {
        let signature = sign(sample(), "s");
        assert_eq!(signature.len(), 32);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}
