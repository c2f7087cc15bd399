//! # Token decoder: unverified claims from a compact token
//!
//! Access tokens issued by the auth API are three dot-separated segments whose
//! middle segment is URL-safe base64 JSON. [`decode_claims`] reads that payload
//! **without checking the signature**. The result only drives what the console
//! renders; the API re-checks authorization on every request.
//!
//! Decoding never fails loudly. A wrong segment count, bad base64, bad JSON or
//! a payload without `sub` all produce `None`, which callers treat as "no
//! session".
//!
//! [`inspect_token`] additionally looks at `exp` so an expired token is told
//! apart from a malformed one.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Standard alphabet, padding optional. Token segments are unpadded.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded token payload. Nothing here is verified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id, rendered as a string.
    #[serde(deserialize_with = "string_or_number")]
    pub sub: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub groups: Vec<i64>,
    /// Expiry as seconds since the epoch, when the issuer sets one.
    #[serde(default)]
    pub exp: Option<f64>,
    /// Every other field, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now as f64)
    }
}

/// How a stored token looks at a given instant.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenStatus {
    Valid(Claims),
    /// Readable, but `exp` is in the past. Nothing refreshes it.
    Expired(Claims),
    Invalid,
}

/// Decode the payload segment of `token`.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let bytes = PAYLOAD_ENGINE.decode(standard.as_bytes()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Decode `token` and classify it against `now` (seconds since the epoch).
pub fn inspect_token(token: &str, now: i64) -> TokenStatus {
    match decode_claims(token) {
        Some(claims) if claims.is_expired_at(now) => TokenStatus::Expired(claims),
        Some(claims) => TokenStatus::Valid(claims),
        None => TokenStatus::Invalid,
    }
}

/// A missing, `null` or non-array value reads as empty, and entries of the
/// wrong type are dropped, so a slip in one claim never hides the others.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Text(String),
        Int(i64),
    }

    Ok(match Subject::deserialize(deserializer)? {
        Subject::Text(s) => s,
        Subject::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// A compact token with an HS256-looking header and a fake signature.
    pub(crate) fn make_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decodes_full_payload() {
        let token = make_token(&serde_json::json!({
            "sub": "42",
            "roles": ["Admin", "Lab-Tech"],
            "groups": [1, 7],
            "exp": 4_102_444_800i64,
            "type": "access",
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.roles, vec!["Admin", "Lab-Tech"]);
        assert_eq!(claims.groups, vec![1, 7]);
        assert_eq!(claims.exp, Some(4_102_444_800.0));
        assert_eq!(claims.extra.get("type"), Some(&serde_json::json!("access")));
    }

    #[test]
    fn test_missing_roles_and_groups_default_to_empty() {
        let token = make_token(&serde_json::json!({ "sub": "7" }));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.roles.is_empty());
        assert!(claims.groups.is_empty());
        assert!(claims.exp.is_none());

        let token = make_token(&serde_json::json!({ "sub": "7", "roles": null, "groups": null }));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.roles.is_empty());
        assert!(claims.groups.is_empty());
    }

    #[test]
    fn test_mistyped_list_entries_are_dropped() {
        let token = make_token(&serde_json::json!({
            "sub": "1",
            "roles": ["Admin", 5],
            "groups": ["chem", 4, null],
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.roles, vec!["Admin"]);
        assert_eq!(claims.groups, vec![4]);

        let token = make_token(&serde_json::json!({ "sub": "1", "roles": ["Admin"], "groups": "chem" }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.roles, vec!["Admin"]);
        assert!(claims.groups.is_empty());
    }

    #[test]
    fn test_numeric_subject_becomes_string() {
        let token = make_token(&serde_json::json!({ "sub": 15 }));
        assert_eq!(decode_claims(&token).unwrap().sub, "15");
    }

    #[test]
    fn test_url_safe_characters_are_translated() {
        // '>' and '~' runs land on base64 digits 62/63 in this payload.
        let payload = serde_json::json!({ "sub": "u", "note": "??>??~~~" });
        let token = make_token(&payload);
        let middle = token.split('.').nth(1).unwrap();
        assert!(middle.contains('-') || middle.contains('_'));
        assert_eq!(decode_claims(&token).unwrap().extra["note"], "??>??~~~");
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let body = base64::engine::general_purpose::URL_SAFE.encode(br#"{"sub":"1"}"#);
        assert!(body.ends_with('='));
        let token = format!("h.{body}.s");
        assert_eq!(decode_claims(&token).unwrap().sub, "1");
    }

    #[test]
    fn test_malformed_tokens_return_none() {
        let good_payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"1"}"#);
        let cases = [
            String::new(),
            "not-a-token".to_string(),
            format!("h.{good_payload}"),
            format!("h.{good_payload}.s.extra"),
            "h.!!!.s".to_string(),
            format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json")),
            format!("h.{}.s", URL_SAFE_NO_PAD.encode(br#"["sub"]"#)),
            format!("h.{}.s", URL_SAFE_NO_PAD.encode(br#"{"roles":["Admin"]}"#)),
            "..".to_string(),
        ];
        for token in cases {
            assert!(decode_claims(&token).is_none(), "decoded {token:?}");
        }
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let token = make_token(&serde_json::json!({ "sub": "3", "roles": ["Read-Only"] }));
        assert_eq!(decode_claims(&token), decode_claims(&token));
    }

    #[test]
    fn test_inspect_token_classifies_expiry() {
        let live = make_token(&serde_json::json!({ "sub": "1", "exp": 2000 }));
        let dead = make_token(&serde_json::json!({ "sub": "1", "exp": 1000 }));
        let forever = make_token(&serde_json::json!({ "sub": "1" }));

        assert!(matches!(inspect_token(&live, 1500), TokenStatus::Valid(_)));
        assert!(matches!(inspect_token(&dead, 1500), TokenStatus::Expired(_)));
        assert!(matches!(inspect_token(&dead, 1000), TokenStatus::Expired(_)));
        assert!(matches!(inspect_token(&forever, i64::MAX), TokenStatus::Valid(_)));
        assert_eq!(inspect_token("garbage", 0), TokenStatus::Invalid);
    }
}
