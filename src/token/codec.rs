// src/token/codec.rs
//! DID token wire-format codec.
//!
//! A DID token is a base64url string encoding a JSON array of exactly two
//! elements: `[proof, claim]`. `proof` is a hex ECDSA signature with
//! recovery id; `claim` is itself a JSON-serialized string carrying the
//! signed fields. Decoding therefore parses JSON twice.
//!
//! The claim is kept as an order-preserving map: the verifier must
//! re-serialize it byte-for-byte as the issuer did when signing, so the
//! key order recorded at parse time is load-bearing.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::DidTokenError;

/// The claim portion of a DID token. Insertion order is preserved by
/// serde_json's `preserve_order` feature.
pub type Claim = serde_json::Map<String, Value>;

/// A decoded `[proof, claim]` envelope has exactly this many parts.
const EXPECTED_DID_TOKEN_CONTENT_LENGTH: usize = 2;

/// Fields every claim must carry. A `BTreeSet` so the missing-field error
/// message lists names in sorted order.
pub static REQUIRED_FIELDS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    ["iat", "ext", "nbf", "iss", "sub", "aud", "tid"]
        .into_iter()
        .collect()
});

fn malformed(reason: impl Into<String>) -> DidTokenError {
    DidTokenError::MalformedToken {
        reason: reason.into(),
    }
}

/// Decodes a DID token into its proof and claim.
///
/// # Arguments
/// * `did_token` - Base64url-encoded token string, as received from a
///   caller or an `Authorization` header.
///
/// # Returns
/// `(proof, claim)` where `proof` is the signature string untouched and
/// `claim` is the parsed claim map with all required fields present.
///
/// # Errors
/// - [`DidTokenError::MalformedToken`] if the token is not base64, not
///   UTF-8, not a two-element JSON array, or its claim is not a
///   JSON-serialized string
/// - [`DidTokenError::MissingClaimFields`] if required claim fields are
///   absent
pub fn decode(did_token: &str) -> Result<(String, Claim), DidTokenError> {
    // Issuers pad the base64, but tolerate unpadded input too.
    let raw = base64::decode_config(did_token, base64::URL_SAFE)
        .or_else(|_| base64::decode_config(did_token, base64::URL_SAFE_NO_PAD))
        .map_err(|e| {
            malformed(format!(
                "It has to be a base64-encoded JSON-serialized string. ({e})"
            ))
        })?;

    let text = String::from_utf8(raw).map_err(|e| {
        malformed(format!(
            "It has to be a base64-encoded JSON-serialized string. ({e})"
        ))
    })?;

    let envelope: Vec<Value> = serde_json::from_str(&text).map_err(|e| {
        malformed(format!(
            "It has to be a base64-encoded JSON-serialized string. ({e})"
        ))
    })?;

    if envelope.len() != EXPECTED_DID_TOKEN_CONTENT_LENGTH {
        return Err(malformed("It has to have two parts [proof, claim]."));
    }

    let proof = envelope[0]
        .as_str()
        .ok_or_else(|| malformed("Given proof should be a string."))?
        .to_string();

    let claim_text = envelope[1]
        .as_str()
        .ok_or_else(|| malformed("Given claim should be a JSON serialized string."))?;

    let claim: Claim = serde_json::from_str(claim_text).map_err(|e| {
        malformed(format!("Given claim should be a JSON serialized string. ({e})"))
    })?;

    check_required_fields(&claim)?;

    Ok((proof, claim))
}

/// Verifies that every required field is present on the claim.
///
/// # Errors
/// [`DidTokenError::MissingClaimFields`] listing the absent field names in
/// sorted order.
pub fn check_required_fields(claim: &Claim) -> Result<(), DidTokenError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !claim.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(DidTokenError::MissingClaimFields(missing));
    }

    Ok(())
}

/// Decodes the token and returns its `iss` claim: a Decentralized
/// Identifier populated with the signer's Ethereum public address.
pub fn get_issuer(did_token: &str) -> Result<String, DidTokenError> {
    let (_, claim) = decode(did_token)?;
    issuer_from_claim(&claim)
}

pub(crate) fn issuer_from_claim(claim: &Claim) -> Result<String, DidTokenError> {
    // Presence is guaranteed by `check_required_fields`; the value may
    // still be a non-string.
    let iss = &claim["iss"];
    iss.as_str()
        .map(str::to_owned)
        .ok_or_else(|| DidTokenError::MalformedIssuer {
            issuer: iss.to_string(),
        })
}

/// Extracts the public address from a DID issuer string.
///
/// The issuer follows `did:<method-name>:<method-specific-id>` and the
/// method-specific-id is the signer's public address. The address is taken
/// from the third colon-delimited segment, not the last one, so a
/// method-specific-id containing colons keeps its leading segment.
///
/// # Errors
/// [`DidTokenError::MalformedIssuer`] if the issuer has fewer than three
/// colon-delimited segments.
pub fn parse_public_address_from_issuer(issuer: &str) -> Result<String, DidTokenError> {
    let segments: Vec<&str> = issuer.split(':').collect();
    if segments.len() < 3 {
        return Err(DidTokenError::MalformedIssuer {
            issuer: issuer.to_string(),
        });
    }

    Ok(segments[2].to_string())
}

/// Decodes the token and returns the public address embedded in its
/// issuer.
pub fn get_public_address(did_token: &str) -> Result<String, DidTokenError> {
    parse_public_address_from_issuer(&get_issuer(did_token)?)
}

/// Formats a public address as a `did:ethr` issuer string, the inverse of
/// [`parse_public_address_from_issuer`]. Used when constructing outbound
/// API requests from an address.
pub fn construct_issuer_with_public_address(public_address: &str) -> String {
    format!("did:ethr:{public_address}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Builds a token the way the issuer does:
    /// base64url(JSON([proof, JSON(claim)])).
    fn encode(proof: &str, claim: &Claim) -> String {
        let claim_text = serde_json::to_string(claim).unwrap();
        let envelope = serde_json::to_string(&json!([proof, claim_text])).unwrap();
        base64::encode_config(envelope, base64::URL_SAFE)
    }

    fn full_claim() -> Claim {
        let mut claim = Claim::new();
        claim.insert("iat".into(), json!(1000));
        claim.insert("ext".into(), json!(9_999_999_999i64));
        claim.insert("nbf".into(), json!(1000));
        claim.insert("iss".into(), json!("did:ethr:0xDEADBEEF"));
        claim.insert("sub".into(), json!("s"));
        claim.insert("aud".into(), json!("a"));
        claim.insert("tid".into(), json!("t"));
        claim
    }

    #[test]
    fn decode_round_trips_proof_and_claim() {
        let claim = full_claim();
        let token = encode("0xproof", &claim);

        let (proof, decoded) = decode(&token).unwrap();
        assert_eq!(proof, "0xproof");
        assert_eq!(decoded, claim);
    }

    #[test]
    fn decode_tolerates_unpadded_base64() {
        let claim = full_claim();
        let token = encode("0xproof", &claim);
        let token = token.trim_end_matches('=');

        let (proof, _) = decode(token).unwrap();
        assert_eq!(proof, "0xproof");
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        let err = decode("not base64 at all!!!").unwrap_err();
        match err {
            DidTokenError::MalformedToken { reason } => {
                assert!(reason.starts_with(
                    "It has to be a base64-encoded JSON-serialized string."
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_json_payload() {
        let token = base64::encode_config("not json", base64::URL_SAFE);
        let err = decode(&token).unwrap_err();
        match err {
            DidTokenError::MalformedToken { reason } => {
                assert!(reason.starts_with(
                    "It has to be a base64-encoded JSON-serialized string."
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_wrong_arity() {
        let payload = serde_json::to_string(&json!(["only one part"])).unwrap();
        let token = base64::encode_config(payload, base64::URL_SAFE);

        let err = decode(&token).unwrap_err();
        assert_eq!(
            err,
            DidTokenError::MalformedToken {
                reason: "It has to have two parts [proof, claim].".into()
            }
        );
    }

    #[test]
    fn decode_rejects_claim_that_is_not_json() {
        let payload =
            serde_json::to_string(&json!(["0xproof", "{not valid json"])).unwrap();
        let token = base64::encode_config(payload, base64::URL_SAFE);

        let err = decode(&token).unwrap_err();
        match err {
            DidTokenError::MalformedToken { reason } => {
                assert!(reason
                    .starts_with("Given claim should be a JSON serialized string."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_preserves_claim_key_order() {
        // The verifier re-serializes the claim byte-for-byte, so the order
        // recorded at parse time must survive.
        let claim_text =
            r#"{"tid":"t","iat":1,"ext":2,"nbf":3,"iss":"did:ethr:0xA","sub":"s","aud":"a"}"#;
        let payload = serde_json::to_string(&json!(["0xproof", claim_text])).unwrap();
        let token = base64::encode_config(payload, base64::URL_SAFE);

        let (_, claim) = decode(&token).unwrap();
        assert_eq!(serde_json::to_string(&claim).unwrap(), claim_text);
    }

    #[test]
    fn check_required_fields_lists_missing_fields_sorted() {
        let mut claim = Claim::new();
        for field in ["nbf", "sub", "aud", "tid", "iat"] {
            claim.insert(field.into(), json!(0));
        }

        let err = check_required_fields(&claim).unwrap_err();
        assert_eq!(
            err,
            DidTokenError::MissingClaimFields(vec!["ext".into(), "iss".into()])
        );
        assert_eq!(
            err.to_string(),
            "DID token is missing required field(s): [\"ext\", \"iss\"]"
        );
    }

    #[test]
    fn check_required_fields_fails_for_every_proper_subset() {
        let all: Vec<&str> = REQUIRED_FIELDS.iter().copied().collect();

        // Drop each field in turn; the missing list is exactly that field.
        for dropped in &all {
            let mut claim = Claim::new();
            for field in all.iter().filter(|f| *f != dropped) {
                claim.insert((*field).into(), json!(0));
            }

            let err = check_required_fields(&claim).unwrap_err();
            assert_eq!(
                err,
                DidTokenError::MissingClaimFields(vec![dropped.to_string()])
            );
        }
    }

    #[test]
    fn check_required_fields_passes_on_full_claim() {
        check_required_fields(&full_claim()).unwrap();
    }

    #[test]
    fn get_issuer_returns_iss_claim() {
        let token = encode("0xproof", &full_claim());
        assert_eq!(get_issuer(&token).unwrap(), "did:ethr:0xDEADBEEF");
    }

    #[test]
    fn parse_public_address_takes_third_segment() {
        assert_eq!(
            parse_public_address_from_issuer("did:ethr:0xABC").unwrap(),
            "0xABC"
        );
    }

    #[test]
    fn parse_public_address_ignores_trailing_segments() {
        // A method-specific-id with embedded colons keeps only its leading
        // segment, unlike a take-the-last-segment split.
        assert_eq!(
            parse_public_address_from_issuer("did:ethr:0xABC:extra").unwrap(),
            "0xABC"
        );
    }

    #[test]
    fn parse_public_address_rejects_malformed_issuer() {
        let err = parse_public_address_from_issuer("not-a-did").unwrap_err();
        assert_eq!(
            err,
            DidTokenError::MalformedIssuer {
                issuer: "not-a-did".into()
            }
        );
    }

    #[test]
    fn get_public_address_composes_issuer_parsing() {
        let token = encode("0xproof", &full_claim());
        assert_eq!(get_public_address(&token).unwrap(), "0xDEADBEEF");
    }

    #[test]
    fn construct_issuer_formats_did_ethr() {
        assert_eq!(
            construct_issuer_with_public_address("0xABC"),
            "did:ethr:0xABC"
        );
    }
}
