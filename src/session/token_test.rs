use super::*;

// =============================================================================
// decode_claims
// =============================================================================

#[test]
fn decodes_far_future_exp() {
    let claims = decode_claims("header.eyJleHAiOjk5OTk5OTk5OTl9.sig").unwrap();
    assert_eq!(claims.exp, 9_999_999_999.0);
}

#[test]
fn decodes_padded_payload_with_extra_claims() {
    let claims = decode_claims("h.eyJleHAiOjEuNWU5LCJzdWIiOiJhbmEifQ==.s").unwrap();
    assert_eq!(claims.exp, 1.5e9);
}

#[test]
fn decodes_url_safe_payload() {
    // Standard encoding of this payload contains '+'; the URL-safe form uses '-'.
    let claims = decode_claims("h.eyJleHAiOjQxMDI0NDQ4MDAsIm5hbWUiOiLDsT8-In0.s").unwrap();
    assert_eq!(claims.exp, 4_102_444_800.0);
}

#[test]
fn rejects_two_segments() {
    let err = decode_claims("header.eyJleHAiOjF9").unwrap_err();
    assert!(matches!(err, TokenError::Shape(2)));
}

#[test]
fn rejects_four_segments() {
    let err = decode_claims("a.eyJleHAiOjF9.c.d").unwrap_err();
    assert!(matches!(err, TokenError::Shape(4)));
}

#[test]
fn rejects_single_opaque_string() {
    assert!(matches!(decode_claims("not-a-jwt").unwrap_err(), TokenError::Shape(1)));
}

#[test]
fn rejects_non_base64_payload() {
    let err = decode_claims("header.!!!not base64!!!.sig").unwrap_err();
    assert!(matches!(err, TokenError::Base64(_)));
}

#[test]
fn rejects_empty_payload() {
    assert!(matches!(decode_claims("header..sig").unwrap_err(), TokenError::Claims(_)));
}

#[test]
fn rejects_missing_exp() {
    let err = decode_claims("h.eyJzdWIiOiJhbmEifQ==.s").unwrap_err();
    assert!(matches!(err, TokenError::Claims(_)));
}

#[test]
fn rejects_string_exp() {
    let err = decode_claims("h.eyJleHAiOiJzb29uIn0=.s").unwrap_err();
    assert!(matches!(err, TokenError::Claims(_)));
}

// =============================================================================
// TokenClaims::is_valid_at
// =============================================================================

#[test]
fn valid_strictly_before_exp() {
    let claims = TokenClaims { exp: 100.0 };
    assert!(claims.is_valid_at(99.5));
    assert!(!claims.is_valid_at(100.0));
    assert!(!claims.is_valid_at(100.5));
}

#[test]
fn nan_is_never_valid() {
    assert!(!TokenClaims { exp: f64::NAN }.is_valid_at(0.0));
    assert!(!TokenClaims { exp: 100.0 }.is_valid_at(f64::NAN));
}
