// src/utils/time.rs
//! Wall-clock helpers for token time-window validation.

use chrono::Utc;

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn epoch_time_now() -> i64 {
    Utc::now().timestamp()
}

/// Lowers an `nbf` timestamp by the grace period, absorbing clock skew
/// between the token issuer and this verifier.
pub fn apply_nbf_grace_period(nbf: i64, grace_period_s: i64) -> i64 {
    nbf - grace_period_s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grace_period_lowers_nbf() {
        assert_eq!(apply_nbf_grace_period(8084, 300), 7784);
        assert_eq!(apply_nbf_grace_period(8084, 0), 8084);
    }
}
