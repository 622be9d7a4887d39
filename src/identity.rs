//! Client identity generation.
//!
//! Every [`Client`](crate::Client) instance carries a randomly generated
//! identifier that tags submitted workflows so the server can associate
//! results and push notifications with the submitter. The identifier is a
//! correlation key, not a credential; uniqueness matters, secrecy does not.

use rand::Rng;

/// Fixed prefix of every generated client identifier.
pub(crate) const CLIENT_ID_PREFIX: &str = "ofx_client_";

/// Number of random hex digits appended to the prefix.
pub(crate) const CLIENT_ID_HEX_DIGITS: usize = 16;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Generate a fresh client identifier: the fixed prefix followed by
/// sixteen random lowercase hex digits (64 bits of entropy).
pub(crate) fn generate_client_id() -> String {
    let mut rng = rand::rng();
    let mut id = String::with_capacity(CLIENT_ID_PREFIX.len() + CLIENT_ID_HEX_DIGITS);
    id.push_str(CLIENT_ID_PREFIX);
    for _ in 0..CLIENT_ID_HEX_DIGITS {
        id.push(HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())] as char);
    }
    id
}
