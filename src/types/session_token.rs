use serde::{Deserialize, Serialize};

use crate::utils::time::{now, unix_millis};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix in base 36 digits.
const SUFFIX_LEN: usize = 11;

/// Opaque identifier that ties every turn of one run to one remote conversation.
///
/// Tokens look like `session-1714555800000-k3j9x0a7c1q`: the creation time in
/// milliseconds followed by a random base-36 suffix.  Collisions only risk two
/// unrelated conversations sharing context, so the randomness is not
/// cryptographic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token.
    pub fn generate() -> Self {
        let millis = unix_millis(&now());
        let mut entropy = uuid::Uuid::new_v4().as_u128();
        let mut suffix = String::with_capacity(SUFFIX_LEN);
        for _ in 0..SUFFIX_LEN {
            suffix.push(BASE36[(entropy % 36) as usize] as char);
            entropy /= 36;
        }
        Self(format!("session-{millis}-{suffix}"))
    }

    /// The token as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
