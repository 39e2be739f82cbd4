use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};

/// Length of the issued credential in hex characters.
pub const CREDENTIAL_LEN: usize = 16;

/// Length of the random seed mixed into each derivation.
const SEED_LEN: usize = 8;

/// Derives an opaque voter credential from the identity fields plus a fresh
/// random seed.
///
/// Pure apart from the internally drawn randomness; never touches storage.
/// The result is only statistically unique, so the caller retries with a
/// fresh call if the store rejects the credential as a duplicate.
pub fn generate(firstname: &str, lastname: &str, email: &str, external_id: &str) -> String {
    let seed: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SEED_LEN)
        .map(char::from)
        .collect();
    derive(firstname, lastname, email, external_id, &seed)
}

fn derive(firstname: &str, lastname: &str, email: &str, external_id: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(firstname.as_bytes());
    hasher.update(lastname.as_bytes());
    hasher.update(email.as_bytes());
    hasher.update(external_id.as_bytes());
    hasher.update(seed.as_bytes());
    let digest = hasher.finalize();

    let mut token = hex::encode(digest);
    token.truncate(CREDENTIAL_LEN);
    token
}
