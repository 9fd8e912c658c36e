//! Signature verification seam.
//!
//! The settlement core treats signatures as opaque blobs; their internal
//! structure belongs to the verifier behind this trait. Production uses
//! ed25519 with strict verification. A maker's [`AccountId`] is their
//! verifying key, so no key registry is needed.

use crossmatch_types::{AccountId, Signature, constants};
use ed25519_dalek::VerifyingKey;

/// Decides whether `signature` binds `message` to `signer`.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, message: &[u8; 32], signer: &AccountId, signature: &Signature) -> bool;
}

/// Strict ed25519 verification over the canonical order hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &[u8; 32], signer: &AccountId, signature: &Signature) -> bool {
        if signature.as_bytes().len() != constants::SIGNATURE_LENGTH {
            return false;
        }
        let Ok(key) = VerifyingKey::from_bytes(signer.as_bytes()) else {
            return false;
        };
        let Ok(sig) = ed25519_dalek::Signature::from_slice(signature.as_bytes()) else {
            return false;
        };
        key.verify_strict(message, &sig).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn keypair() -> (SigningKey, AccountId) {
        let sk = SigningKey::from_bytes(&[7u8; 32]);
        let account = AccountId::from_pubkey(sk.verifying_key().to_bytes());
        (sk, account)
    }

    #[test]
    fn valid_signature_accepted() {
        let (sk, account) = keypair();
        let message = [42u8; 32];
        let sig = Signature::from_bytes(sk.sign(&message).to_bytes().to_vec());
        assert!(Ed25519Verifier.verify(&message, &account, &sig));
    }

    #[test]
    fn wrong_message_rejected() {
        let (sk, account) = keypair();
        let sig = Signature::from_bytes(sk.sign(&[42u8; 32]).to_bytes().to_vec());
        assert!(!Ed25519Verifier.verify(&[43u8; 32], &account, &sig));
    }

    #[test]
    fn wrong_signer_rejected() {
        let (sk, _) = keypair();
        let other = AccountId::from_pubkey(
            SigningKey::from_bytes(&[8u8; 32]).verifying_key().to_bytes(),
        );
        let message = [42u8; 32];
        let sig = Signature::from_bytes(sk.sign(&message).to_bytes().to_vec());
        assert!(!Ed25519Verifier.verify(&message, &other, &sig));
    }

    #[test]
    fn empty_signature_rejected() {
        let (_, account) = keypair();
        assert!(!Ed25519Verifier.verify(&[42u8; 32], &account, &Signature::empty()));
    }

    #[test]
    fn garbage_key_rejected() {
        // Not every 32-byte string is a valid curve point; verification must
        // fail cleanly rather than panic.
        let account = AccountId([0xFF; 32]);
        let sig = Signature::from_bytes(vec![0u8; 64]);
        assert!(!Ed25519Verifier.verify(&[42u8; 32], &account, &sig));
    }
}
