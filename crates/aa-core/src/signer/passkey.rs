use async_trait::async_trait;
use chain_cosmos::tx::SignDoc;
use tracing::debug;

use super::{abstract_account_entry, sign_doc_digest, SigningStrategy};
use crate::error::AaError;
use crate::types::{AAccountData, AuthenticatorKind};

/// Runs a WebAuthn assertion ceremony over a 32-byte challenge and returns
/// the serialized public-key credential.
#[async_trait]
pub trait WebAuthnAssertor: Send + Sync {
    async fn get_assertion(&self, challenge: [u8; 32]) -> Result<serde_json::Value, AaError>;
}

/// Passkey authenticators. The proof is the full assertion credential as
/// JSON bytes.
pub struct PasskeyStrategy<A> {
    assertor: A,
}

impl<A: WebAuthnAssertor> PasskeyStrategy<A> {
    pub fn new(assertor: A) -> Self {
        Self { assertor }
    }
}

#[async_trait]
impl<A: WebAuthnAssertor> SigningStrategy for PasskeyStrategy<A> {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::Passkey
    }

    async fn accounts(
        &self,
        abstract_account: &str,
        authenticator_id: u8,
    ) -> Result<Vec<AAccountData>, AaError> {
        Ok(abstract_account_entry(
            abstract_account,
            abstract_account,
            authenticator_id,
            self.kind(),
        ))
    }

    async fn sign(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<Vec<u8>, AaError> {
        debug!(abstract_account = %signer_address, "passkey assertion");
        let credential = self.assertor.get_assertion(sign_doc_digest(sign_doc)).await?;
        if !credential.is_object() {
            return Err(AaError::external(
                "webauthn",
                "assertion is not a credential object",
            ));
        }
        serde_json::to_vec(&credential)
            .map_err(|e| AaError::InvalidInput(format!("credential: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aa_codec::format::to_base64;
    use serde_json::json;

    struct EchoAssertor;

    #[async_trait]
    impl WebAuthnAssertor for EchoAssertor {
        async fn get_assertion(&self, challenge: [u8; 32]) -> Result<serde_json::Value, AaError> {
            Ok(json!({
                "id": "cred-1",
                "type": "public-key",
                "response": { "challenge": to_base64(&challenge) },
            }))
        }
    }

    struct NullAssertor;

    #[async_trait]
    impl WebAuthnAssertor for NullAssertor {
        async fn get_assertion(&self, _: [u8; 32]) -> Result<serde_json::Value, AaError> {
            Ok(serde_json::Value::Null)
        }
    }

    fn doc() -> SignDoc {
        SignDoc {
            body_bytes: vec![0x0a, 0x00],
            auth_info_bytes: vec![0x12, 0x00],
            chain_id: "xion-testnet-2".into(),
            account_number: 1,
        }
    }

    #[tokio::test]
    async fn challenge_is_sign_doc_digest() {
        let proof = PasskeyStrategy::new(EchoAssertor).sign("xion1aa", &doc()).await.unwrap();
        let credential: serde_json::Value = serde_json::from_slice(&proof).unwrap();
        assert_eq!(credential["id"], "cred-1");
        assert_eq!(
            credential["response"]["challenge"],
            to_base64(&sign_doc_digest(&doc()))
        );
    }

    #[tokio::test]
    async fn non_object_assertion_rejected() {
        let err = PasskeyStrategy::new(NullAssertor).sign("xion1aa", &doc()).await.unwrap_err();
        assert!(matches!(err, AaError::ExternalService { .. }));
    }
}
