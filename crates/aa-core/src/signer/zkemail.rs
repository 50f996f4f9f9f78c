use async_trait::async_trait;
use chain_cosmos::tx::SignDoc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{abstract_account_entry, sign_doc_digest, SigningStrategy};
use crate::error::AaError;
use crate::types::{AAccountData, AuthenticatorKind};

/// A zk-email proof produced outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZkEmailProof {
    pub proof: serde_json::Value,
    pub public_inputs: Vec<String>,
}

/// Produces a proof that commits to `tx_digest`.
#[async_trait]
pub trait ZkEmailProver: Send + Sync {
    async fn prove(&self, tx_digest: [u8; 32]) -> Result<ZkEmailProof, AaError>;
}

/// ZKEmail authenticators. The proof is packaged as-is; verification happens
/// on chain.
pub struct ZkEmailStrategy<P> {
    prover: P,
}

impl<P: ZkEmailProver> ZkEmailStrategy<P> {
    pub fn new(prover: P) -> Self {
        Self { prover }
    }
}

#[async_trait]
impl<P: ZkEmailProver> SigningStrategy for ZkEmailStrategy<P> {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::ZkEmail
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
        debug!(abstract_account = %signer_address, "zk-email proof");
        let proof = self.prover.prove(sign_doc_digest(sign_doc)).await?;
        if proof.public_inputs.is_empty() {
            return Err(AaError::external("zk-email", "proof has no public inputs"));
        }
        serde_json::to_vec(&proof).map_err(|e| AaError::InvalidInput(format!("proof: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticProver(Vec<String>);

    #[async_trait]
    impl ZkEmailProver for StaticProver {
        async fn prove(&self, tx_digest: [u8; 32]) -> Result<ZkEmailProof, AaError> {
            let mut inputs = self.0.clone();
            if !inputs.is_empty() {
                inputs.push(hex::encode(tx_digest));
            }
            Ok(ZkEmailProof {
                proof: json!({ "pi_a": ["1", "2"], "protocol": "groth16" }),
                public_inputs: inputs,
            })
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
    async fn proof_is_packaged_as_json() {
        let strategy = ZkEmailStrategy::new(StaticProver(vec!["42".into()]));
        let bytes = strategy.sign("xion1aa", &doc()).await.unwrap();

        let packaged: ZkEmailProof = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(packaged.proof["protocol"], "groth16");
        assert_eq!(packaged.public_inputs[0], "42");
        assert_eq!(packaged.public_inputs[1], hex::encode(sign_doc_digest(&doc())));
    }

    #[tokio::test]
    async fn empty_public_inputs_rejected() {
        let strategy = ZkEmailStrategy::new(StaticProver(vec![]));
        assert!(strategy.sign("xion1aa", &doc()).await.is_err());
    }
}
