use aa_codec::format::secp256k1_signature_from_bytes;
use async_trait::async_trait;
use chain_cosmos::tx::SignDoc;
use tracing::debug;

use super::{abstract_account_entry, sign_doc_digest, SigningStrategy};
use crate::error::AaError;
use crate::types::{AAccountData, AuthenticatorKind};

/// A Cosmos wallet that can sign arbitrary data (ADR-036 or raw).
#[async_trait]
pub trait ArbitrarySigner: Send + Sync {
    /// Addresses the wallet holds keys for.
    async fn accounts(&self) -> Result<Vec<String>, AaError>;

    /// 64-byte secp256k1 signature over `data` by `signer`.
    async fn sign_arbitrary(
        &self,
        chain_id: &str,
        signer: &str,
        data: &[u8],
    ) -> Result<Vec<u8>, AaError>;
}

/// Secp256K1 authenticators backed by a wallet's "sign arbitrary" call.
pub struct DirectStrategy<W> {
    wallet: W,
}

impl<W: ArbitrarySigner> DirectStrategy<W> {
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }

    /// The wallet's only account. Zero or several is a protocol error: an
    /// authenticator maps to exactly one key at sign time.
    async fn sole_account(&self) -> Result<String, AaError> {
        let mut accounts = self.wallet.accounts().await?;
        match accounts.len() {
            1 => Ok(accounts.remove(0)),
            0 => Err(AaError::ProtocolState("signer has no accounts".into())),
            n => Err(AaError::ProtocolState(format!(
                "signer has {n} accounts, expected exactly one"
            ))),
        }
    }
}

#[async_trait]
impl<W: ArbitrarySigner> SigningStrategy for DirectStrategy<W> {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::Secp256K1
    }

    async fn accounts(
        &self,
        abstract_account: &str,
        authenticator_id: u8,
    ) -> Result<Vec<AAccountData>, AaError> {
        let account = self.sole_account().await?;
        Ok(abstract_account_entry(
            abstract_account,
            &account,
            authenticator_id,
            self.kind(),
        ))
    }

    async fn sign(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<Vec<u8>, AaError> {
        let account = self.sole_account().await?;
        let digest = sign_doc_digest(sign_doc);
        debug!(abstract_account = %signer_address, signer = %account, "direct sign");

        let signature = self
            .wallet
            .sign_arbitrary(&sign_doc.chain_id, &account, &digest)
            .await?;
        secp256k1_signature_from_bytes(&signature)?;
        Ok(signature)
    }
}
