use aa_codec::format::eth_signature_bytes;
use async_trait::async_trait;
use chain_cosmos::tx::SignDoc;
use tracing::debug;

use super::{abstract_account_entry, sign_doc_digest, SigningStrategy};
use crate::error::AaError;
use crate::types::{AAccountData, AuthenticatorKind};

/// An Ethereum wallet exposing `personal_sign`.
#[async_trait]
pub trait PersonalSigner: Send + Sync {
    /// The wallet's `0x` address.
    fn address(&self) -> String;

    /// Signs `0x`-hex `message` bytes with EIP-191. Returns a hex signature,
    /// with or without `0x`.
    async fn personal_sign(&self, message_hex: &str) -> Result<String, AaError>;
}

/// EthWallet authenticators.
pub struct EthStrategy<W> {
    wallet: W,
}

impl<W: PersonalSigner> EthStrategy<W> {
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }
}

#[async_trait]
impl<W: PersonalSigner> SigningStrategy for EthStrategy<W> {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::EthWallet
    }

    async fn accounts(
        &self,
        abstract_account: &str,
        authenticator_id: u8,
    ) -> Result<Vec<AAccountData>, AaError> {
        Ok(abstract_account_entry(
            abstract_account,
            &self.wallet.address(),
            authenticator_id,
            self.kind(),
        ))
    }

    async fn sign(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<Vec<u8>, AaError> {
        let message = format!("0x{}", hex::encode(sign_doc_digest(sign_doc)));
        debug!(abstract_account = %signer_address, "personal_sign request");

        let signature = self.wallet.personal_sign(&message).await?;
        // Strict: any non-hex character or wrong length is an error.
        Ok(eth_signature_bytes(&signature)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::local::LocalEthWallet;
    use chain_eth::verify_eth_wallet_signature;

    struct CannedWallet(String);

    #[async_trait]
    impl PersonalSigner for CannedWallet {
        fn address(&self) -> String {
            "0x0000000000000000000000000000000000000001".into()
        }

        async fn personal_sign(&self, _: &str) -> Result<String, AaError> {
            Ok(self.0.clone())
        }
    }

    fn doc() -> SignDoc {
        SignDoc {
            body_bytes: vec![0x0a, 0x00],
            auth_info_bytes: vec![0x12, 0x00],
            chain_id: "xion-testnet-2".into(),
            account_number: 3,
        }
    }

    #[tokio::test]
    async fn accepts_signature_with_or_without_prefix() {
        let raw = "ab".repeat(65);
        for sig in [raw.clone(), format!("0x{raw}"), format!("0x0x{}", raw.to_uppercase())] {
            let strategy = EthStrategy::new(CannedWallet(sig));
            assert_eq!(strategy.sign("xion1aa", &doc()).await.unwrap(), vec![0xab; 65]);
        }
    }

    #[tokio::test]
    async fn rejects_malformed_hex_instead_of_dropping_chars() {
        let mut sig = "ab".repeat(65);
        sig.replace_range(10..12, "zz");
        let err = EthStrategy::new(CannedWallet(sig)).sign("xion1aa", &doc()).await.unwrap_err();
        assert!(matches!(err, AaError::InputValidation(_)));
        assert!(err.to_string().contains("signature"));
    }

    #[tokio::test]
    async fn rejects_wrong_length() {
        let err = EthStrategy::new(CannedWallet("ab".repeat(64)))
            .sign("xion1aa", &doc())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("signature"));
    }

    #[tokio::test]
    async fn local_wallet_round_trip_recovers_address() {
        let wallet = LocalEthWallet::from_private_key(&[0x22; 32]).unwrap();
        let address = wallet.address();
        let strategy = EthStrategy::new(wallet);

        let accounts = strategy.accounts("xion1aa", 1).await.unwrap();
        assert_eq!(accounts[0].account_address, address);

        let signature = strategy.sign("xion1aa", &doc()).await.unwrap();
        let digest = sign_doc_digest(&doc());
        assert!(verify_eth_wallet_signature(&digest, &hex::encode(signature), &address).unwrap());
    }
}
