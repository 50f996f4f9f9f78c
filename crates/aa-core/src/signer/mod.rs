//! Abstract-account signers.
//!
//! An [`AbstractSigner`] wraps one [`SigningStrategy`] (how a proof is
//! produced) and the authenticator id it proves for. It starts [`Unbound`]
//! because the account address is often unknown when the signer is built;
//! [`AbstractSigner::bind`] moves it to [`Bound`], and only a bound signer
//! can list accounts or sign.
//!
//! ```text
//! AbstractSigner<S, Unbound> --bind(address)--> AbstractSigner<S, Bound>
//!                              <---unbind()-----
//! ```
//!
//! A signer is not synchronized; use one instance for one signing operation
//! at a time.

pub mod direct;
pub mod eth;
pub mod jwt;
pub mod local;
pub mod passkey;
pub mod zkemail;

use aa_codec::format::{from_base64, to_base64};
use async_trait::async_trait;
use chain_cosmos::tx::SignDoc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::AaError;
use crate::types::{AAccountData, AuthenticatorKind};

pub use direct::{ArbitrarySigner, DirectStrategy};
pub use eth::{EthStrategy, PersonalSigner};
pub use jwt::{AuthTransport, HttpAuthTransport, JwtStrategy, TransportResponse};
pub use local::{LocalEthWallet, LocalSecp256k1Wallet};
pub use passkey::{PasskeyStrategy, WebAuthnAssertor};
pub use zkemail::{ZkEmailProof, ZkEmailProver, ZkEmailStrategy};

/// How one authenticator kind turns a sign doc into proof bytes.
#[async_trait]
pub trait SigningStrategy: Send + Sync {
    fn kind(&self) -> AuthenticatorKind;

    /// Candidate accounts for `abstract_account` under `authenticator_id`.
    async fn accounts(
        &self,
        abstract_account: &str,
        authenticator_id: u8,
    ) -> Result<Vec<AAccountData>, AaError>;

    /// Raw proof bytes for `sign_doc`, as the account contract expects them
    /// after the authenticator id byte.
    async fn sign(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<Vec<u8>, AaError>;
}

/// Result of a direct sign.
///
/// There is no `pub_key`: the chain picks the authenticator by id, not by an
/// embedded key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectSignResponse {
    /// Base64 proof bytes.
    pub signature: String,
}

impl DirectSignResponse {
    pub fn signature_bytes(&self) -> Result<Vec<u8>, AaError> {
        Ok(from_base64(&self.signature, "signature")?)
    }
}

/// Marker: no account address yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbound;

/// Marker: bound to an abstract account address.
#[derive(Debug, Clone)]
pub struct Bound {
    abstract_account: String,
}

pub struct AbstractSigner<S, State = Unbound> {
    strategy: S,
    authenticator_id: u8,
    state: State,
}

impl<S: SigningStrategy> AbstractSigner<S, Unbound> {
    pub fn new(strategy: S, authenticator_id: u8) -> Self {
        Self {
            strategy,
            authenticator_id,
            state: Unbound,
        }
    }

    pub fn bind(self, abstract_account: impl Into<String>) -> AbstractSigner<S, Bound> {
        let abstract_account = abstract_account.into();
        debug!(
            account = %abstract_account,
            kind = %self.strategy.kind(),
            "binding abstract signer"
        );
        AbstractSigner {
            strategy: self.strategy,
            authenticator_id: self.authenticator_id,
            state: Bound { abstract_account },
        }
    }
}

impl<S: SigningStrategy, State> AbstractSigner<S, State> {
    pub fn authenticator_id(&self) -> u8 {
        self.authenticator_id
    }

    pub fn kind(&self) -> AuthenticatorKind {
        self.strategy.kind()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Session fields (JWT token, passkey state) are set through here.
    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }
}

impl<S: SigningStrategy> AbstractSigner<S, Bound> {
    pub fn abstract_account(&self) -> &str {
        &self.state.abstract_account
    }

    /// Drops the account binding, keeping strategy and authenticator id.
    pub fn unbind(self) -> AbstractSigner<S, Unbound> {
        AbstractSigner {
            strategy: self.strategy,
            authenticator_id: self.authenticator_id,
            state: Unbound,
        }
    }

    pub async fn get_accounts(&self) -> Result<Vec<AAccountData>, AaError> {
        self.strategy
            .accounts(&self.state.abstract_account, self.authenticator_id)
            .await
    }

    pub async fn sign_direct(
        &self,
        signer_address: &str,
        sign_doc: &SignDoc,
    ) -> Result<DirectSignResponse, AaError> {
        let raw = self.strategy.sign(signer_address, sign_doc).await?;
        Ok(DirectSignResponse {
            signature: to_base64(&raw),
        })
    }
}

/// `SHA256` of the encoded sign doc; what every strategy proves.
pub fn sign_doc_digest(sign_doc: &SignDoc) -> [u8; 32] {
    Sha256::digest(sign_doc.encode()).into()
}

/// The single account entry produced by strategies whose proof is tied to
/// the abstract account itself.
pub(crate) fn abstract_account_entry(
    abstract_account: &str,
    account_address: &str,
    authenticator_id: u8,
    algo: AuthenticatorKind,
) -> Vec<AAccountData> {
    vec![AAccountData {
        address: abstract_account.to_string(),
        account_address: account_address.to_string(),
        authenticator_id,
        algo,
    }]
}
