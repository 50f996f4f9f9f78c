//! Transaction signing for abstract and ordinary accounts.
//!
//! ```text
//! get_account(signer) --pub_key--> StandardSigner::sign
//!        |
//!        no pub_key
//!        v
//! bind signer -> match authenticator id -> signer data
//!   -> routing AuthInfo -> SignDoc -> sign_direct
//!   -> TxRaw { signatures: [[authenticator_id] ++ proof] }
//! ```
//!
//! Nothing is retried here and no partial state survives a failure: a
//! signer bound during a failed call goes back unbound.

use std::sync::Arc;

use async_trait::async_trait;
use chain_cosmos::proto::Any;
use chain_cosmos::tx::{routing_auth_info, Fee, SignDoc, TxBody, TxRaw};
use tracing::{debug, info};

use crate::error::AaError;
use crate::query::{BaseAccount, ChainQuerier};
use crate::signer::{AbstractSigner, Bound, SigningStrategy, Unbound};
use crate::types::AAccountData;

/// Account number, sequence and chain id for a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerData {
    pub account_number: u64,
    pub sequence: u64,
    pub chain_id: String,
}

/// The ordinary signing path for accounts that hold a real key.
#[async_trait]
pub trait StandardSigner: Send + Sync {
    async fn sign(
        &self,
        signer_address: &str,
        messages: &[Any],
        fee: &Fee,
        memo: &str,
        signer_data: Option<&SignerData>,
    ) -> Result<TxRaw, AaError>;
}

enum SignerSlot<S> {
    Unbound(AbstractSigner<S, Unbound>),
    Bound(AbstractSigner<S, Bound>),
}

/// Signs transactions for one abstract signer, falling back to a
/// [`StandardSigner`] for accounts that have a public key on chain.
pub struct AAClient<S> {
    querier: Arc<dyn ChainQuerier>,
    standard: Arc<dyn StandardSigner>,
    signer: Option<SignerSlot<S>>,
}

impl<S: SigningStrategy> AAClient<S> {
    /// Client with a signer that binds to the first account it signs for.
    pub fn new(
        querier: Arc<dyn ChainQuerier>,
        standard: Arc<dyn StandardSigner>,
        signer: AbstractSigner<S, Unbound>,
    ) -> Self {
        Self {
            querier,
            standard,
            signer: Some(SignerSlot::Unbound(signer)),
        }
    }

    /// Client with a signer already bound to its account.
    pub fn with_bound_signer(
        querier: Arc<dyn ChainQuerier>,
        standard: Arc<dyn StandardSigner>,
        signer: AbstractSigner<S, Bound>,
    ) -> Self {
        Self {
            querier,
            standard,
            signer: Some(SignerSlot::Bound(signer)),
        }
    }

    /// The bound account, once there is one.
    pub fn bound_account(&self) -> Option<&str> {
        match &self.signer {
            Some(SignerSlot::Bound(signer)) => Some(signer.abstract_account()),
            _ => None,
        }
    }

    /// Takes the signer out of the client, bound to `signer_address`.
    ///
    /// The flag is true when the signer was unbound and got bound here. A
    /// signer already bound to a different account stays in place and the
    /// call fails.
    fn take_bound_signer(
        &mut self,
        signer_address: &str,
    ) -> Result<(AbstractSigner<S, Bound>, bool), AaError> {
        match self.signer.take() {
            Some(SignerSlot::Unbound(signer)) => Ok((signer.bind(signer_address), true)),
            Some(SignerSlot::Bound(signer)) if signer.abstract_account() == signer_address => {
                Ok((signer, false))
            }
            Some(SignerSlot::Bound(signer)) => {
                let err = AaError::ProtocolState(format!(
                    "signer is bound to {}, not {signer_address}",
                    signer.abstract_account()
                ));
                self.signer = Some(SignerSlot::Bound(signer));
                Err(err)
            }
            // Only reachable if an earlier sign future was dropped mid-flight.
            None => Err(AaError::ProtocolState("client has no signer".into())),
        }
    }

    /// Signs `messages` for `signer_address`.
    ///
    /// Accounts with an on-chain public key go through the standard signer
    /// untouched. Abstract accounts get a routing `AuthInfo` and a signature
    /// prefixed with the authenticator id.
    ///
    /// An unbound signer stays bound to `signer_address` only if signing
    /// succeeds; on failure it is returned to the client unbound.
    pub async fn sign(
        &mut self,
        signer_address: &str,
        messages: Vec<Any>,
        fee: Fee,
        memo: &str,
        explicit_signer_data: Option<SignerData>,
    ) -> Result<TxRaw, AaError> {
        let account = self.querier.get_account(signer_address).await?;

        if let Some(account) = account.as_ref().filter(|a| a.pub_key.is_some()) {
            info!(address = %account.address, "account has a public key, using standard signer");
            return self
                .standard
                .sign(
                    signer_address,
                    &messages,
                    &fee,
                    memo,
                    explicit_signer_data.as_ref(),
                )
                .await;
        }

        let (signer, newly_bound) = self.take_bound_signer(signer_address)?;
        let result = self
            .sign_abstract(&signer, account, messages, fee, memo, explicit_signer_data)
            .await;

        self.signer = Some(match (&result, newly_bound) {
            (Err(e), true) => {
                debug!(account = %signer_address, error = %e, "signing failed, unbinding signer");
                SignerSlot::Unbound(signer.unbind())
            }
            _ => SignerSlot::Bound(signer),
        });
        result
    }

    async fn sign_abstract(
        &self,
        signer: &AbstractSigner<S, Bound>,
        account: Option<BaseAccount>,
        messages: Vec<Any>,
        fee: Fee,
        memo: &str,
        explicit_signer_data: Option<SignerData>,
    ) -> Result<TxRaw, AaError> {
        let signer_address = signer.abstract_account();
        let authenticator_id = signer.authenticator_id();

        let resolved = select_account(signer.get_accounts().await?, authenticator_id)?;
        debug!(
            account = %resolved.address,
            signer = %resolved.account_address,
            authenticator_id,
            kind = %resolved.algo,
            "resolved abstract account"
        );

        let signer_data = match explicit_signer_data {
            Some(data) => data,
            None => {
                let account = account.ok_or_else(|| {
                    AaError::ProtocolState(format!("AA account not found on chain: {signer_address}"))
                })?;
                SignerData {
                    account_number: account.account_number,
                    sequence: account.sequence,
                    chain_id: self.querier.get_chain_id().await?,
                }
            }
        };

        let auth_info = routing_auth_info(&resolved.address, signer_data.sequence, fee)?;
        let body = TxBody::new(messages, memo);
        let sign_doc = SignDoc {
            body_bytes: body.encode(),
            auth_info_bytes: auth_info.encode(),
            chain_id: signer_data.chain_id,
            account_number: signer_data.account_number,
        };
        debug!(
            chain_id = %sign_doc.chain_id,
            account_number = sign_doc.account_number,
            sequence = signer_data.sequence,
            "assembled sign doc"
        );

        let response = signer.sign_direct(&resolved.address, &sign_doc).await?;
        let proof = response.signature_bytes()?;

        let mut signature = Vec::with_capacity(1 + proof.len());
        signature.push(authenticator_id);
        signature.extend_from_slice(&proof);
        info!(account = %resolved.address, authenticator_id, "signed abstract account transaction");

        Ok(TxRaw {
            body_bytes: sign_doc.body_bytes,
            auth_info_bytes: sign_doc.auth_info_bytes,
            signatures: vec![signature],
        })
    }
}

/// The one account whose authenticator id is `authenticator_id`.
fn select_account(
    accounts: Vec<AAccountData>,
    authenticator_id: u8,
) -> Result<AAccountData, AaError> {
    let mut matching: Vec<AAccountData> = accounts
        .into_iter()
        .filter(|a| a.authenticator_id == authenticator_id)
        .collect();
    match matching.len() {
        1 => Ok(matching.remove(0)),
        0 => Err(AaError::ProtocolState(format!(
            "account not found in signer (authenticator id {authenticator_id})"
        ))),
        n => Err(AaError::ProtocolState(format!(
            "{n} accounts in signer match authenticator id {authenticator_id}"
        ))),
    }
}
