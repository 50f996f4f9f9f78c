//! Chain and indexer collaborators.
//!
//! Both are injected handles owned by the caller; nothing here keeps a
//! process-wide client.

use async_trait::async_trait;
use chain_cosmos::proto::Any;
use tracing::debug;

use crate::error::AaError;
use crate::types::AuthenticatorKind;

/// `cosmos.auth.v1beta1.BaseAccount` as far as signing cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseAccount {
    pub address: String,
    /// `None` for abstract accounts, which have no key of their own.
    pub pub_key: Option<Any>,
    pub account_number: u64,
    pub sequence: u64,
}

#[async_trait]
pub trait ChainQuerier: Send + Sync {
    /// `Ok(None)` when the chain has never seen `address`.
    async fn get_account(&self, address: &str) -> Result<Option<BaseAccount>, AaError>;

    async fn get_chain_id(&self) -> Result<String, AaError>;
}

/// Looks up which authenticator ids on an account hold some raw material.
#[async_trait]
pub trait AuthenticatorIndexer: Send + Sync {
    /// Ids of authenticators of `kind` on `account_id` whose material is
    /// `raw_b64`.
    async fn find_authenticator_ids(
        &self,
        account_id: &str,
        kind: AuthenticatorKind,
        raw_b64: &str,
    ) -> Result<Vec<u8>, AaError>;
}

/// The single authenticator id matching `(account_id, kind, raw_b64)`.
///
/// Zero or several distinct matches is a protocol-state error.
pub async fn resolve_authenticator_id(
    indexer: &dyn AuthenticatorIndexer,
    account_id: &str,
    kind: AuthenticatorKind,
    raw_b64: &str,
) -> Result<u8, AaError> {
    if account_id.is_empty() || raw_b64.is_empty() {
        return Err(AaError::InvalidInput(
            "authenticator lookup needs an account id and raw material".into(),
        ));
    }

    let mut ids = indexer
        .find_authenticator_ids(account_id, kind, raw_b64)
        .await?;
    ids.sort_unstable();
    ids.dedup();
    debug!(account = %account_id, %kind, matches = ids.len(), "authenticator lookup");

    match ids.as_slice() {
        [id] => Ok(*id),
        [] => Err(AaError::ProtocolState(format!(
            "no {kind} authenticator found on {account_id}"
        ))),
        many => Err(AaError::ProtocolState(format!(
            "{} {kind} authenticators match on {account_id}, expected exactly one",
            many.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticIndexer(Vec<u8>);

    #[async_trait]
    impl AuthenticatorIndexer for StaticIndexer {
        async fn find_authenticator_ids(
            &self,
            _: &str,
            _: AuthenticatorKind,
            _: &str,
        ) -> Result<Vec<u8>, AaError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn single_match_resolves() {
        let id = resolve_authenticator_id(
            &StaticIndexer(vec![3]),
            "xion1aa",
            AuthenticatorKind::Secp256K1,
            "AQID",
        )
        .await
        .unwrap();
        assert_eq!(id, 3);
    }

    #[tokio::test]
    async fn duplicate_rows_collapse() {
        let id = resolve_authenticator_id(
            &StaticIndexer(vec![2, 2]),
            "xion1aa",
            AuthenticatorKind::Passkey,
            "AQID",
        )
        .await
        .unwrap();
        assert_eq!(id, 2);
    }

    #[tokio::test]
    async fn zero_or_many_is_protocol_state() {
        for ids in [vec![], vec![0, 1]] {
            let err = resolve_authenticator_id(
                &StaticIndexer(ids),
                "xion1aa",
                AuthenticatorKind::Jwt,
                "AQID",
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AaError::ProtocolState(_)));
        }
    }

    #[tokio::test]
    async fn empty_lookup_key_rejected() {
        let err = resolve_authenticator_id(
            &StaticIndexer(vec![1]),
            "",
            AuthenticatorKind::Jwt,
            "AQID",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AaError::InvalidInput(_)));
    }
}
