//! Transaction messages used around abstract accounts.

use crate::proto::{Any, ProtoWriter};
use crate::tx::Coin;

pub const MSG_REGISTER_ACCOUNT_TYPE_URL: &str = "/abstractaccount.v1.MsgRegisterAccount";
pub const MSG_EXEC_TYPE_URL: &str = "/cosmos.authz.v1beta1.MsgExec";

/// `abstractaccount.v1.MsgRegisterAccount`: instantiates an account contract
/// at its predictable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgRegisterAccount {
    pub sender: String,
    pub code_id: u64,
    /// JSON instantiate message, as raw bytes.
    pub msg: Vec<u8>,
    pub funds: Vec<Coin>,
    pub salt: Vec<u8>,
}

impl MsgRegisterAccount {
    pub fn encode(&self) -> Vec<u8> {
        let funds: Vec<Vec<u8>> = self.funds.iter().map(Coin::encode).collect();
        ProtoWriter::new()
            .string(1, &self.sender)
            .uint64(2, self.code_id)
            .bytes(3, &self.msg)
            .repeated(4, &funds)
            .bytes(5, &self.salt)
            .finish()
    }

    pub fn to_any(&self) -> Any {
        Any::new(MSG_REGISTER_ACCOUNT_TYPE_URL, self.encode())
    }
}

/// `cosmos.authz.v1beta1.MsgExec`: runs `msgs` under grants held by `grantee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgExec {
    pub grantee: String,
    pub msgs: Vec<Any>,
}

impl MsgExec {
    pub fn encode(&self) -> Vec<u8> {
        let msgs: Vec<Vec<u8>> = self.msgs.iter().map(Any::encode).collect();
        ProtoWriter::new()
            .string(1, &self.grantee)
            .repeated(2, &msgs)
            .finish()
    }

    pub fn to_any(&self) -> Any {
        Any::new(MSG_EXEC_TYPE_URL, self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_account_field_order() {
        let msg = MsgRegisterAccount {
            sender: "s".into(),
            code_id: 793,
            msg: b"{}".to_vec(),
            funds: vec![],
            salt: vec![0xab],
        };
        // 0a 01 's', 10 99 06, 1a 02 '{}', 2a 01 ab
        assert_eq!(
            hex::encode(msg.encode()),
            "0a01731099061a027b7d2a01ab"
        );
    }

    #[test]
    fn register_account_funds_are_coins() {
        let msg = MsgRegisterAccount {
            sender: String::new(),
            code_id: 0,
            msg: vec![],
            funds: vec![Coin::new(1, "uxion")],
            salt: vec![],
        };
        let coin = Coin::new(1, "uxion").encode();
        let mut expected = vec![0x22, coin.len() as u8];
        expected.extend_from_slice(&coin);
        assert_eq!(msg.encode(), expected);
    }

    #[test]
    fn register_account_any_type_url() {
        let msg = MsgRegisterAccount {
            sender: "s".into(),
            code_id: 1,
            msg: vec![],
            funds: vec![],
            salt: vec![],
        };
        assert_eq!(msg.to_any().type_url, "/abstractaccount.v1.MsgRegisterAccount");
    }

    #[test]
    fn exec_wraps_inner_messages() {
        let inner = Any::new("/a.B", vec![0xff]);
        let exec = MsgExec {
            grantee: "g".into(),
            msgs: vec![inner.clone()],
        };
        let encoded_inner = inner.encode();
        let mut expected = vec![0x0a, 0x01, b'g', 0x12, encoded_inner.len() as u8];
        expected.extend_from_slice(&encoded_inner);
        assert_eq!(exec.encode(), expected);
        assert_eq!(exec.to_any().type_url, "/cosmos.authz.v1beta1.MsgExec");
    }
}
