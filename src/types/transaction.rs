use crate::error::{NitroError, Result};
use alloy::primitives::{Bytes, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A transaction handed to [`Transport::send_transaction`](crate::Transport::send_transaction).
///
/// The caller says up front whether the payload is already signed, so no
/// transport ever has to guess from the serialized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxParams {
    /// Signed bytes, broadcast with `eth_sendRawTransaction`.
    Signed(SignedTransaction),
    /// Transaction fields, signed by the node or wallet behind the transport.
    Unsigned(UnsignedTransaction),
}

impl TxParams {
    pub fn signed(raw: impl Into<Bytes>) -> Self {
        TxParams::Signed(SignedTransaction { raw: raw.into() })
    }

    pub fn unsigned(tx: UnsignedTransaction) -> Self {
        TxParams::Unsigned(tx)
    }

    /// Reads caller-supplied JSON. An object with a `raw` field, or a bare hex
    /// string, is a signed transaction; any other object is forwarded as
    /// unsigned fields.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(NitroError::InvalidArgument(
                "transaction params are missing".to_string(),
            )),
            Value::String(raw) => SignedTransaction::from_hex(&raw).map(TxParams::Signed),
            Value::Object(fields) => match fields.get("raw") {
                Some(Value::String(raw)) => SignedTransaction::from_hex(raw).map(TxParams::Signed),
                Some(other) => Err(NitroError::InvalidArgument(format!(
                    "`raw` must be a hex string, got {other}"
                ))),
                None => Ok(TxParams::Unsigned(UnsignedTransaction(fields))),
            },
            other => Err(NitroError::InvalidArgument(format!(
                "transaction params must be an object or a raw hex string, got {other}"
            ))),
        }
    }

    /// Rejects payloads that carry nothing to send.
    pub fn validate(&self) -> Result<()> {
        match self {
            TxParams::Signed(tx) if tx.raw.is_empty() => Err(NitroError::InvalidArgument(
                "signed transaction has no bytes".to_string(),
            )),
            TxParams::Unsigned(tx) if tx.is_empty() => Err(NitroError::InvalidArgument(
                "unsigned transaction has no fields".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl From<SignedTransaction> for TxParams {
    fn from(tx: SignedTransaction) -> Self {
        TxParams::Signed(tx)
    }
}

impl From<UnsignedTransaction> for TxParams {
    fn from(tx: UnsignedTransaction) -> Self {
        TxParams::Unsigned(tx)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub raw: Bytes,
}

impl SignedTransaction {
    pub fn from_hex(raw: &str) -> Result<Self> {
        let raw = Bytes::from_str(raw.trim()).map_err(|e| {
            NitroError::InvalidArgument(format!("`{raw}` is not a hex encoded transaction: {e}"))
        })?;
        Ok(Self { raw })
    }
}

/// Unsigned transaction fields in JSON-RPC form (`from`, `to`, `value`, `gas`,
/// `gasPrice`, `data`, `nonce`, ...). The object is sent exactly as built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnsignedTransaction(Map<String, Value>);

impl UnsignedTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(self, address: impl Into<String>) -> Self {
        self.field("from", Value::String(address.into()))
    }

    pub fn to(self, address: impl Into<String>) -> Self {
        self.field("to", Value::String(address.into()))
    }

    pub fn value(self, wei: U256) -> Self {
        self.field("value", Value::String(format!("0x{wei:x}")))
    }

    pub fn gas(self, gas: u64) -> Self {
        self.field("gas", Value::String(format!("0x{gas:x}")))
    }

    pub fn gas_price(self, wei: u128) -> Self {
        self.field("gasPrice", Value::String(format!("0x{wei:x}")))
    }

    pub fn nonce(self, nonce: u64) -> Self {
        self.field("nonce", Value::String(format!("0x{nonce:x}")))
    }

    pub fn data(self, data: impl Into<Bytes>) -> Self {
        self.field("data", Value::String(data.into().to_string()))
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for UnsignedTransaction {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_field_is_signed() {
        let tx = TxParams::from_value(json!({"raw": "0xdeadbeef"})).unwrap();
        assert_eq!(
            tx,
            TxParams::signed(vec![0xdeu8, 0xad, 0xbe, 0xef])
        );
    }

    #[test]
    fn bare_hex_string_is_signed() {
        let tx = TxParams::from_value(json!("0x02f8")).unwrap();
        assert!(matches!(tx, TxParams::Signed(_)));
    }

    #[test]
    fn incidental_hex_does_not_make_a_tx_signed() {
        let fields = json!({
            "from": "0x1111111111111111111111111111111111111111",
            "to": "0x2222222222222222222222222222222222222222",
            "value": "0x1"
        });
        let tx = TxParams::from_value(fields.clone()).unwrap();
        match tx {
            TxParams::Unsigned(unsigned) => assert_eq!(unsigned.into_value(), fields),
            other => panic!("expected unsigned, got {other:?}"),
        }
    }

    #[test]
    fn null_params_are_rejected() {
        assert!(matches!(
            TxParams::from_value(Value::Null),
            Err(NitroError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_raw_is_rejected() {
        assert!(matches!(
            TxParams::from_value(json!({"raw": "0xnothex"})),
            Err(NitroError::InvalidArgument(_))
        ));
        assert!(matches!(
            TxParams::from_value(json!({"raw": 12})),
            Err(NitroError::InvalidArgument(_))
        ));
        assert!(matches!(
            TxParams::from_value(json!([1, 2])),
            Err(NitroError::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_payloads_fail_validation() {
        assert!(TxParams::signed(Vec::<u8>::new()).validate().is_err());
        assert!(TxParams::unsigned(UnsignedTransaction::new()).validate().is_err());
        assert!(TxParams::from_value(json!({"raw": "0x01"}))
            .unwrap()
            .validate()
            .is_ok());
    }

    #[test]
    fn builder_uses_rpc_quantities() {
        let tx = UnsignedTransaction::new()
            .from("0xaaaa")
            .to("0xbbbb")
            .value(U256::from(1_000u64))
            .gas(21_000)
            .data(vec![0x12u8, 0x34]);
        assert_eq!(
            tx.into_value(),
            json!({
                "from": "0xaaaa",
                "to": "0xbbbb",
                "value": "0x3e8",
                "gas": "0x5208",
                "data": "0x1234"
            })
        );
    }
}
