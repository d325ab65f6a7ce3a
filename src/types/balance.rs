use crate::error::{NitroError, Result};
use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use std::{fmt, str::FromStr};

/// Decimals of the native asset: 1 ETH = 10^18 wei.
pub const ETHER_DECIMALS: u32 = 18;

/// Native asset symbol accepted by `eth_getBalance`.
pub const NATIVE_ASSET: &str = "ETH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Balance {
    wei: U256,
}

impl Balance {
    pub fn from_wei(wei: U256) -> Self {
        Self { wei }
    }

    /// Parses a JSON-RPC hex quantity such as `"0x1bc16d674ec80000"`. The
    /// `0x` prefix is optional.
    pub fn from_hex_quantity(quantity: &str) -> Result<Self> {
        let digits = quantity
            .strip_prefix("0x")
            .or_else(|| quantity.strip_prefix("0X"))
            .unwrap_or(quantity);

        if digits.is_empty() {
            return Err(NitroError::Numeric(format!(
                "quantity `{quantity}` has no hex digits"
            )));
        }

        let wei = U256::from_str_radix(digits, 16).map_err(|e| {
            NitroError::Numeric(format!("`{quantity}` is not a 256-bit hex quantity: {e}"))
        })?;
        Ok(Self { wei })
    }

    pub fn wei(&self) -> U256 {
        self.wei
    }

    /// The amount in ether, `wei / 10^18`, without rounding.
    pub fn ether(&self) -> Result<BigDecimal> {
        BigDecimal::from_str(&format!("{}E-{ETHER_DECIMALS}", self.wei))
            .map_err(|e| NitroError::Numeric(e.to_string()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ether() {
            Ok(ether) => write!(f, "{} {NATIVE_ASSET}", ether.normalized()),
            Err(_) => write!(f, "{} wei", self.wei),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn one_ether() {
        let balance = Balance::from_hex_quantity("0xde0b6b3a7640000").unwrap();
        assert_eq!(balance.wei(), U256::from(10u64.pow(18)));
        assert_eq!(balance.ether().unwrap(), dec("1"));
    }

    #[test]
    fn fractional_amount_is_exact() {
        // 1.5 ETH and a single wei
        let balance = Balance::from_hex_quantity("0x14d1120d7b160000").unwrap();
        assert_eq!(balance.ether().unwrap(), dec("1.5"));

        let one_wei = Balance::from_hex_quantity("0x1").unwrap();
        assert_eq!(one_wei.ether().unwrap(), dec("0.000000000000000001"));
    }

    #[test]
    fn prefix_is_optional() {
        let with = Balance::from_hex_quantity("0xff").unwrap();
        let upper = Balance::from_hex_quantity("0XFF").unwrap();
        let without = Balance::from_hex_quantity("ff").unwrap();
        assert_eq!(with, without);
        assert_eq!(with, upper);
        assert_eq!(with.wei(), U256::from(255u64));
    }

    #[test]
    fn zero_balance() {
        let balance = Balance::from_hex_quantity("0x0").unwrap();
        assert_eq!(balance.ether().unwrap(), dec("0"));
    }

    #[test]
    fn large_values_beyond_u128() {
        let quantity = format!("0x{}", "f".repeat(40));
        let balance = Balance::from_hex_quantity(&quantity).unwrap();
        let expected = U256::from_str_radix(&"f".repeat(40), 16).unwrap();
        assert_eq!(balance.wei(), expected);
    }

    #[test]
    fn invalid_hex_is_numeric_error() {
        assert!(matches!(
            Balance::from_hex_quantity("0xzz"),
            Err(NitroError::Numeric(_))
        ));
        assert!(matches!(
            Balance::from_hex_quantity("0x"),
            Err(NitroError::Numeric(_))
        ));
        let overflow = format!("0x1{}", "0".repeat(64));
        assert!(matches!(
            Balance::from_hex_quantity(&overflow),
            Err(NitroError::Numeric(_))
        ));
    }

    #[test]
    fn display_in_ether() {
        let balance = Balance::from_hex_quantity("0x14d1120d7b160000").unwrap();
        assert_eq!(balance.to_string(), "1.5 ETH");
    }
}
