//! # Domain Value Objects
//!
//! Immutable value types for governance queries.

use super::errors::GovernanceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Numeric domain identifier of a chain within a deployment.
pub type Domain = u32;

/// Chains known to the domain table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainName {
    /// Celo mainnet.
    Celo,
    /// Ethereum mainnet.
    Ethereum,
    /// Avalanche C-chain.
    Avalanche,
    /// Polygon PoS.
    Polygon,
    /// Celo testnet.
    Alfajores,
    /// Avalanche testnet.
    Fuji,
    /// Ethereum testnet.
    Goerli,
    /// Ethereum testnet.
    Kovan,
    /// Polygon testnet.
    Mumbai,
    /// Local development chain 1.
    Test1,
    /// Local development chain 2.
    Test2,
    /// Local development chain 3.
    Test3,
}

impl ChainName {
    /// Every known chain, in table order.
    pub const ALL: [ChainName; 12] = [
        ChainName::Celo,
        ChainName::Ethereum,
        ChainName::Avalanche,
        ChainName::Polygon,
        ChainName::Alfajores,
        ChainName::Fuji,
        ChainName::Goerli,
        ChainName::Kovan,
        ChainName::Mumbai,
        ChainName::Test1,
        ChainName::Test2,
        ChainName::Test3,
    ];

    /// Domain id assigned to this chain.
    pub fn domain_id(&self) -> Domain {
        match self {
            ChainName::Celo => 0x63_65_6c_6f,      // "celo"
            ChainName::Ethereum => 0x00_65_74_68,  // "eth"
            ChainName::Avalanche => 0x61_76_61_78, // "avax"
            ChainName::Polygon => 0x70_6f_6c_79,   // "poly"
            ChainName::Alfajores => 1000,
            ChainName::Fuji => 43113,
            ChainName::Goerli => 5,
            ChainName::Kovan => 3000,
            ChainName::Mumbai => 80001,
            ChainName::Test1 => 13371,
            ChainName::Test2 => 13372,
            ChainName::Test3 => 13373,
        }
    }

    /// Reverse lookup from a domain id.
    pub fn from_domain_id(domain: Domain) -> Option<ChainName> {
        Self::ALL.into_iter().find(|c| c.domain_id() == domain)
    }

    /// Lowercase chain name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainName::Celo => "celo",
            ChainName::Ethereum => "ethereum",
            ChainName::Avalanche => "avalanche",
            ChainName::Polygon => "polygon",
            ChainName::Alfajores => "alfajores",
            ChainName::Fuji => "fuji",
            ChainName::Goerli => "goerli",
            ChainName::Kovan => "kovan",
            ChainName::Mumbai => "mumbai",
            ChainName::Test1 => "test1",
            ChainName::Test2 => "test2",
            ChainName::Test3 => "test3",
        }
    }
}

impl fmt::Display for ChainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainName {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| GovernanceError::UnknownChain(s.to_string()))
    }
}

/// A chain name paired with its domain id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Chain name.
    pub name: ChainName,
    /// Domain id.
    pub id: Domain,
}

impl DomainRecord {
    /// Look a chain up in the domain table.
    pub fn of(name: ChainName) -> Self {
        Self {
            name,
            id: name.domain_id(),
        }
    }
}

/// 20-byte chain address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The null address. A router reporting it has no governor.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the null address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// EIP-55 mixed-case hex encoding.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 40 {
            return Err(GovernanceError::InvalidAddress(s.to_string()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| GovernanceError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Addresses of an upgradeable contract deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxiedAddress {
    /// Proxy the contract is called through.
    pub proxy: Address,
    /// Implementation behind the proxy.
    pub implementation: Address,
    /// Upgrade beacon, when the proxy uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacon: Option<Address>,
}

impl ProxiedAddress {
    /// Create a descriptor without a beacon.
    pub fn new(proxy: Address, implementation: Address) -> Self {
        Self {
            proxy,
            implementation,
            beacon: None,
        }
    }

    /// Attach a beacon address.
    pub fn with_beacon(mut self, beacon: Address) -> Self {
        self.beacon = Some(beacon);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_domain_ids() {
        assert_eq!(ChainName::Test1.domain_id(), 13371);
        assert_eq!(ChainName::Goerli.domain_id(), 5);
        assert_eq!(ChainName::Celo.domain_id(), 1667591279);
        assert_eq!(ChainName::Ethereum.domain_id(), 6648936);
    }

    #[test]
    fn test_domain_ids_unique() {
        let mut ids: Vec<Domain> = ChainName::ALL.iter().map(|c| c.domain_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ChainName::ALL.len());
    }

    #[test]
    fn test_chain_name_parse() {
        assert_eq!("test2".parse::<ChainName>().unwrap(), ChainName::Test2);
        assert_eq!("Polygon".parse::<ChainName>().unwrap(), ChainName::Polygon);
        assert!(matches!(
            "solana".parse::<ChainName>(),
            Err(GovernanceError::UnknownChain(_))
        ));
    }

    #[test]
    fn test_chain_name_reverse_lookup() {
        assert_eq!(ChainName::from_domain_id(80001), Some(ChainName::Mumbai));
        assert_eq!(ChainName::from_domain_id(42), None);
    }

    #[test]
    fn test_chain_name_serde() {
        let json = serde_json::to_string(&ChainName::Alfajores).unwrap();
        assert_eq!(json, "\"alfajores\"");
        let back: ChainName = serde_json::from_str("\"test3\"").unwrap();
        assert_eq!(back, ChainName::Test3);
    }

    #[test]
    fn test_address_parse_and_display() {
        let addr: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        assert_eq!(addr.as_bytes()[19], 0xaa);
        assert_eq!(addr.to_string(), "0x00000000000000000000000000000000000000aa");

        let bare: Address = "00000000000000000000000000000000000000aa".parse().unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_address_rejects_malformed() {
        assert!("0xAA".parse::<Address>().is_err());
        assert!("0xzz000000000000000000000000000000000000aa"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::new([1u8; 20]).is_zero());
    }

    #[test]
    fn test_checksum_vector() {
        let addr: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        assert_eq!(addr.to_checksum(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn test_address_serde_checksummed() {
        let addr: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_proxied_address_beacon_optional() {
        let json = r#"{
            "proxy": "0x0000000000000000000000000000000000000001",
            "implementation": "0x0000000000000000000000000000000000000002"
        }"#;
        let proxied: ProxiedAddress = serde_json::from_str(json).unwrap();
        assert_eq!(proxied.beacon, None);

        let with_beacon = proxied.with_beacon(Address::new([3u8; 20]));
        assert_eq!(with_beacon.beacon, Some(Address::new([3u8; 20])));
    }
}
