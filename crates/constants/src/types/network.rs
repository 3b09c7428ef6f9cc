use std::{fmt, str::FromStr};

/// Error type for parsing a [`Network`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network {0}. supported networks: ETHEREUM, MATIC")]
pub struct ParseNetworkError(String);

/// Symbolic network name, as understood by the listings service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    /// Ethereum L1 (mainnet and its testnets).
    Ethereum,
    /// Polygon.
    Matic,
}

impl Network {
    /// The wire name of the network.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ETHEREUM",
            Self::Matic => "MATIC",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ETHEREUM" => Ok(Self::Ethereum),
            "MATIC" | "POLYGON" => Ok(Self::Matic),
            _ => Err(ParseNetworkError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_wire_name() {
        assert_eq!(serde_json::to_string(&Network::Ethereum).unwrap(), "\"ETHEREUM\"");
        assert_eq!(serde_json::to_string(&Network::Matic).unwrap(), "\"MATIC\"");
        assert_eq!("polygon".parse::<Network>().unwrap(), Network::Matic);
    }
}
