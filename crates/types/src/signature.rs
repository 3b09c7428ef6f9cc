use crate::{SignatureError, TypedDataDocument};
use alloy::primitives::{Address, Bytes, Signature};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A signature over a [`TypedDataDocument`], as returned by the wallet.
///
/// The bytes are opaque. Externally owned accounts produce 65-byte ECDSA
/// signatures, but contract wallets may return other encodings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingSignature(Bytes);

impl ListingSignature {
    /// Wrap raw signature bytes.
    pub const fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded signature, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(|bytes| Self(bytes.into()))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True if there are no signature bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as `0x`-prefixed lower-case hex.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }

    /// Recover the address that produced this signature over `doc`.
    ///
    /// Only meaningful for 65-byte ECDSA signatures.
    pub fn recover_address(&self, doc: &TypedDataDocument) -> Result<Address, SignatureError> {
        let hash = doc.signing_hash()?;
        let signature = Signature::from_raw(&self.0)?;
        signature.recover_address_from_prehash(&hash).map_err(Into::into)
    }
}

impl From<Signature> for ListingSignature {
    fn from(signature: Signature) -> Self {
        Self(Bytes::copy_from_slice(&signature.as_bytes()))
    }
}

impl fmt::Display for ListingSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetIdentity, ListingIntent, PeriodTable};
    use alloy::{
        primitives::B256,
        signers::{local::PrivateKeySigner, SignerSync},
    };
    use rentals_constants::test_utils::{NFT_ADDRESS, RENTALS};

    #[test]
    fn hex_round_trip() {
        let sig = ListingSignature::from_hex("0xdeadbeef").unwrap();
        assert_eq!(sig.as_bytes(), [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(sig.to_hex(), "0xdeadbeef");
        assert_eq!(ListingSignature::from_hex("DEADBEEF").unwrap(), sig);
        assert!(ListingSignature::from_hex("0xzz").is_err());
        assert_eq!(serde_json::to_string(&sig).unwrap(), "\"0xdeadbeef\"");
    }

    #[test]
    fn recovers_signer() {
        let signer = PrivateKeySigner::from_bytes(&B256::repeat_byte(3)).unwrap();
        let intent = ListingIntent::new(
            signer.address(),
            AssetIdentity::new(NFT_ADDRESS, "7"),
            RENTALS,
            1_700_000_000,
            PeriodTable::uniform(&[1, 7], "1000").unwrap(),
        );
        let doc = intent.typed_data().unwrap();

        let hash = doc.signing_hash().unwrap();
        let sig: ListingSignature = signer.sign_hash_sync(&hash).unwrap().into();
        assert_eq!(sig.as_bytes().len(), 65);
        assert_eq!(sig.recover_address(&doc).unwrap(), signer.address());
    }

    #[test]
    fn short_signatures_do_not_recover() {
        let intent = ListingIntent::new(
            Address::ZERO,
            AssetIdentity::new(NFT_ADDRESS, "7"),
            RENTALS,
            0,
            PeriodTable::uniform(&[1], "1").unwrap(),
        );
        let doc = intent.typed_data().unwrap();
        let sig = ListingSignature::from_hex("0x1234").unwrap();
        assert!(matches!(sig.recover_address(&doc), Err(SignatureError::Signature(_))));
    }
}
