//! EIP-712 typed data for rental listings.
//!
//! The document is modelled as plain structs whose field order is the schema
//! order, so the JSON encoding handed to a wallet is stable: identical intents
//! always produce byte-identical documents. `uint256` values are encoded as
//! decimal strings, `indexes` as JSON numbers bounded by [`MAX_SAFE_INDEX`],
//! and addresses as lower-case hex.
//!
//! [`MAX_SAFE_INDEX`]: crate::MAX_SAFE_INDEX

use crate::{
    utils::parse_uint256, ListingIndexes, ListingIntent, SchemaValidationError, TypedDataError,
};
use alloy::{
    dyn_abi::TypedData,
    primitives::{B256, U256},
};
use rentals_constants::ContractIdentity;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The EIP-712 primary type of a listing.
pub const LISTING_PRIMARY_TYPE: &str = "Listing";

/// The `Listing` struct type. Names, types and order must match the rentals
/// contract exactly.
pub const LISTING_TYPE: [TypedField; 9] = [
    TypedField::new("signer", "address"),
    TypedField::new("contractAddress", "address"),
    TypedField::new("tokenId", "uint256"),
    TypedField::new("expiration", "uint256"),
    TypedField::new("indexes", "uint256[3]"),
    TypedField::new("pricePerDay", "uint256[]"),
    TypedField::new("maxDays", "uint256[]"),
    TypedField::new("minDays", "uint256[]"),
    TypedField::new("target", "address"),
];

/// The `EIP712Domain` struct type.
pub const EIP712_DOMAIN_TYPE: [TypedField; 4] = [
    TypedField::new("name", "string"),
    TypedField::new("version", "string"),
    TypedField::new("chainId", "uint256"),
    TypedField::new("verifyingContract", "address"),
];

/// A member of an EIP-712 struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    name: Cow<'static, str>,
    #[serde(rename = "type")]
    ty: Cow<'static, str>,
}

impl TypedField {
    /// Create a new field.
    pub const fn new(name: &'static str, ty: &'static str) -> Self {
        Self { name: Cow::Borrowed(name), ty: Cow::Borrowed(ty) }
    }

    /// Get the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the Solidity type.
    pub fn ty(&self) -> &str {
        &self.ty
    }
}

/// The `types` section of a listing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingTypes {
    #[serde(rename = "Listing")]
    listing: Vec<TypedField>,
    #[serde(rename = "EIP712Domain")]
    eip712_domain: Vec<TypedField>,
}

impl Default for ListingTypes {
    fn default() -> Self {
        Self { listing: LISTING_TYPE.to_vec(), eip712_domain: EIP712_DOMAIN_TYPE.to_vec() }
    }
}

impl ListingTypes {
    /// Get the `Listing` type.
    pub fn listing(&self) -> &[TypedField] {
        &self.listing
    }

    /// Get the `EIP712Domain` type.
    pub fn eip712_domain(&self) -> &[TypedField] {
        &self.eip712_domain
    }
}

/// The `domain` section of a listing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDomain {
    name: String,
    version: String,
    /// Full-width big-endian word. Wallets require the 256-bit form.
    chain_id: B256,
    verifying_contract: String,
}

impl ListingDomain {
    /// Create the domain of a contract.
    pub fn new(contract: &ContractIdentity) -> Self {
        Self {
            name: contract.name().to_string(),
            version: contract.version().to_string(),
            chain_id: B256::from(contract.chain_id_u256()),
            verifying_contract: format!("{:#x}", contract.address()),
        }
    }

    /// Get the domain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the domain version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the chain id.
    pub fn chain_id(&self) -> U256 {
        U256::from_be_bytes(self.chain_id.0)
    }

    /// Get the verifying contract, as lower-case hex.
    pub fn verifying_contract(&self) -> &str {
        &self.verifying_contract
    }
}

/// The `message` section of a listing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingMessage {
    signer: String,
    contract_address: String,
    token_id: String,
    expiration: String,
    indexes: ListingIndexes,
    price_per_day: Vec<String>,
    max_days: Vec<String>,
    min_days: Vec<String>,
    target: String,
}

impl ListingMessage {
    /// Project a listing intent into a message.
    pub fn new(intent: &ListingIntent) -> Result<Self, SchemaValidationError> {
        let token_id = intent.asset().token_id_u256()?;
        let indexes = intent.checked_indexes()?;
        let periods = intent.periods();

        let price_per_day = periods
            .prices_per_day()
            .map(|price| parse_uint256("pricePerDay", price).map(|price| price.to_string()))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            signer: format!("{:#x}", intent.signer()),
            contract_address: format!("{:#x}", intent.asset().contract_address()),
            token_id: token_id.to_string(),
            expiration: intent.expiration().to_string(),
            indexes,
            price_per_day,
            max_days: periods.max_days().map(|days| days.to_string()).collect(),
            min_days: periods.min_days().map(|days| days.to_string()).collect(),
            target: format!("{:#x}", intent.target()),
        })
    }

    /// Get the signer, as lower-case hex.
    pub fn signer(&self) -> &str {
        &self.signer
    }

    /// Get the NFT contract, as lower-case hex.
    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Get the token id.
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Get the expiration, in Unix seconds.
    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    /// Get the `indexes` slots.
    pub const fn indexes(&self) -> ListingIndexes {
        self.indexes
    }

    /// Get the `pricePerDay` column.
    pub fn price_per_day(&self) -> &[String] {
        &self.price_per_day
    }

    /// Get the `maxDays` column.
    pub fn max_days(&self) -> &[String] {
        &self.max_days
    }

    /// Get the `minDays` column.
    pub fn min_days(&self) -> &[String] {
        &self.min_days
    }

    /// Get the designated renter, as lower-case hex.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// An EIP-712 typed-data document for a rental listing, in the shape accepted
/// by `eth_signTypedData_v4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDocument {
    types: ListingTypes,
    domain: ListingDomain,
    primary_type: String,
    message: ListingMessage,
}

impl TypedDataDocument {
    /// Build the document for `intent`, using `contract` as the verifying
    /// contract.
    ///
    /// This is a pure function of its inputs. It fails only if a numeric
    /// field does not fit its declared width.
    pub fn build(
        intent: &ListingIntent,
        contract: &ContractIdentity,
    ) -> Result<Self, SchemaValidationError> {
        Ok(Self {
            types: ListingTypes::default(),
            domain: ListingDomain::new(contract),
            primary_type: LISTING_PRIMARY_TYPE.to_string(),
            message: ListingMessage::new(intent)?,
        })
    }

    /// Get the `types` section.
    pub const fn types(&self) -> &ListingTypes {
        &self.types
    }

    /// Get the `domain` section.
    pub const fn domain(&self) -> &ListingDomain {
        &self.domain
    }

    /// Get the primary type.
    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    /// Get the `message` section.
    pub const fn message(&self) -> &ListingMessage {
        &self.message
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert into alloy's dynamic [`TypedData`].
    pub fn to_typed_data(&self) -> Result<TypedData, TypedDataError> {
        serde_json::to_value(self).and_then(serde_json::from_value).map_err(Into::into)
    }

    /// Compute the EIP-712 signing hash of the document.
    pub fn signing_hash(&self) -> Result<B256, TypedDataError> {
        self.to_typed_data()?.eip712_signing_hash().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetIdentity, PeriodTable, RentalPeriod};
    use alloy::primitives::{address, Address};
    use proptest::prelude::*;
    use rentals_constants::{mainnet, test_utils::RENTALS};

    const TOKEN_ID: &str =
        "115792089237316195423570985008687907810734688800523256106535758078942103207859";

    fn intent(signer: Address, periods: PeriodTable) -> ListingIntent {
        ListingIntent::new(
            signer,
            AssetIdentity::new(address!("0xf87e31492faf9a91b02ee0deaad50d51d56d5d4d"), TOKEN_ID),
            mainnet::RENTALS,
            1_681_966_800,
            periods,
        )
        .with_indexes([0, 0, 1])
    }

    fn reference_periods() -> PeriodTable {
        PeriodTable::uniform(&[1, 7, 30, 60, 90, 180, 365], "999999999999999999").unwrap()
    }

    #[test]
    fn schema_is_verbatim() {
        let doc = intent(Address::repeat_byte(1), reference_periods()).typed_data().unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(json["primaryType"], "Listing");
        assert_eq!(
            json["types"]["Listing"],
            serde_json::json!([
                { "name": "signer", "type": "address" },
                { "name": "contractAddress", "type": "address" },
                { "name": "tokenId", "type": "uint256" },
                { "name": "expiration", "type": "uint256" },
                { "name": "indexes", "type": "uint256[3]" },
                { "name": "pricePerDay", "type": "uint256[]" },
                { "name": "maxDays", "type": "uint256[]" },
                { "name": "minDays", "type": "uint256[]" },
                { "name": "target", "type": "address" }
            ])
        );
        assert_eq!(
            json["types"]["EIP712Domain"],
            serde_json::json!([
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" }
            ])
        );
    }

    #[test]
    fn domain_uses_full_width_chain_id() {
        let doc = intent(Address::repeat_byte(1), reference_periods()).typed_data().unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(
            json["domain"],
            serde_json::json!({
                "name": "Rentals",
                "version": "1",
                "chainId": "0x0000000000000000000000000000000000000000000000000000000000000001",
                "verifyingContract": "0x3a1469499d0be105d4f77045ca403a5f6dc2f3f5"
            })
        );
        assert_eq!(doc.domain().chain_id(), U256::from(1));
    }

    #[test]
    fn message_projects_periods() {
        let periods = PeriodTable::new(vec![
            RentalPeriod::new(1, 7, "100").unwrap(),
            RentalPeriod::new(30, 60, "250").unwrap(),
        ])
        .unwrap();
        let doc = intent(Address::repeat_byte(1), periods).typed_data().unwrap();
        let message = doc.message();

        assert_eq!(message.price_per_day(), ["100", "250"]);
        assert_eq!(message.min_days(), ["1", "30"]);
        assert_eq!(message.max_days(), ["7", "60"]);
        assert_eq!(message.indexes(), [0, 0, 1]);
        assert_eq!(message.token_id(), TOKEN_ID);
        assert_eq!(message.expiration(), "1681966800");
        assert_eq!(message.contract_address(), "0xf87e31492faf9a91b02ee0deaad50d51d56d5d4d");
        assert_eq!(message.target(), "0x0000000000000000000000000000000000000000");
    }

    #[test]
    fn message_encoding() {
        let periods = PeriodTable::uniform(&[30], "999999999999999999").unwrap();
        let doc = intent(Address::repeat_byte(0xab), periods).typed_data().unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(
            json["message"],
            serde_json::json!({
                "signer": "0xabababababababababababababababababababab",
                "contractAddress": "0xf87e31492faf9a91b02ee0deaad50d51d56d5d4d",
                "tokenId": TOKEN_ID,
                "expiration": "1681966800",
                "indexes": [0, 0, 1],
                "pricePerDay": ["999999999999999999"],
                "maxDays": ["30"],
                "minDays": ["30"],
                "target": "0x0000000000000000000000000000000000000000"
            })
        );
    }

    #[test]
    fn key_order_follows_schema() {
        let doc = intent(Address::repeat_byte(1), reference_periods()).typed_data().unwrap();
        let json = doc.to_json().unwrap();

        let positions: Vec<_> = ["\"types\"", "\"domain\"", "\"primaryType\"", "\"message\""]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let message = &json[json.find("\"message\"").unwrap()..];
        let positions: Vec<_> = LISTING_TYPE
            .iter()
            .map(|field| message.find(&format!("\"{}\":", field.name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn signer_is_lower_cased() {
        let signer: Address = "0xABCDEFabcdef0123456789ABCDEFabcdef012345".parse().unwrap();
        let periods = PeriodTable::uniform(&[30], "999999999999999999").unwrap();
        let doc = intent(signer, periods).typed_data().unwrap();

        assert_eq!(doc.message().signer(), "0xabcdefabcdef0123456789abcdefabcdef012345");
        assert_eq!(doc.message().price_per_day().len(), 1);
        assert_eq!(doc.message().max_days().len(), 1);
        assert_eq!(doc.message().min_days().len(), 1);
    }

    #[test]
    fn token_id_width() {
        let periods = PeriodTable::uniform(&[1], "1").unwrap();
        let max = U256::MAX.to_string();
        let ok = ListingIntent::new(
            Address::ZERO,
            AssetIdentity::new(Address::ZERO, &max),
            RENTALS,
            0,
            periods.clone(),
        );
        assert_eq!(ok.typed_data().unwrap().message().token_id(), max);

        let over = ListingIntent::new(
            Address::ZERO,
            AssetIdentity::new(
                Address::ZERO,
                "115792089237316195423570985008687907853269984665640564039457584007913129639936",
            ),
            RENTALS,
            0,
            periods,
        );
        assert!(matches!(
            over.typed_data(),
            Err(SchemaValidationError::Overflow { field: "tokenId", .. })
        ));
    }

    #[test]
    fn price_width() {
        let periods = PeriodTable::uniform(&[1], &"9".repeat(80)).unwrap();
        assert!(matches!(
            intent(Address::ZERO, periods).typed_data(),
            Err(SchemaValidationError::Overflow { field: "pricePerDay", .. })
        ));
    }

    #[test]
    fn json_round_trip() {
        let doc = intent(Address::repeat_byte(7), reference_periods()).typed_data().unwrap();
        let json = doc.to_json().unwrap();
        let parsed = TypedDataDocument::from_json(&json).unwrap();
        assert_eq!(parsed, doc);

        let a: serde_json::Value = serde_json::from_str(&json).unwrap();
        let b = serde_json::to_value(&parsed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn converts_to_alloy_typed_data() {
        let doc = intent(Address::repeat_byte(7), reference_periods()).typed_data().unwrap();
        let typed = doc.to_typed_data().unwrap();

        assert_eq!(typed.primary_type, "Listing");
        assert_eq!(typed.domain.chain_id, Some(U256::from(1)));
        assert_eq!(typed.domain.verifying_contract, Some(mainnet::RENTALS_ADDRESS));

        let hash = doc.signing_hash().unwrap();
        assert_eq!(hash, doc.signing_hash().unwrap());

        let other = intent(Address::repeat_byte(8), reference_periods()).typed_data().unwrap();
        assert_ne!(hash, other.signing_hash().unwrap());
    }

    #[test]
    fn contract_identity_drives_domain() {
        let intent = intent(Address::repeat_byte(1), reference_periods());
        let doc = TypedDataDocument::build(&intent, &RENTALS).unwrap();
        assert_eq!(doc.domain().chain_id(), U256::from(31337));
        assert_eq!(doc.domain().verifying_contract(), format!("{:#x}", RENTALS.address()));
        assert_ne!(doc.signing_hash().unwrap(), intent.typed_data().unwrap().signing_hash().unwrap());
    }

    proptest! {
        #[test]
        fn build_is_deterministic(
            signer in any::<[u8; 20]>(),
            days in proptest::collection::vec(0u64..1000, 1..8),
            price in "[0-9]{1,70}",
            indexes in proptest::array::uniform3(0..=crate::MAX_SAFE_INDEX),
            expiration in any::<u64>(),
        ) {
            let periods = PeriodTable::uniform(&days, &price).unwrap();
            let intent = ListingIntent::new(
                Address::from(signer),
                AssetIdentity::new(Address::repeat_byte(2), "42"),
                RENTALS,
                expiration,
                periods,
            )
            .with_indexes(indexes);

            let a = intent.typed_data().unwrap().to_json().unwrap();
            let b = intent.typed_data().unwrap().to_json().unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn signer_is_always_lower_case(signer in any::<[u8; 20]>()) {
            let signer = Address::from(signer);
            let checksummed = signer.to_checksum(None);
            let intent = ListingIntent::new(
                checksummed.parse().unwrap(),
                AssetIdentity::new(Address::repeat_byte(2), "42"),
                RENTALS,
                0,
                PeriodTable::uniform(&[1], "1").unwrap(),
            );

            let doc = intent.typed_data().unwrap();
            prop_assert_eq!(doc.message().signer(), checksummed.to_lowercase());
        }
    }
}
