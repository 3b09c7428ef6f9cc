use rentals_constants::Network;
use rentals_types::{ListingIntent, ListingSignature, PeriodTable, SchemaValidationError};
use serde::{Deserialize, Serialize};

/// The body of a listing submission.
///
/// Fields serialize in the order the listings service documents them.
/// Addresses are lower-case hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    /// The chain the rentals contract is deployed on.
    pub chain_id: u64,
    /// The NFT contract.
    pub contract_address: String,
    /// The token id, as a decimal string.
    pub token_id: String,
    /// The symbolic network name.
    pub network: Network,
    /// Expiration, in Unix milliseconds.
    pub expiration: u64,
    /// The rentals contract that verifies the signature.
    pub rental_contract_address: String,
    /// The listing `indexes`, as decimal strings.
    pub nonces: Vec<String>,
    /// The period table.
    pub periods: PeriodTable,
    /// The signature over the listing typed data.
    pub signature: ListingSignature,
    /// The designated renter, zero for any renter.
    pub target: String,
}

impl ListingPayload {
    /// Build the payload for a signed intent.
    pub fn new(
        intent: &ListingIntent,
        network: Network,
        signature: ListingSignature,
    ) -> Result<Self, SchemaValidationError> {
        let token_id = intent.asset().token_id_u256()?;
        intent.checked_indexes()?;

        Ok(Self {
            chain_id: intent.contract().chain_id(),
            contract_address: format!("{:#x}", intent.asset().contract_address()),
            token_id: token_id.to_string(),
            network,
            expiration: intent.expiration_millis()?,
            rental_contract_address: format!("{:#x}", intent.contract().address()),
            nonces: intent.nonces(),
            periods: intent.periods().clone(),
            signature,
            target: format!("{:#x}", intent.target()),
        })
    }

    /// Serialize the payload to JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, Address};
    use rentals_constants::{mainnet, test_utils};
    use rentals_types::{AssetIdentity, RentalPeriod};

    fn intent() -> ListingIntent {
        let periods = PeriodTable::new(vec![
            RentalPeriod::fixed(1, "999999999999999999").unwrap(),
            RentalPeriod::fixed(7, "999999999999999999").unwrap(),
        ])
        .unwrap();
        ListingIntent::new(
            Address::repeat_byte(0xaa),
            AssetIdentity::new(
                address!("0xf87e31492faf9a91b02ee0deaad50d51d56d5d4d"),
                "115792089237316195423570985008687907810734688800523256106535758078942103207859",
            ),
            mainnet::RENTALS,
            1_681_966_800,
            periods,
        )
        .with_indexes([0, 0, 1])
    }

    #[test]
    fn payload_json() {
        let signature = ListingSignature::from_hex("0x1234").unwrap();
        let payload = ListingPayload::new(&intent(), Network::Ethereum, signature).unwrap();

        let json = String::from_utf8(payload.to_vec().unwrap()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"chainId":1,"#,
                r#""contractAddress":"0xf87e31492faf9a91b02ee0deaad50d51d56d5d4d","#,
                r#""tokenId":"115792089237316195423570985008687907810734688800523256106535758078942103207859","#,
                r#""network":"ETHEREUM","#,
                r#""expiration":1681966800000,"#,
                r#""rentalContractAddress":"0x3a1469499d0be105d4f77045ca403a5f6dc2f3f5","#,
                r#""nonces":["0","0","1"],"#,
                r#""periods":[{"minDays":1,"maxDays":1,"pricePerDay":"999999999999999999"},"#,
                r#"{"minDays":7,"maxDays":7,"pricePerDay":"999999999999999999"}],"#,
                r#""signature":"0x1234","#,
                r#""target":"0x0000000000000000000000000000000000000000"}"#,
            )
        );

        let back: ListingPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn payload_follows_the_intent_contract() {
        let intent = ListingIntent::new(
            Address::repeat_byte(0xaa),
            AssetIdentity::new(test_utils::NFT_ADDRESS, "5"),
            test_utils::RENTALS,
            10,
            PeriodTable::uniform(&[1], "1").unwrap(),
        )
        .with_target(Address::repeat_byte(0xcd));
        let payload =
            ListingPayload::new(&intent, Network::Matic, ListingSignature::from_hex("0x01").unwrap())
                .unwrap();

        assert_eq!(payload.chain_id, test_utils::CHAIN_ID);
        assert_eq!(payload.rental_contract_address, format!("{:#x}", test_utils::RENTALS_ADDRESS));
        assert_eq!(payload.target, format!("{:#x}", Address::repeat_byte(0xcd)));
        assert_eq!(payload.expiration, 10_000);
        assert_eq!(payload.nonces, ["0", "0", "0"]);
        assert_eq!(serde_json::to_value(payload.network).unwrap(), "MATIC");
    }

    #[test]
    fn expiration_overflow_is_rejected() {
        let intent = ListingIntent::new(
            Address::ZERO,
            AssetIdentity::new(test_utils::NFT_ADDRESS, "5"),
            test_utils::RENTALS,
            u64::MAX,
            PeriodTable::uniform(&[1], "1").unwrap(),
        );
        let err =
            ListingPayload::new(&intent, Network::Ethereum, ListingSignature::from_hex("0x01").unwrap())
                .unwrap_err();
        assert_eq!(err, SchemaValidationError::ExpirationOverflow(u64::MAX));
    }

    #[test]
    fn token_id_matches_the_signed_message() {
        let intent = ListingIntent::new(
            Address::ZERO,
            AssetIdentity::new(test_utils::NFT_ADDRESS, "0042"),
            test_utils::RENTALS,
            10,
            PeriodTable::uniform(&[1], "1").unwrap(),
        );
        let payload =
            ListingPayload::new(&intent, Network::Ethereum, ListingSignature::from_hex("0x01").unwrap())
                .unwrap();

        assert_eq!(payload.token_id, "42");
        assert_eq!(payload.token_id, intent.typed_data().unwrap().message().token_id());
    }

    #[test]
    fn unsafe_index_is_rejected() {
        let intent = ListingIntent::new(
            Address::ZERO,
            AssetIdentity::new(test_utils::NFT_ADDRESS, "5"),
            test_utils::RENTALS,
            10,
            PeriodTable::uniform(&[1], "1").unwrap(),
        )
        .with_indexes([0, u64::MAX, 0]);
        let err =
            ListingPayload::new(&intent, Network::Ethereum, ListingSignature::from_hex("0x01").unwrap())
                .unwrap_err();
        assert_eq!(err, SchemaValidationError::UnsafeIndex(u64::MAX));
    }
}
