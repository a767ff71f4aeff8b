use thiserror::Error;

const CASHADDR_PREFIXES: [&str; 3] = ["bitcoincash", "bchtest", "bchreg"];
const CASHADDR_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const LEGACY_ADDRESS_LEN: usize = 25;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Unknown address prefix: {0}")]
    UnknownPrefix(String),

    #[error("Invalid BCH address format: {0}")]
    InvalidBchAddress(String),
}

/// Accepts CashAddr (with or without a network prefix) and legacy Base58Check addresses.
pub fn validate_deposit_address(address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }

    if let Some((prefix, payload)) = address.split_once(':') {
        if !CASHADDR_PREFIXES.contains(&prefix.to_lowercase().as_str()) {
            return Err(ValidationError::UnknownPrefix(prefix.to_string()));
        }
        return validate_cashaddr_payload(address, payload);
    }

    if validate_cashaddr_payload(address, address).is_ok() {
        return Ok(());
    }

    // Decode base58 string
    let decoded = match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes,
        Err(_) => return Err(ValidationError::InvalidBchAddress(address.to_string())),
    };

    // version byte + 20 byte hash + 4 byte checksum
    if decoded.len() != LEGACY_ADDRESS_LEN {
        return Err(ValidationError::InvalidBchAddress(address.to_string()));
    }

    Ok(())
}

fn validate_cashaddr_payload(address: &str, payload: &str) -> Result<(), ValidationError> {
    let payload = payload.to_lowercase();
    let well_formed = !payload.is_empty()
        && (payload.starts_with('q') || payload.starts_with('p'))
        && payload.chars().all(|c| CASHADDR_CHARSET.contains(c));

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::InvalidBchAddress(address.to_string()))
    }
}
