use std::fmt::Write;

/// Mints an anonymous visitor id: 128 bits from the thread CSPRNG, lowercase hex.
#[must_use]
pub fn mint_user_id() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().fold(String::with_capacity(32), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_shape() {
        let id = mint_user_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_user_ids_differ() {
        assert_ne!(mint_user_id(), mint_user_id());
    }
}
