use keyguard_core::error::{Result, RulerError};
use keyguard_core::rules::{Credentials, ReqMetadata};

/// Build the metadata handed to a rule hook. Every request needs
/// credentials naming a client.
pub fn assemble_metadata(
    credentials: Option<&Credentials>,
    account_name: &str,
    pub_key: &[u8],
) -> Result<ReqMetadata> {
    let credentials = credentials.ok_or(RulerError::NoCredentials)?;

    if credentials.client.is_empty() {
        return Err(RulerError::NoClient);
    }

    Ok(ReqMetadata {
        account: account_name.to_string(),
        pub_key: pub_key.to_vec(),
        ip: credentials.ip.clone(),
        client: credentials.client.clone(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn missing_credentials() {
        let err = assemble_metadata(None, "a", &[1]).unwrap_err();
        assert!(matches!(err, RulerError::NoCredentials));
    }

    #[test]
    fn empty_client() {
        let creds = Credentials { client: String::new(), ip: "10.0.0.1".into() };
        let err = assemble_metadata(Some(&creds), "a", &[1]).unwrap_err();
        assert!(matches!(err, RulerError::NoClient));
    }

    #[test]
    fn copies_identity() {
        let creds = Credentials { client: "vc-1".into(), ip: "10.0.0.1".into() };
        let md = assemble_metadata(Some(&creds), "v1", &[9, 9]).unwrap();
        assert_eq!(
            md,
            ReqMetadata {
                account: "v1".into(),
                pub_key: vec![9, 9],
                ip: "10.0.0.1".into(),
                client: "vc-1".into(),
            }
        );
    }
}
