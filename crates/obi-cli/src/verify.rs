//! # Verify subcommand
//!
//! Checks a signed credential file against a `publicKeyMultibase`.
//! Exit code 0 on a valid proof, 1 otherwise, so it composes in shell
//! pipelines and CI checks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use obi_vc::{verify_credential, AchievementCredential};

/// Arguments for the `obi verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signed credential JSON file.
    pub credential: PathBuf,

    /// The issuer's public key, multibase-encoded.
    #[arg(long)]
    pub public_key: String,
}

/// Verify the credential's proof.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let raw = std::fs::read_to_string(&args.credential)
        .with_context(|| format!("reading credential {}", args.credential.display()))?;
    let credential: AchievementCredential =
        serde_json::from_str(&raw).context("parsing credential JSON")?;

    match verify_credential(&credential, &args.public_key) {
        Ok(()) => {
            println!("verification: OK ({})", credential.id);
            Ok(0)
        }
        Err(err) => {
            tracing::error!(credential = %credential.id, error = %err, "verification failed");
            println!("verification: FAILED ({err})");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{run_keygen, KeygenArgs};
    use crate::sign::{run_sign, SignArgs};
    use obi_crypto::IssuerKeyPair;

    fn unsigned_credential_json() -> serde_json::Value {
        serde_json::json!({
            "@context": [
                "https://www.w3.org/2018/credentials/v1",
                "https://purl.imsglobal.org/spec/ob/v3p0/context.json"
            ],
            "id": "urn:uuid:11111111-2222-4333-8444-555555555555",
            "type": ["VerifiableCredential", "OpenBadgeCredential"],
            "issuer": {
                "id": "did:web:badges.example.com",
                "type": "Profile",
                "name": "Example Badges",
                "email": "contact@example.com",
                "description": "Issues example badges"
            },
            "issuanceDate": "2023-05-29T12:00:00Z",
            "credentialSubject": {
                "type": "AchievementSubject",
                "id": "did:web:badges.example.com:u:VTE",
                "achievement": {
                    "id": "https://badges.example.com/achievements/a1",
                    "type": "Achievement",
                    "name": "Basket Weaving",
                    "description": "Wove a basket",
                    "criteria": { "narrative": "Weave one basket unaided" }
                },
                "identifier": [{
                    "type": "IdentityObject",
                    "hashed": true,
                    "identityHash": "sha256$0000",
                    "identityType": "emailAddress",
                    "salt": "c2FsdA=="
                }]
            }
        })
    }

    #[test]
    fn keygen_sign_verify_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("keypair.json");
        let credential_path = dir.path().join("credential.json");
        let signed_path = dir.path().join("signed.json");

        run_keygen(&KeygenArgs {
            output: Some(key_path.clone()),
        })
        .unwrap();
        std::fs::write(
            &credential_path,
            serde_json::to_string_pretty(&unsigned_credential_json()).unwrap(),
        )
        .unwrap();

        let code = run_sign(&SignArgs {
            credential: credential_path,
            key: key_path.clone(),
            verification_method: "did:web:badges.example.com#key-0".to_string(),
            output: Some(signed_path.clone()),
        })
        .unwrap();
        assert_eq!(code, 0);

        let key_json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&key_path).unwrap()).unwrap();
        let public = key_json["publicKeyMultibase"].as_str().unwrap().to_string();

        let code = run_verify(&VerifyArgs {
            credential: signed_path.clone(),
            public_key: public,
        })
        .unwrap();
        assert_eq!(code, 0);

        // A different key must not verify.
        let other = IssuerKeyPair::generate();
        let code = run_verify(&VerifyArgs {
            credential: signed_path,
            public_key: other.public_key_multibase(),
        })
        .unwrap();
        assert_eq!(code, 1);
    }
}
