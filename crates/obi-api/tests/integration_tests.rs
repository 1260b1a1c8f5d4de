//! # Integration tests for obi-api
//!
//! Exercises the full request path over the in-memory store: credential
//! download with caching, hosted OB 2.0 documents, the OB 3.0 achievement
//! document, the DID documents, and the error surface (auth, ownership,
//! shareability).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use obi_api::db::MemoryStore;
use obi_api::state::AppState;
use obi_core::{
    Achievement, AchievementClaim, AchievementId, ClaimId, ClaimStatus, Identifier,
    IdentifierType, KeyId, Organization, OrganizationId, SigningKey, User, UserId,
};
use obi_crypto::IssuerKeyPair;

const HOST: &str = "badges.example.com";

/// Seed one organization with a key, an achievement, a user, and an
/// accepted claim, then build the app around it.
fn test_app() -> (axum::Router, MemoryStore, IssuerKeyPair) {
    let (state, memory) = AppState::in_memory();

    memory.insert_organization(Organization {
        id: OrganizationId::from("o1"),
        domain: HOST.to_string(),
        name: "Example Badges".to_string(),
        email: "contact@example.com".to_string(),
        description: "Issues example badges".to_string(),
        url: Some("https://example.com".to_string()),
    });

    let pair = IssuerKeyPair::generate();
    memory.insert_signing_key(SigningKey {
        id: KeyId::from("k1"),
        organization_id: OrganizationId::from("o1"),
        public_key_multibase: pair.public_key_multibase(),
        private_key_multibase: pair.private_key_multibase(),
        revoked: false,
    });

    memory.insert_achievement(Achievement {
        id: AchievementId::from("a1"),
        organization_id: OrganizationId::from("o1"),
        name: "Basket Weaving".to_string(),
        description: "Wove a basket".to_string(),
        criteria_id: None,
        criteria_narrative: Some("Weave one basket unaided".to_string()),
        image: None,
    });

    memory.insert_user(User {
        id: UserId::from("U1"),
        identifiers: vec![Identifier {
            identifier_type: IdentifierType::Email,
            identifier: "weaver@example.com".to_string(),
            verified: true,
        }],
    });

    memory.insert_claim(AchievementClaim {
        id: ClaimId::from("c1"),
        achievement_id: AchievementId::from("a1"),
        user_id: UserId::from("U1"),
        organization_id: OrganizationId::from("o1"),
        claim_status: ClaimStatus::Accepted,
        valid_from: Some(Utc.with_ymd_and_hms(2023, 5, 29, 12, 0, 0).unwrap()),
        valid_until: None,
        json: None,
    });

    (obi_api::app(state), memory, pair)
}

fn download_request(claim_id: &str, user_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/claims/{claim_id}/download"))
        .header("host", HOST);
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    builder.body(Body::empty()).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", HOST)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// -- Health probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe() {
    let (app, _, _) = test_app();
    let response = app.oneshot(get_request("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Credential download ------------------------------------------------------

#[tokio::test]
async fn download_returns_a_verifiable_signed_credential() {
    let (app, _, pair) = test_app();
    let response = app
        .oneshot(download_request("c1", Some("U1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], "urn:uuid:c1");
    assert_eq!(json["proof"]["type"], "Ed25519Signature2020");
    assert_eq!(json["proof"]["proofPurpose"], "assertionMethod");
    assert_eq!(
        json["proof"]["verificationMethod"],
        "did:web:badges.example.com#key-0"
    );
    assert!(json["proof"]["proofValue"].as_str().unwrap().starts_with('z'));

    let credential: obi_vc::AchievementCredential = serde_json::from_value(json).unwrap();
    obi_vc::verify_credential(&credential, &pair.public_key_multibase()).unwrap();
}

#[tokio::test]
async fn repeated_download_within_timeout_reuses_the_proof() {
    let (app, _, _) = test_app();

    let first = app
        .clone()
        .oneshot(download_request("c1", Some("U1")))
        .await
        .unwrap();
    let first = body_json(first).await;

    let second = app
        .oneshot(download_request("c1", Some("U1")))
        .await
        .unwrap();
    let second = body_json(second).await;

    assert_eq!(first["proof"]["proofValue"], second["proof"]["proofValue"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn download_without_identity_is_unauthorized() {
    let (app, _, _) = test_app();
    let response = app.oneshot(download_request("c1", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn download_of_someone_elses_claim_is_not_found() {
    let (app, _, _) = test_app();
    let response = app
        .oneshot(download_request("c1", Some("U2")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_of_unknown_claim_is_not_found() {
    let (app, _, _) = test_app();
    let response = app
        .oneshot(download_request("nope", Some("U1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_of_pending_claim_is_forbidden() {
    let (app, memory, _) = test_app();
    memory.insert_claim(AchievementClaim {
        id: ClaimId::from("c2"),
        achievement_id: AchievementId::from("a1"),
        user_id: UserId::from("U1"),
        organization_id: OrganizationId::from("o1"),
        claim_status: ClaimStatus::Accepted,
        valid_from: None,
        valid_until: None,
        json: None,
    });
    let response = app
        .oneshot(download_request("c2", Some("U1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn download_without_verified_email_is_not_found() {
    let (app, memory, _) = test_app();
    memory.insert_user(User {
        id: UserId::from("U1"),
        identifiers: vec![Identifier {
            identifier_type: IdentifierType::Email,
            identifier: "weaver@example.com".to_string(),
            verified: false,
        }],
    });
    let response = app
        .oneshot(download_request("c1", Some("U1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_for_unknown_host_is_not_found() {
    let (app, _, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/claims/c1/download")
        .header("host", "other.example.com")
        .header("x-user-id", "U1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- OB 2.0 hosted documents --------------------------------------------------

#[tokio::test]
async fn hosted_assertion_for_shareable_claim() {
    let (app, _, _) = test_app();
    let response = app.oneshot(get_request("/ob2/a/c1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["type"], "Assertion");
    assert_eq!(json["id"], "https://badges.example.com/ob2/a/c1");
    assert_eq!(json["verification"]["type"], "HostedBadge");
    assert_eq!(json["recipient"]["hashed"], true);
    assert!(json["recipient"]["identity"]
        .as_str()
        .unwrap()
        .starts_with("sha256$"));
    assert_eq!(json["badge"]["type"], "BadgeClass");
}

#[tokio::test]
async fn hosted_assertion_for_pending_claim_is_not_found() {
    let (app, memory, _) = test_app();
    memory.insert_claim(AchievementClaim {
        id: ClaimId::from("c2"),
        achievement_id: AchievementId::from("a1"),
        user_id: UserId::from("U1"),
        organization_id: OrganizationId::from("o1"),
        claim_status: ClaimStatus::Unaccepted,
        valid_from: None,
        valid_until: None,
        json: None,
    });
    let response = app.oneshot(get_request("/ob2/a/c2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hosted_badge_class_and_issuer() {
    let (app, _, _) = test_app();

    let response = app
        .clone()
        .oneshot(get_request("/ob2/b/a1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["@context"], "https://w3id.org/openbadges/v2");
    assert_eq!(json["id"], "https://badges.example.com/ob2/b/a1");

    let response = app.oneshot(get_request("/ob2/i")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["type"], "Issuer");
    assert_eq!(
        json["related"][0]["schema:sameAs"],
        "did:web:badges.example.com"
    );
}

#[tokio::test]
async fn hosted_badge_class_for_unknown_achievement_is_not_found() {
    let (app, _, _) = test_app();
    let response = app.oneshot(get_request("/ob2/b/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- OB 3.0 achievement document ----------------------------------------------

#[tokio::test]
async fn hosted_achievement_document_links_back_to_the_badge_class() {
    let (app, _, _) = test_app();
    let response = app.oneshot(get_request("/a/a1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["type"], "Achievement");
    assert_eq!(json["id"], "https://badges.example.com/a/a1");
    assert_eq!(json["name"], "Basket Weaving");
    assert_eq!(json["creator"]["id"], "did:web:badges.example.com");
    assert_eq!(json["related"][0]["id"], "https://badges.example.com/ob2/b/a1");
    assert_eq!(
        json["related"][0]["type"][1],
        "https://w3id.org/openbadges#BadgeClass"
    );
}

#[tokio::test]
async fn assertion_cross_link_resolves_on_the_same_host() {
    let (app, _, _) = test_app();

    let response = app
        .clone()
        .oneshot(get_request("/ob2/a/c1"))
        .await
        .unwrap();
    let assertion = body_json(response).await;
    let linked = assertion["related"][0]["id"].as_str().unwrap();
    let path = linked
        .strip_prefix("https://badges.example.com")
        .expect("cross-link stays on the org domain");

    let response = app.oneshot(get_request(path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["type"], "Achievement");
}

#[tokio::test]
async fn hosted_achievement_for_unknown_id_is_not_found() {
    let (app, _, _) = test_app();
    let response = app.oneshot(get_request("/a/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- DID document -------------------------------------------------------------

#[tokio::test]
async fn did_document_lists_public_keys_only() {
    let (app, _, pair) = test_app();
    let response = app
        .oneshot(get_request("/.well-known/did.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], "did:web:badges.example.com");
    assert_eq!(
        json["verificationMethod"][0]["publicKeyMultibase"],
        pair.public_key_multibase()
    );
    assert_eq!(
        json["assertionMethod"][0],
        "did:web:badges.example.com#key-0"
    );
    assert!(!serde_json::to_string(&json)
        .unwrap()
        .contains(&pair.private_key_multibase()));
}

#[tokio::test]
async fn subject_did_from_a_downloaded_credential_resolves() {
    let (app, _, _) = test_app();

    let response = app
        .clone()
        .oneshot(download_request("c1", Some("U1")))
        .await
        .unwrap();
    let credential = body_json(response).await;
    let subject_did = credential["credentialSubject"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let encoded = subject_did.rsplit(':').next().unwrap();

    let response = app
        .oneshot(get_request(&format!("/u/{encoded}/did.json")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], subject_did);
    assert_eq!(json["@context"][0], "https://www.w3.org/ns/did/v1");
    assert!(json["verificationMethod"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn subject_did_document_for_undecodable_segment_is_not_found() {
    let (app, _, _) = test_app();
    let response = app
        .oneshot(get_request("/u/!!!/did.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Cached credential lookup -------------------------------------------------

#[tokio::test]
async fn credential_record_is_retrievable_after_download() {
    let (app, memory, _) = test_app();

    let response = app
        .clone()
        .oneshot(download_request("c1", Some("U1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let downloaded = body_json(response).await;

    let record = memory
        .claim_bundle(&ClaimId::from("c1"))
        .unwrap()
        .unwrap()
        .cached
        .unwrap();

    let response = app
        .oneshot(get_request(&format!("/credentials/{}", record.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, downloaded);
}

#[tokio::test]
async fn unknown_credential_record_is_not_found() {
    let (app, _, _) = test_app();
    let response = app
        .oneshot(get_request("/credentials/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
