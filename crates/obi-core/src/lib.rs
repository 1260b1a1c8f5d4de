//! # obi-core — Core Domain Types for the Open Badge Issuer Stack
//!
//! This crate provides the record types shared across the workspace:
//!
//! - **Domain records** ([`Achievement`], [`AchievementClaim`],
//!   [`Organization`], [`SigningKey`], [`User`]) mirroring the rows the
//!   external data store hands to the credential pipeline.
//! - **Canonical JSON bytes** ([`CanonicalBytes`]) — the only sanctioned
//!   signing input. Every digest and signature in the workspace is computed
//!   over `CanonicalBytes`, never over raw `serde_json::to_vec()` output.
//!
//! Persistence, sessions, and rendering live elsewhere; this crate has no
//! I/O and no async.

pub mod canonical;
pub mod records;

// Re-export primary types.
pub use canonical::{CanonicalBytes, CanonicalizationError};
pub use records::{
    Achievement, AchievementClaim, AchievementId, ClaimId, ClaimStatus, EvidenceItem, Identifier,
    IdentifierType, KeyId, Organization, OrganizationId, SigningKey, User, UserId,
};
