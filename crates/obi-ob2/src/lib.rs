//! # Open Badges hosted documents
//!
//! Builders for the hosted-verification surfaces: the legacy 2.0
//! `Assertion`, `BadgeClass`, and `Issuer` documents, plus the 3.0
//! `Achievement` document their `related` entries cross-link to. All are
//! served from stable HTTPS URLs under the organization's domain.
//! Verifiers fetch the assertion URL and compare it with the presented
//! document, so no signature is involved; integrity comes from the host.
//!
//! ## Security Invariants
//!
//! - An assertion is only built for a shareable claim (accepted,
//!   `valid_from` set, not expired). Everything else yields `None`,
//!   never a partial document.
//! - The recipient identity is always salted and hashed, with a salt
//!   drawn fresh for each build and disjoint from any salt used in the
//!   Verifiable Credential rendering of the same claim.

pub mod achievement;
pub mod assertion;
pub mod badge_class;
pub mod constants;
pub mod issuer;

pub use achievement::{ob3_achievement_from_achievement, Ob3Achievement, Ob3Image};
pub use assertion::{badge_assertion_from_claim, BadgeAssertion, Recipient, Verification};
pub use badge_class::{badge_class_from_achievement, BadgeClass, Ob2Criteria};
pub use constants::{
    achievement_definition_url, OB2_CONTEXT_URL, OB2_NAMESPACE, OB3_NAMESPACE, OB_VERSION_V2P0,
    OB_VERSION_V3P0,
};
pub use issuer::{issuer_from_organization, Ob2Issuer, RelatedResource};
