//! Auth types shared across Mercato services.
//!
//! Provides JWT validation, the session-cookie builder, and the
//! `IdentityHeaders` extractor.

pub mod cookie;
pub mod identity;
pub mod token;
