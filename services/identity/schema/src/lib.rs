//! sea-orm entities owned by the identity service.

pub mod otp_codes;
pub mod users;
