pub mod otp;
pub mod password_reset;
pub mod profile;
pub mod register;
pub mod session;
