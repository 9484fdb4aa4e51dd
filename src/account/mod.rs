//! Account lifecycle for whisperbox.
//!
//! Signup, email verification, and per-account settings.

mod settings;
mod signup;
mod verification;

pub use settings::{get_user, set_accepting_messages};
pub use signup::{is_username_available, sign_up, EMAIL_REGISTERED, USERNAME_TAKEN};
pub use verification::{
    code_expiry_timestamp, generate_verification_code, verify_code, INCORRECT_CODE,
};
