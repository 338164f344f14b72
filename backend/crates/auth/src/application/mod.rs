pub mod access_token;
pub mod config;
pub mod login;
pub mod sign_up;

pub use access_token::AccessClaims;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
