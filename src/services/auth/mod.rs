pub mod claims;
pub mod error;
pub mod factory;
pub mod role;
pub mod token_data;
pub mod token_validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::TokenError;
pub use factory::build_token_validator;
pub use role::Role;
pub use token_data::TokenData;
pub use token_validator::TokenValidator;
