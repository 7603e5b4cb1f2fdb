pub mod credentials;
pub mod token_manager;
