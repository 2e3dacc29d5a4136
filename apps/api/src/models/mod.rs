pub mod provider;
pub mod user;

pub use provider::Provider;
pub use user::UserProfile;
