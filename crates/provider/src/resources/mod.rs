mod account;
mod email;

pub use account::AccountResource;
pub use email::EmailResource;
