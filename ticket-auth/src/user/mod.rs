pub mod errors;
pub mod models;
pub mod ports;

pub use errors::EmailError;
pub use errors::StoreError;
pub use models::EmailAddress;
pub use models::NewUser;
pub use models::Principal;
pub use models::User;
pub use models::UserId;
pub use ports::UserLookup;
pub use ports::UserStore;
