mod user;

pub use user::{AccountStatus, Role, UserRecord};
