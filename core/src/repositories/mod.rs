pub mod user;

pub use user::UserDirectory;

#[cfg(any(test, feature = "testing"))]
pub use user::MockUserDirectory;
