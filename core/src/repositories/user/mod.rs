pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use r#trait::UserDirectory;

#[cfg(any(test, feature = "testing"))]
pub use mock::MockUserDirectory;
