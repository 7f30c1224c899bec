//! Data models for Bookshelf

pub mod book;
pub mod progress;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookInput};
pub use progress::Progress;
pub use user::User;
