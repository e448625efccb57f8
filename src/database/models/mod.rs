pub mod task;
pub mod user;

pub use task::{Task, TaskDetails};
pub use user::{normalize_email, User};
