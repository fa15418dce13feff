pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskStatus};
pub use user::User;
