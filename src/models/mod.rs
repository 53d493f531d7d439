pub mod project;
pub mod task;
pub mod user;

pub use project::{CreateProjectPayload, Project};
pub use task::{CreateTaskPayload, EditTaskPayload, NewTask, Task, TaskStatus, TaskUpdate};
pub use user::{CreateUserPayload, LoginPayload, NewUser, User};
