pub mod auth_service;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod task_service;
pub use task_service::{TaskError, TaskService};

pub mod task_service_impl;
pub use task_service_impl::SeaOrmTaskService;
