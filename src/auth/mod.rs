//! Authentication: session state, durable storage, sign-in and sign-up flows

pub mod models;
pub mod session;
pub mod signin;
pub mod signup;
pub mod storage;

pub use models::{Credentials, LoginResponse, RegisterRequest, Role, UserInfo};
pub use session::{Session, SessionStore};
pub use signin::sign_in;
pub use signup::{sign_up, SignUpForm};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
