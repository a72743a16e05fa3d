//! Authentication service models

pub mod user;

pub use user::{
    AuthResponse, LoginRequest, NewUser, RefreshTokenRequest, RefreshTokenResponse,
    RegisterRequest, User, UserResponse,
};
