//! Users: account model, validation rules and the user use-case.
//!
//! Storage is reached only through [`UserRepository`]; implementations live in
//! `summer-infra`.

pub mod repository;
pub mod usecase;
pub mod user;

pub use repository::UserRepository;
pub use usecase::{UserError, UserUseCase};
pub use user::{
    EMAIL_KEY, NAME_KEY, NewUser, PASSWORD_KEY, USERNAME_KEY, User, UserPatch, is_valid_email,
};
