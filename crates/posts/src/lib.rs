//! Posts: the post model and the post use-case.

pub mod post;
pub mod repository;
pub mod usecase;

pub use post::{CAPTION_KEY, NewPost, OWNER_KEY, Post};
pub use repository::PostRepository;
pub use usecase::{PostError, PostUseCase};
