//! Blog posts owned by verified accounts

mod service;

#[cfg(test)]
mod tests;

pub use service::{Actor, BlogService, NewBlog};
