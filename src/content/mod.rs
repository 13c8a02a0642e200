//! Content module - post documents, the content store and markdown rendering

mod frontmatter;
pub mod links;
pub mod loader;
mod markdown;
mod math;
mod post;

pub use frontmatter::{is_truthy, FrontMatter};
pub use links::LinkKind;
pub use loader::ContentStore;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostField, PostFields, UnknownField};
