pub mod article;
pub mod guidebook;
pub mod index;

pub use article::{build_articles, Article};
pub use guidebook::{Entry, Guidebook, Link, Section, Topic};
pub use index::{normalize, ContentIndex};
