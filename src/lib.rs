pub use brage_config::Config;
pub use brage_config::SiteConfig;
pub use brage_core::FileStore;
pub use brage_core::LocalFileStore;

pub use crate::build::BuildSummary;
pub use crate::build::build;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::files::ContentFile;
pub use crate::markdown::DocumentParser;
pub use crate::markdown::Markdown;
pub use crate::new::create_new_project;
pub use crate::page::Page;
pub use crate::post::Post;
pub use crate::post::make_post;
pub use crate::post::make_post_with;
pub use crate::render::Renderer;
pub use crate::render::render_page;
pub use crate::render::render_post;
pub use crate::render::render_post_content;
pub use crate::site::LayoutKind;
pub use crate::site::Site;
pub use crate::template::Mustache;
pub use crate::template::TemplateEngine;

pub mod build;
pub mod context;
pub mod error;
pub mod feed;
pub mod files;
pub mod markdown;
pub mod new;
pub mod page;
pub mod post;
pub mod render;
pub mod site;
pub mod template;
