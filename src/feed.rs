use rss::ChannelBuilder;
use rss::GuidBuilder;
use rss::ImageBuilder;
use rss::Item;
use rss::ItemBuilder;

use crate::error::Result;
use crate::post::Post;
use crate::render::Renderer;
use crate::site::Site;
use crate::template::TemplateEngine;

pub const FEED_FILE: &str = "feed.rss";

/// The RSS feed for all posts, newest first, or `None` for a site without posts.
pub fn create_feed<E: TemplateEngine>(
    site: &Site,
    renderer: &Renderer<'_, E>,
) -> Result<Option<String>> {
    let Some(newest) = site.posts.first() else {
        return Ok(None);
    };
    log::trace!("Generating RSS data");

    let config = &site.config;
    let root = config.root_url.trim_end_matches('/');
    let items = site
        .posts
        .iter()
        .map(|post| {
            let content = renderer.render_post_content(post)?;
            Ok(post_item(post, root, &config.author, content))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut channel = ChannelBuilder::default();
    channel
        .title(config.title.clone())
        .link(config.root_url.clone())
        .description(config.description.clone())
        .last_build_date(Some(newest.date.to_rfc2822()))
        .items(items);
    if !config.author.is_empty() {
        channel.managing_editor(Some(config.author.clone()));
    }
    if !config.image.is_empty() {
        let image = ImageBuilder::default()
            .url(format!("{root}/assets/{}", config.image))
            .title(config.title.clone())
            .link(config.root_url.clone())
            .build();
        channel.image(Some(image));
    }

    let rss = channel.build().to_string();
    log::trace!("RSS data: {rss}");
    Ok(Some(rss))
}

fn post_item(post: &Post, root: &str, author: &str, content: String) -> Item {
    let link = format!("{root}{}", post.path);
    let guid = GuidBuilder::default().value(link.clone()).permalink(true).build();
    let categories: Vec<_> = post
        .tags
        .iter()
        .map(|tag| rss::Category {
            name: tag.clone(),
            domain: None,
        })
        .collect();

    let mut item = ItemBuilder::default();
    item.title(Some(post.title.clone()))
        .link(Some(link))
        .guid(Some(guid))
        .pub_date(Some(post.date.to_rfc2822()))
        .content(Some(content))
        .categories(categories);
    if !post.description.is_empty() {
        item.description(Some(post.description.clone()));
    }
    if !author.is_empty() {
        item.author(Some(author.to_owned()));
    }
    item.build()
}
