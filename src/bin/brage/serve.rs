use std::path;

use anyhow::Context as _;
use brage_serve::Reply;

use crate::args;
use crate::error::Result;

/// Serve the site at PATH, re-reading it on every request
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ServeArgs {
    /// Site directory
    #[arg(value_name = "PATH", default_value = ".")]
    pub(crate) path: path::PathBuf,

    /// Open a browser
    #[arg(long)]
    pub(crate) open: bool,

    /// Host to serve from
    #[arg(long, value_name = "HOSTNAME_OR_IP", default_value = "localhost")]
    pub(crate) host: String,

    /// Port to serve from
    #[arg(short = 'P', long, value_name = "NUM")]
    pub(crate) port: Option<u16>,
}

impl ServeArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = brage::Config::with_source(args::source_dir(&self.path));
        brage::Site::load_with_config(&config)
            .with_context(|| format!("Unable to load site from `{}`", config.source.display()))?;

        let mut server = brage_serve::ServerBuilder::new();
        server.hostname(&self.host);
        if let Some(port) = self.port {
            server.port(port);
        }
        let source = config.source.clone();
        let server = server.build(move |path: &str| respond(&config, path));

        if self.open {
            let url = format!("http://{}", server.addr());
            open_browser(url);
        }

        log::info!("Serving {}", source.display());
        log::info!("Server Listening on http://{}", server.addr());
        log::info!("Ctrl-c to stop the server");

        Ok(server.serve()?)
    }
}

fn respond(config: &brage::Config, path: &str) -> Reply {
    let reply = brage::Site::load_with_config(config).and_then(|site| route(&site, path));
    match reply {
        Ok(reply) => reply,
        Err(e) => {
            let e = anyhow::Error::from(e);
            log::error!("{path}: {e:#}");
            Reply::Error(format!("{e:#}"))
        }
    }
}

/// What the site has at `path`: an asset, a page, a post or a redirect.
fn route(site: &brage::Site, path: &str) -> brage::Result<Reply> {
    if let Some(rel) = path.strip_prefix("/assets/") {
        if rel.split('/').any(|segment| segment == "..") {
            return Ok(Reply::NotFound);
        }
        let file = site.assets_dir().join(rel);
        return Ok(if file.is_file() {
            Reply::File(file)
        } else {
            Reply::NotFound
        });
    }

    let renderer = brage::Renderer::new(site);
    if let Some(page) = site.page(path) {
        return Ok(Reply::Html(renderer.render_page(page)?));
    }
    if let Some(post) = site.post(path) {
        return Ok(Reply::Html(renderer.render_post(post)?));
    }

    let redirect = site
        .config
        .redirects
        .iter()
        .find(|(source, _)| brage_serve::normalize_path(source) == path);
    if let Some((_, target)) = redirect {
        return Ok(Reply::Html(brage::build::redirect_html(target)));
    }

    Ok(Reply::NotFound)
}

fn open_browser(url: String) {
    match open::that(url) {
        Ok(()) => log::info!("Please check your browser!"),
        Err(why) => log::error!("Failure to execute command: {why}"),
    }
}
