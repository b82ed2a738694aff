//! Page rendering shared by the static export and the server

use anyhow::Result;
use tera::Context;

use crate::helpers::{
    asset_url, background_for, is_internal_link, nav_links, post_url, url_for, SLIDESHOW_PATH,
    SLIDESHOW_SOCKET_PATH,
};
use crate::slideshow::{ImageList, SlideshowState};
use crate::templates::{ImageData, LinkData, PostData, SiteData, TemplateRenderer};
use crate::Folio;

/// Renders every page of the site to HTML
pub struct Pages {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: crate::content::MarkdownRenderer,
}

impl Pages {
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: folio.markdown(),
        })
    }

    /// About page at `/`
    pub fn about(&self) -> Result<String> {
        let mut context = self.context("/", None);

        // Bio paragraphs allow inline markdown such as links
        let bio: Vec<String> = self
            .folio
            .config
            .bio
            .iter()
            .map(|p| self.markdown.render(p))
            .collect();
        let links: Vec<LinkData> = self
            .folio
            .config
            .links
            .iter()
            .map(|l| {
                let external = !is_internal_link(&l.href);
                let href = if !external && l.href.starts_with('/') {
                    url_for(&self.folio.config, &l.href)
                } else {
                    l.href.clone()
                };
                LinkData {
                    name: l.name.clone(),
                    href,
                    external,
                }
            })
            .collect();

        context.insert("bio", &bio);
        context.insert("links", &links);
        self.renderer.render("about.html", &context)
    }

    /// Works page at `/works`
    pub fn works(&self) -> Result<String> {
        let mut context = self.context("/works", Some("Works"));
        context.insert("works", &self.folio.config.works);
        self.renderer.render("works.html", &context)
    }

    /// Writing index at `/writing`, visible posts newest first
    pub fn writing_index(&self) -> Result<String> {
        let posts: Vec<PostData> = self
            .folio
            .repository()
            .list_metadata()?
            .into_iter()
            .map(|meta| PostData {
                url: post_url(&self.folio.config, &meta.slug),
                meta,
            })
            .collect();
        let mut context = self.context("/writing", Some("Writing"));
        context.insert("posts", &posts);
        self.renderer.render("writing.html", &context)
    }

    /// Post page at `/writing/<slug>`, `None` when the slug is unknown
    pub fn post(&self, slug: &str) -> Result<Option<String>> {
        let Some(document) = self.folio.repository().get_by_slug(slug)? else {
            return Ok(None);
        };

        let path = format!("/writing/{}", slug);
        let content = self.markdown.render(&document.body);

        let mut context = self.context(&path, Some(document.title()));
        context.insert("post", &document.meta);
        context.insert("content", &content);
        Ok(Some(self.renderer.render("post.html", &context)?))
    }

    /// Not-found page for any unknown path
    pub fn not_found(&self, path: &str) -> Result<String> {
        let context = self.context(path, Some("Not found"));
        self.renderer.render("not_found.html", &context)
    }

    /// Gallery page at `/surprise`
    pub fn surprise(&self) -> Result<String> {
        let surprise = &self.folio.config.surprise;
        let images: Vec<ImageData> = surprise
            .images
            .iter()
            .map(|image| ImageData {
                src: url_for(&self.folio.config, &image.src),
                alt: image.alt.clone(),
            })
            .collect();

        let mut context = self.context("/surprise", Some("Surprise"));
        context.insert("images", &images);
        context.insert("caption", &surprise.caption);
        self.renderer.render("surprise.html", &context)
    }

    /// Slideshow page with a freshly shuffled image order.
    ///
    /// The order is embedded so the page keeps cycling on its own when no
    /// server session is reachable, as in the static export.
    pub fn slideshow(&self, images: &ImageList) -> Result<String> {
        let config = &self.folio.config;
        let state = SlideshowState::initialize(images.images.clone());
        let dir = url_for(config, &images.dir_path);
        let urls: Vec<String> = state
            .images()
            .iter()
            .map(|name| asset_url(&dir, name))
            .collect();
        // Keep the JSON from closing its <script> element
        let images_json = serde_json::to_string(&urls)?.replace("</", "<\\/");

        let mut context = self.context(SLIDESHOW_PATH, None);
        context.insert("first_image", &urls.first());
        context.insert("images_json", &images_json);
        context.insert("interval_secs", &config.slideshow.interval_secs.max(1));
        context.insert("socket_path", &url_for(config, SLIDESHOW_SOCKET_PATH));
        self.renderer.render("slideshow.html", &context)
    }

    fn context(&self, path: &str, title: Option<&str>) -> Context {
        let config = &self.folio.config;
        let background = background_for(path, &config.background);

        let mut context = Context::new();
        context.insert("site", &SiteData::from(config));
        context.insert("page_title", &title);
        context.insert("nav", &nav_links(config, path));
        context.insert(
            "background",
            &(!background.is_empty()).then(|| asset_url(&url_for(config, "images"), background)),
        );
        context.insert("writing_background", &path.starts_with("/writing/"));
        context
    }
}
