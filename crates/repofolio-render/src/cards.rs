// Card grid materialization - the last stage of the pipeline
use repofolio_core::{select, RepoSummary};
use tracing::debug;

use crate::colors::language_color;
use crate::escape::escape_html;

const NO_DESCRIPTION: &str = "No description provided.";

const EMPTY_FRAGMENT: &str =
    r#"<p class="repo-grid-empty">No public repositories found.</p>"#;

/// Repo mark shown next to each card name.
const REPO_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22"></path></svg>"#;

const STAR_ICON: &str = r#"<svg width="12" height="12" viewBox="0 0 24 24" fill="currentColor"><path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z"/></svg>"#;

/// Renders the repository panel fragment the page splices into its grid
/// container. Filtering and ordering happen here because they are part of
/// the display contract, not the fetch contract: the cache always holds the
/// unfiltered fetch result.
pub struct Renderer {
    exclude: Vec<String>,
    profile_url: String,
    post_render: Option<Box<dyn Fn() + Send + Sync>>,
}

impl Renderer {
    pub fn new(exclude: Vec<String>, profile_url: String) -> Self {
        Self {
            exclude,
            profile_url,
            post_render: None,
        }
    }

    /// Register the reveal-animation hook. Invoked exactly once per render
    /// that produced at least one card, after the fragment is complete;
    /// never for the empty placeholder or the fallback path.
    ///
    /// "Complete" here means the fragment string is fully assembled - this
    /// renderer never sees the page it lands in. An embedder that splices
    /// the fragment into a live document and needs the hook to run after
    /// that splice should invoke its trigger from the splicing side instead.
    pub fn with_post_render(mut self, hook: Box<dyn Fn() + Send + Sync>) -> Self {
        self.post_render = Some(hook);
        self
    }

    pub fn render(&self, repos: Vec<RepoSummary>) -> String {
        let selected = select(repos, &self.exclude);

        if selected.is_empty() {
            debug!("nothing to render after filtering");
            return EMPTY_FRAGMENT.to_string();
        }

        let count = selected.len();
        let fragment: String = selected.iter().map(render_card).collect();
        debug!("rendered {} repository cards", count);

        if let Some(hook) = &self.post_render {
            hook();
        }

        fragment
    }

    /// Static fallback shown when the fetch fails: a short apology and a
    /// manual link to the profile page.
    pub fn render_fallback(&self) -> String {
        format!(
            r#"<p class="repo-grid-fallback">Failed to load repositories. <a href="{}" target="_blank" rel="noopener noreferrer">View on GitHub &rarr;</a></p>"#,
            escape_html(&self.profile_url)
        )
    }
}

fn render_card(repo: &RepoSummary) -> String {
    // Zero-width break after hyphens so long kebab-case names can wrap
    let name = escape_html(&repo.name).replace('-', "-\u{200B}");
    let desc = escape_html(repo.description.as_deref().unwrap_or(NO_DESCRIPTION));

    let lang = match &repo.language {
        Some(language) => format!(
            r#"<span class="repo-lang"><span class="lang-dot" style="background:{}"></span>{}</span>"#,
            language_color(language),
            escape_html(language)
        ),
        None => String::new(),
    };

    let live = match &repo.homepage_url {
        Some(homepage) => format!(
            r#"<a class="repo-live" href="{}" target="_blank" rel="noopener noreferrer" title="Live Demo">&#8599; Live</a>"#,
            escape_html(homepage)
        ),
        None => String::new(),
    };

    format!(
        r#"<a class="repo-card" href="{url}" target="_blank" rel="noopener noreferrer">
  <div class="repo-card-name">{icon}{name}</div>
  <p class="repo-card-desc">{desc}</p>
  <div class="repo-card-meta">{lang}<span class="repo-stars">{star}{stars}</span>{live}</div>
</a>
"#,
        url = escape_html(&repo.url),
        icon = REPO_ICON,
        name = name,
        desc = desc,
        lang = lang,
        star = STAR_ICON,
        stars = repo.stars,
        live = live,
    )
}
