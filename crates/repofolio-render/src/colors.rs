/// Language indicator color, matching GitHub's conventional palette for the
/// common languages and a violet default for everything else.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "Python" => "#3572A5",
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Jupyter Notebook" => "#DA5B0B",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Shell" => "#89e051",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "C++" => "#f34b7d",
        "Java" => "#b07219",
        _ => DEFAULT_COLOR,
    }
}

pub const DEFAULT_COLOR: &str = "#8A2BE2";
