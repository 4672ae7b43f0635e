//! HTML rendering.

use std::sync::LazyLock;

use anyhow::Error;

use minijinja::{Environment, Value};

use regex::Regex;

use rust_embed::RustEmbed;

use serde::Serialize;

/// Where mana symbol images are hosted.
pub const SYMBOL_BASE_URL: &str = "https://svgs.scryfall.io/card-symbols";

static MANA_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("valid mana symbol regex"));

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateFiles;

/// The page templates.
///
/// Every file in `templates/` is compiled in and loaded once on startup.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Loads the templates.
    pub fn new() -> Result<Templates, Error> {
        let mut env = Environment::new();

        for name in TemplateFiles::iter() {
            let Some(file) = TemplateFiles::get(&name) else {
                continue;
            };
            let source = String::from_utf8(file.data.into_owned())?;
            env.add_template_owned(name.into_owned(), source)?;
        }

        env.add_filter("mana", mana);

        Ok(Templates { env })
    }

    /// Renders a template.
    pub fn render<S>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error>
    where
        S: Serialize,
    {
        self.env.get_template(name)?.render(ctx)
    }
}

/// The `mana` template filter.
///
/// Replaces mana symbols such as `{T}` or `{2/U}` with their images. Missing
/// text renders as `N/A`.
pub fn mana(text: Option<String>) -> Value {
    match text.as_deref() {
        None | Some("") | Some("N/A") => Value::from("N/A"),
        Some(text) => Value::from_safe_string(mana_symbols(text)),
    }
}

/// Escapes text for HTML, turning mana symbols into `<img>` tags.
pub fn mana_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for symbol in MANA_SYMBOL.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[last..symbol.start()]));
        out.push_str(&symbol_image(symbol.as_str()));
        last = symbol.end();
    }

    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}

fn symbol_image(symbol: &str) -> String {
    let code = symbol
        .trim_matches(|c| c == '{' || c == '}')
        .replace('/', "")
        .to_uppercase();
    let title = html_escape::encode_double_quoted_attribute(symbol);

    format!(
        r#"<img src="{}/{}.svg" alt="{}" class="mana-symbol" title="{}">"#,
        SYMBOL_BASE_URL,
        html_escape::encode_double_quoted_attribute(&code),
        title,
        title,
    )
}
