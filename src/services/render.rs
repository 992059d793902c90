use crate::error::AppError;
use crate::models::EmailType;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Fixed logo asset referenced by every HTML template. The renderer always
/// injects this value, so a caller-supplied `logo_url` never wins.
pub const LOGO_URL: &str = "https://pulsepay.com/image.png";

/// The subject/HTML/text triple produced for one send.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Template renderer. All templates are compiled once at startup; a render
/// only builds a context and substitutes values.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();

        let mut templates = Vec::new();
        for email_type in EmailType::ALL {
            templates.push((format!("{}.html", email_type), email_type.html_template()));
            templates.push((format!("{}.txt", email_type), email_type.text_template()));
        }
        tera.add_raw_templates(templates)?;

        // Tera's default escaper also entity-encodes `/`, which would mangle
        // every URL in the emails. Keep the minimal HTML-significant set.
        tera.set_escape_fn(escape_html);

        Ok(Self { tera })
    }

    /// Render the template pair for `email_type`. Declared keys missing from
    /// the caller context are substituted with an empty string rather than
    /// failing the request. HTML output is escaped, text output is not.
    pub fn render(
        &self,
        email_type: EmailType,
        context: &HashMap<String, String>,
    ) -> Result<RenderedEmail, AppError> {
        let mut ctx = Context::new();
        for (key, value) in context {
            ctx.insert(key.as_str(), value);
        }
        for key in email_type.context_keys() {
            if !context.contains_key(*key) {
                ctx.insert(*key, "");
            }
        }
        ctx.insert("logo_url", LOGO_URL);

        let html = self.tera.render(&format!("{}.html", email_type), &ctx)?;
        let text = self.tera.render(&format!("{}.txt", email_type), &ctx)?;

        Ok(RenderedEmail {
            subject: email_type.subject().to_string(),
            html,
            text,
        })
    }
}

/// HTML escaping for substituted values: `& < > " '`, the same set Jinja2
/// escapes. Applied only to templates registered with an `.html` name.
fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}
