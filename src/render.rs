use minijinja::{Environment, HtmlEscape, context};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const RESULTS_TEMPLATE: &str = include_str!("../templates/results.html");

/// Form and result pages. Both templates end in `.html`, so output is auto-escaped.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("results.html", RESULTS_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn index(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {})
    }

    pub fn results(&self, lines: &[String]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("results.html")?
            .render(context! { format_output => lines })
    }
}

/// Neutralize markup-significant characters in user text.
pub fn escape_html(text: &str) -> String {
    HtmlEscape(text).to_string()
}
