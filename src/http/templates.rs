use axum::response::Html;
use handlebars::{handlebars_helper, Handlebars, TemplateError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use super::error::AppError;

pub const INDEX: &str = "index";
pub const WELCOME: &str = "welcome";
pub const BOOKING: &str = "booking";
pub const BOARD: &str = "board";

/// Characters left as-is in a path segment, the unreserved set of RFC 3986
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// Names are free text and may contain `/`, `?` or `#`
handlebars_helper!(path_segment: |value: str| {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
});

/// Every page can show a single flash message above its content
#[derive(Serialize)]
struct Page<'a, T> {
    message: Option<&'a str>,
    #[serde(flatten)]
    inner: T,
}

pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("path_segment", Box::new(path_segment));
        registry.register_template_string(INDEX, include_str!("../../templates/index.hbs"))?;
        registry.register_template_string(WELCOME, include_str!("../../templates/welcome.hbs"))?;
        registry.register_template_string(BOOKING, include_str!("../../templates/booking.hbs"))?;
        registry.register_template_string(BOARD, include_str!("../../templates/board.hbs"))?;

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(
        &self,
        name: &str,
        message: Option<&str>,
        inner: T,
    ) -> Result<Html<String>, AppError> {
        let html = self.registry.render(name, &Page { message, inner })?;
        Ok(Html(html))
    }
}
