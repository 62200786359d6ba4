//! Handlebars helpers for template rendering
//!
//! Registers the translation functions under names the templates call
//! directly. The current locale travels in template data under `"locale"`
//! (put the result of [`I18n::locale`] there when building the render
//! context); helpers fall back to the default locale when it is absent.

use crate::I18n;
use crate::format::Numeric;
use handlebars::{
    Context, Handlebars, Helper, HelperResult, JsonRender, Output, RenderContext, RenderError,
};
use std::fmt::Display;

/// Register all translation helpers:
///
/// - `{{locale}}` — the current locale key
/// - `{{num 1234567.5}}` — locale-formatted number
/// - `{{trans "hello" name}}` — translation with format arguments
/// - `{{transn "apple" count}}` — pluralized translation
/// - `{{locales}}` — comma-separated sorted locale keys
pub fn register_helpers(registry: &mut Handlebars<'_>, i18n: &I18n) {
    let handle = i18n.clone();
    registry.register_helper(
        "locale",
        Box::new(
            move |_: &Helper,
                  _: &Handlebars,
                  ctx: &Context,
                  _: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                out.write(&current_locale(ctx, &handle))?;
                Ok(())
            },
        ),
    );

    let handle = i18n.clone();
    registry.register_helper(
        "num",
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  ctx: &Context,
                  _: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                let value = h
                    .param(0)
                    .ok_or_else(|| RenderError::new("num requires a value"))?;
                let locale = current_locale(ctx, &handle);
                out.write(&handle.format_number(&locale, json_numeric(value.value())))?;
                Ok(())
            },
        ),
    );

    let handle = i18n.clone();
    registry.register_helper(
        "trans",
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  ctx: &Context,
                  _: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                let key = h
                    .param(0)
                    .and_then(|p| p.value().as_str().map(|s| s.to_string()))
                    .ok_or_else(|| RenderError::new("trans requires a key"))?;

                let rendered: Vec<String> =
                    h.params().iter().skip(1).map(|p| p.value().render()).collect();
                let args: Vec<&dyn Display> =
                    rendered.iter().map(|s| s as &dyn Display).collect();

                let locale = current_locale(ctx, &handle);
                out.write(&handle.translate(&locale, &key, None, &args))?;
                Ok(())
            },
        ),
    );

    let handle = i18n.clone();
    registry.register_helper(
        "transn",
        Box::new(
            move |h: &Helper,
                  _: &Handlebars,
                  ctx: &Context,
                  _: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                let key = h
                    .param(0)
                    .and_then(|p| p.value().as_str().map(|s| s.to_string()))
                    .ok_or_else(|| RenderError::new("transn requires a key"))?;
                let count = h
                    .param(1)
                    .map(|p| json_numeric(p.value()))
                    .ok_or_else(|| RenderError::new("transn requires a count"))?;

                let rendered: Vec<String> =
                    h.params().iter().skip(2).map(|p| p.value().render()).collect();
                let args: Vec<&dyn Display> =
                    rendered.iter().map(|s| s as &dyn Display).collect();

                let locale = current_locale(ctx, &handle);
                out.write(&handle.translate(&locale, &key, Some(count), &args))?;
                Ok(())
            },
        ),
    );

    let handle = i18n.clone();
    registry.register_helper(
        "locales",
        Box::new(
            move |_: &Helper,
                  _: &Handlebars,
                  _: &Context,
                  _: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                out.write(&handle.sorted_locales().join(", "))?;
                Ok(())
            },
        ),
    );
}

fn current_locale(ctx: &Context, i18n: &I18n) -> String {
    ctx.data()
        .get("locale")
        .and_then(|v| v.as_str())
        .unwrap_or(i18n.default_locale())
        .to_string()
}

fn json_numeric(value: &serde_json::Value) -> Numeric {
    if let Some(n) = value.as_u64() {
        Numeric::Unsigned(n)
    } else if let Some(n) = value.as_i64() {
        Numeric::Signed(n)
    } else if let Some(n) = value.as_f64() {
        Numeric::Float(n)
    } else {
        Numeric::Text(value.render())
    }
}
