use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

use handlebars::BlockContext;
use handlebars::Context;
use handlebars::Handlebars;
use handlebars::Helper;
use handlebars::HelperDef;
use handlebars::HelperResult;
use handlebars::JsonTruthy as _;
use handlebars::Output;
use handlebars::RenderContext;
use handlebars::Renderable as _;
use handlebars::Template;
use serde_json::Value;

/// How deep partials may include other partials.
pub const MAX_PARTIAL_DEPTH: usize = 32;

const SECTION: &str = "mustache-section";
const INVERTED: &str = "mustache-inverted";

static SECTION_TAG: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"\{\{(~?)\s*([#^/])\s*([^{}]*?)\s*(~?)\}\}").unwrap()
});

static PARTIAL_TAG: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"\{\{~?>\s*([^\s{}~]+)").unwrap());

/// Partial templates by name.
pub trait Partials {
    fn get(&self, name: &str) -> Option<&str>;
}

impl Partials for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        BTreeMap::get(self, name).map(String::as_str)
    }
}

impl<S: BuildHasher> Partials for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NoPartials;

impl Partials for NoPartials {
    fn get(&self, _name: &str) -> Option<&str> {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] handlebars::TemplateError),

    #[error(transparent)]
    Render(#[from] handlebars::RenderError),

    #[error("partial `{name}` does not exist")]
    MissingPartial { name: String },

    #[error("partial `{name}` includes itself")]
    RecursivePartial { name: String },

    #[error("partial `{name}` is nested more than {} levels deep", MAX_PARTIAL_DEPTH)]
    PartialDepth { name: String },
}

/// Evaluates a logic-less template.
pub trait TemplateEngine {
    fn render(
        &self,
        template: &str,
        context: &Value,
        partials: &dyn Partials,
    ) -> Result<String, Error>;
}

/// Mustache templates, evaluated with [`handlebars`].
///
/// `{{# name }}` iterates lists and renders once for any other truthy value; `{{^ name }}`
/// renders only for `null`, `false`, `""` and `[]`. Inside a list or object section, names
/// resolve against the current item; `@root.` reaches the top of the context.
///
/// Every partial a template refers to must exist, even if the tag is never reached.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mustache;

impl TemplateEngine for Mustache {
    fn render(
        &self,
        template: &str,
        context: &Value,
        partials: &dyn Partials,
    ) -> Result<String, Error> {
        let mut registry = Handlebars::new();
        registry.register_helper(SECTION, Box::new(SectionHelper));
        registry.register_helper(INVERTED, Box::new(InvertedHelper));
        register_partials(&mut registry, template, partials, &mut Vec::new())?;

        let template = expand_sections(template);
        Ok(registry.render_template(&template, context)?)
    }
}

/// Register every partial reachable from `source`.
fn register_partials(
    registry: &mut Handlebars<'_>,
    source: &str,
    partials: &dyn Partials,
    including: &mut Vec<String>,
) -> Result<(), Error> {
    for captures in PARTIAL_TAG.captures_iter(source) {
        let name = &captures[1];
        if including.iter().any(|n| n == name) {
            return Err(Error::RecursivePartial {
                name: name.to_owned(),
            });
        }
        if registry.has_template(name) {
            continue;
        }
        let partial = partials.get(name).ok_or_else(|| Error::MissingPartial {
            name: name.to_owned(),
        })?;
        if including.len() >= MAX_PARTIAL_DEPTH {
            return Err(Error::PartialDepth {
                name: name.to_owned(),
            });
        }

        log::trace!("Including partial `{name}`");
        registry.register_partial(name, expand_sections(partial))?;
        including.push(name.to_owned());
        register_partials(registry, partial, partials, including)?;
        including.pop();
    }
    Ok(())
}

/// Rewrite mustache sections into helper blocks: `{{# name }}..{{/ name }}` becomes
/// `{{#mustache-section name}}..{{/mustache-section}}`.
///
/// Blocks that already call a helper, such as `{{#if x}}`, are left alone.
fn expand_sections(source: &str) -> String {
    let mut open: Vec<Option<(&'static str, String)>> = Vec::new();
    SECTION_TAG
        .replace_all(source, |captures: &regex::Captures<'_>| {
            let (ltrim, sigil, name, rtrim) =
                (&captures[1], &captures[2], &captures[3], &captures[4]);
            let is_name = !name.is_empty() && !name.contains(char::is_whitespace);
            match sigil {
                "#" | "^" if is_name => {
                    let helper = if sigil == "#" { SECTION } else { INVERTED };
                    open.push(Some((helper, name.to_owned())));
                    format!("{{{{{ltrim}#{helper} {name}{rtrim}}}}}")
                }
                "#" => {
                    open.push(None);
                    captures[0].to_owned()
                }
                "/" => match open.pop() {
                    Some(Some((helper, opened))) if opened == name => {
                        format!("{{{{{ltrim}/{helper}{rtrim}}}}}")
                    }
                    // Left for handlebars to report the mismatch.
                    _ => captures[0].to_owned(),
                },
                _ => captures[0].to_owned(),
            }
        })
        .into_owned()
}

fn section_value<'h>(h: &'h Helper<'_>) -> &'h Value {
    h.param(0).map(|p| p.value()).unwrap_or(&Value::Null)
}

#[derive(Copy, Clone, Debug)]
struct SectionHelper;

impl HelperDef for SectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let Some(template) = h.template() else {
            return Ok(());
        };
        match section_value(h) {
            Value::Array(items) => {
                for item in items {
                    render_in(template, item.clone(), r, ctx, rc, out)?;
                }
                Ok(())
            }
            value @ Value::Object(_) => render_in(template, value.clone(), r, ctx, rc, out),
            value if value.is_truthy(true) => template.render(r, ctx, rc, out),
            _ => Ok(()),
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct InvertedHelper;

impl HelperDef for InvertedHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        match h.template() {
            Some(template) if !section_value(h).is_truthy(true) => {
                template.render(r, ctx, rc, out)
            }
            _ => Ok(()),
        }
    }
}

/// Render `template` with `base` as the current item.
fn render_in<'reg: 'rc, 'rc>(
    template: &'rc Template,
    base: Value,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    let mut block = BlockContext::new();
    block.set_base_value(base);
    rc.push_block(block);
    let rendered = template.render(r, ctx, rc, out);
    rc.pop_block();
    rendered
}
