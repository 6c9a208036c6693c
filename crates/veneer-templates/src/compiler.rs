//! Template compilation: one full pass from directory to [`TemplateSet`].
//!
//! A pass walks the configured directory, compiles every qualifying file,
//! and returns a complete set or the first error it hits. No partial set
//! ever escapes a failed pass: the caller either gets everything or a reason
//! to refuse startup.

use std::fs;

use minijinja::{Environment, Value};

use crate::config::TemplateConfig;
use crate::error::CompileError;
use crate::set::{CompiledTemplate, TemplateSet};
use crate::walk::walk_template_dir;

/// Runs one compilation pass over the configured directory.
///
/// Files are visited in lexicographic path order (see
/// [`walk_template_dir`](crate::walk::walk_template_dir)), so two passes over
/// an unchanged tree produce identical sets. Each qualifying file becomes a
/// [`CompiledTemplate`] keyed by its logical name.
///
/// When a layout is configured:
///
/// - the file whose logical name equals the layout name is skipped (the
///   layout is not independently addressable),
/// - every other template is compiled jointly with the layout source, and
///   its environment gets a `content` global bound to the template's own
///   name so the layout can `{% include content %}`,
/// - the layout file is read lazily, at the first template that needs it. A
///   configured layout missing from disk is only an error if at least one
///   template compiles against it.
///
/// # Errors
///
/// Any traversal, read, or parse failure aborts the pass. The host should
/// treat a failed pass at installation time as fatal rather than serve
/// traffic with a silent template gap.
pub fn compile(config: &TemplateConfig) -> Result<TemplateSet, CompileError> {
    let files = walk_template_dir(&config.directory, &config.extension)?;
    let layout = config.layout.as_deref().zip(config.layout_path());

    let mut set = TemplateSet::new();
    let mut layout_source: Option<String> = None;

    for file in files {
        if config.layout.as_deref() == Some(file.name.as_str()) {
            continue;
        }

        let source = fs::read_to_string(&file.path).map_err(|e| CompileError::Read {
            path: file.path.clone(),
            source: e,
        })?;

        let mut env = Environment::new();
        env.add_template_owned(file.name.clone(), source)
            .map_err(|e| CompileError::Parse {
                name: file.name.clone(),
                source: e,
            })?;

        if let Some((layout_name, layout_path)) = &layout {
            let layout_src = match layout_source.clone() {
                Some(src) => src,
                None => {
                    let src = fs::read_to_string(layout_path).map_err(|e| CompileError::Read {
                        path: layout_path.clone(),
                        source: e,
                    })?;
                    layout_source = Some(src.clone());
                    src
                }
            };

            env.add_template_owned(layout_name.to_string(), layout_src)
                .map_err(|e| CompileError::Parse {
                    name: layout_name.to_string(),
                    source: e,
                })?;
            env.add_global("content", Value::from(file.name.clone()));
        }

        set.insert(file.name.clone(), CompiledTemplate::new(file.name, env));
    }

    tracing::debug!(
        count = set.len(),
        directory = %config.directory.display(),
        "compiled template set"
    );

    Ok(set)
}
