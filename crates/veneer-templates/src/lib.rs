//! # veneer-templates — precompiled HTML template sets
//!
//! This crate is the compilation half of the `veneer` rendering middleware:
//! it turns a directory of template files into an immutable, name-addressable
//! [`TemplateSet`], ready to be shared across concurrent request handlers.
//!
//! ## Logical names
//!
//! Templates are addressed by their directory-relative path with the
//! configured extension stripped and separators normalized to forward
//! slashes: `templates/todos/list.tmpl` becomes `"todos/list"`.
//!
//! ## Layouts
//!
//! An optional shared layout wraps every template. The layout is compiled
//! jointly into each template's container and reaches the wrapped template
//! through the `content` global:
//!
//! ```jinja
//! {# base.tmpl #}
//! <html><body>{% include content %}</body></html>
//! ```
//!
//! The layout itself is never an addressable entry in the compiled set.
//!
//! ## Failure model
//!
//! [`compile`] returns a [`CompileError`] on the first traversal, read, or
//! parse failure — no partial set is ever produced. The intent is a loud
//! startup failure instead of a template gap discovered mid-traffic.
//!
//! ```rust,ignore
//! use veneer_templates::{compile, TemplateConfig};
//!
//! let config = TemplateConfig::new("templates").with_layout("base");
//! let set = compile(&config)?;
//! let body = set.render("todos/list", "base", &data)?;
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod set;
pub mod walk;

pub use compiler::compile;
pub use config::{TemplateConfig, DEFAULT_EXTENSION};
pub use error::{CompileError, RenderError};
pub use set::{CompiledTemplate, TemplateSet};
pub use walk::{walk_template_dir, TemplateFile};
