//! # veneer — JSON and HTML template rendering for request handlers
//!
//! `veneer` is a small rendering layer for web request pipelines. At
//! installation time it compiles a directory of HTML templates into an
//! immutable snapshot; at request time it hands each handler a [`Renderer`]
//! that can write a JSON-serialized value, a rendered template (optionally
//! wrapped in a shared layout), or a bare status code to the response.
//!
//! It deliberately does *not* include an HTTP server, a router, or a
//! dependency-injection container — the host binds [`ResponseSink`] to its
//! framework's response type and decides how [`RenderState`] reaches
//! handlers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veneer::{RecompilePolicy, Render, RenderState, TemplateConfig};
//!
//! // At startup. A compile error here means a broken template directory;
//! // refuse to serve rather than discover the gap on a live request.
//! let state = RenderState::new(
//!     TemplateConfig::new("templates").with_layout("base"),
//!     RecompilePolicy::CompileOnce,
//! )?;
//!
//! // In a handler, with `sink` bound to the framework's response:
//! let mut r = state.renderer(&mut sink);
//! r.html(200, "todos/list", &todos);   // text/html through the layout
//! // or: r.json(200, &todos);          // application/json
//! // or: r.error(404);                 // status only
//! ```
//!
//! ## Failure model
//!
//! Template problems found at compile time are startup-fatal and surface as
//! [`CompileError`]. Problems at request time — JSON serialization failures,
//! missing template names, execution errors — degrade that one response to a
//! 500 with the error text as a plain-text body and never panic.
//!
//! ## Development reloading
//!
//! [`RecompilePolicy::RecompilePerRequest`] rebuilds the template snapshot
//! before each request. The snapshot is replaced whole behind a lock, so
//! concurrent in-flight requests keep rendering against the complete set
//! they started with.

pub mod render;
pub mod sink;
pub mod state;

pub use render::{Render, Renderer};
pub use sink::{
    BufferSink, ResponseSink, CONTENT_HTML, CONTENT_JSON, CONTENT_PLAIN, CONTENT_TYPE,
};
pub use state::{RecompilePolicy, RenderState};

// Re-export the compilation half so hosts only need one dependency.
pub use veneer_templates::{
    compile, CompileError, CompiledTemplate, RenderError, TemplateConfig, TemplateSet,
};
