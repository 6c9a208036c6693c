//! Per-request response rendering.
//!
//! [`Render`] is the capability handed to request handlers; [`Renderer`] is
//! its per-request implementation, bound to a response sink and a complete
//! template snapshot for the lifetime of one request.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use veneer_templates::{TemplateConfig, TemplateSet};

use crate::sink::{ResponseSink, CONTENT_HTML, CONTENT_JSON, CONTENT_PLAIN, CONTENT_TYPE};

/// Response-writing operations exposed to request handlers.
///
/// Each operation writes exactly once to the underlying sink. Calling a
/// second operation on the same response attempts a second status write,
/// which the transport may reject or ignore; don't do it.
///
/// Failures inside [`json`](Render::json) and [`html`](Render::html) degrade
/// to a 500 response carrying the error's description as a plain-text body —
/// they never panic and never take the serving process down for one bad
/// request.
pub trait Render {
    /// Serializes `value` as JSON and writes it with the given status and
    /// `Content-Type: application/json`.
    fn json<T: Serialize>(&mut self, status: u16, value: &T);

    /// Renders the named template (through the shared layout, when one is
    /// configured) and writes it with the given status and
    /// `Content-Type: text/html`.
    fn html<T: Serialize>(&mut self, status: u16, name: &str, binding: &T);

    /// Writes only the given status code: no body, no content type.
    fn error(&mut self, status: u16);
}

/// Per-request renderer.
///
/// Ephemeral: constructed for one request via
/// [`RenderState::renderer`](crate::RenderState::renderer) and dropped when
/// the request completes. Holds its own `Arc` snapshot of the template set,
/// so a concurrent recompile can never tear the mapping out from under an
/// in-flight request.
pub struct Renderer<'a, S: ResponseSink> {
    sink: &'a mut S,
    config: &'a TemplateConfig,
    templates: Arc<TemplateSet>,
}

impl<'a, S: ResponseSink> Renderer<'a, S> {
    pub(crate) fn new(
        sink: &'a mut S,
        config: &'a TemplateConfig,
        templates: Arc<TemplateSet>,
    ) -> Self {
        Self {
            sink,
            config,
            templates,
        }
    }

    /// The template snapshot this request is rendering against.
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Degrades a failed operation to a 500 with the error text as the body,
    /// overriding the caller's requested status and content type. Nothing of
    /// the original response has been written when this runs.
    fn fail(&mut self, err: impl fmt::Display) {
        let body = err.to_string();
        self.sink.set_header(CONTENT_TYPE, CONTENT_PLAIN);
        self.sink.write_status(500);
        let _ = self.sink.write_body(body.as_bytes());
    }
}

impl<S: ResponseSink> Render for Renderer<'_, S> {
    fn json<T: Serialize>(&mut self, status: u16, value: &T) {
        let body = match serde_json::to_vec(value) {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(error = %err, "json serialization failed");
                return self.fail(err);
            }
        };

        self.sink.set_header(CONTENT_TYPE, CONTENT_JSON);
        self.sink.write_status(status);
        let _ = self.sink.write_body(&body);
    }

    fn html<T: Serialize>(&mut self, status: u16, name: &str, binding: &T) {
        // With a layout configured, the layout is the execution target; it
        // reaches the requested template through the container they were
        // compiled into together.
        let target = self.config.layout.as_deref().unwrap_or(name);

        let body = match self.templates.render(name, target, binding) {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(template = name, error = %err, "html rendering failed");
                return self.fail(err);
            }
        };

        self.sink.set_header(CONTENT_TYPE, CONTENT_HTML);
        self.sink.write_status(status);
        let _ = self.sink.write_body(body.as_bytes());
    }

    fn error(&mut self, status: u16) {
        self.sink.write_status(status);
    }
}
