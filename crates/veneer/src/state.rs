//! Installation-time rendering state.
//!
//! [`RenderState`] is what the host application builds once, when it wires
//! the renderer into its pipeline: the template configuration, the compiled
//! snapshot, and the recompile policy. Per-request [`Renderer`]s are minted
//! from it.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use veneer_templates::{compile, CompileError, TemplateConfig, TemplateSet};

use crate::render::Renderer;
use crate::sink::ResponseSink;

/// When template compilation passes run.
///
/// An explicit configuration value, set once by the host — there is no
/// ambient environment-variable switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecompilePolicy {
    /// Compile once at installation; every request shares that snapshot.
    /// The right choice for production.
    #[default]
    CompileOnce,

    /// Recompile the whole directory before every request, so template
    /// edits show up without restarting the process. Development only.
    RecompilePerRequest,
}

/// Shared rendering state installed into the request pipeline.
///
/// The compiled [`TemplateSet`] lives behind an `RwLock<Arc<..>>`: a
/// recompile builds a complete new set off to the side and swaps the `Arc`
/// whole, while each request clones the `Arc` it finds. Concurrent readers
/// therefore always see an internally consistent snapshot — never a torn or
/// partially populated mapping, even mid-recompile.
///
/// # Example
///
/// ```rust,ignore
/// use veneer::{RecompilePolicy, Render, RenderState, TemplateConfig};
///
/// let state = RenderState::new(
///     TemplateConfig::new("templates").with_layout("base"),
///     RecompilePolicy::CompileOnce,
/// )?; // a CompileError here should abort startup
///
/// // per request:
/// let mut renderer = state.renderer(&mut sink);
/// renderer.html(200, "todos/list", &data);
/// ```
pub struct RenderState {
    config: TemplateConfig,
    policy: RecompilePolicy,
    templates: RwLock<Arc<TemplateSet>>,
}

impl RenderState {
    /// Compiles the configured directory and installs the first snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`CompileError`] from the initial pass. The host should
    /// treat this as a fatal startup failure: serving traffic against a
    /// broken template directory is exactly what this design refuses to do.
    pub fn new(config: TemplateConfig, policy: RecompilePolicy) -> Result<Self, CompileError> {
        let set = compile(&config)?;
        Ok(Self {
            config,
            policy,
            templates: RwLock::new(Arc::new(set)),
        })
    }

    /// Builds the per-request renderer writing to `sink`.
    ///
    /// Under [`RecompilePolicy::RecompilePerRequest`] a fresh compilation
    /// pass runs first. If that pass fails, the previous complete snapshot
    /// keeps serving and the failure is logged — a template typo during
    /// development degrades the reload, not the running server.
    pub fn renderer<'a, S: ResponseSink>(&'a self, sink: &'a mut S) -> Renderer<'a, S> {
        if self.policy == RecompilePolicy::RecompilePerRequest {
            if let Err(err) = self.recompile() {
                tracing::warn!(error = %err, "template recompilation failed; keeping previous set");
            }
        }
        Renderer::new(sink, &self.config, self.snapshot())
    }

    /// Runs a compilation pass and swaps in the new snapshot atomically.
    ///
    /// In-flight requests keep the snapshot they already hold; new requests
    /// pick up the replacement. Useful for hosts that reload on a signal
    /// instead of per request.
    ///
    /// # Errors
    ///
    /// On failure the current snapshot is left untouched.
    pub fn recompile(&self) -> Result<(), CompileError> {
        let set = compile(&self.config)?;
        *self.write_lock() = Arc::new(set);
        Ok(())
    }

    /// The current complete template snapshot.
    pub fn snapshot(&self) -> Arc<TemplateSet> {
        Arc::clone(
            &self
                .templates
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// The installed template configuration.
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// The installed recompile policy.
    pub fn policy(&self) -> RecompilePolicy {
        self.policy
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Arc<TemplateSet>> {
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_template_file(dir: &Path, relative_path: &str, content: &str) {
        let full_path = dir.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut file = std::fs::File::create(&full_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_new_compiles_initial_snapshot() {
        let dir = TempDir::new().unwrap();
        create_template_file(dir.path(), "index.tmpl", "home");

        let state = RenderState::new(
            TemplateConfig::new(dir.path()),
            RecompilePolicy::CompileOnce,
        )
        .unwrap();

        assert!(state.snapshot().contains("index"));
        assert_eq!(state.policy(), RecompilePolicy::CompileOnce);
    }

    #[test]
    fn test_new_propagates_compile_failure() {
        let dir = TempDir::new().unwrap();
        create_template_file(dir.path(), "broken.tmpl", "{% if unclosed");

        let result = RenderState::new(
            TemplateConfig::new(dir.path()),
            RecompilePolicy::CompileOnce,
        );
        assert!(matches!(result, Err(CompileError::Parse { .. })));
    }

    #[test]
    fn test_recompile_swaps_snapshot() {
        let dir = TempDir::new().unwrap();
        create_template_file(dir.path(), "index.tmpl", "v1");

        let state = RenderState::new(
            TemplateConfig::new(dir.path()),
            RecompilePolicy::CompileOnce,
        )
        .unwrap();
        let before = state.snapshot();

        create_template_file(dir.path(), "extra.tmpl", "added later");
        state.recompile().unwrap();

        // The old snapshot is unchanged; the new one has the extra entry.
        assert!(!before.contains("extra"));
        assert!(state.snapshot().contains("extra"));
    }

    #[test]
    fn test_recompile_failure_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        create_template_file(dir.path(), "index.tmpl", "good");

        let state = RenderState::new(
            TemplateConfig::new(dir.path()),
            RecompilePolicy::CompileOnce,
        )
        .unwrap();

        create_template_file(dir.path(), "index.tmpl", "{% broken");
        assert!(state.recompile().is_err());
        assert!(state.snapshot().contains("index"));
    }

    #[test]
    fn test_concurrent_snapshot_reads_during_recompile() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::thread;

        let dir = TempDir::new().unwrap();
        create_template_file(dir.path(), "index.tmpl", "stable");

        let state = Arc::new(
            RenderState::new(
                TemplateConfig::new(dir.path()),
                RecompilePolicy::CompileOnce,
            )
            .unwrap(),
        );
        let stop = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let state = Arc::clone(&state);
                let stop = Arc::clone(&stop);
                thread::spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        // Every observed snapshot must be complete.
                        let snapshot = state.snapshot();
                        assert!(snapshot.contains("index"));
                    }
                })
            })
            .collect();

        for _ in 0..20 {
            state.recompile().unwrap();
        }

        stop.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
