/// Failures the renderer can hit. Startup errors abort initialization;
/// frame errors stop the loop unless [`RenderError::is_recoverable`] says
/// the surface can be reconfigured and drawing resumed.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("frame draw failed: {0}")]
    Draw(#[from] wgpu::SurfaceError),
}

impl RenderError {
    /// Whether the frame loop may keep running after this error.
    ///
    /// A lost or outdated surface heals on the next frame once the surface
    /// is reconfigured; everything else stops the loop.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RenderError::Draw(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_surface_errors_keep_the_loop_alive() {
        assert!(RenderError::Draw(wgpu::SurfaceError::Outdated).is_recoverable());
        assert!(RenderError::Draw(wgpu::SurfaceError::Lost).is_recoverable());
    }

    #[test]
    fn startup_and_memory_errors_are_terminal() {
        assert!(!RenderError::Draw(wgpu::SurfaceError::OutOfMemory).is_recoverable());
        assert!(!RenderError::ContextUnavailable("no adapter".into()).is_recoverable());
        assert!(!RenderError::ShaderCompile("bad wgsl".into()).is_recoverable());
    }
}
