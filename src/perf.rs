/// Drop-based timing spans for the render pipeline.
///
/// Compiled in with `--features perf`; otherwise a zero-sized no-op.
/// Events go out through `tracing` with target="perf".
#[cfg(feature = "perf")]
pub struct PerfSpan {
    name: &'static str,
    start: std::time::Instant,
}

#[cfg(feature = "perf")]
impl PerfSpan {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "perf")]
impl Drop for PerfSpan {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(target: "perf", span = self.name, elapsed_ms);
    }
}

#[cfg(not(feature = "perf"))]
pub struct PerfSpan;

#[cfg(not(feature = "perf"))]
impl PerfSpan {
    #[inline]
    pub fn new(_name: &'static str) -> Self {
        PerfSpan
    }
}

#[macro_export]
macro_rules! perf_scope {
    ($name:expr) => {
        $crate::perf::PerfSpan::new($name)
    };
}
