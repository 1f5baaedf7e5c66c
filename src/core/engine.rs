use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::BuildMonitor;
use std::time::Instant;

/// Runs a [`Pipeline`] once: enumerate, compute, write.
pub struct BuildEngine<P: Pipeline> {
    pipeline: P,
    monitor: BuildMonitor,
}

impl<P: Pipeline> BuildEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: BuildMonitor::new(monitor_enabled),
        }
    }

    pub fn monitor(&self) -> &BuildMonitor {
        &self.monitor
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting site build...");

        // Extract
        let started = Instant::now();
        let routes = self.pipeline.extract().await?;
        tracing::info!("🧭 Enumerated {} routes", routes.len());
        self.monitor.record("enumerate", routes.len(), started.elapsed());

        // Transform
        let started = Instant::now();
        let artifacts = self.pipeline.transform(routes).await?;
        tracing::info!(
            "🧮 Computed {} pages, {} sitemap entries, {} search entries",
            artifacts.pages.len(),
            artifacts.sitemap.len(),
            artifacts.search_index.len()
        );
        self.monitor.record("compute", artifacts.pages.len(), started.elapsed());

        // Load
        let started = Instant::now();
        let written = artifacts.routes.len();
        let output_path = self.pipeline.load(artifacts).await?;
        tracing::info!("💾 Output written to: {}", output_path);
        self.monitor.record("write", written, started.elapsed());

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
