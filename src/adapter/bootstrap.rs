//! Process-wide, single-flight loading of the external control script.

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use tokio::sync::OnceCell;

use super::host::EmbedHost;

/// Guards injection of the external control script.
///
/// The cell is set exactly once, at the first successful injection, and
/// never reset. Concurrent callers await the same in-flight load instead of
/// racing; a failed injection leaves the cell unset so the next creation
/// attempt retries.
#[derive(Clone, Default)]
pub struct ScriptLoader {
    loaded: Arc<OnceCell<()>>,
}

impl ScriptLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance. Multiple playlist engines on one page
    /// share it so the script is never injected twice.
    pub fn shared() -> ScriptLoader {
        static SHARED: Lazy<ScriptLoader> = Lazy::new(ScriptLoader::new);
        SHARED.clone()
    }

    /// Ensure the control script is injected, injecting on first call.
    pub async fn ensure_loaded(&self, host: &dyn EmbedHost) -> Result<()> {
        self.loaded
            .get_or_try_init(|| async {
                tracing::debug!("Injecting external player control script");
                host.inject_script().await
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::host::{EmbedPlayer, SessionEvent};
    use crate::model::SessionId;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use tokio::sync::mpsc;

    /// Embed host that only counts script injections.
    #[derive(Default)]
    struct CountingHost {
        injects: AtomicU32,
        fail_first: AtomicBool,
    }

    #[async_trait]
    impl EmbedHost for CountingHost {
        async fn inject_script(&self) -> anyhow::Result<()> {
            self.injects.fetch_add(1, Ordering::SeqCst);
            if self.fail_first.swap(false, Ordering::SeqCst) {
                anyhow::bail!("network down");
            }
            Ok(())
        }

        fn script_ready(&self) -> bool {
            true
        }

        fn mount_ready(&self, _mount_id: &str) -> bool {
            true
        }

        async fn instantiate(
            &self,
            _mount_id: &str,
            _video_id: &str,
            _session: SessionId,
            _events: mpsc::Sender<SessionEvent>,
        ) -> anyhow::Result<Box<dyn EmbedPlayer>> {
            anyhow::bail!("not under test")
        }
    }

    /// Concurrent callers share one in-flight injection.
    #[tokio::test]
    async fn concurrent_callers_inject_once() {
        let host = Arc::new(CountingHost::default());
        let loader = ScriptLoader::new();

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let loader = loader.clone();
            let host = host.clone();
            tasks.push(tokio::spawn(async move {
                loader.ensure_loaded(host.as_ref()).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(host.injects.load(Ordering::SeqCst), 1);
    }

    /// A failed injection is not latched; the next call retries.
    #[tokio::test]
    async fn failed_injection_retries() {
        let host = CountingHost::default();
        host.fail_first.store(true, Ordering::SeqCst);
        let loader = ScriptLoader::new();

        assert!(loader.ensure_loaded(&host).await.is_err());
        assert!(loader.ensure_loaded(&host).await.is_ok());
        assert_eq!(host.injects.load(Ordering::SeqCst), 2);

        // Latched now: no third injection.
        loader.ensure_loaded(&host).await.unwrap();
        assert_eq!(host.injects.load(Ordering::SeqCst), 2);
    }
}
