use std::time::Duration;

/// Simulated network latency, one duration per access function. Every call
/// waits its delay out before touching any state, so a call can never fail
/// after a partial mutation.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub list: Duration,
    pub transcript: Duration,
    pub send: Duration,
    pub mutate: Duration,
    pub csv_upload: Duration,
    pub text_upload: Duration,
}

impl Latency {
    /// Default per-operation delay profile for a running service.
    pub fn realistic() -> Self {
        Self {
            list: Duration::from_millis(500),
            transcript: Duration::from_millis(300),
            send: Duration::from_millis(500),
            mutate: Duration::from_millis(300),
            csv_upload: Duration::from_millis(1000),
            text_upload: Duration::from_millis(800),
        }
    }

    /// Zero delays, for tests.
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            transcript: Duration::ZERO,
            send: Duration::ZERO,
            mutate: Duration::ZERO,
            csv_upload: Duration::ZERO,
            text_upload: Duration::ZERO,
        }
    }

    pub async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
