use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use reqwest::blocking::Client;

use crate::error::ScrapeError;
use crate::model::FetchResult;

/// Minimum pause between the start of consecutive requests.
pub const NICE_WAIT: Duration = Duration::from_secs(3);

/// Never sleep in increments shorter than this.
pub const NICE_MIN_SLEEP: Duration = Duration::from_millis(100);

/// Identifying tag sent with every outbound request.
const CLIENT_TAG: &str = "howto-random/0.1";

/// Time source used by the fetcher; swappable for deterministic tests.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Outbound HTTP access as the discovery loop sees it. Tests implement this
/// with scripted responses instead of a live network.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> Result<FetchResult, ScrapeError>;
}

/// Blocking HTTP client that guarantees a minimum interval between the start
/// of consecutive requests. Owns the last-access timestamp; there is no
/// other shared state.
pub struct RateLimitedFetcher<C: Clock = SystemClock> {
    client: Client,
    clock: C,
    min_interval: Duration,
    min_sleep: Duration,
    last_access: Option<Instant>,
}

impl RateLimitedFetcher {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, NICE_WAIT, NICE_MIN_SLEEP)
    }
}

impl Default for RateLimitedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RateLimitedFetcher<C> {
    pub fn with_clock(clock: C, min_interval: Duration, min_sleep: Duration) -> Self {
        let client = Client::builder()
            .user_agent(CLIENT_TAG)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            clock,
            min_interval,
            min_sleep,
            last_access: None,
        }
    }

    /// Block until at least `min_interval` has passed since the last access.
    fn wait_for_slot(&mut self) {
        let Some(last) = self.last_access else {
            return;
        };
        let until = last + self.min_interval;
        let mut now = self.clock.now();
        while now < until {
            let remaining = until - now;
            self.clock.sleep(remaining.max(self.min_sleep));
            now = self.clock.now();
        }
    }
}

impl<C: Clock> Fetch for RateLimitedFetcher<C> {
    /// Fetch `url`, honoring the rate limit. Any transport error or non-2xx
    /// status propagates; there is no retry at this layer.
    fn fetch(&mut self, url: &str) -> Result<FetchResult, ScrapeError> {
        self.wait_for_slot();
        debug!("GET {url}");

        let response = self.client.get(url).send()?.error_for_status()?;
        let final_url = response.url().to_string();
        let body = response.bytes()?.to_vec();
        self.last_access = Some(self.clock.now());

        Ok(FetchResult { final_url, body })
    }
}
