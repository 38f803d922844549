//! Location providers.
//!
//! A provider hands out fixes over a channel after `request_updates` and must stop
//! sending once `stop_updates` is called. Consumers decide which fixes are good
//! enough; providers never filter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{Config, Coordinate, LocationError, LocationFix};

/// Accuracy reported for IP-based fixes, roughly city level.
pub const IP_FIX_ACCURACY_METERS: f64 = 5_000.0;

const CHANNEL_CAPACITY: usize = 8;

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Start producing fixes. The channel closes when the provider has nothing more
    /// to send.
    async fn request_updates(&self) -> Result<mpsc::Receiver<LocationFix>, LocationError>;

    /// Stop producing fixes for the current request.
    fn stop_updates(&self);
}

/// Replays a fixed list of fixes, in order.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    fixes: Vec<LocationFix>,
    stopped: Arc<AtomicBool>,
}

impl FixedLocation {
    pub fn new(fixes: Vec<LocationFix>) -> Self {
        Self { fixes, stopped: Arc::new(AtomicBool::new(false)) }
    }

    pub fn single(coordinate: Coordinate, horizontal_accuracy: f64) -> Self {
        Self::new(vec![LocationFix::new(coordinate, horizontal_accuracy)])
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_updates(&self) -> Result<mpsc::Receiver<LocationFix>, LocationError> {
        if self.fixes.is_empty() {
            return Err(LocationError::Unavailable("no fixes configured".into()));
        }

        self.stopped.store(false, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let fixes = self.fixes.clone();
        let stopped = Arc::clone(&self.stopped);

        tokio::spawn(async move {
            for fix in fixes {
                if stopped.load(Ordering::SeqCst) {
                    break;
                }
                if tx.send(fix).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }

    fn stop_updates(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Approximate position from the public IP address (ip-api.com JSON format).
#[derive(Debug, Clone)]
pub struct IpLocation {
    base_url: String,
    http: Client,
    stopped: Arc<AtomicBool>,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

impl IpLocation {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LocationError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LocationError> {
        Self::new(config.geolocation_endpoint(), config.request_timeout())
    }

    async fn lookup(http: &Client, base_url: &str) -> Result<LocationFix, LocationError> {
        let url = format!("{base_url}/json/");
        debug!(%url, "looking up location by IP");

        let parsed: IpApiResponse = http
            .get(&url)
            .query(&[("fields", "status,message,lat,lon,city")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if parsed.status != "success" {
            return Err(LocationError::Unavailable(
                parsed.message.unwrap_or_else(|| parsed.status.clone()),
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => {
                debug!(city = ?parsed.city, lat, lon, "IP location resolved");
                Ok(LocationFix::new(Coordinate::new(lat, lon), IP_FIX_ACCURACY_METERS))
            }
            _ => Err(LocationError::Unavailable("response has no coordinates".into())),
        }
    }
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn request_updates(&self) -> Result<mpsc::Receiver<LocationFix>, LocationError> {
        self.stopped.store(false, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(1);
        let http = self.http.clone();
        let base_url = self.base_url.clone();
        let stopped = Arc::clone(&self.stopped);

        tokio::spawn(async move {
            match Self::lookup(&http, &base_url).await {
                Ok(fix) if !stopped.load(Ordering::SeqCst) => {
                    if tx.send(fix).await.is_err() {
                        debug!("location receiver dropped before the fix was delivered");
                    }
                }
                Ok(_) => debug!("location updates stopped before lookup finished"),
                Err(e) => warn!(error = %e, "IP location lookup failed"),
            }
        });

        Ok(rx)
    }

    fn stop_updates(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
