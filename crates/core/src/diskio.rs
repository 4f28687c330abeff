/// Cumulative running mean of `/diskio` total throughput since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskIoAverage {
    mean:  f64,
    count: u64,
}

impl DiskIoAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample in and return the updated mean.
    pub fn record(&mut self, total: f64) -> f64 {
        let n = self.count as f64;
        self.mean = (self.mean * n + total) / (n + 1.0);
        self.count += 1;
        self.mean
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
