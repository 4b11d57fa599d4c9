// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// How failed submissions are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per row, including the first. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Attempts to make, never less than one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Import run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// Cell delimiter of delimited-text input.
    pub delimiter: u8,
    /// Parsing progress is reported every this many rows.
    pub progress_interval: usize,
    /// Submission retry policy.
    pub retry: RetryPolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            progress_interval: 50,
            retry: RetryPolicy::default(),
        }
    }
}

impl ImportConfig {
    /// Sets the delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the parsing progress interval.
    #[must_use]
    pub const fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
