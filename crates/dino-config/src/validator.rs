//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use dino_common::{validate_non_empty, validate_timestamp, PageviewsError, Result};

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.api.endpoint, "api.endpoint")?;
        validate_non_empty(&self.api.user_agent, "api.user_agent")?;
        validate_non_empty(&self.request.project, "request.project")?;

        if !self.api.endpoint.starts_with("http://") && !self.api.endpoint.starts_with("https://") {
            return Err(PageviewsError::validation_field(
                format!("api.endpoint must be an http(s) URL, got '{}'", self.api.endpoint),
                "api.endpoint",
            ));
        }

        validate_timestamp(&self.request.start, "request.start")?;
        validate_timestamp(&self.request.end, "request.end")?;
        // Same width and all digits, so string order is time order.
        if self.request.start >= self.request.end {
            return Err(PageviewsError::validation_field(
                format!(
                    "request.start ({}) must come before request.end ({})",
                    self.request.start, self.request.end
                ),
                "request.start",
            ));
        }

        if self.throttle.requests_per_second == 0 {
            return Err(PageviewsError::validation_field(
                "throttle.requests_per_second must be greater than 0",
                "throttle.requests_per_second",
            ));
        }

        if self.plots.width == 0 || self.plots.height == 0 {
            return Err(PageviewsError::validation_field(
                "plots.width and plots.height must be greater than 0",
                "plots",
            ));
        }

        if self.plots.top_k == 0 {
            return Err(PageviewsError::validation_field(
                "plots.top_k must be greater than 0",
                "plots.top_k",
            ));
        }

        Ok(())
    }
}
