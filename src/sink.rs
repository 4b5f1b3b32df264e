//! Submission sinks
//!
//! Where a customization snapshot goes when the user saves it.

use crate::form::CustomizationData;

/// Acknowledgement shown after a successful save
pub const SAVED_ACKNOWLEDGEMENT: &str =
    "T-shirt customization saved! (This would normally be sent to a backend)";

/// Receives snapshots on submit
pub trait SubmissionSink {
    /// Handle a snapshot and return the acknowledgement to show the user.
    fn submit(&mut self, snapshot: CustomizationData) -> String;
}

/// Records the snapshot in the log and acknowledges it
#[derive(Debug, Default)]
pub struct NotifySink;

impl SubmissionSink for NotifySink {
    fn submit(&mut self, snapshot: CustomizationData) -> String {
        match serde_json::to_string(&snapshot) {
            Ok(json) => tracing::info!(form = %json, "form submitted"),
            Err(e) => tracing::warn!(?snapshot, "form submitted, serialization failed: {}", e),
        }
        SAVED_ACKNOWLEDGEMENT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_sink_acknowledges() {
        let mut sink = NotifySink;
        let ack = sink.submit(CustomizationData::default());
        assert_eq!(ack, SAVED_ACKNOWLEDGEMENT);
    }
}
