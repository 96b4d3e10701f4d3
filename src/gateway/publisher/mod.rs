//! Publisher: turns ready groups into CAN frames.
use crate::config::FrameIds;
use crate::error::PublishError;
use crate::protocol::transport::traits::can_bus::CanBus;
use crate::telemetry::group::{GroupReady, PUBLISH_PRIORITY};
use crate::telemetry::record::TelemetryRecord;

/// Send every ready group, highest priority first, and clear it.
///
/// Each group is split into its sub-records, one `send` per sub-record. A
/// group is cleared whatever the outcome of its sends: stale samples are
/// never retried, the next decoded value raises the group again.
///
/// Returns the number of frames accepted by the bus, or
/// [`PublishError::Send`] carrying the first error and the number of
/// rejected frames when at least one send failed.
pub async fn publish_ready<B: CanBus>(
    bus: &mut B,
    record: &TelemetryRecord,
    ready: &mut GroupReady,
    frame_ids: &FrameIds,
    timestamp: u32,
) -> Result<usize, PublishError<B::Error>> {
    let mut sent = 0;
    let mut failed = 0;
    let mut first_error = None;

    for group in PUBLISH_PRIORITY {
        if !ready.is_ready(group) {
            continue;
        }

        for kind in group.frames() {
            let frame = record.encode(*kind).to_frame(frame_ids.get(*kind), timestamp);

            match bus.send(&frame).await {
                Ok(()) => sent += 1,
                Err(error) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("CAN send failed for {} ({})", kind, frame.id);
                    failed += 1;
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        ready.clear(group);
    }

    match first_error {
        Some(error) => Err(PublishError::Send { failed, error }),
        None => Ok(sent),
    }
}
