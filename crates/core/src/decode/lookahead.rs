//! Boundary search for variable-length payloads.
//!
//! GS1 payloads are concatenated without delimiters unless the encoder
//! inserted FNC1, so the end of a batch or serial has to be inferred. A
//! position is only accepted as the start of the next segment when the
//! candidate AI *and* its payload validate: any two digits that happen to
//! spell a known code are not enough.

use gs1_toolchain_ai_tables::{self as tables, AiSpec, LengthKind};
use tracing::trace;

use crate::validate::{date::convert_date, validate_segment};

/// Smallest distance from the current AI to a candidate: two code
/// characters plus at least one payload character.
pub const MIN_DISTANCE: usize = 3;

/// Payload characters inspected for a variable-length candidate, whose own
/// end is not yet known.
pub const VARIABLE_PREVIEW: usize = 3;

/// A plausible next AI found by [`find_next_valid_ai`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiMatch {
    /// The candidate AI code.
    pub ai: &'static str,
    /// Byte offset of the candidate code.
    pub position: usize,
}

/// Find the nearest position after the AI at `start` where a complete,
/// valid segment begins.
///
/// Candidates are tried from `start + min_distance` onwards and never past
/// the point where the current payload would exceed its maximum length.
/// A candidate equal to `current_ai` is skipped: a repeated code inside a
/// batch or serial is far more likely to be payload data than a new field.
pub fn find_next_valid_ai(
    barcode: &str,
    start: usize,
    min_distance: usize,
    current_ai: &str,
) -> Option<AiMatch> {
    let len = barcode.len();
    let window_end = tables::lookup(current_ai)
        .map_or(len, |spec| start.saturating_add(2 + spec.max_length()))
        .min(len.saturating_sub(2));
    let first = start.saturating_add(min_distance);

    (first..=window_end).find_map(|pos| candidate_at(barcode, pos, current_ai))
}

fn candidate_at(barcode: &str, pos: usize, current_ai: &str) -> Option<AiMatch> {
    let spec = tables::lookup_at(barcode.as_bytes(), pos)?;
    if spec.code == current_ai {
        trace!(pos, ai = spec.code, "same AI inside payload, not a boundary");
        return None;
    }
    if !payload_plausible(barcode, pos + 2, spec) {
        trace!(pos, ai = spec.code, "candidate payload rejected");
        return None;
    }
    trace!(pos, ai = spec.code, "boundary accepted");
    Some(AiMatch {
        ai: spec.code,
        position: pos,
    })
}

fn payload_plausible(barcode: &str, payload_start: usize, spec: &AiSpec) -> bool {
    match spec.length {
        LengthKind::Fixed { length } => {
            let Some(payload) = barcode.get(payload_start..payload_start + length) else {
                return false;
            };
            validate_segment(payload, spec).is_ok()
                && (!spec.is_date || convert_date(payload).is_ok())
        }
        LengthKind::Variable { .. } => {
            let end = (payload_start + VARIABLE_PREVIEW).min(barcode.len());
            barcode
                .get(payload_start..end)
                .is_some_and(|preview| validate_segment(preview, spec).is_ok())
        }
    }
}
