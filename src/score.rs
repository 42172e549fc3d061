//! Release-readiness scoring
//!
//! Pure arithmetic over the three counters accumulated during the run.
//! Scoring never walks the findings list; the counters are the single
//! source of truth.

use crate::models::Status;

pub const BASE_SCORE: i32 = 95;
pub const OPERATIONAL_GAP_PENALTY: i32 = 30;
pub const SECURITY_RISK_PENALTY: i32 = 45;
pub const CYCLE_PENALTY: i32 = 15;

pub const NEEDS_ATTENTION_THRESHOLD: i32 = 90;
pub const NOT_READY_THRESHOLD: i32 = 70;

/// Compute the readiness score, clamped to `[0, BASE_SCORE]`.
pub fn compute_score(operational_gaps: u32, security_risks: u32, cycle_count: u32) -> i32 {
    let score = BASE_SCORE
        - OPERATIONAL_GAP_PENALTY * operational_gaps as i32
        - SECURITY_RISK_PENALTY * security_risks as i32
        - CYCLE_PENALTY * cycle_count as i32;
    score.max(0)
}

/// Map a score onto the three-band deployment status.
pub fn status_for(score: i32) -> Status {
    if score < NOT_READY_THRESHOLD {
        Status::NotReady
    } else if score < NEEDS_ATTENTION_THRESHOLD {
        Status::NeedsAttention
    } else {
        Status::Ready
    }
}
