//! Deterministic classification of critic replies.

/// Keyword that ends the loop with the current executor output.
pub const APPROVED: &str = "APPROVED";
/// Keyword that asks the executor for another revision.
pub const REVISION_REQUIRED: &str = "REVISION REQUIRED";

/// What the revision loop should do after a critic reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticVerdict {
    Approved,
    RevisionRequired,
    /// Neither keyword present. Not actionable, so the loop stops.
    Unclear,
}

/// Classify a critic reply by case-insensitive substring match.
///
/// - `Approved` if the reply contains `APPROVED` anywhere, even when it also
///   asks for a revision.
/// - `RevisionRequired` if it contains `REVISION REQUIRED`.
/// - `Unclear` otherwise.
pub fn classify_critic_reply(reply: &str) -> CriticVerdict {
    let upper = reply.to_uppercase();
    if upper.contains(APPROVED) {
        CriticVerdict::Approved
    } else if upper.contains(REVISION_REQUIRED) {
        CriticVerdict::RevisionRequired
    } else {
        CriticVerdict::Unclear
    }
}
