//! # Ordered Rule Tables
//!
//! Threshold ladders expressed as data: each classifier owns a static slice
//! of `(predicate, outcome)` rules evaluated top to bottom, first match wins.
//! Predicates read their cutoffs from the injected threshold group, so the
//! same table serves every config.

/// One row of a rule table.
#[derive(Debug)]
pub struct Rule<I, C, O> {
    /// Stable identifier, surfaced in debug logs
    pub name: &'static str,
    pub when: fn(&I, &C) -> bool,
    pub then: O,
}

/// Catch-all predicate for the last row of a table.
pub fn always<I, C>(_: &I, _: &C) -> bool {
    true
}

/// Outcome of the first rule whose predicate holds, or `None` if no row matched.
pub fn first_match<'r, I, C, O>(rules: &'r [Rule<I, C, O>], input: &I, cfg: &C) -> Option<&'r O> {
    rules.iter().find(|rule| (rule.when)(input, cfg)).map(|rule| {
        tracing::trace!(rule = rule.name, "rule matched");
        &rule.then
    })
}
