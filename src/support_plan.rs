//! Support update strategies.
//!
//! `create` adds to our support, `abandon_change` replaces it, and `target`
//! sets it so the claim's total reaches a requested amount. Plans are
//! computed from `SupportFacts` first and then applied one claim at a time.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::gateway::{Gateway, GatewayError, SupportItem, Transport};
use crate::model::{InputEntry, Lbc, SupportFacts, SupportTarget};
use crate::resolver::failure_note;
use crate::transcript::Transcript;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Create,
    AbandonChange,
    Target,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Strategy::Create => "create",
            Strategy::AbandonChange => "abandon_change",
            Strategy::Target => "target",
        })
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Strategy::Create),
            "abandon_change" | "abandon-change" | "change" => Ok(Strategy::AbandonChange),
            "target" => Ok(Strategy::Target),
            other => Err(format!(
                "expected create, abandon_change or target, got {}",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SupportStep {
    /// Abandon all of our supports on the claim.
    Abandon,
    Create(Lbc),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SupportPlan {
    pub strategy: Strategy,
    pub facts: SupportFacts,
    pub steps: Vec<SupportStep>,
    pub new_ours: Lbc,
    pub new_existing: Lbc,
}

impl SupportPlan {
    /// Change of our support, negative when it shrinks.
    pub fn delta(&self) -> Lbc {
        self.new_ours - self.facts.ours
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("create needs an amount of at least {min}, got {got}")]
    AmountTooSmall { min: Lbc, got: Lbc },
    #[error("negative amounts are not accepted: {0}")]
    Negative(Lbc),
}

/// Computes the operations that take `facts` to the strategy's outcome.
pub fn plan(strategy: Strategy, facts: SupportFacts, number: Lbc) -> Result<SupportPlan, PlanError> {
    if number.is_negative() {
        return Err(PlanError::Negative(number));
    }

    let (steps, new_ours) = match strategy {
        Strategy::Create => {
            if number < Lbc::MIN_UNIT {
                return Err(PlanError::AmountTooSmall {
                    min: Lbc::MIN_UNIT,
                    got: number,
                });
            }
            (vec![SupportStep::Create(number)], facts.ours + number)
        }
        Strategy::AbandonChange => (replace_steps(facts.ours, number), number),
        Strategy::Target => {
            let new_ours = number.saturating_excess(facts.base);
            if new_ours == facts.ours {
                (Vec::new(), new_ours)
            } else {
                (replace_steps(facts.ours, new_ours), new_ours)
            }
        }
    };

    Ok(SupportPlan {
        strategy,
        facts,
        steps,
        new_ours,
        new_existing: facts.base + new_ours,
    })
}

fn replace_steps(ours: Lbc, new_ours: Lbc) -> Vec<SupportStep> {
    let mut steps = Vec::new();
    if ours.is_positive() {
        steps.push(SupportStep::Abandon);
    }
    if new_ours.is_positive() {
        steps.push(SupportStep::Create(new_ours));
    }
    steps
}

/// Runs the plan's steps in order, stopping at the first failure.
/// `on_step` sees each step after the daemon accepted it.
pub fn execute<T: Transport>(
    gw: &Gateway<T>,
    claim_id: &str,
    plan: &SupportPlan,
    mut on_step: impl FnMut(&SupportStep),
) -> Result<(), GatewayError> {
    for step in &plan.steps {
        match step {
            SupportStep::Abandon => gw.abandon_support(claim_id, None)?,
            SupportStep::Create(amount) => gw.create_support(claim_id, *amount)?,
        };
        on_step(step);
    }
    Ok(())
}

/// `execute` with a transcript line per step.
pub fn apply<T: Transport>(
    gw: &Gateway<T>,
    claim_id: &str,
    plan: &SupportPlan,
    out: &mut Transcript,
) -> Result<(), GatewayError> {
    if plan.steps.is_empty() {
        out.line("  nothing to do");
        return Ok(());
    }
    execute(gw, claim_id, plan, |step| match step {
        SupportStep::Abandon => {
            out.line(format!("  abandoned our support of {}", plan.facts.ours))
        }
        SupportStep::Create(amount) => out.line(format!("  created support of {}", amount)),
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SupportSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_change: Lbc,
}

impl SupportSummary {
    fn footer(&self, strategy: Strategy, out: &mut Transcript) {
        out.separator();
        out.line(format!(
            "Strategy: {}; updated: {}, unchanged: {}, skipped: {}, failed: {}",
            strategy, self.updated, self.unchanged, self.skipped, self.failed
        ));
        out.line(format!("Total change of our support: {}", signed(self.total_change)));
    }
}

fn signed(v: Lbc) -> String {
    if v.is_negative() {
        v.to_string()
    } else {
        format!("+{}", v)
    }
}

/// Applies one strategy to every resolved claim.
pub fn update_supports<T: Transport>(
    gw: &Gateway<T>,
    targets: &[SupportTarget],
    strategy: Strategy,
    out: &mut Transcript,
) -> SupportSummary {
    out.heading(&format!("Update supports ({})", strategy));
    let mut summary = SupportSummary::default();
    let total = targets.len();

    for (i, target) in targets.iter().enumerate() {
        let claim_ref = &target.claim;
        let claim = match &claim_ref.outcome {
            Ok(claim) => claim,
            Err(f) => {
                out.line(format!("Claim {}/{}, {}", i + 1, total, claim_ref.input_token));
                out.line(format!("  <-- {}, skipping", failure_note(f)));
                summary.skipped += 1;
                gap(out, i, total);
                continue;
            }
        };
        out.line(format!("Claim {}/{}, {}, {}", i + 1, total, claim.claim_id, claim.name));

        let Some(facts) = target.facts else {
            out.line("  <-- support facts unavailable, skipping");
            summary.skipped += 1;
            gap(out, i, total);
            continue;
        };
        out.line(format!(
            "  base: {}, existing: {}, ours: {}",
            facts.base, facts.existing, facts.ours
        ));

        let Some(number) = claim_ref.number else {
            out.line("  <-- no amount given, skipping");
            summary.skipped += 1;
            gap(out, i, total);
            continue;
        };

        match plan(strategy, facts, number) {
            Ok(p) => {
                out.line(format!(
                    "  {} {} -> ours: {} (change {}), existing: {}",
                    strategy,
                    number,
                    p.new_ours,
                    signed(p.delta()),
                    p.new_existing
                ));
                match apply(gw, &claim.claim_id, &p, out) {
                    Ok(()) if p.steps.is_empty() => summary.unchanged += 1,
                    Ok(()) => {
                        summary.updated += 1;
                        summary.total_change += p.delta();
                    }
                    Err(err) => {
                        tracing::warn!(claim = %claim.claim_id, error = %err, "support update failed");
                        out.line(format!("  <-- error: {}", err));
                        summary.failed += 1;
                    }
                }
            }
            Err(err) => {
                out.line(format!("  <-- {}, skipping", err));
                summary.skipped += 1;
            }
        }
        gap(out, i, total);
    }

    summary.footer(strategy, out);
    summary
}

fn gap(out: &mut Transcript, index: usize, total: usize) {
    if index + 1 < total {
        out.blank();
    }
}

/// How an input token was matched against our supports on invalid claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidMatch {
    ById { claim_id: String, name: String, ours: Lbc },
    ByName { claim_id: String, name: String, ours: Lbc },
    /// The name is shared by supports on several claims.
    Ambiguous { name: String, claim_ids: Vec<String> },
    Missing,
}

/// Claim ID first; a name only when it designates exactly one claim.
pub fn match_invalid(invalids: &[SupportItem], token: &str) -> InvalidMatch {
    let mut by_claim: BTreeMap<&str, (&str, Lbc)> = BTreeMap::new();
    for s in invalids {
        let entry = by_claim.entry(&s.claim_id).or_insert((&s.name, Lbc::ZERO));
        entry.1 += s.amount;
    }

    if let Some((name, ours)) = by_claim.get(token) {
        return InvalidMatch::ById {
            claim_id: token.to_string(),
            name: name.to_string(),
            ours: *ours,
        };
    }

    let name = token
        .trim_start_matches("lbry://")
        .split(['#', ':'])
        .next()
        .unwrap_or_default();
    let hits: Vec<(&str, &(&str, Lbc))> = by_claim
        .iter()
        .filter(|(_, (n, _))| *n == name)
        .map(|(cid, v)| (*cid, v))
        .collect();

    match hits.as_slice() {
        [] => InvalidMatch::Missing,
        [(cid, (n, ours))] => InvalidMatch::ByName {
            claim_id: cid.to_string(),
            name: n.to_string(),
            ours: *ours,
        },
        many => InvalidMatch::Ambiguous {
            name: name.to_string(),
            claim_ids: many.iter().map(|(cid, _)| cid.to_string()).collect(),
        },
    }
}

/// Support update for claims that no longer resolve. Their base support is
/// unknown, so it is taken as zero, and our support can only be reduced:
/// the change is one `support_abandon` keeping the new amount.
pub fn update_invalid_supports<T: Transport>(
    gw: &Gateway<T>,
    entries: &[InputEntry],
    strategy: Strategy,
    out: &mut Transcript,
) -> Result<SupportSummary, GatewayError> {
    let invalids = gw.list_invalid_supports()?;
    out.heading(&format!("Update supports on invalid claims ({})", strategy));
    let mut summary = SupportSummary::default();
    let total = entries.len();

    for (i, entry) in entries.iter().enumerate() {
        out.line(format!("Claim {}/{}, {}", i + 1, total, entry.token));
        let (claim_id, ours) = match match_invalid(&invalids, &entry.token) {
            InvalidMatch::ById { claim_id, ours, .. } => (claim_id, ours),
            InvalidMatch::ByName { claim_id, name, ours } => {
                out.line(format!("  matched by name {} to {}", name, claim_id));
                (claim_id, ours)
            }
            InvalidMatch::Ambiguous { name, claim_ids } => {
                out.line(format!(
                    "  <-- name {} matches {} claims ({}), use a claim ID; skipping",
                    name,
                    claim_ids.len(),
                    claim_ids.join(", ")
                ));
                summary.skipped += 1;
                gap(out, i, total);
                continue;
            }
            InvalidMatch::Missing => {
                out.line("  <-- no support on an invalid claim matches, skipping");
                summary.skipped += 1;
                gap(out, i, total);
                continue;
            }
        };

        let facts = SupportFacts::from_totals(ours, ours);
        let number = entry.amount().unwrap_or(Lbc::ZERO);
        let planned = match plan(strategy, facts, number) {
            Ok(p) => p,
            Err(err) => {
                out.line(format!("  <-- {}, skipping", err));
                summary.skipped += 1;
                gap(out, i, total);
                continue;
            }
        };
        let keep = planned.new_ours.min(ours);
        if keep != planned.new_ours {
            out.line("  support on an invalid claim can only be reduced");
        }
        if keep == ours {
            out.line(format!("  ours: {}, nothing to do", ours));
            summary.unchanged += 1;
            gap(out, i, total);
            continue;
        }

        match gw.abandon_support(&claim_id, Some(keep)) {
            Ok(_) => {
                out.line(format!("  ours: {} -> {}", ours, keep));
                summary.updated += 1;
                summary.total_change += keep - ours;
            }
            Err(err) => {
                out.line(format!("  <-- error: {}", err));
                summary.failed += 1;
            }
        }
        gap(out, i, total);
    }

    summary.footer(strategy, out);
    Ok(summary)
}

#[cfg(test)]
#[path = "tests/support_plan_tests.rs"]
mod tests;
