//! Support (stake) verbs.

use super::*;
use crate::model::{Lbc, SupportFacts};
use crate::support_plan::{self, Strategy, SupportPlan};

impl<T: Transport> Gateway<T> {
    /// Our supports. With `claim_id`, only those on that claim.
    pub fn list_supports(&self, claim_id: Option<&str>) -> Result<Vec<SupportItem>, GatewayError> {
        let mut params = json!({ "page_size": ALL_ITEMS });
        if let Some(cid) = claim_id {
            params["claim_id"] = json!(cid);
        }
        let page: Page<SupportItem> = self.call_typed("support_list", params)?;
        Ok(page.items)
    }

    /// `existing` comes from the resolved claim, `ours` from our wallet.
    pub fn get_base_support(&self, claim: &Claim) -> Result<SupportFacts, GatewayError> {
        let existing = match claim.meta.support_amount {
            Some(amount) => amount,
            None => match self.resolve(&format!("lbry://{}#{}", claim.name, claim.claim_id))? {
                ResolveOutcome::Found(c) => c.meta.support_amount.unwrap_or_default(),
                ResolveOutcome::Error { .. } => Lbc::ZERO,
            },
        };
        let ours: Lbc = self
            .list_supports(Some(&claim.claim_id))?
            .iter()
            .map(|s| s.amount)
            .sum();
        Ok(SupportFacts::from_totals(existing, ours))
    }

    pub fn create_support(&self, claim_id: &str, amount: Lbc) -> Result<Value, GatewayError> {
        if amount < Lbc::MIN_UNIT {
            return Err(GatewayError::Daemon {
                method: "support_create".to_string(),
                message: format!("amount must be at least {}, got {}", Lbc::MIN_UNIT, amount),
            });
        }
        self.call_result(
            "support_create",
            json!({
                "claim_id": claim_id,
                "amount": amount.to_string(),
                "blocking": true,
            }),
        )
    }

    /// Abandons our supports on a claim. With `keep`, the daemon re-creates
    /// a single support of that amount in the same transaction.
    pub fn abandon_support(&self, claim_id: &str, keep: Option<Lbc>) -> Result<Value, GatewayError> {
        let mut params = json!({ "claim_id": claim_id, "blocking": true });
        if let Some(keep) = keep.filter(|k| k.is_positive()) {
            params["keep"] = json!(keep.to_string());
        }
        self.call_result("support_abandon", params)
    }

    /// Sets our support so the claim's total reaches `target`.
    pub fn target_support(&self, claim: &Claim, target: Lbc) -> Result<SupportPlan, GatewayError> {
        let facts = self.get_base_support(claim)?;
        let plan = support_plan::plan(Strategy::Target, facts, target).map_err(|e| {
            GatewayError::Daemon {
                method: "support_create".to_string(),
                message: e.to_string(),
            }
        })?;
        support_plan::execute(self, &claim.claim_id, &plan, |_| {})?;
        Ok(plan)
    }

    /// Our supports whose claim no longer resolves.
    pub fn list_invalid_supports(&self) -> Result<Vec<SupportItem>, GatewayError> {
        let mut out = Vec::new();
        for support in self.list_supports(None)? {
            let uri = format!("lbry://{}#{}", support.name, support.claim_id);
            if let ResolveOutcome::Error { .. } = self.resolve(&uri)? {
                out.push(support);
            }
        }
        Ok(out)
    }
}
