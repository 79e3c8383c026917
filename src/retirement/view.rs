//! Dashboard projection of a buyer session.

use serde::Serialize;

use crate::contract::CreditLedger;
use crate::retirement::flow::{RetireControl, RetirementFlow};
use crate::retirement::progress::OffsetSummary;
use crate::store::{BuyerProfile, KycStatus, PurchaseStore};

/// One line in the credit list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditRow {
    pub id: String,
    pub name: String,
    pub volume_tco2e: f64,
    pub token_id: u64,
    pub sold_at: Option<String>,
    pub retired: bool,
    pub control: RetireControl,
}

/// Everything the buyer dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub buyer: String,
    pub target_year: Option<u32>,
    /// Whether to nag about unfinished KYC.
    pub kyc_prompt: bool,
    pub summary: OffsetSummary,
    pub loading: bool,
    pub credits: Vec<CreditRow>,
}

impl DashboardView {
    pub fn build<L: CreditLedger, S: PurchaseStore>(
        profile: &BuyerProfile,
        flow: &RetirementFlow<L, S>,
    ) -> Self {
        let credits = flow.credits();
        let buyer = if profile.display_name.is_empty() {
            "Buyer".to_string()
        } else {
            profile.display_name.clone()
        };

        Self {
            buyer,
            target_year: profile.target_year,
            kyc_prompt: profile.kyc_status != KycStatus::Approved,
            summary: OffsetSummary::compute(
                profile.emissions_baseline,
                profile.offset_target,
                &credits,
            ),
            loading: flow.is_loading(),
            credits: credits
                .iter()
                .map(|credit| CreditRow {
                    id: credit.record.id.clone(),
                    name: credit.record.metadata.name.clone(),
                    volume_tco2e: credit.record.metadata.volume_tco2e,
                    token_id: credit.record.token_id,
                    sold_at: credit.record.sold_at.clone(),
                    retired: credit.is_retired(),
                    control: flow.control_for(credit),
                })
                .collect(),
        }
    }
}
