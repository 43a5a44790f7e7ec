// Financial dataset shape
// One snapshot of mock financial data, frozen into a presentation at creation
// time and stored as camelCase JSON. Raw fields are ground truth; derived
// fields are recomputed by the scenario engine and never edited directly.

use serde::{Deserialize, Serialize};

// ============================================================================
// SUB-RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueData {
    pub arr: f64,
    pub mrr: f64,
    pub yoy_growth: f64,
    pub monthly: Vec<MonthlyRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: f64,
    /// Share of total expenses, independently rounded per category.
    /// The shares re-sum to within ±1 of 100; drift is accepted.
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseData {
    pub total_expenses: f64,
    pub categories: Vec<ExpenseCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayData {
    pub current_cash: f64,
    pub monthly_burn: f64,
    pub runway_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub name: String,
    pub count: u32,
    pub color: String,
    pub avg_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountData {
    pub total_employees: u32,
    pub departments: Vec<Department>,
    pub cost_per_employee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    pub ltv: f64,
    pub cac: f64,
    pub ltv_cac_ratio: f64,
    pub churn_rate: f64,
    pub nrr: f64,
}

/// Sign convention for one waterfall line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterfallKind {
    /// Inflow, carries positive magnitude
    Positive,
    /// Outflow, carries negative magnitude
    Negative,
    /// Running subtotal
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallEntry {
    pub name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: WaterfallKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlData {
    pub revenue: f64,
    pub gross_margin: f64,
    pub operating_income: f64,
    pub net_income: f64,
    pub waterfall: Vec<WaterfallEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAssets {
    pub cash: f64,
    pub receivables: f64,
    pub other: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceLiabilities {
    pub payables: f64,
    pub debt: f64,
    pub other: f64,
}

/// Balance sheet snapshot. Invariant: totalAssets == totalLiabilities + totalEquity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceData {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub total_equity: f64,
    pub assets: BalanceAssets,
    pub liabilities: BalanceLiabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedMonth {
    pub month: String,
    pub revenue: f64,
}

/// One projected month on the profit track: base-scenario revenue against a
/// fixed-growth expense baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedProfit {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionScenarios {
    pub conservative: Vec<ProjectedMonth>,
    pub base: Vec<ProjectedMonth>,
    pub optimistic: Vec<ProjectedMonth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionAssumptions {
    pub base_growth: f64,
    pub conservative_growth: f64,
    pub optimistic_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionsData {
    pub scenarios: ProjectionScenarios,
    pub profit: Vec<ProjectedProfit>,
    pub assumptions: ProjectionAssumptions,
}

// ============================================================================
// COMPOSITE DATASET
// ============================================================================

/// The full financial dataset behind one presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub revenue: RevenueData,
    pub expenses: ExpenseData,
    pub runway: RunwayData,
    pub headcount: HeadcountData,
    pub metrics: MetricsData,
    pub pl: PlData,
    pub balance: BalanceData,
    pub projections: ProjectionsData,
}
