// What-if scenario engine
// Pure recomputation of derived financial fields from one scalar lever.
// Every function returns a new sub-record and never mutates its input.
//
// Numeric policy is deliberately permissive: zero or negative denominators
// (burn rate, churn, headcount) propagate IEEE inf/NaN instead of erroring,
// so a slider mid-drag at 0 never crashes a recompute.

use serde::{Deserialize, Serialize};

use crate::mock::{build_waterfall, FIXED_OPEX, FUTURE_MONTHS, NET_INCOME_FACTOR,
    PROJECTED_EXPENSE_BASE, PROJECTED_EXPENSE_GROWTH};
use crate::model::{
    BalanceData, ExpenseData, FinancialData, HeadcountData, MetricsData, MonthlyRevenue, PlData,
    ProjectedMonth, ProjectedProfit, ProjectionsData, RevenueData, RunwayData,
};

/// Starting MRR assumed by the growth-rate projection.
const PROJECTION_BASE_MRR: f64 = 720_000.0;

/// NRR ceiling: retention above 150% is not credible for the demo model.
const NRR_CAP: f64 = 150.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// SIMULATION FUNCTIONS
// ============================================================================

/// Apply additional revenue growth: scales ARR, MRR, and every monthly point.
pub fn simulate_revenue_growth(data: &RevenueData, additional_growth_percent: f64) -> RevenueData {
    let multiplier = 1.0 + additional_growth_percent / 100.0;
    RevenueData {
        arr: (data.arr * multiplier).round(),
        mrr: (data.mrr * multiplier).round(),
        yoy_growth: (data.yoy_growth + additional_growth_percent).round(),
        monthly: data
            .monthly
            .iter()
            .map(|m| MonthlyRevenue {
                month: m.month.clone(),
                revenue: (m.revenue * multiplier).round(),
            })
            .collect(),
    }
}

/// Reduce one expense category and re-derive every category's share of the
/// new total. Shares are rounded independently, so they sum to about 100.
pub fn simulate_expense_reduction(
    data: &ExpenseData,
    category: &str,
    reduction_percent: f64,
) -> ExpenseData {
    let mut categories: Vec<_> = data
        .categories
        .iter()
        .map(|c| {
            let mut c = c.clone();
            if c.name == category {
                c.amount = (c.amount * (1.0 - reduction_percent / 100.0)).round();
            }
            c
        })
        .collect();

    let new_total: f64 = categories.iter().map(|c| c.amount).sum();
    for c in &mut categories {
        c.percentage = (c.amount / new_total * 100.0).round();
    }

    ExpenseData {
        total_expenses: new_total,
        categories,
    }
}

/// Set a new monthly burn and re-derive runway.
pub fn simulate_burn_rate(data: &RunwayData, new_burn_rate: f64) -> RunwayData {
    RunwayData {
        current_cash: data.current_cash,
        monthly_burn: new_burn_rate,
        runway_months: (data.current_cash / new_burn_rate).round(),
    }
}

/// Add hires to one department and re-derive the monthly cost per employee
/// from the blended department salaries.
pub fn simulate_hiring(
    data: &HeadcountData,
    new_hires: u32,
    department: &str,
    avg_salary: f64,
) -> HeadcountData {
    let departments: Vec<_> = data
        .departments
        .iter()
        .map(|d| {
            let mut d = d.clone();
            if d.name == department {
                d.count += new_hires;
                // New hires come in at the quoted salary; fold it into the
                // department average so the blend reflects them
                let prior = d.count - new_hires;
                if d.count > 0 {
                    d.avg_salary = ((d.avg_salary * prior as f64 + avg_salary * new_hires as f64)
                        / d.count as f64)
                        .round();
                }
            }
            d
        })
        .collect();

    let total_employees: u32 = departments.iter().map(|d| d.count).sum();
    let total_cost: f64 = departments
        .iter()
        .map(|d| d.count as f64 * d.avg_salary)
        .sum();

    HeadcountData {
        total_employees,
        departments,
        cost_per_employee: (total_cost / total_employees as f64 / 12.0).round(),
    }
}

/// Improve churn by a percentage. LTV scales with the inverse churn ratio
/// (customers stay proportionally longer), NRR drifts up toward its cap.
pub fn simulate_churn_improvement(data: &MetricsData, improvement_percent: f64) -> MetricsData {
    let new_churn = data.churn_rate * (1.0 - improvement_percent / 100.0);
    let new_ltv = (data.ltv * (data.churn_rate / new_churn)).round();

    MetricsData {
        ltv: new_ltv,
        cac: data.cac,
        ltv_cac_ratio: round1(new_ltv / data.cac),
        churn_rate: round1(new_churn),
        nrr: (data.nrr + improvement_percent * 0.2).round().min(NRR_CAP),
    }
}

/// Reprice gross margin and rebuild the P&L waterfall.
pub fn simulate_gross_margin(data: &PlData, new_gross_margin: f64) -> PlData {
    let cogs = (data.revenue * (1.0 - new_gross_margin / 100.0)).round();
    let gross_profit = data.revenue - cogs;
    let operating_income = gross_profit - FIXED_OPEX;
    let net_income = (operating_income * NET_INCOME_FACTOR).round();

    PlData {
        revenue: data.revenue,
        gross_margin: new_gross_margin,
        operating_income,
        net_income,
        waterfall: build_waterfall(data.revenue, cogs, gross_profit, FIXED_OPEX, net_income),
    }
}

/// Raise new capital: cash, total assets, and equity all grow by the amount.
/// Liabilities are untouched, keeping assets == liabilities + equity.
pub fn simulate_fundraising(data: &BalanceData, amount: f64) -> BalanceData {
    let mut balance = data.clone();
    balance.total_assets += amount;
    balance.total_equity += amount;
    balance.assets.cash += amount;
    balance
}

/// Re-project the 6-month horizon at a new annual growth rate.
/// The annual rate compounds monthly; conservative and optimistic tracks run
/// at fixed multiples of the base monthly factor. A fixed-growth expense
/// baseline yields the per-month profit track.
pub fn simulate_growth_rate(data: &ProjectionsData, new_growth_rate: f64) -> ProjectionsData {
    let monthly_growth = (1.0 + new_growth_rate / 100.0).powf(1.0 / 12.0);

    let track = |factor: f64| -> Vec<ProjectedMonth> {
        FUTURE_MONTHS
            .iter()
            .enumerate()
            .map(|(i, month)| ProjectedMonth {
                month: month.to_string(),
                revenue: (PROJECTION_BASE_MRR * factor.powi(i as i32 + 1)).round(),
            })
            .collect()
    };

    let base = track(monthly_growth);
    let profit = base
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let expenses =
                (PROJECTED_EXPENSE_BASE * PROJECTED_EXPENSE_GROWTH.powi(i as i32 + 1)).round();
            ProjectedProfit {
                month: m.month.clone(),
                revenue: m.revenue,
                expenses,
                profit: m.revenue - expenses,
            }
        })
        .collect();

    let mut projections = data.clone();
    projections.assumptions.base_growth = new_growth_rate;
    projections.scenarios.conservative = track(monthly_growth * 0.7);
    projections.scenarios.base = base;
    projections.scenarios.optimistic = track(monthly_growth * 1.3);
    projections.profit = profit;
    projections
}

// ============================================================================
// LEVER DISPATCH
// ============================================================================

/// One scenario lever, as posted by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "lever", rename_all = "camelCase")]
pub enum ScenarioLever {
    #[serde(rename_all = "camelCase")]
    RevenueGrowth { percent: f64 },
    #[serde(rename_all = "camelCase")]
    ExpenseReduction { category: String, percent: f64 },
    #[serde(rename_all = "camelCase")]
    BurnRate { monthly_burn: f64 },
    #[serde(rename_all = "camelCase")]
    Hiring {
        hires: u32,
        department: String,
        avg_salary: f64,
    },
    #[serde(rename_all = "camelCase")]
    ChurnImprovement { percent: f64 },
    #[serde(rename_all = "camelCase")]
    GrossMargin { percent: f64 },
    #[serde(rename_all = "camelCase")]
    Fundraising { amount: f64 },
    #[serde(rename_all = "camelCase")]
    GrowthRate { percent: f64 },
}

/// Apply one lever to a full dataset, recomputing only the sub-record the
/// lever targets. The rest of the dataset is carried over unchanged.
pub fn apply_scenario(data: &FinancialData, lever: &ScenarioLever) -> FinancialData {
    let mut next = data.clone();
    match lever {
        ScenarioLever::RevenueGrowth { percent } => {
            next.revenue = simulate_revenue_growth(&data.revenue, *percent);
        }
        ScenarioLever::ExpenseReduction { category, percent } => {
            next.expenses = simulate_expense_reduction(&data.expenses, category, *percent);
        }
        ScenarioLever::BurnRate { monthly_burn } => {
            next.runway = simulate_burn_rate(&data.runway, *monthly_burn);
        }
        ScenarioLever::Hiring {
            hires,
            department,
            avg_salary,
        } => {
            next.headcount = simulate_hiring(&data.headcount, *hires, department, *avg_salary);
        }
        ScenarioLever::ChurnImprovement { percent } => {
            next.metrics = simulate_churn_improvement(&data.metrics, *percent);
        }
        ScenarioLever::GrossMargin { percent } => {
            next.pl = simulate_gross_margin(&data.pl, *percent);
        }
        ScenarioLever::Fundraising { amount } => {
            next.balance = simulate_fundraising(&data.balance, *amount);
        }
        ScenarioLever::GrowthRate { percent } => {
            next.projections = simulate_growth_rate(&data.projections, *percent);
        }
    }
    next
}

// ============================================================================
// TESTS
// ============================================================================
