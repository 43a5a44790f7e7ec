// Mock financial data generation
// Produces the simulated dataset frozen into a presentation at creation time.
// Labels follow the Swedish deck copy; derived fields are computed with the
// same formulas the scenario engine uses, so a fresh dataset is already
// internally consistent.

use rand::Rng;

use crate::model::{
    BalanceAssets, BalanceData, BalanceLiabilities, Department, ExpenseCategory, ExpenseData,
    FinancialData, HeadcountData, MetricsData, MonthlyRevenue, PlData, ProjectedMonth,
    ProjectedProfit, ProjectionAssumptions, ProjectionScenarios, ProjectionsData, RevenueData,
    RunwayData, WaterfallEntry, WaterfallKind,
};

/// Default chart colors, used when no brand palette is provided.
pub const DEFAULT_CHART_COLORS: [&str; 5] =
    ["#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6"];

/// Fixed annual operating expenses assumed by the P&L model.
pub(crate) const FIXED_OPEX: f64 = 3_200_000.0;

/// Fraction of operating income retained as net income (tax/interest proxy).
pub(crate) const NET_INCOME_FACTOR: f64 = 0.85;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) const FUTURE_MONTHS: [&str; 6] = ["M1", "M2", "M3", "M4", "M5", "M6"];

/// Monthly expense baseline for the projected profit track.
pub(crate) const PROJECTED_EXPENSE_BASE: f64 = 680_000.0;
pub(crate) const PROJECTED_EXPENSE_GROWTH: f64 = 1.02;

/// Build the Swedish-labeled P&L waterfall from its derived components.
pub(crate) fn build_waterfall(
    revenue: f64,
    cogs: f64,
    gross_profit: f64,
    opex: f64,
    net_income: f64,
) -> Vec<WaterfallEntry> {
    vec![
        WaterfallEntry {
            name: "Intäkter".to_string(),
            value: revenue,
            kind: WaterfallKind::Positive,
        },
        WaterfallEntry {
            name: "Kostnad Sålda Varor".to_string(),
            value: -cogs,
            kind: WaterfallKind::Negative,
        },
        WaterfallEntry {
            name: "Bruttovinst".to_string(),
            value: gross_profit,
            kind: WaterfallKind::Total,
        },
        WaterfallEntry {
            name: "Rörelsekostnader".to_string(),
            value: -opex,
            kind: WaterfallKind::Negative,
        },
        WaterfallEntry {
            name: "Nettoresultat".to_string(),
            value: net_income,
            kind: WaterfallKind::Total,
        },
    ]
}

/// Generate a full mock financial dataset, coloring chart series from the
/// given brand palette. Fewer than 5 colors falls back to the defaults.
pub fn generate_mock_financial_data(chart_colors: &[String]) -> FinancialData {
    let defaults: Vec<String> = DEFAULT_CHART_COLORS.iter().map(|c| c.to_string()).collect();
    let colors: &[String] = if chart_colors.len() >= 5 {
        chart_colors
    } else {
        defaults.as_slice()
    };

    let mut rng = rand::thread_rng();
    let base_revenue = 450_000.0;

    // Revenue: steady ramp with jitter, ARR annualized off the latest month
    let monthly: Vec<MonthlyRevenue> = MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| MonthlyRevenue {
            month: month.to_string(),
            revenue: (base_revenue * (1.0 + i as f64 * 0.08)
                + rng.gen_range(0.0..50_000.0))
            .round(),
        })
        .collect();
    let current_mrr = monthly.last().map(|m| m.revenue).unwrap_or(base_revenue);
    let arr = current_mrr * 12.0;

    let revenue = RevenueData {
        arr,
        mrr: current_mrr,
        yoy_growth: 47.0,
        monthly,
    };

    let expenses = ExpenseData {
        total_expenses: 4_800_000.0,
        categories: vec![
            ExpenseCategory {
                name: "Löner".to_string(),
                amount: 2_880_000.0,
                percentage: 60.0,
                color: colors[0].clone(),
            },
            ExpenseCategory {
                name: "Marknadsföring".to_string(),
                amount: 720_000.0,
                percentage: 15.0,
                color: colors[1].clone(),
            },
            ExpenseCategory {
                name: "Infrastruktur".to_string(),
                amount: 480_000.0,
                percentage: 10.0,
                color: colors[2].clone(),
            },
            ExpenseCategory {
                name: "Drift".to_string(),
                amount: 384_000.0,
                percentage: 8.0,
                color: colors[3].clone(),
            },
            ExpenseCategory {
                name: "Övrigt".to_string(),
                amount: 336_000.0,
                percentage: 7.0,
                color: colors[4].clone(),
            },
        ],
    };

    let runway = RunwayData {
        current_cash: 8_500_000.0,
        monthly_burn: 400_000.0,
        runway_months: (8_500_000.0f64 / 400_000.0).round(),
    };

    let headcount = HeadcountData {
        total_employees: 47,
        departments: vec![
            Department {
                name: "Teknik".to_string(),
                count: 18,
                color: colors[0].clone(),
                avg_salary: 150_000.0,
            },
            Department {
                name: "Försäljning".to_string(),
                count: 12,
                color: colors[1].clone(),
                avg_salary: 120_000.0,
            },
            Department {
                name: "Marknadsföring".to_string(),
                count: 8,
                color: colors[2].clone(),
                avg_salary: 100_000.0,
            },
            Department {
                name: "Drift".to_string(),
                count: 5,
                color: colors[3].clone(),
                avg_salary: 90_000.0,
            },
            Department {
                name: "Ekonomi".to_string(),
                count: 4,
                color: colors[4].clone(),
                avg_salary: 110_000.0,
            },
        ],
        cost_per_employee: 10_200.0,
    };

    let metrics = MetricsData {
        ltv: 24_000.0,
        cac: 6_000.0,
        ltv_cac_ratio: 4.0,
        churn_rate: 2.1,
        nrr: 115.0,
    };

    // P&L at a 72% gross margin, derived the same way the simulator derives it
    let gross_margin = 72.0;
    let cogs = (arr * (1.0 - gross_margin / 100.0)).round();
    let gross_profit = arr - cogs;
    let operating_income = gross_profit - FIXED_OPEX;
    let net_income = (operating_income * NET_INCOME_FACTOR).round();

    let pl = PlData {
        revenue: arr,
        gross_margin,
        operating_income,
        net_income,
        waterfall: build_waterfall(arr, cogs, gross_profit, FIXED_OPEX, net_income),
    };

    let balance = BalanceData {
        total_assets: 12_500_000.0,
        total_liabilities: 2_800_000.0,
        total_equity: 9_700_000.0,
        assets: BalanceAssets {
            cash: 8_500_000.0,
            receivables: 2_500_000.0,
            other: 1_500_000.0,
        },
        liabilities: BalanceLiabilities {
            payables: 800_000.0,
            debt: 1_500_000.0,
            other: 500_000.0,
        },
    };

    let track = |monthly_factor: f64| -> Vec<ProjectedMonth> {
        FUTURE_MONTHS
            .iter()
            .enumerate()
            .map(|(i, month)| ProjectedMonth {
                month: month.to_string(),
                revenue: (current_mrr * monthly_factor.powi(i as i32 + 1)).round(),
            })
            .collect()
    };

    let base_track = track(1.04);
    let profit = base_track
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

    let projections = ProjectionsData {
        scenarios: ProjectionScenarios {
            conservative: track(1.02),
            base: base_track,
            optimistic: track(1.06),
        },
        profit,
        assumptions: ProjectionAssumptions {
            base_growth: 48.0,
            conservative_growth: 24.0,
            optimistic_growth: 72.0,
        },
    };

    FinancialData {
        revenue,
        expenses,
        runway,
        headcount,
        metrics,
        pl,
        balance,
        projections,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> FinancialData {
        generate_mock_financial_data(&[])
    }

    #[test]
    fn test_arr_is_annualized_mrr() {
        let data = mock();
        assert_eq!(data.revenue.arr, data.revenue.mrr * 12.0);
        assert_eq!(data.revenue.monthly.len(), 12);
        assert_eq!(data.revenue.mrr, data.revenue.monthly.last().unwrap().revenue);
    }

    #[test]
    fn test_expense_percentages_sum_to_about_100() {
        let data = mock();
        let sum: f64 = data.expenses.categories.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() <= 1.0, "percentages sum to {}", sum);

        let total: f64 = data.expenses.categories.iter().map(|c| c.amount).sum();
        assert_eq!(total, data.expenses.total_expenses);
    }

    #[test]
    fn test_runway_consistent() {
        let data = mock();
        assert_eq!(
            data.runway.runway_months,
            (data.runway.current_cash / data.runway.monthly_burn).round()
        );
    }

    #[test]
    fn test_headcount_totals() {
        let data = mock();
        let sum: u32 = data.headcount.departments.iter().map(|d| d.count).sum();
        assert_eq!(sum, data.headcount.total_employees);
    }

    #[test]
    fn test_pl_derivation_consistent() {
        let data = mock();
        let cogs = (data.pl.revenue * (1.0 - data.pl.gross_margin / 100.0)).round();
        let gross_profit = data.pl.revenue - cogs;
        assert_eq!(data.pl.operating_income, gross_profit - FIXED_OPEX);
        assert_eq!(
            data.pl.net_income,
            (data.pl.operating_income * NET_INCOME_FACTOR).round()
        );
        assert_eq!(data.pl.waterfall.len(), 5);
        assert!(data.pl.waterfall[1].value < 0.0, "COGS entry must be negative");
        assert_eq!(data.pl.waterfall[2].kind, WaterfallKind::Total);
    }

    #[test]
    fn test_balance_identity_holds() {
        let data = mock();
        assert_eq!(
            data.balance.total_assets,
            data.balance.total_liabilities + data.balance.total_equity
        );
    }

    #[test]
    fn test_brand_colors_thread_into_series() {
        let palette: Vec<String> = ["#111111", "#222222", "#333333", "#444444", "#555555"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let data = generate_mock_financial_data(&palette);

        assert_eq!(data.expenses.categories[0].color, "#111111");
        assert_eq!(data.expenses.categories[4].color, "#555555");
        assert_eq!(data.headcount.departments[0].color, "#111111");
    }

    #[test]
    fn test_short_palette_falls_back_to_defaults() {
        let data = generate_mock_financial_data(&["#111111".to_string()]);
        assert_eq!(data.expenses.categories[0].color, DEFAULT_CHART_COLORS[0]);
    }

    #[test]
    fn test_projection_tracks_cover_six_months() {
        let data = mock();
        assert_eq!(data.projections.scenarios.conservative.len(), 6);
        assert_eq!(data.projections.scenarios.base.len(), 6);
        assert_eq!(data.projections.scenarios.optimistic.len(), 6);
        assert_eq!(data.projections.profit.len(), 6);

        for p in &data.projections.profit {
            assert_eq!(p.profit, p.revenue - p.expenses);
        }
    }

    #[test]
    fn test_dataset_round_trips_through_json() {
        let data = mock();
        let json = serde_json::to_string(&data).unwrap();
        let back: FinancialData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
