// Brand Deck - Core Library
// Branded financial presentation generator: brand palette derivation,
// what-if scenario engine, mock dataset generation, and presentation storage.
// Exposed as a library for the CLI, API server, and tests.

pub mod color;
pub mod mock;
pub mod model;
pub mod simulate;
pub mod store;
pub mod theme;

// Re-export commonly used items
pub use color::{
    darken, generate_brand_palette, generate_monochromatic_palette, get_chart_theme_colors,
    get_contrast_color, get_status_colors, hex_to_hsl, hsl_to_hex, lighten, with_alpha,
    ChartThemeColors, Hsl, StatusColors,
};
pub use mock::{generate_mock_financial_data, DEFAULT_CHART_COLORS};
pub use model::{
    BalanceData, ExpenseData, FinancialData, HeadcountData, MetricsData, PlData, ProjectionsData,
    RevenueData, RunwayData, WaterfallEntry, WaterfallKind,
};
pub use simulate::{
    apply_scenario, simulate_burn_rate, simulate_churn_improvement, simulate_expense_reduction,
    simulate_fundraising, simulate_gross_margin, simulate_growth_rate, simulate_hiring,
    simulate_revenue_growth, ScenarioLever,
};
pub use store::{
    create_presentation, delete_presentation, find_by_customer, get_presentation,
    list_presentations, seed_dark_demo, seed_light_demo, setup_database, update_presentation,
    NewPresentation, Presentation, PresentationSummary, PresentationUpdate, SeedOutcome,
};
pub use theme::{
    resolve_theme, BrandColors, BrandConfig, ResolvedTheme, ThemeMode, DEFAULT_PRIMARY_COLOR,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
