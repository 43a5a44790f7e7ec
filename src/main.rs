// Brand Deck - CLI
// Database setup, demo seeding, and palette preview from the terminal.

use anyhow::Result;
use rusqlite::Connection;
use std::env;

use brand_deck::{
    generate_brand_palette, get_contrast_color, hex_to_hsl, list_presentations, seed_dark_demo,
    seed_light_demo, setup_database, Hsl, VERSION,
};

fn db_path() -> String {
    env::var("BRAND_DECK_DB").unwrap_or_else(|_| "presentations.db".to_string())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("init") => run_init(),
        Some("list") => run_list(),
        Some("palette") => {
            let hex = args.get(2).map(String::as_str).unwrap_or("#3B82F6");
            let count = args
                .get(3)
                .and_then(|c| c.parse::<usize>().ok())
                .unwrap_or(5);
            run_palette(hex, count)
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Brand Deck v{}", VERSION);
    println!();
    println!("Usage:");
    println!("  brand-deck init                  Create the database and seed demo decks");
    println!("  brand-deck list                  List stored presentations");
    println!("  brand-deck palette <hex> [n]     Preview the chart palette for a brand color");
    println!();
    println!("Database path: {} (override with BRAND_DECK_DB)", db_path());
}

fn run_init() -> Result<()> {
    println!("🎨 Brand Deck - Database Init");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let path = db_path();
    let conn = Connection::open(&path)?;
    setup_database(&conn)?;
    println!("✓ Database initialized: {}", path);

    let dark = seed_dark_demo(&conn)?;
    println!(
        "✓ Dark demo {} ({})",
        if dark.exists { "already present" } else { "seeded" },
        dark.id
    );

    let light = seed_light_demo(&conn)?;
    println!(
        "✓ Light demo {} ({})",
        if light.exists { "refreshed" } else { "seeded" },
        light.id
    );

    Ok(())
}

fn run_list() -> Result<()> {
    let conn = Connection::open(db_path())?;
    setup_database(&conn)?;

    let presentations = list_presentations(&conn)?;
    if presentations.is_empty() {
        println!("No presentations yet. Run: brand-deck init");
        return Ok(());
    }

    println!("{} presentation(s):", presentations.len());
    for p in presentations {
        let customer = p.customer_company_name.as_deref().unwrap_or("-");
        println!(
            "  {}  {:<24} customer={:<20} color={} mode={} created={}",
            p.id,
            p.company_name,
            customer,
            p.primary_color,
            p.theme_mode.as_str(),
            p.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

fn run_palette(hex: &str, count: usize) -> Result<()> {
    let hsl = hex_to_hsl(hex);
    println!("Seed {} -> h={} s={} l={}", hex, hsl.h, hsl.s, hsl.l);

    for (i, color) in generate_brand_palette(hex, count).iter().enumerate() {
        let Hsl { h, s, l } = hex_to_hsl(color);
        println!(
            "  [{}] {}  (h={:<3} s={:<2} l={:<2})  text={}",
            i,
            color,
            h,
            s,
            l,
            get_contrast_color(color)
        );
    }

    Ok(())
}
