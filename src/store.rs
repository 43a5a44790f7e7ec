// Presentation store
// SQLite-backed CRUD for presentation records. A presentation freezes one
// financial dataset as JSON text at creation time; updates touch branding
// and customer fields only and never regenerate the dataset.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::color::generate_brand_palette;
use crate::mock::generate_mock_financial_data;
use crate::model::FinancialData;
use crate::theme::{ThemeMode, CHART_SERIES_COUNT};

// ============================================================================
// RECORD TYPES
// ============================================================================

/// A stored presentation: one frozen financial snapshot plus branding.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub id: String,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub theme_mode: ThemeMode,
    pub customer_company_name: Option<String>,
    pub customer_logo_url: Option<String>,
    pub presentation_title: Option<String>,
    pub financial_data: FinancialData,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inputs for creating a presentation. The financial dataset is generated
/// by the caller (so demo seeds can thread brand palettes into it).
#[derive(Debug, Clone)]
pub struct NewPresentation {
    pub company_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub theme_mode: ThemeMode,
    pub customer_company_name: Option<String>,
    pub customer_logo_url: Option<String>,
    pub presentation_title: Option<String>,
}

/// Branding-only update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PresentationUpdate {
    pub company_name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub theme_mode: Option<ThemeMode>,
    pub customer_company_name: Option<String>,
    pub customer_logo_url: Option<String>,
    pub presentation_title: Option<String>,
}

/// Listing row: everything but the (large) financial snapshot.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSummary {
    pub id: String,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub theme_mode: ThemeMode,
    pub customer_company_name: Option<String>,
    pub presentation_title: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery, matching production sqlite usage
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS presentations (
            id TEXT PRIMARY KEY,
            company_name TEXT NOT NULL,
            logo_url TEXT,
            primary_color TEXT NOT NULL,
            theme_mode TEXT NOT NULL DEFAULT 'dark',
            customer_company_name TEXT,
            customer_logo_url TEXT,
            presentation_title TEXT,
            financial_data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_presentations_customer
         ON presentations(customer_company_name)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn json_error(e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
}

fn time_error(e: chrono::ParseError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_timestamp(value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(time_error)
}

fn row_to_presentation(row: &Row) -> rusqlite::Result<Presentation> {
    let financial_json: String = row.get(8)?;
    let created_at: String = row.get(9)?;
    let updated_at: Option<String> = row.get(10)?;
    let theme_mode: String = row.get(4)?;

    Ok(Presentation {
        id: row.get(0)?,
        company_name: row.get(1)?,
        logo_url: row.get(2)?,
        primary_color: row.get(3)?,
        theme_mode: ThemeMode::parse(&theme_mode),
        customer_company_name: row.get(5)?,
        customer_logo_url: row.get(6)?,
        presentation_title: row.get(7)?,
        financial_data: serde_json::from_str(&financial_json).map_err(json_error)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: updated_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

const PRESENTATION_COLUMNS: &str = "id, company_name, logo_url, primary_color, theme_mode, \
     customer_company_name, customer_logo_url, presentation_title, financial_data, \
     created_at, updated_at";

// ============================================================================
// CRUD
// ============================================================================

/// Insert a new presentation, freezing the given dataset as JSON text.
pub fn create_presentation(
    conn: &Connection,
    new: &NewPresentation,
    financial_data: &FinancialData,
) -> Result<Presentation> {
    let presentation = Presentation {
        id: uuid::Uuid::new_v4().to_string(),
        company_name: new.company_name.clone(),
        logo_url: new.logo_url.clone(),
        primary_color: new.primary_color.clone(),
        theme_mode: new.theme_mode,
        customer_company_name: new.customer_company_name.clone(),
        customer_logo_url: new.customer_logo_url.clone(),
        presentation_title: new.presentation_title.clone(),
        financial_data: financial_data.clone(),
        created_at: Utc::now(),
        updated_at: None,
    };

    let financial_json = serde_json::to_string(financial_data)
        .context("Failed to serialize financial data")?;

    conn.execute(
        "INSERT INTO presentations (
            id, company_name, logo_url, primary_color, theme_mode,
            customer_company_name, customer_logo_url, presentation_title,
            financial_data, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            presentation.id,
            presentation.company_name,
            presentation.logo_url,
            presentation.primary_color,
            presentation.theme_mode.as_str(),
            presentation.customer_company_name,
            presentation.customer_logo_url,
            presentation.presentation_title,
            financial_json,
            presentation.created_at.to_rfc3339(),
        ],
    )
    .context("Failed to insert presentation")?;

    Ok(presentation)
}

/// List presentations, newest first, without the financial snapshots.
pub fn list_presentations(conn: &Connection) -> Result<Vec<PresentationSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, company_name, logo_url, primary_color, theme_mode,
                customer_company_name, presentation_title, created_at
         FROM presentations
         ORDER BY created_at DESC",
    )?;

    let summaries = stmt
        .query_map([], |row| {
            let theme_mode: String = row.get(4)?;
            let created_at: String = row.get(7)?;
            Ok(PresentationSummary {
                id: row.get(0)?,
                company_name: row.get(1)?,
                logo_url: row.get(2)?,
                primary_color: row.get(3)?,
                theme_mode: ThemeMode::parse(&theme_mode),
                customer_company_name: row.get(5)?,
                presentation_title: row.get(6)?,
                created_at: parse_timestamp(&created_at)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(summaries)
}

/// Fetch one presentation by id.
pub fn get_presentation(conn: &Connection, id: &str) -> Result<Option<Presentation>> {
    let presentation = conn
        .query_row(
            &format!("SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = ?1"),
            params![id],
            row_to_presentation,
        )
        .optional()
        .with_context(|| format!("Failed to fetch presentation {}", id))?;

    Ok(presentation)
}

/// Find the newest presentation for a customer, optionally pinned to a mode.
pub fn find_by_customer(
    conn: &Connection,
    customer_company_name: &str,
    theme_mode: Option<ThemeMode>,
) -> Result<Option<Presentation>> {
    let presentation = match theme_mode {
        Some(mode) => conn
            .query_row(
                &format!(
                    "SELECT {PRESENTATION_COLUMNS} FROM presentations
                     WHERE customer_company_name = ?1 AND theme_mode = ?2
                     ORDER BY created_at DESC LIMIT 1"
                ),
                params![customer_company_name, mode.as_str()],
                row_to_presentation,
            )
            .optional()?,
        None => conn
            .query_row(
                &format!(
                    "SELECT {PRESENTATION_COLUMNS} FROM presentations
                     WHERE customer_company_name = ?1
                     ORDER BY created_at DESC LIMIT 1"
                ),
                params![customer_company_name],
                row_to_presentation,
            )
            .optional()?,
    };

    Ok(presentation)
}

/// Apply a branding-only update. The frozen financial snapshot is never
/// touched. Returns the updated record, or None if the id is unknown.
pub fn update_presentation(
    conn: &Connection,
    id: &str,
    update: &PresentationUpdate,
) -> Result<Option<Presentation>> {
    let Some(mut presentation) = get_presentation(conn, id)? else {
        return Ok(None);
    };

    if let Some(v) = &update.company_name {
        presentation.company_name = v.clone();
    }
    if let Some(v) = &update.logo_url {
        presentation.logo_url = Some(v.clone());
    }
    if let Some(v) = &update.primary_color {
        presentation.primary_color = v.clone();
    }
    if let Some(v) = update.theme_mode {
        presentation.theme_mode = v;
    }
    if let Some(v) = &update.customer_company_name {
        presentation.customer_company_name = Some(v.clone());
    }
    if let Some(v) = &update.customer_logo_url {
        presentation.customer_logo_url = Some(v.clone());
    }
    if let Some(v) = &update.presentation_title {
        presentation.presentation_title = Some(v.clone());
    }
    presentation.updated_at = Some(Utc::now());

    conn.execute(
        "UPDATE presentations SET
            company_name = ?1, logo_url = ?2, primary_color = ?3, theme_mode = ?4,
            customer_company_name = ?5, customer_logo_url = ?6, presentation_title = ?7,
            updated_at = ?8
         WHERE id = ?9",
        params![
            presentation.company_name,
            presentation.logo_url,
            presentation.primary_color,
            presentation.theme_mode.as_str(),
            presentation.customer_company_name,
            presentation.customer_logo_url,
            presentation.presentation_title,
            presentation.updated_at.map(|t| t.to_rfc3339()),
            id,
        ],
    )
    .context("Failed to update presentation")?;

    Ok(Some(presentation))
}

/// Delete by id. Returns whether a record was removed.
pub fn delete_presentation(conn: &Connection, id: &str) -> Result<bool> {
    let affected = conn
        .execute("DELETE FROM presentations WHERE id = ?1", params![id])
        .context("Failed to delete presentation")?;
    Ok(affected > 0)
}

// ============================================================================
// DEMO SEEDS
// ============================================================================

/// Result of an idempotent demo seed.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedOutcome {
    pub id: String,
    pub exists: bool,
}

const DEMO_FIRM_NAME: &str = "Meridian Advisory";
const DEMO_FIRM_LOGO: &str = "/meridian.png";
const DEMO_TITLE: &str = "Financial Update 2025";

/// Seed the dark-mode demo presentation. Idempotent by customer name.
pub fn seed_dark_demo(conn: &Connection) -> Result<SeedOutcome> {
    seed_demo(
        conn,
        "Northlight Labs",
        "/northlight_logo.png",
        "#543D97",
        ThemeMode::Dark,
        false,
    )
}

/// Seed the light-mode demo presentation. Unlike the dark seed, an existing
/// record is refreshed so the demo always carries current branding.
pub fn seed_light_demo(conn: &Connection) -> Result<SeedOutcome> {
    seed_demo(
        conn,
        "Clearwater Systems",
        "/clearwater_logo.png",
        "#2E9ED0",
        ThemeMode::Light,
        true,
    )
}

fn seed_demo(
    conn: &Connection,
    customer: &str,
    customer_logo: &str,
    brand_color: &str,
    mode: ThemeMode,
    refresh_existing: bool,
) -> Result<SeedOutcome> {
    let mode_filter = if refresh_existing { Some(mode) } else { None };

    if let Some(existing) = find_by_customer(conn, customer, mode_filter)? {
        if !refresh_existing {
            return Ok(SeedOutcome { id: existing.id, exists: true });
        }

        let update = PresentationUpdate {
            company_name: Some(DEMO_FIRM_NAME.to_string()),
            logo_url: Some(DEMO_FIRM_LOGO.to_string()),
            primary_color: Some(brand_color.to_string()),
            customer_logo_url: Some(customer_logo.to_string()),
            ..Default::default()
        };
        update_presentation(conn, &existing.id, &update)?;
        return Ok(SeedOutcome { id: existing.id, exists: true });
    }

    let chart_colors = generate_brand_palette(brand_color, CHART_SERIES_COUNT);
    let financial_data = generate_mock_financial_data(&chart_colors);

    let new = NewPresentation {
        company_name: DEMO_FIRM_NAME.to_string(),
        logo_url: Some(DEMO_FIRM_LOGO.to_string()),
        primary_color: brand_color.to_string(),
        theme_mode: mode,
        customer_company_name: Some(customer.to_string()),
        customer_logo_url: Some(customer_logo.to_string()),
        presentation_title: Some(DEMO_TITLE.to_string()),
    };

    let presentation = create_presentation(conn, &new, &financial_data)?;
    Ok(SeedOutcome { id: presentation.id, exists: false })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::generate_mock_financial_data;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    fn new_presentation(company: &str) -> NewPresentation {
        NewPresentation {
            company_name: company.to_string(),
            logo_url: None,
            primary_color: "#3B82F6".to_string(),
            theme_mode: ThemeMode::Dark,
            customer_company_name: None,
            customer_logo_url: None,
            presentation_title: None,
        }
    }

    #[test]
    fn test_create_and_get_round_trip() {
        let conn = test_conn();
        let data = generate_mock_financial_data(&[]);

        let created = create_presentation(&conn, &new_presentation("Acme"), &data).unwrap();
        let fetched = get_presentation(&conn, &created.id).unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.company_name, "Acme");
        assert_eq!(fetched.primary_color, "#3B82F6");
        assert_eq!(fetched.financial_data, data);
        assert!(fetched.updated_at.is_none());
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let conn = test_conn();
        assert!(get_presentation(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_list_excludes_snapshot_and_orders_newest_first() {
        let conn = test_conn();
        let data = generate_mock_financial_data(&[]);

        create_presentation(&conn, &new_presentation("First"), &data).unwrap();
        create_presentation(&conn, &new_presentation("Second"), &data).unwrap();

        let summaries = list_presentations(&conn).unwrap();
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].created_at >= summaries[1].created_at);
    }

    #[test]
    fn test_update_touches_branding_only() {
        let conn = test_conn();
        let data = generate_mock_financial_data(&[]);
        let created = create_presentation(&conn, &new_presentation("Acme"), &data).unwrap();

        let update = PresentationUpdate {
            company_name: Some("Acme Rebranded".to_string()),
            primary_color: Some("#543D97".to_string()),
            theme_mode: Some(ThemeMode::Light),
            ..Default::default()
        };
        let updated = update_presentation(&conn, &created.id, &update)
            .unwrap()
            .unwrap();

        assert_eq!(updated.company_name, "Acme Rebranded");
        assert_eq!(updated.primary_color, "#543D97");
        assert_eq!(updated.theme_mode, ThemeMode::Light);
        assert!(updated.updated_at.is_some());

        // The frozen snapshot must survive the update byte-for-byte
        let fetched = get_presentation(&conn, &created.id).unwrap().unwrap();
        assert_eq!(fetched.financial_data, data);
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let conn = test_conn();
        let result = update_presentation(&conn, "missing", &PresentationUpdate::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();
        let data = generate_mock_financial_data(&[]);
        let created = create_presentation(&conn, &new_presentation("Acme"), &data).unwrap();

        assert!(delete_presentation(&conn, &created.id).unwrap());
        assert!(get_presentation(&conn, &created.id).unwrap().is_none());
        assert!(!delete_presentation(&conn, &created.id).unwrap());
    }

    #[test]
    fn test_dark_seed_is_idempotent() {
        let conn = test_conn();

        let first = seed_dark_demo(&conn).unwrap();
        assert!(!first.exists);

        let second = seed_dark_demo(&conn).unwrap();
        assert!(second.exists);
        assert_eq!(second.id, first.id);

        assert_eq!(list_presentations(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_light_seed_refreshes_branding() {
        let conn = test_conn();

        let first = seed_light_demo(&conn).unwrap();
        let snapshot_before = get_presentation(&conn, &first.id)
            .unwrap()
            .unwrap()
            .financial_data;

        let second = seed_light_demo(&conn).unwrap();
        assert!(second.exists);
        assert_eq!(second.id, first.id);

        // Refresh updates branding but never regenerates the snapshot
        let after = get_presentation(&conn, &first.id).unwrap().unwrap();
        assert_eq!(after.financial_data, snapshot_before);
        assert_eq!(after.primary_color, "#2E9ED0");
        assert_eq!(after.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_find_by_customer_respects_mode() {
        let conn = test_conn();
        seed_dark_demo(&conn).unwrap();

        let found = find_by_customer(&conn, "Northlight Labs", None).unwrap();
        assert!(found.is_some());

        let wrong_mode =
            find_by_customer(&conn, "Northlight Labs", Some(ThemeMode::Light)).unwrap();
        assert!(wrong_mode.is_none());
    }
}
