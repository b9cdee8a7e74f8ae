// Database Models
//
// Tokio-postgres compatible models for users and projects, plus the request
// payloads the browser client submits. Field names on the wire follow the
// client's camelCase forms.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use deadpool_postgres::Pool;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Trait for converting from tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error>
    where
        Self: Sized;
}

/// Project lifecycle states accepted by `/update-status`
pub const VALID_STATUSES: [&str; 4] = ["Registered", "Running", "Closed", "Cancelled"];

pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

/// Map a client-side sort key to its column. Anything outside the whitelist
/// is ignored, the column name is interpolated into SQL.
pub fn sort_column(key: Option<&str>) -> Option<&'static str> {
    match key? {
        "projectTheme" => Some("project_theme"),
        "reason" => Some("reason"),
        "type" => Some("project_type"),
        "division" => Some("division"),
        "category" => Some("category"),
        "priority" => Some("priority"),
        "department" => Some("department"),
        "location" => Some("location"),
        "status" => Some("status"),
        "startDate" => Some("start_date"),
        "endDate" => Some("end_date"),
        _ => None,
    }
}

// ============================================================================
// USER MODELS
// ============================================================================

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

// ============================================================================
// PROJECT MODELS
// ============================================================================

/// Tracked project with its categorical attributes and lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub project_theme: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub division: String,
    pub category: String,
    pub priority: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow for Project {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            project_theme: row.try_get("project_theme")?,
            reason: row.try_get("reason")?,
            project_type: row.try_get("project_type")?,
            division: row.try_get("division")?,
            category: row.try_get("category")?,
            priority: row.try_get("priority")?,
            department: row.try_get("department")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            location: row.try_get("location")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Create project request, exactly the shape the form submits
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub project_theme: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub division: String,
    pub category: String,
    pub priority: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
}

impl CreateProjectRequest {
    /// True when any text field is blank after trimming
    pub fn has_empty_fields(&self) -> bool {
        [
            &self.project_theme,
            &self.reason,
            &self.project_type,
            &self.division,
            &self.category,
            &self.priority,
            &self.department,
            &self.location,
        ]
        .iter()
        .any(|f| f.trim().is_empty())
    }
}

/// Query parameters for `/project-list`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Update status request for `/update-status`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub project_id: i32,
    pub status: String,
}

impl Project {
    /// Insert a new project; status always starts as Registered
    pub async fn insert(pool: &Pool, req: &CreateProjectRequest) -> Result<Project> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                r#"
                INSERT INTO projects (
                    project_theme, reason, project_type, division, category,
                    priority, department, start_date, end_date, location, status
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'Registered')
                RETURNING *
                "#,
                &[
                    &req.project_theme,
                    &req.reason,
                    &req.project_type,
                    &req.division,
                    &req.category,
                    &req.priority,
                    &req.department,
                    &req.start_date,
                    &req.end_date,
                    &req.location,
                ],
            )
            .await?;
        Ok(Project::from_row(&row)?)
    }

    /// List projects with optional search, whitelisted sort, and pagination.
    /// Returns the page plus the total match count.
    pub async fn list(pool: &Pool, params: &ListParams) -> Result<(Vec<Project>, i64)> {
        let client = pool.get().await?;

        let column = sort_column(params.sort.as_deref()).unwrap_or("created_at");
        let direction = match params.order.as_deref() {
            Some("desc") => "DESC",
            Some("asc") => "ASC",
            _ if column == "created_at" => "DESC",
            _ => "ASC",
        };
        let limit = params.limit.unwrap_or(10).clamp(1, 100);
        let page = params.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;
        let pattern = params
            .search
            .as_ref()
            .map(|s| format!("%{}%", s.trim()))
            .filter(|p| p != "%%");

        const SEARCH_CLAUSE: &str = r#"
            $1::TEXT IS NULL
            OR project_theme ILIKE $1 OR reason ILIKE $1 OR project_type ILIKE $1
            OR division ILIKE $1 OR category ILIKE $1 OR priority ILIKE $1
            OR department ILIKE $1 OR location ILIKE $1 OR status ILIKE $1
        "#;

        let page_query = format!(
            "SELECT * FROM projects WHERE {SEARCH_CLAUSE} \
             ORDER BY {column} {direction} LIMIT $2 OFFSET $3"
        );
        let rows = client
            .query(page_query.as_str(), &[&pattern, &limit, &offset])
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM projects WHERE {SEARCH_CLAUSE}");
        let total: i64 = client
            .query_one(count_query.as_str(), &[&pattern])
            .await?
            .get(0);

        let projects = rows
            .iter()
            .map(Project::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((projects, total))
    }

    /// Set a project's status, returning the number of rows touched
    pub async fn update_status(pool: &Pool, project_id: i32, status: &str) -> Result<u64> {
        let client = pool.get().await?;
        let n = client
            .execute(
                "UPDATE projects SET status = $1, updated_at = NOW() WHERE id = $2",
                &[&status, &project_id],
            )
            .await?;
        Ok(n)
    }
}

// ============================================================================
// DASHBOARD MODELS
// ============================================================================

/// Lifecycle counters shown on the dashboard cards
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total: i64,
    pub closed: i64,
    pub running: i64,
    pub closure_delayed: i64,
    pub cancelled: i64,
}

impl DashboardCounts {
    /// A running project whose planned end date has passed counts as delayed.
    pub async fn fetch(pool: &Pool) -> Result<Self> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                r#"
                SELECT COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE status = 'Closed') AS closed,
                       COUNT(*) FILTER (WHERE status = 'Running') AS running,
                       COUNT(*) FILTER (WHERE status = 'Running' AND end_date < CURRENT_DATE)
                           AS closure_delayed,
                       COUNT(*) FILTER (WHERE status = 'Cancelled') AS cancelled
                FROM projects
                "#,
                &[],
            )
            .await?;
        Ok(Self {
            total: row.try_get("total")?,
            closed: row.try_get("closed")?,
            running: row.try_get("running")?,
            closure_delayed: row.try_get("closure_delayed")?,
            cancelled: row.try_get("cancelled")?,
        })
    }
}

/// Department-wise closure ratio for the chart endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStat {
    pub department: String,
    pub total: i64,
    pub closed: i64,
    pub success_percent: i64,
}

impl DepartmentStat {
    pub async fn fetch_all(pool: &Pool) -> Result<Vec<Self>> {
        let client = pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT department,
                       COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE status = 'Closed') AS closed
                FROM projects
                GROUP BY department
                ORDER BY department
                "#,
                &[],
            )
            .await?;

        rows.iter()
            .map(|row| {
                let total: i64 = row.try_get("total")?;
                let closed: i64 = row.try_get("closed")?;
                Ok(Self {
                    department: row.try_get("department")?,
                    total,
                    closed,
                    success_percent: success_percent(closed, total),
                })
            })
            .collect()
    }
}

/// Share of closed projects, rounded to the nearest whole percent
pub fn success_percent(closed: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((closed as f64 / total as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_project_request_matches_client_payload() {
        let json = r#"{
            "projectTheme": "Warehouse automation",
            "reason": "Business",
            "type": "Internal",
            "division": "Filters",
            "category": "Quality A",
            "priority": "High",
            "department": "Strategy",
            "startDate": "2026-08-01",
            "endDate": "2026-09-15",
            "location": "Pune"
        }"#;

        let req: CreateProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.project_type, "Internal");
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert!(!req.has_empty_fields());
    }

    #[test]
    fn blank_fields_are_detected_after_trimming() {
        let json = r#"{
            "projectTheme": "   ",
            "reason": "Business",
            "type": "Internal",
            "division": "Filters",
            "category": "Quality A",
            "priority": "High",
            "department": "Strategy",
            "startDate": "2026-08-01",
            "endDate": "2026-09-15",
            "location": "Pune"
        }"#;

        let req: CreateProjectRequest = serde_json::from_str(json).unwrap();
        assert!(req.has_empty_fields());
    }

    #[test]
    fn sort_keys_outside_whitelist_are_ignored() {
        assert_eq!(sort_column(Some("priority")), Some("priority"));
        assert_eq!(sort_column(Some("startDate")), Some("start_date"));
        assert_eq!(sort_column(Some("type")), Some("project_type"));
        assert_eq!(sort_column(Some("id; DROP TABLE projects")), None);
        assert_eq!(sort_column(None), None);
    }

    #[test]
    fn status_whitelist() {
        for s in VALID_STATUSES {
            assert!(is_valid_status(s));
        }
        assert!(!is_valid_status("Archived"));
        assert!(!is_valid_status("closed"));
    }

    #[test]
    fn success_percent_rounds_and_handles_empty_departments() {
        assert_eq!(success_percent(0, 0), 0);
        assert_eq!(success_percent(1, 3), 33);
        assert_eq!(success_percent(2, 3), 67);
        assert_eq!(success_percent(5, 5), 100);
    }

    #[test]
    fn project_serializes_with_client_field_names() {
        let project = Project {
            id: 1,
            project_theme: "Theme".into(),
            reason: "Business".into(),
            project_type: "Internal".into(),
            division: "Pumps".into(),
            category: "Quality B".into(),
            priority: "Low".into(),
            department: "Finance".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            location: "Delhi".into(),
            status: "Registered".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["projectTheme"], "Theme");
        assert_eq!(value["type"], "Internal");
        assert_eq!(value["startDate"], "2026-01-01");
        assert!(value.get("project_type").is_none());
    }
}
