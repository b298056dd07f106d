// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use hrms_api::{
    ApiError, AuthSession, AuthenticationService, CreateEmployeeRequest, DashboardStatsResponse,
    EmployeeListQuery, GateDecision, LeaveListQuery, RoleGate, SessionState, SessionUser,
    SignInRequest, SignUpRequest, SubmitLeaveRequest, UpdateEmployeeRequest,
    UpdateLeaveStatusRequest, Viewer,
};
use hrms_domain::SystemRole;
use hrms_persistence::{
    EmployeeData, EmployeePage, LeaveRequestData, PayrollRecordData, PayrollRunOutcome,
    Persistence,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::{ConfigError, ServerConfig};
use crate::session::{ApiKey, SessionToken, SessionViewer};

/// HRMS Server - HTTP server for the Pastel HRMS
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Overrides `HRMS_DATABASE_URL`.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer wrapped in a Mutex for safe concurrent
    /// access.
    persistence: Arc<Mutex<Persistence>>,
    /// The authentication service.
    auth: AuthenticationService,
    /// The public API key every request must present.
    api_key: String,
}

/// API response for a sign-in or sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionResponse {
    /// The opaque session token.
    token: String,
    /// The signed-in identity.
    user: SessionUser,
    /// The resolved role.
    role: String,
    /// Expiry timestamp (RFC 3339, UTC).
    expires_at: String,
}

/// API response for the session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionSnapshotResponse {
    /// The signed-in identity, if the token is valid.
    user: Option<SessionUser>,
    /// The resolved role, if the token is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

/// API response for write operations without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Query parameters for listing payroll records.
#[derive(Debug, Default, Deserialize)]
struct PayrollListQuery {
    /// Owning-employee filter. Only honored for elevated viewers.
    employee_id: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            // Uniqueness violations are conflicts with existing rows;
            // other rule violations are semantic rejections.
            ApiError::DomainRuleViolation { rule, .. } if rule.starts_with("unique_") => {
                StatusCode::CONFLICT
            }
            ApiError::DomainRuleViolation { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Recomputes the role gate for a page from the viewer's fresh session
/// state.
fn gate(viewer: &Viewer, allowed_roles: &[SystemRole]) -> Result<(), HttpError> {
    let state: SessionState = SessionState::signed_in(viewer.user.clone(), viewer.role);
    match RoleGate::decide(&state, allowed_roles) {
        GateDecision::Render => Ok(()),
        GateDecision::RedirectToLogin | GateDecision::Wait => Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Authentication required"),
        }),
        GateDecision::RedirectToDefault => Err(HttpError {
            status: StatusCode::FORBIDDEN,
            message: format!("Role '{}' may not view this page", viewer.role),
        }),
    }
}

fn session_response(
    persistence: &mut Persistence,
    state: &AppState,
    session: AuthSession,
) -> SessionResponse {
    let role: SystemRole = state.auth.resolve_role(persistence, &session.user.email);
    SessionResponse {
        token: session.token,
        user: session.user,
        role: role.as_str().to_string(),
        expires_at: session.expires_at,
    }
}

/// Handler for POST `/auth/signup`.
async fn handle_sign_up(
    AxumState(state): AxumState<AppState>,
    _: ApiKey,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>, HttpError> {
    info!("Handling signup request");

    let mut persistence = state.persistence.lock().await;
    let session: AuthSession = state
        .auth
        .sign_up(&mut persistence, &req.email, &req.password)?;
    let response: SessionResponse = session_response(&mut persistence, &state, session);
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/login`.
async fn handle_sign_in(
    AxumState(state): AxumState<AppState>,
    _: ApiKey,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = state.persistence.lock().await;
    let session: AuthSession = state
        .auth
        .sign_in(&mut persistence, &req.email, &req.password)
        .map_err(ApiError::from)?;
    let response: SessionResponse = session_response(&mut persistence, &state, session);
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/logout`.
///
/// Accepts stale tokens; logout is idempotent.
async fn handle_sign_out(
    AxumState(state): AxumState<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling logout request");

    let mut persistence = state.persistence.lock().await;
    state
        .auth
        .sign_out(&mut persistence, &token)
        .map_err(ApiError::from)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Signed out")),
    }))
}

/// Handler for GET `/auth/session`.
///
/// Returns the session snapshot for the presented token. An unknown or
/// expired token yields an empty snapshot, not an error.
async fn handle_get_session(
    AxumState(state): AxumState<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Json<SessionSnapshotResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let user: Option<SessionUser> = state
        .auth
        .current_session(&mut persistence, &token)
        .map_err(ApiError::from)?;
    let role: Option<String> = user
        .as_ref()
        .map(|u| state.auth.resolve_role(&mut persistence, &u.email))
        .map(|r| r.as_str().to_string());
    drop(persistence);

    Ok(Json(SessionSnapshotResponse { user, role }))
}

/// Handler for GET `/employees`.
async fn handle_list_employees(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<EmployeePage>, HttpError> {
    info!(viewer = %viewer.user.email, "Handling list_employees request");
    gate(&viewer, &[SystemRole::Admin, SystemRole::Hr])?;

    let mut persistence = state.persistence.lock().await;
    let page: EmployeePage = hrms_api::list_employees(&mut persistence, &viewer, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for POST `/employees`.
async fn handle_create_employee(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeData>, HttpError> {
    info!(
        viewer = %viewer.user.email,
        email = %req.email,
        "Handling create_employee request"
    );
    gate(&viewer, &[SystemRole::Admin, SystemRole::Hr])?;

    let mut persistence = state.persistence.lock().await;
    let employee: EmployeeData = hrms_api::create_employee(&mut persistence, &viewer, &req)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for PATCH `/employees/{id}`.
async fn handle_update_employee(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeData>, HttpError> {
    info!(
        viewer = %viewer.user.email,
        employee_id,
        "Handling update_employee request"
    );
    gate(&viewer, &[SystemRole::Admin, SystemRole::Hr])?;

    let mut persistence = state.persistence.lock().await;
    let employee: EmployeeData =
        hrms_api::update_employee(&mut persistence, &viewer, employee_id, &req)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for DELETE `/employees/{id}`.
async fn handle_delete_employee(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Path(employee_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        viewer = %viewer.user.email,
        employee_id,
        "Handling delete_employee request"
    );
    gate(&viewer, &[SystemRole::Admin, SystemRole::Hr])?;

    let mut persistence = state.persistence.lock().await;
    hrms_api::delete_employee(&mut persistence, &viewer, employee_id)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted employee {employee_id}")),
    }))
}

/// Handler for GET `/leaves`.
async fn handle_list_leaves(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Query(query): Query<LeaveListQuery>,
) -> Result<Json<Vec<LeaveRequestData>>, HttpError> {
    info!(viewer = %viewer.user.email, "Handling list_leaves request");

    let mut persistence = state.persistence.lock().await;
    let leaves: Vec<LeaveRequestData> =
        hrms_api::list_leave_requests(&mut persistence, &viewer, &query)?;
    drop(persistence);

    Ok(Json(leaves))
}

/// Handler for POST `/leaves`.
async fn handle_submit_leave(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Json(req): Json<SubmitLeaveRequest>,
) -> Result<Json<LeaveRequestData>, HttpError> {
    info!(viewer = %viewer.user.email, "Handling submit_leave request");

    let mut persistence = state.persistence.lock().await;
    let leave: LeaveRequestData = hrms_api::submit_leave_request(&mut persistence, &viewer, &req)?;
    drop(persistence);

    Ok(Json(leave))
}

/// Handler for PATCH `/leaves/{id}/status`.
async fn handle_update_leave_status(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Path(leave_id): Path<i64>,
    Json(req): Json<UpdateLeaveStatusRequest>,
) -> Result<Json<LeaveRequestData>, HttpError> {
    info!(
        viewer = %viewer.user.email,
        leave_id,
        status = %req.status,
        "Handling update_leave_status request"
    );
    gate(&viewer, &[SystemRole::Admin, SystemRole::Hr])?;

    let mut persistence = state.persistence.lock().await;
    let leave: LeaveRequestData =
        hrms_api::update_leave_status(&mut persistence, &viewer, leave_id, &req)?;
    drop(persistence);

    Ok(Json(leave))
}

/// Handler for GET `/payroll`.
async fn handle_list_payroll(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
    Query(query): Query<PayrollListQuery>,
) -> Result<Json<Vec<PayrollRecordData>>, HttpError> {
    info!(viewer = %viewer.user.email, "Handling list_payroll request");

    let mut persistence = state.persistence.lock().await;
    let records: Vec<PayrollRecordData> =
        hrms_api::list_payroll_records(&mut persistence, &viewer, query.employee_id)?;
    drop(persistence);

    Ok(Json(records))
}

/// Handler for POST `/payroll/run`.
async fn handle_run_payroll(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
) -> Result<Json<PayrollRunOutcome>, HttpError> {
    info!(viewer = %viewer.user.email, "Handling run_payroll request");
    gate(&viewer, &[SystemRole::Admin])?;

    let mut persistence = state.persistence.lock().await;
    let outcome: PayrollRunOutcome = hrms_api::run_payroll(&mut persistence, &viewer)?;
    drop(persistence);

    Ok(Json(outcome))
}

/// Handler for GET `/dashboard/stats`.
///
/// The dashboard is the default landing view, so the gate carries no
/// role list; any signed-in viewer may read it.
async fn handle_dashboard_stats(
    AxumState(state): AxumState<AppState>,
    SessionViewer(viewer, _): SessionViewer,
) -> Result<Json<DashboardStatsResponse>, HttpError> {
    info!(viewer = %viewer.user.email, "Handling dashboard_stats request");
    gate(&viewer, &[])?;

    let mut persistence = state.persistence.lock().await;
    let stats: DashboardStatsResponse = hrms_api::get_dashboard_stats(&mut persistence, &viewer)?;
    drop(persistence);

    Ok(Json(stats))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(handle_sign_up))
        .route("/auth/login", post(handle_sign_in))
        .route("/auth/logout", post(handle_sign_out))
        .route("/auth/session", get(handle_get_session))
        .route("/employees", get(handle_list_employees))
        .route("/employees", post(handle_create_employee))
        .route("/employees/{id}", patch(handle_update_employee))
        .route("/employees/{id}", delete(handle_delete_employee))
        .route("/leaves", get(handle_list_leaves))
        .route("/leaves", post(handle_submit_leave))
        .route("/leaves/{id}/status", patch(handle_update_leave_status))
        .route("/payroll", get(handle_list_payroll))
        .route("/payroll/run", post(handle_run_payroll))
        .route("/dashboard/stats", get(handle_dashboard_stats))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing HRMS Server");

    // Load configuration; missing values are fatal before serving
    let config: ServerConfig = match ServerConfig::from_env(args.database) {
        Ok(config) => config,
        Err(err @ ConfigError::MissingVariable { .. }) => {
            error!(error = %err, "Refusing to start without configuration");
            return Err(Box::new(err) as Box<dyn std::error::Error>);
        }
    };

    info!("Using database at: {}", config.database_url);
    let mut persistence: Persistence = Persistence::new_with_file(&config.database_url)?;

    // Sweep sessions that expired while the server was down.
    let now: String = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let swept: usize = persistence.delete_expired_sessions(&now)?;
    if swept > 0 {
        info!(swept, "Removed expired sessions");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        auth: AuthenticationService::new(),
        api_key: config.api_key,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
