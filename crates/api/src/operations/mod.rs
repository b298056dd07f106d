// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page operations.
//!
//! One module per page of the application. Every operation takes the
//! viewer so role checks happen here, not in the HTTP layer.

pub mod dashboard;
pub mod employees;
pub mod leaves;
pub mod payroll;

use crate::auth::Viewer;
use crate::error::{ApiError, translate_persistence_error};
use hrms_persistence::Persistence;

/// Resolves the employee row belonging to the viewer's email.
///
/// Returns `Ok(None)` if the viewer has no employee row.
fn own_employee_id(
    persistence: &mut Persistence,
    viewer: &Viewer,
) -> Result<Option<i64>, ApiError> {
    let employee = persistence
        .get_employee_by_email(&viewer.user.email)
        .map_err(translate_persistence_error)?;
    Ok(employee.map(|e| e.id))
}
