// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod auth_tests;
mod employee_ops_tests;
mod payroll_ops_tests;

use hrms_domain::SystemRole;
use hrms_persistence::{EmployeeFields, Persistence};

use crate::auth::{SessionUser, Viewer};

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn seed_employee(persistence: &mut Persistence, email: &str, system_role: SystemRole) -> i64 {
    let fields: EmployeeFields = EmployeeFields {
        first_name: String::from("Test"),
        last_name: String::from("Person"),
        email: String::from(email),
        phone: None,
        department: Some(String::from("Engineering")),
        job_role: Some(String::from("Engineer")),
        status: String::from("Active"),
        join_date: Some(String::from("2025-06-01")),
    };
    let id: i64 = persistence
        .create_employee(&fields)
        .expect("Failed to seed employee");
    persistence
        .set_system_role(email, system_role.as_str())
        .expect("Failed to set system role");
    id
}

pub fn viewer(email: &str, role: SystemRole) -> Viewer {
    Viewer::new(
        SessionUser {
            identity_id: 1,
            email: String::from(email),
        },
        role,
    )
}
