// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod leave_tests;
mod payroll_tests;

use crate::data_models::EmployeeFields;

pub fn create_test_employee(first_name: &str, last_name: &str, email: &str) -> EmployeeFields {
    EmployeeFields {
        first_name: String::from(first_name),
        last_name: String::from(last_name),
        email: String::from(email),
        phone: Some(String::from("555-0100")),
        department: Some(String::from("Engineering")),
        job_role: Some(String::from("Engineer")),
        status: String::from("Active"),
        join_date: Some(String::from("2025-06-01")),
    }
}
